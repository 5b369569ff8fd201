use serde::Serialize;
use sqlx::FromRow;

/// Headline figures of the dashboard screen.
///
/// Canceled orders count towards `total_orders` but not towards revenue or
/// the average order value.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_orders: i64,
    pub total_customers: i64,
    pub average_order_value: f64,
}

/// Best sellers by units sold.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TopProduct {
    pub product_id: i64,
    pub name: String,
    pub sold: i64,
    pub revenue: f64,
}
