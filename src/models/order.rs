use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

/// Lifecycle states of an order, as shown in the order filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Translation key of the status label.
    pub fn label_key(&self) -> String {
        format!("orders.statuses.{}", self.as_str())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status: {}", s))
    }
}

/// A row of the `orders` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub status: String,
    pub total: f64,
    #[serde(default, with = "timestamp")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Order {
    /// `None` when the stored status is not one the client knows.
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }
}

/// A row of the `order_items` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Order row joined with its customer, as listed on the orders screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderListEntry {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub status: String,
    pub total: f64,
    #[serde(default, with = "timestamp")]
    pub date: Option<NaiveDateTime>,
    pub item_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

/// Insertable order with its line items.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub status: OrderStatus,
    /// Computed from `items` when `None`.
    pub total: Option<f64>,
    /// Written to the `date` column when set; the column default applies otherwise.
    pub date: Option<NaiveDateTime>,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    pub fn new(customer_id: i64, status: OrderStatus) -> Self {
        NewOrder {
            customer_id,
            status,
            total: None,
            date: None,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, product_id: i64, quantity: i64, price: f64) -> Self {
        self.items.push(NewOrderItem {
            product_id,
            quantity,
            price,
        });
        self
    }

    pub fn total(&self) -> f64 {
        self.total.unwrap_or_else(|| {
            self.items
                .iter()
                .map(|item| item.price * item.quantity as f64)
                .sum()
        })
    }
}
