use crate::error::Result;
use crate::local_storage::core_local_storage::CoreLocalStorage;
use crate::local_storage::filter::Filter;
use crate::local_storage::order::order_tables::OrderTable;
use crate::local_storage::order_item::OrderItemTable;
use crate::local_storage::product::ProductTable;
use crate::local_storage::product::product_local_storage::like_pattern;
use crate::local_storage::user::UserTable;
use crate::models::timestamp;
use crate::models::{
    DashboardSummary, NewOrder, NewOrderItem, Order, OrderItem, OrderListEntry, OrderStatus,
    OrderWithItems, Role, TopProduct,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;

pub struct OrderLocalStorage {
    core_storage: Arc<CoreLocalStorage>,
}

impl OrderLocalStorage {
    pub fn new(core_storage: Arc<CoreLocalStorage>) -> Self {
        OrderLocalStorage { core_storage }
    }

    /// Inserts the order, then each of its items.
    ///
    /// The statements run one after another without a transaction; a
    /// failing item leaves the order and the items before it in place.
    pub async fn create_order(&self, order: &NewOrder) -> Result<i64> {
        let mut data = Map::new();
        data.insert(OrderTable::COLUMN_CUSTOMER_ID.to_string(), order.customer_id.into());
        data.insert(OrderTable::COLUMN_STATUS.to_string(), order.status.as_str().into());
        data.insert(OrderTable::COLUMN_TOTAL.to_string(), json!(order.total()));
        if let Some(date) = order.date {
            data.insert(
                OrderTable::COLUMN_DATE.to_string(),
                date.format(timestamp::FORMAT).to_string().into(),
            );
        }

        let order_id = self
            .core_storage
            .insert(OrderTable::TABLE_NAME, &Value::Object(data))
            .await?;

        for item in &order.items {
            self.add_item(order_id, item).await?;
        }

        tracing::debug!(order_id, items = order.items.len(), "Order created");
        Ok(order_id)
    }

    pub async fn add_item(&self, order_id: i64, item: &NewOrderItem) -> Result<i64> {
        let data = json!({
            (OrderItemTable::COLUMN_ORDER_ID): order_id,
            (OrderItemTable::COLUMN_PRODUCT_ID): item.product_id,
            (OrderItemTable::COLUMN_QUANTITY): item.quantity,
            (OrderItemTable::COLUMN_PRICE): item.price,
        });

        self.core_storage.insert(OrderItemTable::TABLE_NAME, &data).await
    }

    pub async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        self.core_storage.get_by_id(OrderTable::TABLE_NAME, id).await
    }

    pub async fn items_for_order(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        let query = format!(
            "SELECT * FROM {} WHERE {} = ? ORDER BY id ASC",
            OrderItemTable::TABLE_NAME,
            OrderItemTable::COLUMN_ORDER_ID
        );
        self.core_storage.query(&query, &[order_id.into()]).await
    }

    pub async fn get_order_with_items(&self, id: i64) -> Result<Option<OrderWithItems>> {
        let Some(order) = self.get_order(id).await? else {
            return Ok(None);
        };
        let items = self.items_for_order(id).await?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// Orders joined with their customer, newest first, optionally of one status.
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<OrderListEntry>> {
        match status {
            Some(status) => {
                let query = list_query(&format!("WHERE o.{} = ?", OrderTable::COLUMN_STATUS));
                self.core_storage.query(&query, &[status.as_str().into()]).await
            }
            None => self.core_storage.query(&list_query(""), &[]).await,
        }
    }

    /// Case-insensitive match on the order id or the customer's name.
    pub async fn search_orders(&self, text: &str) -> Result<Vec<OrderListEntry>> {
        let query = list_query(&format!(
            "WHERE CAST(o.{} AS TEXT) LIKE ? ESCAPE '\\' OR LOWER(u.{}) LIKE ? ESCAPE '\\'",
            OrderTable::COLUMN_ID,
            UserTable::COLUMN_NAME
        ));
        let pattern = like_pattern(text);

        self.core_storage
            .query(&query, &[pattern.clone().into(), pattern.into()])
            .await
    }

    pub async fn recent_orders(&self, limit: i64) -> Result<Vec<OrderListEntry>> {
        let query = format!("{} LIMIT ?", list_query(""));
        self.core_storage.query(&query, &[limit.into()]).await
    }

    pub async fn update_status(&self, id: i64, status: OrderStatus) -> Result<u64> {
        let changes = json!({
            (OrderTable::COLUMN_STATUS): status.as_str(),
            (OrderTable::COLUMN_UPDATED_AT): timestamp::now(),
        });

        self.core_storage
            .update_where(OrderTable::TABLE_NAME, &changes, &Filter::by_id(id))
            .await
    }

    /// Removes the order's items, then the order. Returns the orders removed.
    pub async fn delete_order(&self, id: i64) -> Result<u64> {
        self.core_storage
            .delete_where(
                OrderItemTable::TABLE_NAME,
                &Filter::new().eq(OrderItemTable::COLUMN_ORDER_ID, id),
            )
            .await?;

        self.core_storage
            .delete_where(OrderTable::TABLE_NAME, &Filter::by_id(id))
            .await
    }

    pub async fn top_products(&self, limit: i64) -> Result<Vec<TopProduct>> {
        let query = format!(
            "SELECT p.{p_id} AS product_id, p.{p_name} AS name,
                    CAST(SUM(i.{quantity}) AS INTEGER) AS sold,
                    CAST(SUM(i.{quantity} * i.{price}) AS REAL) AS revenue
             FROM {items} i
             JOIN {products} p ON p.{p_id} = i.{product_id}
             JOIN {orders} o ON o.{o_id} = i.{order_id}
             WHERE o.{status} != ?
             GROUP BY p.{p_id}, p.{p_name}
             ORDER BY sold DESC, p.{p_name} ASC
             LIMIT ?",
            p_id = ProductTable::COLUMN_ID,
            p_name = ProductTable::COLUMN_NAME,
            quantity = OrderItemTable::COLUMN_QUANTITY,
            price = OrderItemTable::COLUMN_PRICE,
            items = OrderItemTable::TABLE_NAME,
            products = ProductTable::TABLE_NAME,
            product_id = OrderItemTable::COLUMN_PRODUCT_ID,
            orders = OrderTable::TABLE_NAME,
            o_id = OrderTable::COLUMN_ID,
            order_id = OrderItemTable::COLUMN_ORDER_ID,
            status = OrderTable::COLUMN_STATUS,
        );

        let products = sqlx::query_as::<_, TopProduct>(&query)
            .bind(OrderStatus::Canceled.as_str())
            .bind(limit)
            .fetch_all(self.core_storage.pool())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error loading top products"))?;

        Ok(products)
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let query = format!(
            "SELECT
                CAST(COALESCE((SELECT SUM({total}) FROM {orders} WHERE {status} != ?1), 0) AS REAL) AS total_revenue,
                (SELECT COUNT(*) FROM {orders}) AS total_orders,
                (SELECT COUNT(*) FROM {users} WHERE {role} = ?2) AS total_customers,
                CAST(COALESCE((SELECT AVG({total}) FROM {orders} WHERE {status} != ?1), 0) AS REAL) AS average_order_value",
            total = OrderTable::COLUMN_TOTAL,
            orders = OrderTable::TABLE_NAME,
            status = OrderTable::COLUMN_STATUS,
            users = UserTable::TABLE_NAME,
            role = UserTable::COLUMN_ROLE,
        );

        let summary = sqlx::query_as::<_, DashboardSummary>(&query)
            .bind(OrderStatus::Canceled.as_str())
            .bind(Role::Customer.as_str())
            .fetch_one(self.core_storage.pool())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error loading dashboard summary"))?;

        Ok(summary)
    }
}

fn list_query(where_clause: &str) -> String {
    format!(
        "SELECT o.{o_id} AS id, o.{customer_id} AS customer_id, u.{u_name} AS customer_name,
                u.{u_email} AS customer_email, o.{status} AS status, o.{total} AS total,
                o.{date} AS date,
                (SELECT COUNT(*) FROM {items} i WHERE i.{order_id} = o.{o_id}) AS item_count
         FROM {orders} o
         JOIN {users} u ON u.{u_id} = o.{customer_id}
         {where_clause}
         ORDER BY o.{date} DESC, o.{o_id} DESC",
        o_id = OrderTable::COLUMN_ID,
        customer_id = OrderTable::COLUMN_CUSTOMER_ID,
        u_name = UserTable::COLUMN_NAME,
        u_email = UserTable::COLUMN_EMAIL,
        status = OrderTable::COLUMN_STATUS,
        total = OrderTable::COLUMN_TOTAL,
        date = OrderTable::COLUMN_DATE,
        items = OrderItemTable::TABLE_NAME,
        order_id = OrderItemTable::COLUMN_ORDER_ID,
        orders = OrderTable::TABLE_NAME,
        users = UserTable::TABLE_NAME,
        u_id = UserTable::COLUMN_ID,
        where_clause = where_clause,
    )
}
