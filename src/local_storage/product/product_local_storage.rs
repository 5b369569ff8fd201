use crate::error::Result;
use crate::local_storage::core_local_storage::CoreLocalStorage;
use crate::local_storage::filter::Filter;
use crate::local_storage::product::product_tables::ProductTable;
use crate::models::timestamp;
use crate::models::{NewProduct, Product};
use serde_json::{Value, json};
use std::sync::Arc;

pub struct ProductLocalStorage {
    core_storage: Arc<CoreLocalStorage>,
}

impl ProductLocalStorage {
    pub fn new(core_storage: Arc<CoreLocalStorage>) -> Self {
        ProductLocalStorage { core_storage }
    }

    pub async fn save_product(&self, product: &NewProduct) -> Result<i64> {
        let data = serde_json::to_value(product)?;
        self.core_storage.insert(ProductTable::TABLE_NAME, &data).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        self.core_storage.get_by_id(ProductTable::TABLE_NAME, id).await
    }

    /// All products, or only those of `category`.
    pub async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>> {
        match category {
            Some(category) => {
                let query = format!(
                    "SELECT * FROM {} WHERE {} = ? ORDER BY name ASC",
                    ProductTable::TABLE_NAME,
                    ProductTable::COLUMN_CATEGORY
                );
                self.core_storage.query(&query, &[category.into()]).await
            }
            None => {
                let query = format!("SELECT * FROM {} ORDER BY name ASC", ProductTable::TABLE_NAME);
                self.core_storage.query(&query, &[]).await
            }
        }
    }

    /// Case-insensitive match on name or description.
    pub async fn search_products(&self, text: &str) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT * FROM {table} WHERE LOWER({name}) LIKE ? ESCAPE '\\' OR LOWER(COALESCE({description}, '')) LIKE ? ESCAPE '\\' ORDER BY {name} ASC",
            table = ProductTable::TABLE_NAME,
            name = ProductTable::COLUMN_NAME,
            description = ProductTable::COLUMN_DESCRIPTION
        );
        let pattern = like_pattern(text);

        self.core_storage
            .query(&query, &[pattern.clone().into(), pattern.into()])
            .await
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        let query = format!(
            "SELECT DISTINCT {category} AS category FROM {table} WHERE {category} IS NOT NULL ORDER BY {category} ASC",
            table = ProductTable::TABLE_NAME,
            category = ProductTable::COLUMN_CATEGORY
        );
        let rows = self.core_storage.query_rows(&query, &[]).await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| row.get("category").and_then(Value::as_str).map(str::to_string))
            .collect())
    }

    /// Adds `delta` (negative to remove) units to the product's stock.
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> Result<u64> {
        let query = format!(
            "UPDATE {table} SET {stock} = {stock} + ?, {updated_at} = ? WHERE {id} = ?",
            table = ProductTable::TABLE_NAME,
            stock = ProductTable::COLUMN_STOCK,
            updated_at = ProductTable::COLUMN_UPDATED_AT,
            id = ProductTable::COLUMN_ID
        );
        let rows = sqlx::query(&query)
            .bind(delta)
            .bind(timestamp::now())
            .bind(id)
            .execute(self.core_storage.pool())
            .await
            .inspect_err(|e| tracing::error!(product_id = id, error = %e, "Error adjusting stock"))?;

        Ok(rows.rows_affected())
    }

    /// Products with `stock` at or below `threshold`, lowest first.
    pub async fn low_stock(&self, threshold: i64) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT * FROM {table} WHERE {stock} <= ? ORDER BY {stock} ASC",
            table = ProductTable::TABLE_NAME,
            stock = ProductTable::COLUMN_STOCK
        );
        self.core_storage.query(&query, &[threshold.into()]).await
    }

    pub async fn update_product(&self, id: i64, changes: &Value) -> Result<u64> {
        let mut changes = changes.clone();
        // An empty change set goes through untouched and is rejected by the core.
        if let Some(map) = changes.as_object_mut().filter(|map| !map.is_empty()) {
            map.insert(ProductTable::COLUMN_UPDATED_AT.to_string(), json!(timestamp::now()));
        }

        self.core_storage
            .update_where(ProductTable::TABLE_NAME, &changes, &Filter::by_id(id))
            .await
    }

    pub async fn delete_product(&self, id: i64) -> Result<u64> {
        self.core_storage
            .delete_where(ProductTable::TABLE_NAME, &Filter::by_id(id))
            .await
    }
}

/// Substring pattern for `LIKE ? ESCAPE '\'`; wildcards in `text` match literally.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.trim().to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
