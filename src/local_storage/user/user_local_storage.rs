use crate::error::Result;
use crate::local_storage::core_local_storage::CoreLocalStorage;
use crate::local_storage::filter::Filter;
use crate::local_storage::user::user_tables::UserTable;
use crate::models::timestamp;
use crate::models::{NewUser, Role, User};
use serde_json::Value;
use std::sync::Arc;

pub struct UserLocalStorage {
    core_storage: Arc<CoreLocalStorage>,
}

impl UserLocalStorage {
    pub fn new(core_storage: Arc<CoreLocalStorage>) -> Self {
        UserLocalStorage { core_storage }
    }

    pub async fn save_user(&self, user: &NewUser) -> Result<i64> {
        let data = serde_json::to_value(user)?;
        self.core_storage.insert(UserTable::TABLE_NAME, &data).await
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.core_storage.get_by_id(UserTable::TABLE_NAME, id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!(
            "SELECT * FROM {} WHERE {} = ?",
            UserTable::TABLE_NAME,
            UserTable::COLUMN_EMAIL
        );
        let mut users = self.core_storage.query::<User>(&query, &[email.into()]).await?;

        Ok(users.pop())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let query = format!("SELECT * FROM {} ORDER BY id ASC", UserTable::TABLE_NAME);
        self.core_storage.query(&query, &[]).await
    }

    pub async fn list_customers(&self) -> Result<Vec<User>> {
        let query = format!(
            "SELECT * FROM {} WHERE {} = ? ORDER BY name ASC",
            UserTable::TABLE_NAME,
            UserTable::COLUMN_ROLE
        );
        self.core_storage
            .query(&query, &[Role::Customer.as_str().into()])
            .await
    }

    /// Applies the given column changes and refreshes `updated_at`.
    pub async fn update_user(&self, id: i64, changes: &Value) -> Result<u64> {
        let mut changes = changes.clone();
        if let Some(map) = changes.as_object_mut().filter(|map| !map.is_empty()) {
            map.insert(UserTable::COLUMN_UPDATED_AT.to_string(), timestamp::now().into());
        }

        self.core_storage
            .update_where(UserTable::TABLE_NAME, &changes, &Filter::by_id(id))
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<u64> {
        self.core_storage
            .delete_where(UserTable::TABLE_NAME, &Filter::by_id(id))
            .await
    }
}
