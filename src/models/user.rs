use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

/// User role as stored in the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

/// A row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Insertable user; `id` and timestamps are assigned by the database.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        NewUser {
            name: name.into(),
            email: email.into(),
            role,
            avatar: None,
        }
    }

    pub fn customer(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(name, email, Role::Customer)
    }
}
