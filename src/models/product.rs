use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

/// A row of the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub category: Option<String>,
    pub image: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        NewProduct {
            name: name.into(),
            description: None,
            price,
            stock,
            category: None,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
