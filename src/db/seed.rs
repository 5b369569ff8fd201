//! Demo content shown by the dashboard screens.

use serde_json::json;
use tracing::info;

use crate::error::Result;
use crate::local_storage::order::OrderTable;
use crate::local_storage::order_item::OrderItemTable;
use crate::local_storage::product::ProductTable;
use crate::local_storage::user::UserTable;
use crate::local_storage::{CoreLocalStorage, Filter};

const CUSTOMERS: &[(&str, &str)] = &[
    ("John Doe", "john.doe@example.com"),
    ("Jane Smith", "jane.smith@example.com"),
    ("Robert Brown", "robert.brown@example.com"),
    ("Emily Johnson", "emily.j@example.com"),
    ("Michael Wilson", "michael.w@example.com"),
    ("Sarah Davis", "sarah.d@example.com"),
    ("David Martinez", "david.m@example.com"),
];

// name, description, price, stock, category
const PRODUCTS: &[(&str, &str, f64, i64, &str)] = &[
    ("Wireless Earbuds", "High quality wireless earbuds with noise cancellation", 59.99, 45, "electronics"),
    ("Smart Watch", "Fitness tracker with heart rate monitor", 99.99, 32, "electronics"),
    ("Bluetooth Speaker", "Portable speaker with rich sound", 45.50, 20, "electronics"),
    ("Phone Case", "Shockproof phone case with card holder", 19.99, 120, "accessories"),
    ("Laptop Bag", "Protective bag with multiple compartments", 39.99, 28, "accessories"),
    ("Wireless Charger", "Fast charging wireless pad", 29.99, 56, "electronics"),
    ("Desk Lamp", "Adjustable LED desk lamp", 24.99, 15, "home"),
];

// customer index, date, status, total, (product index, quantity) items
const ORDERS: &[(usize, &str, &str, f64, &[(usize, i64)])] = &[
    (0, "2023-05-01 10:30:00", "pending", 128.50, &[(0, 1), (3, 1), (5, 1)]),
    (1, "2023-04-30 15:45:00", "delivered", 76.20, &[(2, 1), (6, 1)]),
    (2, "2023-04-29 09:15:00", "processing", 214.75, &[(1, 1), (0, 2), (3, 2)]),
    (3, "2023-04-28 14:20:00", "shipped", 95.30, &[(1, 1)]),
    (4, "2023-04-27 18:10:00", "canceled", 152.40, &[(4, 2), (5, 2)]),
    (5, "2023-04-26 11:05:00", "delivered", 67.80, &[(3, 1), (4, 1)]),
    (6, "2023-04-25 13:25:00", "processing", 183.60, &[(0, 1), (1, 1), (6, 1)]),
];

/// Inserts the demo users, products and orders when no user exists yet.
///
/// Returns whether anything was seeded.
pub async fn seed_demo_data(storage: &CoreLocalStorage) -> Result<bool> {
    if storage.count(UserTable::TABLE_NAME, &Filter::new()).await? > 0 {
        info!("Database already has users, skipping demo data");
        return Ok(false);
    }

    storage
        .insert(
            UserTable::TABLE_NAME,
            &json!({ "name": "Admin User", "email": "admin@example.com", "role": "admin" }),
        )
        .await?;

    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (name, email) in CUSTOMERS {
        let id = storage
            .insert(
                UserTable::TABLE_NAME,
                &json!({ "name": name, "email": email, "role": "customer" }),
            )
            .await?;
        customer_ids.push(id);
    }

    let mut products = Vec::with_capacity(PRODUCTS.len());
    for (name, description, price, stock, category) in PRODUCTS {
        let id = storage
            .insert(
                ProductTable::TABLE_NAME,
                &json!({
                    "name": name,
                    "description": description,
                    "price": price,
                    "stock": stock,
                    "category": category,
                    "image": "https://via.placeholder.com/100",
                }),
            )
            .await?;
        products.push((id, *price));
    }

    for (customer, date, status, total, items) in ORDERS {
        let order_id = storage
            .insert(
                OrderTable::TABLE_NAME,
                &json!({
                    "customer_id": customer_ids[*customer],
                    "status": status,
                    "total": total,
                    "date": date,
                    "updated_at": date,
                }),
            )
            .await?;

        for (product, quantity) in *items {
            let (product_id, price) = products[*product];
            storage
                .insert(
                    OrderItemTable::TABLE_NAME,
                    &json!({
                        "order_id": order_id,
                        "product_id": product_id,
                        "quantity": quantity,
                        "price": price,
                    }),
                )
                .await?;
        }
    }

    info!(
        users = CUSTOMERS.len() + 1,
        products = PRODUCTS.len(),
        orders = ORDERS.len(),
        "Seeded demo data"
    );
    Ok(true)
}
