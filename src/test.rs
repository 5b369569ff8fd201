use crate::db::{self, seed};
use crate::error::StorageError;
use crate::local_storage::order::OrderLocalStorage;
use crate::local_storage::product::ProductLocalStorage;
use crate::local_storage::user::UserLocalStorage;
use crate::local_storage::{CoreLocalStorage, Filter};
use crate::models::{NewOrder, NewProduct, NewUser, OrderStatus, Role, User};
use crate::preferences::{JsonFilePreferenceStore, PreferenceStore, THEME_PREFERENCE_KEY};

use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

fn test_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("storefront_test_{}.db", Uuid::new_v4()))
}

// Helper function to setup a test database
async fn setup_test_db() -> (PathBuf, Arc<CoreLocalStorage>) {
    setup_test_db_with(true).await
}

async fn setup_test_db_with(foreign_keys: bool) -> (PathBuf, Arc<CoreLocalStorage>) {
    let db_path = test_db_path();
    let pool = db::init_db_pool(db_path.to_str().unwrap(), foreign_keys)
        .await
        .expect("Failed to initialize database");

    (db_path, Arc::new(CoreLocalStorage::new(pool)))
}

// Helper function to clean up test database
async fn teardown_test_db(db_path: &Path, storage: Arc<CoreLocalStorage>) {
    storage.pool().close().await;
    for suffix in ["", "-wal", "-shm"] {
        let mut path = db_path.as_os_str().to_owned();
        path.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(path));
    }
}

async fn insert_customer(storage: &CoreLocalStorage, name: &str, email: &str) -> i64 {
    storage
        .insert("users", &json!({ "name": name, "email": email, "role": "customer" }))
        .await
        .expect("Failed to insert user")
}

async fn insert_product(storage: &CoreLocalStorage, name: &str, category: &str, stock: i64) -> i64 {
    storage
        .insert(
            "products",
            &json!({ "name": name, "price": 9.99, "stock": stock, "category": category }),
        )
        .await
        .expect("Failed to insert product")
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[cfg(test)]
mod core_storage_tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_setup_is_idempotent() {
        let db_path = test_db_path();
        let path = db_path.to_str().unwrap();

        let pool = db::init_db_pool(path, true).await.unwrap();
        let storage = CoreLocalStorage::new(pool);
        insert_customer(&storage, "John Doe", "john@example.com").await;
        db::setup_database(storage.pool()).await.unwrap();
        storage.pool().close().await;

        let storage = Arc::new(CoreLocalStorage::new(db::init_db_pool(path, true).await.unwrap()));
        let tables: Vec<Value> = storage
            .query(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
                &[],
            )
            .await
            .unwrap();
        let names: Vec<&str> = tables.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["order_items", "orders", "products", "users"]);

        let users: Vec<User> = storage.query("SELECT * FROM users", &[]).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "john@example.com");

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_order_with_two_items_scenario() {
        let (db_path, storage) = setup_test_db().await;

        let user_id = storage
            .insert(
                "users",
                &json!({ "name": "John Doe", "email": "john@example.com", "role": "customer" }),
            )
            .await
            .unwrap();
        assert_eq!(user_id, 1);

        let product_id = insert_product(&storage, "Wireless Earbuds", "electronics", 45).await;

        let order_id = storage
            .insert(
                "orders",
                &json!({ "customer_id": 1, "status": "pending", "total": 128.50 }),
            )
            .await
            .unwrap();
        assert_eq!(order_id, 1);

        for quantity in [1, 2] {
            storage
                .insert(
                    "order_items",
                    &json!({ "order_id": 1, "product_id": product_id, "quantity": quantity, "price": 42.5 }),
                )
                .await
                .unwrap();
        }

        let items: Vec<Value> = storage
            .query("SELECT * FROM order_items WHERE order_id = ?", &[json!(1)])
            .await
            .unwrap();
        assert_eq!(items.len(), 2);

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_insert_and_get_by_id() {
        let (db_path, storage) = setup_test_db().await;

        let data = json!({
            "name": "Desk Lamp",
            "description": "Adjustable LED desk lamp",
            "price": 24.99,
            "stock": 15,
            "category": "home",
            "image": "https://via.placeholder.com/100",
        });
        let id = storage.insert("products", &data).await.unwrap();

        let row: Value = storage.get_by_id("products", id).await.unwrap().unwrap();
        for (column, value) in data.as_object().unwrap() {
            assert_eq!(&row[column], value, "column {}", column);
        }
        assert_eq!(row["id"], json!(id));
        assert!(row["created_at"].is_string());
        assert!(row["updated_at"].is_string());

        assert!(storage.get_by_id::<Value>("products", id + 1).await.unwrap().is_none());

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_insert_binds_values_to_their_columns_in_any_key_order() {
        let (db_path, storage) = setup_test_db().await;

        let first = storage
            .insert(
                "users",
                &json!({ "email": "a@example.com", "role": "admin", "name": "Alice" }),
            )
            .await
            .unwrap();
        let second = storage
            .insert(
                "users",
                &json!({ "role": "customer", "name": "Bob", "email": "b@example.com", "avatar": "bob.png" }),
            )
            .await
            .unwrap();

        let alice: User = storage.get_by_id("users", first).await.unwrap().unwrap();
        assert_eq!(
            (alice.name.as_str(), alice.email.as_str(), alice.role.as_str()),
            ("Alice", "a@example.com", "admin")
        );
        assert_eq!(alice.avatar, None);
        assert!(alice.created_at.is_some());

        let bob: User = storage.get_by_id("users", second).await.unwrap().unwrap();
        assert_eq!(
            (bob.name.as_str(), bob.email.as_str(), bob.role.as_str()),
            ("Bob", "b@example.com", "customer")
        );
        assert_eq!(bob.avatar.as_deref(), Some("bob.png"));

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_update_affects_only_matched_rows() {
        let (db_path, storage) = setup_test_db().await;

        let speaker = insert_product(&storage, "Bluetooth Speaker", "electronics", 20).await;
        let charger = insert_product(&storage, "Wireless Charger", "electronics", 56).await;
        let lamp = insert_product(&storage, "Desk Lamp", "home", 15).await;

        let changed = storage
            .update("products", &json!({ "stock": 0 }), "category = ?", &[json!("electronics")])
            .await
            .unwrap();
        assert_eq!(changed, 2);

        for (id, stock) in [(speaker, 0), (charger, 0), (lamp, 15)] {
            let row: Value = storage.get_by_id("products", id).await.unwrap().unwrap();
            assert_eq!(row["stock"], json!(stock));
        }

        let none = storage
            .update("products", &json!({ "stock": 1 }), "category = ?", &[json!("garden")])
            .await
            .unwrap();
        assert_eq!(none, 0);

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_update_binds_set_values_before_where_args() {
        let (db_path, storage) = setup_test_db().await;
        let id = insert_product(&storage, "Phone Case", "accessories", 120).await;

        let changed = storage
            .update(
                "products",
                &json!({ "name": "Phone Case Pro", "stock": 99 }),
                "id = ? AND stock = ?",
                &[json!(id), json!(120)],
            )
            .await
            .unwrap();
        assert_eq!(changed, 1);

        let row: Value = storage.get_by_id("products", id).await.unwrap().unwrap();
        assert_eq!(row["name"], json!("Phone Case Pro"));
        assert_eq!(row["stock"], json!(99));

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_delete_returns_zero_on_no_match() {
        let (db_path, storage) = setup_test_db().await;
        let id = insert_product(&storage, "Laptop Bag", "accessories", 28).await;

        let deleted = storage.delete("products", "id = ?", &[json!(id + 100)]).await.unwrap();
        assert_eq!(deleted, 0);

        let deleted = storage.delete("products", "id = ?", &[json!(id)]).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(storage.get_by_id::<Value>("products", id).await.unwrap().is_none());

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let (db_path, storage) = setup_test_db().await;

        let result = storage
            .insert(
                "order_items",
                &json!({ "order_id": 99, "product_id": 99, "quantity": 1, "price": 1.5 }),
            )
            .await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        let result = storage
            .insert("orders", &json!({ "customer_id": 42, "status": "pending", "total": 1.5 }))
            .await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_foreign_keys_can_be_disabled() {
        let (db_path, storage) = setup_test_db_with(false).await;

        let id = storage
            .insert(
                "order_items",
                &json!({ "order_id": 99, "product_id": 99, "quantity": 1, "price": 1.5 }),
            )
            .await
            .unwrap();
        assert_eq!(id, 1);

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_unique_email_violation() {
        let (db_path, storage) = setup_test_db().await;
        insert_customer(&storage, "John Doe", "john@example.com").await;

        let result = storage
            .insert(
                "users",
                &json!({ "name": "Johnny", "email": "john@example.com", "role": "customer" }),
            )
            .await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        let missing_required = storage.insert("users", &json!({ "name": "No Email" })).await;
        assert!(matches!(missing_required, Err(StorageError::Database(_))));

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_execution() {
        let (db_path, storage) = setup_test_db().await;

        assert!(matches!(
            storage.insert("users", &json!({})).await,
            Err(StorageError::EmptyData { operation: "insert", .. })
        ));
        assert!(matches!(
            storage.insert("users", &json!(["not", "an", "object"])).await,
            Err(StorageError::InvalidData(_))
        ));
        assert!(matches!(
            storage.insert("customers", &json!({ "name": "x" })).await,
            Err(StorageError::UnknownTable(_))
        ));
        assert!(matches!(
            storage
                .insert("users", &json!({ "name": "x", "email) VALUES ('a'); --": "y" }))
                .await,
            Err(StorageError::UnknownColumn { .. })
        ));
        assert!(matches!(
            storage.update("users", &json!({}), "id = ?", &[json!(1)]).await,
            Err(StorageError::EmptyData { operation: "update", .. })
        ));
        assert!(matches!(
            storage.update("users", &json!({ "name": "x" }), "  ", &[]).await,
            Err(StorageError::MissingWhereClause { .. })
        ));
        assert!(matches!(
            storage.delete("users", "", &[]).await,
            Err(StorageError::MissingWhereClause { .. })
        ));
        assert!(matches!(
            storage.delete_where("users", &Filter::new()).await,
            Err(StorageError::MissingWhereClause { .. })
        ));

        assert_eq!(storage.count("users", &Filter::new()).await.unwrap(), 0);

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_malformed_query_fails() {
        let (db_path, storage) = setup_test_db().await;

        let result = storage.query::<Value>("SELEC * FROM users", &[]).await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        let result = storage.query::<Value>("SELECT * FROM missing_table", &[]).await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        let result = storage.query::<Value>("SELECT nope FROM users", &[]).await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_query_decodes_sqlite_types() {
        let (db_path, storage) = setup_test_db().await;

        let rows = storage
            .query_rows(
                "SELECT 7 AS int_value, 2.5 AS real_value, 'text' AS text_value, NULL AS null_value, X'0102' AS blob_value",
                &[],
            )
            .await
            .unwrap();

        assert_eq!(
            rows,
            vec![json!({
                "int_value": 7,
                "real_value": 2.5,
                "text_value": "text",
                "null_value": null,
                "blob_value": "AQI=",
            })]
        );

        let bound = storage
            .query_rows(
                "SELECT ? AS flag, ? AS empty_value, ? AS list",
                &[json!(true), Value::Null, json!([1, 2])],
            )
            .await
            .unwrap();
        assert_eq!(bound[0], json!({ "flag": 1, "empty_value": null, "list": "[1,2]" }));

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_filter_update_delete_and_count() {
        let (db_path, storage) = setup_test_db().await;
        insert_product(&storage, "Smart Watch", "electronics", 32).await;
        let case = insert_product(&storage, "Phone Case", "accessories", 120).await;
        storage
            .insert("products", &json!({ "name": "Mystery Box", "price": 5.5, "stock": 3 }))
            .await
            .unwrap();

        let electronics = Filter::new().eq("category", "electronics");
        assert_eq!(storage.count("products", &electronics).await.unwrap(), 1);
        assert_eq!(storage.count("products", &Filter::new().is_null("category")).await.unwrap(), 1);
        assert_eq!(storage.count("products", &Filter::new()).await.unwrap(), 3);

        let changed = storage
            .update_where("products", &json!({ "stock": 10 }), &Filter::by_id(case))
            .await
            .unwrap();
        assert_eq!(changed, 1);

        assert!(matches!(
            storage
                .update_where("products", &json!({ "stock": 10 }), &Filter::new().eq("colour", "red"))
                .await,
            Err(StorageError::UnknownColumn { .. })
        ));

        assert_eq!(storage.delete_where("products", &electronics).await.unwrap(), 1);
        assert_eq!(storage.count("products", &Filter::new()).await.unwrap(), 2);

        teardown_test_db(&db_path, storage).await;
    }
    #[tokio::test]
    async fn test_integral_numbers_in_real_columns_read_back_as_floats() {
        let (db_path, storage) = setup_test_db().await;
        let customer = insert_customer(&storage, "John Doe", "john.doe@example.com").await;

        let id = storage
            .insert("orders", &json!({ "customer_id": customer, "status": "pending", "total": 100 }))
            .await
            .unwrap();
        let row: Value = storage.get_by_id("orders", id).await.unwrap().unwrap();
        assert_eq!(row["total"], json!(100.0));
        assert_eq!(row["customer_id"], json!(customer));

        storage
            .update("orders", &json!({ "total": 250 }), "id = ?", &[json!(id)])
            .await
            .unwrap();
        let row: Value = storage.get_by_id("orders", id).await.unwrap().unwrap();
        assert_eq!(row["total"], json!(250.0));

        assert_eq!(
            storage
                .count("orders", &Filter::new().eq("total", 250))
                .await
                .unwrap(),
            1
        );

        teardown_test_db(&db_path, storage).await;
    }
}

#[cfg(test)]
mod entity_storage_tests {
    use super::*;

    #[tokio::test]
    async fn test_user_storage() {
        let (db_path, storage) = setup_test_db().await;
        let users = UserLocalStorage::new(storage.clone());

        let admin = users
            .save_user(&NewUser::new("Admin User", "admin@example.com", Role::Admin))
            .await
            .unwrap();
        let jane = users
            .save_user(&NewUser::customer("Jane Smith", "jane.smith@example.com"))
            .await
            .unwrap();
        users
            .save_user(&NewUser::customer("Emily Johnson", "emily.j@example.com"))
            .await
            .unwrap();

        let found = users.get_user_by_email("jane.smith@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, jane);
        assert!(users.get_user_by_email("nobody@example.com").await.unwrap().is_none());

        let customers: Vec<String> = users
            .list_customers()
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.name)
            .collect();
        assert_eq!(customers, vec!["Emily Johnson", "Jane Smith"]);
        assert_eq!(users.list_users().await.unwrap().len(), 3);

        assert_eq!(
            users.update_user(jane, &json!({ "avatar": "jane.png" })).await.unwrap(),
            1
        );
        let updated = users.get_user_by_id(jane).await.unwrap().unwrap();
        assert_eq!(updated.avatar.as_deref(), Some("jane.png"));
        assert!(updated.updated_at.is_some());

        assert_eq!(users.delete_user(admin).await.unwrap(), 1);
        assert!(users.get_user_by_id(admin).await.unwrap().is_none());

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_product_storage() {
        let (db_path, storage) = setup_test_db().await;
        let products = ProductLocalStorage::new(storage.clone());

        let earbuds = products
            .save_product(
                &NewProduct::new("Wireless Earbuds", 59.99, 45)
                    .with_description("High quality wireless earbuds with noise cancellation")
                    .with_category("electronics"),
            )
            .await
            .unwrap();
        products
            .save_product(&NewProduct::new("Desk Lamp", 24.99, 15).with_category("home"))
            .await
            .unwrap();
        products
            .save_product(&NewProduct::new("Gift Card", 25.0, 1000))
            .await
            .unwrap();

        let found = products.search_products("NOISE").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, earbuds);
        assert_eq!(products.search_products("lamp").await.unwrap().len(), 1);

        assert_eq!(products.categories().await.unwrap(), vec!["electronics", "home"]);
        assert_eq!(products.list_products(Some("home")).await.unwrap().len(), 1);
        assert_eq!(products.list_products(None).await.unwrap().len(), 3);

        assert_eq!(products.adjust_stock(earbuds, -40).await.unwrap(), 1);
        let low: Vec<String> = products
            .low_stock(20)
            .await
            .unwrap()
            .into_iter()
            .map(|product| product.name)
            .collect();
        assert_eq!(low, vec!["Wireless Earbuds", "Desk Lamp"]);

        assert_eq!(products.adjust_stock(earbuds + 100, 1).await.unwrap(), 0);

        products
            .update_product(earbuds, &json!({ "price": 49.99 }))
            .await
            .unwrap();
        let product = products.get_product(earbuds).await.unwrap().unwrap();
        assert_eq!(product.stock, 5);
        assert!(approx_eq(product.price, 49.99));

        assert_eq!(products.delete_product(earbuds).await.unwrap(), 1);
        assert!(products.get_product(earbuds).await.unwrap().is_none());

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_order_storage() {
        let (db_path, storage) = setup_test_db().await;
        let orders = OrderLocalStorage::new(storage.clone());

        let john = insert_customer(&storage, "John Doe", "john.doe@example.com").await;
        let jane = insert_customer(&storage, "Jane Smith", "jane.smith@example.com").await;
        let speaker = insert_product(&storage, "Bluetooth Speaker", "electronics", 20).await;
        let lamp = insert_product(&storage, "Desk Lamp", "home", 15).await;

        let first = orders
            .create_order(
                &NewOrder::new(john, OrderStatus::Pending)
                    .item(speaker, 2, 45.5)
                    .item(lamp, 1, 24.99),
            )
            .await
            .unwrap();
        let second = orders
            .create_order(&NewOrder::new(jane, OrderStatus::Shipped).item(lamp, 3, 24.99))
            .await
            .unwrap();

        let with_items = orders.get_order_with_items(first).await.unwrap().unwrap();
        assert_eq!(with_items.items.len(), 2);
        assert!(approx_eq(with_items.order.total, 115.99));
        assert_eq!(with_items.order.status(), Some(OrderStatus::Pending));
        let line_sum: f64 = with_items.items.iter().map(|item| item.line_total()).sum();
        assert!(approx_eq(line_sum, with_items.order.total));

        let shipped = orders.list_orders(Some(OrderStatus::Shipped)).await.unwrap();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].customer_name, "Jane Smith");
        assert_eq!(shipped[0].item_count, 1);
        assert_eq!(orders.list_orders(None).await.unwrap().len(), 2);

        let by_name = orders.search_orders("john").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, first);

        assert_eq!(orders.update_status(first, OrderStatus::Canceled).await.unwrap(), 1);
        assert_eq!(orders.update_status(999, OrderStatus::Delivered).await.unwrap(), 0);

        let summary = orders.dashboard_summary().await.unwrap();
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_customers, 2);
        assert!(approx_eq(summary.total_revenue, 74.97));
        assert!(approx_eq(summary.average_order_value, 74.97));

        let top = orders.top_products(5).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].product_id, lamp);
        assert_eq!(top[0].sold, 3);

        assert_eq!(orders.delete_order(second).await.unwrap(), 1);
        assert!(orders.get_order(second).await.unwrap().is_none());
        assert!(orders.items_for_order(second).await.unwrap().is_empty());

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_create_order_for_missing_customer_fails() {
        let (db_path, storage) = setup_test_db().await;
        let orders = OrderLocalStorage::new(storage.clone());

        let result = orders.create_order(&NewOrder::new(7, OrderStatus::Pending)).await;
        assert!(matches!(result, Err(StorageError::Database(_))));

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_dashboard_summary_on_empty_database() {
        let (db_path, storage) = setup_test_db().await;
        let orders = OrderLocalStorage::new(storage.clone());

        let summary = orders.dashboard_summary().await.unwrap();
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_customers, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_order_value, 0.0);

        teardown_test_db(&db_path, storage).await;
    }
    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let (db_path, storage) = setup_test_db().await;
        let products = ProductLocalStorage::new(storage.clone());
        let orders = OrderLocalStorage::new(storage.clone());

        products
            .save_product(&NewProduct::new("Phone Case", 19.99, 120))
            .await
            .unwrap();
        let mug = products
            .save_product(&NewProduct::new("50% Off Mug", 8.0, 30))
            .await
            .unwrap();

        let found = products.search_products("%").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, mug);
        assert!(products.search_products("_").await.unwrap().is_empty());
        assert!(products.search_products("\\").await.unwrap().is_empty());
        assert_eq!(products.search_products("").await.unwrap().len(), 2);

        let customer = insert_customer(&storage, "John Doe", "john.doe@example.com").await;
        orders
            .create_order(&NewOrder::new(customer, OrderStatus::Pending))
            .await
            .unwrap();
        assert!(orders.search_orders("_").await.unwrap().is_empty());
        assert!(orders.search_orders("%").await.unwrap().is_empty());
        assert_eq!(orders.search_orders("doe").await.unwrap().len(), 1);

        teardown_test_db(&db_path, storage).await;
    }

    #[tokio::test]
    async fn test_empty_change_set_is_rejected() {
        let (db_path, storage) = setup_test_db().await;
        let users = UserLocalStorage::new(storage.clone());
        let products = ProductLocalStorage::new(storage.clone());

        let jane = users
            .save_user(&NewUser::customer("Jane Smith", "jane.smith@example.com"))
            .await
            .unwrap();
        let lamp = products
            .save_product(&NewProduct::new("Desk Lamp", 24.99, 15))
            .await
            .unwrap();
        let before: Value = storage.get_by_id("users", jane).await.unwrap().unwrap();

        assert!(matches!(
            users.update_user(jane, &json!({})).await,
            Err(StorageError::EmptyData { operation: "update", .. })
        ));
        assert!(matches!(
            products.update_product(lamp, &json!({})).await,
            Err(StorageError::EmptyData { operation: "update", .. })
        ));

        let after: Value = storage.get_by_id("users", jane).await.unwrap().unwrap();
        assert_eq!(before, after);

        teardown_test_db(&db_path, storage).await;
    }
}

#[cfg(test)]
mod seed_tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_demo_data_once() {
        let (db_path, storage) = setup_test_db().await;

        assert!(seed::seed_demo_data(&storage).await.unwrap());
        assert!(!seed::seed_demo_data(&storage).await.unwrap());

        assert_eq!(storage.count("users", &Filter::new()).await.unwrap(), 8);
        assert_eq!(storage.count("products", &Filter::new()).await.unwrap(), 7);
        assert_eq!(storage.count("orders", &Filter::new()).await.unwrap(), 7);

        let orders = OrderLocalStorage::new(storage.clone());
        let summary = orders.dashboard_summary().await.unwrap();
        assert_eq!(summary.total_customers, 7);
        assert!(approx_eq(summary.total_revenue, 766.15));
        assert!(approx_eq(summary.average_order_value, 766.15 / 6.0));

        let recent = orders.recent_orders(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].customer_name, "John Doe");
        assert_eq!(recent[0].item_count, 3);

        teardown_test_db(&db_path, storage).await;
    }
}

#[cfg(test)]
mod preference_file_tests {
    use super::*;

    #[tokio::test]
    async fn test_json_file_store_persists_between_instances() {
        let path = std::env::temp_dir().join(format!("storefront_prefs_{}.json", Uuid::new_v4()));

        let store = JsonFilePreferenceStore::new(&path);
        assert_eq!(store.get(THEME_PREFERENCE_KEY).await.unwrap(), None);
        store.set(THEME_PREFERENCE_KEY, "dark").await.unwrap();
        store.set("user-language", "zh").await.unwrap();

        let reopened = JsonFilePreferenceStore::new(&path);
        assert_eq!(
            reopened.get(THEME_PREFERENCE_KEY).await.unwrap().as_deref(),
            Some("dark")
        );
        reopened.remove("user-language").await.unwrap();

        let contents: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(contents, json!({ "theme-preference": "dark" }));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_json_file_store_rejects_corrupt_file() {
        let path = std::env::temp_dir().join(format!("storefront_prefs_{}.json", Uuid::new_v4()));
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert!(store.get(THEME_PREFERENCE_KEY).await.is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_json_file_store_keeps_cache_when_save_fails() {
        let dir = std::env::temp_dir().join(format!("storefront_missing_{}", Uuid::new_v4()));
        let store = JsonFilePreferenceStore::new(dir.join("preferences.json"));

        assert!(store.set(THEME_PREFERENCE_KEY, "dark").await.is_err());
        assert_eq!(store.get(THEME_PREFERENCE_KEY).await.unwrap(), None);

        std::fs::create_dir(&dir).unwrap();
        store.set(THEME_PREFERENCE_KEY, "dark").await.unwrap();
        std::fs::remove_file(store.path()).unwrap();
        std::fs::remove_dir(&dir).unwrap();

        assert!(store.remove(THEME_PREFERENCE_KEY).await.is_err());
        assert_eq!(
            store.get(THEME_PREFERENCE_KEY).await.unwrap().as_deref(),
            Some("dark")
        );
    }
}
