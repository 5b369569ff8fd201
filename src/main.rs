use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_storage::config::Config;
use storefront_storage::db::{self, seed};
use storefront_storage::local_storage::CoreLocalStorage;
use storefront_storage::local_storage::order::OrderLocalStorage;
use storefront_storage::local_storage::product::ProductLocalStorage;
use storefront_storage::localization::Translator;
use storefront_storage::preferences::{JsonFilePreferenceStore, PreferenceStore, ThemeSettings};

const LOW_STOCK_THRESHOLD: i64 = 20;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let pool = db::init_db_pool(&config.database_path, config.foreign_keys)
        .await
        .context("Failed to initialize database")?;
    let core_storage = Arc::new(CoreLocalStorage::new(pool));

    if config.seed_demo_data {
        seed::seed_demo_data(&core_storage)
            .await
            .context("Failed to seed demo data")?;
    }

    let preferences: Arc<dyn PreferenceStore> =
        Arc::new(JsonFilePreferenceStore::new(&config.preferences_path));
    let theme = ThemeSettings::new(preferences.clone(), config.system_color_scheme)
        .theme()
        .await;
    let translator = Translator::load(preferences.as_ref())
        .await
        .context("Failed to load translations")?;
    info!(
        theme = %theme.theme_type,
        dark = theme.is_dark,
        language = translator.language().code(),
        "Preferences loaded"
    );

    let orders = OrderLocalStorage::new(core_storage.clone());
    let products = ProductLocalStorage::new(core_storage.clone());

    let summary = orders.dashboard_summary().await?;
    info!(
        "{}: {:.2} | {}: {} | {}: {} | {}: {:.2}",
        translator.t("dashboard.totalRevenue"),
        summary.total_revenue,
        translator.t("dashboard.totalOrders"),
        summary.total_orders,
        translator.t("dashboard.totalCustomers"),
        summary.total_customers,
        translator.t("dashboard.averageOrderValue"),
        summary.average_order_value,
    );

    for order in orders.recent_orders(5).await? {
        let status = order
            .status
            .parse::<storefront_storage::models::OrderStatus>()
            .map(|status| translator.t(&status.label_key()))
            .unwrap_or_else(|_| order.status.clone());
        info!(
            "{} #{} {} {:.2} ({})",
            translator.t("dashboard.recentOrders"),
            order.id,
            order.customer_name,
            order.total,
            status
        );
    }

    for product in orders.top_products(3).await? {
        info!(
            "{}: {} ({} sold)",
            translator.t("dashboard.topProducts"),
            product.name,
            product.sold
        );
    }

    for product in products.low_stock(LOW_STOCK_THRESHOLD).await? {
        let count = product.stock.to_string();
        info!(
            "{}",
            translator.t_with(
                "notifications.lowStockMessage",
                &[("product", &product.name), ("count", &count)]
            )
        );
    }

    Ok(())
}
