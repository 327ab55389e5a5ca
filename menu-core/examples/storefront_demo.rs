//! Walk through a storefront session against the in-memory table store.
//!
//! ```text
//! STORAGE_DIR=/tmp/qr-menu cargo run -p menu-core --example storefront_demo
//! ```

use menu_client::{MemoryTableClient, RemoteStore, Row, Table};
use menu_core::catalog::{BusinessRepository, MenuEditor};
use menu_core::logger::init_logger_with_file;
use menu_core::{
    FavoritesStore, FeedbackService, FileStorage, LocalStorage, MenuConfig, StyleSheet,
    ThemeStore, ToastSeverity,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use shared::models::{CategoryCreate, FeedbackCreate, FeedbackRatings, ProductCreate, ThemeSettings};
use std::sync::Arc;

fn row(value: Value) -> anyhow::Result<Row> {
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected object, got {other}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MenuConfig::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let storage: Arc<dyn LocalStorage> = Arc::new(FileStorage::open(config.storage_dir.clone())?);
    let client = MemoryTableClient::new();
    client.seed(
        Table::Businesses,
        [row(json!({"id": "b1", "slug": "lezzet-duragi", "name": "Lezzet Durağı"}))?],
    );
    let store: Arc<dyn RemoteStore> = Arc::new(client.clone());

    // Theme
    let sheet = Arc::new(StyleSheet::new());
    let theme = ThemeStore::load(storage.clone(), sheet.clone()).with_toast_ttl(config.toast_ttl());
    theme.apply_preset("Lacivert");
    theme.update_theme(&ThemeSettings::new().with("cardGap", 20));
    theme.show_toast("Tema kaydedildi", ToastSeverity::Success);
    println!("{}", sheet.to_css());

    // Menu
    let business = BusinessRepository::new(store.clone())
        .require_active("lezzet-duragi")
        .await?;
    println!("QR code URL: {}", business.menu_url(&config.public_base_url));

    let mut editor = MenuEditor::open(store.clone(), business.clone())
        .await?
        .with_activation_distance(config.drag_activation_distance);
    let soups = editor
        .create_category(&CategoryCreate {
            name: "Çorbalar".into(),
            image: None,
        })
        .await?;
    for (name, price) in [("Mercimek", 80), ("Ezogelin", 85), ("Yayla", 90)] {
        editor
            .create_product(
                &soups.id,
                &ProductCreate {
                    name: name.into(),
                    description: None,
                    price: Decimal::from(price),
                    image: None,
                    tag_ids: vec![],
                    is_featured: false,
                },
            )
            .await?;
    }

    let ids: Vec<String> = editor.products(&soups.id).iter().map(|p| p.id.clone()).collect();
    if let [first, _, last] = ids.as_slice()
        && let Some(handle) = editor.reorder_products(&soups.id, last, first)
    {
        let report = handle.await?;
        println!("Sort order persisted: {} updated, {} failed", report.updated, report.failed.len());
    }
    for product in editor.products(&soups.id) {
        println!("  {} {} TL", product.name, product.price);
    }

    // Favorites and feedback
    let favorites = FavoritesStore::new(storage.clone(), &business.slug);
    if let Some(product) = editor.products(&soups.id).first() {
        favorites.toggle(product)?;
    }
    println!("Favorites: {}", favorites.list().len());

    let feedback = FeedbackService::new(store);
    let entry = feedback
        .submit(
            &business.id,
            &FeedbackCreate {
                author_name: "Ayşe".into(),
                phone: None,
                ratings: FeedbackRatings::new(4, 0, 5),
                comment: "Çorbalar harika".into(),
            },
        )
        .await?;
    println!(
        "Feedback overall rating: {} (unread: {})",
        entry.overall_rating(),
        feedback.unread_count(&business.id).await?
    );

    Ok(())
}
