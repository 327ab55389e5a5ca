//! Admin menu editor
//!
//! Keeps optimistic local mirrors of one business's menu: the category list,
//! one product list per category and the slider. Local state changes first;
//! remote writes follow. Reorders are dispatched on a background task of the
//! runtime that opened the editor and never awaited by the gesture that
//! caused them, so the sync reorder methods work from any thread.
//!
//! Reorder, create and delete only ever touch the scope they were given:
//! products of another category keep their stored positions.

use menu_client::{RemoteStore, Table};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Business, Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate,
    SliderItem,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::repository::{BusinessRepository, CategoryRepository, ProductRepository};
use crate::ordering::{
    DEFAULT_ACTIVATION_DISTANCE, DragEvent, OrderedCollection, PersistReport, move_item,
    spawn_persist,
};

/// Handle to a dispatched reorder write-back
pub type PersistHandle = JoinHandle<PersistReport>;

pub struct MenuEditor {
    store: Arc<dyn RemoteStore>,
    businesses: BusinessRepository,
    categories: CategoryRepository,
    products: ProductRepository,
    business: Business,
    category_list: OrderedCollection<Category>,
    product_lists: HashMap<String, OrderedCollection<Product>>,
    slider: OrderedCollection<SliderItem>,
    activation_distance: f64,
    runtime: Handle,
}

impl MenuEditor {
    /// Load the full menu of a business into local mirrors
    pub async fn open(store: Arc<dyn RemoteStore>, business: Business) -> AppResult<Self> {
        let runtime = Handle::try_current().map_err(|e| AppError::internal(e.to_string()))?;
        let mut editor = Self {
            businesses: BusinessRepository::new(store.clone()),
            categories: CategoryRepository::new(store.clone()),
            products: ProductRepository::new(store.clone()),
            store,
            slider: OrderedCollection::new(business.slider_items.clone()),
            business,
            category_list: OrderedCollection::new(Vec::new()),
            product_lists: HashMap::new(),
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
            runtime,
        };
        editor.refresh().await?;
        Ok(editor)
    }

    /// Drag activation distance for every list this editor owns
    pub fn with_activation_distance(mut self, distance: f64) -> Self {
        self.activation_distance = distance;
        self.category_list = self.category_list.with_activation_distance(distance);
        self.slider = self.slider.with_activation_distance(distance);
        for list in self.product_lists.values_mut() {
            *list = list.clone().with_activation_distance(distance);
        }
        self
    }

    /// Reload categories and products from the remote store
    pub async fn refresh(&mut self) -> AppResult<()> {
        let categories = self.categories.find_by_business(&self.business.id).await?;
        let products = self.products.find_by_business(&self.business.id).await?;

        let mut grouped: HashMap<String, Vec<Product>> = categories
            .iter()
            .map(|c| (c.id.clone(), Vec::new()))
            .collect();
        for product in products {
            grouped
                .entry(product.category_id.clone())
                .or_default()
                .push(product);
        }

        self.category_list = self.new_list(categories);
        self.product_lists = grouped
            .into_iter()
            .map(|(category_id, items)| (category_id, self.new_list(items)))
            .collect();

        tracing::debug!(
            business_id = %self.business.id,
            categories = self.category_list.len(),
            "Menu loaded"
        );
        Ok(())
    }

    fn new_list<T: crate::ordering::OrderedEntity>(&self, items: Vec<T>) -> OrderedCollection<T> {
        OrderedCollection::new(items).with_activation_distance(self.activation_distance)
    }

    pub fn business(&self) -> &Business {
        &self.business
    }

    pub fn categories(&self) -> &[Category] {
        self.category_list.items()
    }

    /// Products of one category in display order; empty for unknown ids
    pub fn products(&self, category_id: &str) -> &[Product] {
        self.product_lists
            .get(category_id)
            .map(OrderedCollection::items)
            .unwrap_or(&[])
    }

    pub fn slider_items(&self) -> &[SliderItem] {
        self.slider.items()
    }

    fn product_list_mut(&mut self, category_id: &str) -> AppResult<&mut OrderedCollection<Product>> {
        self.product_lists.get_mut(category_id).ok_or_else(|| {
            AppError::new(ErrorCode::CategoryNotFound).with_detail("id", category_id)
        })
    }

    fn persist(&self, table: Table, ids: Vec<String>) -> PersistHandle {
        spawn_persist(&self.runtime, self.store.clone(), table, ids)
    }

    fn category_of(&self, product_id: &str) -> Option<String> {
        self.product_lists
            .iter()
            .find(|(_, list)| list.get(product_id).is_some())
            .map(|(category_id, _)| category_id.clone())
    }

    // ==================== Categories ====================

    /// Insert at the end of the list: position = current count
    pub async fn create_category(&mut self, data: &CategoryCreate) -> AppResult<Category> {
        let sort_order = position(self.category_list.len());
        let category = self
            .categories
            .create(&self.business.id, data, sort_order)
            .await?;
        tracing::info!(id = %category.id, sort_order, "Category created");

        self.category_list.push(category.clone());
        let list = self.new_list(Vec::new());
        self.product_lists.insert(category.id.clone(), list);
        Ok(category)
    }

    pub async fn update_category(&mut self, id: &str, data: &CategoryUpdate) -> AppResult<Category> {
        let category = self.categories.update(id, data).await?;
        self.category_list.replace(category.clone());
        Ok(category)
    }

    /// Remote delete, then local removal. Siblings are not renumbered.
    pub async fn delete_category(&mut self, id: &str) -> AppResult<()> {
        self.categories.delete(id).await?;
        self.category_list.remove(id);
        self.product_lists.remove(id);
        tracing::info!(id = %id, "Category deleted");
        Ok(())
    }

    /// Move a category onto another's slot and persist the category order
    pub fn reorder_categories(&mut self, active_id: &str, over_id: &str) -> Option<PersistHandle> {
        let ids = self.category_list.apply_move(active_id, over_id)?;
        Some(self.persist(Table::Categories, ids))
    }

    /// Drive the category list's drag gesture
    pub fn handle_category_event(&mut self, event: DragEvent) -> Option<PersistHandle> {
        let ids = self.category_list.handle(event)?;
        Some(self.persist(Table::Categories, ids))
    }

    // ==================== Products ====================

    pub async fn create_product(
        &mut self,
        category_id: &str,
        data: &ProductCreate,
    ) -> AppResult<Product> {
        let sort_order = position(self.product_list_mut(category_id)?.len());
        let product = self
            .products
            .create(&self.business.id, category_id, data, sort_order)
            .await?;
        tracing::info!(id = %product.id, category_id = %category_id, sort_order, "Product created");

        self.product_list_mut(category_id)?.push(product.clone());
        Ok(product)
    }

    /// Update a product; a category change moves it to the target mirror
    /// at its stored position.
    pub async fn update_product(&mut self, id: &str, data: &ProductUpdate) -> AppResult<Product> {
        if let Some(target) = data.category_id.as_deref()
            && !self.product_lists.contains_key(target)
        {
            return Err(AppError::new(ErrorCode::CategoryNotFound).with_detail("id", target));
        }
        let product = self.products.update(id, data).await?;
        let previous = self.category_of(id);

        if previous.as_deref() == Some(product.category_id.as_str()) {
            self.product_list_mut(&product.category_id)?
                .replace(product.clone());
            return Ok(product);
        }

        if let Some(old) = previous
            && let Some(list) = self.product_lists.get_mut(&old)
        {
            list.remove(id);
        }
        let target = self
            .product_lists
            .remove(&product.category_id)
            .map(OrderedCollection::into_items)
            .unwrap_or_default();
        let mut items = target;
        items.push(product.clone());
        let list = self.new_list(items);
        self.product_lists.insert(product.category_id.clone(), list);
        Ok(product)
    }

    pub async fn delete_product(&mut self, id: &str) -> AppResult<()> {
        self.products.delete(id).await?;
        if let Some(category_id) = self.category_of(id)
            && let Some(list) = self.product_lists.get_mut(&category_id)
        {
            list.remove(id);
        }
        tracing::info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Reorder inside one category; only that category's ids are written
    pub fn reorder_products(
        &mut self,
        category_id: &str,
        active_id: &str,
        over_id: &str,
    ) -> Option<PersistHandle> {
        let ids = self
            .product_lists
            .get_mut(category_id)?
            .apply_move(active_id, over_id)?;
        Some(self.persist(Table::Products, ids))
    }

    pub fn handle_product_event(
        &mut self,
        category_id: &str,
        event: DragEvent,
    ) -> Option<PersistHandle> {
        let ids = self.product_lists.get_mut(category_id)?.handle(event)?;
        Some(self.persist(Table::Products, ids))
    }

    // ==================== Slider ====================

    /// Move a slide and write the whole slider list back in one update.
    ///
    /// Returns `Ok(false)` when the move is a no-op.
    pub async fn move_slider_item(&mut self, active_id: &str, over_id: &str) -> AppResult<bool> {
        let (Some(from), Some(to)) = (self.slider.index_of(active_id), self.slider.index_of(over_id))
        else {
            return Ok(false);
        };
        if from == to {
            return Ok(false);
        }

        let mut items = self.slider.items().to_vec();
        move_item(&mut items, from, to);
        self.save_slider(items).await?;
        Ok(true)
    }

    /// Append a slide
    pub async fn add_slider_item(&mut self, item: SliderItem) -> AppResult<()> {
        let mut items = self.slider.items().to_vec();
        items.push(item);
        self.save_slider(items).await
    }

    pub async fn remove_slider_item(&mut self, id: &str) -> AppResult<bool> {
        let mut items = self.slider.items().to_vec();
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save_slider(items).await?;
        Ok(true)
    }

    async fn save_slider(&mut self, items: Vec<SliderItem>) -> AppResult<()> {
        self.slider = self.new_list(items);
        let business = self
            .businesses
            .update_slider_items(&self.business.id, self.slider.items())
            .await?;
        self.business = business;
        Ok(())
    }
}

fn position(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_client::{MemoryTableClient, Row};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn business() -> Business {
        serde_json::from_value(json!({
            "id": "b1",
            "slug": "lezzet",
            "name": "Lezzet",
            "slider_items": [
                {"id": "s1", "title": "Kahvaltı", "image": "s1.jpg"},
                {"id": "s2", "title": "Tatlı", "image": "s2.jpg"},
                {"id": "s3", "title": "İçecek", "image": "s3.jpg"}
            ]
        }))
        .unwrap()
    }

    fn seeded() -> MemoryTableClient {
        let client = MemoryTableClient::new();
        client.seed(
            Table::Businesses,
            [row(serde_json::to_value(business()).unwrap())],
        );
        client.seed(
            Table::Categories,
            [
                row(json!({"id": "c1", "business_id": "b1", "name": "Çorbalar", "sort_order": 0})),
                row(json!({"id": "c2", "business_id": "b1", "name": "Tatlılar", "sort_order": 1})),
            ],
        );
        client.seed(
            Table::Products,
            [
                row(json!({"id": "p1", "business_id": "b1", "category_id": "c1", "name": "Mercimek", "price": 80.0, "sort_order": 0})),
                row(json!({"id": "p2", "business_id": "b1", "category_id": "c1", "name": "Ezogelin", "price": 85.0, "sort_order": 1})),
                row(json!({"id": "p3", "business_id": "b1", "category_id": "c2", "name": "Baklava", "price": 150.0, "sort_order": 0})),
            ],
        );
        client
    }

    #[tokio::test]
    async fn test_open_groups_products_by_category() {
        let client = seeded();
        let editor = MenuEditor::open(Arc::new(client), business()).await.unwrap();
        assert_eq!(editor.categories().len(), 2);
        assert_eq!(editor.products("c1").len(), 2);
        assert_eq!(editor.products("c2")[0].id, "p3");
        assert!(editor.products("nope").is_empty());
    }

    #[tokio::test]
    async fn test_create_category_appends() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client.clone()), business())
            .await
            .unwrap();
        let created = editor
            .create_category(&CategoryCreate {
                name: "İçecekler".into(),
                image: None,
            })
            .await
            .unwrap();
        assert_eq!(created.sort_order, 2);
        assert_eq!(editor.categories().last().unwrap().id, created.id);
        assert!(editor.products(&created.id).is_empty());
        assert!(client.row(Table::Categories, &created.id).is_some());
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_payload() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client.clone()), business())
            .await
            .unwrap();
        let err = editor
            .create_product(
                "c1",
                &ProductCreate {
                    name: String::new(),
                    description: None,
                    price: Decimal::from(10),
                    image: None,
                    tag_ids: vec![],
                    is_featured: false,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(client.rows(Table::Products).len(), 3);
    }

    #[tokio::test]
    async fn test_create_product_in_unknown_category() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client), business()).await.unwrap();
        let err = editor
            .create_product(
                "missing",
                &ProductCreate {
                    name: "Ayran".into(),
                    description: None,
                    price: Decimal::from(20),
                    image: None,
                    tag_ids: vec![],
                    is_featured: false,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[tokio::test]
    async fn test_reorder_products_stays_in_scope() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client.clone()), business())
            .await
            .unwrap();

        let handle = editor.reorder_products("c1", "p2", "p1").unwrap();
        let ids: Vec<&str> = editor.products("c1").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);

        let report = handle.await.unwrap();
        assert_eq!(report.updated, 2);
        let touched: Vec<String> = client.update_log().into_iter().map(|c| c.id).collect();
        assert!(!touched.contains(&"p3".to_string()));
        assert_eq!(client.row(Table::Products, "p3").unwrap()["sort_order"], json!(0));
    }

    #[tokio::test]
    async fn test_delete_does_not_renumber() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client.clone()), business())
            .await
            .unwrap();
        editor.delete_product("p1").await.unwrap();
        assert_eq!(editor.products("c1").len(), 1);
        assert_eq!(editor.products("c1")[0].sort_order, 1);
        assert!(client.update_log().is_empty());
    }

    #[tokio::test]
    async fn test_move_slider_item_writes_one_update() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client.clone()), business())
            .await
            .unwrap();

        assert!(editor.move_slider_item("s1", "s3").await.unwrap());
        let ids: Vec<&str> = editor.slider_items().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["s2", "s3", "s1"]);

        let log = client.update_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].table, Table::Businesses);
        assert_eq!(editor.business().slider_items[2].id, "s1");

        assert!(!editor.move_slider_item("s1", "s1").await.unwrap());
    }

    #[tokio::test]
    async fn test_product_category_change_moves_mirror() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client), business()).await.unwrap();
        editor
            .update_product(
                "p2",
                &ProductUpdate {
                    category_id: Some("c2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(editor.products("c1").len(), 1);
        let ids: Vec<&str> = editor.products("c2").iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p3", "p2"]);
    }

    #[tokio::test]
    async fn test_update_product_into_unknown_category() {
        let client = seeded();
        let mut editor = MenuEditor::open(Arc::new(client.clone()), business())
            .await
            .unwrap();
        let err = editor
            .update_product(
                "p2",
                &ProductUpdate {
                    category_id: Some("c9".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CategoryNotFound);
        assert!(editor.products("c9").is_empty());
        assert_eq!(editor.products("c1").len(), 2);
        assert_eq!(client.row(Table::Products, "p2").unwrap()["category_id"], json!("c1"));
        assert!(client.update_log().is_empty());
    }

    #[test]
    fn test_reorder_from_thread_outside_runtime() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = seeded();
        let mut editor = runtime
            .block_on(MenuEditor::open(Arc::new(client.clone()), business()))
            .unwrap();

        let handle = std::thread::spawn(move || editor.reorder_categories("c2", "c1"))
            .join()
            .unwrap()
            .unwrap();

        let report = runtime.block_on(handle).unwrap();
        assert_eq!(report.updated, 2);
        assert_eq!(client.row(Table::Categories, "c2").unwrap()["sort_order"], json!(0));
        assert_eq!(client.row(Table::Categories, "c1").unwrap()["sort_order"], json!(1));
    }
}
