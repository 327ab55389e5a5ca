//! Typed repositories over the remote table store
//!
//! Thin wrappers: each one knows its table, its row type and the filters the
//! admin panel and storefront use. Errors come back as [`AppError`].

use menu_client::{Query, RemoteStore, Table, insert_as, select_as, update_as};
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Business, Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate,
    SliderItem, Tag, TagCreate,
};
use std::sync::Arc;
use validator::Validate;

/// Shared handle to the remote store
#[derive(Clone)]
pub struct BaseRepository {
    store: Arc<dyn RemoteStore>,
}

impl BaseRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    async fn delete(&self, table: Table, id: &str) -> AppResult<()> {
        self.store.delete(table, id).await?;
        Ok(())
    }
}

/// Missing rows come back as the table-specific code
fn not_found(err: AppError, code: ErrorCode, id: &str) -> AppError {
    if err.code == ErrorCode::NotFound {
        AppError::with_message(code, format!("{} not found", id)).with_detail("id", id)
    } else {
        err
    }
}

// ==================== Businesses ====================

#[derive(Clone)]
pub struct BusinessRepository {
    base: BaseRepository,
}

impl BusinessRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Business>> {
        let query = Query::new().order_by("name");
        Ok(select_as(self.base.store().as_ref(), Table::Businesses, &query).await?)
    }

    /// Storefront entry point: the slug comes from the QR code URL
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Business>> {
        let query = Query::new().eq("slug", slug).limit(1);
        let rows: Vec<Business> =
            select_as(self.base.store().as_ref(), Table::Businesses, &query).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Business>> {
        let query = Query::new().eq("id", id).limit(1);
        let rows: Vec<Business> =
            select_as(self.base.store().as_ref(), Table::Businesses, &query).await?;
        Ok(rows.into_iter().next())
    }

    /// Active business by slug, or a tenant error
    pub async fn require_active(&self, slug: &str) -> AppResult<Business> {
        match self.find_by_slug(slug).await? {
            Some(business) if business.is_active => Ok(business),
            Some(_) => Err(AppError::new(ErrorCode::BusinessInactive).with_detail("slug", slug)),
            None => Err(AppError::new(ErrorCode::BusinessNotFound).with_detail("slug", slug)),
        }
    }

    /// Rewrite the whole slider list in one update
    pub async fn update_slider_items(
        &self,
        business_id: &str,
        items: &[SliderItem],
    ) -> AppResult<Business> {
        #[derive(Serialize)]
        struct SliderPatch<'a> {
            slider_items: &'a [SliderItem],
        }

        tracing::debug!(id = %business_id, count = items.len(), "Updating slider items");
        update_as(
            self.base.store().as_ref(),
            Table::Businesses,
            business_id,
            &SliderPatch {
                slider_items: items,
            },
        )
        .await
        .map_err(|e| not_found(e.into(), ErrorCode::BusinessNotFound, business_id))
    }
}

// ==================== Categories ====================

#[derive(Serialize)]
struct NewCategory<'a> {
    business_id: &'a str,
    #[serde(flatten)]
    data: &'a CategoryCreate,
    sort_order: i32,
    is_active: bool,
}

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    /// Categories of a business ordered by sort_order
    pub async fn find_by_business(&self, business_id: &str) -> AppResult<Vec<Category>> {
        let query = Query::new()
            .eq("business_id", business_id)
            .order_by("sort_order");
        Ok(select_as(self.base.store().as_ref(), Table::Categories, &query).await?)
    }

    pub async fn create(
        &self,
        business_id: &str,
        data: &CategoryCreate,
        sort_order: i32,
    ) -> AppResult<Category> {
        data.validate()?;
        let body = NewCategory {
            business_id,
            data,
            sort_order,
            is_active: true,
        };
        Ok(insert_as(self.base.store().as_ref(), Table::Categories, &body).await?)
    }

    pub async fn update(&self, id: &str, data: &CategoryUpdate) -> AppResult<Category> {
        data.validate()?;
        update_as(self.base.store().as_ref(), Table::Categories, id, data)
            .await
            .map_err(|e| not_found(e.into(), ErrorCode::CategoryNotFound, id))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.base
            .delete(Table::Categories, id)
            .await
            .map_err(|e| not_found(e, ErrorCode::CategoryNotFound, id))
    }
}

// ==================== Products ====================

#[derive(Serialize)]
struct NewProduct<'a> {
    business_id: &'a str,
    category_id: &'a str,
    #[serde(flatten)]
    data: &'a ProductCreate,
    sort_order: i32,
    is_active: bool,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    /// Products of one category ordered by sort_order
    pub async fn find_by_category(&self, category_id: &str) -> AppResult<Vec<Product>> {
        let query = Query::new()
            .eq("category_id", category_id)
            .order_by("sort_order");
        Ok(select_as(self.base.store().as_ref(), Table::Products, &query).await?)
    }

    /// Every product of a business, for search and the featured strip
    pub async fn find_by_business(&self, business_id: &str) -> AppResult<Vec<Product>> {
        let query = Query::new()
            .eq("business_id", business_id)
            .order_by("sort_order");
        Ok(select_as(self.base.store().as_ref(), Table::Products, &query).await?)
    }

    pub async fn create(
        &self,
        business_id: &str,
        category_id: &str,
        data: &ProductCreate,
        sort_order: i32,
    ) -> AppResult<Product> {
        data.validate()?;
        let body = NewProduct {
            business_id,
            category_id,
            data,
            sort_order,
            is_active: true,
        };
        Ok(insert_as(self.base.store().as_ref(), Table::Products, &body).await?)
    }

    pub async fn update(&self, id: &str, data: &ProductUpdate) -> AppResult<Product> {
        data.validate()?;
        if data.price.is_some_and(|p| p.is_sign_negative()) {
            return Err(AppError::new(ErrorCode::ProductInvalidPrice).with_detail("id", id));
        }
        update_as(self.base.store().as_ref(), Table::Products, id, data)
            .await
            .map_err(|e| not_found(e.into(), ErrorCode::ProductNotFound, id))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.base
            .delete(Table::Products, id)
            .await
            .map_err(|e| not_found(e, ErrorCode::ProductNotFound, id))
    }
}

// ==================== Tags ====================

#[derive(Serialize)]
struct NewTag<'a> {
    business_id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

#[derive(Clone)]
pub struct TagRepository {
    base: BaseRepository,
}

impl TagRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    pub async fn find_by_business(&self, business_id: &str) -> AppResult<Vec<Tag>> {
        let query = Query::new().eq("business_id", business_id).order_by("name");
        Ok(select_as(self.base.store().as_ref(), Table::Tags, &query).await?)
    }

    pub async fn create(&self, business_id: &str, data: &TagCreate) -> AppResult<Tag> {
        data.validate()?;
        let body = NewTag {
            business_id,
            name: &data.name,
            color: data.color.as_deref(),
        };
        Ok(insert_as(self.base.store().as_ref(), Table::Tags, &body).await?)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.base
            .delete(Table::Tags, id)
            .await
            .map_err(|e| not_found(e, ErrorCode::TagNotFound, id))
    }
}
