//! Category Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::categories::records::CategoryRecord;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

/// Category
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub icon_url: Option<String>,

    /// Live products in the category
    pub product_count: u64,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name,
            image_url: category.image_url,
            icon_url: category.icon_url,
            product_count: category.product_count,
        }
    }
}
