//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub image_url: Option<String>,
    pub icon_url: Option<String>,

    /// Number of live products in the category.
    pub product_count: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
