//! Content Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Slide UUID
pub type SlideUuid = TypedUuid<SlideRecord>;

/// Popup UUID
pub type PopupUuid = TypedUuid<PopupRecord>;

/// Social Link UUID
pub type SocialLinkUuid = TypedUuid<SocialLinkRecord>;

/// Home page hero slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRecord {
    pub uuid: SlideUuid,
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub image_url: String,
    pub active: bool,

    /// Ascending display position; ties show the newest slide first.
    pub sort_order: i32,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Promotional pop-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupRecord {
    pub uuid: PopupUuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Social Link Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLinkRecord {
    pub uuid: SocialLinkUuid,
    pub name: String,
    pub url: String,
    pub icon_url: Option<String>,
    pub active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Banner shown at the top of a storefront page, keyed by the page slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeaderRecord {
    pub page_slug: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
