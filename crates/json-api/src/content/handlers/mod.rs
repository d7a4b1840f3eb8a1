//! Content Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::content::records::{
    PageHeaderRecord, PopupRecord, SlideRecord, SocialLinkRecord,
};

pub(crate) mod page_headers;
pub(crate) mod popups;
pub(crate) mod slides;
pub(crate) mod social_links;

/// Hero Slide
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlideResponse {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub image_url: String,
    pub active: bool,
    pub sort_order: i32,
}

impl From<SlideRecord> for SlideResponse {
    fn from(slide: SlideRecord) -> Self {
        Self {
            uuid: slide.uuid.into_uuid(),
            title: slide.title,
            description: slide.description,
            button_text: slide.button_text,
            button_link: slide.button_link,
            image_url: slide.image_url,
            active: slide.active,
            sort_order: slide.sort_order,
        }
    }
}

/// Pop-up
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PopupResponse {
    pub uuid: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub active: bool,
}

impl From<PopupRecord> for PopupResponse {
    fn from(popup: PopupRecord) -> Self {
        Self {
            uuid: popup.uuid.into_uuid(),
            title: popup.title,
            description: popup.description,
            image_url: popup.image_url,
            button_text: popup.button_text,
            button_link: popup.button_link,
            active: popup.active,
        }
    }
}

/// Social Link
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SocialLinkResponse {
    pub uuid: Uuid,
    pub name: String,
    pub url: String,
    pub icon_url: Option<String>,
    pub active: bool,
    pub sort_order: i32,
}

impl From<SocialLinkRecord> for SocialLinkResponse {
    fn from(link: SocialLinkRecord) -> Self {
        Self {
            uuid: link.uuid.into_uuid(),
            name: link.name,
            url: link.url,
            icon_url: link.icon_url,
            active: link.active,
            sort_order: link.sort_order,
        }
    }
}

/// Page Header
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageHeaderResponse {
    pub page_slug: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<PageHeaderRecord> for PageHeaderResponse {
    fn from(header: PageHeaderRecord) -> Self {
        Self {
            page_slug: header.page_slug,
            title: header.title,
            description: header.description,
            image_url: header.image_url,
        }
    }
}

/// Trim an optional text field, dropping it when nothing is left.
fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
