//! Content Data

use crate::domain::content::records::{PopupUuid, SlideUuid, SocialLinkUuid};

/// Slide fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideData {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub image_url: String,
    pub active: bool,
    pub sort_order: i32,
}

/// New Slide Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlide {
    pub uuid: SlideUuid,
    pub slide: SlideData,
}

/// Popup fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupData {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub active: bool,
}

/// New Popup Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPopup {
    pub uuid: PopupUuid,
    pub popup: PopupData,
}

/// Social link fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLinkData {
    pub name: String,
    pub url: String,
    pub icon_url: Option<String>,
    pub active: bool,
    pub sort_order: i32,
}

/// New Social Link Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialLink {
    pub uuid: SocialLinkUuid,
    pub link: SocialLinkData,
}

/// Page header contents; the slug comes from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeaderData {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Whether `slug` is lowercase words joined by single hyphens, e.g. `shop`
/// or `about-us`.
#[must_use]
pub fn is_valid_page_slug(slug: &str) -> bool {
    slug.split('-').all(|word| {
        !word.is_empty()
            && word
                .bytes()
                .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hyphenated_lowercase_slugs() {
        for slug in ["shop", "about-us", "black-friday-2026"] {
            assert!(is_valid_page_slug(slug), "{slug}");
        }
    }

    #[test]
    fn rejects_malformed_slugs() {
        for slug in ["", "Shop", "about--us", "-shop", "shop-", "shop page", "loja/1"] {
            assert!(!is_valid_page_slug(slug), "{slug:?}");
        }
    }
}
