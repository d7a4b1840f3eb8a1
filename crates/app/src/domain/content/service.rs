//! Content service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::content::{
        data::{
            NewPopup, NewSlide, NewSocialLink, PageHeaderData, PopupData, SlideData,
            SocialLinkData, is_valid_page_slug,
        },
        errors::ContentServiceError,
        records::{
            PageHeaderRecord, PopupRecord, PopupUuid, SlideRecord, SlideUuid, SocialLinkRecord,
            SocialLinkUuid,
        },
        repository::PgContentRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgContentService {
    db: Db,
    repository: PgContentRepository,
}

impl PgContentService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgContentRepository::new(),
        }
    }
}

#[async_trait]
impl ContentService for PgContentService {
    async fn list_slides(
        &self,
        active_only: bool,
    ) -> Result<Vec<SlideRecord>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let slides = self.repository.list_slides(&mut tx, active_only).await?;

        tx.commit().await?;

        Ok(slides)
    }

    async fn create_slide(&self, slide: NewSlide) -> Result<SlideRecord, ContentServiceError> {
        validate_slide(&slide.slide)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_slide(&mut tx, &slide).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_slide(
        &self,
        slide: SlideUuid,
        data: SlideData,
    ) -> Result<SlideRecord, ContentServiceError> {
        validate_slide(&data)?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_slide(&mut tx, slide, &data).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_slide(&self, slide: SlideUuid) -> Result<(), ContentServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.delete_slide(&mut tx, slide).await? == 0 {
            return Err(ContentServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_popups(&self) -> Result<Vec<PopupRecord>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let popups = self.repository.list_popups(&mut tx).await?;

        tx.commit().await?;

        Ok(popups)
    }

    async fn active_popup(&self) -> Result<Option<PopupRecord>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let popup = self.repository.active_popup(&mut tx).await?;

        tx.commit().await?;

        Ok(popup)
    }

    async fn create_popup(&self, popup: NewPopup) -> Result<PopupRecord, ContentServiceError> {
        validate_popup(&popup.popup)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_popup(&mut tx, &popup).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_popup(
        &self,
        popup: PopupUuid,
        data: PopupData,
    ) -> Result<PopupRecord, ContentServiceError> {
        validate_popup(&data)?;

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_popup(&mut tx, popup, &data).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_popup(&self, popup: PopupUuid) -> Result<(), ContentServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.delete_popup(&mut tx, popup).await? == 0 {
            return Err(ContentServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_social_links(
        &self,
        active_only: bool,
    ) -> Result<Vec<SocialLinkRecord>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let links = self.repository.list_social_links(&mut tx, active_only).await?;

        tx.commit().await?;

        Ok(links)
    }

    async fn create_social_link(
        &self,
        link: NewSocialLink,
    ) -> Result<SocialLinkRecord, ContentServiceError> {
        validate_social_link(&link.link)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_social_link(&mut tx, &link).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_social_link(
        &self,
        link: SocialLinkUuid,
        data: SocialLinkData,
    ) -> Result<SocialLinkRecord, ContentServiceError> {
        validate_social_link(&data)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_social_link(&mut tx, link, &data)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_social_link(&self, link: SocialLinkUuid) -> Result<(), ContentServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.delete_social_link(&mut tx, link).await? == 0 {
            return Err(ContentServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_page_headers(&self) -> Result<Vec<PageHeaderRecord>, ContentServiceError> {
        let mut tx = self.db.begin().await?;

        let headers = self.repository.list_page_headers(&mut tx).await?;

        tx.commit().await?;

        Ok(headers)
    }

    async fn page_header(&self, slug: String) -> Result<PageHeaderRecord, ContentServiceError> {
        if !is_valid_page_slug(&slug) {
            return Err(ContentServiceError::NotFound);
        }

        let mut tx = self.db.begin().await?;

        let header = self.repository.get_page_header(&mut tx, &slug).await?;

        tx.commit().await?;

        Ok(header)
    }

    async fn put_page_header(
        &self,
        slug: String,
        data: PageHeaderData,
    ) -> Result<PageHeaderRecord, ContentServiceError> {
        validate_page_header(&slug, &data)?;

        let mut tx = self.db.begin().await?;

        let header = self.repository.put_page_header(&mut tx, &slug, &data).await?;

        tx.commit().await?;

        Ok(header)
    }

    async fn delete_page_header(&self, slug: String) -> Result<(), ContentServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.delete_page_header(&mut tx, &slug).await? == 0 {
            return Err(ContentServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ContentServiceError> {
    if value.trim().is_empty() {
        return Err(ContentServiceError::MissingRequiredData(field));
    }

    Ok(())
}

fn validate_slide(slide: &SlideData) -> Result<(), ContentServiceError> {
    require(&slide.title, "title")?;
    require(&slide.image_url, "image_url")
}

fn validate_popup(popup: &PopupData) -> Result<(), ContentServiceError> {
    require(&popup.title, "title")
}

fn validate_social_link(link: &SocialLinkData) -> Result<(), ContentServiceError> {
    require(&link.name, "name")?;
    require(&link.url, "url")
}

fn validate_page_header(slug: &str, header: &PageHeaderData) -> Result<(), ContentServiceError> {
    if !is_valid_page_slug(slug) {
        return Err(ContentServiceError::InvalidData);
    }

    require(&header.title, "title")
}

#[automock]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Slides in display order, optionally only the active ones.
    async fn list_slides(
        &self,
        active_only: bool,
    ) -> Result<Vec<SlideRecord>, ContentServiceError>;

    /// Create a slide; title and image are required.
    async fn create_slide(&self, slide: NewSlide) -> Result<SlideRecord, ContentServiceError>;

    async fn update_slide(
        &self,
        slide: SlideUuid,
        data: SlideData,
    ) -> Result<SlideRecord, ContentServiceError>;

    async fn delete_slide(&self, slide: SlideUuid) -> Result<(), ContentServiceError>;

    /// Every pop-up, newest first.
    async fn list_popups(&self) -> Result<Vec<PopupRecord>, ContentServiceError>;

    /// The pop-up shown to visitors: the most recently updated active one.
    async fn active_popup(&self) -> Result<Option<PopupRecord>, ContentServiceError>;

    async fn create_popup(&self, popup: NewPopup) -> Result<PopupRecord, ContentServiceError>;

    async fn update_popup(
        &self,
        popup: PopupUuid,
        data: PopupData,
    ) -> Result<PopupRecord, ContentServiceError>;

    async fn delete_popup(&self, popup: PopupUuid) -> Result<(), ContentServiceError>;

    /// Social links in display order, optionally only the active ones.
    async fn list_social_links(
        &self,
        active_only: bool,
    ) -> Result<Vec<SocialLinkRecord>, ContentServiceError>;

    async fn create_social_link(
        &self,
        link: NewSocialLink,
    ) -> Result<SocialLinkRecord, ContentServiceError>;

    async fn update_social_link(
        &self,
        link: SocialLinkUuid,
        data: SocialLinkData,
    ) -> Result<SocialLinkRecord, ContentServiceError>;

    async fn delete_social_link(&self, link: SocialLinkUuid) -> Result<(), ContentServiceError>;

    /// Every page header, by slug.
    async fn list_page_headers(&self) -> Result<Vec<PageHeaderRecord>, ContentServiceError>;

    /// The header for one page.
    async fn page_header(&self, slug: String) -> Result<PageHeaderRecord, ContentServiceError>;

    /// Create or replace the header for a page.
    async fn put_page_header(
        &self,
        slug: String,
        data: PageHeaderData,
    ) -> Result<PageHeaderRecord, ContentServiceError>;

    async fn delete_page_header(&self, slug: String) -> Result<(), ContentServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide() -> SlideData {
        SlideData {
            title: "Summer Collection".to_owned(),
            description: String::new(),
            button_text: "Shop now".to_owned(),
            button_link: "/products".to_owned(),
            image_url: "https://cdn.example.com/summer.jpg".to_owned(),
            active: true,
            sort_order: 0,
        }
    }

    #[test]
    fn slides_need_a_title_and_an_image() {
        assert!(validate_slide(&slide()).is_ok());

        let untitled = SlideData {
            title: "  ".to_owned(),
            ..slide()
        };
        let imageless = SlideData {
            image_url: String::new(),
            ..slide()
        };

        assert!(matches!(
            validate_slide(&untitled),
            Err(ContentServiceError::MissingRequiredData("title"))
        ));
        assert!(matches!(
            validate_slide(&imageless),
            Err(ContentServiceError::MissingRequiredData("image_url"))
        ));
    }

    #[test]
    fn social_links_need_a_url() {
        let link = SocialLinkData {
            name: "Instagram".to_owned(),
            url: String::new(),
            icon_url: None,
            active: true,
            sort_order: 1,
        };

        assert!(matches!(
            validate_social_link(&link),
            Err(ContentServiceError::MissingRequiredData("url"))
        ));
    }

    #[test]
    fn page_headers_need_a_well_formed_slug() {
        let header = PageHeaderData {
            title: "Our Shop".to_owned(),
            description: String::new(),
            image_url: None,
        };

        assert!(validate_page_header("shop", &header).is_ok());
        assert!(matches!(
            validate_page_header("Our Shop", &header),
            Err(ContentServiceError::InvalidData)
        ));
    }
}
