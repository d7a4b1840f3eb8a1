//! Content Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::content::{
    data::{
        NewPopup, NewSlide, NewSocialLink, PageHeaderData, PopupData, SlideData, SocialLinkData,
    },
    records::{
        PageHeaderRecord, PopupRecord, PopupUuid, SlideRecord, SlideUuid, SocialLinkRecord,
        SocialLinkUuid,
    },
};

const LIST_SLIDES_SQL: &str = include_str!("sql/list_slides.sql");
const CREATE_SLIDE_SQL: &str = include_str!("sql/create_slide.sql");
const UPDATE_SLIDE_SQL: &str = include_str!("sql/update_slide.sql");
const DELETE_SLIDE_SQL: &str = include_str!("sql/delete_slide.sql");

const LIST_POPUPS_SQL: &str = include_str!("sql/list_popups.sql");
const ACTIVE_POPUP_SQL: &str = include_str!("sql/active_popup.sql");
const CREATE_POPUP_SQL: &str = include_str!("sql/create_popup.sql");
const UPDATE_POPUP_SQL: &str = include_str!("sql/update_popup.sql");
const DELETE_POPUP_SQL: &str = include_str!("sql/delete_popup.sql");

const LIST_SOCIAL_LINKS_SQL: &str = include_str!("sql/list_social_links.sql");
const CREATE_SOCIAL_LINK_SQL: &str = include_str!("sql/create_social_link.sql");
const UPDATE_SOCIAL_LINK_SQL: &str = include_str!("sql/update_social_link.sql");
const DELETE_SOCIAL_LINK_SQL: &str = include_str!("sql/delete_social_link.sql");

const LIST_PAGE_HEADERS_SQL: &str = include_str!("sql/list_page_headers.sql");
const GET_PAGE_HEADER_SQL: &str = include_str!("sql/get_page_header.sql");
const PUT_PAGE_HEADER_SQL: &str = include_str!("sql/put_page_header.sql");
const DELETE_PAGE_HEADER_SQL: &str = include_str!("sql/delete_page_header.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgContentRepository;

impl PgContentRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_slides(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        active_only: bool,
    ) -> Result<Vec<SlideRecord>, sqlx::Error> {
        query_as::<Postgres, SlideRecord>(LIST_SLIDES_SQL)
            .bind(active_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_slide(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slide: &NewSlide,
    ) -> Result<SlideRecord, sqlx::Error> {
        bind_slide(query_as(CREATE_SLIDE_SQL), slide.uuid.into_uuid(), &slide.slide)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_slide(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slide: SlideUuid,
        data: &SlideData,
    ) -> Result<SlideRecord, sqlx::Error> {
        bind_slide(query_as(UPDATE_SLIDE_SQL), slide.into_uuid(), data)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_slide(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slide: SlideUuid,
    ) -> Result<u64, sqlx::Error> {
        delete_by_uuid(tx, DELETE_SLIDE_SQL, slide.into_uuid()).await
    }

    pub(crate) async fn list_popups(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PopupRecord>, sqlx::Error> {
        query_as::<Postgres, PopupRecord>(LIST_POPUPS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn active_popup(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<PopupRecord>, sqlx::Error> {
        query_as::<Postgres, PopupRecord>(ACTIVE_POPUP_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_popup(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        popup: &NewPopup,
    ) -> Result<PopupRecord, sqlx::Error> {
        bind_popup(query_as(CREATE_POPUP_SQL), popup.uuid.into_uuid(), &popup.popup)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_popup(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        popup: PopupUuid,
        data: &PopupData,
    ) -> Result<PopupRecord, sqlx::Error> {
        bind_popup(query_as(UPDATE_POPUP_SQL), popup.into_uuid(), data)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_popup(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        popup: PopupUuid,
    ) -> Result<u64, sqlx::Error> {
        delete_by_uuid(tx, DELETE_POPUP_SQL, popup.into_uuid()).await
    }

    pub(crate) async fn list_social_links(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        active_only: bool,
    ) -> Result<Vec<SocialLinkRecord>, sqlx::Error> {
        query_as::<Postgres, SocialLinkRecord>(LIST_SOCIAL_LINKS_SQL)
            .bind(active_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_social_link(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        link: &NewSocialLink,
    ) -> Result<SocialLinkRecord, sqlx::Error> {
        bind_social_link(query_as(CREATE_SOCIAL_LINK_SQL), link.uuid.into_uuid(), &link.link)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_social_link(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        link: SocialLinkUuid,
        data: &SocialLinkData,
    ) -> Result<SocialLinkRecord, sqlx::Error> {
        bind_social_link(query_as(UPDATE_SOCIAL_LINK_SQL), link.into_uuid(), data)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_social_link(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        link: SocialLinkUuid,
    ) -> Result<u64, sqlx::Error> {
        delete_by_uuid(tx, DELETE_SOCIAL_LINK_SQL, link.into_uuid()).await
    }

    pub(crate) async fn list_page_headers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PageHeaderRecord>, sqlx::Error> {
        query_as::<Postgres, PageHeaderRecord>(LIST_PAGE_HEADERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_page_header(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<PageHeaderRecord, sqlx::Error> {
        query_as::<Postgres, PageHeaderRecord>(GET_PAGE_HEADER_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "content.repository.put_page_header",
        skip(self, tx, data),
        err
    )]
    pub(crate) async fn put_page_header(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
        data: &PageHeaderData,
    ) -> Result<PageHeaderRecord, sqlx::Error> {
        query_as::<Postgres, PageHeaderRecord>(PUT_PAGE_HEADER_SQL)
            .bind(slug)
            .bind(&data.title)
            .bind(&data.description)
            .bind(&data.image_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_page_header(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PAGE_HEADER_SQL)
            .bind(slug)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

type RecordQuery<'q, T> = sqlx::query::QueryAs<'q, Postgres, T, sqlx::postgres::PgArguments>;

fn bind_slide<'q>(
    query: RecordQuery<'q, SlideRecord>,
    uuid: Uuid,
    slide: &'q SlideData,
) -> RecordQuery<'q, SlideRecord> {
    query
        .bind(uuid)
        .bind(&slide.title)
        .bind(&slide.description)
        .bind(&slide.button_text)
        .bind(&slide.button_link)
        .bind(&slide.image_url)
        .bind(slide.active)
        .bind(slide.sort_order)
}

fn bind_popup<'q>(
    query: RecordQuery<'q, PopupRecord>,
    uuid: Uuid,
    popup: &'q PopupData,
) -> RecordQuery<'q, PopupRecord> {
    query
        .bind(uuid)
        .bind(&popup.title)
        .bind(&popup.description)
        .bind(&popup.image_url)
        .bind(&popup.button_text)
        .bind(&popup.button_link)
        .bind(popup.active)
}

fn bind_social_link<'q>(
    query: RecordQuery<'q, SocialLinkRecord>,
    uuid: Uuid,
    link: &'q SocialLinkData,
) -> RecordQuery<'q, SocialLinkRecord> {
    query
        .bind(uuid)
        .bind(&link.name)
        .bind(&link.url)
        .bind(&link.icon_url)
        .bind(link.active)
        .bind(link.sort_order)
}

async fn delete_by_uuid(
    tx: &mut Transaction<'_, Postgres>,
    sql: &'static str,
    uuid: Uuid,
) -> Result<u64, sqlx::Error> {
    let rows_affected = query(sql)
        .bind(uuid)
        .execute(&mut **tx)
        .await?
        .rows_affected();

    Ok(rows_affected)
}

impl<'r> FromRow<'r, PgRow> for SlideRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SlideUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            button_text: row.try_get("button_text")?,
            button_link: row.try_get("button_link")?,
            image_url: row.try_get("image_url")?,
            active: row.try_get("active")?,
            sort_order: row.try_get("sort_order")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PopupRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PopupUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            button_text: row.try_get("button_text")?,
            button_link: row.try_get("button_link")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SocialLinkRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SocialLinkUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            url: row.try_get("url")?,
            icon_url: row.try_get("icon_url")?,
            active: row.try_get("active")?,
            sort_order: row.try_get("sort_order")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PageHeaderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            page_slug: row.try_get("page_slug")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
