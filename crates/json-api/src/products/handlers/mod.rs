//! Product Handlers

use rust_decimal::{Decimal, prelude::ToPrimitive};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use storefront::catalog::{CategoryTags, ParcelDimensions};
use uuid::Uuid;

use storefront_app::domain::products::{
    data::{NewVariant, ProductDetails},
    records::{ProductRecord, VariantRecord, VariantUuid},
};

use crate::extensions::*;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,

    /// Base price in minor units
    pub price: u64,

    /// Sale price in minor units
    pub discount_price: Option<u64>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub dimensions: DimensionsPayload,
    pub categories: Vec<String>,
    pub variants: Vec<VariantResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            description: product.description,
            price: product.price,
            discount_price: product.discount_price,
            image_url: product.image_url,
            gallery: product.gallery,
            dimensions: product.dimensions.into(),
            categories: product.categories.iter().map(ToOwned::to_owned).collect(),
            variants: product.variants.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product Variant
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub color: Option<String>,
    pub color_name: Option<String>,
    pub size: Option<String>,

    /// Price overriding the product's, in minor units
    pub price: Option<u64>,
    pub stock: u32,
    pub image_url: Option<String>,
}

impl From<VariantRecord> for VariantResponse {
    fn from(variant: VariantRecord) -> Self {
        Self {
            uuid: variant.uuid.into_uuid(),
            color: variant.color,
            color_name: variant.color_name,
            size: variant.size,
            price: variant.price,
            stock: variant.stock,
            image_url: variant.image_url,
        }
    }
}

/// Parcel dimensions used for shipping quotes
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct DimensionsPayload {
    pub weight_kg: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub length_cm: Option<f64>,
}

impl From<ParcelDimensions> for DimensionsPayload {
    fn from(dimensions: ParcelDimensions) -> Self {
        let float = |value: Option<Decimal>| value.and_then(|value| value.to_f64());

        Self {
            weight_kg: float(dimensions.weight_kg),
            width_cm: float(dimensions.width_cm),
            height_cm: float(dimensions.height_cm),
            length_cm: float(dimensions.length_cm),
        }
    }
}

impl DimensionsPayload {
    fn into_dimensions(self) -> Result<ParcelDimensions, StatusError> {
        Ok(ParcelDimensions {
            weight_kg: decimal(self.weight_kg)?,
            width_cm: decimal(self.width_cm)?,
            height_cm: decimal(self.height_cm)?,
            length_cm: decimal(self.length_cm)?,
        })
    }
}

fn decimal(value: Option<f64>) -> Result<Option<Decimal>, StatusError> {
    value
        .map(|value| Decimal::try_from(value).map(|value| value.round_dp(3)))
        .transpose()
        .or_400()
}

/// Product details as submitted by the back-office
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductPayload {
    pub name: String,
    pub description: Option<String>,

    /// Base price in minor units
    pub price: u64,

    /// Sale price in minor units; must be lower than the base price
    pub discount_price: Option<u64>,
    pub image_url: Option<String>,

    #[serde(default)]
    pub gallery: Vec<String>,

    #[serde(default)]
    pub dimensions: DimensionsPayload,

    /// Category names; unknown names are created
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub variants: Vec<VariantPayload>,
}

/// Product variant as submitted by the back-office
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantPayload {
    /// Existing variant to keep; generated when omitted
    pub uuid: Option<Uuid>,
    pub color: Option<String>,
    pub color_name: Option<String>,
    pub size: Option<String>,
    pub price: Option<u64>,

    #[serde(default)]
    pub stock: u32,
    pub image_url: Option<String>,
}

impl TryFrom<ProductPayload> for ProductDetails {
    type Error = StatusError;

    fn try_from(payload: ProductPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            discount_price: payload.discount_price,
            image_url: payload.image_url,
            gallery: payload.gallery,
            dimensions: payload.dimensions.into_dimensions()?,
            categories: CategoryTags::new(payload.categories),
            variants: payload
                .variants
                .into_iter()
                .map(|variant| NewVariant {
                    uuid: variant.uuid.map_or_else(VariantUuid::new, Into::into),
                    color: variant.color,
                    color_name: variant.color_name,
                    size: variant.size,
                    price: variant.price,
                    stock: variant.stock,
                    image_url: variant.image_url,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn payload_normalises_categories_and_dimensions() -> TestResult {
        let payload: ProductPayload = serde_json::from_value(json!({
            "name": "Linen Shirt",
            "price": 12990,
            "categories": ["Shirts", " Summer ", "Shirts"],
            "dimensions": { "weight_kg": 0.3 },
            "variants": [{ "size": "M", "stock": 4 }]
        }))?;

        let details = ProductDetails::try_from(payload)?;

        assert_eq!(
            details.categories.iter().collect::<Vec<_>>(),
            vec!["Shirts", "Summer"]
        );
        assert_eq!(details.dimensions.weight_kg, Some(Decimal::new(3, 1)));
        assert_eq!(details.dimensions.width_cm, None);
        assert_eq!(details.variants.len(), 1);

        Ok(())
    }

    #[test]
    fn non_finite_dimensions_are_rejected() {
        let payload = DimensionsPayload {
            weight_kg: Some(f64::NAN),
            ..DimensionsPayload::default()
        };

        assert!(payload.into_dimensions().is_err());
    }
}
