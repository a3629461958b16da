//! Read-only user and product summaries used to resolve request references.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use crate::common::{ProductId, Role, UserId};

/// Public profile fields of a user, as embedded in request responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: Decimal,
    pub currency: String,
    pub negotiable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub caption: Option<String>,
}

/// Catalogue fields of a product, as embedded in request responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub artisan: UserId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Price,
    pub images: Vec<ProductImage>,
}

// =============================================================================
// Row mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub role: String,
}

impl TryFrom<UserRow> for UserSummary {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            location: row.location,
            skills: row.skills,
            role: row.role.parse()?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub artisan_id: UserId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price_amount: Decimal,
    pub price_currency: String,
    pub price_negotiable: bool,
    pub images: Json<Vec<ProductImage>>,
}

impl From<ProductRow> for ProductSummary {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            artisan: row.artisan_id,
            name: row.name,
            category: row.category,
            description: row.description,
            price: Price {
                amount: row.price_amount,
                currency: row.price_currency,
                negotiable: row.price_negotiable,
            },
            images: row.images.0,
        }
    }
}
