//! Request payloads accepted by the REST API.
//!
//! There is no `buyer` field: the buyer is always the caller, and a `buyer`
//! key in the JSON body is ignored during deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{Attachment, Quotation, RequestKind, RequestStatus};
use crate::common::{ProductId, UserId};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetInput {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub currency: Option<String>,
}

/// Body of `POST /requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestInput {
    pub artisan: Option<UserId>,
    #[serde(rename = "type", default)]
    pub kind: RequestKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub budget: Option<BudgetInput>,
    pub deadline: Option<DateTime<Utc>>,
    pub product: Option<ProductId>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Body of `PUT /requests/:id`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequestInput {
    pub status: Option<RequestStatus>,
    pub quotation: Option<Quotation>,
    pub message: Option<String>,
}
