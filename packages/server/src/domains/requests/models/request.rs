//! Commission request records.
//!
//! A request is a small document: scalar fields plus an append-only message
//! thread, an optional quotation and optional attachments. The Postgres store
//! keeps the nested parts in JSONB columns so one row is one document.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use typed_builder::TypedBuilder;

use super::RequestStatus;
use crate::common::{ProductId, RequestId, UserId};
use crate::domains::directory::{ProductSummary, UserSummary};

pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Commission,
    #[default]
    Inquiry,
    Quote,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::Commission => write!(f, "commission"),
            RequestKind::Inquiry => write!(f, "inquiry"),
            RequestKind::Quote => write!(f, "quote"),
        }
    }
}

impl std::str::FromStr for RequestKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "commission" => Ok(RequestKind::Commission),
            "inquiry" => Ok(RequestKind::Inquiry),
            "quote" => Ok(RequestKind::Quote),
            _ => Err(anyhow::anyhow!("Invalid request type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub currency: String,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
}

/// One entry of the request's message thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender: UserId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Price proposal attached by the artisan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
}

/// A stored request with unresolved references.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub id: RequestId,
    pub buyer: UserId,
    pub artisan: UserId,
    pub product: Option<ProductId>,
    pub kind: RequestKind,
    pub title: String,
    pub description: String,
    pub budget: Budget,
    pub deadline: Option<DateTime<Utc>>,
    pub status: RequestStatus,
    pub attachments: Vec<Attachment>,
    pub messages: Vec<Message>,
    pub quotation: Option<Quotation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new request. The buyer is always the caller.
#[derive(Debug, Clone, TypedBuilder)]
pub struct NewRequest {
    pub buyer: UserId,
    pub artisan: UserId,
    #[builder(default)]
    pub product: Option<ProductId>,
    #[builder(default)]
    pub kind: RequestKind,
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into))]
    pub description: String,
    #[builder(default)]
    pub budget: Budget,
    #[builder(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[builder(default)]
    pub attachments: Vec<Attachment>,
}

/// Partial update applied atomically to a single request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestChanges {
    pub status: Option<RequestStatus>,
    pub quotation: Option<Quotation>,
    pub append_message: Option<Message>,
    /// When set, the update only applies while the stored status still equals
    /// this value.
    pub expected_status: Option<RequestStatus>,
}

impl RequestChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.quotation.is_none() && self.append_message.is_none()
    }

    /// Whether the guard on the stored status holds for `request`.
    pub fn expectation_holds(&self, request: &Request) -> bool {
        self.expected_status
            .map_or(true, |expected| expected == request.status)
    }

    /// Applies the changes to an in-memory copy of the document.
    pub fn apply_to(self, request: &mut Request, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(quotation) = self.quotation {
            request.quotation = Some(quotation);
        }
        if let Some(message) = self.append_message {
            request.messages.push(message);
        }
        request.updated_at = now;
    }
}

/// A request with buyer, artisan and product resolved, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub id: RequestId,
    pub buyer: Option<UserSummary>,
    pub artisan: Option<UserSummary>,
    pub product: Option<ProductSummary>,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub title: String,
    pub description: String,
    pub budget: Budget,
    pub deadline: Option<DateTime<Utc>>,
    pub status: RequestStatus,
    pub attachments: Vec<Attachment>,
    pub messages: Vec<Message>,
    pub quotation: Option<Quotation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RequestView {
    pub fn new(
        request: Request,
        buyer: Option<UserSummary>,
        artisan: Option<UserSummary>,
        product: Option<ProductSummary>,
    ) -> Self {
        Self {
            id: request.id,
            buyer,
            artisan,
            product,
            kind: request.kind,
            title: request.title,
            description: request.description,
            budget: request.budget,
            deadline: request.deadline,
            status: request.status,
            attachments: request.attachments,
            messages: request.messages,
            quotation: request.quotation,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

// =============================================================================
// Row mapping
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct RequestRow {
    pub id: RequestId,
    pub buyer_id: UserId,
    pub artisan_id: UserId,
    pub product_id: Option<ProductId>,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub budget_currency: String,
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub attachments: Json<Vec<Attachment>>,
    pub messages: Json<Vec<Message>>,
    pub quotation: Option<Json<Quotation>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for Request {
    type Error = anyhow::Error;

    fn try_from(row: RequestRow) -> anyhow::Result<Self> {
        Ok(Self {
            id: row.id,
            buyer: row.buyer_id,
            artisan: row.artisan_id,
            product: row.product_id,
            kind: row.kind.parse()?,
            title: row.title,
            description: row.description,
            budget: Budget {
                min: row.budget_min,
                max: row.budget_max,
                currency: row.budget_currency,
            },
            deadline: row.deadline,
            status: row.status.parse()?,
            attachments: row.attachments.0,
            messages: row.messages.0,
            quotation: row.quotation.map(|q| q.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
