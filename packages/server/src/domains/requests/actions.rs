//! Request workflow actions
//!
//! Each action takes the caller's [`Actor`] explicitly, checks it against the
//! request, performs at most one store write, and returns the request with
//! buyer, artisan and product resolved.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::data::{BudgetInput, CreateRequestInput, UpdateRequestInput};
use super::error::{RequestError, Result};
use super::models::{
    Budget, Message, NewRequest, Quotation, Request, RequestChanges, RequestView,
    DEFAULT_CURRENCY,
};
use super::policy::{authorize_access, authorize_delete, list_scope, TransitionPolicy};
use crate::common::{Actor, RequestId, Role};
use crate::kernel::ServerDeps;

pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Budgets are stored as NUMERIC(12, 2).
const BUDGET_SCALE: u32 = 2;

/// Each lost race means the status moved along a lifecycle edge, and no path
/// through the lifecycle is longer than this.
const MAX_UPDATE_ATTEMPTS: usize = 4;

fn max_budget_amount() -> Decimal {
    Decimal::new(999_999_999_999, BUDGET_SCALE)
}

/// Requests visible to the caller, newest first.
pub async fn list_requests(actor: &Actor, deps: &ServerDeps) -> Result<Vec<RequestView>> {
    let requests = deps
        .requests
        .find_by_participant(list_scope(actor))
        .await?;

    let mut views = Vec::with_capacity(requests.len());
    for request in requests {
        views.push(populate(request, deps).await?);
    }
    Ok(views)
}

pub async fn get_request(id: RequestId, actor: &Actor, deps: &ServerDeps) -> Result<RequestView> {
    let request = load(id, deps).await?;
    authorize_access(actor, &request)?;
    populate(request, deps).await
}

/// Creates a request from the caller (always the buyer) to an artisan.
pub async fn create_request(
    input: CreateRequestInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<RequestView> {
    let new = validate_create(input, actor, deps).await?;

    let request = deps.requests.create(new).await?;
    info!(
        request_id = %request.id,
        buyer = %request.buyer,
        artisan = %request.artisan,
        kind = %request.kind,
        "Request created"
    );

    reload(request.id, deps).await
}

/// Applies a status change, a quotation and/or a message in one write.
///
/// Under the strict policy the write is conditional on the status the checks
/// ran against. If another writer moved the request first, the checks are
/// repeated against the new status.
pub async fn update_request(
    id: RequestId,
    input: UpdateRequestInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<RequestView> {
    let policy = deps.transition_policy;
    let quotation = input.quotation.map(validate_quotation).transpose()?;
    let message = input
        .message
        .filter(|m| !m.trim().is_empty())
        .map(|message| Message {
            sender: actor.user_id,
            message,
            timestamp: Utc::now(),
        });

    for _ in 0..MAX_UPDATE_ATTEMPTS {
        let request = load(id, deps).await?;
        let party = authorize_access(actor, &request)?;

        if let Some(status) = input.status {
            policy.check_status(party, request.status, status)?;
        }
        if quotation.is_some() {
            policy.check_quotation(party, request.status)?;
        }

        let guarded = policy == TransitionPolicy::Strict
            && (input.status.is_some() || quotation.is_some());
        let changes = RequestChanges {
            status: input.status,
            quotation: quotation.clone(),
            append_message: message.clone(),
            expected_status: guarded.then_some(request.status),
        };

        if changes.is_empty() {
            return populate(request, deps).await;
        }

        let from = request.status;
        if let Some(updated) = deps.requests.update(id, changes).await? {
            info!(
                request_id = %id,
                actor = %actor.user_id,
                party = ?party,
                from = %from,
                to = %updated.status,
                messages = updated.messages.len(),
                "Request updated"
            );
            return reload(id, deps).await;
        }

        debug!(request_id = %id, from = %from, "Request changed underneath update, re-checking");
    }

    let current = load(id, deps).await?;
    Err(RequestError::InvalidTransition {
        from: current.status,
        to: input.status.unwrap_or(current.status),
    })
}

pub async fn delete_request(id: RequestId, actor: &Actor, deps: &ServerDeps) -> Result<()> {
    let request = load(id, deps).await?;
    authorize_delete(actor, &request)?;

    if !deps.requests.delete(id).await? {
        return Err(RequestError::NotFound(id));
    }
    info!(request_id = %id, actor = %actor.user_id, "Request deleted");
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

async fn load(id: RequestId, deps: &ServerDeps) -> Result<Request> {
    deps.requests
        .find_by_id(id)
        .await?
        .ok_or(RequestError::NotFound(id))
}

/// Re-reads a request after a write so the response reflects what was stored.
async fn reload(id: RequestId, deps: &ServerDeps) -> Result<RequestView> {
    let request = load(id, deps).await?;
    populate(request, deps).await
}

/// Resolves buyer, artisan and product references.
///
/// A reference whose target has since been removed resolves to `None`
/// rather than failing the whole response.
async fn populate(request: Request, deps: &ServerDeps) -> Result<RequestView> {
    let buyer = deps.directory.find_user(request.buyer).await?;
    let artisan = deps.directory.find_user(request.artisan).await?;
    let product = match request.product {
        Some(product_id) => deps.directory.find_product(product_id).await?,
        None => None,
    };
    if buyer.is_none() || artisan.is_none() {
        warn!(request_id = %request.id, "Request references a missing user");
    }
    Ok(RequestView::new(request, buyer, artisan, product))
}

async fn validate_create(
    input: CreateRequestInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<NewRequest> {
    let artisan_id = input
        .artisan
        .ok_or_else(|| RequestError::validation("artisan is required"))?;

    let title = input.title.trim();
    if title.is_empty() {
        return Err(RequestError::validation("title is required"));
    }
    if input.description.trim().is_empty() {
        return Err(RequestError::validation("description is required"));
    }
    if input.description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(RequestError::validation(format!(
            "description must be at most {} characters",
            MAX_DESCRIPTION_CHARS
        )));
    }
    if artisan_id == actor.user_id {
        return Err(RequestError::validation(
            "buyer and artisan must be different users",
        ));
    }

    let artisan = deps
        .directory
        .find_user(artisan_id)
        .await?
        .ok_or_else(|| RequestError::validation("artisan not found"))?;
    if artisan.role != Role::Artisan {
        return Err(RequestError::validation(format!(
            "user {} is not an artisan",
            artisan_id
        )));
    }

    if let Some(product_id) = input.product {
        let product = deps
            .directory
            .find_product(product_id)
            .await?
            .ok_or_else(|| RequestError::validation("product not found"))?;
        if product.artisan != artisan_id {
            return Err(RequestError::validation(
                "product does not belong to this artisan",
            ));
        }
    }

    let budget = validate_budget(input.budget.unwrap_or_default())?;

    Ok(NewRequest::builder()
        .buyer(actor.user_id)
        .artisan(artisan_id)
        .product(input.product)
        .kind(input.kind)
        .title(title)
        .description(input.description)
        .budget(budget)
        .deadline(input.deadline)
        .attachments(input.attachments)
        .build())
}

fn validate_budget(input: BudgetInput) -> Result<Budget> {
    for bound in [input.min, input.max].into_iter().flatten() {
        if bound < Decimal::ZERO {
            return Err(RequestError::validation("budget must not be negative"));
        }
        if bound > max_budget_amount() {
            return Err(RequestError::validation(format!(
                "budget must be at most {}",
                max_budget_amount()
            )));
        }
        if bound.normalize().scale() > BUDGET_SCALE {
            return Err(RequestError::validation(
                "budget allows at most two decimal places",
            ));
        }
    }
    if let (Some(min), Some(max)) = (input.min, input.max) {
        if min > max {
            return Err(RequestError::validation(
                "budget minimum exceeds maximum",
            ));
        }
    }
    Ok(Budget {
        min: input.min,
        max: input.max,
        currency: normalize_currency(input.currency),
    })
}

fn validate_quotation(quotation: Quotation) -> Result<Quotation> {
    if quotation.amount < Decimal::ZERO {
        return Err(RequestError::validation(
            "quotation amount must not be negative",
        ));
    }
    Ok(Quotation {
        currency: normalize_currency(Some(quotation.currency)),
        ..quotation
    })
}

fn normalize_currency(currency: Option<String>) -> String {
    currency
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}
