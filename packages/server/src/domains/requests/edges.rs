//! HTTP handlers for `/requests`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::actions;
use super::data::{CreateRequestInput, UpdateRequestInput};
use super::error::RequestError;
use super::models::RequestView;
use crate::common::RequestId;
use crate::kernel::ServerDeps;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

type ApiResult<T> = Result<T, ApiError>;

fn parse_id(raw: &str) -> Result<RequestId, RequestError> {
    RequestId::parse(raw).map_err(|_| RequestError::validation(format!("invalid request id: {}", raw)))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RequestError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| RequestError::validation(rejection.body_text()))
}

pub async fn list_requests(
    auth: AuthUser,
    Extension(deps): Extension<ServerDeps>,
) -> ApiResult<Json<Vec<RequestView>>> {
    let views = actions::list_requests(&auth.actor(), &deps).await?;
    Ok(Json(views))
}

pub async fn get_request(
    auth: AuthUser,
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> ApiResult<Json<RequestView>> {
    let id = parse_id(&id)?;
    let view = actions::get_request(id, &auth.actor(), &deps).await?;
    Ok(Json(view))
}

pub async fn create_request(
    auth: AuthUser,
    Extension(deps): Extension<ServerDeps>,
    payload: Result<Json<CreateRequestInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RequestView>)> {
    let input = body(payload)?;
    let view = actions::create_request(input, &auth.actor(), &deps).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_request(
    auth: AuthUser,
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRequestInput>, JsonRejection>,
) -> ApiResult<Json<RequestView>> {
    let id = parse_id(&id)?;
    let input = body(payload)?;
    let view = actions::update_request(id, input, &auth.actor(), &deps).await?;
    Ok(Json(view))
}

pub async fn delete_request(
    auth: AuthUser,
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    actions::delete_request(id, &auth.actor(), &deps).await?;
    Ok(Json(json!({ "message": "Request deleted successfully" })))
}
