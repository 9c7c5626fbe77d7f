//! HTTP request handlers for the shift roster API.
//!
//! Every resource gets the same six operations. The handlers are generic
//! over the capability traits in [`crate::resource`], and
//! [`create_router`] instantiates them once per resource.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db::{EmployeeRepository, ShiftRepository};
use crate::error::{RosterError, RosterResult};
use crate::models::UpdateMode;
use crate::resource::{Creatable, Deletable, Listable, Resource, Retrievable, Updatable};

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// ```text
/// GET                       /
/// GET, POST                 /employees/
/// GET, PUT, PATCH, DELETE   /employees/{id}/
/// GET, POST                 /shifts/
/// GET, PUT, PATCH, DELETE   /shifts/{id}/
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_root_handler))
        .merge(resource_routes::<EmployeeRepository>())
        .merge(resource_routes::<ShiftRepository>())
        .fallback(fallback_handler)
        .with_state(state)
}

/// Collection and member routes for one resource.
fn resource_routes<R>() -> Router<AppState>
where
    R: Listable + Retrievable + Creatable + Updatable + Deletable,
{
    Router::new()
        .route(
            &format!("/{}/", R::PATH),
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            &format!("/{}/:id/", R::PATH),
            get(retrieve_handler::<R>)
                .put(replace_handler::<R>)
                .patch(partial_update_handler::<R>)
                .delete(delete_handler::<R>),
        )
}

/// Handler for GET / returning the URL of each collection.
async fn api_root_handler(headers: HeaderMap) -> Json<BTreeMap<&'static str, String>> {
    let base = headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .map(|host| format!("http://{}", host))
        .unwrap_or_default();

    Json(BTreeMap::from([
        (
            EmployeeRepository::PATH,
            format!("{}/{}/", base, EmployeeRepository::PATH),
        ),
        (
            ShiftRepository::PATH,
            format!("{}/{}/", base, ShiftRepository::PATH),
        ),
    ]))
}

async fn fallback_handler(uri: Uri) -> ApiErrorResponse {
    ApiErrorResponse::new(
        StatusCode::NOT_FOUND,
        ApiError::not_found(format!("No route for {}", uri.path())),
    )
}

/// Handler for GET /{resource}/.
async fn list_handler<R: Listable>(
    State(state): State<AppState>,
) -> Result<Json<Vec<R::Record>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    let records = R::from_store(state.store())
        .list()
        .await
        .map_err(|err| reject::<R>(correlation_id, "list", err))?;

    info!(
        correlation_id = %correlation_id,
        resource = R::NAME,
        count = records.len(),
        "Listed records"
    );
    Ok(Json(records))
}

/// Handler for GET /{resource}/{id}/.
async fn retrieve_handler<R: Retrievable>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<R::Record>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let fail = move |err| reject::<R>(correlation_id, "retrieve", err);

    let id = parse_id::<R>(&raw_id).map_err(fail)?;
    let record = R::from_store(state.store())
        .retrieve(id)
        .await
        .map_err(fail)?;

    info!(
        correlation_id = %correlation_id,
        resource = R::NAME,
        id,
        "Retrieved record"
    );
    Ok(Json(record))
}

/// Handler for POST /{resource}/.
async fn create_handler<R: Creatable>(
    State(state): State<AppState>,
    payload: Result<Json<R::Payload>, JsonRejection>,
) -> Result<(StatusCode, Json<R::Record>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    let Json(payload) = payload.map_err(|rejection| reject_body::<R>(correlation_id, rejection))?;
    let record = R::from_store(state.store())
        .create(payload)
        .await
        .map_err(|err| reject::<R>(correlation_id, "create", err))?;

    info!(
        correlation_id = %correlation_id,
        resource = R::NAME,
        "Created record"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for PUT /{resource}/{id}/.
async fn replace_handler<R: Updatable>(
    state: State<AppState>,
    raw_id: Path<String>,
    payload: Result<Json<R::Payload>, JsonRejection>,
) -> Result<Json<R::Record>, ApiErrorResponse> {
    update::<R>(state, raw_id, payload, UpdateMode::Full).await
}

/// Handler for PATCH /{resource}/{id}/.
async fn partial_update_handler<R: Updatable>(
    state: State<AppState>,
    raw_id: Path<String>,
    payload: Result<Json<R::Payload>, JsonRejection>,
) -> Result<Json<R::Record>, ApiErrorResponse> {
    update::<R>(state, raw_id, payload, UpdateMode::Partial).await
}

async fn update<R: Updatable>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<R::Payload>, JsonRejection>,
    mode: UpdateMode,
) -> Result<Json<R::Record>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let fail = move |err| reject::<R>(correlation_id, "update", err);

    let id = parse_id::<R>(&raw_id).map_err(fail)?;
    let Json(payload) = payload.map_err(|rejection| reject_body::<R>(correlation_id, rejection))?;
    let record = R::from_store(state.store())
        .update(id, payload, mode)
        .await
        .map_err(fail)?;

    info!(
        correlation_id = %correlation_id,
        resource = R::NAME,
        id,
        partial = (mode == UpdateMode::Partial),
        "Updated record"
    );
    Ok(Json(record))
}

/// Handler for DELETE /{resource}/{id}/.
async fn delete_handler<R: Deletable>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let fail = move |err| reject::<R>(correlation_id, "delete", err);

    let id = parse_id::<R>(&raw_id).map_err(fail)?;
    R::from_store(state.store())
        .delete(id)
        .await
        .map_err(fail)?;

    info!(
        correlation_id = %correlation_id,
        resource = R::NAME,
        id,
        "Deleted record"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Parses a path identifier. Anything that is not an integer cannot name a record.
fn parse_id<R: Resource>(raw: &str) -> RosterResult<i32> {
    raw.parse()
        .map_err(|_| RosterError::not_found(R::NAME, raw))
}

/// Logs a failed operation and converts it into a response.
fn reject<R: Resource>(
    correlation_id: Uuid,
    operation: &'static str,
    err: RosterError,
) -> ApiErrorResponse {
    match &err {
        RosterError::NotFound { .. } | RosterError::Validation(_) => warn!(
            correlation_id = %correlation_id,
            resource = R::NAME,
            operation,
            error = %err,
            "Request rejected"
        ),
        _ => error!(
            correlation_id = %correlation_id,
            resource = R::NAME,
            operation,
            error = %err,
            "Operation failed"
        ),
    }
    err.into()
}

fn reject_body<R: Resource>(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        resource = R::NAME,
        error = %rejection.body_text(),
        "Request body rejected"
    );
    rejection.into()
}
