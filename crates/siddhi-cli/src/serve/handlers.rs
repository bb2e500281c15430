//! HTTP route handlers for the web form.
//!
//! Handlers are kept thin: the form engine decides visibility and validity,
//! the store decides whether a save was an update.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};

use siddhi_core::{
    parent_options, save_resource, scan_with_fallback, visible_fields, FieldVisibility, FormSession,
    IdOutcome, ManagerError, ParentOption, Resource, ResourceKind, ResourceStore, ScannedId,
    SimulatedScanner, SyntheticIdGenerator,
};

use super::models::{ErrorResponse, FieldsQuery, LookupResponse, ScanResponse, SubmitResponse};
use super::templates;
use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn server_error(e: impl ToString) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::message(e)),
    )
}

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - The resource form page.
pub async fn index() -> Html<String> {
    Html(templates::render_form_page())
}

// =============================================================================
// API Handlers
// =============================================================================

/// GET `/api/resources` - Every known resource in store order.
pub async fn api_resources(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Resource>> {
    let store = state.store.read().await;
    store.list().map(Json).map_err(server_error)
}

/// GET `/api/resources/{id}` - Look an id up and describe the resulting form.
pub async fn api_resource(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<LookupResponse> {
    let known = state.store.read().await.list().map_err(server_error)?;

    let mut session = FormSession::new();
    let found = match session.on_id_entered(&id, &known) {
        IdOutcome::Blank => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::message("Resource ID is required")),
            ))
        }
        IdOutcome::Found(_) => true,
        IdOutcome::New(_) => false,
    };

    let Some(resource) = session.draft().cloned() else {
        return Err(server_error("lookup produced no draft"));
    };

    Ok(Json(LookupResponse {
        found,
        state: session.state().clone(),
        resource,
        visibility: session.visibility(),
        status: session.status_line(),
        submit_label: session.submit_label(),
    }))
}

/// GET `/api/fields` - Field visibility for a kind and base flag.
///
/// Query parameters:
/// - `kind`: `object`, `container` or empty
/// - `base`: `true` or `false` (default: false)
pub async fn api_fields(Query(params): Query<FieldsQuery>) -> ApiResult<FieldVisibility> {
    let kind = ResourceKind::parse_optional(&params.kind).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message(e)),
        )
    })?;
    Ok(Json(visible_fields(kind, params.base)))
}

/// GET `/api/parents` - Containers for the parent picker.
pub async fn api_parents(State(state): State<Arc<AppState>>) -> ApiResult<Vec<ParentOption>> {
    let known = state.store.read().await.list().map_err(server_error)?;
    Ok(Json(parent_options(&known)))
}

/// POST `/api/resources` - Validate and save a resource.
///
/// Validation and the save happen under one write lock.
pub async fn api_submit(
    State(state): State<Arc<AppState>>,
    Json(submitted): Json<Resource>,
) -> ApiResult<SubmitResponse> {
    let mut store = state.store.write().await;

    let outcome = save_resource(&mut *store, &submitted).map_err(|e| match e {
        ManagerError::Invalid(reason) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::invalid(reason)),
        ),
        ManagerError::Storage(e) => server_error(e),
    })?;

    Ok(Json(SubmitResponse {
        was_update: outcome.was_update,
        message: outcome.message(),
        resource: outcome.resource,
    }))
}

/// GET `/api/scan` - Simulate a barcode scan.
pub async fn api_scan(State(state): State<Arc<AppState>>) -> Json<ScanResponse> {
    let scanner = SimulatedScanner::from_config(&state.scanner);
    let generator = SyntheticIdGenerator::from_config(&state.scanner);

    let scanned = scan_with_fallback(&scanner, &generator).await;
    let synthetic = matches!(scanned, ScannedId::Synthetic(_));

    Json(ScanResponse {
        id: scanned.into_id(),
        synthetic,
    })
}
