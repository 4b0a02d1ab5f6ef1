use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::{error, warn};

use catalogo_core::types::Product;
use catalogo_core::wire::{CreateProductoRequest, UpdateProductoRequest};
use catalogo_storage::ProductError;

use crate::error::ApiError;
use crate::router::AppState;

/// `GET /productos`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let start = Instant::now();
    let result = state.storage().products().list().await.map_err(|err| {
        error!(stage = "http", op = "list", error = %err, "failed to list productos");
        ApiError::internal()
    });
    observe("list", start, &result);
    result.map(Json)
}

/// `GET /productos/:codigo`
pub async fn get_by_codigo(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let start = Instant::now();
    let result = match state.storage().products().find_by_codigo(&codigo).await {
        Ok(Some(product)) => Ok(product),
        Ok(None) => Err(ApiError::not_found()),
        Err(err) => {
            error!(stage = "http", op = "get", %codigo, error = %err, "failed to load producto");
            Err(ApiError::internal())
        }
    };
    observe("get", start, &result);
    result.map(Json)
}

/// `POST /productos`
///
/// Every failure, including a malformed body, is reported with the same
/// client-error message.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let start = Instant::now();
    let result = create_inner(&state, payload).await;
    observe("create", start, &result);
    result.map(|product| (StatusCode::CREATED, Json(product)))
}

async fn create_inner(
    state: &AppState,
    payload: Result<Json<CreateProductoRequest>, JsonRejection>,
) -> Result<Product, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(stage = "http", op = "create", error = %rejection, "rejected body");
        ApiError::create_failed()
    })?;
    let draft = request.into_draft().map_err(|err| {
        warn!(stage = "http", op = "create", error = %err, "invalid payload");
        ApiError::create_failed()
    })?;

    state
        .storage()
        .products()
        .insert(&draft)
        .await
        .map_err(|err| {
            log_write_failure("create", &err);
            ApiError::create_failed()
        })
}

/// `PUT /productos`
///
/// The row is addressed by the `id` field of the body, not by the path.
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<UpdateProductoRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let start = Instant::now();
    let result = update_inner(&state, payload).await;
    observe("update", start, &result);
    result.map(Json)
}

async fn update_inner(
    state: &AppState,
    payload: Result<Json<UpdateProductoRequest>, JsonRejection>,
) -> Result<Product, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(stage = "http", op = "update", error = %rejection, "rejected body");
        ApiError::update_failed()
    })?;
    let (id, draft) = request.into_parts().map_err(|err| {
        warn!(stage = "http", op = "update", error = %err, "invalid payload");
        ApiError::update_failed()
    })?;

    state
        .storage()
        .products()
        .update(id, &draft)
        .await
        .map_err(|err| {
            log_write_failure("update", &err);
            ApiError::update_failed()
        })
}

fn log_write_failure(op: &'static str, err: &ProductError) {
    match err {
        ProductError::NotFound(_) | ProductError::DuplicateCodigo => {
            warn!(stage = "http", op, error = %err, "write rejected by storage")
        }
        ProductError::Database(_) => {
            error!(stage = "http", op, error = %err, "write failed")
        }
    }
}

/// Registers help text for the per-request series recorded by [`observe`].
pub fn describe_metrics() {
    describe_counter!(
        "productos_requests_total",
        "Count of product API requests, labelled by operation and result"
    );
    describe_histogram!(
        "productos_request_seconds",
        "Latency in seconds of product API requests, labelled by operation"
    );
}

fn observe<T>(op: &'static str, start: Instant, result: &Result<T, ApiError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) if err.status().is_client_error() => "rejected",
        Err(_) => "error",
    };
    counter!("productos_requests_total", "op" => op, "result" => outcome).increment(1);
    histogram!("productos_request_seconds", "op" => op).record(start.elapsed().as_secs_f64());
}
