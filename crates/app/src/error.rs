use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalogo_core::types::ErrorBody;

pub const MSG_NOT_FOUND: &str = "Producto no encontrado";
pub const MSG_CREATE_FAILED: &str = "Error al crear el producto";
pub const MSG_UPDATE_FAILED: &str = "Error al actualizar el producto";
pub const MSG_INTERNAL: &str = "Error interno del servidor";

/// Failure returned by a handler, rendered as `{"error": message}`.
///
/// The message is fixed per operation; causes are logged, never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND)
    }

    pub fn create_failed() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_CREATE_FAILED)
    }

    pub fn update_failed() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_UPDATE_FAILED)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}
