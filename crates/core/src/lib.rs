//! Domain layer shared by the HTTP service and the client.
//!
//! Nothing in this crate performs I/O: storage lives in `catalogo-storage`,
//! the network side of the UI lives in `catalogo-client`.
pub mod form;
pub mod types;
pub mod ui;
pub mod wire;

pub use form::{parse_price, CreateField, CreateForm, FormError, UpdateField, UpdateForm};
pub use types::{ErrorBody, Product, ProductDraft};
pub use ui::{Action, Effect, SearchFailure, UiState, View};
pub use wire::{CreateProductoRequest, NumberOrText, PayloadError, UpdateProductoRequest};
