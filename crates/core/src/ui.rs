//! View state of the catalog client as a reducer.
//!
//! [`UiState::dispatch`] is the only way to change state. When an action
//! needs the network it returns an [`Effect`]; the driver performs it and
//! dispatches the matching completion action (`ListLoaded`, `SearchResolved`,
//! `Created`, `Updated`). Validation failures never produce an effect.

use crate::form::{CreateField, CreateForm, UpdateField, UpdateForm};
use crate::types::Product;
use crate::wire::{CreateProductoRequest, UpdateProductoRequest};

pub const MSG_EMPTY_SEARCH: &str = "Por favor ingrese un código para buscar.";
pub const MSG_NOT_FOUND: &str = "Producto no encontrado";

/// Screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    List,
    Search,
    Create,
    Update,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::List,
        View::Search,
        View::Create,
        View::Update,
    ];

    /// Menu keyword for the view.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "inicio",
            Self::List => "listar",
            Self::Search => "buscar",
            Self::Create => "crear",
            Self::Update => "actualizar",
        }
    }
}

/// Why a code lookup produced no product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The server answered with a non-success status.
    NotFound,
    /// The request never got an answer; carries the transport error text.
    Unreachable(String),
}

/// User events and network completions.
///
/// Failed completions carry the message to show next to the error prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(View),
    ReturnHome,
    ListLoaded(Result<Vec<Product>, String>),
    SetSearchCode(String),
    SubmitSearch,
    SearchResolved(Result<Product, SearchFailure>),
    SetCreateField(CreateField, String),
    SubmitCreate,
    Created(Result<Product, String>),
    SetUpdateField(UpdateField, String),
    SubmitUpdate,
    Updated(Result<Product, String>),
}

/// Request the driver must perform on behalf of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchList,
    Search(String),
    Create(CreateProductoRequest),
    Update(UpdateProductoRequest),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    view: View,
    productos: Vec<Product>,
    search_code: String,
    search_result: Option<Product>,
    create_form: CreateForm,
    update_form: UpdateForm,
    error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn productos(&self) -> &[Product] {
        &self.productos
    }

    pub fn search_code(&self) -> &str {
        &self.search_code
    }

    pub fn search_result(&self) -> Option<&Product> {
        self.search_result.as_ref()
    }

    pub fn create_form(&self) -> &CreateForm {
        &self.create_form
    }

    pub fn update_form(&self) -> &UpdateForm {
        &self.update_form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies an action and returns the request it requires, if any.
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Navigate(View::Home) | Action::ReturnHome => {
                self.return_home();
                None
            }
            Action::Navigate(view) => {
                // Other screens are only reachable from the menu.
                if self.view != View::Home {
                    return None;
                }
                self.enter(view)
            }
            Action::ListLoaded(Ok(productos)) => {
                self.productos = productos;
                None
            }
            Action::ListLoaded(Err(message)) => {
                self.error = Some(message);
                None
            }
            Action::SetSearchCode(code) => {
                self.search_code = code;
                None
            }
            Action::SubmitSearch => {
                if self.search_code.is_empty() {
                    self.error = Some(MSG_EMPTY_SEARCH.to_string());
                    return None;
                }
                Some(Effect::Search(self.search_code.clone()))
            }
            Action::SearchResolved(outcome) => {
                match outcome {
                    Ok(product) => {
                        self.search_result = Some(product);
                        self.error = None;
                    }
                    Err(failure) => {
                        self.search_result = None;
                        self.error = Some(match failure {
                            SearchFailure::NotFound => MSG_NOT_FOUND.to_string(),
                            SearchFailure::Unreachable(message) => message,
                        });
                    }
                }
                self.search_code.clear();
                None
            }
            Action::SetCreateField(field, value) => {
                self.create_form.set(field, value);
                None
            }
            Action::SubmitCreate => match self.create_form.validate() {
                Ok(body) => Some(Effect::Create(body)),
                Err(err) => {
                    self.error = Some(err.to_string());
                    None
                }
            },
            Action::Created(Ok(product)) => {
                self.productos.push(product);
                self.create_form = CreateForm::default();
                self.error = None;
                self.enter(View::List)
            }
            Action::Created(Err(message)) => {
                self.error = Some(format!("Error al crear producto: {message}"));
                None
            }
            Action::SetUpdateField(field, value) => {
                self.update_form.set(field, value);
                None
            }
            Action::SubmitUpdate => match self.update_form.validate() {
                Ok(body) => Some(Effect::Update(body)),
                Err(err) => {
                    self.error = Some(err.to_string());
                    None
                }
            },
            Action::Updated(Ok(product)) => {
                if let Some(existing) = self.productos.iter_mut().find(|p| p.id == product.id) {
                    *existing = product;
                }
                self.update_form = UpdateForm::default();
                self.error = None;
                self.enter(View::List)
            }
            Action::Updated(Err(message)) => {
                self.error = Some(format!("Error al actualizar producto: {message}"));
                None
            }
        }
    }

    fn enter(&mut self, view: View) -> Option<Effect> {
        self.view = view;
        match view {
            View::List => Some(Effect::FetchList),
            _ => None,
        }
    }

    fn return_home(&mut self) {
        let productos = std::mem::take(&mut self.productos);
        *self = Self {
            productos,
            ..Self::default()
        };
    }
}
