use thiserror::Error;

use crate::wire::{CreateProductoRequest, UpdateProductoRequest};

/// Parses a user supplied price.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected even
/// though `f64::from_str` accepts them.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Client-side validation failures. The messages are shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Todos los campos son obligatorios.")]
    MissingFields,
    #[error("Todos los campos son obligatorios para actualizar.")]
    MissingUpdateFields,
    #[error("El precio debe ser un número válido.")]
    InvalidPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Nombre,
    Codigo,
    Precio,
}

impl CreateField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "nombre" => Some(Self::Nombre),
            "codigo" => Some(Self::Codigo),
            "precio" => Some(Self::Precio),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Id,
    Nombre,
    Codigo,
    Precio,
}

impl UpdateField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "nombre" => Some(Self::Nombre),
            "codigo" => Some(Self::Codigo),
            "precio" => Some(Self::Precio),
            _ => None,
        }
    }
}

/// Text inputs of the create screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub nombre: String,
    pub codigo: String,
    pub precio: String,
}

impl CreateForm {
    pub fn set(&mut self, field: CreateField, value: String) {
        match field {
            CreateField::Nombre => self.nombre = value,
            CreateField::Codigo => self.codigo = value,
            CreateField::Precio => self.precio = value,
        }
    }

    /// Checks presence of every field and that the price is numeric, then
    /// builds the request body with the price as a number.
    pub fn validate(&self) -> Result<CreateProductoRequest, FormError> {
        if self.nombre.is_empty() || self.codigo.is_empty() || self.precio.is_empty() {
            return Err(FormError::MissingFields);
        }
        let precio = parse_price(&self.precio).ok_or(FormError::InvalidPrice)?;
        Ok(CreateProductoRequest::new(
            self.nombre.clone(),
            self.codigo.clone(),
            precio,
        ))
    }
}

/// Text inputs of the update screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateForm {
    pub id: String,
    pub nombre: String,
    pub codigo: String,
    pub precio: String,
}

impl UpdateForm {
    pub fn set(&mut self, field: UpdateField, value: String) {
        match field {
            UpdateField::Id => self.id = value,
            UpdateField::Nombre => self.nombre = value,
            UpdateField::Codigo => self.codigo = value,
            UpdateField::Precio => self.precio = value,
        }
    }

    /// Same checks as [`CreateForm::validate`] plus presence of `id`.
    ///
    /// The id is forwarded as typed; the server parses it.
    pub fn validate(&self) -> Result<UpdateProductoRequest, FormError> {
        if self.id.is_empty()
            || self.nombre.is_empty()
            || self.codigo.is_empty()
            || self.precio.is_empty()
        {
            return Err(FormError::MissingUpdateFields);
        }
        let precio = parse_price(&self.precio).ok_or(FormError::InvalidPrice)?;
        Ok(UpdateProductoRequest::new(
            self.id.clone(),
            self.nombre.clone(),
            self.codigo.clone(),
            precio,
        ))
    }
}
