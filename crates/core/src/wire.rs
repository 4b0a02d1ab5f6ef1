use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::parse_price;
use crate::types::ProductDraft;

/// Numeric field that callers may send either as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    /// Interprets the value as a finite floating point number.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64().filter(|value| value.is_finite()),
            Self::Text(text) => parse_price(text),
        }
    }

    /// Interprets the value as an integer identifier.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|value| value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT_INT)
                    .map(|value| value as i64)
            }),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

impl From<f64> for NumberOrText {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

impl From<i64> for NumberOrText {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<String> for NumberOrText {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for NumberOrText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Body of `POST /productos`.
///
/// Every field is optional on the wire; absence is reported by
/// [`CreateProductoRequest::into_draft`] rather than by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProductoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<NumberOrText>,
}

impl CreateProductoRequest {
    pub fn new(
        nombre: impl Into<String>,
        codigo: impl Into<String>,
        precio: impl Into<NumberOrText>,
    ) -> Self {
        Self {
            nombre: Some(nombre.into()),
            codigo: Some(codigo.into()),
            precio: Some(precio.into()),
        }
    }

    /// Converts the payload into storable fields, parsing the price.
    pub fn into_draft(self) -> Result<ProductDraft, PayloadError> {
        let nombre = self.nombre.ok_or(PayloadError::MissingField("nombre"))?;
        let codigo = self.codigo.ok_or(PayloadError::MissingField("codigo"))?;
        let precio = parse_field_f64(self.precio, "precio")?;
        Ok(ProductDraft {
            nombre,
            codigo,
            precio,
        })
    }
}

/// Body of `PUT /productos`. The row is addressed by `id` inside the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NumberOrText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<NumberOrText>,
}

impl UpdateProductoRequest {
    pub fn new(
        id: impl Into<NumberOrText>,
        nombre: impl Into<String>,
        codigo: impl Into<String>,
        precio: impl Into<NumberOrText>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            nombre: Some(nombre.into()),
            codigo: Some(codigo.into()),
            precio: Some(precio.into()),
        }
    }

    /// Splits the payload into the target id and the overwriting fields.
    pub fn into_parts(self) -> Result<(i64, ProductDraft), PayloadError> {
        let id = self
            .id
            .ok_or(PayloadError::MissingField("id"))?
            .to_i64()
            .ok_or(PayloadError::InvalidNumber("id"))?;
        let draft = CreateProductoRequest {
            nombre: self.nombre,
            codigo: self.codigo,
            precio: self.precio,
        }
        .into_draft()?;
        Ok((id, draft))
    }
}

fn parse_field_f64(value: Option<NumberOrText>, field: &'static str) -> Result<f64, PayloadError> {
    value
        .ok_or(PayloadError::MissingField(field))?
        .to_f64()
        .ok_or(PayloadError::InvalidNumber(field))
}

/// Reasons a request payload cannot be turned into product fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not a valid number")]
    InvalidNumber(&'static str),
}
