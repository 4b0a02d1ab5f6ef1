use serde::{Deserialize, Serialize};

/// Catalog entry as persisted in the `producto` table and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    pub codigo: String,
    pub precio: f64,
}

impl Product {
    /// Returns the mutable fields of the product.
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            nombre: self.nombre.clone(),
            codigo: self.codigo.clone(),
            precio: self.precio,
        }
    }
}

/// Mutable product fields with the price already parsed.
///
/// Used for both inserts and full overwrites; there is no partial patch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub nombre: String,
    pub codigo: String,
    pub precio: f64,
}

impl ProductDraft {
    pub fn new(nombre: impl Into<String>, codigo: impl Into<String>, precio: f64) -> Self {
        Self {
            nombre: nombre.into(),
            codigo: codigo.into(),
            precio,
        }
    }
}

/// JSON body returned by the API for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_serializes_with_numeric_price() {
        let product = Product {
            id: 1,
            nombre: "Mouse".to_string(),
            codigo: "M-001".to_string(),
            precio: 19.99,
        };

        let value = serde_json::to_value(&product).expect("serialize");
        assert_eq!(
            value,
            json!({"id": 1, "nombre": "Mouse", "codigo": "M-001", "precio": 19.99})
        );
    }

    #[test]
    fn whole_price_keeps_fraction_free_representation() {
        let product = Product {
            id: 1,
            nombre: "Mouse Pro".to_string(),
            codigo: "M-001".to_string(),
            precio: 24.50,
        };

        let text = serde_json::to_string(&product).expect("serialize");
        assert!(text.contains("\"precio\":24.5"));
    }

    #[test]
    fn error_body_uses_error_key() {
        let body = ErrorBody::new("Producto no encontrado");
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value, json!({"error": "Producto no encontrado"}));
    }
}
