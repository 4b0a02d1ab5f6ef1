use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use catalogo_core::types::{ErrorBody, Product};
use catalogo_core::wire::{CreateProductoRequest, UpdateProductoRequest};

/// Client for the `/productos` endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`. A trailing slash is added when
    /// missing so that relative joins keep the base path.
    pub fn new(mut base_url: Url, http: Client) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    /// `GET /productos`
    pub async fn list_productos(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.http.get(self.productos_url()?).send().await?;
        parse_json(response).await
    }

    /// `GET /productos/{codigo}`; the code is percent-encoded as one segment.
    pub async fn fetch_producto(&self, codigo: &str) -> Result<Product, ClientError> {
        let response = self.http.get(self.producto_url(codigo)?).send().await?;
        parse_json(response).await
    }

    /// `POST /productos`
    pub async fn create_producto(
        &self,
        body: &CreateProductoRequest,
    ) -> Result<Product, ClientError> {
        let response = self
            .http
            .post(self.productos_url()?)
            .json(body)
            .send()
            .await?;
        parse_json(response).await
    }

    /// `PUT /productos`
    pub async fn update_producto(
        &self,
        body: &UpdateProductoRequest,
    ) -> Result<Product, ClientError> {
        let response = self
            .http
            .put(self.productos_url()?)
            .json(body)
            .send()
            .await?;
        parse_json(response).await
    }

    fn productos_url(&self) -> Result<Url, ClientError> {
        Ok(self.base_url.join("productos")?)
    }

    fn producto_url(&self, codigo: &str) -> Result<Url, ClientError> {
        let mut url = self.productos_url()?;
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl)?
            .push(codigo);
        Ok(url)
    }
}

/// Errors produced by [`ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build url: {0}")]
    Url(#[from] url::ParseError),
    #[error("base url cannot carry path segments")]
    BaseUrl,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}")]
    Api {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ClientError {
    /// Text suitable for the UI error slot: the server's `error` field when
    /// it sent one, otherwise the error itself.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the server answered at all, as opposed to the request failing
    /// before a status was received.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

async fn parse_json<T>(response: Response) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error);
        return Err(ClientError::Api { status, message });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method;
    use serde_json::json;

    fn client(server: &MockServer) -> ApiClient {
        let base = Url::parse(&server.url("/api")).expect("url");
        ApiClient::new(base, Client::builder().build().expect("client"))
    }

    #[tokio::test]
    async fn list_parses_products() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/productos");
                then.status(200).json_body(json!([
                    {"id": 1, "nombre": "Mouse", "codigo": "M-001", "precio": 19.99}
                ]));
            })
            .await;

        let productos = client(&server).list_productos().await.expect("list");
        mock.assert_async().await;
        assert_eq!(productos.len(), 1);
        assert_eq!(productos[0].codigo, "M-001");
    }

    #[test]
    fn producto_url_encodes_codigo_as_one_segment() {
        let api = ApiClient::new(
            Url::parse("http://localhost:8080/api").expect("url"),
            Client::new(),
        );
        let url = api.producto_url("A/B 1").expect("url");
        assert_eq!(url.as_str(), "http://localhost:8080/api/productos/A%2FB%201");
    }

    #[tokio::test]
    async fn fetch_returns_matching_product() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/productos/M-001");
                then.status(200).json_body(json!(
                    {"id": 1, "nombre": "Mouse", "codigo": "M-001", "precio": 19.99}
                ));
            })
            .await;

        let product = client(&server).fetch_producto("M-001").await.expect("fetch");
        mock.assert_async().await;
        assert_eq!(product.codigo, "M-001");
    }

    #[tokio::test]
    async fn not_found_surfaces_server_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/productos/NOPE");
                then.status(404)
                    .json_body(json!({"error": "Producto no encontrado"}));
            })
            .await;

        let err = client(&server)
            .fetch_producto("NOPE")
            .await
            .expect_err("should error");
        match &err {
            ClientError::Api { status, message } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(message.as_deref(), Some("Producto no encontrado"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.user_message(), "Producto no encontrado");
        assert!(err.is_status());
    }

    #[tokio::test]
    async fn create_posts_numeric_price() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::POST)
                    .path("/api/productos")
                    .json_body(json!({"nombre": "Mouse", "codigo": "M-001", "precio": 19.99}));
                then.status(201).json_body(json!(
                    {"id": 1, "nombre": "Mouse", "codigo": "M-001", "precio": 19.99}
                ));
            })
            .await;

        let product = client(&server)
            .create_producto(&CreateProductoRequest::new("Mouse", "M-001", 19.99))
            .await
            .expect("create");
        mock.assert_async().await;
        assert_eq!(product.id, 1);
    }

    #[tokio::test]
    async fn update_puts_body_with_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(Method::PUT).path("/api/productos").json_body(json!({
                    "id": "1",
                    "nombre": "Mouse Pro",
                    "codigo": "M-001",
                    "precio": 24.5
                }));
                then.status(200).json_body(json!(
                    {"id": 1, "nombre": "Mouse Pro", "codigo": "M-001", "precio": 24.5}
                ));
            })
            .await;

        let product = client(&server)
            .update_producto(&UpdateProductoRequest::new("1", "Mouse Pro", "M-001", 24.5))
            .await
            .expect("update");
        mock.assert_async().await;
        assert_eq!(product.nombre, "Mouse Pro");
    }

    #[tokio::test]
    async fn refused_connection_is_not_a_status() {
        let api = ApiClient::new(Url::parse("http://127.0.0.1:1/").expect("url"), Client::new());
        let err = api.list_productos().await.expect_err("no listener on port 1");
        assert!(matches!(err, ClientError::Http(_)));
        assert!(!err.is_status());
    }

    #[tokio::test]
    async fn error_without_json_body_has_no_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/productos");
                then.status(502).body("bad gateway");
            })
            .await;

        let err = client(&server).list_productos().await.expect_err("error");
        assert!(matches!(err, ClientError::Api { message: None, .. }));
        assert_eq!(err.user_message(), "unexpected status 502 Bad Gateway");
    }
}
