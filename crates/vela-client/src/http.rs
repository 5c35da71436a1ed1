//! # HTTP Transport
//!
//! The one place that builds requests and reads responses. Every resource
//! client goes through [`ApiClient`]; nothing above this module touches
//! `reqwest` types.
//!
//! ## Error Bodies
//! The backend reports failures as `{"detail": ...}` where `detail` is
//! usually a string but can be a structured validation payload. Decoding
//! is defensive: whatever is there becomes the `detail` of
//! [`ClientError::Remote`], and a body that is not JSON at all is carried
//! as plain text.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Shared HTTP client with base URL and bearer auth.
///
/// Cheap to clone; all clones share the connection pool and the token, so
/// a login through the session is visible to every resource client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Builds a client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(ApiClient {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                token: RwLock::new(None),
            }),
        })
    }

    // -------------------------------------------------------------------------
    // Token management
    // -------------------------------------------------------------------------

    /// Installs the bearer token used by all subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = Some(token.into());
        }
    }

    /// Drops the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.inner.token.write() {
            *guard = None;
        }
    }

    /// True when a token is installed.
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn bearer(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|t| format!("Bearer {t}")))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        }
    }

    // -------------------------------------------------------------------------
    // Verbs
    // -------------------------------------------------------------------------

    /// GET, decoding a JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_with_query(path, &[]).await
    }

    /// GET with query parameters, decoding a JSON body.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        debug!(path, params = query.len(), "GET");
        let request = self.authorize(self.inner.http.get(self.url(path)).query(query));
        Self::handle_response(request.send().await?).await
    }

    /// POST with a JSON body, decoding a JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "POST");
        let request = self.authorize(self.inner.http.post(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// POST with a form-urlencoded body. The login endpoint wants this
    /// instead of JSON.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> ClientResult<T> {
        debug!(path, "POST (form)");
        let request = self.authorize(self.inner.http.post(self.url(path)).form(form));
        Self::handle_response(request.send().await?).await
    }

    /// POST with a multipart body (file uploads).
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        debug!(path, "POST (multipart)");
        let request = self.authorize(self.inner.http.post(self.url(path)).multipart(form));
        Self::handle_response(request.send().await?).await
    }

    /// PUT with a JSON body, decoding a JSON response.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "PUT");
        let request = self.authorize(self.inner.http.put(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    /// PATCH with an empty JSON body (toggle-style endpoints).
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "PATCH");
        let request = self.authorize(
            self.inner
                .http
                .patch(self.url(path))
                .json(&serde_json::json!({})),
        );
        Self::handle_response(request.send().await?).await
    }

    /// DELETE, ignoring the response body.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        debug!(path, "DELETE");
        let request = self.authorize(self.inner.http.delete(self.url(path)));
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::remote_error(status, response.text().await?));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Response handling
    // -------------------------------------------------------------------------

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::remote_error(status, response.text().await?));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }

    fn remote_error(status: StatusCode, body: String) -> ClientError {
        if status == StatusCode::UNAUTHORIZED {
            return ClientError::Unauthorized;
        }

        ClientError::Remote {
            status: status.as_u16(),
            detail: extract_detail(&body),
        }
    }
}

/// Pulls the server's message out of a `{"detail": ...}` error body.
///
/// `detail` is a string on ordinary failures but a structured payload on
/// validation errors; anything non-string is re-serialized so the message
/// survives. A body that is not JSON at all is used as-is.
fn extract_detail(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(message)),
        }) => Some(message),
        Ok(ErrorBody {
            detail: Some(other),
        }) => Some(other.to_string()),
        Ok(ErrorBody { detail: None }) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
