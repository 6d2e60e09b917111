//! The shared JSON request layer.

use crate::{
    storage::{self, TokenStore},
    ApiError,
};
use reqwest::{header, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::{
    sync::{Arc, RwLock},
    time::Duration,
};
use url::Url;

/// How long an ordinary JSON call may take before it is classified as a
/// timeout. Uploads use their own, longer limit.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One configured HTTP client for the whole application.
///
/// Every JSON call funnels through here so the cross-cutting behaviour lives
/// in one place: the bearer token is read fresh from the [`TokenStore`] and
/// attached per request, failures are classified into [`ApiError`], and
/// successful bodies are parsed as JSON. The layer never retries, never
/// queues and never caches.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    default_auth: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the given API origin, e.g.
    /// `https://api.medevents.example/api`.
    pub fn new(
        base_url: &str,
        store: Arc<dyn TokenStore>,
    ) -> Result<ApiClient, ApiError> {
        ApiClient::with_timeout(base_url, store, DEFAULT_TIMEOUT)
    }

    /// Like [`ApiClient::new`] but with a caller-chosen request timeout.
    pub fn with_timeout(
        base_url: &str,
        store: Arc<dyn TokenStore>,
        timeout: Duration,
    ) -> Result<ApiClient, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            ApiError::Validation(format!("invalid base URL \"{}\": {}", base_url, e))
        })?;

        let http = reqwest::Client::builder()
            .user_agent(crate::DEFAULT_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(Some(e)))?;

        Ok(ApiClient {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            store,
            default_auth: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    pub(crate) fn store(&self) -> &dyn TokenStore { &*self.store }

    /// Set or clear a fallback identity used only when the store holds no
    /// token. Passing `None` removes the header entirely.
    ///
    /// Flipping this while requests are in flight is racy; prefer letting
    /// the per-request store lookup do its job.
    pub fn set_auth_token(&self, token: Option<&str>) {
        let mut slot = self.default_auth.write().unwrap();
        match token {
            Some(token) if !token.is_empty() => {
                *slot = Some(token.to_string());
            },
            _ => {
                *slot = None;
            },
        }
    }

    /// The `Bearer <token>` value for the next request, if any.
    ///
    /// The store is consulted first so a token refreshed by a concurrent
    /// login is picked up immediately; the explicit default set through
    /// [`ApiClient::set_auth_token`] is only a fallback.
    pub(crate) fn bearer(&self) -> Option<String> {
        storage::resolve_token(&*self.store)
            .or_else(|| self.default_auth.read().unwrap().clone())
            .map(|token| format!("Bearer {}", token))
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.request(Method::POST, path)).await
    }

    pub(crate) async fn put<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(bearer) = self.bearer() {
            builder = builder.header(header::AUTHORIZATION, bearer);
        }

        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await.map_err(ApiError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_transport)?;
        log::trace!("Response ({}): {}", status, body);

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|_| ApiError::ParseFailure { body })
    }
}
