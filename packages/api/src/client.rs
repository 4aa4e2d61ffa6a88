//! # HTTP client wrapper
//!
//! [`Transport`] is the seam every view and the session store talk through:
//! four async operations keyed by a backend-relative path. [`HttpClient`] is
//! the production implementation on top of `reqwest`; [`crate::MemoryBackend`]
//! is the in-memory one used by tests.
//!
//! | Operation | Method | Failure message |
//! |-----------|--------|-----------------|
//! | [`fetch`](Transport::fetch) | `GET` | "Erro ao carregar dados" |
//! | [`create`](Transport::create) | `POST` | "Erro ao salvar dados" |
//! | [`replace`](Transport::replace) | `PUT` | "Erro ao atualizar dados" |
//! | [`remove`](Transport::remove) | `DELETE` | "Erro ao deletar dados" |
//!
//! The session lives in a backend cookie. Natively `reqwest` keeps it in its
//! cookie store; in the browser requests are sent with `credentials: include`
//! so a cross-origin backend still receives it.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{ApiError, Operation};

/// Async access to the backend's JSON endpoints.
pub trait Transport {
    fn fetch<R: DeserializeOwned>(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<R, ApiError>>;

    fn create<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> impl Future<Output = Result<R, ApiError>>;

    fn replace<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> impl Future<Output = Result<R, ApiError>>;

    fn remove<R: DeserializeOwned>(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<R, ApiError>>;
}

/// `reqwest`-backed [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Setup(e.to_string()))?;
        #[cfg(target_arch = "wasm32")]
        let http = reqwest::Client::new();

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, op: Operation, path: &str) -> reqwest::RequestBuilder {
        let url = self.config.url(path);
        tracing::debug!("{} {}", op.method(), url);
        let request = match op {
            Operation::Fetch => self.http.get(url),
            Operation::Create => self.http.post(url),
            Operation::Replace => self.http.put(url),
            Operation::Remove => self.http.delete(url),
        };
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();
        request
    }

    async fn send<R: DeserializeOwned>(
        &self,
        op: Operation,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<R, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", op.method(), path, e);
            ApiError::Network {
                op,
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are `{success: false, error: "..."}` when the
            // backend produced them itself.
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("error")?.as_str().map(str::to_owned));
            tracing::warn!("{} {} returned {}", op.method(), path, status);
            return Err(ApiError::Status {
                op,
                status: status.as_u16(),
                message,
            });
        }

        response.json::<R>().await.map_err(|e| ApiError::Decode {
            op,
            reason: e.to_string(),
        })
    }
}

impl Transport for HttpClient {
    async fn fetch<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.request(Operation::Fetch, path);
        self.send(Operation::Fetch, path, request).await
    }

    async fn create<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = self.request(Operation::Create, path).json(body);
        self.send(Operation::Create, path, request).await
    }

    async fn replace<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = self.request(Operation::Replace, path).json(body);
        self.send(Operation::Replace, path, request).await
    }

    async fn remove<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.request(Operation::Remove, path);
        self.send(Operation::Remove, path, request).await
    }
}
