//! Networked [`TrelloApi`] implementation.

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, StatusCode};

use super::{Params, RequestError, TrelloApi};

/// Public Trello API endpoint.
pub const DEFAULT_HOST: &str = "https://api.trello.com";

/// Builds and dispatches authenticated requests against a Trello host.
///
/// Every request carries the configured `key` and `token` as query
/// parameters. Clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    host: String,
    key: String,
    token: String,
}

impl Client {
    /// Creates a client with a default reqwest client. Performs no I/O and no
    /// validation of its inputs.
    pub fn new(host: impl Into<String>, key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), host, key, token)
    }

    /// Creates a client on top of a preconfigured reqwest client, e.g. one
    /// with a timeout or a custom user agent.
    pub fn with_http_client(
        http: reqwest::Client,
        host: impl Into<String>,
        key: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            host: host.into(),
            key: key.into(),
            token: token.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Merges the caller's parameters with the credentials. The credentials
    /// always win over caller-supplied `key`/`token` entries.
    fn authenticated(&self, params: Option<Params>) -> Params {
        let mut params = params.unwrap_or_default();
        params.insert("key".to_string(), self.key.clone());
        params.insert("token".to_string(), self.token.clone());
        params
    }

    #[tracing::instrument(skip(self, params))]
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Option<Params>,
    ) -> Result<Vec<u8>, RequestError> {
        let params = self.authenticated(params);
        let target = format!("{}{}", self.host, path);
        debug!("{} {}...", method, target);

        let request = self
            .http
            .request(method.clone(), &target)
            .query(&params)
            .build()
            .map_err(|e| RequestError::transport(&method, &target, e))?;
        let url = request.url().to_string();

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| RequestError::transport(&method, &url, e))?;

        // Anything but exactly 200 is a failure; dropping the response here
        // releases the connection.
        let status = response.status();
        if status != StatusCode::OK {
            debug!("{} {} answered {}", method, target, status);
            return Err(RequestError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::transport(&method, &url, e))?;

        debug!("{} {} returned {} bytes", method, target, body.len());
        Ok(body.to_vec())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TrelloApi for Client {
    async fn get(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError> {
        self.request(Method::GET, path, params).await
    }

    async fn post(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError> {
        self.request(Method::POST, path, params).await
    }

    async fn put(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError> {
        self.request(Method::PUT, path, params).await
    }

    async fn delete(&self, path: &str, params: Option<Params>) -> Result<Vec<u8>, RequestError> {
        self.request(Method::DELETE, path, params).await
    }
}
