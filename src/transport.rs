//! # Wire Dispatch
//!
//! [`Transport`] is the dispatch contract consumed by the builders;
//! [`HttpTransport`] is the reqwest implementation used by a real
//! [`Database`](crate::Database). Tests substitute their own implementation
//! to capture dispatched specs and replay canned responses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::builder::document::{MutationKind, MutationPayload};
use crate::config::DatabaseConfig;
use crate::error::{ClientError, ClientResult};
use crate::spec::QuerySpec;

/// Dispatch contract between the builders and the wire
///
/// One call is one self-contained request; there is no retry, caching, or
/// ordering guarantee across calls. Transport failures of any kind (network
/// error, non-success status, malformed response body) surface as a single
/// [`ClientError`] to the caller of the terminal operation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST the serialized spec to the database endpoint and return the
    /// decoded response envelope
    async fn query(&self, spec: &QuerySpec) -> ClientResult<Value>;

    /// PUT an insert payload to `<endpoint>/<collection>` (with `/batch`
    /// appended for batch inserts) and return the decoded response body
    async fn insert(
        &self,
        collection: &str,
        kind: MutationKind,
        payload: &MutationPayload,
    ) -> ClientResult<Value>;
}

/// HTTP transport backed by reqwest
///
/// The client is built once per database connection with the configured
/// timeout and a default `Authorization: Bearer` header; builders created
/// from the same connection share it but hold no other common state.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Build the HTTP client for the given connection configuration
    ///
    /// Fails if the endpoint is not a valid URL or the token cannot be
    /// carried in a header.
    pub fn new(config: &DatabaseConfig) -> ClientResult<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ClientError::config_error(format!("Invalid endpoint URL: {e}")))?;

        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| ClientError::config_error(format!("Invalid API token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("lunaql-rust/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn mutation_url(&self, collection: &str, kind: MutationKind) -> ClientResult<Url> {
        let url = format!(
            "{}/{}{}",
            self.endpoint.as_str().trim_end_matches('/'),
            collection,
            kind.path_suffix()
        );
        Url::parse(&url)
            .map_err(|e| ClientError::config_error(format!("Invalid collection URL '{url}': {e}")))
    }

    async fn send_json<B>(&self, method: Method, url: Url, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        debug!("Making {} request to: {}", method, url);

        let response = self
            .client
            .request(method.clone(), url)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let value = response.json().await?;
            debug!("{} request successful", method);
            Ok(value)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("{} request failed: {} - {}", method, status, message);
            Err(ClientError::api_error(status.as_u16(), message))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn query(&self, spec: &QuerySpec) -> ClientResult<Value> {
        self.send_json(Method::POST, self.endpoint.clone(), spec).await
    }

    async fn insert(
        &self,
        collection: &str,
        kind: MutationKind,
        payload: &MutationPayload,
    ) -> ClientResult<Value> {
        let url = self.mutation_url(collection, kind)?;
        self.send_json(Method::PUT, url, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> HttpTransport {
        let config = DatabaseConfig::new("https://eu-1.lunaql.com/db/test", "token");
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn test_invalid_endpoint_is_a_config_error() {
        let config = DatabaseConfig::new("not a url", "token");
        let result = HttpTransport::new(&config);
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }

    #[test]
    fn test_single_mutation_url_targets_the_collection() {
        let url = transport()
            .mutation_url("users", MutationKind::Document)
            .unwrap();
        assert_eq!(url.as_str(), "https://eu-1.lunaql.com/db/test/users");
    }

    #[test]
    fn test_batch_mutation_url_gets_batch_suffix() {
        let url = transport()
            .mutation_url("users", MutationKind::Documents)
            .unwrap();
        assert_eq!(url.as_str(), "https://eu-1.lunaql.com/db/test/users/batch");
    }
}
