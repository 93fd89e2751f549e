//! # Database Entry Point
//!
//! [`Database`] is the top-level handle to one LunaQL database: it owns the
//! connection configuration and the transport, and hands out independent
//! builders for queries and inserts.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::builder::{CollectionBuilder, DocumentBuilder, MutationKind};
use crate::config::DatabaseConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpTransport, Transport};

/// Handle to one LunaQL database
///
/// Builders created from the same handle share the HTTP client but no other
/// state; every query chain is isolated.
///
/// # Examples
///
/// ```rust,no_run
/// use lunaql::{ClauseDsl, Database, DatabaseConfig};
///
/// # async fn run() -> lunaql::ClientResult<()> {
/// let db = Database::new(DatabaseConfig::new(
///     "https://eu-1.lunaql.com/db/test",
///     "secret-token",
/// ))?;
///
/// let post = db
///     .query()
///     .from("posts")
///     .where_("slug", "=", "hello-world")
///     .fetch_first()
///     .await?;
///
/// let receipt = db
///     .insert(serde_json::json!({"title": "Next post"}), None)?
///     .into_collection("posts")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Database {
    config: DatabaseConfig,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("endpoint", &self.config.endpoint)
            .field("timeout_ms", &self.config.timeout_ms)
            .finish()
    }
}

impl Database {
    /// Connect to a database with the given configuration
    ///
    /// Builds the HTTP transport up front; fails on an invalid endpoint URL
    /// or token. No network activity happens until a terminal call.
    pub fn new(config: DatabaseConfig) -> ClientResult<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self { config, transport })
    }

    /// Connect with a caller-supplied transport
    ///
    /// This is the seam for tests and alternative wire implementations.
    pub fn with_transport(config: DatabaseConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Connection configuration
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Create query
    pub fn query(&self) -> CollectionBuilder {
        CollectionBuilder::new(Arc::clone(&self.transport))
    }

    /// Insert a single document
    ///
    /// Fails fast, before any network activity, if given a list-shaped
    /// value — use [`insert_many`](Database::insert_many) for batches.
    pub fn insert<T: Serialize>(
        &self,
        data: T,
        options: Option<Value>,
    ) -> ClientResult<DocumentBuilder> {
        let data = serde_json::to_value(data)?;
        if data.is_array() {
            return Err(ClientError::invalid_input(
                "insert takes a single document; use insert_many for a list",
            ));
        }

        Ok(self.document_builder(MutationKind::Document, data, options))
    }

    /// Insert a batch of documents
    ///
    /// Fails fast unless given a non-empty list of documents.
    pub fn insert_many<T: Serialize>(
        &self,
        data: T,
        options: Option<Value>,
    ) -> ClientResult<DocumentBuilder> {
        let data = serde_json::to_value(data)?;
        match data.as_array() {
            Some(documents) if !documents.is_empty() => {}
            _ => {
                return Err(ClientError::invalid_input(
                    "insert_many takes a non-empty list of documents",
                ))
            }
        }

        Ok(self.document_builder(MutationKind::Documents, data, options))
    }

    fn document_builder(
        &self,
        kind: MutationKind,
        data: Value,
        options: Option<Value>,
    ) -> DocumentBuilder {
        let options = options.unwrap_or_else(|| Value::Object(Default::default()));
        DocumentBuilder::new(Arc::clone(&self.transport), kind, data, options)
    }
}
