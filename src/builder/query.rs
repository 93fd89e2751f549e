//! Primary query builder and terminal operations.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::builder::ClauseDsl;
use crate::error::{ClientError, ClientResult};
use crate::spec::{Clause, ClauseMap, Operation, QuerySpec, Scope};
use crate::transport::Transport;

/// Builds and dispatches one query against a collection
///
/// Obtained from [`Database::query`](crate::Database::query) via
/// [`from`](crate::CollectionBuilder::from). Clause methods come from
/// [`ClauseDsl`]; terminal methods set the requested operation and dispatch
/// the accumulated spec in a single request.
///
/// Terminal methods consume the builder, so a second terminal call on the
/// same chain does not compile — each builder is consumed exactly once.
///
/// # Examples
///
/// ```rust,no_run
/// use lunaql::{ClauseDsl, Database, DatabaseConfig, Direction};
///
/// # async fn run() -> lunaql::ClientResult<()> {
/// let db = Database::new(DatabaseConfig::from_env()?)?;
///
/// let users = db
///     .query()
///     .from("users")
///     .where_("age", ">", 18)
///     .order_by("name", Direction::Asc)
///     .limit(10)
///     .fetch()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct QueryBuilder {
    spec: QuerySpec,
    transport: Arc<dyn Transport>,
}

impl QueryBuilder {
    pub(crate) fn new(transport: Arc<dyn Transport>, collection: &str) -> Self {
        Self {
            spec: QuerySpec::new(Scope::From, collection),
            transport,
        }
    }

    /// Raw accumulated query specification
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Delete documents in the collection
    pub async fn delete(self) -> ClientResult<Value> {
        self.dispatch(Operation::Delete).await
    }

    /// Count documents in the collection
    pub async fn count(self) -> ClientResult<Value> {
        self.dispatch(Operation::Count).await
    }

    /// Check if documents exist in the collection
    pub async fn exists(self) -> ClientResult<Value> {
        self.dispatch(Operation::Exists).await
    }

    /// Pluck a property from the collection
    ///
    /// Writes `listBy` when a non-empty property is given.
    pub async fn list(mut self, property: Option<&str>) -> ClientResult<Value> {
        self.spec.clauses_mut().apply(Clause::Do(Operation::List));
        if let Some(property) = property.filter(|p| !p.is_empty()) {
            self.spec
                .clauses_mut()
                .apply(Clause::ListBy(property.to_string()));
        }
        self.send().await
    }

    /// Fetch documents from the collection
    pub async fn fetch(self) -> ClientResult<Value> {
        self.dispatch(Operation::Fetch).await
    }

    /// Fetch the first document from the collection
    pub async fn fetch_first(self) -> ClientResult<Value> {
        self.dispatch(Operation::FetchFirst).await
    }

    /// Update documents matched by the accumulated clauses
    ///
    /// Writes the update payload as `data` and requests the updated document
    /// back (`do: fetchFirst` — the service has no separate update
    /// operation).
    pub async fn update<T: Serialize>(mut self, data: T) -> ClientResult<Value> {
        let data = serde_json::to_value(data)?;
        self.spec.clauses_mut().apply(Clause::Data(data));
        self.spec
            .clauses_mut()
            .apply(Clause::Do(Operation::FetchFirst));
        self.send().await
    }

    async fn dispatch(mut self, operation: Operation) -> ClientResult<Value> {
        self.spec.clauses_mut().apply(Clause::Do(operation));
        self.send().await
    }

    /// Dispatch the spec and unwrap the collection-named response field
    async fn send(self) -> ClientResult<Value> {
        debug!(collection = self.spec.collection(), "dispatching query");

        let envelope = self.transport.query(&self.spec).await?;
        let collection = self.spec.collection();
        envelope.get(collection).cloned().ok_or_else(|| {
            ClientError::invalid_response(collection, "response is missing the collection field")
        })
    }
}

impl ClauseDsl for QueryBuilder {
    fn clauses_mut(&mut self) -> &mut ClauseMap {
        self.spec.clauses_mut()
    }
}
