//! Collection scoping entry point.

use std::sync::Arc;

use crate::builder::QueryBuilder;
use crate::transport::Transport;

/// Scopes a database connection to the collection a query will run against
///
/// Returned by [`Database::query`](crate::Database::query). Every call to
/// [`from`](CollectionBuilder::from) hands back a fresh, independent
/// [`QueryBuilder`] — chains built from the same connection share nothing but
/// the transport.
pub struct CollectionBuilder {
    transport: Arc<dyn Transport>,
}

impl CollectionBuilder {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Define the collection to query
    pub fn from(&self, collection: &str) -> QueryBuilder {
        QueryBuilder::new(Arc::clone(&self.transport), collection)
    }
}
