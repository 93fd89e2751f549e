//! Insert mutation builder.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;
use crate::transport::Transport;

/// Whether an insert carries one document or a batch
///
/// Decided by [`Database::insert`](crate::Database::insert) /
/// [`insert_many`](crate::Database::insert_many) at validation time and
/// carried on the builder; dispatch never re-derives it from the payload
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// A single document, PUT to `<endpoint>/<collection>`
    Document,
    /// A batch of documents, PUT to `<endpoint>/<collection>/batch`
    Documents,
}

impl MutationKind {
    pub(crate) fn path_suffix(self) -> &'static str {
        match self {
            MutationKind::Document => "",
            MutationKind::Documents => "/batch",
        }
    }
}

/// Insert request body: `{ data, options }`
#[derive(Debug, Clone, Serialize)]
pub struct MutationPayload {
    pub data: Value,
    pub options: Value,
}

/// Dispatches a validated insert into a collection
///
/// The two-step shape mirrors the query side: `insert`/`insert_many`
/// validate the payload and return this builder, and
/// [`into_collection`](DocumentBuilder::into_collection) names the target and
/// performs the request.
pub struct DocumentBuilder {
    transport: Arc<dyn Transport>,
    kind: MutationKind,
    payload: MutationPayload,
}

impl DocumentBuilder {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        kind: MutationKind,
        data: Value,
        options: Value,
    ) -> Self {
        Self {
            transport,
            kind,
            payload: MutationPayload { data, options },
        }
    }

    /// Whether this insert is a single document or a batch
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// The `{ data, options }` body that will be sent
    pub fn payload(&self) -> &MutationPayload {
        &self.payload
    }

    /// Insert the data into the named collection
    ///
    /// Returns the decoded response body verbatim.
    pub async fn into_collection(self, collection: &str) -> ClientResult<Value> {
        self.transport
            .insert(collection, self.kind, &self.payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_kind_targets_the_batch_path() {
        assert_eq!(MutationKind::Document.path_suffix(), "");
        assert_eq!(MutationKind::Documents.path_suffix(), "/batch");
    }

    #[test]
    fn test_payload_serializes_as_data_and_options() {
        let payload = MutationPayload {
            data: serde_json::json!({"name": "a"}),
            options: serde_json::json!({}),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"data":{"name":"a"},"options":{}}"#
        );
    }
}
