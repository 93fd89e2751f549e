//! End-to-end dispatch tests using an in-process transport.
//!
//! The transport trait is the seam: `RecordingTransport` captures the exact
//! serialized bytes a real HTTP transport would put on the wire and replays
//! canned service responses.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use lunaql::{
    ClauseDsl, ClientError, ClientResult, Database, DatabaseConfig, Direction, MutationKind,
    MutationPayload, QuerySpec, Transport,
};

#[derive(Default)]
struct RecordingTransport {
    /// Serialized bodies of dispatched queries, in order
    query_bodies: Mutex<Vec<String>>,
    /// `(collection, kind, body)` for each dispatched insert
    inserts: Mutex<Vec<(String, MutationKind, String)>>,
    /// Envelope returned to every query
    response: Mutex<Value>,
}

impl RecordingTransport {
    fn with_response(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(response),
            ..Default::default()
        })
    }

    fn last_query_body(&self) -> String {
        self.query_bodies.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn query(&self, spec: &QuerySpec) -> ClientResult<Value> {
        let body = serde_json::to_string(spec)?;
        self.query_bodies.lock().unwrap().push(body);
        Ok(self.response.lock().unwrap().clone())
    }

    async fn insert(
        &self,
        collection: &str,
        kind: MutationKind,
        payload: &MutationPayload,
    ) -> ClientResult<Value> {
        let body = serde_json::to_string(payload)?;
        self.inserts
            .lock()
            .unwrap()
            .push((collection.to_string(), kind, body));
        Ok(json!({"inserted": true}))
    }
}

fn database(transport: &Arc<RecordingTransport>) -> Database {
    let config = DatabaseConfig::new("https://eu-1.lunaql.com/db/test", "secret");
    Database::with_transport(config, Arc::clone(transport) as Arc<dyn Transport>)
}

#[tokio::test]
async fn fetch_dispatches_the_documented_wire_body() {
    let transport = RecordingTransport::with_response(json!({
        "users": [{"name": "a"}, {"name": "b"}]
    }));

    let users = database(&transport)
        .query()
        .from("users")
        .where_("age", ">", 18)
        .order_by("name", Direction::Asc)
        .limit(10)
        .fetch()
        .await
        .unwrap();

    assert_eq!(
        transport.last_query_body(),
        r#"{"query":{"from":{"users":{"where":[["age",">",18]],"orderBy":"name","sort":"asc","limit":10,"do":"fetch"}}}}"#
    );
    // The collection-named field comes back verbatim, not the envelope
    assert_eq!(users, json!([{"name": "a"}, {"name": "b"}]));
}

#[tokio::test]
async fn terminal_operations_write_their_own_do_value() {
    let transport = RecordingTransport::with_response(json!({"users": 0}));
    let db = database(&transport);

    db.query().from("users").delete().await.unwrap();
    db.query().from("users").count().await.unwrap();
    db.query().from("users").exists().await.unwrap();
    db.query().from("users").fetch_first().await.unwrap();

    let bodies = transport.query_bodies.lock().unwrap();
    assert_eq!(bodies[0], r#"{"query":{"from":{"users":{"do":"delete"}}}}"#);
    assert_eq!(bodies[1], r#"{"query":{"from":{"users":{"do":"count"}}}}"#);
    assert_eq!(bodies[2], r#"{"query":{"from":{"users":{"do":"exists"}}}}"#);
    assert_eq!(bodies[3], r#"{"query":{"from":{"users":{"do":"fetchFirst"}}}}"#);
}

#[tokio::test]
async fn list_writes_list_by_only_for_a_non_empty_property() {
    let transport = RecordingTransport::with_response(json!({"users": []}));
    let db = database(&transport);

    db.query().from("users").list(None).await.unwrap();
    db.query().from("users").list(Some("")).await.unwrap();
    db.query().from("users").list(Some("email")).await.unwrap();

    let bodies = transport.query_bodies.lock().unwrap();
    assert_eq!(bodies[0], r#"{"query":{"from":{"users":{"do":"list"}}}}"#);
    assert_eq!(bodies[1], r#"{"query":{"from":{"users":{"do":"list"}}}}"#);
    assert_eq!(
        bodies[2],
        r#"{"query":{"from":{"users":{"do":"list","listBy":"email"}}}}"#
    );
}

#[tokio::test]
async fn update_sends_data_and_fetches_the_updated_document() {
    let transport = RecordingTransport::with_response(json!({
        "users": {"name": "after"}
    }));

    let updated = database(&transport)
        .query()
        .from("users")
        .where_("name", "=", "before")
        .update(json!({"name": "after"}))
        .await
        .unwrap();

    assert_eq!(
        transport.last_query_body(),
        r#"{"query":{"from":{"users":{"where":[["name","=","before"]],"data":{"name":"after"},"do":"fetchFirst"}}}}"#
    );
    assert_eq!(updated, json!({"name": "after"}));
}

#[tokio::test]
async fn nested_relationships_arrive_fully_built() {
    let transport = RecordingTransport::with_response(json!({"posts": []}));

    database(&transport)
        .query()
        .from("posts")
        .has_many("comments", |comments| {
            comments
                .where_("approved", "=", true)
                .belongs_to("author", |author| author.select(["name"]))
        })
        .fetch()
        .await
        .unwrap();

    assert_eq!(
        transport.last_query_body(),
        r#"{"query":{"from":{"posts":{"hasMany":{"comments":{"where":[["approved","=",true]],"belongsTo":{"author":{"select":["name"]}}}},"do":"fetch"}}}}"#
    );
}

#[tokio::test]
async fn missing_collection_field_surfaces_as_invalid_response() {
    let transport = RecordingTransport::with_response(json!({"unexpected": []}));

    let result = database(&transport).query().from("users").fetch().await;

    match result {
        Err(ClientError::InvalidResponse { field, .. }) => assert_eq!(field, "users"),
        other => panic!("expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn insert_dispatches_to_the_collection() {
    let transport = RecordingTransport::with_response(json!({}));

    let receipt = database(&transport)
        .insert(json!({"name": "a"}), None)
        .unwrap()
        .into_collection("users")
        .await
        .unwrap();

    let inserts = transport.inserts.lock().unwrap();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].0, "users");
    assert_eq!(inserts[0].1, MutationKind::Document);
    assert_eq!(inserts[0].2, r#"{"data":{"name":"a"},"options":{}}"#);
    // Mutation responses come back verbatim, unwrapped
    assert_eq!(receipt, json!({"inserted": true}));
}

#[tokio::test]
async fn insert_many_dispatches_a_batch() {
    let transport = RecordingTransport::with_response(json!({}));

    database(&transport)
        .insert_many(json!([{"name": "a"}, {"name": "b"}]), Some(json!({"ordered": true})))
        .unwrap()
        .into_collection("users")
        .await
        .unwrap();

    let inserts = transport.inserts.lock().unwrap();
    assert_eq!(inserts[0].1, MutationKind::Documents);
    assert_eq!(
        inserts[0].2,
        r#"{"data":[{"name":"a"},{"name":"b"}],"options":{"ordered":true}}"#
    );
}
