//! # LunaQL Rust Client
//!
//! Client SDK for the [LunaQL](https://lunaql.com) document database. Queries
//! and mutations are expressed through a fluent, chainable interface; the
//! accumulated calls become a single nested query specification that is
//! serialized and sent to the service in one HTTP request. The library never
//! evaluates a query locally — it builds a description of one and hands it to
//! the service for execution.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use lunaql::{ClauseDsl, Database, DatabaseConfig, Direction};
//!
//! # async fn run() -> lunaql::ClientResult<()> {
//! let db = Database::new(DatabaseConfig::new(
//!     "https://eu-1.lunaql.com/db/test",
//!     "secret-token",
//! ))?;
//!
//! let users = db
//!     .query()
//!     .from("users")
//!     .select(["name", "email"])
//!     .where_("age", ">", 18)
//!     .has_many("posts", |posts| {
//!         posts.where_("published", "=", true).limit(5)
//!     })
//!     .order_by("name", Direction::Asc)
//!     .limit(10)
//!     .fetch()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod database;
pub mod error;
pub mod spec;
pub mod transport;

// Re-export commonly used types for convenience
pub use builder::{
    ClauseDsl, CollectionBuilder, DocumentBuilder, MutationKind, MutationPayload, QueryBuilder,
    RelationshipBuilder,
};
pub use config::DatabaseConfig;
pub use database::Database;
pub use error::{ClientError, ClientResult};
pub use spec::{Clause, ClauseMap, Condition, Direction, Operation, QuerySpec, Relation, Scope};
pub use transport::{HttpTransport, Transport};
