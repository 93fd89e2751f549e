//! # Fluent Query Builders
//!
//! Builders accumulate clause writes into a [`QuerySpec`](crate::spec::QuerySpec)
//! and, for the primary query builder, dispatch it through the transport.
//! The clause vocabulary is shared: [`ClauseDsl`] is implemented by both
//! [`QueryBuilder`] (scoped under `query.from`) and [`RelationshipBuilder`]
//! (scoped under `query.hasMany`/`query.belongsTo`); only terminal capability
//! differs.

pub mod collection;
pub mod document;
pub mod query;
pub mod relationship;

pub use collection::CollectionBuilder;
pub use document::{DocumentBuilder, MutationKind, MutationPayload};
pub use query::QueryBuilder;
pub use relationship::RelationshipBuilder;

use serde_json::Value;

use crate::spec::{Clause, ClauseMap, Condition, Direction, Relation};

/// Shared clause vocabulary for query and relationship builders
///
/// Each method writes one clause (accumulation policy per
/// [`ClauseMap::apply`]) and returns the builder for chaining. Methods
/// consume `self`; a chain owns its builder from start to finish, so nothing
/// outside the chain can observe a half-built spec.
///
/// `hasMany`/`belongsTo` take a synchronous configuration closure that
/// receives a fresh [`RelationshipBuilder`]; the finished subtree is spliced
/// into this builder when the closure returns. Nesting depth is unbounded and
/// collection names are not checked against a schema, so self-joins are legal.
pub trait ClauseDsl: Sized {
    /// Clause map of this builder's collection scope
    fn clauses_mut(&mut self) -> &mut ClauseMap;

    /// Select fields from the collection
    fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.clauses_mut().apply(Clause::Select(fields));
        self
    }

    /// Hide fields from the collection
    fn hidden<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.clauses_mut().apply(Clause::Hidden(fields));
        self
    }

    /// Filter the collection; successive calls accumulate conjunctively
    ///
    /// Named `where_` because `where` is a Rust keyword. The operator is
    /// passed through to the service unvalidated.
    fn where_<V: Into<Value>>(mut self, field: &str, operator: &str, value: V) -> Self {
        self.clauses_mut()
            .apply(Clause::Where(Condition::new(field, operator, value)));
        self
    }

    /// Filter the collection; successive calls accumulate disjunctively
    fn or_where<V: Into<Value>>(mut self, field: &str, operator: &str, value: V) -> Self {
        self.clauses_mut()
            .apply(Clause::OrWhere(Condition::new(field, operator, value)));
        self
    }

    /// Order the collection by a field; writes both `orderBy` and `sort`
    fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.clauses_mut().apply(Clause::OrderBy(field.to_string()));
        self.sort(direction)
    }

    /// Sort the collection
    fn sort(mut self, direction: Direction) -> Self {
        self.clauses_mut().apply(Clause::Sort(direction));
        self
    }

    /// Group the collection
    fn group_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.clauses_mut().apply(Clause::GroupBy(fields));
        self
    }

    /// Filter grouped results; a single triplet, last write wins
    fn having<V: Into<Value>>(mut self, field: &str, operator: &str, value: V) -> Self {
        self.clauses_mut()
            .apply(Clause::Having(Condition::new(field, operator, value)));
        self
    }

    /// Limit the collection
    fn limit(mut self, limit: u64) -> Self {
        self.clauses_mut().apply(Clause::Limit(limit));
        self
    }

    /// Skip documents in the collection
    fn skip(mut self, skip: u64) -> Self {
        self.clauses_mut().apply(Clause::Skip(skip));
        self
    }

    /// Join a collection that has many documents belonging to this one
    fn has_many<F>(mut self, collection: &str, configure: F) -> Self
    where
        F: FnOnce(RelationshipBuilder) -> RelationshipBuilder,
    {
        let built = configure(RelationshipBuilder::new(Relation::HasMany, collection));
        self.clauses_mut().apply(Clause::Relation(
            Relation::HasMany,
            collection.to_string(),
            built.into_clauses(),
        ));
        self
    }

    /// Join a collection that this collection's documents belong to
    fn belongs_to<F>(mut self, collection: &str, configure: F) -> Self
    where
        F: FnOnce(RelationshipBuilder) -> RelationshipBuilder,
    {
        let built = configure(RelationshipBuilder::new(Relation::BelongsTo, collection));
        self.clauses_mut().apply(Clause::Relation(
            Relation::BelongsTo,
            collection.to_string(),
            built.into_clauses(),
        ));
        self
    }
}
