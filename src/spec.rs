//! # Query Specification Model
//!
//! A [`QuerySpec`] is the nested structure describing one request to the
//! LunaQL service. A primary query is rooted as
//! `{"query":{"from":{"<collection>":{...}}}}`; a relationship subtree is
//! rooted under its relation kind instead of `from`. The per-collection body
//! is a [`ClauseMap`], and every write against it goes through
//! [`ClauseMap::apply`] as a tagged [`Clause`], which owns the accumulation
//! policy for each clause: `where`/`orWhere` append and preserve call order,
//! relationship subtrees overwrite per collection key, everything else is
//! last-write-wins.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Sort direction for the `orderBy`/`sort` clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Operation requested from the service — the `do` clause of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Delete,
    Count,
    Exists,
    List,
    Fetch,
    FetchFirst,
}

/// Kind of relationship joining one collection to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    HasMany,
    BelongsTo,
}

impl Relation {
    pub(crate) fn key(self) -> &'static str {
        match self {
            Relation::HasMany => "hasMany",
            Relation::BelongsTo => "belongsTo",
        }
    }
}

/// A `(field, operator, value)` filter triplet
///
/// Serializes as a three-element array. The operator vocabulary is not
/// validated here; it is the service's contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition(pub String, pub String, pub Value);

impl Condition {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self(field.into(), operator.into(), value.into())
    }
}

/// One clause write against a [`ClauseMap`]
///
/// The variant determines the accumulation policy applied by
/// [`ClauseMap::apply`]; callers never manipulate clause keys directly.
#[derive(Debug, Clone)]
pub enum Clause {
    Select(Vec<String>),
    Hidden(Vec<String>),
    Where(Condition),
    OrWhere(Condition),
    OrderBy(String),
    Sort(Direction),
    GroupBy(Vec<String>),
    Having(Condition),
    Limit(u64),
    Skip(u64),
    /// A fully-built relationship subtree, spliced in whole
    Relation(Relation, String, ClauseMap),
    /// Update payload, written by `update` before the operation
    Data(Value),
    Do(Operation),
    ListBy(String),
}

/// The per-collection-scope portion of a query
///
/// Field order is the wire order: accumulated clauses first, then `data`
/// (update payload), then `do` and `listBy`. Unset clauses are omitted from
/// the serialized body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hidden: Option<Vec<String>>,
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty")]
    where_: Vec<Condition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    or_where: Vec<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_by: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    having: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip: Option<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    has_many: BTreeMap<String, ClauseMap>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    belongs_to: BTreeMap<String, ClauseMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(rename = "do", skip_serializing_if = "Option::is_none")]
    operation: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    list_by: Option<String>,
}

impl ClauseMap {
    /// Apply one clause write with its accumulation policy
    pub fn apply(&mut self, clause: Clause) {
        match clause {
            Clause::Select(fields) => self.select = Some(fields),
            Clause::Hidden(fields) => self.hidden = Some(fields),
            Clause::Where(condition) => self.where_.push(condition),
            Clause::OrWhere(condition) => self.or_where.push(condition),
            Clause::OrderBy(field) => self.order_by = Some(field),
            Clause::Sort(direction) => self.sort = Some(direction),
            Clause::GroupBy(fields) => self.group_by = Some(fields),
            Clause::Having(condition) => self.having = Some(condition),
            Clause::Limit(limit) => self.limit = Some(limit),
            Clause::Skip(skip) => self.skip = Some(skip),
            Clause::Relation(Relation::HasMany, collection, clauses) => {
                self.has_many.insert(collection, clauses);
            }
            Clause::Relation(Relation::BelongsTo, collection, clauses) => {
                self.belongs_to.insert(collection, clauses);
            }
            Clause::Data(data) => self.data = Some(data),
            Clause::Do(operation) => self.operation = Some(operation),
            Clause::ListBy(property) => self.list_by = Some(property),
        }
    }

    /// Conjunctive filter triplets, in call order
    pub fn where_clauses(&self) -> &[Condition] {
        &self.where_
    }

    /// Disjunctive filter triplets, in call order
    pub fn or_where_clauses(&self) -> &[Condition] {
        &self.or_where
    }

    /// The requested operation, if a terminal call has written it
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// A relationship subtree by kind and collection
    pub fn relation(&self, relation: Relation, collection: &str) -> Option<&ClauseMap> {
        match relation {
            Relation::HasMany => self.has_many.get(collection),
            Relation::BelongsTo => self.belongs_to.get(collection),
        }
    }
}

/// Tree position of a [`ClauseMap`]: the primary `from` scope or a
/// relationship scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    From,
    Relation(Relation),
}

impl Scope {
    fn key(self) -> &'static str {
        match self {
            Scope::From => "from",
            Scope::Relation(relation) => relation.key(),
        }
    }
}

/// One complete query or relationship subtree
///
/// A spec is permanently bound to its `(scope, collection)` pair; all clause
/// writes target that scope's [`ClauseMap`]. It exists only for the duration
/// of one chain-and-dispatch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    scope: Scope,
    collection: String,
    clauses: ClauseMap,
}

impl QuerySpec {
    pub(crate) fn new(scope: Scope, collection: impl Into<String>) -> Self {
        Self {
            scope,
            collection: collection.into(),
            clauses: ClauseMap::default(),
        }
    }

    /// Collection this spec is scoped to
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Accumulated clauses
    pub fn clauses(&self) -> &ClauseMap {
        &self.clauses
    }

    pub(crate) fn clauses_mut(&mut self) -> &mut ClauseMap {
        &mut self.clauses
    }

    pub(crate) fn into_clauses(self) -> ClauseMap {
        self.clauses
    }
}

impl Serialize for QuerySpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct ScopeLevel<'a>(&'a QuerySpec);
        struct CollectionLevel<'a>(&'a QuerySpec);

        impl Serialize for ScopeLevel<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(self.0.scope.key(), &CollectionLevel(self.0))?;
                map.end()
            }
        }

        impl Serialize for CollectionLevel<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&self.0.collection, &self.0.clauses)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("query", &ScopeLevel(self))?;
        map.end()
    }
}
