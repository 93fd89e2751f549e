//! Relationship subtree builder.

use crate::builder::ClauseDsl;
use crate::spec::{ClauseMap, QuerySpec, Relation, Scope};

/// Builds the query subtree for one joined collection
///
/// Created by [`ClauseDsl::has_many`]/[`ClauseDsl::belongs_to`] and handed to
/// the caller's configuration closure. It shares the full clause vocabulary
/// with [`QueryBuilder`](crate::QueryBuilder) but has no terminal operations:
/// its output is the accumulated [`ClauseMap`], spliced whole into the parent
/// when the closure returns. The parent never observes partial state.
///
/// # Examples
///
/// ```rust
/// use lunaql::ClauseDsl;
///
/// # fn configure(builder: lunaql::QueryBuilder) -> lunaql::QueryBuilder {
/// builder.has_many("comments", |comments| {
///     comments
///         .where_("approved", "=", true)
///         .belongs_to("author", |author| author.select(["name"]))
/// })
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RelationshipBuilder {
    spec: QuerySpec,
}

impl RelationshipBuilder {
    pub(crate) fn new(relation: Relation, collection: &str) -> Self {
        Self {
            spec: QuerySpec::new(Scope::Relation(relation), collection),
        }
    }

    /// Raw accumulated subtree
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    pub(crate) fn into_clauses(self) -> ClauseMap {
        self.spec.into_clauses()
    }
}

impl ClauseDsl for RelationshipBuilder {
    fn clauses_mut(&mut self) -> &mut ClauseMap {
        self.spec.clauses_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_builder_is_rooted_under_its_relation() {
        let builder = RelationshipBuilder::new(Relation::HasMany, "comments").limit(5);
        assert_eq!(
            serde_json::to_string(builder.spec()).unwrap(),
            r#"{"query":{"hasMany":{"comments":{"limit":5}}}}"#
        );
    }

    #[test]
    fn test_nesting_is_unbounded() {
        let builder = RelationshipBuilder::new(Relation::HasMany, "comments").belongs_to(
            "author",
            |author| {
                author.has_many("badges", |badges| badges.select(["icon"]))
            },
        );

        assert_eq!(
            serde_json::to_string(builder.spec()).unwrap(),
            r#"{"query":{"hasMany":{"comments":{"belongsTo":{"author":{"hasMany":{"badges":{"select":["icon"]}}}}}}}}"#
        );
    }

    #[test]
    fn test_self_join_is_permitted() {
        // Collection names are caller-supplied strings; there is no schema
        // graph and no cycle detection during construction.
        let builder = RelationshipBuilder::new(Relation::HasMany, "comments")
            .has_many("comments", |replies| replies.limit(3));

        assert_eq!(
            serde_json::to_string(builder.spec()).unwrap(),
            r#"{"query":{"hasMany":{"comments":{"hasMany":{"comments":{"limit":3}}}}}}"#
        );
    }
}
