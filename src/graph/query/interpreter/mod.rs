//! Apply settings from a `CatalogQuery` to `AssociationRecord`s.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

mod predicates;
mod scope;
mod significance;
mod subtype;

pub use predicates::{CompiledPredicate, Field, FieldKind};

use crate::catalog::AssociationRecord;
use crate::err::QueryError;
use crate::graph::query::predicate;
use crate::graph::query::schema::{CatalogQuery, Connector};

/// Four-digit allele value whose subtype digits are dropped when subtypes
/// are hidden, so a subtype-specific filter still matches the grouped row.
static MAIN_GROUP_SNP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(HLA_[A-Z]_\d{2})\d{2}").expect("invalid regex"));

/// Hold data structures that support the interpretation of one
/// `CatalogQuery` to multiple `AssociationRecord`s.
#[derive(Debug)]
pub struct QueryInterpreter {
    /// The query settings.
    pub query: CatalogQuery,
    /// Predicates compiled against the record schema, with the connector
    /// joining each to the fold accumulator.
    predicates: Vec<(Connector, CompiledPredicate)>,
}

impl QueryInterpreter {
    /// Construct new `QueryInterpreter` with the given query settings.
    ///
    /// Malformed predicates are dropped here. Unknown fields and impossible
    /// numeric coercions are fatal and surface before any record is visited,
    /// so a scoped-out record set cannot mask them.
    pub fn new(query: CatalogQuery) -> Result<Self, QueryError> {
        let mut compiled = Vec::new();
        for term in &query.filter {
            // Truncation must happen on the raw string: normalisation strips
            // the `HLA_` prefix for inexact comparators.
            let raw = if query.show_subtypes {
                Cow::from(term.predicate.as_str())
            } else {
                MAIN_GROUP_SNP.replace(&term.predicate, "$1")
            };
            let Some(pred) = predicate::translate(&raw) else {
                tracing::debug!("dropping malformed predicate {:?}", &term.predicate);
                continue;
            };
            compiled.push((term.connector, predicates::compile(&pred)?));
        }
        Ok(QueryInterpreter {
            query,
            predicates: compiled,
        })
    }

    /// Determine whether the record passes all gates, in order: scope,
    /// subtype, predicate fold, significance.
    pub fn passes(&self, record: &AssociationRecord) -> bool {
        scope::passes(&self.query, record)
            && subtype::passes(&self.query, record)
            && self.passes_predicates(record)
            && significance::passes(record)
    }

    /// Fold the predicate match results strictly left to right.
    ///
    /// The first predicate seeds the accumulator (its own connector is
    /// ignored); each subsequent result combines with its connector. No
    /// precedence, no grouping: `A OR B AND C` is `(A OR B) AND C`.
    fn passes_predicates(&self, record: &AssociationRecord) -> bool {
        let mut accumulator = None;
        for (connector, pred) in &self.predicates {
            let matched = predicates::passes(record, pred);
            accumulator = Some(match (accumulator, connector) {
                (None, _) => matched,
                (Some(prev), Connector::And) => prev && matched,
                (Some(prev), Connector::Or) => prev || matched,
            });
        }
        accumulator.unwrap_or(true)
    }

    /// Evaluate the query against a snapshot of the record set.
    pub fn evaluate<'a>(&self, records: &'a [AssociationRecord]) -> Vec<&'a AssociationRecord> {
        records.iter().filter(|record| self.passes(record)).collect()
    }
}
