//! Supporting code for graph query definition.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Connector joining a filter predicate to the accumulated match set.
#[derive(
    Serialize, Deserialize, Display, EnumString, PartialEq, Eq, Debug, Clone, Copy, Default,
)]
pub enum Connector {
    /// Set intersection of the match results.
    #[default]
    #[serde(rename = "AND")]
    #[strum(serialize = "AND")]
    And,
    /// Set union of the match results.
    #[serde(rename = "OR")]
    #[strum(serialize = "OR")]
    Or,
}

/// Comparator of a single filter predicate, spelled as on the wire.
#[derive(Serialize, Deserialize, Display, EnumString, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Comparator {
    /// Case-insensitive string equality.
    #[serde(rename = "==")]
    #[strum(serialize = "==")]
    Eq,
    /// Case-insensitive substring containment.
    #[serde(rename = "contains")]
    #[strum(serialize = "contains")]
    Contains,
    /// Strictly greater than.
    #[serde(rename = ">")]
    #[strum(serialize = ">")]
    Gt,
    /// Strictly less than.
    #[serde(rename = "<")]
    #[strum(serialize = "<")]
    Lt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    #[strum(serialize = ">=")]
    Gte,
    /// Less than or equal.
    #[serde(rename = "<=")]
    #[strum(serialize = "<=")]
    Lte,
}

impl Comparator {
    /// Whether the comparator orders values rather than testing (sub)string
    /// equality.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Comparator::Gt | Comparator::Lt | Comparator::Gte | Comparator::Lte
        )
    }
}

/// One `(connector, predicate)` pair of a parsed filter expression.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct FilterTerm {
    /// Connector combining this term with the terms to its left.
    pub connector: Connector,
    /// Raw `field:operator:value` predicate string.
    pub predicate: String,
}

/// Ordered sequence of filter terms, applied strictly left to right with no
/// precedence and no grouping.
pub type FilterExpression = Vec<FilterTerm>;

/// Structured, operator-tagged predicate.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Predicate {
    /// Field name as given in the filter expression.
    pub field: String,
    /// Comparator tag.
    pub comparator: Comparator,
    /// Comparison value; already normalised for the `snp` field.
    pub value: String,
}

/// Query settings for one evaluator invocation.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Restrict to records of this disease category (exact, case-sensitive).
    pub category: Option<String>,
    /// Restrict to records of this phenotype (exact, case-sensitive).
    pub phenotype: Option<String>,
    /// Parsed filter expression; may be empty.
    pub filter: FilterExpression,
    /// Show allele subtypes instead of the `"00"` main groups.
    pub show_subtypes: bool,
    /// Skip the subtype gate entirely (initial category view and export).
    pub bypass_subtype_gate: bool,
}

/// Drill-down level of the association graph.
#[derive(
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    PartialEq,
    Eq,
    Debug,
    Clone,
    Copy,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    /// Top-level disease categories.
    Category,
    /// Phenotypes below one category.
    Disease,
    /// Alleles below one phenotype.
    Allele,
}

/// Type tag of a graph node, also its identifier prefix.
#[derive(Serialize, Deserialize, Display, EnumString, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeType {
    Category,
    Disease,
    Allele,
}

/// Node of the drill-down graph.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct GraphNode {
    /// Node identifier, `{prefix}-{label with spaces as underscores}`.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Type tag, retained for coloring in the UI.
    pub node_type: NodeType,
    /// Level-specific attributes, flattened into the node object.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Directed edge of the drill-down graph, always parent to child.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct GraphEdge {
    /// Identifier of the parent node.
    pub source: String,
    /// Identifier of the child node.
    pub target: String,
}

/// Result of one graph query.
///
/// `visible` lists the identifiers of nodes the filter actually matched at
/// this level, as opposed to nodes present only through structural scoping.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct QueryResult {
    /// Nodes of this level.
    pub nodes: Vec<GraphNode>,
    /// Edges from the parent node to each node of this level.
    pub edges: Vec<GraphEdge>,
    /// Identifiers of the nodes matched by the filter.
    pub visible: Vec<String>,
}
