//! Code implementing the "graph query" sub command.

pub mod filter;
pub mod interpreter;
pub mod predicate;
pub mod schema;
pub mod snp;

use std::collections::HashSet;
use std::time::Instant;

use clap::Parser;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::catalog::{self, AssociationRecord};
use crate::common::{self, trace_rss_now};
use crate::err::QueryError;

use interpreter::QueryInterpreter;
use schema::{
    CatalogQuery, FilterExpression, GraphEdge, GraphNode, Level, NodeType, QueryResult,
};

/// Drive the evaluator at each drill-down level and shape nodes, edges, and
/// visible-id sets for the category → disease → allele UI.
pub struct GraphAssembler<'a> {
    /// Snapshot of the record set, immutable for the lifetime of the query.
    records: &'a [AssociationRecord],
}

impl<'a> GraphAssembler<'a> {
    /// Construct a new `GraphAssembler` over the given record snapshot.
    pub fn new(records: &'a [AssociationRecord]) -> Self {
        GraphAssembler { records }
    }

    /// Answer one drill-down query.
    ///
    /// `parent_id` is required for the disease and allele levels; the
    /// category level is the initial view and ignores it.
    pub fn query_level(
        &self,
        level: Level,
        parent_id: Option<&str>,
        raw_filter: &str,
        show_subtypes: bool,
    ) -> Result<QueryResult, QueryError> {
        let expression = filter::parse(raw_filter);
        match level {
            Level::Category => self.category_level(expression, show_subtypes, true),
            Level::Disease => {
                let parent = parent_id
                    .ok_or_else(|| QueryError::MissingParentId(level.to_string()))?;
                self.disease_level(parent, expression, show_subtypes)
            }
            Level::Allele => {
                let parent = parent_id
                    .ok_or_else(|| QueryError::MissingParentId(level.to_string()))?;
                self.allele_level(parent, expression, show_subtypes)
            }
        }
    }

    /// Build the category-level view: one node per distinct category, no
    /// edges, sorted alphabetically by label.
    ///
    /// `initial` bypasses the subtype gate, so the first paint of the graph
    /// shows every category regardless of the subtype toggle.
    pub fn category_level(
        &self,
        filter: FilterExpression,
        show_subtypes: bool,
        initial: bool,
    ) -> Result<QueryResult, QueryError> {
        let query = CatalogQuery {
            filter,
            show_subtypes,
            bypass_subtype_gate: initial,
            ..Default::default()
        };
        let matched = QueryInterpreter::new(query)?.evaluate(self.records);

        let nodes = matched
            .iter()
            .map(|record| record.category.as_str())
            .unique()
            .sorted()
            .map(|category| GraphNode {
                id: common::slugify("category", category),
                label: category.to_string(),
                node_type: NodeType::Category,
                extra: IndexMap::new(),
            })
            .collect::<Vec<_>>();
        let visible = nodes.iter().map(|node| node.id.clone()).collect();

        Ok(QueryResult {
            nodes,
            edges: vec![],
            visible,
        })
    }

    /// Build the disease-level view below one category node, carrying the
    /// distinct-allele count per phenotype.
    pub fn disease_level(
        &self,
        category_id: &str,
        filter: FilterExpression,
        show_subtypes: bool,
    ) -> Result<QueryResult, QueryError> {
        let category = common::unslug(category_id, "category");
        let query = CatalogQuery {
            category: Some(category),
            filter,
            show_subtypes,
            ..Default::default()
        };
        let matched = QueryInterpreter::new(query)?.evaluate(self.records);

        let mut by_phenotype: IndexMap<&str, (&str, HashSet<&str>)> = IndexMap::new();
        for record in &matched {
            let (_, snps) = by_phenotype
                .entry(record.phenotype.as_str())
                .or_insert_with(|| (record.category.as_str(), HashSet::new()));
            snps.insert(record.snp.as_str());
        }
        by_phenotype.sort_keys();

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for (phenotype, (category, snps)) in &by_phenotype {
            let id = common::slugify("disease", phenotype);
            let mut extra = IndexMap::new();
            extra.insert(
                String::from("allele_count"),
                serde_json::json!(snps.len()),
            );
            extra.insert(String::from("category"), serde_json::json!(*category));
            edges.push(GraphEdge {
                source: category_id.to_string(),
                target: id.clone(),
            });
            nodes.push(GraphNode {
                id,
                label: phenotype.to_string(),
                node_type: NodeType::Disease,
                extra,
            });
        }
        let visible = nodes.iter().map(|node| node.id.clone()).collect();

        Ok(QueryResult {
            nodes,
            edges,
            visible,
        })
    }

    /// Build the allele-level view below one disease node, sorted by
    /// descending odds ratio.
    ///
    /// `snp` predicates are stripped from the expression first: a SNP filter
    /// narrows which disease page is reached but never hides sibling alleles
    /// once on that page.
    pub fn allele_level(
        &self,
        disease_id: &str,
        filter: FilterExpression,
        show_subtypes: bool,
    ) -> Result<QueryResult, QueryError> {
        let phenotype = common::unslug(disease_id, "disease");
        let filter = filter
            .into_iter()
            .filter(|term| !is_snp_predicate(&term.predicate))
            .collect();
        let query = CatalogQuery {
            phenotype: Some(phenotype.clone()),
            filter,
            show_subtypes,
            ..Default::default()
        };
        let matched = QueryInterpreter::new(query)?.evaluate(self.records);

        let mut rows: Vec<&AssociationRecord> = Vec::new();
        let mut seen = HashSet::new();
        for record in matched {
            if seen.insert(record.snp.as_str()) {
                rows.push(record);
            }
        }
        rows.sort_by(|a, b| b.odds_ratio.total_cmp(&a.odds_ratio));

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for record in rows {
            let id = common::slugify("allele", &record.snp);
            let mut extra = IndexMap::new();
            extra.insert(
                String::from("disease"),
                serde_json::json!(phenotype.as_str()),
            );
            extra.insert(String::from("snp"), serde_json::json!(record.snp.as_str()));
            extra.insert(
                String::from("gene_class"),
                serde_json::json!(record.gene_class),
            );
            extra.insert(
                String::from("gene_name"),
                serde_json::json!(record.gene_name.as_str()),
            );
            extra.insert(String::from("cases"), serde_json::json!(record.cases));
            extra.insert(String::from("controls"), serde_json::json!(record.controls));
            extra.insert(String::from("p"), serde_json::json!(record.p));
            extra.insert(
                String::from("odds_ratio"),
                serde_json::json!(record.odds_ratio),
            );
            extra.insert(String::from("ci_low"), serde_json::json!(record.ci_low));
            extra.insert(String::from("ci_high"), serde_json::json!(record.ci_high));
            extra.insert(String::from("maf"), serde_json::json!(record.maf));
            edges.push(GraphEdge {
                source: disease_id.to_string(),
                target: id.clone(),
            });
            nodes.push(GraphNode {
                id,
                label: record.snp.clone(),
                node_type: NodeType::Allele,
                extra,
            });
        }
        let visible = nodes.iter().map(|node| node.id.clone()).collect();

        Ok(QueryResult {
            nodes,
            edges,
            visible,
        })
    }

    /// Evaluate a filter for export: subtype gate bypassed, significance
    /// gate still applied, subtypes always visible.
    pub fn evaluate_for_export(
        &self,
        raw_filter: &str,
    ) -> Result<Vec<AssociationRecord>, QueryError> {
        let query = CatalogQuery {
            filter: filter::parse(raw_filter),
            show_subtypes: true,
            bypass_subtype_gate: true,
            ..Default::default()
        };
        Ok(QueryInterpreter::new(query)?
            .evaluate(self.records)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// Whether a raw predicate string filters on the `snp` field.
fn is_snp_predicate(predicate: &str) -> bool {
    predicate.split(':').next().map(str::trim) == Some("snp")
}

/// Command line arguments for `graph query` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run a drill-down graph query", long_about = None)]
pub struct Args {
    /// Path to the catalog CSV file.
    #[arg(long, required = true)]
    pub path_input: String,
    /// Drill-down level to query.
    #[arg(long, value_enum)]
    pub level: Level,
    /// Parent node identifier; required for the disease and allele levels.
    #[arg(long)]
    pub parent_id: Option<String>,
    /// Filter expression, e.g. `category:==:neurological AND p:<:0.01`.
    #[arg(long, default_value = "")]
    pub filter: String,
    /// Show allele subtypes instead of the main groups.
    #[arg(long)]
    pub show_subtypes: bool,
    /// Optional path to the output JSON file (stdout if absent).
    #[arg(long)]
    pub path_output: Option<String>,
}

/// Main entry point for `graph query` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    tracing::info!("Loading catalog records...");
    let before_loading = Instant::now();
    let records = catalog::load_records(&args.path_input)?;
    tracing::info!(
        "...done loading {} records in {:?}",
        records.len(),
        before_loading.elapsed()
    );

    trace_rss_now();

    let assembler = GraphAssembler::new(&records);
    let result = assembler.query_level(
        args.level,
        args.parent_id.as_deref(),
        &args.filter,
        args.show_subtypes,
    )?;
    tracing::info!(
        "query yielded {} nodes / {} edges / {} visible",
        result.nodes.len(),
        result.edges.len(),
        result.visible.len()
    );

    if let Some(path_output) = &args.path_output {
        serde_json::to_writer_pretty(std::fs::File::create(path_output)?, &result)?;
    } else {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &result)?;
    }

    tracing::info!(
        "All of `graph query` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}
