//! Code for accessing the HLA PheWAS catalog records.

use serde::{Deserialize, Serialize};

/// Disease category imputed for records that carry none.
pub const DEFAULT_CATEGORY: &str = "infectious diseases";

/// One row of the HLA PheWAS catalog, one per `(allele, phenotype)` pair.
///
/// The serde renames map the catalog CSV column names to the field names
/// used by the query surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationRecord {
    /// Canonical allele identifier, e.g., `HLA_DRB1_0101`.
    pub snp: String,
    /// Name of the HLA gene, e.g., `DRB1`.
    pub gene_name: String,
    /// MHC class of the gene (1 or 2).
    pub gene_class: i64,
    /// Top-level disease category.
    #[serde(rename = "category_string")]
    pub category: String,
    /// Phenotype (disease/trait) label.
    #[serde(rename = "phewas_string")]
    pub phenotype: String,
    /// Two-digit allele subtype; `"00"` denotes the main group with no
    /// deeper specificity.
    pub subtype: String,
    /// Two-digit serotype extracted from the allele identifier.
    pub serotype: String,
    /// Number of cases.
    pub cases: i64,
    /// Number of controls.
    pub controls: i64,
    /// Odds ratio of the association.
    pub odds_ratio: f64,
    /// P-value of the association.
    pub p: f64,
    /// Lower bound of the 95% confidence interval.
    #[serde(rename = "l95")]
    pub ci_low: f64,
    /// Upper bound of the 95% confidence interval.
    #[serde(rename = "u95")]
    pub ci_high: f64,
    /// Minor allele frequency.
    pub maf: f64,
}

/// Load the association records from the given catalog CSV file.
///
/// Columns not mapped by `AssociationRecord` (e.g., `a1`, `a2`,
/// `chromosome`, `nchrobs`) are ignored. Records with an empty disease
/// category are imputed to [`DEFAULT_CATEGORY`], following the upstream
/// data cleaning.
pub fn load_records<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Vec<AssociationRecord>, anyhow::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path.as_ref())?;
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let mut record: AssociationRecord = result?;
        if record.category.is_empty() {
            record.category = String::from(DEFAULT_CATEGORY);
        }
        records.push(record);
    }
    tracing::debug!("loaded {} catalog records", records.len());
    Ok(records)
}
