//! Compile translated predicates against the record schema and match them
//! per record.

use std::cmp::Ordering;
use std::str::FromStr;

use strum_macros::EnumString;

use crate::catalog::AssociationRecord;
use crate::err::QueryError;
use crate::graph::query::schema::{Comparator, Predicate};

/// Queryable fields of an `AssociationRecord`.
///
/// Legacy wire spellings still sent by older front-end revisions are
/// accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Snp,
    GeneName,
    GeneClass,
    #[strum(serialize = "category", serialize = "category_string")]
    Category,
    #[strum(serialize = "phenotype", serialize = "phewas_string")]
    Phenotype,
    Subtype,
    Serotype,
    Cases,
    Controls,
    OddsRatio,
    P,
    #[strum(serialize = "ci_low", serialize = "l95")]
    CiLow,
    #[strum(serialize = "ci_high", serialize = "u95")]
    CiHigh,
    Maf,
}

/// Value kind of a field, driving relational coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
}

impl Field {
    /// The kind of the field's values.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Cases | Field::Controls | Field::GeneClass => FieldKind::Integer,
            Field::OddsRatio | Field::P | Field::CiLow | Field::CiHigh | Field::Maf => {
                FieldKind::Float
            }
            _ => FieldKind::Text,
        }
    }
}

/// A predicate validated against the record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    /// Resolved record field.
    pub field: Field,
    /// Comparator tag.
    pub comparator: Comparator,
    /// Comparison value.
    pub value: String,
}

/// Validate `predicate` against the record schema.
///
/// Unknown fields and relational comparisons whose value cannot be coerced
/// to the field's numeric type are request-level failures, surfaced before
/// any record is visited.
pub fn compile(predicate: &Predicate) -> Result<CompiledPredicate, QueryError> {
    let field = Field::from_str(&predicate.field)
        .map_err(|_| QueryError::InvalidField(predicate.field.clone()))?;
    if predicate.comparator.is_relational() {
        let coercible = match field.kind() {
            FieldKind::Integer => predicate.value.trim().parse::<i64>().is_ok(),
            FieldKind::Float => predicate.value.trim().parse::<f64>().is_ok(),
            FieldKind::Text => true,
        };
        if !coercible {
            return Err(QueryError::TypeMismatch {
                field: predicate.field.clone(),
                value: predicate.value.clone(),
            });
        }
    }
    Ok(CompiledPredicate {
        field,
        comparator: predicate.comparator,
        value: predicate.value.clone(),
    })
}

/// Determine whether `record` matches the compiled predicate.
pub fn passes(record: &AssociationRecord, predicate: &CompiledPredicate) -> bool {
    match predicate.comparator {
        Comparator::Eq => {
            text_value(record, predicate.field).to_lowercase() == predicate.value.to_lowercase()
        }
        Comparator::Contains => text_value(record, predicate.field)
            .to_lowercase()
            .contains(&predicate.value.to_lowercase()),
        Comparator::Gt | Comparator::Lt | Comparator::Gte | Comparator::Lte => {
            ordering_passes(compare(record, predicate), predicate.comparator)
        }
    }
}

/// Order the record's field value against the predicate value.
fn compare(record: &AssociationRecord, predicate: &CompiledPredicate) -> Ordering {
    match predicate.field.kind() {
        FieldKind::Integer => {
            let rhs: i64 = predicate
                .value
                .trim()
                .parse()
                .expect("coercion validated on compile");
            integer_value(record, predicate.field).cmp(&rhs)
        }
        FieldKind::Float => {
            let rhs: f64 = predicate
                .value
                .trim()
                .parse()
                .expect("coercion validated on compile");
            float_value(record, predicate.field).total_cmp(&rhs)
        }
        FieldKind::Text => text_value(record, predicate.field).as_str().cmp(&predicate.value),
    }
}

fn ordering_passes(ordering: Ordering, comparator: Comparator) -> bool {
    match comparator {
        Comparator::Gt => ordering == Ordering::Greater,
        Comparator::Lt => ordering == Ordering::Less,
        Comparator::Gte => ordering != Ordering::Less,
        Comparator::Lte => ordering != Ordering::Greater,
        Comparator::Eq | Comparator::Contains => {
            unreachable!("equality comparators are handled before ordering")
        }
    }
}

/// Render the field of `record` as a string for `Eq`/`Contains` comparisons.
fn text_value(record: &AssociationRecord, field: Field) -> String {
    match field {
        Field::Snp => record.snp.clone(),
        Field::GeneName => record.gene_name.clone(),
        Field::GeneClass => record.gene_class.to_string(),
        Field::Category => record.category.clone(),
        Field::Phenotype => record.phenotype.clone(),
        Field::Subtype => record.subtype.clone(),
        Field::Serotype => record.serotype.clone(),
        Field::Cases => record.cases.to_string(),
        Field::Controls => record.controls.to_string(),
        Field::OddsRatio => record.odds_ratio.to_string(),
        Field::P => record.p.to_string(),
        Field::CiLow => record.ci_low.to_string(),
        Field::CiHigh => record.ci_high.to_string(),
        Field::Maf => record.maf.to_string(),
    }
}

fn integer_value(record: &AssociationRecord, field: Field) -> i64 {
    match field {
        Field::Cases => record.cases,
        Field::Controls => record.controls,
        Field::GeneClass => record.gene_class,
        _ => unreachable!("field kind checked by caller"),
    }
}

fn float_value(record: &AssociationRecord, field: Field) -> f64 {
    match field {
        Field::OddsRatio => record.odds_ratio,
        Field::P => record.p,
        Field::CiLow => record.ci_low,
        Field::CiHigh => record.ci_high,
        Field::Maf => record.maf,
        _ => unreachable!("field kind checked by caller"),
    }
}
