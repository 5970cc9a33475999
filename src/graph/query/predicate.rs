//! Translate a raw predicate string into a structured, operator-tagged
//! predicate.

use super::schema::{Comparator, Predicate};
use super::snp;

/// Translate one `field:operator:value` string.
///
/// Malformed predicates (fewer than three colon-separated parts, unknown
/// operator) are dropped rather than surfaced; downstream behaviour depends
/// on such fragments being ignored instead of aborting the whole query.
/// Values of the `snp` field are normalised, with the `HLA_` prefix re-added
/// only for exact comparisons.
pub fn translate(raw: &str) -> Option<Predicate> {
    let mut parts = raw.splitn(3, ':');
    let field = parts.next()?.to_string();
    let operator = parts.next()?;
    let value = parts.next()?.trim_end_matches(',');
    let comparator: Comparator = operator.parse().ok()?;
    let value = if field == "snp" {
        snp::normalise(value, comparator == Comparator::Eq)
    } else {
        value.to_string()
    };
    Some(Predicate {
        field,
        comparator,
        value,
    })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::graph::query::schema::{Comparator, Predicate};

    #[rstest]
    #[case("p:<:0.01", "p", Comparator::Lt, "0.01")]
    #[case("category:==:neurological", "category", Comparator::Eq, "neurological")]
    #[case("gene_name:contains:DR", "gene_name", Comparator::Contains, "DR")]
    #[case("maf:>=:0.1", "maf", Comparator::Gte, "0.1")]
    #[case("p:<:0.01,,", "p", Comparator::Lt, "0.01")]
    #[case("serotype:==:01:extra", "serotype", Comparator::Eq, "01:extra")]
    fn translate_well_formed(
        #[case] raw: &str,
        #[case] field: &str,
        #[case] comparator: Comparator,
        #[case] value: &str,
    ) {
        assert_eq!(
            Some(Predicate {
                field: field.to_string(),
                comparator,
                value: value.to_string(),
            }),
            super::translate(raw)
        );
    }

    #[rstest]
    #[case("")]
    #[case("nonsense")]
    #[case("p:0.01")]
    #[case("p:~:0.01")]
    #[case("p:between:0.01")]
    fn translate_malformed_is_dropped(#[case] raw: &str) {
        assert_eq!(None, super::translate(raw));
    }

    #[rstest]
    #[case("snp:==:hla-a 01", "HLA_A_01")]
    #[case("snp:==:a-01", "HLA_A_01")]
    #[case("snp:contains:a-01", "A_01")]
    #[case("snp:contains:b*0702", "B_0702")]
    fn translate_normalises_snp_values(#[case] raw: &str, #[case] value: &str) {
        assert_eq!(value, super::translate(raw).unwrap().value);
    }
}
