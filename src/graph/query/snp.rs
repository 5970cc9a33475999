//! Canonicalise user-entered HLA allele identifiers.

use std::sync::LazyLock;

use regex::Regex;

/// Leading `HLA` token with an optional delimiter.
static PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^HLA[-_\s]?").expect("invalid regex"));

/// Delimiters normalised to underscores.
static DELIMITERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s/*]").expect("invalid regex"));

/// Gene token plus two-digit serotype and optional two-digit subtype.
static STRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Z]+\d?)[_\s-]?(\d{2})([:_\s-]?(\d{2}))?$").expect("invalid regex")
});

/// Normalise a user-entered allele identifier towards the canonical
/// `HLA_<GENE>_<digits>` form.
///
/// The `HLA_` prefix is re-added only for exact (`==`) comparisons, so that
/// `contains` filters still match the middle of an identifier. Values that
/// do not match the allele structure fall back to the delimiter-normalised
/// uppercase form; the function never fails.
pub fn normalise(value: &str, exact: bool) -> String {
    let stripped = PREFIX.replace(value, "");
    let normalised = DELIMITERS.replace_all(&stripped, "_");
    let result = if let Some(caps) = STRUCTURE.captures(&normalised) {
        let gene = caps
            .get(1)
            .expect("group 1 is not optional")
            .as_str()
            .to_uppercase();
        let serotype = caps.get(2).expect("group 2 is not optional").as_str();
        let subtype = caps.get(4).map(|m| m.as_str()).unwrap_or("");
        format!("{gene}_{serotype}{subtype}")
    } else {
        normalised.to_uppercase()
    };
    if exact {
        format!("HLA_{result}")
    } else {
        result
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("hla-a 01", "HLA_A_01")]
    #[case("hla_a_01", "HLA_A_01")]
    #[case("HLA-A01", "HLA_A_01")]
    #[case("a-01", "HLA_A_01")]
    fn normalise_exact_equivalence_classes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(expected, super::normalise(raw, true));
    }

    #[rstest]
    #[case("b*0702", "B_0702")]
    #[case("hla drb1 0101", "DRB1_0101")]
    #[case("a-01", "A_01")]
    fn normalise_contains_omits_prefix(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(expected, super::normalise(raw, false));
    }

    #[rstest]
    #[case("drb1-0101", true, "HLA_DRB1_0101")]
    #[case("HLA_DQB1_03:01", true, "HLA_DQB1_0301")]
    fn normalise_four_digit_subtypes(#[case] raw: &str, #[case] exact: bool, #[case] expected: &str) {
        assert_eq!(expected, super::normalise(raw, exact));
    }

    #[rstest]
    #[case("not an allele!", true, "HLA_NOT_AN_ALLELE!")]
    #[case("dr3", false, "DR3")]
    fn normalise_structural_mismatch_falls_back(
        #[case] raw: &str,
        #[case] exact: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(expected, super::normalise(raw, exact));
    }
}
