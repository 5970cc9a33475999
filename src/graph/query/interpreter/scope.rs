//! Structural scope gate (category and phenotype restriction).

use crate::catalog::AssociationRecord;
use crate::graph::query::schema::CatalogQuery;

/// Determine whether the record falls within the query's structural scope.
///
/// Matching is case-sensitive and exact on the de-slugged label; an unset
/// scope passes everything.
pub fn passes(query: &CatalogQuery, record: &AssociationRecord) -> bool {
    if let Some(category) = &query.category {
        if record.category != *category {
            return false;
        }
    }
    if let Some(phenotype) = &query.phenotype {
        if record.phenotype != *phenotype {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use crate::catalog::AssociationRecord;
    use crate::graph::query::schema::CatalogQuery;

    #[rstest]
    #[case(None, None, true)]
    #[case(Some("neurological"), None, true)]
    #[case(Some("Neurological"), None, false)]
    #[case(Some("circulatory system"), None, false)]
    #[case(None, Some("brain cancer"), true)]
    #[case(None, Some("lupus"), false)]
    #[case(Some("neurological"), Some("brain cancer"), true)]
    #[case(Some("neurological"), Some("lupus"), false)]
    fn passes(
        #[case] category: Option<&str>,
        #[case] phenotype: Option<&str>,
        #[case] expected: bool,
    ) {
        let query = CatalogQuery {
            category: category.map(String::from),
            phenotype: phenotype.map(String::from),
            ..Default::default()
        };
        let record = AssociationRecord {
            category: String::from("neurological"),
            phenotype: String::from("brain cancer"),
            ..Default::default()
        };
        assert_eq!(expected, super::passes(&query, &record));
    }
}
