//! Tokenise a raw filter string into ordered `(connector, predicate)` pairs.

use std::sync::LazyLock;

use regex::Regex;

use super::schema::{Connector, FilterExpression, FilterTerm};

/// Pattern splitting on `AND`/`OR` connector tokens, retaining the token.
static CONNECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(AND|OR)\s*").expect("invalid regex"));

/// A piece of the raw expression: either a connector token or a text chunk
/// between connectors.
enum Piece<'a> {
    Connector(Connector),
    Chunk(&'a str),
}

/// Tokenise `raw` into an ordered filter expression.
///
/// Connector keywords apply to the next predicate only; comma-separated
/// predicates within the same chunk default to `AND`. Sub-pieces are trimmed
/// and unquoted; fully double-quoted pieces may carry embedded commas. An
/// empty input yields an empty expression.
pub fn parse(raw: &str) -> FilterExpression {
    let mut terms = FilterExpression::new();
    let mut pending: Option<Connector> = None;
    for piece in split_retaining_connectors(raw) {
        match piece {
            Piece::Connector(connector) => pending = Some(connector),
            Piece::Chunk(chunk) => {
                for sub in split_on_unquoted_commas(chunk) {
                    let sub = sub.trim().trim_matches('"');
                    if sub.is_empty() {
                        continue;
                    }
                    terms.push(FilterTerm {
                        connector: pending.take().unwrap_or_default(),
                        predicate: sub.to_string(),
                    });
                }
            }
        }
    }
    terms
}

/// Split `raw` at connector keywords, keeping the keywords as pieces of
/// their own (the capturing-split the expression grammar is defined by).
fn split_retaining_connectors(raw: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in CONNECTOR.captures_iter(raw) {
        let whole = caps.get(0).expect("group 0 is the whole match");
        pieces.push(Piece::Chunk(&raw[last..whole.start()]));
        let token = caps.get(1).expect("group 1 is not optional").as_str();
        pieces.push(Piece::Connector(
            token.parse().expect("token is AND or OR by construction"),
        ));
        last = whole.end();
    }
    pieces.push(Piece::Chunk(&raw[last..]));
    pieces
}

/// Split a chunk on commas that are not inside double quotes.
fn split_on_unquoted_commas(chunk: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in chunk.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                pieces.push(&chunk[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&chunk[start..]);
    pieces
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::graph::query::schema::Connector;

    fn terms(raw: &str) -> Vec<(Connector, String)> {
        super::parse(raw)
            .into_iter()
            .map(|term| (term.connector, term.predicate))
            .collect()
    }

    #[test]
    fn parse_empty_input_yields_empty_expression() {
        assert_eq!(Vec::<(Connector, String)>::new(), terms(""));
    }

    #[test]
    fn parse_single_predicate_defaults_to_and() {
        assert_eq!(
            vec![(Connector::And, String::from("p:<:0.01"))],
            terms("p:<:0.01")
        );
    }

    #[test]
    fn parse_keeps_connectors_in_order() {
        assert_eq!(
            vec![
                (Connector::And, String::from("category:==:neurological")),
                (Connector::Or, String::from("category:==:circulatory system")),
                (Connector::And, String::from("p:<:0.01")),
            ],
            terms("category:==:neurological OR category:==:circulatory system AND p:<:0.01")
        );
    }

    #[test]
    fn parse_commas_default_to_and() {
        assert_eq!(
            vec![
                (Connector::And, String::from("gene_class:==:1")),
                (Connector::And, String::from("maf:>:0.1")),
            ],
            terms("gene_class:==:1, maf:>:0.1")
        );
    }

    #[test]
    fn parse_connector_applies_to_first_comma_piece_only() {
        assert_eq!(
            vec![
                (Connector::And, String::from("a:==:x")),
                (Connector::Or, String::from("b:==:y")),
                (Connector::And, String::from("c:==:z")),
            ],
            terms("a:==:x OR b:==:y,c:==:z")
        );
    }

    #[test]
    fn parse_leading_connector_is_recorded() {
        // A leading connector has no left-hand side; the fold ignores the
        // seed term's connector, so this behaves like AND downstream.
        assert_eq!(vec![(Connector::Or, String::from("a:==:x"))], terms("OR a:==:x"));
    }

    #[test]
    fn parse_quoted_pieces_protect_commas() {
        assert_eq!(
            vec![
                (Connector::And, String::from("phenotype:==:lupus, systemic")),
                (Connector::And, String::from("p:<:0.05")),
            ],
            terms(r#""phenotype:==:lupus, systemic", p:<:0.05"#)
        );
    }

    #[rstest]
    #[case(",,,")]
    #[case("  ")]
    #[case("AND")]
    fn parse_degenerate_inputs_yield_empty_expression(#[case] raw: &str) {
        assert_eq!(Vec::<(Connector, String)>::new(), terms(raw));
    }
}
