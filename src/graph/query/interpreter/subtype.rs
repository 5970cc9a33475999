//! Subtype gate: main groups versus allele subtypes.

use crate::catalog::AssociationRecord;
use crate::graph::query::schema::CatalogQuery;

/// Subtype value marking a main-group record with no deeper specificity.
pub const MAIN_GROUP: &str = "00";

/// Determine whether the record passes the subtype gate.
///
/// The gate is skipped entirely for the initial category view and for
/// export. Otherwise main groups and subtypes are mutually exclusive: a
/// level shows either the `"00"` rows or the non-`"00"` rows, never both.
pub fn passes(query: &CatalogQuery, record: &AssociationRecord) -> bool {
    if query.bypass_subtype_gate {
        return true;
    }
    if query.show_subtypes {
        record.subtype != MAIN_GROUP
    } else {
        record.subtype == MAIN_GROUP
    }
}
