//! Mandatory significance gate.

use crate::catalog::AssociationRecord;

/// Highest p-value considered significant.
pub const P_VALUE_CUTOFF: f64 = 0.05;

/// Determine whether the record is statistically significant.
///
/// Applied unconditionally and always last; user filters can only narrow
/// the significant set, never widen it.
pub fn passes(record: &AssociationRecord) -> bool {
    record.p <= P_VALUE_CUTOFF
}
