use serde_json::Value;

use matchkit_core::value::{as_number, is_blank};

/// Two numbers closer than this compare equal.
pub const NUMERIC_EPSILON: f64 = 1e-9;

/// Tolerant scalar equality used by field-identity matching.
///
/// Absent, null and `""` are interchangeable; numbers compare within
/// [`NUMERIC_EPSILON`]. Everything else must be structurally equal.
pub fn values_match(a: Option<&Value>, b: Option<&Value>) -> bool {
    if a == b {
        return true;
    }
    if is_blank(a) && is_blank(b) {
        return true;
    }
    match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => (x - y).abs() < NUMERIC_EPSILON,
        _ => false,
    }
}
