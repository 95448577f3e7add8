use serde::Serialize;

use matchkit_core::build_rationale;
use matchkit_core::value::serialize_field;

use crate::equality::values_match;
use crate::model::MatchResult;

/// Per-field outcome over every triple of a match result.
#[derive(Debug, Clone, Serialize)]
pub struct FieldComparison {
    pub field: String,
    pub total: usize,
    pub passed: usize,
    pub all_passed: bool,
    pub rationale: String,
    pub failures: Vec<FieldFailure>,
}

/// One failing instance. One-sided triples render the absent side as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct FieldFailure {
    pub match_id: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub strategy: String,
    pub passed: bool,
    pub fields: Vec<FieldComparison>,
}

/// Check `fields` on every triple. An instance passes only when both records
/// are present and the field values match tolerantly.
pub fn compare_fields(result: &MatchResult<'_>, fields: &[String]) -> ComparisonReport {
    let fields: Vec<FieldComparison> = fields.iter().map(|f| compare_field(result, f)).collect();
    ComparisonReport {
        strategy: result.strategy.clone(),
        passed: fields.iter().all(|f| f.all_passed),
        fields,
    }
}

fn compare_field(result: &MatchResult<'_>, field: &str) -> FieldComparison {
    let mut passed = 0;
    let mut failures = Vec::new();

    for m in &result.matches {
        let expected = m.expected.and_then(|r| r.get(field));
        let actual = m.actual.and_then(|r| r.get(field));
        if m.is_paired() && values_match(expected, actual) {
            passed += 1;
        } else {
            failures.push(FieldFailure {
                match_id: m.match_id.clone(),
                expected: serialize_field(expected),
                actual: serialize_field(actual),
            });
        }
    }

    let total = result.matches.len();
    let all_passed = failures.is_empty();
    FieldComparison {
        field: field.to_string(),
        total,
        passed,
        all_passed,
        rationale: build_rationale(field, all_passed, total, passed),
        failures,
    }
}
