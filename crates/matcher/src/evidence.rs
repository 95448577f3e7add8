use crate::error::MatchError;
use crate::model::{MatchResult, MatchSummary};

/// Compute summary statistics from a match result.
pub fn compute_summary(result: &MatchResult<'_>) -> MatchSummary {
    let mut paired = 0;
    let mut missing = 0;
    let mut extra = 0;

    for m in &result.matches {
        match (m.expected.is_some(), m.actual.is_some()) {
            (true, true) => paired += 1,
            (true, false) => missing += 1,
            (false, true) => extra += 1,
            (false, false) => {}
        }
    }

    MatchSummary {
        strategy: result.strategy.clone(),
        total: result.matches.len(),
        paired,
        missing,
        extra,
    }
}

/// Check that every expected and every actual input position appears in
/// exactly one triple, and that no triple is empty.
pub fn verify_coverage(
    result: &MatchResult<'_>,
    expected_len: usize,
    actual_len: usize,
) -> Result<(), MatchError> {
    let mut expected_seen = vec![0usize; expected_len];
    let mut actual_seen = vec![0usize; actual_len];

    for m in &result.matches {
        if m.expected.is_none() && m.actual.is_none() {
            return Err(MatchError::Coverage(format!("triple '{}' has no records", m.match_id)));
        }
        count_slot(&mut expected_seen, m.expected_index, m.expected.is_some(), "expected", &m.match_id)?;
        count_slot(&mut actual_seen, m.actual_index, m.actual.is_some(), "actual", &m.match_id)?;
    }

    check_all_once(&expected_seen, "expected")?;
    check_all_once(&actual_seen, "actual")?;
    Ok(())
}

fn count_slot(
    seen: &mut [usize],
    index: Option<usize>,
    present: bool,
    side: &str,
    match_id: &str,
) -> Result<(), MatchError> {
    match (index, present) {
        (Some(i), true) => {
            let slot = seen.get_mut(i).ok_or_else(|| {
                MatchError::Coverage(format!("triple '{match_id}': {side} index {i} out of range"))
            })?;
            *slot += 1;
            Ok(())
        }
        (None, false) => Ok(()),
        _ => Err(MatchError::Coverage(format!(
            "triple '{match_id}': {side} record and index disagree"
        ))),
    }
}

fn check_all_once(seen: &[usize], side: &str) -> Result<(), MatchError> {
    for (i, count) in seen.iter().enumerate() {
        match count {
            1 => {}
            0 => return Err(MatchError::Coverage(format!("{side}[{i}] dropped"))),
            n => return Err(MatchError::Coverage(format!("{side}[{i}] appears {n} times"))),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchTriple, StrategyKind};
    use matchkit_core::Record;
    use serde_json::json;

    fn result<'a>(matches: Vec<MatchTriple<'a>>) -> MatchResult<'a> {
        MatchResult {
            matches,
            strategy: "best_effort".into(),
            kind: StrategyKind::BestEffort,
        }
    }

    #[test]
    fn summary_counts() {
        let a = Record::from(json!({"text": "a"}));
        let b = Record::from(json!({"text": "b"}));
        let r = result(vec![
            MatchTriple::paired((0, &a), (0, &b), "fuzzy[0]_score=0.90"),
            MatchTriple::missing((1, &a), "missing_exp[1]"),
            MatchTriple::extra((1, &b), "extra_actual[0]"),
            MatchTriple::extra((2, &b), "extra_actual[1]"),
        ]);
        let summary = compute_summary(&r);
        assert_eq!(summary.strategy, "best_effort");
        assert_eq!(summary.total, 4);
        assert_eq!(summary.paired, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.extra, 2);
    }

    #[test]
    fn coverage_ok() {
        let a = Record::from(json!({}));
        let r = result(vec![
            MatchTriple::paired((0, &a), (1, &a), "x"),
            MatchTriple::extra((0, &a), "y"),
        ]);
        assert!(verify_coverage(&r, 1, 2).is_ok());
    }

    #[test]
    fn coverage_detects_drop() {
        let a = Record::from(json!({}));
        let r = result(vec![MatchTriple::missing((0, &a), "x")]);
        let err = verify_coverage(&r, 1, 1).unwrap_err();
        assert!(err.to_string().contains("actual[0] dropped"));
    }

    #[test]
    fn coverage_detects_duplicate() {
        let a = Record::from(json!({}));
        let r = result(vec![
            MatchTriple::paired((0, &a), (0, &a), "x"),
            MatchTriple::extra((0, &a), "y"),
        ]);
        let err = verify_coverage(&r, 1, 1).unwrap_err();
        assert!(err.to_string().contains("actual[0] appears 2 times"));
    }

    #[test]
    fn coverage_detects_empty_triple() {
        let r = result(vec![MatchTriple {
            expected: None,
            actual: None,
            match_id: "ghost".into(),
            expected_index: None,
            actual_index: None,
        }]);
        assert!(verify_coverage(&r, 0, 0).is_err());
    }
}
