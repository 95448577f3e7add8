use matchkit_core::value::serialize_field;
use matchkit_core::Record;

use crate::config::{DEFAULT_FIELD_IDENTITY_THRESHOLD, DEFAULT_FUZZY_THRESHOLD};
use crate::equality::values_match;
use crate::model::{MatchResult, MatchTriple, StrategyKind};
use crate::similarity::similarity;

/// One way of pairing expected records with actual records.
///
/// `attempt` returns `None` when the strategy does not apply or its result is
/// not good enough, letting the matcher fall through to the next one.
pub trait MatchStrategy: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> StrategyKind;

    fn attempt<'a>(
        &self,
        expected: &'a [Record],
        actual: &'a [Record],
        fields: &[String],
    ) -> Option<MatchResult<'a>>;
}

// ---------------------------------------------------------------------------
// Consumption pool
// ---------------------------------------------------------------------------

/// Actual records still available for pairing. Consumed records keep their
/// slot so original positions stay addressable.
struct ActualPool<'a> {
    records: &'a [Record],
    consumed: Vec<bool>,
}

impl<'a> ActualPool<'a> {
    fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            consumed: vec![false; records.len()],
        }
    }

    /// Unconsumed records with their input positions, in input order.
    fn live(&self) -> impl Iterator<Item = (usize, &'a Record)> + '_ {
        let records = self.records;
        records
            .iter()
            .enumerate()
            .filter(move |(i, _)| !self.consumed[*i])
    }

    fn consume(&mut self, index: usize) {
        self.consumed[index] = true;
    }
}

// ---------------------------------------------------------------------------
// Field identity
// ---------------------------------------------------------------------------

/// Pair records whose first field is tolerantly equal.
#[derive(Debug, Clone)]
pub struct FieldIdentity {
    /// Minimum paired share for the result to be accepted.
    pub threshold: f64,
}

impl Default for FieldIdentity {
    fn default() -> Self {
        Self { threshold: DEFAULT_FIELD_IDENTITY_THRESHOLD }
    }
}

impl FieldIdentity {
    /// Pair on `field` without the quality gate.
    pub fn pair<'a>(&self, expected: &'a [Record], actual: &'a [Record], field: &str) -> MatchResult<'a> {
        let mut pool = ActualPool::new(actual);
        let mut matches = Vec::with_capacity(expected.len().max(actual.len()));

        for (i, exp) in expected.iter().enumerate() {
            let wanted = exp.get(field);
            let found = pool.live().find(|(_, act)| values_match(wanted, act.get(field)));
            match found {
                Some((j, act)) => {
                    pool.consume(j);
                    let label = format!("{field}={}", serialize_field(wanted));
                    matches.push(MatchTriple::paired((i, exp), (j, act), label));
                }
                None => matches.push(MatchTriple::missing((i, exp), format!("exp[{i}]"))),
            }
        }

        for (j, act) in pool.live() {
            let label = format!("extra_{field}={}", serialize_field(act.get(field)));
            matches.push(MatchTriple::extra((j, act), label));
        }

        MatchResult {
            matches,
            strategy: format!("by_{field}"),
            kind: StrategyKind::FieldIdentity,
        }
    }

    /// Whether a field-identity result is good enough to commit to.
    pub fn is_good(&self, result: &MatchResult<'_>) -> bool {
        !result.matches.is_empty() && result.paired_ratio() >= self.threshold
    }
}

impl MatchStrategy for FieldIdentity {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FieldIdentity
    }

    fn attempt<'a>(
        &self,
        expected: &'a [Record],
        actual: &'a [Record],
        fields: &[String],
    ) -> Option<MatchResult<'a>> {
        let field = fields.first()?;
        let result = self.pair(expected, actual, field);
        if self.is_good(&result) {
            log::debug!(
                "field identity on '{field}' accepted: {}/{} paired",
                result.paired_count(),
                result.matches.len()
            );
            Some(result)
        } else {
            log::debug!(
                "field identity on '{field}' rejected: paired ratio {:.2} below {:.2}",
                result.paired_ratio(),
                self.threshold
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Index alignment
// ---------------------------------------------------------------------------

/// Pair by position when both sides have the same length.
///
/// Equal cardinality alone licenses this; contents are never inspected, so
/// reordered unrelated collections of equal size pair up position by position.
#[derive(Debug, Clone, Default)]
pub struct IndexAlignment;

impl MatchStrategy for IndexAlignment {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Index
    }

    fn attempt<'a>(
        &self,
        expected: &'a [Record],
        actual: &'a [Record],
        _fields: &[String],
    ) -> Option<MatchResult<'a>> {
        if expected.len() != actual.len() {
            log::debug!(
                "index alignment skipped: {} expected vs {} actual",
                expected.len(),
                actual.len()
            );
            return None;
        }
        let matches = expected
            .iter()
            .zip(actual)
            .enumerate()
            .map(|(i, (exp, act))| MatchTriple::paired((i, exp), (i, act), format!("index_{i}")))
            .collect();
        Some(MatchResult {
            matches,
            strategy: "by_index".to_string(),
            kind: StrategyKind::Index,
        })
    }
}

// ---------------------------------------------------------------------------
// Fuzzy best effort
// ---------------------------------------------------------------------------

/// Greedy pairing on multi-field similarity. Always produces a result.
#[derive(Debug, Clone)]
pub struct BestEffort {
    /// A pairing needs a similarity strictly above this.
    pub threshold: f64,
}

impl Default for BestEffort {
    fn default() -> Self {
        Self { threshold: DEFAULT_FUZZY_THRESHOLD }
    }
}

impl BestEffort {
    pub fn run<'a>(&self, expected: &'a [Record], actual: &'a [Record], fields: &[String]) -> MatchResult<'a> {
        let mut pool = ActualPool::new(actual);
        let mut matches = Vec::with_capacity(expected.len().max(actual.len()));

        for (i, exp) in expected.iter().enumerate() {
            let mut best: Option<(usize, &'a Record, f64)> = None;
            for (j, act) in pool.live() {
                let score = similarity(exp, act, fields);
                log::trace!("fuzzy exp[{i}] vs actual[{j}]: {score:.4}");
                // Strict comparison keeps the first candidate on ties.
                if best.map_or(true, |(_, _, top)| score > top) {
                    best = Some((j, act, score));
                }
            }

            match best {
                Some((j, act, score)) if score > self.threshold => {
                    pool.consume(j);
                    matches.push(MatchTriple::paired((i, exp), (j, act), format!("fuzzy[{i}]_score={score:.2}")));
                }
                _ => matches.push(MatchTriple::missing((i, exp), format!("missing_exp[{i}]"))),
            }
        }

        for (j, (pos, act)) in pool.live().enumerate() {
            matches.push(MatchTriple::extra((pos, act), format!("extra_actual[{j}]")));
        }

        MatchResult {
            matches,
            strategy: "best_effort".to_string(),
            kind: StrategyKind::BestEffort,
        }
    }
}

impl MatchStrategy for BestEffort {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BestEffort
    }

    fn attempt<'a>(
        &self,
        expected: &'a [Record],
        actual: &'a [Record],
        fields: &[String],
    ) -> Option<MatchResult<'a>> {
        Some(self.run(expected, actual, fields))
    }
}
