use matchkit_core::Record;

use crate::config::{MatchConfig, Thresholds};
use crate::model::MatchResult;
use crate::strategy::{BestEffort, FieldIdentity, IndexAlignment, MatchStrategy};

/// Strategy cascade: field identity, then index alignment, then fuzzy best
/// effort. The first strategy that produces a result wins.
#[derive(Debug)]
pub struct Matcher {
    cascade: Vec<Box<dyn MatchStrategy>>,
    fallback: BestEffort,
}

impl Matcher {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            cascade: vec![
                Box::new(FieldIdentity { threshold: thresholds.field_identity }),
                Box::new(IndexAlignment),
            ],
            fallback: BestEffort { threshold: thresholds.fuzzy },
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.thresholds)
    }

    /// Pair `expected` with `actual`.
    ///
    /// Never fails: records without a counterpart come back as one-sided
    /// triples. Every input record appears in exactly one triple.
    pub fn match_items<'a>(
        &self,
        expected: &'a [Record],
        actual: &'a [Record],
        fields: &[String],
    ) -> MatchResult<'a> {
        if expected.is_empty() && actual.is_empty() {
            return MatchResult::empty();
        }

        for strategy in &self.cascade {
            if let Some(result) = strategy.attempt(expected, actual, fields) {
                log::debug!("matched {} expected / {} actual with {}", expected.len(), actual.len(), result.strategy);
                return result;
            }
        }

        let result = self.fallback.run(expected, actual, fields);
        log::debug!(
            "matched {} expected / {} actual with best_effort: {} paired",
            expected.len(),
            actual.len(),
            result.paired_count()
        );
        result
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

/// [`Matcher::match_items`] with default thresholds.
pub fn match_items<'a>(expected: &'a [Record], actual: &'a [Record], fields: &[String]) -> MatchResult<'a> {
    Matcher::default().match_items(expected, actual, fields)
}
