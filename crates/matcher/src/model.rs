use serde::Serialize;

use matchkit_core::Record;

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Which strategy produced a [`MatchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Empty,
    FieldIdentity,
    Index,
    BestEffort,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::FieldIdentity => write!(f, "field_identity"),
            Self::Index => write!(f, "index"),
            Self::BestEffort => write!(f, "best_effort"),
        }
    }
}

// ---------------------------------------------------------------------------
// Triples
// ---------------------------------------------------------------------------

/// One pairing. At least one side is present; `match_id` records how the
/// pairing was produced and is not a stable key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchTriple<'a> {
    pub expected: Option<&'a Record>,
    pub actual: Option<&'a Record>,
    pub match_id: String,
    /// Position of `expected` in the expected input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_index: Option<usize>,
    /// Position of `actual` in the actual input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_index: Option<usize>,
}

impl<'a> MatchTriple<'a> {
    pub fn paired(
        expected: (usize, &'a Record),
        actual: (usize, &'a Record),
        match_id: impl Into<String>,
    ) -> Self {
        Self {
            expected: Some(expected.1),
            actual: Some(actual.1),
            match_id: match_id.into(),
            expected_index: Some(expected.0),
            actual_index: Some(actual.0),
        }
    }

    /// Expected record with no counterpart.
    pub fn missing(expected: (usize, &'a Record), match_id: impl Into<String>) -> Self {
        Self {
            expected: Some(expected.1),
            actual: None,
            match_id: match_id.into(),
            expected_index: Some(expected.0),
            actual_index: None,
        }
    }

    /// Actual record with no expected counterpart.
    pub fn extra(actual: (usize, &'a Record), match_id: impl Into<String>) -> Self {
        Self {
            expected: None,
            actual: Some(actual.1),
            match_id: match_id.into(),
            expected_index: None,
            actual_index: Some(actual.0),
        }
    }

    pub fn is_paired(&self) -> bool {
        self.expected.is_some() && self.actual.is_some()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub matches: Vec<MatchTriple<'a>>,
    /// Strategy label: `empty`, `by_<field>`, `by_index` or `best_effort`.
    pub strategy: String,
    #[serde(skip)]
    pub kind: StrategyKind,
}

impl<'a> MatchResult<'a> {
    pub fn empty() -> Self {
        Self {
            matches: Vec::new(),
            strategy: "empty".to_string(),
            kind: StrategyKind::Empty,
        }
    }

    pub fn paired_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_paired()).count()
    }

    /// Share of triples with both sides present; 0.0 for an empty result.
    pub fn paired_ratio(&self) -> f64 {
        if self.matches.is_empty() {
            return 0.0;
        }
        self.paired_count() as f64 / self.matches.len() as f64
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub strategy: String,
    pub total: usize,
    pub paired: usize,
    /// Expected records left without a counterpart.
    pub missing: usize,
    /// Actual records with no expected counterpart.
    pub extra: usize,
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub meta: RunMeta,
    pub summary: MatchSummary,
    pub result: MatchResult<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<crate::compare::ComparisonReport>,
}

impl RunReport<'_> {
    /// True unless a configured field comparison failed.
    pub fn passed(&self) -> bool {
        self.comparison.as_ref().map_or(true, |c| c.passed)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
    pub fields: Vec<String>,
    pub expected_count: usize,
    pub actual_count: usize,
}
