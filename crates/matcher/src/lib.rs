//! `matchkit-engine`: structured-output matching engine.
//!
//! Pure engine crate: receives pre-loaded records, returns pairings with the
//! strategy that produced them. Loading helpers live in [`engine`].

pub mod compare;
pub mod config;
pub mod engine;
pub mod equality;
pub mod error;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod similarity;
pub mod strategy;

pub use compare::{compare_fields, ComparisonReport};
pub use config::MatchConfig;
pub use engine::{run, MatchInput};
pub use equality::values_match;
pub use error::MatchError;
pub use matcher::{match_items, Matcher};
pub use model::{MatchResult, MatchSummary, MatchTriple, RunReport, StrategyKind};
pub use similarity::similarity;

pub use matchkit_core::{build_rationale, serialize_value, Record, ToRecord};
