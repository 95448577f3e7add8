use std::collections::HashSet;

use serde::Deserialize;

use crate::error::MatchError;

/// Default quality threshold for the field-identity strategy.
pub const DEFAULT_FIELD_IDENTITY_THRESHOLD: f64 = 0.8;

/// Default minimum similarity for a fuzzy pairing.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    #[serde(default)]
    pub name: String,
    /// Ordered field list. The first entry drives field-identity matching,
    /// all of them feed fuzzy similarity.
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub compare: CompareConfig,
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    /// Minimum share of fully paired triples for field-identity to be accepted.
    #[serde(default = "default_field_identity")]
    pub field_identity: f64,
    /// A fuzzy pairing needs a similarity strictly above this.
    #[serde(default = "default_fuzzy")]
    pub fuzzy: f64,
}

fn default_field_identity() -> f64 {
    DEFAULT_FIELD_IDENTITY_THRESHOLD
}

fn default_fuzzy() -> f64 {
    DEFAULT_FUZZY_THRESHOLD
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            field_identity: DEFAULT_FIELD_IDENTITY_THRESHOLD,
            fuzzy: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareConfig {
    /// Fields checked on every triple after matching.
    #[serde(default)]
    pub fields: Vec<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, MatchError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        check_threshold("thresholds.field_identity", self.thresholds.field_identity)?;
        check_threshold("thresholds.fuzzy", self.thresholds.fuzzy)?;
        check_field_list("fields", &self.fields)?;
        check_field_list("compare.fields", &self.compare.fields)?;
        Ok(())
    }
}

fn check_threshold(name: &str, value: f64) -> Result<(), MatchError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MatchError::ConfigValidation(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn check_field_list(name: &str, fields: &[String]) -> Result<(), MatchError> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.trim().is_empty() {
            return Err(MatchError::ConfigValidation(format!("{name}: empty field name")));
        }
        if !seen.insert(field.as_str()) {
            return Err(MatchError::ConfigValidation(format!(
                "{name}: duplicate field '{field}'"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
