//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                              |
//! |---------|------------|------------------------------------------|
//! | 0       | Universal  | Success                                  |
//! | 1       | Universal  | Comparison failed / general error        |
//! | 2       | Universal  | CLI usage error (bad args, missing file) |
//! | 3-9     | run        | Matching-specific codes                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use matchkit_engine::MatchError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed, every compared field matched.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Run (3-9)
// =============================================================================

/// At least one compared field failed. Like `diff(1)`, exit 1 means "differs."
pub const EXIT_RUN_FIELDS_FAILED: u8 = 1;

/// Config file did not parse or failed validation.
pub const EXIT_RUN_INVALID_CONFIG: u8 = 3;

/// Input records could not be read or parsed.
pub const EXIT_RUN_INPUT: u8 = 4;

/// Runtime failure (coverage violation, output write failure).
pub const EXIT_RUN_RUNTIME: u8 = 5;

/// Map an engine error to its exit code.
pub fn match_exit_code(err: &MatchError) -> u8 {
    match err {
        MatchError::ConfigParse(_) | MatchError::ConfigValidation(_) => EXIT_RUN_INVALID_CONFIG,
        MatchError::InputParse { .. } | MatchError::UnsupportedFormat(_) | MatchError::Io(_) => {
            EXIT_RUN_INPUT
        }
        MatchError::Coverage(_) => EXIT_RUN_RUNTIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_to_invalid_config() {
        assert_eq!(match_exit_code(&MatchError::ConfigParse("x".into())), EXIT_RUN_INVALID_CONFIG);
        assert_eq!(match_exit_code(&MatchError::ConfigValidation("x".into())), EXIT_RUN_INVALID_CONFIG);
    }

    #[test]
    fn input_errors_map_to_input() {
        let err = MatchError::InputParse { source_name: "a.json".into(), message: "bad".into() };
        assert_eq!(match_exit_code(&err), EXIT_RUN_INPUT);
        assert_eq!(match_exit_code(&MatchError::UnsupportedFormat(".xml".into())), EXIT_RUN_INPUT);
    }

    #[test]
    fn codes_are_distinct_where_it_matters() {
        let codes = [EXIT_SUCCESS, EXIT_USAGE, EXIT_RUN_INVALID_CONFIG, EXIT_RUN_INPUT, EXIT_RUN_RUNTIME];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
