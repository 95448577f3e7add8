use std::fmt;

#[derive(Debug)]
pub enum MatchError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (threshold out of range, duplicate field, etc.).
    ConfigValidation(String),
    /// Input records could not be parsed.
    InputParse { source_name: String, message: String },
    /// Input file extension not recognized.
    UnsupportedFormat(String),
    /// A match result dropped or duplicated an input record.
    Coverage(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InputParse { source_name, message } => {
                write!(f, "cannot parse records from '{source_name}': {message}")
            }
            Self::UnsupportedFormat(what) => {
                write!(f, "unsupported input format: {what} (expected .json, .jsonl or .csv)")
            }
            Self::Coverage(msg) => write!(f, "coverage violation: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MatchError {}
