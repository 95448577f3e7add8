use std::path::Path;

use serde_json::{Map, Value};

use matchkit_core::{Record, ToRecord};

use crate::compare::compare_fields;
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::evidence::{compute_summary, verify_coverage};
use crate::matcher::Matcher;
use crate::model::{RunMeta, RunReport};

/// Pre-loaded records for one comparison.
#[derive(Debug, Clone, Default)]
pub struct MatchInput {
    pub expected: Vec<Record>,
    pub actual: Vec<Record>,
}

/// Run matching per config. Returns the match result, summary and (when
/// `compare.fields` is set) the per-field comparison.
pub fn run<'a>(config: &MatchConfig, input: &'a MatchInput) -> Result<RunReport<'a>, MatchError> {
    let matcher = Matcher::from_config(config);
    let result = matcher.match_items(&input.expected, &input.actual, &config.fields);
    verify_coverage(&result, input.expected.len(), input.actual.len())?;

    let summary = compute_summary(&result);
    let comparison = if config.compare.fields.is_empty() {
        None
    } else {
        Some(compare_fields(&result, &config.compare.fields))
    };

    Ok(RunReport {
        meta: RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            fields: config.fields.clone(),
            expected_count: input.expected.len(),
            actual_count: input.actual.len(),
        },
        summary,
        result,
        comparison,
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A JSON array; each element becomes one record.
    Json,
    /// One JSON value per line; blank lines are skipped.
    JsonLines,
    /// Header row plus data rows; every cell is a string field.
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, MatchError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            "csv" => Ok(Self::Csv),
            "" => Err(MatchError::UnsupportedFormat(format!("{} has no extension", path.display()))),
            other => Err(MatchError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Read and parse a record file, inferring the format from its extension.
pub fn load_records_file(path: &Path) -> Result<Vec<Record>, MatchError> {
    let format = InputFormat::from_path(path)?;
    let data = std::fs::read_to_string(path)
        .map_err(|e| MatchError::Io(format!("cannot read {}: {e}", path.display())))?;
    load_records(&path.display().to_string(), &data, format)
}

/// Parse records from text. Non-object items are wrapped as `{"value": item}`.
pub fn load_records(source_name: &str, data: &str, format: InputFormat) -> Result<Vec<Record>, MatchError> {
    let parse_err = |message: String| MatchError::InputParse {
        source_name: source_name.to_string(),
        message,
    };

    match format {
        InputFormat::Json => {
            let value: Value = serde_json::from_str(data).map_err(|e| parse_err(e.to_string()))?;
            match value {
                Value::Array(items) => Ok(items.iter().map(ToRecord::to_record).collect()),
                other => Err(parse_err(format!("expected a JSON array, found {}", json_kind(&other)))),
            }
        }
        InputFormat::JsonLines => {
            let mut records = Vec::new();
            for (line_no, line) in data.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let value: Value = serde_json::from_str(line)
                    .map_err(|e| parse_err(format!("line {}: {e}", line_no + 1)))?;
                records.push(value.to_record());
            }
            Ok(records)
        }
        InputFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .from_reader(data.as_bytes());

            let headers: Vec<String> = reader
                .headers()
                .map_err(|e| parse_err(e.to_string()))?
                .iter()
                .map(|h| h.to_string())
                .collect();

            let mut records = Vec::new();
            for row in reader.records() {
                let row = row.map_err(|e| parse_err(e.to_string()))?;
                let mut fields = Map::new();
                for (i, h) in headers.iter().enumerate() {
                    if let Some(val) = row.get(i) {
                        fields.insert(h.clone(), Value::String(val.to_string()));
                    }
                }
                records.push(Record::from_map(fields));
            }
            Ok(records)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
