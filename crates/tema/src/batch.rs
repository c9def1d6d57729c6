//! Reading comment batches and writing classified results.
//!
//! Input is either one comment per line or a JSON array whose items are
//! strings, other scalars, or objects carrying the comment under a field.
//! Every item becomes a string: `null` and missing fields become `""`, other
//! scalars use their JSON text. Invalid UTF-8 is replaced, never rejected.

use crate::classify::TopicClassifier;
use crate::error::{Result, TemaError};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;

/// Field read from JSON objects when none is given.
pub const DEFAULT_COMMENT_FIELD: &str = "comment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Lines,
    Json,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Lines => "lines",
            InputFormat::Json => "json",
        }
    }
}

impl FromStr for InputFormat {
    type Err = TemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lines" | "txt" | "text" => Ok(InputFormat::Lines),
            "json" => Ok(InputFormat::Json),
            _ => Err(TemaError::UnsupportedFormat(format!(
                "'{}' is not an input format. Use 'lines' or 'json'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(TemaError::UnsupportedFormat(format!(
                "'{}' is not an output format. Use 'tsv', 'csv' or 'json'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassifiedComment {
    pub comment: String,
    pub label: String,
}

/// Read all comments from `reader`.
pub fn read_comments<R: Read>(mut reader: R, format: InputFormat, field: &str) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let content = String::from_utf8_lossy(&bytes);

    match format {
        InputFormat::Lines => Ok(content.lines().map(str::to_string).collect()),
        InputFormat::Json => parse_json_comments(&content, field),
    }
}

/// Extract comments from a JSON array.
pub fn parse_json_comments(content: &str, field: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(TemaError::InvalidInput(format!(
                "expected a JSON array of comments, found {}",
                json_kind(&other)
            )))
        }
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(mut map) => map.remove(field).map(value_to_text).unwrap_or_default(),
            other => value_to_text(other),
        })
        .collect())
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
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

pub fn classify_comments(classifier: &TopicClassifier, comments: Vec<String>) -> Vec<ClassifiedComment> {
    comments
        .into_iter()
        .map(|comment| {
            let label = classifier.classify(&comment).to_string();
            ClassifiedComment { comment, label }
        })
        .collect()
}

/// Render classified comments. Delimited formats put the label first.
pub fn render(records: &[ClassifiedComment], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Tsv => {
            let mut out = String::from("label\tcomment\n");
            for record in records {
                out.push_str(&format!(
                    "{}\t{}\n",
                    record.label,
                    sanitize_tsv(&record.comment)
                ));
            }
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut out = String::from("label,comment\n");
            for record in records {
                out.push_str(&format!(
                    "{},{}\n",
                    escape_csv(&record.label),
                    escape_csv(&record.comment)
                ));
            }
            Ok(out)
        }
    }
}

fn sanitize_tsv(field: &str) -> String {
    field.replace(['\t', '\n', '\r'], " ")
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
