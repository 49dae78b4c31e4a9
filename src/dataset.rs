//! Mock datasets loaded from YAML
//!
//! ```yaml
//! requests.get:
//!   - args: ["https://mocked.url"]
//!     result:
//!       status_code: 200
//!       content: "Gocha!"
//!   - args: "*"
//!     result:
//!       status_code: 404
//! db.connect:
//!   - error: "connection refused"
//! ```

use crate::logging;
use crate::{Result, SmockError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const ARGS_FIELD: &str = "args";
const KWARGS_FIELD: &str = "kwargs";
const RESULT_FIELD: &str = "result";
const RAW_RESULT_FIELD: &str = "result:raw";
const ERROR_FIELD: &str = "error";

/// What a matching rule produces
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Returned through the value wrapper
    Result(Value),
    /// Returned as-is
    Raw(Value),
    /// Signaled to the caller as a failure with this message
    Error(String),
}

/// One candidate (pattern, outcome) pair for a call name
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub args: Value,
    pub kwargs: Value,
    pub outcome: Outcome,
}

impl Rule {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            args: Value::Array(Vec::new()),
            kwargs: Value::Object(Map::new()),
            outcome,
        }
    }

    pub fn with_args(mut self, args: Value) -> Self {
        self.args = args;
        self
    }

    pub fn with_kwargs(mut self, kwargs: Value) -> Self {
        self.kwargs = kwargs;
        self
    }

    fn from_record(name: &str, index: usize, record: Value) -> Result<Self> {
        let invalid = |reason: String| SmockError::InvalidRule {
            name: name.to_string(),
            index,
            reason,
        };

        let mut record = match record {
            Value::Object(map) => map,
            other => return Err(invalid(format!("expected a mapping, got {other}"))),
        };

        let args = record
            .remove(ARGS_FIELD)
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let kwargs = record
            .remove(KWARGS_FIELD)
            .unwrap_or_else(|| Value::Object(Map::new()));

        let mut outcomes = Vec::with_capacity(1);
        if let Some(value) = record.remove(RESULT_FIELD) {
            outcomes.push(Outcome::Result(value));
        }
        if let Some(value) = record.remove(RAW_RESULT_FIELD) {
            outcomes.push(Outcome::Raw(value));
        }
        if let Some(value) = record.remove(ERROR_FIELD) {
            let message = match value {
                Value::String(message) => message,
                other => other.to_string(),
            };
            outcomes.push(Outcome::Error(message));
        }

        if let Some(field) = record.keys().next() {
            return Err(invalid(format!("unknown field '{field}'")));
        }

        match outcomes.len() {
            1 => Ok(Self {
                args,
                kwargs,
                outcome: outcomes.remove(0),
            }),
            0 => Err(invalid(format!(
                "missing outcome, expected one of `{RESULT_FIELD}`, `{RAW_RESULT_FIELD}`, `{ERROR_FIELD}`"
            ))),
            _ => Err(invalid(format!(
                "{} outcomes declared, expected exactly one",
                outcomes.len()
            ))),
        }
    }
}

/// All rules across all call names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    calls: BTreeMap<String, Vec<Rule>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document. `origin` only labels errors.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self> {
        let parse_error = |message: String| SmockError::Parse {
            origin: origin.to_string(),
            message,
        };

        let blank = text.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::new());
        }

        let document: Option<BTreeMap<String, Option<Vec<Value>>>> =
            serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;

        let mut dataset = Self::new();
        for (name, records) in document.unwrap_or_default() {
            let rules = records
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(index, record)| Rule::from_record(&name, index, record))
                .collect::<Result<Vec<_>>>()?;
            dataset.calls.insert(name, rules);
        }
        Ok(dataset)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SmockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_yaml_str(&text, &path.display().to_string())?;
        logging::log_dataset_loaded(&path.to_string_lossy(), dataset.len());
        Ok(dataset)
    }

    /// Load several sources in order; see [`Dataset::merge`].
    pub fn from_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let mut dataset = Self::new();
        for path in paths {
            dataset.merge(Self::from_file(path)?);
        }
        Ok(dataset)
    }

    /// Later sources win: a call name present in `other` replaces its rule
    /// list here, new names are added.
    pub fn merge(&mut self, other: Dataset) {
        for (name, rules) in other.calls {
            if self.calls.insert(name.clone(), rules).is_some() {
                tracing::debug!(name = %name, "Call rules overridden by later source");
            }
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, rules: Vec<Rule>) {
        self.calls.insert(name.into(), rules);
    }

    /// Append one rule after the existing rules for `name`
    pub fn push_rule(&mut self, name: impl Into<String>, rule: Rule) {
        self.calls.entry(name.into()).or_default().push(rule);
    }

    pub fn rules(&self, name: &str) -> Option<&[Rule]> {
        self.calls.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.calls.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.calls
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    /// Number of call names
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
