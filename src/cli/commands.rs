use crate::cli::args::{ListArgs, QueryArgs};
use crate::context::Smock;
use crate::logging;
use crate::ui::formatter::Formatter;
use crate::{Result, SmockError};
use serde_json::{Map, Value};
use std::path::PathBuf;

fn print_success(message: impl AsRef<str>) {
    println!("{}", Formatter::success(message));
}

fn load(data: &[PathBuf]) -> Result<Smock> {
    if data.is_empty() {
        return Err(SmockError::InvalidArguments(
            "no dataset given; pass --data FILE or set [data] sources in .smock.toml".to_string(),
        ));
    }
    Smock::from_files(data)
}

/// Execute the query command
pub fn query(args: QueryArgs) -> miette::Result<()> {
    let smocked = load(&args.data)?;

    let positional = match &args.args {
        Some(json) => parse_args(json)?,
        None => Vec::new(),
    };
    let keyword = match &args.kwargs {
        Some(json) => parse_kwargs(json)?,
        None => Map::new(),
    };

    let value = smocked
        .mock_res(&args.name, &positional, &keyword)?
        .into_value();

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(|e| SmockError::InvalidArguments(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

/// Execute the list command
pub fn list(args: ListArgs) -> miette::Result<()> {
    let smocked = load(&args.data)?;
    let dataset = smocked.dataset();

    let summary = dataset
        .iter()
        .map(|(name, rules)| Formatter::format_call(name, rules.len()))
        .collect::<Vec<_>>()
        .join("\n");
    logging::log_dataset_listed(
        dataset.len(),
        dataset.iter().map(|(_, rules)| rules.len()).sum(),
    );

    if !summary.is_empty() {
        println!("{summary}");
    }
    print_success(format!("{} mocked calls", dataset.len()));
    Ok(())
}

/// Parse positional arguments; a JSON array spreads into several arguments,
/// any other JSON value is a single argument.
pub fn parse_args(json: &str) -> Result<Vec<Value>> {
    let value = serde_json::from_str::<Value>(json)
        .map_err(|e| SmockError::InvalidArguments(format!("Invalid JSON arguments {json}: {e}")))?;

    match value {
        Value::Array(items) => {
            tracing::debug!(count = items.len(), "Parsed array arguments");
            Ok(items)
        }
        single => {
            tracing::debug!("Parsed single value argument");
            Ok(vec![single])
        }
    }
}

pub fn parse_kwargs(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => {
            tracing::debug!(fields = map.len(), "Parsed keyword arguments");
            Ok(map)
        }
        Ok(other) => Err(SmockError::InvalidArguments(format!(
            "keyword arguments must be a JSON object, got {other}"
        ))),
        Err(e) => Err(SmockError::InvalidArguments(format!(
            "Invalid JSON keyword arguments {json}: {e}"
        ))),
    }
}
