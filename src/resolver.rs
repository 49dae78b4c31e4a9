use crate::dataset::{Dataset, Outcome};
use crate::logging;
use crate::matcher::matches;
use crate::wrapper::{wrap, MockValue};
use crate::{Result, SmockError, UnresolvedReason};
use serde_json::{Map, Value};

/// Answer produced for a resolved call
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Wrapped(MockValue),
    Raw(Value),
}

impl Resolved {
    /// The underlying raw value, whichever way it was produced
    pub fn into_value(self) -> Value {
        match self {
            Resolved::Wrapped(value) => value.into_value(),
            Resolved::Raw(value) => value,
        }
    }

    pub fn wrapped(self) -> Option<MockValue> {
        match self {
            Resolved::Wrapped(value) => Some(value),
            Resolved::Raw(_) => None,
        }
    }

    pub fn raw(self) -> Option<Value> {
        match self {
            Resolved::Raw(value) => Some(value),
            Resolved::Wrapped(_) => None,
        }
    }
}

/// Find the first rule registered under `name` whose patterns match the
/// call and produce its outcome.
pub fn resolve(
    name: &str,
    dataset: &Dataset,
    args: &[Value],
    kwargs: &Map<String, Value>,
) -> Result<Resolved> {
    let actual_args = Value::Array(args.to_vec());
    let actual_kwargs = Value::Object(kwargs.clone());
    logging::log_mock_call(name, &actual_args, &actual_kwargs);

    let rules = match dataset.rules(name) {
        Some(rules) if !rules.is_empty() => rules,
        _ => {
            return Err(unresolved(
                UnresolvedReason::UnknownName,
                name,
                &actual_args,
                &actual_kwargs,
            ))
        }
    };

    let rule = rules
        .iter()
        .find(|rule| matches(&actual_args, &rule.args) && matches(&actual_kwargs, &rule.kwargs))
        .ok_or_else(|| {
            unresolved(
                UnresolvedReason::NoMatch,
                name,
                &actual_args,
                &actual_kwargs,
            )
        })?;

    match &rule.outcome {
        Outcome::Error(message) => {
            logging::log_mock_error(name, message);
            Err(SmockError::Declared(message.clone()))
        }
        Outcome::Raw(value) => {
            logging::log_mock_result(name, value);
            Ok(Resolved::Raw(value.clone()))
        }
        Outcome::Result(value) => {
            logging::log_mock_result(name, value);
            wrap(value.clone()).map(Resolved::Wrapped)
        }
    }
}

fn unresolved(reason: UnresolvedReason, name: &str, args: &Value, kwargs: &Value) -> SmockError {
    let args = args.to_string();
    let kwargs = kwargs.to_string();
    logging::log_unresolved(&reason.to_string(), name, &args, &kwargs);
    SmockError::Unresolved {
        reason,
        name: name.to_string(),
        args,
        kwargs,
    }
}
