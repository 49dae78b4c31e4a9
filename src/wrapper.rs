//! Transparent wrapping of mocked results
//!
//! A [`MockValue`] stands in for whatever the real call would have returned.
//! Mappings answer both attribute-style ([`MockValue::attr`]) and item-style
//! ([`MockValue::item`]) access, sequences index like lists, and scalars
//! delegate comparisons, arithmetic, truthiness and numeric coercion to the
//! underlying value. Nested values are wrapped again when accessed.
//!
//! Strings of the form `file:<path>` are replaced by the text of `<path>`
//! (relative to the working directory) at the moment they are wrapped.

use crate::{Result, SmockError};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Prefix marking a string as a reference to a file's contents
pub const FILE_MARKER: &str = "file:";

/// Upper bound on the bytes or elements produced by repeating with `*`
pub const MAX_REPEATED_LEN: usize = 1 << 28;

/// A wrapped mock result
#[derive(Debug, Clone)]
pub enum MockValue {
    Mapping(Map<String, Value>),
    Sequence(Vec<Value>),
    Scalar(Value),
    /// Contents of a `file:` reference
    Text(String),
}

/// Key for item-style access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    Name(String),
    /// Negative indices count from the end
    Index(i64),
}

impl From<&str> for ItemKey {
    fn from(name: &str) -> Self {
        ItemKey::Name(name.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(name: String) -> Self {
        ItemKey::Name(name)
    }
}

impl From<i64> for ItemKey {
    fn from(index: i64) -> Self {
        ItemKey::Index(index)
    }
}

impl From<i32> for ItemKey {
    fn from(index: i32) -> Self {
        ItemKey::Index(index.into())
    }
}

impl From<usize> for ItemKey {
    fn from(index: usize) -> Self {
        ItemKey::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Name(name) => f.write_str(name),
            ItemKey::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Binary operators delegated to the wrapped scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// True division, always produces a float
    Div,
    /// Remainder taking the sign of the divisor
    Rem,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        };
        f.write_str(symbol)
    }
}

/// Wrap a raw value, expanding a top-level `file:` reference.
pub fn wrap(value: Value) -> Result<MockValue> {
    match value {
        Value::Object(map) => Ok(MockValue::Mapping(map)),
        Value::Array(items) => Ok(MockValue::Sequence(items)),
        Value::String(text) => match text.strip_prefix(FILE_MARKER) {
            Some(path) => read_file_reference(path).map(MockValue::Text),
            None => Ok(MockValue::Scalar(Value::String(text))),
        },
        scalar => Ok(MockValue::Scalar(scalar)),
    }
}

fn read_file_reference(path: &str) -> Result<String> {
    tracing::debug!(path, "Reading referenced file");
    fs::read_to_string(path).map_err(|source| SmockError::File {
        path: PathBuf::from(path),
        source,
    })
}

impl MockValue {
    /// Attribute-style access; only mappings have attributes.
    pub fn attr(&self, name: &str) -> Result<MockValue> {
        match self {
            MockValue::Mapping(map) => match map.get(name) {
                Some(value) => wrap(value.clone()),
                None => Err(SmockError::Attribute(name.to_string())),
            },
            _ => Err(SmockError::Attribute(name.to_string())),
        }
    }

    /// Item-style access by key or index.
    pub fn item(&self, key: impl Into<ItemKey>) -> Result<MockValue> {
        let key = key.into();
        match (self, &key) {
            (MockValue::Mapping(map), ItemKey::Name(name)) => match map.get(name) {
                Some(value) => wrap(value.clone()),
                None => Err(SmockError::Key(name.clone())),
            },
            (MockValue::Mapping(_), ItemKey::Index(index)) => {
                Err(SmockError::Key(index.to_string()))
            }
            (MockValue::Sequence(items), ItemKey::Index(index)) => {
                match normalize_index(*index, items.len()) {
                    Some(position) => wrap(items[position].clone()),
                    None => Err(SmockError::Index {
                        index: *index,
                        len: items.len(),
                    }),
                }
            }
            (
                MockValue::Scalar(Value::String(text)) | MockValue::Text(text),
                ItemKey::Index(index),
            ) => {
                let len = text.chars().count();
                normalize_index(*index, len)
                    .and_then(|position| text.chars().nth(position))
                    .map(|ch| MockValue::Scalar(Value::String(ch.to_string())))
                    .ok_or(SmockError::Index { index: *index, len })
            }
            _ => Err(SmockError::Type(format!(
                "{} cannot be indexed by '{key}'",
                self.type_name()
            ))),
        }
    }

    /// Mapping lookup falling back to `default` (which is wrapped too).
    pub fn get(&self, name: &str, default: Value) -> Result<MockValue> {
        match self {
            MockValue::Mapping(map) => wrap(map.get(name).cloned().unwrap_or(default)),
            _ => Err(SmockError::Attribute("get".to_string())),
        }
    }

    /// Membership: keys of a mapping, elements of a sequence, substrings of a string.
    pub fn contains(&self, needle: &Value) -> Result<bool> {
        match self {
            MockValue::Mapping(map) => Ok(needle.as_str().is_some_and(|key| map.contains_key(key))),
            MockValue::Sequence(items) => Ok(items.iter().any(|item| loose_eq(item, needle))),
            MockValue::Scalar(Value::String(text)) | MockValue::Text(text) => match needle {
                Value::String(part) => Ok(text.contains(part.as_str())),
                other => Err(SmockError::Type(format!(
                    "'in <string>' requires string as left operand, not {}",
                    value_type_name(other)
                ))),
            },
            MockValue::Scalar(_) => Err(SmockError::Type(format!(
                "{} does not support membership tests",
                self.type_name()
            ))),
        }
    }

    pub fn len(&self) -> Result<usize> {
        match self {
            MockValue::Mapping(map) => Ok(map.len()),
            MockValue::Sequence(items) => Ok(items.len()),
            MockValue::Scalar(Value::String(text)) | MockValue::Text(text) => {
                Ok(text.chars().count())
            }
            MockValue::Scalar(_) => Err(SmockError::Type(format!(
                "{} has no length",
                self.type_name()
            ))),
        }
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        match self {
            MockValue::Mapping(map) => Ok(map.keys().cloned().collect()),
            _ => Err(SmockError::Attribute("keys".to_string())),
        }
    }

    /// Sequences yield wrapped elements, mappings their keys, strings their characters.
    pub fn iter(&self) -> Result<Box<dyn Iterator<Item = Result<MockValue>> + '_>> {
        match self {
            MockValue::Mapping(map) => Ok(Box::new(
                map.keys()
                    .map(|key| Ok(MockValue::Scalar(Value::String(key.clone())))),
            )),
            MockValue::Sequence(items) => Ok(Box::new(items.iter().cloned().map(wrap))),
            MockValue::Scalar(Value::String(text)) | MockValue::Text(text) => Ok(Box::new(
                text.chars()
                    .map(|ch| Ok(MockValue::Scalar(Value::String(ch.to_string())))),
            )),
            MockValue::Scalar(_) => Err(SmockError::Type(format!(
                "{} is not iterable",
                self.type_name()
            ))),
        }
    }

    /// Empty containers, empty strings, zero, `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            MockValue::Mapping(map) => !map.is_empty(),
            MockValue::Sequence(items) => !items.is_empty(),
            MockValue::Text(text) => !text.is_empty(),
            MockValue::Scalar(value) => value_truthy(value),
        }
    }

    pub fn to_i64(&self) -> Result<i64> {
        match self {
            MockValue::Scalar(Value::Number(number)) => {
                if let Some(int) = number.as_i64() {
                    return Ok(int);
                }
                number
                    .as_f64()
                    .filter(|float| float.is_finite() && float.abs() < i64::MAX as f64)
                    .map(|float| float.trunc() as i64)
                    .ok_or_else(|| SmockError::Type(format!("{number} does not fit an integer")))
            }
            MockValue::Scalar(Value::Bool(flag)) => Ok(i64::from(*flag)),
            MockValue::Scalar(Value::String(text)) | MockValue::Text(text) => {
                text.trim().parse::<i64>().map_err(|_| {
                    SmockError::Type(format!("invalid literal for integer: '{text}'"))
                })
            }
            _ => Err(SmockError::Type(format!(
                "{} cannot be converted to an integer",
                self.type_name()
            ))),
        }
    }

    pub fn to_f64(&self) -> Result<f64> {
        match self {
            MockValue::Scalar(Value::Number(number)) => number
                .as_f64()
                .ok_or_else(|| SmockError::Type(format!("{number} is not representable as float"))),
            MockValue::Scalar(Value::Bool(flag)) => Ok(if *flag { 1.0 } else { 0.0 }),
            MockValue::Scalar(Value::String(text)) | MockValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| SmockError::Type(format!("invalid literal for float: '{text}'"))),
            _ => Err(SmockError::Type(format!(
                "{} cannot be converted to a float",
                self.type_name()
            ))),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MockValue::Scalar(Value::String(text)) | MockValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Ordering by delegation; `None` when the two values are not comparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        compare_values(&self.to_value(), other)
    }

    pub fn apply(&self, op: BinaryOp, rhs: &Value) -> Result<Value> {
        binary(op, &self.to_value(), rhs)
    }

    /// `self` when falsy, otherwise `rhs`.
    pub fn and(&self, rhs: Value) -> Value {
        if self.is_truthy() {
            rhs
        } else {
            self.to_value()
        }
    }

    /// `self` when truthy, otherwise `rhs`.
    pub fn or(&self, rhs: Value) -> Value {
        if self.is_truthy() {
            self.to_value()
        } else {
            rhs
        }
    }

    /// The underlying raw value (file contents become a string).
    pub fn to_value(&self) -> Value {
        match self {
            MockValue::Mapping(map) => Value::Object(map.clone()),
            MockValue::Sequence(items) => Value::Array(items.clone()),
            MockValue::Scalar(value) => value.clone(),
            MockValue::Text(text) => Value::String(text.clone()),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            MockValue::Mapping(map) => Value::Object(map),
            MockValue::Sequence(items) => Value::Array(items),
            MockValue::Scalar(value) => value,
            MockValue::Text(text) => Value::String(text),
        }
    }

    /// Compact JSON, identical to serializing the raw value.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            MockValue::Text(_) => "string",
            MockValue::Mapping(_) => "mapping",
            MockValue::Sequence(_) => "sequence",
            MockValue::Scalar(value) => value_type_name(value),
        }
    }
}

fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let position = if index < 0 { index + len } else { index };
    (0..len)
        .contains(&position)
        .then(|| usize::try_from(position).ok())
        .flatten()
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|float| float != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return Some(a.cmp(&b));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

/// Equality where integers and floats compare by numeric value.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| loose_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| loose_eq(a, b)))
        }
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Array(a), Value::Array(b)) => {
            for (a, b) in a.iter().zip(b) {
                match compare_values(a, b)? {
                    Ordering::Equal => continue,
                    unequal => return Some(unequal),
                }
            }
            Some(a.len().cmp(&b.len()))
        }
        _ if loose_eq(a, b) => Some(Ordering::Equal),
        _ => None,
    }
}

fn binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => numeric(op, a, b),
        (Value::String(a), Value::String(b)) if op == BinaryOp::Add => {
            Ok(Value::String(format!("{a}{b}")))
        }
        (Value::Array(a), Value::Array(b)) if op == BinaryOp::Add => {
            Ok(Value::Array(a.iter().chain(b).cloned().collect()))
        }
        (Value::String(text), Value::Number(count)) | (Value::Number(count), Value::String(text))
            if op == BinaryOp::Mul =>
        {
            let count = repeat_count(count)?;
            if repeated_len(text.len(), count)? == 0 {
                return Ok(Value::String(String::new()));
            }
            Ok(Value::String(text.repeat(count)))
        }
        (Value::Array(items), Value::Number(count)) | (Value::Number(count), Value::Array(items))
            if op == BinaryOp::Mul =>
        {
            let count = repeat_count(count)?;
            let total = repeated_len(items.len(), count)?;
            if total == 0 {
                return Ok(Value::Array(Vec::new()));
            }
            let mut repeated = Vec::with_capacity(total);
            for _ in 0..count {
                repeated.extend_from_slice(items);
            }
            Ok(Value::Array(repeated))
        }
        _ => Err(SmockError::Type(format!(
            "unsupported operand types for {op}: {} and {}",
            value_type_name(lhs),
            value_type_name(rhs)
        ))),
    }
}

fn repeat_count(count: &Number) -> Result<usize> {
    let count = count
        .as_i64()
        .ok_or_else(|| SmockError::Type(format!("can't repeat by non-integer {count}")))?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Length of `len` repeated `count` times, bounded by [`MAX_REPEATED_LEN`].
fn repeated_len(len: usize, count: usize) -> Result<usize> {
    if len == 0 || count == 0 {
        return Ok(0);
    }
    len.checked_mul(count)
        .filter(|total| *total <= MAX_REPEATED_LEN)
        .ok_or_else(|| SmockError::Type("repeated value too large".to_string()))
}

fn numeric(op: BinaryOp, a: &Number, b: &Number) -> Result<Value> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        let exact = match op {
            BinaryOp::Add => x.checked_add(y),
            BinaryOp::Sub => x.checked_sub(y),
            BinaryOp::Mul => x.checked_mul(y),
            BinaryOp::Div => None,
            BinaryOp::Rem => {
                if y == 0 {
                    return Err(division_by_zero());
                }
                x.checked_rem(y)
                    .map(|r| if r != 0 && (r < 0) != (y < 0) { r + y } else { r })
            }
        };
        if let Some(result) = exact {
            return Ok(Value::from(result));
        }
    }

    let (x, y) = match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x, y),
        _ => return Err(SmockError::Type(format!("cannot apply {op} to {a} and {b}"))),
    };
    let result = match op {
        BinaryOp::Add => x + y,
        BinaryOp::Sub => x - y,
        BinaryOp::Mul => x * y,
        BinaryOp::Div => {
            if y == 0.0 {
                return Err(division_by_zero());
            }
            x / y
        }
        BinaryOp::Rem => {
            if y == 0.0 {
                return Err(division_by_zero());
            }
            let r = x % y;
            if r != 0.0 && (r < 0.0) != (y < 0.0) {
                r + y
            } else {
                r
            }
        }
    };
    Number::from_f64(result)
        .map(Value::Number)
        .ok_or_else(|| SmockError::Type(format!("{a} {op} {b} is not a finite number")))
}

fn division_by_zero() -> SmockError {
    SmockError::Type("division by zero".to_string())
}

impl Serialize for MockValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MockValue::Mapping(map) => map.serialize(serializer),
            MockValue::Sequence(items) => items.serialize(serializer),
            MockValue::Scalar(value) => value.serialize(serializer),
            MockValue::Text(text) => text.serialize(serializer),
        }
    }
}

/// Strings render bare, everything else as compact JSON.
impl fmt::Display for MockValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MockValue::Scalar(Value::String(text)) | MockValue::Text(text) => f.write_str(text),
            MockValue::Scalar(value) => write!(f, "{value}"),
            MockValue::Mapping(map) => write!(f, "{}", Value::Object(map.clone())),
            MockValue::Sequence(items) => write!(f, "{}", Value::Array(items.clone())),
        }
    }
}

impl From<MockValue> for Value {
    fn from(value: MockValue) -> Self {
        value.into_value()
    }
}

impl PartialEq<Value> for MockValue {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (MockValue::Text(text), Value::String(other)) => text == other,
            (MockValue::Text(_), _) => false,
            (MockValue::Mapping(map), Value::Object(other)) => {
                map.len() == other.len()
                    && map
                        .iter()
                        .all(|(key, a)| other.get(key).is_some_and(|b| loose_eq(a, b)))
            }
            (MockValue::Sequence(items), Value::Array(other)) => {
                items.len() == other.len()
                    && items.iter().zip(other).all(|(a, b)| loose_eq(a, b))
            }
            (MockValue::Scalar(value), other) => loose_eq(value, other),
            _ => false,
        }
    }
}

impl PartialEq for MockValue {
    fn eq(&self, other: &MockValue) -> bool {
        *self == other.to_value()
    }
}

impl PartialOrd<Value> for MockValue {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        self.compare(other)
    }
}

impl PartialOrd for MockValue {
    fn partial_cmp(&self, other: &MockValue) -> Option<Ordering> {
        self.compare(&other.to_value())
    }
}

macro_rules! delegate_scalar_cmp {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PartialEq<$ty> for MockValue {
                fn eq(&self, other: &$ty) -> bool {
                    *self == Value::from(*other)
                }
            }

            impl PartialOrd<$ty> for MockValue {
                fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                    self.compare(&Value::from(*other))
                }
            }
        )*
    };
}

delegate_scalar_cmp!(i32, i64, u32, u64, f64, bool, &str);

impl PartialEq<str> for MockValue {
    fn eq(&self, other: &str) -> bool {
        *self == Value::from(other)
    }
}

impl PartialEq<String> for MockValue {
    fn eq(&self, other: &String) -> bool {
        *self == Value::from(other.as_str())
    }
}
