use proptest::prelude::*;
use serde_json::{Number, Value};

/// Strings that never carry the `file:` marker.
pub fn plain_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.*-]{0,16}"
}

pub fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::from(i))),
        (-1.0e9f64..1.0e9).prop_map(|f| Number::from_f64(f).map_or(Value::Null, Value::Number)),
        plain_string().prop_map(Value::String),
    ]
}

pub fn json_value() -> impl Strategy<Value = Value> {
    scalar_value().prop_recursive(
        4,  // levels deep
        64, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                prop::collection::hash_map(plain_string(), inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}
