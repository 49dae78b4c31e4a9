use crate::utils::json_value;
use proptest::prelude::*;
use serde_json::{json, Value};
use smock::matches;

proptest! {
    #[test]
    fn test_wildcard_matches_everything(actual in json_value()) {
        prop_assert!(matches(&actual, &json!("*")));
    }

    #[test]
    fn test_every_value_matches_itself(value in json_value()) {
        prop_assert!(matches(&value, &value));
    }

    #[test]
    fn test_shorter_sequence_never_matches(items in prop::collection::vec(json_value(), 1..6)) {
        let pattern = Value::Array(items.clone());
        let truncated = Value::Array(items[..items.len() - 1].to_vec());
        prop_assert!(!matches(&truncated, &pattern));
    }

    #[test]
    fn test_extra_actual_keys_are_ignored(
        value in json_value(),
        extra in json_value(),
    ) {
        let pattern = json!({"key": value.clone()});
        let actual = json!({"key": value, "extra_key": extra});
        prop_assert!(matches(&actual, &pattern));
    }
}
