use crate::fixtures::get_fixture_path;
use serde_json::Map;
use smock::{MockValue, Smock, SmockError};

#[test]
fn test_top_level_file_reference_returns_contents() {
    let smocked = Smock::from_file(get_fixture_path("data")).unwrap();
    let res = smocked
        .mock_res("fixture", &[], &Map::new())
        .unwrap()
        .wrapped()
        .unwrap();

    assert!(matches!(res, MockValue::Text(ref text) if text == "OOK\n"));
    assert_eq!(res.to_string(), "OOK\n");
}

#[test]
fn test_nested_file_reference_is_expanded_on_access() {
    let smocked = Smock::from_file(get_fixture_path("data")).unwrap();
    let res = smocked
        .mock_res("withfile", &[], &Map::new())
        .unwrap()
        .wrapped()
        .unwrap();

    assert_eq!(res.item("nofile").unwrap(), "OK");
    let file = res.attr("file").unwrap();
    assert_eq!(file.as_str().map(str::trim), Some("OOK"));
}

#[test]
fn test_unreadable_file_reference() {
    let smocked = Smock::from_yaml_str("broken:\n  - result: \"file:tests/fixtures/nope.txt\"\n")
        .unwrap();
    let err = smocked.mock_res("broken", &[], &Map::new()).unwrap_err();
    assert!(matches!(err, SmockError::File { .. }));
}

#[test]
fn test_raw_result_keeps_file_marker() {
    let smocked =
        Smock::from_yaml_str("raw:\n  - result:raw: \"file:tests/fixtures/fixture.txt\"\n")
            .unwrap();
    let value = smocked
        .mock_res("raw", &[], &Map::new())
        .unwrap()
        .raw()
        .unwrap();
    assert_eq!(value, "file:tests/fixtures/fixture.txt");
}
