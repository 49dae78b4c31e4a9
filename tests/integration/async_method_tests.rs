use crate::fixtures::get_fixture_path;
use serde_json::{json, Map};
use smock::{Smock, SmockError};

#[tokio::test]
async fn test_async_method_resolves() {
    let smocked = Smock::from_file(get_fixture_path("data")).unwrap();
    let get = smocked.mock_method_async("requests.get");

    let res = get
        .call(&[json!("https://mocked.url")], &Map::new())
        .await
        .unwrap()
        .wrapped()
        .unwrap();
    assert_eq!(res.attr("status_code").unwrap(), 200);
}

#[tokio::test]
async fn test_async_method_signals_declared_error() {
    let smocked = Smock::from_file(get_fixture_path("data")).unwrap();
    let query = smocked.mock_method_async("db.query");

    let err = query
        .call_args(&[json!("DROP TABLE users")])
        .await
        .unwrap_err();
    assert!(matches!(err, SmockError::Declared(_)));
}

#[tokio::test]
async fn test_async_methods_run_concurrently() {
    let smocked = Smock::from_file(get_fixture_path("data")).unwrap();
    let handles: Vec<_> = ["https://mocked.url", "https://other.url"]
        .into_iter()
        .map(|url| {
            let get = smocked.mock_method_async("requests.get");
            tokio::spawn(async move {
                get.call_args(&[json!(url)])
                    .await
                    .map(|res| res.into_value()["status_code"].clone())
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(statuses, vec![json!(200), json!(404)]);
}
