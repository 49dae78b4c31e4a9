use crate::adapter::{AsyncMockMethod, MockMethod};
use crate::dataset::Dataset;
use crate::resolver::{resolve, Resolved};
use crate::Result;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

/// Loaded mock data plus the ways to call into it.
///
/// ```no_run
/// use serde_json::json;
/// use smock::Smock;
///
/// let smocked = Smock::from_file("tests/fixtures/data.yaml")?;
/// let get = smocked.mock_method("requests.get");
/// let res = get.call_args(&[json!("https://mocked.url")])?.wrapped().unwrap();
/// assert_eq!(res.attr("status_code")?, 200);
/// # Ok::<(), smock::SmockError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Smock {
    dataset: Arc<Dataset>,
}

impl Smock {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Dataset::from_file(path).map(Self::from_dataset)
    }

    /// Later files override earlier ones for the same call name.
    pub fn from_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        Dataset::from_files(paths).map(Self::from_dataset)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Dataset::from_yaml_str(text, "<inline>").map(Self::from_dataset)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Query a result directly by name and arguments.
    pub fn mock_res(
        &self,
        name: &str,
        args: &[Value],
        kwargs: &Map<String, Value>,
    ) -> Result<Resolved> {
        resolve(name, &self.dataset, args, kwargs)
    }

    pub fn mock_method(&self, name: impl Into<String>) -> MockMethod {
        MockMethod::new(name, Arc::clone(&self.dataset))
    }

    pub fn mock_method_async(&self, name: impl Into<String>) -> AsyncMockMethod {
        AsyncMockMethod::new(name, Arc::clone(&self.dataset))
    }
}
