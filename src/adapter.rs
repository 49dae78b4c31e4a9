//! Callables bound to one mocked call name.

use crate::dataset::Dataset;
use crate::resolver::{resolve, Resolved};
use crate::Result;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Synchronous stand-in for a real function.
#[derive(Debug, Clone)]
pub struct MockMethod {
    name: String,
    dataset: Arc<Dataset>,
}

impl MockMethod {
    pub fn new(name: impl Into<String>, dataset: Arc<Dataset>) -> Self {
        Self {
            name: name.into(),
            dataset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value], kwargs: &Map<String, Value>) -> Result<Resolved> {
        resolve(&self.name, &self.dataset, args, kwargs)
    }

    /// Shorthand for calls without keyword arguments.
    pub fn call_args(&self, args: &[Value]) -> Result<Resolved> {
        self.call(args, &Map::new())
    }

    /// Turn the mock into a plain closure for code that takes `Fn` parameters.
    pub fn into_fn(self) -> impl Fn(&[Value], &Map<String, Value>) -> Result<Resolved> {
        move |args, kwargs| self.call(args, kwargs)
    }
}

/// Async stand-in for a real async function.
///
/// Resolution itself never waits; only the calling convention differs.
#[derive(Debug, Clone)]
pub struct AsyncMockMethod {
    inner: MockMethod,
}

impl AsyncMockMethod {
    pub fn new(name: impl Into<String>, dataset: Arc<Dataset>) -> Self {
        Self {
            inner: MockMethod::new(name, dataset),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn call(&self, args: &[Value], kwargs: &Map<String, Value>) -> Result<Resolved> {
        self.inner.call(args, kwargs)
    }

    pub async fn call_args(&self, args: &[Value]) -> Result<Resolved> {
        self.inner.call_args(args)
    }
}
