// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a configurable scope type whose instances share one compile site

#![allow(dead_code)]

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use weft::{CompileSite, Locals, Scope};

/// Install the test log subscriber; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

/// The shared capability for a family of test scope instances. Instances
/// built from one `TestScopeType` render through the same compile site.
#[derive(Clone, Default)]
pub struct TestScopeType {
    site: Arc<CompileSite>,
}

impl TestScopeType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn site(&self) -> &CompileSite {
        &self.site
    }

    pub fn instance(&self) -> TestScope {
        TestScope {
            site: Arc::clone(&self.site),
            attrs: HashMap::new(),
            failing: HashSet::new(),
        }
    }
}

pub struct TestScope {
    site: Arc<CompileSite>,
    attrs: HashMap<String, Value>,
    failing: HashSet<String>,
}

impl TestScope {
    pub fn with_attr(mut self, name: &str, value: Value) -> Self {
        self.attrs.insert(name.to_string(), value);
        self
    }

    /// Attribute whose lookup fails with an application error
    pub fn with_failing_attr(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn set_attr(&mut self, name: &str, value: Value) {
        self.attrs.insert(name.to_string(), value);
    }
}

impl Scope for TestScope {
    fn compile_site(&self) -> &CompileSite {
        &self.site
    }

    fn attr(&self, name: &str) -> anyhow::Result<Option<Value>> {
        if self.failing.contains(name) {
            anyhow::bail!("attribute `{name}` failed on purpose");
        }
        Ok(self.attrs.get(name).cloned())
    }
}

/// Build a locals mapping from name/value pairs
pub fn locals(pairs: &[(&str, Value)]) -> Locals {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
