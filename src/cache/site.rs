// ABOUTME: Per-capability concurrent store of compiled artifacts keyed by installed name
// ABOUTME: Compiles on miss with atomic insert-if-absent and supports explicit eviction

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::compiler::{self, CompiledArtifact, Result};
use crate::template::Template;

/// Shared namespace hosting compiled artifacts for one scope type.
/// Every instance of that type renders through the same site, so a template
/// compiles once per locals shape no matter how many instances exist.
#[derive(Debug, Default)]
pub struct CompileSite {
    artifacts: RwLock<HashMap<String, Arc<CompiledArtifact>>>,
    compiles: AtomicU64,
}

impl CompileSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the installed artifact for the template and locals shape,
    /// compiling and installing it on first use.
    pub fn get_or_compile(
        &self,
        template: &Template,
        local_names: &BTreeSet<String>,
    ) -> Result<Arc<CompiledArtifact>> {
        let name = template.artifact_name_for(local_names.iter());
        if let Some(found) = self.get(&name) {
            debug!(artifact = %name, "compile site hit");
            return Ok(found);
        }

        // Compilation happens outside the lock: the compiler is deterministic,
        // so racing misses produce equivalent artifacts and the first install wins.
        let compiled = compiler::compile(template, local_names, name.clone())?;
        self.compiles.fetch_add(1, Ordering::Relaxed);

        let mut artifacts = self
            .artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let installed = artifacts
            .entry(name.clone())
            .or_insert_with(|| Arc::new(compiled))
            .clone();
        debug!(artifact = %name, file = %template.origin_file(), "installed compiled artifact");
        Ok(installed)
    }

    /// Look up an installed artifact by name
    pub fn get(&self, name: &str) -> Option<Arc<CompiledArtifact>> {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove an installed artifact and its retained line map. Evicting an
    /// absent name is a no-op. Holders of a previously returned reference
    /// keep a valid artifact; only discoverability is removed.
    pub fn evict(&self, name: &str) -> bool {
        let removed = self
            .artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        if removed {
            debug!(artifact = %name, "evicted compiled artifact");
        }
        removed
    }

    /// Number of artifacts currently installed
    pub fn len(&self) -> usize {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total compiler invocations this site has performed; cache hits do not
    /// increase it
    pub fn compile_count(&self) -> u64 {
        self.compiles.load(Ordering::Relaxed)
    }
}

/// Administrative hook for callers that recycle scope types dynamically and
/// need to reclaim installed artifacts by name
pub fn evict_compiled(site: &CompileSite, artifact_name: &str) -> bool {
    site.evict(artifact_name)
}
