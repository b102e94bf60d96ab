// ABOUTME: Immutable template value: source text plus origin file and starting line
// ABOUTME: Provides the render entry points and the installed artifact name derivation

use std::sync::atomic::{AtomicU64, Ordering};

use super::options::TemplateOptions;
use crate::cache::LocalsSignature;
use crate::engine::{self, DetachedScope, Locals, RenderBlock, Scope};

/// Origin file reported for templates constructed without one
pub const ANONYMOUS_ORIGIN: &str = "(template)";

static TEMPLATE_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub struct Template {
    id: u64,
    source: String,
    origin_file: String,
    origin_line: u32,
    options: TemplateOptions,
}

impl Template {
    /// Create a template from a deferred source provider, invoked exactly once
    pub fn new<F>(
        provider: F,
        origin_file: impl Into<String>,
        origin_line: u32,
        options: TemplateOptions,
    ) -> Self
    where
        F: FnOnce() -> String,
    {
        Self {
            id: TEMPLATE_SEQ.fetch_add(1, Ordering::Relaxed),
            source: provider(),
            origin_file: origin_file.into(),
            origin_line: origin_line.max(1),
            options,
        }
    }

    /// Create a template from a deferred source provider and an options mapping
    pub fn with_options_map<F>(
        provider: F,
        origin_file: impl Into<String>,
        origin_line: u32,
        options: &std::collections::HashMap<String, String>,
    ) -> crate::compiler::Result<Self>
    where
        F: FnOnce() -> String,
    {
        let options = TemplateOptions::from_map(options)?;
        Ok(Self::new(provider, origin_file, origin_line, options))
    }

    /// Create a template directly from source with anonymous origin metadata
    pub fn from_source(source: impl Into<String>) -> Self {
        let source = source.into();
        Self::new(move || source, ANONYMOUS_ORIGIN, 1, TemplateOptions::default())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn origin_file(&self) -> &str {
        &self.origin_file
    }

    pub fn origin_line(&self) -> u32 {
        self.origin_line
    }

    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Name under which the artifact for this locals shape installs on a compile site
    pub fn artifact_name_for<I, S>(&self, local_names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        format!("__weft_{}_{}", self.id, LocalsSignature::of(local_names))
    }

    /// Render against a scope with the given locals
    pub fn render(&self, scope: &dyn Scope, locals: &Locals) -> engine::Result<String> {
        engine::render(self, scope, locals, None)
    }

    /// Render against a scope with the given locals and a block for `yield`
    pub fn render_block(
        &self,
        scope: &dyn Scope,
        locals: &Locals,
        block: &RenderBlock,
    ) -> engine::Result<String> {
        engine::render(self, scope, locals, Some(block))
    }

    /// Render without a caller scope, using the process-wide detached scope
    pub fn render_detached(&self, locals: &Locals) -> engine::Result<String> {
        engine::render(self, &DetachedScope, locals, None)
    }
}
