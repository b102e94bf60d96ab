// ABOUTME: Scope abstraction: runtime objects exposing named attributes to templates
// ABOUTME: Each scope type shares one compile site so its instances reuse compiled artifacts

use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::cache::CompileSite;

/// Caller-supplied name-to-value mapping for one render call
pub type Locals = HashMap<String, Value>;

/// Caller-supplied callable substitutable for `yield` inside a template
pub type RenderBlock = dyn Fn(&[Value]) -> anyhow::Result<Value>;

/// A runtime object templates render against. Attribute lookups may fail with
/// an application error, which surfaces relocated to the template's own line.
pub trait Scope {
    /// Shared compile site for this scope's type
    fn compile_site(&self) -> &CompileSite;

    /// Look up a named attribute on this scope instance
    fn attr(&self, name: &str) -> anyhow::Result<Option<Value>> {
        let _ = name;
        Ok(None)
    }
}

/// Scope used for renders that do not carry one; its site is process wide
/// and it exposes no attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedScope;

static DETACHED_SITE: OnceLock<CompileSite> = OnceLock::new();

impl Scope for DetachedScope {
    fn compile_site(&self) -> &CompileSite {
        DETACHED_SITE.get_or_init(CompileSite::new)
    }
}
