// ABOUTME: Main library module for the weft template compiler
// ABOUTME: Exports all core modules and provides the public API

pub mod cache;
pub mod compiler;
pub mod engine;
pub mod template;

// Re-export commonly used types
pub use cache::{evict_compiled, CompileSite, LocalsSignature};
pub use compiler::{CompileError, CompiledArtifact};
pub use engine::{DetachedScope, Locals, RenderBlock, RenderError, Scope};
pub use template::{Template, TemplateOptions};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
