// ABOUTME: Compiled artifact caching keyed by template identity and locals shape
// ABOUTME: Exports the compile site capability, the locals signature, and the eviction hook

pub mod signature;
pub mod site;

pub use signature::LocalsSignature;
pub use site::{evict_compiled, CompileSite};
