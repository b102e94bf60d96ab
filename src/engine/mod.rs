// ABOUTME: Execution engine: scope abstraction, expression evaluation, render pipeline
// ABOUTME: Exports the render entry point and the render-time error taxonomy

pub mod error;
pub mod eval;
pub mod renderer;
pub mod scope;
pub mod value;

pub use error::{RenderError, Result};
pub use renderer::render;
pub use scope::{DetachedScope, Locals, RenderBlock, Scope};
