// ABOUTME: Render pipeline: locals shape, artifact lookup or compile, op execution
// ABOUTME: Rewrites failure locations from generated lines back to template lines

use std::collections::BTreeSet;
use tracing::debug;

use super::error::{RenderError, Result};
use super::eval::{self, EvalError};
use super::scope::{Locals, RenderBlock, Scope};
use super::value;
use crate::compiler::artifact::{CompiledArtifact, OpKind};
use crate::template::Template;

/// Render a template against a scope instance with the given locals and an
/// optional block for `yield`.
pub fn render(
    template: &Template,
    scope: &dyn Scope,
    locals: &Locals,
    block: Option<&RenderBlock>,
) -> Result<String> {
    let local_names: BTreeSet<String> = locals.keys().cloned().collect();
    let artifact = scope.compile_site().get_or_compile(template, &local_names)?;
    debug!(
        file = %template.origin_file(),
        artifact = %artifact.name(),
        "rendering template"
    );
    execute(&artifact, scope, locals, block)
}

fn execute(
    artifact: &CompiledArtifact,
    scope: &dyn Scope,
    locals: &Locals,
    block: Option<&RenderBlock>,
) -> Result<String> {
    let mut output = String::new();
    for op in artifact.ops() {
        match &op.kind {
            OpKind::Literal(text) => output.push_str(text),
            OpKind::Expr(expr) => match eval::eval(expr, scope, locals, block) {
                Ok(result) => output.push_str(&value::to_text(&result)),
                Err(failure) => return Err(relocate(failure, artifact, op.generated_line)),
            },
        }
    }
    Ok(output)
}

/// Attach the template's own file and line to an evaluation failure. The
/// failing op carries its generated line; the artifact's line map translates
/// it back to the original coordinate.
fn relocate(failure: EvalError, artifact: &CompiledArtifact, generated_line: u32) -> RenderError {
    let file = artifact.origin_file().to_string();
    let line = artifact
        .origin_line_for(generated_line)
        .unwrap_or(generated_line);
    match failure {
        EvalError::NameNotFound { name } => RenderError::NameNotFound { file, line, name },
        EvalError::MissingBlock => RenderError::MissingBlock { file, line },
        EvalError::Application(source) => RenderError::Evaluation { file, line, source },
    }
}
