// ABOUTME: Evaluation of embedded expressions against scope, locals, and block
// ABOUTME: Failures here carry no location; the renderer attaches file and line

use serde_json::Value;

use super::scope::{Locals, RenderBlock, Scope};
use crate::compiler::Expr;

/// A failure produced while evaluating one expression, before relocation
#[derive(Debug)]
pub(crate) enum EvalError {
    NameNotFound { name: String },
    MissingBlock,
    Application(anyhow::Error),
}

pub(crate) fn eval(
    expr: &Expr,
    scope: &dyn Scope,
    locals: &Locals,
    block: Option<&RenderBlock>,
) -> Result<Value, EvalError> {
    match expr {
        Expr::Str(text) => Ok(Value::String(text.clone())),
        Expr::Int(value) => Ok(Value::from(*value)),
        Expr::Name { name, path } => {
            let base = match locals.get(name) {
                Some(found) => found.clone(),
                None => scope
                    .attr(name)
                    .map_err(EvalError::Application)?
                    .ok_or_else(|| EvalError::NameNotFound { name: name.clone() })?,
            };
            walk(base, name, path)
        }
        Expr::Attr { name, path } => {
            let base = scope
                .attr(name)
                .map_err(EvalError::Application)?
                .ok_or_else(|| EvalError::NameNotFound {
                    name: format!("@{name}"),
                })?;
            walk(base, name, path)
        }
        Expr::Yield { args } => {
            let block = block.ok_or(EvalError::MissingBlock)?;
            let mut evaluated = Vec::with_capacity(args.len());
            for arg in args {
                evaluated.push(eval(arg, scope, locals, Some(block))?);
            }
            block(&evaluated).map_err(EvalError::Application)
        }
    }
}

fn walk(base: Value, name: &str, path: &[String]) -> Result<Value, EvalError> {
    let mut current = base;
    let mut resolved = name.to_string();
    for segment in path {
        resolved.push('.');
        resolved.push_str(segment);
        current = match current.get(segment) {
            Some(found) => found.clone(),
            None => return Err(EvalError::NameNotFound { name: resolved }),
        };
    }
    Ok(current)
}
