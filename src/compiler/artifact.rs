// ABOUTME: Code generation and the compiled artifact with its generated-to-original line map
// ABOUTME: Emits one generated line per template source line so failures map back exactly

use std::collections::{BTreeMap, BTreeSet};

use super::error::{CompileError, Result};
use super::expr::{self, Expr};
use super::scanner::{self, Segment};
use crate::template::Template;

/// One executable step of a compiled artifact
#[derive(Debug, Clone)]
pub(crate) enum OpKind {
    Literal(String),
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub(crate) struct Op {
    pub kind: OpKind,
    pub generated_line: u32,
}

/// A compiled, invocable unit produced from a template for one locals shape.
/// Shared read-only after creation; holders of a reference stay valid even
/// after the artifact's name is evicted from its compile site.
#[derive(Debug)]
pub struct CompiledArtifact {
    name: String,
    origin_file: String,
    generated_source: String,
    line_map: Vec<(u32, u32)>,
    ops: Vec<Op>,
}

impl CompiledArtifact {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin_file(&self) -> &str {
        &self.origin_file
    }

    /// The emitted program listing
    pub fn generated_source(&self) -> &str {
        &self.generated_source
    }

    /// Ordered pairs of (generated line, original line)
    pub fn line_map(&self) -> &[(u32, u32)] {
        &self.line_map
    }

    /// Translate a generated-source line back to the template's own line
    pub fn origin_line_for(&self, generated_line: u32) -> Option<u32> {
        self.line_map
            .binary_search_by_key(&generated_line, |&(generated, _)| generated)
            .ok()
            .map(|index| self.line_map[index].1)
    }

    pub(crate) fn ops(&self) -> &[Op] {
        &self.ops
    }
}

/// Compile template source into an artifact installed under `name`.
/// Expressions are parsed here; they are never evaluated at compile time.
pub fn compile(
    template: &Template,
    local_names: &BTreeSet<String>,
    name: String,
) -> Result<CompiledArtifact> {
    let origin_file = template.origin_file();
    let origin_line = template.origin_line();

    for local in local_names {
        if !expr::is_identifier(local) {
            return Err(CompileError::InvalidLocalName {
                name: local.clone(),
            });
        }
    }

    let segments = scanner::scan(template.source(), template.options(), origin_file, origin_line)?;

    let mut ops = Vec::new();
    let mut statements: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    let mut continuation_lines: BTreeSet<u32> = BTreeSet::new();
    let mut total_lines = 0u32;

    for segment in segments {
        match segment {
            Segment::Literal { text, line } => {
                total_lines = total_lines.max(line);
                statements
                    .entry(line)
                    .or_default()
                    .push(format!("__buf.push_str({text:?});"));
                ops.push(Op {
                    kind: OpKind::Literal(text),
                    generated_line: line + 1,
                });
            }
            Segment::Expression {
                body,
                line,
                span_lines,
            } => {
                let parsed = expr::parse(&body).map_err(|message| {
                    CompileError::MalformedExpression {
                        file: origin_file.to_string(),
                        line: origin_line + line - 1,
                        message,
                    }
                })?;
                total_lines = total_lines.max(line + span_lines - 1);
                statements
                    .entry(line)
                    .or_default()
                    .push(format!("__buf.push_str(&__eval({parsed}));"));
                for continued in line + 1..line + span_lines {
                    continuation_lines.insert(continued);
                }
                ops.push(Op {
                    kind: OpKind::Expr(parsed),
                    generated_line: line + 1,
                });
            }
        }
    }

    let preamble = if local_names.is_empty() {
        "let mut __buf = String::new();".to_string()
    } else {
        let declared: Vec<&str> = local_names.iter().map(String::as_str).collect();
        format!(
            "let ({}) = __locals; let mut __buf = String::new();",
            declared.join(", ")
        )
    };

    let mut lines = Vec::with_capacity(total_lines as usize + 2);
    let mut line_map = Vec::with_capacity(total_lines as usize);
    lines.push(preamble);
    for relative in 1..=total_lines {
        let text = match statements.get(&relative) {
            Some(parts) => parts.join(" "),
            None if continuation_lines.contains(&relative) => {
                "// expression continues".to_string()
            }
            None => String::new(),
        };
        lines.push(text);
        line_map.push((relative + 1, origin_line + relative - 1));
    }
    lines.push("__buf".to_string());

    Ok(CompiledArtifact {
        name,
        origin_file: origin_file.to_string(),
        generated_source: lines.join("\n"),
        line_map,
        ops,
    })
}
