// ABOUTME: Lexical scanner splitting template source into literal and expression segments
// ABOUTME: Tracks 1-based source-relative lines and handles escaped start delimiters

use super::error::{CompileError, Result};
use crate::template::TemplateOptions;

/// One piece of template source in order of appearance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text confined to a single source line, trailing newline included
    Literal { text: String, line: u32 },
    /// Raw expression body between delimiters; `span_lines` counts the source
    /// lines the marker occupies, including its first
    Expression {
        body: String,
        line: u32,
        span_lines: u32,
    },
}

impl Segment {
    pub fn line(&self) -> u32 {
        match self {
            Segment::Literal { line, .. } | Segment::Expression { line, .. } => *line,
        }
    }
}

/// Split template source into segments, mapping failures to the origin coordinates
pub fn scan(
    source: &str,
    options: &TemplateOptions,
    origin_file: &str,
    origin_line: u32,
) -> Result<Vec<Segment>> {
    let start = options.start_delimiter.as_str();
    let end = options.end_delimiter.as_str();

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut line = 1u32;
    let mut position = 0usize;

    let flush = |literal: &mut String, segments: &mut Vec<Segment>, line: u32| {
        if !literal.is_empty() {
            segments.push(Segment::Literal {
                text: std::mem::take(literal),
                line,
            });
        }
    };

    while position < source.len() {
        let rest = &source[position..];

        // A backslash immediately before a start delimiter escapes it
        if let Some(after_escape) = rest.strip_prefix('\\') {
            if after_escape.starts_with(start) {
                literal.push_str(start);
                position += 1 + start.len();
                continue;
            }
        }

        if rest.starts_with(start) {
            flush(&mut literal, &mut segments, line);
            let body_start = position + start.len();
            let body_end = match source[body_start..].find(end) {
                Some(offset) => body_start + offset,
                None => {
                    return Err(CompileError::UnterminatedExpression {
                        file: origin_file.to_string(),
                        line: origin_line + line - 1,
                        delimiter: end.to_string(),
                    });
                }
            };
            let body = &source[body_start..body_end];
            let span_lines = 1 + body.matches('\n').count() as u32;
            segments.push(Segment::Expression {
                body: body.to_string(),
                line,
                span_lines,
            });
            line += span_lines - 1;
            position = body_end + end.len();
            continue;
        }

        let ch = rest.chars().next().unwrap_or('\0');
        literal.push(ch);
        position += ch.len_utf8();
        if ch == '\n' {
            flush(&mut literal, &mut segments, line);
            line += 1;
        }
    }

    flush(&mut literal, &mut segments, line);
    Ok(segments)
}
