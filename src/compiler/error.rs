// ABOUTME: Error types for template compilation
// ABOUTME: Compile failures carry the template's own file and line, never generated coordinates

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("{file}:{line}: unterminated expression, missing `{delimiter}`")]
    UnterminatedExpression {
        file: String,
        line: u32,
        delimiter: String,
    },

    #[error("{file}:{line}: malformed expression: {message}")]
    MalformedExpression {
        file: String,
        line: u32,
        message: String,
    },

    #[error("invalid delimiter: {message}")]
    InvalidDelimiter { message: String },

    #[error("local `{name}` is not a bindable name")]
    InvalidLocalName { name: String },
}

impl CompileError {
    /// Location of the failure in the template's own coordinates, where known
    pub fn location(&self) -> Option<(&str, u32)> {
        match self {
            CompileError::UnterminatedExpression { file, line, .. }
            | CompileError::MalformedExpression { file, line, .. } => Some((file, *line)),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
