// ABOUTME: Render-time error taxonomy with locations in the template's own coordinates
// ABOUTME: Application failures keep their original kind; only location metadata is added

use thiserror::Error;

use crate::compiler::CompileError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{file}:{line}: undefined name `{name}`")]
    NameNotFound {
        file: String,
        line: u32,
        name: String,
    },

    #[error("{file}:{line}: template yielded but no block was given")]
    MissingBlock { file: String, line: u32 },

    #[error("{file}:{line}: {source}")]
    Evaluation {
        file: String,
        line: u32,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),
}

impl RenderError {
    /// Location of the failure in the template's own coordinates, where known
    pub fn location(&self) -> Option<(&str, u32)> {
        match self {
            RenderError::NameNotFound { file, line, .. }
            | RenderError::MissingBlock { file, line }
            | RenderError::Evaluation { file, line, .. } => Some((file, *line)),
            RenderError::Compile(compile) => compile.location(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
