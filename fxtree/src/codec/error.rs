//! Codec-level errors (wraps domain errors)

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::TreeError;

/// Codec errors wrap domain errors and add file and format concerns.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl CodecError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn parse(line: usize, message: impl ToString) -> Self {
        Self::Parse {
            line,
            message: message.to_string(),
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Extension trait for converting `io::Result` to `CodecResult` with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error; a missing file becomes `NotFound`.
    ///
    /// # Example
    /// ```ignore
    /// File::open(path).with_path_context("open layout", path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> CodecResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> CodecResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CodecError::NotFound(path.to_path_buf()),
            _ => CodecError::io(format!("{}: {}", action, path.display()), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_missing_file_error_when_adding_context_then_maps_to_not_found() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result
            .with_path_context("open layout", Path::new("layout.txt"))
            .unwrap_err();
        assert!(matches!(err, CodecError::NotFound(ref p) if p == Path::new("layout.txt")));
        assert_eq!(err.to_string(), "layout.txt not found");
    }

    #[test]
    fn given_other_io_error_when_adding_context_then_keeps_source() {
        let result: io::Result<()> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        let err = result
            .with_path_context("write outline", Path::new("out.txt"))
            .unwrap_err();
        assert_eq!(err.to_string(), "I/O error: write outline: out.txt");
    }
}
