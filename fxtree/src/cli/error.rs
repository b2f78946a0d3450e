//! CLI-level errors (wraps codec and config errors)

use thiserror::Error;

use crate::codec::CodecError;
use crate::config::SettingsError;
use crate::domain::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<TreeError> for CliError {
    fn from(e: TreeError) -> Self {
        CliError::Codec(CodecError::Tree(e))
    }
}

impl CliError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Codec(e) => match e {
                CodecError::NotFound(_) => crate::exitcode::NOINPUT,
                CodecError::Parse { .. } => crate::exitcode::DATAERR,
                CodecError::Io { .. } => crate::exitcode::IOERR,
                CodecError::Tree(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
