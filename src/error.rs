//! Error handling for create-modern-express.
//! Defines the error taxonomy and result alias used throughout the generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::options::Options;

/// Error types for project generation.
#[derive(Error, Debug)]
pub enum Error {
    /// A raw option value is outside its enumerated domain, or the project
    /// name is empty after normalization.
    #[error("Invalid value '{value}' for option '{field}'.")]
    InvalidOption { field: &'static str, value: String },

    /// A bundled template asset is missing. This indicates a broken
    /// installation, never user error.
    #[error("Template '{name}' does not exist at '{}'.", .path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    /// Evaluating the directives of a template failed.
    #[error("Failed to render template '{template}': {source}.")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// File system failure with the path that caused it.
    #[error("IO error at '{}': {source}.", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single generation step failed; carries the destination and the
    /// options the plan was built from.
    #[error("Failed to generate '{}' ({options}): {source}", .dest.display())]
    Step {
        dest: PathBuf,
        options: Box<Options>,
        #[source]
        source: Box<Error>,
    },

    /// The package manifest could not be serialized.
    #[error("Failed to serialize package manifest: {0}.")]
    Manifest(#[from] serde_json::Error),

    /// Interactive prompt failure.
    #[error("Prompt error: {0}.")]
    Prompt(#[from] dialoguer::Error),

    /// The user declined to continue.
    #[error("Aborted: {0}.")]
    Aborted(String),
}

impl Error {
    /// Builds an [`Error::Io`] for `path`.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Returns the innermost error, looking through [`Error::Step`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Step { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
