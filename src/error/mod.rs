//! Error types and handling for rocstrap
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rocstrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum RocstrapError {
    // External command errors
    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(
        code(rocstrap::exec::spawn_failed),
        help("Check that the program is installed and on PATH")
    )]
    CommandSpawnFailed { program: String, reason: String },

    #[error("'{program}' exited with failure: {detail}")]
    #[diagnostic(
        code(rocstrap::exec::command_failed),
        help("The run stops on the first failing command; re-run after fixing the cause")
    )]
    CommandFailed { program: String, detail: String },

    // Package manager errors
    #[error("Failed to install package(s) {packages}: {reason}")]
    #[diagnostic(code(rocstrap::apt::install_failed))]
    PackageInstallFailed { packages: String, reason: String },

    // Download errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(
        code(rocstrap::download::failed),
        help("Check network connectivity and that the URL is still valid")
    )]
    DownloadFailed { url: String, reason: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(rocstrap::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(rocstrap::git::clone_failed),
        help("Check that the URL is correct and you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to fast-forward checkout at '{path}': {reason}")]
    #[diagnostic(
        code(rocstrap::git::pull_failed),
        help("Local modifications in the checkout prevent a fast-forward; stash or reset them")
    )]
    GitPullFailed { path: String, reason: String },

    // Python environment errors
    #[error("Failed to create virtual environment at '{path}': {reason}")]
    #[diagnostic(
        code(rocstrap::venv::create_failed),
        help("Check that python3-venv is installed")
    )]
    VenvCreateFailed { path: String, reason: String },

    #[error("pip failed: {detail}")]
    #[diagnostic(code(rocstrap::venv::pip_failed))]
    PipFailed { detail: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(rocstrap::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(rocstrap::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(rocstrap::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Could not determine home directory")]
    #[diagnostic(
        code(rocstrap::config::no_home),
        help("Set HOME to the invoking user's home directory")
    )]
    NoHomeDirectory,

    // File system errors
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(rocstrap::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    // Prompt errors
    #[error("Failed to read confirmation: {message}")]
    #[diagnostic(code(rocstrap::prompt::failed))]
    PromptFailed { message: String },
}

/// Convenience constructor for command failures carrying stderr detail
pub fn command_failed(program: &str, detail: impl Into<String>) -> RocstrapError {
    RocstrapError::CommandFailed {
        program: program.to_string(),
        detail: detail.into(),
    }
}

impl From<std::io::Error> for RocstrapError {
    fn from(err: std::io::Error) -> Self {
        RocstrapError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RocstrapError {
    fn from(err: serde_yaml::Error) -> Self {
        RocstrapError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for RocstrapError {
    fn from(err: git2::Error) -> Self {
        RocstrapError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for RocstrapError {
    fn from(err: inquire::InquireError) -> Self {
        RocstrapError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RocstrapError>;
