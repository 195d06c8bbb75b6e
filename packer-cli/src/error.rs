//! Error types for the CLI

use itertools::Itertools;
use region_packer::PackError;
use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file error
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Malformed puzzle input
    #[error("Parse error: {0}")]
    Parse(#[from] region_packer::ParseError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// A region could not be solved
    #[error("region {region}: {source}")]
    Region {
        /// 1-based region number
        region: usize,
        #[source]
        source: PackError,
    },

    /// Several workers failed
    #[error("{} errors occurred: {}", .0.len(), .0.iter().join("; "))]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = first.into_errors();
        errors.extend(second.into_errors());
        ExecutorError::Multiple(errors).into()
    }

    /// Fold a new error into an optional accumulated one
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    fn into_errors(self) -> Vec<ArcExecutorError> {
        match self.inner() {
            ExecutorError::Multiple(errors) => errors.clone(),
            _ => vec![self],
        }
    }
}

/// Input file errors
#[derive(Error, Debug)]
pub enum InputError {
    /// The input file does not exist
    #[error("input file {} not found", .0.display())]
    NotFound(PathBuf),

    /// Reading the input file failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
