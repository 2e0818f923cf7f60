use thiserror::Error;

pub type Result<T> = std::result::Result<T, PathsError>;

/// configuration/IO errors surfaced while resolving or loading run options.
///
/// these are always fatal (raised as soon as options are validated, per the
/// core's error handling design) - a run never proceeds on a `PathsError`.
#[derive(Error, Debug)]
pub enum PathsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error in {path}: {source}")]
    Yaml { path: String, #[source] source: serde_yaml::Error },

    #[error("RON error in {path}: {source}")]
    Ron { path: String, #[source] source: ron::error::SpannedError },

    #[error("option directory {0:?} does not exist")]
    MissingDir(std::path::PathBuf),

    #[error("unknown dataset {0:?} referenced from track options")]
    UnknownDataset(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}
