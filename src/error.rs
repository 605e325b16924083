use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ShellError {
    #[error(
        "Cannot find 7zz.\nPut the 7zz binary in the same folder as this program.\nTried path: {}",
        path.display()
    )]
    ToolNotFound { path: PathBuf },
    #[error("failed to run {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to start background task: {0}")]
    Thread(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, ShellError>;
