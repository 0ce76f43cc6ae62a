use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PboError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error at {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("source root {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("{0} is neither a regular file nor a directory")]
    Unsupported(PathBuf),

    #[error("{path} is not under source root {root}")]
    Outside { path: PathBuf, root: PathBuf },

    #[error("relative path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("{path} is {size} bytes, header size fields are 32-bit")]
    TooLarge { path: PathBuf, size: u64 },
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, PboError>;
