use thiserror::Error;

#[derive(Error, Debug)]
pub enum FcError {
    #[error("no fc disk found")]
    DiskNotFound,

    #[error("illegal path for device {0}")]
    InvalidPath(String),

    #[error("failed to remove device '{device}': {source}")]
    RemovalFailed {
        device: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FcError>;
