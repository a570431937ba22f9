use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to open device {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to seek to offset 0x{offset:x}: {source}")]
    Seek {
        offset: u64,
        source: std::io::Error,
    },

    #[error("read failed at offset 0x{offset:x}: {source}")]
    Read {
        offset: u64,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
