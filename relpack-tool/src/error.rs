use relpack_lib::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a packaging run.
#[derive(Debug, Error)]
pub enum PackError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("cannot create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walking directory failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot read {path:?}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing archive {path:?} failed: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: async_zip::error::ZipError,
    },

    /// Creating the output file, flushing it, or starting the runtime failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PackError {
    /// Process exit code: 2 for manifest problems, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackError::Manifest(_) => 2,
            _ => 1,
        }
    }
}
