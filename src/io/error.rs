use super::Format;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to open \"{}\": {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("cannot infer coordinate format of \"{}\" (expected .pdb, .pqr or .xyzr)", .0.display())]
    UnknownFormat(PathBuf),

    #[error("malformed {format} record: {details} (at line {line})")]
    MalformedRecord {
        format: Format,
        line: usize,
        details: String,
    },
}

impl Error {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::MalformedRecord {
            format,
            line,
            details: details.into(),
        }
    }
}
