use std::io;

use csv::Error as CsvError;
use globset::Error as GlobError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Md2kgError {
    #[error("CSV export error: {0}")]
    Export(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("Invalid glob pattern: {0}")]
    Pattern(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
}

impl From<io::Error> for Md2kgError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => Md2kgError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => Md2kgError::PermissionDenied,
            _ => Md2kgError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<CsvError> for Md2kgError {
    fn from(src: CsvError) -> Md2kgError {
        Md2kgError::Export(format!("CSV serialization error: {src}"))
    }
}

impl From<GlobError> for Md2kgError {
    fn from(src: GlobError) -> Md2kgError {
        Md2kgError::Pattern(format!("{src}"))
    }
}
