use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoxError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing input: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("malformed line {line_no} in {}: {text:?}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line_no: usize,
        text: String,
    },

    #[error("xml error in {}: {detail}", .path.display())]
    Xml { path: PathBuf, detail: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DoxError>;

/// Read an input file fully, mapping a missing file to [`DoxError::MissingInput`].
pub fn read_input(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DoxError::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            DoxError::Io(e)
        }
    })
}
