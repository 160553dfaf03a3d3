use label_layout::{ErrorKind, LabelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Layout(#[from] LabelError),
    #[error("Layout is missing or stale: {0}")]
    Precondition(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ExportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::Layout(err) => err.kind(),
            ExportError::Precondition(_) => ErrorKind::Precondition,
            ExportError::Pdf(_)
            | ExportError::Xml(_)
            | ExportError::Zip(_)
            | ExportError::Io(_)
            | ExportError::TaskJoin(_) => ErrorKind::Rendering,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
