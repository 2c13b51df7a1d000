use crate::model::Section;
use docket_types::TemplateId;
use thiserror::Error;

/// Errors raised while editing or persisting templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template name required")]
    NameRequired,

    #[error("Template not found: {0}")]
    NotFound(TemplateId),

    #[error("{section} field index {index} out of range (section has {len} fields)")]
    FieldIndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },

    #[error("Template store '{location}' could not be written: {message}")]
    Storage { location: String, message: String },

    #[error("Template store lock poisoned")]
    LockPoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
