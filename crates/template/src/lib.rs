//! Template model, editing and persistence.
//!
//! A template is plain data: a name, an advisory kind and three ordered
//! groups of field definitions. This crate also hosts the collaborators
//! around rendering that own mutable state:
//!
//! - **`TemplateRepository`**: wholesale load/save of the template collection
//! - **`TemplateStore`**: create/remove templates on top of a repository
//! - **`TemplateDraft`**: add/update/remove fields before a template exists
//!
//! The compositor only ever receives a finished `Template` value and never
//! touches a repository.

mod error;
pub mod model;
pub mod repository;
pub mod store;

pub use error::TemplateError;
pub use model::{Alignment, FieldDefinition, Section, Template, TemplateKind};
pub use repository::{InMemoryTemplateRepository, JsonFileTemplateRepository, TemplateRepository};
pub use store::{TemplateDraft, TemplateStore};

pub use docket_types::{FieldId, TemplateId};
