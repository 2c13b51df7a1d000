//! Persistence of the template collection.
//!
//! The collection is always loaded and saved wholesale under one fixed
//! storage key. There are no partial updates and no versioning.

use crate::error::TemplateError;
use crate::model::Template;
use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A trait for loading and saving the whole template collection.
///
/// # Implementations
///
/// - `InMemoryTemplateRepository`: process-local storage, used in tests and
///   when embedding the engine
/// - `JsonFileTemplateRepository`: a single JSON file on disk
pub trait TemplateRepository: Send + Sync + Debug {
    /// Load every stored template, in stored order.
    fn load_all(&self) -> Result<Vec<Template>, TemplateError>;

    /// Replace the stored collection with `templates`.
    fn save_all(&self, templates: &[Template]) -> Result<(), TemplateError>;

    /// Returns a human-readable name for this repository (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A template repository held in memory.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<Vec<Template>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `templates`.
    pub fn with_templates(templates: Vec<Template>) -> Self {
        Self {
            templates: RwLock::new(templates),
        }
    }

    /// Number of stored templates. Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateRepository for InMemoryTemplateRepository {
    fn load_all(&self) -> Result<Vec<Template>, TemplateError> {
        self.templates
            .read()
            .map(|t| t.clone())
            .map_err(|_| TemplateError::LockPoisoned)
    }

    fn save_all(&self, templates: &[Template]) -> Result<(), TemplateError> {
        let mut stored = self
            .templates
            .write()
            .map_err(|_| TemplateError::LockPoisoned)?;
        *stored = templates.to_vec();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryTemplateRepository"
    }
}

/// A template repository backed by one JSON file holding an array of
/// templates.
///
/// A missing file is an empty collection. Content that does not parse is
/// logged and also treated as empty, so a damaged store never blocks the
/// editor. Saves go through a temporary file in the same directory and a
/// rename, so readers never observe a half-written store.
#[derive(Debug, Clone)]
pub struct JsonFileTemplateRepository {
    path: PathBuf,
}

impl JsonFileTemplateRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, message: impl ToString) -> TemplateError {
        TemplateError::Storage {
            location: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl TemplateRepository for JsonFileTemplateRepository {
    fn load_all(&self) -> Result<Vec<Template>, TemplateError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("Template store {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<Template>>(&raw) {
            Ok(templates) => {
                log::debug!(
                    "Loaded {} templates from {}",
                    templates.len(),
                    self.path.display()
                );
                Ok(templates)
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable template store {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, templates: &[Template]) -> Result<(), TemplateError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let json = serde_json::to_vec_pretty(templates)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| self.storage_error(e.error))?;

        log::debug!("Saved {} templates to {}", templates.len(), self.path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "JsonFileTemplateRepository"
    }
}
