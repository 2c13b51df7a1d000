//! Newtype wrappers for template and field identifiers.
//!
//! Both are opaque strings. Freshly created ones are random UUIDs, but any
//! string read back from storage is accepted as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Identifies a template within a template collection.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Arc<str>);

impl TemplateId {
    /// Creates a new TemplateId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a field definition. Unique within its template only.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(Arc<str>);

impl FieldId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::generate()
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_creation() {
        let id1 = TemplateId::new("payslip");
        let id2 = TemplateId::from("payslip");
        let id3 = TemplateId::from(String::from("payslip"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "payslip");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = TemplateId::generate();
        let b = TemplateId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);

        assert_ne!(FieldId::generate(), FieldId::generate());
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = FieldId::new("f-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"f-1\"");

        let back: TemplateId = serde_json::from_str("\"t-9\"").unwrap();
        assert_eq!(back.as_str(), "t-9");
    }

    #[test]
    fn test_hash_map_usage() {
        use std::collections::HashMap;

        let mut templates = HashMap::new();
        templates.insert(TemplateId::new("a"), 1);
        templates.insert(TemplateId::new("b"), 2);

        assert_eq!(templates.get(&TemplateId::new("a")), Some(&1));
    }
}
