//! The template data model.
//!
//! The JSON form mirrors what the template editor stores: camelCase keys,
//! `type` for the template kind, and lenient handling of missing or `null`
//! members so that hand-edited collections still load.

use docket_types::{FieldId, TemplateId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Horizontal placement of a field's value. The label is always placed at
/// the left content edge regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Unrecognised values fall back to `left`.
impl From<String> for Alignment {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

/// Advisory template category. It decides which data document a caller
/// supplies and names the subtitle; it has no other layout effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TemplateKind {
    Salary,
    Bill,
    #[default]
    Generic,
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Salary => "salary",
            TemplateKind::Bill => "bill",
            TemplateKind::Generic => "generic",
        }
    }

    /// The kind name with its first letter upper-cased, e.g. `Salary`.
    pub fn display_name(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Whether rendering this kind needs a caller-selected data record.
    pub fn requires_record(self) -> bool {
        matches!(self, TemplateKind::Salary)
    }
}

/// Unrecognised values fall back to `generic`.
impl From<String> for TemplateKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "salary" => TemplateKind::Salary,
            "bill" => TemplateKind::Bill,
            _ => TemplateKind::Generic,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three field groups of a template. They only fix the render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Body,
    Footer,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Header => "Header",
            Section::Body => "Body",
            Section::Footer => "Footer",
        })
    }
}

/// One labeled line of output, bound to a path into the data document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(default)]
    pub id: FieldId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub key_label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mapping: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub default_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub align: Alignment,
}

impl FieldDefinition {
    pub fn new(
        key_label: impl Into<String>,
        mapping: impl Into<String>,
        default_value: impl Into<String>,
        align: Alignment,
    ) -> Self {
        Self {
            id: FieldId::generate(),
            key_label: key_label.into(),
            mapping: mapping.into(),
            default_value: default_value.into(),
            align,
        }
    }

    /// A new, empty, left-aligned field as the editor creates it.
    pub fn blank() -> Self {
        Self::new("", "", "", Alignment::Left)
    }
}

/// A named, typed set of field definitions in three ordered groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default = "TemplateId::generate")]
    pub id: TemplateId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: TemplateKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub header_fields: Vec<FieldDefinition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body_fields: Vec<FieldDefinition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub footer_fields: Vec<FieldDefinition>,
}

impl Template {
    pub fn new(name: impl Into<String>, kind: TemplateKind) -> Self {
        Self {
            id: TemplateId::generate(),
            name: name.into(),
            kind,
            header_fields: Vec::new(),
            body_fields: Vec::new(),
            footer_fields: Vec::new(),
        }
    }

    /// Appends a field to `section`, builder style.
    pub fn with_field(mut self, section: Section, field: FieldDefinition) -> Self {
        self.section_mut(section).push(field);
        self
    }

    pub fn section(&self, section: Section) -> &[FieldDefinition] {
        match section {
            Section::Header => &self.header_fields,
            Section::Body => &self.body_fields,
            Section::Footer => &self.footer_fields,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<FieldDefinition> {
        match section {
            Section::Header => &mut self.header_fields,
            Section::Body => &mut self.body_fields,
            Section::Footer => &mut self.footer_fields,
        }
    }

    /// All fields in render order: header, then body, then footer.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.header_fields
            .iter()
            .chain(&self.body_fields)
            .chain(&self.footer_fields)
    }

    pub fn field_count(&self) -> usize {
        self.header_fields.len() + self.body_fields.len() + self.footer_fields.len()
    }

    /// The trimmed name, or `None` when it is blank.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// One-line listing form, e.g. `Payslip – SALARY`.
    pub fn summary(&self) -> String {
        format!(
            "{} – {}",
            self.name,
            self.kind.as_str().to_ascii_uppercase()
        )
    }
}

/// Accepts a string, `null` (as empty) or any other scalar (as its JSON
/// spelling).
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
