//! Render requests and their preconditions.
//!
//! A request names a template and optionally carries the data record picked
//! for it. Validation happens here, before the compositor is involved:
//! the compositor itself never fails.

use crate::error::PipelineError;
use docket_template::{Template, TemplateId};
use serde_json::{Map, Value};

/// A caller's selection: which template, and which data record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderRequest {
    pub template_id: Option<TemplateId>,
    pub record: Option<Value>,
}

/// A request that passed validation, borrowing the selected template.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest<'a> {
    pub template: &'a Template,
    pub data: Value,
}

impl RenderRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, id: impl Into<TemplateId>) -> Self {
        self.template_id = Some(id.into());
        self
    }

    pub fn with_record(mut self, record: Value) -> Self {
        self.record = Some(record);
        self
    }

    /// Looks the template up in `templates` and checks the record rules.
    pub fn validate<'a>(
        &self,
        templates: &'a [Template],
    ) -> Result<ValidatedRequest<'a>, PipelineError> {
        let id = self
            .template_id
            .as_ref()
            .ok_or(PipelineError::NoTemplateSelected)?;
        let template = templates
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| PipelineError::TemplateNotFound(id.clone()))?;
        let data = record_for(template, self.record.clone())?;
        Ok(ValidatedRequest { template, data })
    }
}

/// The data document `template` renders against.
///
/// Salary templates need an explicit record. Other kinds render against
/// an empty object when none is given, so every field shows its default.
pub fn record_for(template: &Template, record: Option<Value>) -> Result<Value, PipelineError> {
    match record {
        Some(record) => Ok(record),
        None if template.kind.requires_record() => Err(PipelineError::MissingRecord(template.kind)),
        None => {
            log::debug!(
                "No record for {} template '{}', rendering defaults",
                template.kind,
                template.name
            );
            Ok(Value::Object(Map::new()))
        }
    }
}
