//! Template editing on top of a [`TemplateRepository`].
use crate::error::TemplateError;
use crate::model::{FieldDefinition, Section, Template, TemplateKind};
use crate::repository::TemplateRepository;
use docket_types::TemplateId;

/// A template under construction in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    pub name: String,
    pub kind: TemplateKind,
    header_fields: Vec<FieldDefinition>,
    body_fields: Vec<FieldDefinition>,
    footer_fields: Vec<FieldDefinition>,
}

impl TemplateDraft {
    pub fn new(name: impl Into<String>, kind: TemplateKind) -> Self {
        Self {
            name: name.into(),
            kind,
            header_fields: Vec::new(),
            body_fields: Vec::new(),
            footer_fields: Vec::new(),
        }
    }

    pub fn fields(&self, section: Section) -> &[FieldDefinition] {
        match section {
            Section::Header => &self.header_fields,
            Section::Body => &self.body_fields,
            Section::Footer => &self.footer_fields,
        }
    }

    fn fields_mut(&mut self, section: Section) -> &mut Vec<FieldDefinition> {
        match section {
            Section::Header => &mut self.header_fields,
            Section::Body => &mut self.body_fields,
            Section::Footer => &mut self.footer_fields,
        }
    }

    /// Appends a blank field to `section` and returns it for editing.
    pub fn add_field(&mut self, section: Section) -> &mut FieldDefinition {
        let fields = self.fields_mut(section);
        fields.push(FieldDefinition::blank());
        let last = fields.len() - 1;
        &mut fields[last]
    }

    /// Appends a fully specified field to `section`.
    pub fn push_field(&mut self, section: Section, field: FieldDefinition) {
        self.fields_mut(section).push(field);
    }

    /// Replaces the field at `index`. The field keeps whatever id `field`
    /// carries.
    pub fn update_field(
        &mut self,
        section: Section,
        index: usize,
        field: FieldDefinition,
    ) -> Result<(), TemplateError> {
        let fields = self.fields_mut(section);
        let len = fields.len();
        let slot = fields
            .get_mut(index)
            .ok_or(TemplateError::FieldIndexOutOfRange { section, index, len })?;
        *slot = field;
        Ok(())
    }

    pub fn remove_field(
        &mut self,
        section: Section,
        index: usize,
    ) -> Result<FieldDefinition, TemplateError> {
        let fields = self.fields_mut(section);
        if index >= fields.len() {
            return Err(TemplateError::FieldIndexOutOfRange {
                section,
                index,
                len: fields.len(),
            });
        }
        Ok(fields.remove(index))
    }

    /// Validates the draft and turns it into a template with a fresh id.
    pub fn build(self) -> Result<Template, TemplateError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TemplateError::NameRequired);
        }
        Ok(Template {
            id: TemplateId::generate(),
            name: name.to_string(),
            kind: self.kind,
            header_fields: self.header_fields,
            body_fields: self.body_fields,
            footer_fields: self.footer_fields,
        })
    }
}

/// The editable template collection.
///
/// Every change is written back through the repository as a whole
/// collection.
#[derive(Debug)]
pub struct TemplateStore<R: TemplateRepository> {
    repository: R,
    templates: Vec<Template>,
}

impl<R: TemplateRepository> TemplateStore<R> {
    /// Loads the current collection from `repository`.
    pub fn open(repository: R) -> Result<Self, TemplateError> {
        let templates = repository.load_all()?;
        log::debug!(
            "Opened template store via {} with {} templates",
            repository.name(),
            templates.len()
        );
        Ok(Self {
            repository,
            templates,
        })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| &t.id == id)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Builds `draft`, appends it and saves the collection.
    pub fn create(&mut self, draft: TemplateDraft) -> Result<&Template, TemplateError> {
        let template = draft.build()?;
        let mut next = self.templates.clone();
        next.push(template);
        self.repository.save_all(&next)?;
        self.templates = next;

        let created = &self.templates[self.templates.len() - 1];
        log::info!("Created template '{}' ({})", created.name, created.id);
        Ok(created)
    }

    /// Removes the template with `id` and saves the collection.
    pub fn remove(&mut self, id: &TemplateId) -> Result<Template, TemplateError> {
        let index = self
            .templates
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.clone()))?;
        let mut next = self.templates.clone();
        let removed = next.remove(index);
        self.repository.save_all(&next)?;
        self.templates = next;
        Ok(removed)
    }
}
