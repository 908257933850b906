use crate::adapters::memory::{MemoryDocument, MemoryElement};
use crate::core::formatter::FormSelectors;
use crate::domain::model::{FormEvent, Selector};
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Form description used by the `simulate` command: selectors, fields and a scripted event sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub events: Vec<EventConfig>,
}

/// Overrides for the role selectors; unset entries keep the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub dollar_amount: Option<String>,
    pub loan_amount: Option<String>,
    pub property_value: Option<String>,
    pub ltv: Option<String>,
    pub needs_validation: Option<String>,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Form,
    #[default]
    Input,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub id: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Id of the enclosing form.
    pub form: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Blur,
    Submit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    pub kind: EventKind,
    pub target: String,
}

impl FormConfig {
    /// Loads and parses a form description file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = super::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    pub fn selectors(&self) -> Result<FormSelectors> {
        let defaults = FormSelectors::default();
        let pick = |configured: &Option<String>, default: Selector| match configured {
            Some(selector) => Selector::parse(selector),
            None => Ok(default),
        };

        Ok(FormSelectors {
            dollar_amount: pick(&self.selectors.dollar_amount, defaults.dollar_amount)?,
            loan_amount: pick(&self.selectors.loan_amount, defaults.loan_amount)?,
            property_value: pick(&self.selectors.property_value, defaults.property_value)?,
            ltv: pick(&self.selectors.ltv, defaults.ltv)?,
            needs_validation: pick(&self.selectors.needs_validation, defaults.needs_validation)?,
            tooltip: pick(&self.selectors.tooltip, defaults.tooltip)?,
        })
    }

    /// Builds the in-memory document described by `fields`, in declaration order.
    pub fn build_document(&self) -> Result<MemoryDocument> {
        let mut document = MemoryDocument::new();

        for field in &self.fields {
            let mut element = match field.kind {
                FieldKind::Form => MemoryElement::form(&field.id),
                FieldKind::Input => MemoryElement::input(&field.id),
            }
            .with_value(&field.value);

            for class in &field.classes {
                element = element.with_class(class);
            }
            for (name, value) in &field.attributes {
                element = element.with_attribute(name, value);
            }
            if field.required {
                element = element.required();
            }
            document.insert(element);
        }

        for field in &self.fields {
            let Some(form_id) = &field.form else {
                continue;
            };
            let form = lookup(&document, "fields.form", form_id)?;
            let element = lookup(&document, "fields.id", &field.id)?;
            if let Some(element) = document.element_mut(element) {
                element.form = Some(form);
            }
        }

        Ok(document)
    }

    /// Resolves the scripted events against a document built by [`Self::build_document`].
    pub fn events(&self, document: &MemoryDocument) -> Result<Vec<FormEvent>> {
        self.events
            .iter()
            .map(|event| {
                let target = lookup(document, "events.target", &event.target)?;
                Ok(match event.kind {
                    EventKind::Focus => FormEvent::Focus(target),
                    EventKind::Blur => FormEvent::Blur(target),
                    EventKind::Submit => FormEvent::Submit(target),
                })
            })
            .collect()
    }

    pub fn validate_config(&self) -> Result<()> {
        let selectors = [
            ("selectors.dollar_amount", &self.selectors.dollar_amount),
            ("selectors.loan_amount", &self.selectors.loan_amount),
            ("selectors.property_value", &self.selectors.property_value),
            ("selectors.ltv", &self.selectors.ltv),
            ("selectors.needs_validation", &self.selectors.needs_validation),
            ("selectors.tooltip", &self.selectors.tooltip),
        ];
        for (field, selector) in selectors {
            if let Some(selector) = selector {
                validation::validate_selector(field, selector)?;
            }
        }

        let mut ids = HashSet::new();
        for field in &self.fields {
            validation::validate_non_empty_string("fields.id", &field.id)?;
            if !ids.insert(field.id.as_str()) {
                return Err(FormError::InvalidConfigValueError {
                    field: "fields.id".to_string(),
                    value: field.id.clone(),
                    reason: "Duplicate field id".to_string(),
                });
            }
        }

        for field in &self.fields {
            if let Some(form_id) = &field.form {
                let is_form = self
                    .fields
                    .iter()
                    .any(|candidate| candidate.id == *form_id && candidate.kind == FieldKind::Form);
                if !is_form {
                    return Err(FormError::InvalidConfigValueError {
                        field: "fields.form".to_string(),
                        value: form_id.clone(),
                        reason: format!("Field '{}' refers to an unknown form", field.id),
                    });
                }
            }
        }

        for event in &self.events {
            if !ids.contains(event.target.as_str()) {
                return Err(FormError::InvalidConfigValueError {
                    field: "events.target".to_string(),
                    value: event.target.clone(),
                    reason: "Event target is not a declared field".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn lookup(document: &MemoryDocument, field: &str, id: &str) -> Result<crate::domain::model::ElementHandle> {
    document
        .element_by_id(id)
        .ok_or_else(|| FormError::InvalidConfigValueError {
            field: field.to_string(),
            value: id.to_string(),
            reason: "No element with this id".to_string(),
        })
}

impl Validate for FormConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
