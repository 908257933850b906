use crate::domain::model::{ElementHandle, Selector, TooltipHandle};
use crate::domain::ports::Document;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Form,
    Input,
}

#[derive(Debug, Clone)]
pub struct MemoryElement {
    pub kind: ElementKind,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub value: String,
    pub required: bool,
    pub form: Option<ElementHandle>,
}

impl MemoryElement {
    pub fn form(id: &str) -> Self {
        Self::new(ElementKind::Form, id)
    }

    pub fn input(id: &str) -> Self {
        Self::new(ElementKind::Input, id)
    }

    fn new(kind: ElementKind, id: &str) -> Self {
        Self {
            kind,
            id: (!id.is_empty()).then(|| id.to_string()),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            value: String::new(),
            required: false,
            form: None,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn in_form(mut self, form: ElementHandle) -> Self {
        self.form = Some(form);
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(class) => self.classes.contains(class),
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Attribute { name, value } => match (self.attributes.get(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        }
    }
}

/// In-memory document with just enough behavior for the form bindings:
/// selector lookup, values, classes, `required` validity and tooltip bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    tooltips: Vec<ElementHandle>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element: MemoryElement) -> ElementHandle {
        self.elements.push(element);
        ElementHandle(self.elements.len() - 1)
    }

    pub fn element(&self, handle: ElementHandle) -> Option<&MemoryElement> {
        self.elements.get(handle.0)
    }

    pub fn element_mut(&mut self, handle: ElementHandle) -> Option<&mut MemoryElement> {
        self.elements.get_mut(handle.0)
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.elements
            .iter()
            .position(|element| element.id.as_deref() == Some(id))
            .map(ElementHandle)
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementHandle, &MemoryElement)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| (ElementHandle(index), element))
    }

    pub fn has_class(&self, handle: ElementHandle, class: &str) -> bool {
        self.element(handle)
            .map(|element| element.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn tooltip_count(&self, handle: ElementHandle) -> usize {
        self.tooltips.iter().filter(|&&element| element == handle).count()
    }
}

impl Document for MemoryDocument {
    fn query_selector_all(&self, selector: &Selector) -> Vec<ElementHandle> {
        self.elements()
            .filter(|(_, element)| element.matches(selector))
            .map(|(handle, _)| handle)
            .collect()
    }

    fn value(&self, element: ElementHandle) -> String {
        self.element(element)
            .map(|element| element.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, element: ElementHandle, value: &str) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element.value = value.to_string();
        }
    }

    fn add_class(&mut self, element: ElementHandle, class: &str) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element.classes.insert(class.to_string());
        }
    }

    fn check_validity(&self, form: ElementHandle) -> bool {
        // only form elements own controls
        let is_form = self
            .element(form)
            .is_some_and(|element| element.kind == ElementKind::Form);
        if !is_form {
            return true;
        }
        self.elements
            .iter()
            .filter(|element| element.form == Some(form) && element.required)
            .all(|element| !element.value.trim().is_empty())
    }

    fn create_tooltip(&mut self, element: ElementHandle) -> TooltipHandle {
        self.tooltips.push(element);
        let title = self.element(element).and_then(|element| {
            element
                .attributes
                .get("data-bs-title")
                .or_else(|| element.attributes.get("title"))
                .cloned()
        });
        TooltipHandle { element, title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_lookup() {
        let mut doc = MemoryDocument::new();
        let form = doc.insert(MemoryElement::form("application").with_class("needs-validation"));
        let income = doc.insert(MemoryElement::input("income").with_class("dollar-amount").in_form(form));
        let help = doc.insert(
            MemoryElement::input("")
                .with_attribute("data-bs-toggle", "tooltip")
                .with_attribute("title", "Gross monthly income"),
        );

        assert_eq!(doc.query_selector_all(&Selector::class("dollar-amount")), vec![income]);
        assert_eq!(doc.query_selector(&Selector::id("application")), Some(form));
        assert_eq!(
            doc.query_selector_all(&Selector::attribute("data-bs-toggle", "tooltip")),
            vec![help]
        );
        assert_eq!(doc.element_by_id("income"), Some(income));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_check_validity_requires_non_blank_values() {
        let mut doc = MemoryDocument::new();
        let form = doc.insert(MemoryElement::form("application"));
        let name = doc.insert(MemoryElement::input("name").required().in_form(form));
        doc.insert(MemoryElement::input("notes").in_form(form));

        assert!(!doc.check_validity(form));
        doc.set_value(name, "   ");
        assert!(!doc.check_validity(form));
        doc.set_value(name, "Ada");
        assert!(doc.check_validity(form));
    }

    #[test]
    fn test_non_form_handle_has_no_required_controls() {
        let mut doc = MemoryDocument::new();
        let wrapper = doc.insert(MemoryElement::input("wrapper"));
        doc.insert(MemoryElement::input("name").required().in_form(wrapper));

        assert!(doc.check_validity(wrapper));
        assert!(doc.check_validity(ElementHandle(42)));
    }

    #[test]
    fn test_create_tooltip_reads_title() {
        let mut doc = MemoryDocument::new();
        let el = doc.insert(MemoryElement::input("ltv").with_attribute("data-bs-title", "Loan to value"));
        let tooltip = doc.create_tooltip(el);
        assert_eq!(tooltip.title.as_deref(), Some("Loan to value"));
        assert_eq!(doc.tooltip_count(el), 1);
    }
}
