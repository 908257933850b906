use crate::domain::model::{ElementHandle, Selector, TooltipHandle};

/// Host document the form bindings operate on.
///
/// In a browser this is the DOM plus the UI framework; tests and the CLI use
/// [`crate::adapters::memory::MemoryDocument`].
pub trait Document {
    /// Elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &Selector) -> Vec<ElementHandle>;

    fn query_selector(&self, selector: &Selector) -> Option<ElementHandle> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Current value; elements without a value read as an empty string.
    fn value(&self, element: ElementHandle) -> String;

    fn set_value(&mut self, element: ElementHandle, value: &str);

    fn add_class(&mut self, element: ElementHandle, class: &str);

    /// Native constraint validation for a form element.
    fn check_validity(&self, form: ElementHandle) -> bool;

    fn create_tooltip(&mut self, element: ElementHandle) -> TooltipHandle;
}
