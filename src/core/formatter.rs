use crate::core::{currency, ltv};
use crate::domain::model::{
    ElementHandle, EventOutcome, FieldRole, FieldState, FormEvent, Selector, SubmitOutcome,
    TooltipHandle,
};
use crate::domain::ports::Document;
use std::collections::{BTreeMap, BTreeSet};

/// Class applied to a form after a submit attempt so the UI framework shows validation styling.
pub const WAS_VALIDATED_CLASS: &str = "was-validated";

/// Role selectors resolved once at attach time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSelectors {
    pub dollar_amount: Selector,
    pub loan_amount: Selector,
    pub property_value: Selector,
    pub ltv: Selector,
    pub needs_validation: Selector,
    pub tooltip: Selector,
}

impl Default for FormSelectors {
    fn default() -> Self {
        Self {
            dollar_amount: Selector::class("dollar-amount"),
            loan_amount: Selector::id("loan-amount"),
            property_value: Selector::id("property-value"),
            ltv: Selector::id("ltv"),
            needs_validation: Selector::class("needs-validation"),
            tooltip: Selector::attribute("data-bs-toggle", "tooltip"),
        }
    }
}

#[derive(Debug, Clone)]
struct BoundField {
    roles: Vec<FieldRole>,
    state: FieldState,
}

impl BoundField {
    fn is_currency(&self) -> bool {
        self.roles.iter().any(FieldRole::is_currency)
    }

    fn is_ltv_input(&self) -> bool {
        self.roles.iter().any(FieldRole::is_ltv_input)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct LtvElements {
    loan_amount: Option<ElementHandle>,
    property_value: Option<ElementHandle>,
    output: Option<ElementHandle>,
}

/// Currency/LTV field behavior, validation gating and tooltips bound to one document.
///
/// Every element gets a single entry in the handler table no matter how many
/// roles it plays, so a loan-amount input that is also a dollar-amount input
/// is formatted once per blur and then triggers the LTV refresh.
#[derive(Debug, Clone, Default)]
pub struct FinancialInputFormatter {
    fields: BTreeMap<ElementHandle, BoundField>,
    ltv: LtvElements,
    forms: BTreeSet<ElementHandle>,
    tooltips: Vec<TooltipHandle>,
}

impl FinancialInputFormatter {
    pub fn attach<D: Document + ?Sized>(document: &mut D, selectors: &FormSelectors) -> Self {
        let mut binding = Self::default();

        for element in document.query_selector_all(&selectors.dollar_amount) {
            binding.bind(document, element, FieldRole::DollarAmount);
        }

        binding.ltv.loan_amount = document.query_selector(&selectors.loan_amount);
        binding.ltv.property_value = document.query_selector(&selectors.property_value);
        binding.ltv.output = document.query_selector(&selectors.ltv);

        let ltv = binding.ltv;
        if let Some(element) = ltv.loan_amount {
            binding.bind(document, element, FieldRole::LoanAmount);
        }
        if let Some(element) = ltv.property_value {
            binding.bind(document, element, FieldRole::PropertyValue);
        }
        if let Some(element) = ltv.output {
            binding.bind(document, element, FieldRole::Ltv);
        }

        binding.forms = document
            .query_selector_all(&selectors.needs_validation)
            .into_iter()
            .collect();

        binding.tooltips = document
            .query_selector_all(&selectors.tooltip)
            .into_iter()
            .map(|element| document.create_tooltip(element))
            .collect();

        tracing::info!(
            fields = binding.fields.len(),
            forms = binding.forms.len(),
            tooltips = binding.tooltips.len(),
            "Attached form bindings"
        );

        binding
    }

    fn bind<D: Document + ?Sized>(&mut self, document: &D, element: ElementHandle, role: FieldRole) {
        let field = self.fields.entry(element).or_insert_with(|| BoundField {
            roles: Vec::new(),
            state: if document.value(element).is_empty() {
                FieldState::Empty
            } else {
                FieldState::Formatted
            },
        });
        if !field.roles.contains(&role) {
            field.roles.push(role);
        }
    }

    pub fn dispatch<D: Document + ?Sized>(&mut self, document: &mut D, event: FormEvent) -> EventOutcome {
        tracing::debug!(?event, "Dispatching form event");
        match event {
            FormEvent::Focus(element) => self.focus(document, element),
            FormEvent::Blur(element) => self.blur(document, element),
            FormEvent::Submit(form) => match self.submit(document, form) {
                Some(outcome) => EventOutcome::Submitted(outcome),
                None => EventOutcome::Ignored,
            },
        }
    }

    /// Swaps the display form for the raw digits so the user edits an unformatted number.
    pub fn focus<D: Document + ?Sized>(&mut self, document: &mut D, element: ElementHandle) -> EventOutcome {
        let Some(field) = self.fields.get_mut(&element) else {
            return EventOutcome::Ignored;
        };
        if !field.is_currency() {
            return EventOutcome::Ignored;
        }

        let raw = currency::to_raw(&document.value(element));
        if raw.is_empty() {
            field.state = FieldState::Empty;
            return EventOutcome::Handled;
        }

        document.set_value(element, &raw.to_string());
        field.state = FieldState::RawEditing;
        EventOutcome::Handled
    }

    /// Reformats the field and, for loan-amount or property-value, refreshes the LTV output.
    pub fn blur<D: Document + ?Sized>(&mut self, document: &mut D, element: ElementHandle) -> EventOutcome {
        let Some(field) = self.fields.get_mut(&element) else {
            return EventOutcome::Ignored;
        };

        let mut handled = false;
        if field.is_currency() {
            let display = currency::to_display(currency::to_raw(&document.value(element)));
            document.set_value(element, &display);
            field.state = FieldState::Formatted;
            handled = true;
        }

        if field.is_ltv_input() {
            self.refresh_ltv(document);
            handled = true;
        }

        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }

    /// Returns `None` when `form` is not a validation form.
    pub fn submit<D: Document + ?Sized>(&mut self, document: &mut D, form: ElementHandle) -> Option<SubmitOutcome> {
        if !self.forms.contains(&form) {
            return None;
        }

        let valid = document.check_validity(form);
        document.add_class(form, WAS_VALIDATED_CLASS);

        if valid {
            Some(SubmitOutcome::Proceed)
        } else {
            tracing::warn!(?form, "Form failed validation, submission prevented");
            Some(SubmitOutcome::Prevented)
        }
    }

    /// Recomputes the LTV output from the current loan-amount and property-value text.
    pub fn refresh_ltv<D: Document + ?Sized>(&self, document: &mut D) -> Option<f64> {
        let output = self.ltv.output?;
        let read = |element: Option<ElementHandle>| {
            element
                .map(|element| document.value(element))
                .unwrap_or_default()
        };

        let value = ltv::compute_ltv_from_fields(
            &read(self.ltv.loan_amount),
            &read(self.ltv.property_value),
        );
        document.set_value(output, &ltv::ltv_field_text(value));
        tracing::debug!(ltv = value, "Refreshed loan-to-value");
        Some(value)
    }

    pub fn field_state(&self, element: ElementHandle) -> Option<FieldState> {
        self.fields.get(&element).map(|field| field.state)
    }

    pub fn roles(&self, element: ElementHandle) -> &[FieldRole] {
        self.fields
            .get(&element)
            .map(|field| field.roles.as_slice())
            .unwrap_or(&[])
    }

    pub fn forms(&self) -> impl Iterator<Item = ElementHandle> + '_ {
        self.forms.iter().copied()
    }

    pub fn tooltips(&self) -> &[TooltipHandle] {
        &self.tooltips
    }
}
