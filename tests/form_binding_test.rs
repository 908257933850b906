use mortgage_form::adapters::memory::{MemoryDocument, MemoryElement};
use mortgage_form::core::formatter::WAS_VALIDATED_CLASS;
use mortgage_form::domain::model::{
    ElementHandle, EventOutcome, FieldRole, FieldState, FormEvent, SubmitOutcome,
};
use mortgage_form::domain::ports::Document;
use mortgage_form::{FinancialInputFormatter, FormConfig, FormSelectors};

struct LoanPage {
    document: MemoryDocument,
    form: ElementHandle,
    loan: ElementHandle,
    property: ElementHandle,
    ltv: ElementHandle,
    income: ElementHandle,
    name: ElementHandle,
}

fn loan_page() -> LoanPage {
    let mut document = MemoryDocument::new();
    let form = document.insert(MemoryElement::form("application").with_class("needs-validation"));
    let name = document.insert(MemoryElement::input("name").required().in_form(form));
    let loan = document.insert(
        MemoryElement::input("loan-amount")
            .with_class("dollar-amount")
            .required()
            .in_form(form),
    );
    let property = document.insert(
        MemoryElement::input("property-value")
            .with_class("dollar-amount")
            .required()
            .in_form(form),
    );
    let ltv = document.insert(
        MemoryElement::input("ltv")
            .with_attribute("data-bs-toggle", "tooltip")
            .with_attribute("title", "Loan to value")
            .in_form(form),
    );
    let income = document.insert(
        MemoryElement::input("income")
            .with_class("dollar-amount")
            .with_attribute("data-bs-toggle", "tooltip")
            .in_form(form),
    );

    LoanPage {
        document,
        form,
        loan,
        property,
        ltv,
        income,
        name,
    }
}

fn type_into(document: &mut MemoryDocument, element: ElementHandle, value: &str) {
    document.set_value(element, value);
}

#[test]
fn test_roles_are_merged_per_element() {
    let mut page = loan_page();
    let binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());

    assert_eq!(
        binding.roles(page.loan),
        &[FieldRole::DollarAmount, FieldRole::LoanAmount]
    );
    assert_eq!(binding.roles(page.income), &[FieldRole::DollarAmount]);
    assert_eq!(binding.roles(page.ltv), &[FieldRole::Ltv]);
    assert!(binding.roles(page.name).is_empty());
}

#[test]
fn test_focus_and_blur_cycle_through_states() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());
    let doc = &mut page.document;

    assert_eq!(binding.field_state(page.income), Some(FieldState::Empty));

    // Empty stays Empty on focus
    assert_eq!(binding.dispatch(doc, FormEvent::Focus(page.income)), EventOutcome::Handled);
    assert_eq!(binding.field_state(page.income), Some(FieldState::Empty));
    assert_eq!(doc.value(page.income), "");

    type_into(doc, page.income, "8400");
    binding.dispatch(doc, FormEvent::Blur(page.income));
    assert_eq!(doc.value(page.income), "$8,400.00");
    assert_eq!(binding.field_state(page.income), Some(FieldState::Formatted));

    binding.dispatch(doc, FormEvent::Focus(page.income));
    assert_eq!(doc.value(page.income), "8400");
    assert_eq!(binding.field_state(page.income), Some(FieldState::RawEditing));

    type_into(doc, page.income, "8400.5");
    binding.dispatch(doc, FormEvent::Blur(page.income));
    assert_eq!(doc.value(page.income), "$8,400.50");
    assert_eq!(binding.field_state(page.income), Some(FieldState::Formatted));
}

#[test]
fn test_blur_on_empty_field_renders_zero() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());

    binding.dispatch(&mut page.document, FormEvent::Blur(page.income));
    assert_eq!(page.document.value(page.income), "$0.00");
    assert_eq!(binding.field_state(page.income), Some(FieldState::Formatted));
}

#[test]
fn test_blur_reformatting_is_idempotent() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());
    let doc = &mut page.document;

    type_into(doc, page.income, "$12,345.60");
    binding.dispatch(doc, FormEvent::Blur(page.income));
    binding.dispatch(doc, FormEvent::Blur(page.income));
    assert_eq!(doc.value(page.income), "$12,345.60");
}

#[test]
fn test_ltv_updates_on_blur_of_either_input() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());
    let doc = &mut page.document;

    type_into(doc, page.loan, "100000");
    binding.dispatch(doc, FormEvent::Blur(page.loan));
    assert_eq!(doc.value(page.loan), "$100,000.00");
    assert_eq!(doc.value(page.ltv), "0");

    binding.dispatch(doc, FormEvent::Focus(page.property));
    type_into(doc, page.property, "200000");
    binding.dispatch(doc, FormEvent::Blur(page.property));
    assert_eq!(doc.value(page.property), "$200,000.00");
    assert_eq!(doc.value(page.ltv), "50.00");

    binding.dispatch(doc, FormEvent::Focus(page.loan));
    assert_eq!(doc.value(page.loan), "100000");
    type_into(doc, page.loan, "250000");
    binding.dispatch(doc, FormEvent::Blur(page.loan));
    assert_eq!(doc.value(page.ltv), "100.00");

    type_into(doc, page.loan, "-50");
    binding.dispatch(doc, FormEvent::Blur(page.loan));
    assert_eq!(doc.value(page.ltv), "0");
}

#[test]
fn test_ltv_output_is_not_a_currency_field() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());

    type_into(&mut page.document, page.ltv, "42");
    assert_eq!(
        binding.dispatch(&mut page.document, FormEvent::Focus(page.ltv)),
        EventOutcome::Ignored
    );
    assert_eq!(
        binding.dispatch(&mut page.document, FormEvent::Blur(page.ltv)),
        EventOutcome::Ignored
    );
    assert_eq!(page.document.value(page.ltv), "42");
}

#[test]
fn test_unbound_elements_are_ignored() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());

    type_into(&mut page.document, page.name, "1234");
    assert_eq!(
        binding.dispatch(&mut page.document, FormEvent::Blur(page.name)),
        EventOutcome::Ignored
    );
    assert_eq!(page.document.value(page.name), "1234");
    assert_eq!(
        binding.dispatch(&mut page.document, FormEvent::Submit(page.name)),
        EventOutcome::Ignored
    );
    assert!(!page.document.has_class(page.name, WAS_VALIDATED_CLASS));
}

#[test]
fn test_invalid_submit_is_prevented_and_marked() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());
    let doc = &mut page.document;

    type_into(doc, page.loan, "$100,000.00");
    type_into(doc, page.property, "$200,000.00");
    let before: Vec<String> = doc.elements().map(|(_, element)| element.value.clone()).collect();

    let outcome = binding.dispatch(doc, FormEvent::Submit(page.form));
    assert_eq!(outcome, EventOutcome::Submitted(SubmitOutcome::Prevented));
    assert!(doc.has_class(page.form, WAS_VALIDATED_CLASS));

    let after: Vec<String> = doc.elements().map(|(_, element)| element.value.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_valid_submit_proceeds() {
    let mut page = loan_page();
    let mut binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());
    let doc = &mut page.document;

    type_into(doc, page.name, "Ada Lovelace");
    type_into(doc, page.loan, "$100,000.00");
    type_into(doc, page.property, "$200,000.00");

    assert_eq!(
        binding.submit(doc, page.form),
        Some(SubmitOutcome::Proceed)
    );
    assert!(doc.has_class(page.form, WAS_VALIDATED_CLASS));
}

#[test]
fn test_tooltips_created_once_per_element() {
    let mut page = loan_page();
    let binding = FinancialInputFormatter::attach(&mut page.document, &FormSelectors::default());

    assert_eq!(binding.tooltips().len(), 2);
    assert_eq!(page.document.tooltip_count(page.ltv), 1);
    assert_eq!(page.document.tooltip_count(page.income), 1);
    assert_eq!(page.document.tooltip_count(page.loan), 0);
    assert_eq!(binding.tooltips()[0].title.as_deref(), Some("Loan to value"));
}

#[test]
fn test_independent_bindings_do_not_share_state() {
    let mut first = loan_page();
    let mut second = loan_page();
    let mut first_binding = FinancialInputFormatter::attach(&mut first.document, &FormSelectors::default());
    let second_binding = FinancialInputFormatter::attach(&mut second.document, &FormSelectors::default());

    type_into(&mut first.document, first.income, "10");
    first_binding.dispatch(&mut first.document, FormEvent::Blur(first.income));

    assert_eq!(first.document.value(first.income), "$10.00");
    assert_eq!(second.document.value(second.income), "");
    assert_eq!(second_binding.field_state(second.income), Some(FieldState::Empty));
}

#[test]
fn test_simulation_from_toml_description() {
    let config = FormConfig::from_toml_str(
        r##"
[[fields]]
id = "application"
kind = "form"
classes = ["needs-validation"]

[[fields]]
id = "loan-amount"
form = "application"
classes = ["dollar-amount"]
required = true
value = "$300,000.00"

[[fields]]
id = "property-value"
form = "application"
classes = ["dollar-amount"]
required = true

[[fields]]
id = "ltv"
form = "application"

[[events]]
kind = "focus"
target = "property-value"

[[events]]
kind = "blur"
target = "property-value"

[[events]]
kind = "submit"
target = "application"
"##,
    )
    .unwrap();

    let selectors = config.selectors().unwrap();
    let mut document = config.build_document().unwrap();
    let events = config.events(&document).unwrap();
    let mut binding = FinancialInputFormatter::attach(&mut document, &selectors);

    let outcomes: Vec<EventOutcome> = events
        .into_iter()
        .map(|event| binding.dispatch(&mut document, event))
        .collect();

    assert_eq!(
        outcomes,
        vec![
            EventOutcome::Handled,
            EventOutcome::Handled,
            // property value blurred to "$0.00", which counts as filled in
            EventOutcome::Submitted(SubmitOutcome::Proceed),
        ]
    );

    let property = document.element_by_id("property-value").unwrap();
    let ltv = document.element_by_id("ltv").unwrap();
    assert_eq!(document.value(property), "$0.00");
    assert_eq!(document.value(ltv), "0");
}
