use crate::utils::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unformatted value of a currency field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    Empty,
    Number(f64),
}

impl RawValue {
    /// Numeric view used by computations; an empty field counts as zero.
    pub fn as_number(&self) -> f64 {
        match self {
            RawValue::Empty => 0.0,
            RawValue::Number(value) => *value,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Empty => Ok(()),
            // -0 and 0 both edit as "0"
            RawValue::Number(value) if *value == 0.0 => f.write_str("0"),
            RawValue::Number(value) => write!(f, "{}", value),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        crate::core::currency::to_raw(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    DollarAmount,
    LoanAmount,
    PropertyValue,
    Ltv,
}

impl FieldRole {
    /// Roles whose value is edited as currency (raw on focus, formatted on blur).
    pub fn is_currency(&self) -> bool {
        matches!(
            self,
            FieldRole::DollarAmount | FieldRole::LoanAmount | FieldRole::PropertyValue
        )
    }

    pub fn is_ltv_input(&self) -> bool {
        matches!(self, FieldRole::LoanAmount | FieldRole::PropertyValue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    Empty,
    RawEditing,
    Formatted,
}

/// Opaque reference to an element inside a [`crate::domain::ports::Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Focus(ElementHandle),
    Blur(ElementHandle),
    Submit(ElementHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Form passed its validity check; the host lets the submission continue.
    Proceed,
    /// Validity check failed; the host must cancel the default action and stop propagation.
    Prevented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Target has no binding for this event.
    Ignored,
    Handled,
    Submitted(SubmitOutcome),
}

/// Tooltip instance created for one element at attach time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipHandle {
    pub element: ElementHandle,
    pub title: Option<String>,
}

/// The subset of CSS selectors the form binding needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Class(String),
    Id(String),
    Attribute { name: String, value: Option<String> },
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        let invalid = |reason: &str| FormError::InvalidConfigValueError {
            field: "selector".to_string(),
            value: selector.to_string(),
            reason: reason.to_string(),
        };

        if let Some(class) = selector.strip_prefix('.') {
            if class.is_empty() {
                return Err(invalid("class selector has no name"));
            }
            return Ok(Selector::Class(class.to_string()));
        }

        if let Some(id) = selector.strip_prefix('#') {
            if id.is_empty() {
                return Err(invalid("id selector has no name"));
            }
            return Ok(Selector::Id(id.to_string()));
        }

        if let Some(body) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            let (name, value) = match body.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                    (name.trim(), Some(value.to_string()))
                }
                None => (body.trim(), None),
            };
            if name.is_empty() {
                return Err(invalid("attribute selector has no name"));
            }
            return Ok(Selector::Attribute {
                name: name.to_string(),
                value,
            });
        }

        Err(invalid("expected .class, #id or [attribute]"))
    }

    pub fn class(name: &str) -> Self {
        Selector::Class(name.to_string())
    }

    pub fn id(name: &str) -> Self {
        Selector::Id(name.to_string())
    }

    pub fn attribute(name: &str, value: &str) -> Self {
        Selector::Attribute {
            name: name.to_string(),
            value: Some(value.to_string()),
        }
    }
}

/// Outcome recorded in the loan dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Approved,
    Denied,
}

impl LoanStatus {
    pub fn code(&self) -> f64 {
        match self {
            LoanStatus::Approved => 1.0,
            LoanStatus::Denied => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Approved => "approved",
            LoanStatus::Denied => "denied",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" | "1" => Ok(LoanStatus::Approved),
            "denied" | "0" => Ok(LoanStatus::Denied),
            other => Err(FormError::ValidationError {
                message: format!("unknown loan status '{}', expected approved or denied", other),
            }),
        }
    }
}

/// One row of the processed loan dataset. Cells that are blank or not numeric read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoanRecord {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub status: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub pre_approval: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub line_of_credit: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub negative_amortization: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub interest_only: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub upfront_charges: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub income: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub credit_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryField {
    PreApproval,
    LineOfCredit,
    NegativeAmortization,
    InterestOnly,
}

impl BinaryField {
    pub fn name(&self) -> &'static str {
        match self {
            BinaryField::PreApproval => "pre_approval",
            BinaryField::LineOfCredit => "line_of_credit",
            BinaryField::NegativeAmortization => "negative_amortization",
            BinaryField::InterestOnly => "interest_only",
        }
    }

    pub fn of(&self, record: &LoanRecord) -> Option<f64> {
        match self {
            BinaryField::PreApproval => record.pre_approval,
            BinaryField::LineOfCredit => record.line_of_credit,
            BinaryField::NegativeAmortization => record.negative_amortization,
            BinaryField::InterestOnly => record.interest_only,
        }
    }
}

/// Values submitted with a loan application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub pre_approval: u8,
    pub line_of_credit: u8,
    pub negative_amortization: u8,
    pub interest_only: u8,
    /// Display form, e.g. "$2,500.00".
    pub upfront_charges: String,
    /// Display form, e.g. "$8,400.00".
    pub income: String,
    pub credit_score: u32,
}

impl ApplicationForm {
    pub fn flag(&self, field: BinaryField) -> u8 {
        match field {
            BinaryField::PreApproval => self.pre_approval,
            BinaryField::LineOfCredit => self.line_of_credit,
            BinaryField::NegativeAmortization => self.negative_amortization,
            BinaryField::InterestOnly => self.interest_only,
        }
    }
}

impl crate::utils::validation::Validate for ApplicationForm {
    fn validate(&self) -> Result<()> {
        for field in [
            BinaryField::PreApproval,
            BinaryField::LineOfCredit,
            BinaryField::NegativeAmortization,
            BinaryField::InterestOnly,
        ] {
            let flag = self.flag(field);
            if flag > 1 {
                return Err(FormError::ValidationError {
                    message: format!("{} must be 0 or 1, got {}", field.name(), flag),
                });
            }
        }
        for (name, amount) in [("upfront_charges", &self.upfront_charges), ("income", &self.income)] {
            if amount.trim().is_empty() {
                return Err(FormError::ValidationError {
                    message: format!("{} is empty", name),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;

    #[test]
    fn test_raw_value_display() {
        assert_eq!(RawValue::Empty.to_string(), "");
        assert_eq!(RawValue::Number(1234.56).to_string(), "1234.56");
        assert_eq!(RawValue::Number(100000.0).to_string(), "100000");
        assert_eq!(RawValue::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn test_raw_value_from_text() {
        assert!(RawValue::from("").is_empty());
        assert!(!RawValue::from("$0.00").is_empty());
        assert_eq!(RawValue::from("$8,400.00").as_number(), 8400.0);
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(Selector::parse(".dollar-amount").unwrap(), Selector::class("dollar-amount"));
        assert_eq!(Selector::parse("#ltv").unwrap(), Selector::id("ltv"));
        assert_eq!(
            Selector::parse("[data-bs-toggle=\"tooltip\"]").unwrap(),
            Selector::attribute("data-bs-toggle", "tooltip")
        );
        assert_eq!(
            Selector::parse("[required]").unwrap(),
            Selector::Attribute {
                name: "required".to_string(),
                value: None
            }
        );
        assert!(Selector::parse("input").is_err());
        assert!(Selector::parse(".").is_err());
    }

    #[test]
    fn test_loan_status_from_str() {
        assert_eq!("Approved".parse::<LoanStatus>().unwrap(), LoanStatus::Approved);
        assert_eq!("0".parse::<LoanStatus>().unwrap(), LoanStatus::Denied);
        assert!("pending".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn test_application_flags_must_be_binary() {
        let mut form = ApplicationForm {
            pre_approval: 1,
            line_of_credit: 0,
            negative_amortization: 0,
            interest_only: 0,
            upfront_charges: "$0.00".to_string(),
            income: "$5,000.00".to_string(),
            credit_score: 700,
        };
        assert!(form.validate().is_ok());

        form.interest_only = 2;
        assert!(matches!(
            form.validate(),
            Err(FormError::ValidationError { .. })
        ));

        form.interest_only = 0;
        form.income = "  ".to_string();
        assert!(matches!(
            form.validate(),
            Err(FormError::ValidationError { .. })
        ));
    }
}
