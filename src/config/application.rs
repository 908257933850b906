use crate::domain::model::{ApplicationForm, LoanStatus};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input for the `insights` command.
///
/// ```toml
/// dataset = "data/processed_data.csv"
/// status = "approved"
///
/// [application]
/// pre_approval = 1
/// line_of_credit = 0
/// negative_amortization = 0
/// interest_only = 0
/// upfront_charges = "$2,500.00"
/// income = "$8,400.00"
/// credit_score = 720
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub dataset: Option<String>,
    pub status: Option<LoanStatus>,
    pub application: ApplicationForm,
}

impl ApplicationConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = super::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    pub fn dataset_path(&self) -> Result<&str> {
        validation::validate_required_field("dataset", &self.dataset).map(String::as_str)
    }

    pub fn status(&self) -> LoanStatus {
        self.status.unwrap_or(LoanStatus::Approved)
    }
}

impl Validate for ApplicationConfig {
    fn validate(&self) -> Result<()> {
        let dataset = self.dataset_path()?;
        validation::validate_path("dataset", dataset)?;
        validation::validate_file_extension("dataset", dataset, &["csv"])?;
        self.application.validate()
    }
}
