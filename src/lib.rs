pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};

pub use crate::adapters::{dataset::LoanDataset, memory::MemoryDocument};
pub use crate::config::{application::ApplicationConfig, toml_config::FormConfig};
pub use crate::core::{
    currency::{to_display, to_raw},
    formatter::{FinancialInputFormatter, FormSelectors},
    insights::{ResultsProvider, ResultsReport},
    ltv::compute_ltv,
};
pub use crate::utils::error::{FormError, Result};
