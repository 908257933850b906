use crate::domain::model::LoanStatus;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "mortgage-form")]
#[command(about = "Currency formatting, loan-to-value and application insights for mortgage forms")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON on stderr")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render an amount in display form, e.g. 1234.5 -> $1,234.50
    Format {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Strip display formatting, e.g. $1,234.50 -> 1234.5
    Unformat {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Loan-to-value percentage from two amounts in either form
    Ltv {
        #[arg(long, allow_hyphen_values = true)]
        loan_amount: String,

        #[arg(long, allow_hyphen_values = true)]
        property_value: String,
    },

    /// Replay the focus/blur/submit events of a TOML form description
    Simulate {
        /// Path to TOML form description
        #[arg(short, long, default_value = "form.toml")]
        config: String,
    },

    /// Compare an application with past outcomes in a loan dataset
    Insights {
        /// Path to TOML application file
        #[arg(short, long)]
        application: String,

        /// Override the dataset path from the application file
        #[arg(long)]
        dataset: Option<String>,

        /// Override the outcome to compare against (approved or denied)
        #[arg(long)]
        status: Option<LoanStatus>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },
}
