use anyhow::Context;
use clap::Parser;
use mortgage_form::core::{currency, ltv};
use mortgage_form::domain::model::{EventOutcome, FormEvent};
use mortgage_form::utils::{logger, validation::Validate};
use mortgage_form::{
    ApplicationConfig, CliConfig, Command, FinancialInputFormatter, FormConfig, FormError,
    LoanDataset, ResultsProvider,
};

fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config.command) {
        tracing::error!("❌ Command failed: {:#}", e);

        match e.downcast_ref::<FormError>() {
            Some(form_error) => {
                tracing::error!(
                    "Category: {:?}, Severity: {:?}",
                    form_error.category(),
                    form_error.severity()
                );
                eprintln!("❌ {}", form_error.user_friendly_message());
                eprintln!("💡 {}", form_error.recovery_suggestion());
                std::process::exit(form_error.exit_code());
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Format { value } => {
            println!("{}", currency::to_display(value.as_str()));
        }
        Command::Unformat { value } => {
            println!("{}", currency::to_raw(&value));
        }
        Command::Ltv {
            loan_amount,
            property_value,
        } => {
            let value = ltv::compute_ltv_from_fields(&loan_amount, &property_value);
            println!("{}", ltv::ltv_field_text(value));
        }
        Command::Simulate { config } => simulate(&config)?,
        Command::Insights {
            application,
            dataset,
            status,
            pretty,
        } => insights(&application, dataset, status, pretty)?,
    }
    Ok(())
}

fn simulate(path: &str) -> anyhow::Result<()> {
    tracing::info!("📁 Loading form description from: {}", path);

    let config = FormConfig::from_file(path)
        .with_context(|| format!("failed to load form description '{}'", path))?;
    config.validate()?;

    let selectors = config.selectors()?;
    let mut document = config.build_document()?;
    let events = config.events(&document)?;

    let mut binding = FinancialInputFormatter::attach(&mut document, &selectors);

    for (event, scripted) in events.into_iter().zip(&config.events) {
        let outcome = binding.dispatch(&mut document, event);
        let label = match event {
            FormEvent::Focus(_) => "focus",
            FormEvent::Blur(_) => "blur",
            FormEvent::Submit(_) => "submit",
        };
        match outcome {
            EventOutcome::Ignored => println!("{:<7} {:<20} ignored", label, scripted.target),
            EventOutcome::Handled => println!("{:<7} {:<20} ok", label, scripted.target),
            EventOutcome::Submitted(result) => {
                println!("{:<7} {:<20} {:?}", label, scripted.target, result)
            }
        }
    }

    println!();
    println!("📋 Final field values:");
    for (handle, element) in document.elements() {
        let id = element.id.as_deref().unwrap_or("-");
        match binding.field_state(handle) {
            Some(state) => println!("  {:<20} {:<20} {:?}", id, element.value, state),
            None => println!("  {:<20} {}", id, element.value),
        }
    }

    Ok(())
}

fn insights(
    application_path: &str,
    dataset_override: Option<String>,
    status_override: Option<mortgage_form::domain::model::LoanStatus>,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut config = ApplicationConfig::from_file(application_path)
        .with_context(|| format!("failed to load application '{}'", application_path))?;

    if let Some(dataset) = dataset_override {
        tracing::info!("🔧 Dataset overridden to: {}", dataset);
        config.dataset = Some(dataset);
    }
    if let Some(status) = status_override {
        config.status = Some(status);
    }
    config.validate()?;

    let dataset_path = config.dataset_path()?;
    let dataset = LoanDataset::from_path(dataset_path)
        .with_context(|| format!("failed to load dataset '{}'", dataset_path))?;

    let provider = ResultsProvider::new(&dataset, config.status(), &config.application);
    let report = provider.report()?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    tracing::info!(
        "✅ Compared application with {} {} files",
        report.records_considered,
        report.status.label()
    );
    Ok(())
}
