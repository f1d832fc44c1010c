use checkout_forms::application::engine::{FormEngine, SubmitOutcome};
use checkout_forms::config::{FormConfig, ValidationMode};
use checkout_forms::domain::component::Amount;
use checkout_forms::domain::country::StaticCountryCatalog;
use checkout_forms::domain::ports::Localizer;
use checkout_forms::forms::blik::BlikForm;
use checkout_forms::forms::mbway::MBWayForm;
use checkout_forms::infrastructure::in_memory::InMemorySubmissionHandler;
use checkout_forms::infrastructure::logging::TracingAnalyticsTracker;
use checkout_forms::infrastructure::observability::{LogFormat, init_observability};
use checkout_forms::interfaces::csv::event_reader::EventReader;
use checkout_forms::interfaces::json_lines::JsonLinesWriter;
use checkout_forms::interfaces::localization::EnglishLocalizer;
use checkout_forms::interfaces::text_input::{TextInputForm, apply_event};
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormKind {
    Mbway,
    Blik,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file of recorded UI events (action,field,value)
    input: PathBuf,

    /// Payment method form to drive
    #[arg(long, value_enum, default_value_t = FormKind::Mbway)]
    form: FormKind,

    /// JSON form configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shopper locale, e.g. pt-PT
    #[arg(long)]
    locale: Option<String>,

    /// Validate on every change instead of on blur
    #[arg(long)]
    eager: bool,

    /// Amount added to submitted payloads
    #[arg(long)]
    amount: Option<Decimal>,

    /// ISO 4217 currency of --amount
    #[arg(long, default_value = "EUR")]
    currency: String,

    /// Print the final view state after the last event
    #[arg(long)]
    view: bool,
}

impl Cli {
    fn form_config(&self) -> Result<FormConfig> {
        let mut config = match &self.config {
            Some(path) => FormConfig::from_json_file(path).into_diagnostic()?,
            None => FormConfig::default(),
        };
        if let Some(locale) = &self.locale {
            config.shopper_locale = locale.clone();
        }
        if self.eager {
            config.validation_mode = ValidationMode::Eager;
        }
        if let Some(value) = self.amount {
            config.amount = Some(Amount::new(self.currency.clone(), value).into_diagnostic()?);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_observability(LogFormat::from_env());
    let cli = Cli::parse();
    let config = cli.form_config()?;

    match cli.form {
        FormKind::Mbway => {
            let form = MBWayForm::new(&StaticCountryCatalog::new(), &config);
            run(form, config, &cli).await
        }
        FormKind::Blik => run(BlikForm::new(), config, &cli).await,
    }
}

async fn run<P: TextInputForm>(form: P, config: FormConfig, cli: &Cli) -> Result<()> {
    let handler = InMemorySubmissionHandler::new();
    let mut engine = FormEngine::new(form, config, Box::new(handler.clone()))
        .into_diagnostic()?
        .with_analytics(Arc::new(TracingAnalyticsTracker::new()));
    let localizer = EnglishLocalizer;

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    let stdout = io::stdout();
    let mut writer = JsonLinesWriter::new(stdout.lock());

    for event_result in reader.events() {
        match event_result {
            Ok(event) => match apply_event(&mut engine, &event).await {
                Ok(Some(SubmitOutcome::Rejected)) => {
                    for (field, reason) in engine.shown_errors() {
                        eprintln!("Submission refused: {}: {}", field, localizer.localize(reason));
                    }
                }
                Ok(_) => {}
                Err(e) => eprintln!("Error processing event: {}", e),
            },
            Err(e) => eprintln!("Error reading event: {}", e),
        }

        for submitted in handler.drain().await {
            writer.write(&submitted).into_diagnostic()?;
        }
    }

    if cli.view {
        writer.write(&engine.view_state()).into_diagnostic()?;
    }

    Ok(())
}
