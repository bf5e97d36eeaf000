//! medpredict: command-line assessment desk.
//!
//! Lists the registered conditions, prints a condition's input schema, runs
//! an assessment against the prediction backend, checks backend health,
//! talks to the chat assistant, and replays the offline walkthrough.
//!
//! Usage:
//!   cargo run -p demo -- conditions
//!   cargo run -p demo -- schema heart
//!   cargo run -p demo -- assess heart --set age=52 --set sex=1
//!   cargo run -p demo -- health
//!   cargo run -p demo -- chat "what raises heart disease risk?"
//!   cargo run -p demo -- walkthrough

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use medpredict_chat::{ChatAssistant, HostedInference};
use medpredict_contracts::{
    condition::ConditionId,
    error::{MedPredictError, MedPredictResult},
    field::{FieldKind, FieldValue},
};
use medpredict_core::SubmitOutcome;
use medpredict_desk::{
    scenarios::{backend_failure, default_assessment, high_risk_result, out_of_range, stale_response},
    AssessmentDesk,
};
use medpredict_predictor::HttpPredictor;

use crate::config::DemoConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

/// medpredict: disease risk assessment from the command line.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "medpredict assessment desk",
    long_about = "Collects health metrics for a condition, validates them against the\n\
                  condition's schema, and requests a risk prediction from the backend."
)]
struct Cli {
    /// TOML file with [predictor] and [chat] sections. Defaults to the environment.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered conditions.
    Conditions,
    /// Print the input fields of a condition.
    Schema {
        condition: String,
        /// Print the schema as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fill a form, submit it, and print the result.
    Assess {
        condition: String,
        /// Field override as name=value. Unset fields keep their defaults.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
    /// Ask the backend which models it has loaded.
    Health,
    /// Send one message to the chat assistant.
    Chat { message: String },
    /// Replay the offline walkthrough scenarios.
    Walkthrough,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Conditions => "conditions",
            Command::Schema { .. } => "schema",
            Command::Assess { .. } => "assess",
            Command::Health => "health",
            Command::Chat { .. } => "chat",
            Command::Walkthrough => "walkthrough",
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    info!(command = cli.command.name(), config = ?cli.config, "running command");

    let result = match cli.command {
        Command::Conditions => list_conditions(),
        Command::Schema { condition, json } => print_schema(&condition, json),
        Command::Assess { condition, set } => assess(cli.config.as_deref(), &condition, &set),
        Command::Health => health(cli.config.as_deref()),
        Command::Chat { message } => chat(cli.config.as_deref(), &message),
        Command::Walkthrough => walkthrough(),
    };

    if let Err(e) = result {
        warn!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn offline_desk() -> MedPredictResult<AssessmentDesk> {
    AssessmentDesk::builtin(Arc::new(medpredict_desk::ScriptedPredictor::low_risk()))
}

fn list_conditions() -> MedPredictResult<()> {
    let desk = offline_desk()?;
    for profile in desk.conditions() {
        println!("{:<12} {}", profile.id, profile.title);
        println!("{:<12} {}", "", profile.description);
    }
    Ok(())
}

fn print_schema(condition: &str, json: bool) -> MedPredictResult<()> {
    let desk = offline_desk()?;
    let profile = desk.registry().profile(&ConditionId::from(condition))?;

    if json {
        let out = serde_json::to_string_pretty(profile.as_ref()).map_err(|e| MedPredictError::ConfigError {
            reason: format!("failed to serialize schema: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    println!("{}", profile.form_title);
    println!();
    for field in &profile.fields {
        let domain = match field.kind {
            FieldKind::EnumeratedChoice => field
                .choices
                .iter()
                .map(|c| format!("{}={}", c.value, c.label))
                .collect::<Vec<_>>()
                .join(", "),
            _ => format!(
                "{} to {}{}",
                field.min.unwrap_or_default(),
                field.max.unwrap_or_default(),
                field.unit.as_deref().map(|u| format!(" {u}")).unwrap_or_default()
            ),
        };
        println!("  {:<22} {:<34} default {:<6} [{}]", field.name, field.label, field.default, domain);
    }
    Ok(())
}

fn assess(config: Option<&std::path::Path>, condition: &str, overrides: &[String]) -> MedPredictResult<()> {
    let config = DemoConfig::load(config)?;
    let desk = AssessmentDesk::connect(config.predictor)?;
    let mut form = desk.open(&ConditionId::from(condition))?;

    for entry in overrides {
        let (name, value) = entry.split_once('=').ok_or_else(|| MedPredictError::ConfigError {
            reason: format!("expected NAME=VALUE, got '{entry}'"),
        })?;
        form.edit(name.trim(), FieldValue::text(value))?;
    }

    println!("{}", form.profile().form_title);
    match form.submit() {
        SubmitOutcome::Succeeded(_) => {
            if let Some(view) = form.result_view() {
                println!("  {}", view.headline);
                println!("  Confidence: {}%  ({:?})", view.confidence, view.tier);
                println!("  {}", view.recommendation);
                println!();
                println!("  {}", view.disclaimer);
            }
        }
        SubmitOutcome::Rejected(errors) => {
            println!("  Please correct the following fields:");
            for error in errors {
                println!("    {:<22} {}", error.field, error.message);
            }
        }
        SubmitOutcome::Failed(message) => println!("  {message}"),
        SubmitOutcome::Ignored => println!("  Submission ignored."),
    }
    Ok(())
}

fn health(config: Option<&std::path::Path>) -> MedPredictResult<()> {
    let config = DemoConfig::load(config)?;
    let predictor = HttpPredictor::new(config.predictor)?;
    let status = predictor.health()?;
    println!("status:        {}", status.status);
    println!("models loaded: {}", status.models_loaded.join(", "));
    Ok(())
}

fn chat(config: Option<&std::path::Path>, message: &str) -> MedPredictResult<()> {
    let config = DemoConfig::load(config)?;
    let assistant = ChatAssistant::new(Arc::new(HostedInference::new(config.chat)?));
    println!("{}", assistant.reply(message));
    Ok(())
}

fn walkthrough() -> MedPredictResult<()> {
    default_assessment::run_scenario()?;
    out_of_range::run_scenario()?;
    high_risk_result::run_scenario()?;
    backend_failure::run_scenario()?;
    stale_response::run_scenario()?;
    println!("All walkthrough scenarios completed successfully.");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
