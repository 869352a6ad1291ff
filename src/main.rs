//! jsonforms CLI - bind form documents from disk

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use jsonforms::{load_document, read_form, FixSuggestion, Form, FormConfig, FormError, FormFields};

#[derive(Parser)]
#[command(name = "jsonforms")]
#[command(about = "Bind a JSON Schema, a UI Schema and data into one enriched form tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a UI Schema and print it (bound to data when --data is given)
    Bind {
        /// JSON Schema file (.json, .yaml)
        #[arg(short, long)]
        schema: PathBuf,

        /// UI Schema file (.json, .yaml)
        #[arg(short, long)]
        ui: PathBuf,

        /// Data file to pre-populate the form
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Layout config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Decode a submitted form (JSON object of field → value) into data
    ReadForm {
        /// Submission file
        file: PathBuf,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    // Logs go to stderr, stdout carries the JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bind {
            schema,
            ui,
            data,
            config,
            pretty,
        } => bind(&schema, &ui, data.as_deref(), config.as_deref(), pretty),
        Commands::ReadForm { file, pretty } => decode_submission(&file, pretty),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.downcast_ref::<FormError>().and_then(|fe| fe.fix_suggestion()) {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn bind(
    schema: &Path,
    ui: &Path,
    data: Option<&Path>,
    config: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => FormConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FormConfig::default(),
    }
    .with_env();

    let schema_doc = load_document(schema)
        .with_context(|| format!("Failed to load schema from {}", schema.display()))?;
    let ui_doc = load_document(ui)
        .with_context(|| format!("Failed to load UI schema from {}", ui.display()))?;

    let mut form = Form::with_config(schema_doc, ui_doc, config)?;

    if let Some(path) = data {
        let data_doc = load_document(path)
            .with_context(|| format!("Failed to load data from {}", path.display()))?;
        form.bind_data(data_doc)?;
    }

    let output = if pretty {
        form.to_json_pretty()?
    } else {
        form.to_json_string()?
    };
    println!("{}", output);
    Ok(())
}

fn decode_submission(file: &Path, pretty: bool) -> anyhow::Result<()> {
    let submission = load_document(file)
        .with_context(|| format!("Failed to load submission from {}", file.display()))?;

    let Value::Object(entries) = submission else {
        bail!("Submission must be a JSON object of field → value");
    };

    let mut fields = FormFields::new();
    for (key, value) in entries {
        let values = match value {
            Value::Array(items) => items.iter().map(field_text).collect(),
            other => vec![field_text(&other)],
        };
        fields.insert(key, values);
    }

    let doc = read_form(&fields);
    let output = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    println!("{}", output);
    Ok(())
}

/// Form fields are always submitted as text
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
