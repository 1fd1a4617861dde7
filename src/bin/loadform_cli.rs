//! Load Form CLI - Operator-facing input surface
//!
//! Commands: catalog, document-id, render
//! Outputs JSON (or plain text) to stdout, logs to stderr
//! Returns 1 on bad input/config, 2 on a rejected edit

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use loadform_core::{
    compute_document_id, ComplianceCatalog, DestinationCode, DocumentConfig, DocumentMode,
    FieldName, FormEdit, PrintSheet, Session,
};

#[derive(Parser)]
#[command(name = "loadform-cli")]
#[command(version, about = "Load Form CLI - Bill of Lading and Temperature Log generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON document config (origin, carrier, commodity)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the compliance checklist items
    Catalog,

    /// Compute a bill of lading number
    DocumentId {
        #[arg(short, long)]
        date: String,

        #[arg(short, long)]
        trailer: String,
    },

    /// Render a document from operator input
    Render {
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Form date (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Scalar field as name=value, e.g. trailerNumber=T123
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Mark a checklist item as failed
        #[arg(long = "fail")]
        failed: Vec<u32>,

        #[arg(long, value_enum)]
        destination: Option<DestinationArg>,

        /// JSON array of edits applied after the flags
        #[arg(short, long)]
        edits: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Bol,
    Temp,
}

impl From<ModeArg> for DocumentMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Bol => DocumentMode::BillOfLading,
            ModeArg::Temp => DocumentMode::TemperatureLog,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DestinationArg {
    Ottawa,
    Etobicoke,
}

impl From<DestinationArg> for DestinationCode {
    fn from(arg: DestinationArg) -> Self {
        match arg {
            DestinationArg::Ottawa => DestinationCode::OttawaSpoke,
            DestinationArg::Etobicoke => DestinationCode::EtobicokeSpoke,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn print_error(error: impl std::fmt::Display) {
    let output = serde_json::json!({
        "success": false,
        "error": error.to_string(),
    });
    println!("{}", output);
}

/// Turn the convenience flags into edits, in flag order
fn flag_edits(
    mode: Option<ModeArg>,
    fields: &[String],
    failed: &[u32],
    destination: Option<DestinationArg>,
) -> Result<Vec<FormEdit>, String> {
    let mut edits = vec![];

    if let Some(mode) = mode {
        edits.push(FormEdit::SetMode { mode: mode.into() });
    }
    for pair in fields {
        let (name, value) = pair.split_once('=')
            .ok_or_else(|| format!("Expected name=value, got: {}", pair))?;
        let field: FieldName = name.parse().map_err(|e| format!("{}", e))?;
        edits.push(FormEdit::SetField { field, value: value.to_string() });
    }
    for item_id in failed {
        edits.push(FormEdit::SetCheck { item_id: *item_id, passed: false });
    }
    if let Some(destination) = destination {
        edits.push(FormEdit::SetDestination { destination: destination.into() });
    }
    Ok(edits)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match DocumentConfig::load_from_file(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "config load failed");
                print_error(e);
                return ExitCode::FAILURE;
            }
        },
        None => DocumentConfig::default(),
    };

    match cli.command {
        Commands::Catalog => {
            let catalog = ComplianceCatalog::new();
            match serde_json::to_string_pretty(catalog.list_items()) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    print_error(e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::DocumentId { date, trailer } => {
            println!("{}", compute_document_id(&date, &trailer));
            ExitCode::SUCCESS
        }

        Commands::Render { mode, date, fields, failed, destination, edits, format } => {
            let mut session = match date {
                Some(date) => Session::with_date(config, date),
                None => Session::new(config),
            };

            let mut all_edits = match flag_edits(mode, &fields, &failed, destination) {
                Ok(e) => e,
                Err(e) => {
                    print_error(e);
                    return ExitCode::FAILURE;
                }
            };
            if let Some(payload) = edits {
                match serde_json::from_str::<Vec<FormEdit>>(&payload) {
                    Ok(extra) => all_edits.extend(extra),
                    Err(e) => {
                        print_error(format!("Invalid edits payload: {}", e));
                        return ExitCode::FAILURE;
                    }
                }
            }

            if let Err(e) = session.apply_all(all_edits) {
                print_error(e);
                return ExitCode::from(2);
            }

            if format == OutputFormat::Text {
                print!("{}", PrintSheet::default().render_text(&session.view()));
                return ExitCode::SUCCESS;
            }

            let output = serde_json::json!({
                "success": true,
                "document": session.preview(),
            });
            match serde_json::to_string_pretty(&output) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    print_error(e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
