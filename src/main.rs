//! `tos-builder` command line interface.

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use tos_builder::adapters::ai::GeminiProvider;
use tos_builder::adapters::export::{LocalReportStorage, XlsxWriter};
use tos_builder::application::{AnalysisClient, ExportReportHandler};
use tos_builder::config::{AppConfig, ConfigError, LoggingConfig, ValidationError};
use tos_builder::domain::export::{to_pretty_json, ExportError};
use tos_builder::domain::tos::sample::sample_result;
use tos_builder::domain::tos::{AnalysisError, TOSResult};
use tos_builder::ports::GenerationError;

#[derive(Parser)]
#[command(name = "tos-builder")]
#[command(about = "Generate a Table of Specifications from a syllabus and an exam")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a syllabus and exam with the generative model
    Analyze {
        /// Syllabus text file
        #[arg(long)]
        syllabus: PathBuf,
        /// Exam text file
        #[arg(long)]
        exam: PathBuf,
        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// Write the JSON table to this file instead of stdout
        #[arg(long)]
        json: Option<PathBuf>,
        /// Also export the spreadsheet into the configured output directory
        #[arg(long)]
        xlsx: bool,
    },
    /// Print the built-in sample table
    Sample {
        /// Also export the spreadsheet into the configured output directory
        #[arg(long)]
        xlsx: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("The {0} is empty. Please provide its content.")]
    EmptyDocument(&'static str),

    #[error("Failed to create the model client: {0}")]
    Client(#[from] GenerationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Analysis(AnalysisError::InvalidCredential)) => {
            eprintln!(
                "The API key was rejected. Provide a valid key with --api-key or GEMINI_API_KEY."
            );
            ExitCode::FAILURE
        }
        Err(CliError::Analysis(AnalysisError::MissingCredential)) => {
            eprintln!("No API key given. Use --api-key or set GEMINI_API_KEY.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Analyze {
            syllabus,
            exam,
            api_key,
            json,
            xlsx,
        } => {
            let syllabus_text = read_document(&syllabus, "syllabus").await?;
            let exam_text = read_document(&exam, "exam").await?;
            let credential = SecretString::new(api_key.unwrap_or_default());

            let provider = GeminiProvider::new(config.ai.gemini())?;
            let client = AnalysisClient::new(Arc::new(provider))
                .with_temperature(config.ai.temperature)
                .with_checker(config.analysis.checker());

            let checked = client
                .analyze_checked(credential, &syllabus_text, &exam_text)
                .await?;
            for finding in checked.report.iter() {
                eprintln!("warning: {}", finding);
            }

            deliver(&config, &checked.result, json.as_deref(), xlsx).await
        }
        Commands::Sample { xlsx } => deliver(&config, &sample_result(), None, xlsx).await,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), CliError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter()?)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

async fn read_document(path: &Path, label: &'static str) -> Result<String, CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if text.trim().is_empty() {
        return Err(CliError::EmptyDocument(label));
    }
    Ok(text)
}

async fn deliver(
    config: &AppConfig,
    result: &TOSResult,
    json_path: Option<&Path>,
    xlsx: bool,
) -> Result<(), CliError> {
    if result.is_empty() {
        println!("No analysis results.");
        return Ok(());
    }

    let json = to_pretty_json(result)?;
    match json_path {
        Some(path) => {
            tokio::fs::write(path, json.as_bytes())
                .await
                .map_err(|source| CliError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!(path = %path.display(), "JSON table written");
        }
        None => println!("{}", json),
    }

    if xlsx {
        let handler = ExportReportHandler::new(
            Arc::new(XlsxWriter::new()),
            Arc::new(LocalReportStorage::new(&config.export.output_dir)),
        )
        .with_file_stem(&config.export.file_stem)
        .with_sheet_name(&config.export.sheet_name);

        let stored = handler.export_spreadsheet(result).await?;
        eprintln!("Spreadsheet saved to {}", stored.path.display());
    }

    Ok(())
}
