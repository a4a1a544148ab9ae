//! Paperlane CLI — command-line client for the Paperlane relay.
//!
//! Set PAPERLANE_API_URL (or API_URL) to point at the relay, and optionally
//! PAPERLANE_VIEWER_URL for preview links.

use anyhow::Context;
use clap::{Parser, Subcommand};
use paperlane_api_client::{
    ActionKind, ApiClient, PipelineConfig, ProcessingInstructions, SourceDocument,
};
use paperlane_cli::{guess_content_type, init_tracing};
use paperlane_core::validation::pdf_filename;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paperlane", about = "Paperlane document conversion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document and host a preview of the result
    Convert {
        /// Path to the document to convert
        file: PathBuf,
        /// Run OCR on scanned pages
        #[arg(long)]
        ocr: bool,
        /// Redact flagged content
        #[arg(long)]
        redact: bool,
        /// Strip document metadata
        #[arg(long = "strip-metadata")]
        strip_metadata: bool,
        /// Processing action: convert or redact
        #[arg(long, default_value = "convert")]
        action: String,
        /// Output path (default: source name with a .pdf extension)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Skip the preview upload entirely
        #[arg(long)]
        no_preview: bool,
    },
}

fn parse_action(action: &str) -> Result<ActionKind, anyhow::Error> {
    match action.to_lowercase().as_str() {
        "convert" => Ok(ActionKind::Convert),
        "redact" => Ok(ActionKind::Redact),
        other => anyhow::bail!("Unknown action '{}': expected 'convert' or 'redact'", other),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            file,
            ocr,
            redact,
            strip_metadata,
            action,
            output,
            no_preview,
        } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document")
                .to_string();
            let content_type = guess_content_type(&file);

            let instructions = ProcessingInstructions {
                ocr,
                redact,
                strip_metadata,
                action: parse_action(&action)?,
                ..Default::default()
            };
            let document = SourceDocument::new(bytes, content_type, filename.clone());

            let client = ApiClient::from_env()?;
            let output_path =
                output.unwrap_or_else(|| file.with_file_name(pdf_filename(&filename)));

            if no_preview {
                let artifact = client.convert(&document, &instructions).await?;
                std::fs::write(&output_path, &artifact.bytes)
                    .with_context(|| format!("Failed to write {}", output_path.display()))?;
                println!("Converted: {}", output_path.display());
            } else {
                let outcome = client
                    .run_pipeline(&PipelineConfig::from_env(), document, &instructions)
                    .await?;
                std::fs::write(&output_path, &outcome.artifact.bytes)
                    .with_context(|| format!("Failed to write {}", output_path.display()))?;
                println!("Converted: {}", output_path.display());
                match &outcome.preview {
                    Ok(link) => println!("Preview:   {}", link.url),
                    Err(warning) => eprintln!("Warning:   {}", warning),
                }
            }
        }
    }

    Ok(())
}
