//! Processing Block Runner - Main Entry Point

use anyhow::Context;
use block_core::Element;
use block_runner::{all_descriptors, init_logging, ImagePayload, Pipeline, PipelineConfig};
use clap::{Parser, Subcommand, ValueHint};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about = "Run processing blocks over JSON read from stdin")]
struct Cli {
    /// TOML pipeline configuration (overridable with BLOCKS_* variables)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Subcommand)]
enum Command {
    /// Read a JSON array of numbers and run it through the configured stages
    Run,
    /// Read {"shape": [...], "data": [...]} and normalize it per channel
    Image,
    /// Print the descriptor of every block as JSON
    Describe,
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn write_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = PipelineConfig::load(cli.config.as_deref())
        .context("Unable to load configuration")?;
    init_logging(&config)?;

    info!("=== Processing Blocks v{} ===", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Describe => write_json(&all_descriptors()?),
        Command::Run => {
            let pipeline = Pipeline::from_config(&config)?;
            let input: Vec<Element> =
                serde_json::from_str(&read_stdin()?).context("Expected a JSON array on stdin")?;

            let output = pipeline.run(&input)?;
            info!("Processed {} values", output.len());
            write_json(&output)
        }
        Command::Image => {
            let pipeline = Pipeline::from_config(&config)?;
            let payload: ImagePayload =
                serde_json::from_str(&read_stdin()?).context("Expected an image object on stdin")?;

            let image = payload.into_array().context("Image data does not match its shape")?;
            let normalized = pipeline.normalize_image(&image)?;
            write_json(&ImagePayload::from_array(&normalized))
        }
    }
}
