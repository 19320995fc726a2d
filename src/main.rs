//! signal-lab CLI.
//!
//! Usage:
//!   signal-lab analyze chat.txt --format text
//!   signal-lab analyze --sample --context business --stakes 9
//!   signal-lab parse chat.txt
//!   signal-lab assemble shot1.png shot2.png | signal-lab analyze
//!   signal-lab sample

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use signal_lab::analysis::{Context, analyze_messages};
use signal_lab::config::{Config, Objective, OutputFormat};
use signal_lab::ingest::{ImageSource, SidecarTextExtractor, assemble_from_images};
use signal_lab::report::Report;
use signal_lab::transcript::{SAMPLE_TRANSCRIPT, parse_transcript};

/// Exit status when the transcript is too short to analyze
const EXIT_INSUFFICIENT_DATA: i32 = 2;

#[derive(Parser)]
#[command(name = "signal-lab")]
#[command(about = "Strategic analysis of two-party conversations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Transcript file; reads stdin when omitted
    file: Option<PathBuf>,
    /// Use the bundled sample conversation
    #[arg(long, conflicts_with = "file")]
    sample: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a conversation and suggest replies
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// How much the outcome matters, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        stakes: Option<u8>,
        /// Skip detection and treat the conversation as this context
        #[arg(long)]
        context: Option<Context>,
        #[arg(long)]
        objective: Option<Objective>,
        /// json or text
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Print the parsed messages as JSON
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Stitch pre-extracted screenshot text into one transcript
    Assemble {
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Print the bundled sample conversation
    Sample,
}

fn read_input(input: &InputArgs) -> Result<String> {
    if input.sample {
        return Ok(SAMPLE_TRANSCRIPT.to_string());
    }
    match &input.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut config, config_warnings) = Config::load_with_warnings().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.runtime.log_level)?)
        .with_writer(std::io::stderr)
        .init();
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    match cli.command {
        Commands::Analyze {
            input,
            stakes,
            context,
            objective,
            format,
        } => {
            if let Some(s) = stakes {
                config.analysis.stakes = s;
            }
            if context.is_some() {
                config.analysis.context_override = context;
            }
            if objective.is_some() {
                config.analysis.objective_override = objective;
            }
            let format = format.unwrap_or(config.runtime.format);

            let text = read_input(&input)?;
            let messages = parse_transcript(&text);
            let analysis = match analyze_messages(&messages, &config.analysis) {
                Ok(a) => a,
                Err(e) if e.is_insufficient_data() => {
                    eprintln!("Not enough conversation to analyze: {}", e);
                    std::process::exit(EXIT_INSUFFICIENT_DATA);
                }
                Err(e) => return Err(e.into()),
            };

            let report = Report::build(analysis, &messages);
            match format {
                OutputFormat::Json => println!("{}", report.to_json()?),
                OutputFormat::Text => print!("{}", report.to_text()),
            }
        }
        Commands::Parse { input } => {
            let text = read_input(&input)?;
            let messages = parse_transcript(&text);
            println!("{}", serde_json::to_string_pretty(&messages)?);
        }
        Commands::Assemble { images } => {
            let images: Vec<ImageSource> = images.into_iter().map(ImageSource::new).collect();
            let transcript = assemble_from_images(&SidecarTextExtractor, &images).await?;
            println!("{}", transcript);
        }
        Commands::Sample => println!("{}", SAMPLE_TRANSCRIPT),
    }

    Ok(())
}
