//! Pipeviz CLI - pipeline DAG diagram generator

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use pipeviz::{Converter, FixSuggestion, OutputFormat, Pipeline, VizError};

#[derive(Parser)]
#[command(name = "pipeviz")]
#[command(about = "Pipeviz - renders pipeline execution structure as a diagram")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a pipeline definition to an image file
    Render {
        /// Path to the pipeline definition (.yaml)
        file: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Png)]
        format: RenderFormat,
    },

    /// Validate a pipeline definition and its stage graph (no rendering)
    Validate {
        /// Path to the pipeline definition (.yaml)
        file: PathBuf,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RenderFormat {
    Png,
    Svg,
    Dot,
}

impl From<RenderFormat> for OutputFormat {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Png => OutputFormat::Png,
            RenderFormat::Svg => OutputFormat::Svg,
            RenderFormat::Dot => OutputFormat::Dot,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render { file, output, format } => render(&file, &output, format),
        Commands::Validate { file, format } => validate(&file, format),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn render(file: &Path, output: &Path, format: RenderFormat) -> Result<(), VizError> {
    let pipeline = Pipeline::load(file)?;
    let converter = Converter::new();
    converter.convert(&pipeline, output, format.into())?;

    println!(
        "{} Rendered pipeline '{}' to {}",
        "✓".green(),
        pipeline.name.cyan().bold(),
        output.display()
    );
    Ok(())
}

fn validate(file: &Path, format: ReportFormat) -> Result<(), VizError> {
    let pipeline = Pipeline::load(file)?;
    let graph = Converter::new().build_graph(&pipeline)?;

    match format {
        ReportFormat::Text => {
            println!("{} Pipeline '{}' is valid", "✓".green(), pipeline.name);
            println!(
                "  Stages: {} ({} source)",
                graph.nodes.len(),
                graph.source_count()
            );
            println!("  Edges: {}", graph.edges.len());
        }
        ReportFormat::Json => {
            let report = serde_json::json!({
                "valid": true,
                "pipeline": pipeline.name,
                "stage_count": graph.nodes.len(),
                "source_count": graph.source_count(),
                "edge_count": graph.edges.len(),
                "graph": graph,
            });
            // Serialization of a plain report value cannot fail
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        }
    }

    Ok(())
}
