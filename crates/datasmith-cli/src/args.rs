use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "datasmith",
    about = "Generate synthetic tabular data from declarative column rules",
    version,
    after_help = "Examples:\n  datasmith init                                  # write a sample rules.toml\n  datasmith generate --output leads.csv\n  datasmith generate --rules pipeline.toml --rows 1000 --seed 42 --output leads.json\n  datasmith preview --rows 10\n  datasmith graph --format dot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a table from a rules file
    Generate(GenerateArgs),

    /// Preview the first rows of a generated table
    Preview(PreviewArgs),

    /// Visualize the column dependency graph
    Graph(GraphArgs),

    /// Write the bundled sample rules file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Rules file path
    #[arg(long, env = "DATASMITH_RULES", default_value = "rules.toml")]
    pub rules: PathBuf,

    /// Number of records (overrides records.num)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Output file path (.csv, .json); stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from file extension if not specified)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Random seed for deterministic generation (overrides records.seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run mode 1-3 (overrides records.mode)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub mode: Option<u8>,
}

/// Preview row cap.
pub const MAX_PREVIEW_ROWS: usize = 25;

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Rules file path
    #[arg(long, env = "DATASMITH_RULES", default_value = "rules.toml")]
    pub rules: PathBuf,

    /// Number of rows to show (at most 25)
    #[arg(long, default_value = "15")]
    pub rows: usize,

    /// Random seed (defaults to records.seed, then 42)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Rules file path
    #[arg(long, env = "DATASMITH_RULES", default_value = "rules.toml")]
    pub rules: PathBuf,

    /// Output format for the dependency graph
    #[arg(long, default_value = "mermaid")]
    pub format: GraphFormat,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the sample rules file
    #[arg(long, default_value = "rules.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum GraphFormat {
    Mermaid,
    Dot,
}

impl GenerateArgs {
    /// Determine output format from file extension or explicit format flag.
    pub fn output_format(&self) -> OutputFormat {
        if let Some(ref fmt) = self.format {
            return fmt.clone();
        }
        match self.output.as_ref().and_then(|p| p.extension()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}
