//! schedcheck CLI -- generate, classify, and render transactional schedules.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub mod render;

#[derive(Debug, Parser)]
#[command(
    name = "schedcheck",
    about = "Classify transactional schedules against serializability and recovery criteria"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate random schedules as .sched text files
    Generate(GenerateArgs),
    /// Classify schedule files against the correctness criteria
    Classify(ClassifyArgs),
    /// Render a schedule as a table or its conflict graph as Graphviz DOT
    Render(RenderArgs),
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of schedules to generate
    #[arg(long)]
    pub n_sched: u64,
    /// Number of transactions per schedule
    #[arg(long)]
    pub n_txn: u64,
    /// Number of objects in the alphabet
    #[arg(long)]
    pub n_obj: u64,
    /// Maximum reads/writes per transaction
    #[arg(long, default_value_t = 3)]
    pub n_act: u64,
    /// Probability that a transaction aborts instead of committing
    #[arg(long, default_value_t = 0.25)]
    pub abort_ratio: f64,
    /// Output directory for generated schedule files
    #[arg(long)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Schedule files to classify
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Check a single criterion instead of the full characterization
    #[arg(long)]
    pub property: Option<PropertyArg>,
    /// Output results as JSON (one object per file)
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PropertyArg {
    ViewSerializable,
    ConflictSerializable,
    Recoverable,
    Aca,
    Strict,
}

#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Schedule file to render
    pub path: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: RenderFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Per-transaction column table
    Table,
    /// Conflict graph in Graphviz DOT
    Dot,
}

impl From<PropertyArg> for schedcheck_core::Property {
    fn from(property: PropertyArg) -> Self {
        match property {
            PropertyArg::ViewSerializable => Self::ViewSerializable,
            PropertyArg::ConflictSerializable => Self::ConflictSerializable,
            PropertyArg::Recoverable => Self::Recoverable,
            PropertyArg::Aca => Self::AvoidsCascadingAborts,
            PropertyArg::Strict => Self::Strict,
        }
    }
}
