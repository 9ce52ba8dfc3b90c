use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogDestination;

/// Attach content previews to every document of a source directory.
#[derive(Parser, Debug)]
#[command(name = "preview")]
#[command(version)]
pub struct Cli {
    /// Directory holding the source documents.
    #[arg(short, long)]
    pub source: PathBuf,

    /// Directory receiving rewritten documents and `previews.json`.
    #[arg(short, long)]
    pub destination: PathBuf,

    /// JSON file with preview options (`words`, `characters`, `marker`, ...).
    #[arg(short, long)]
    pub options: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}
