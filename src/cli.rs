use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storegen::{BuildMode, OutputKind};

/// storegen - use-store helper generator
#[derive(Parser, Debug)]
#[command(name = "storegen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output events as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the helper module (stays resident when watch is enabled)
    Generate {
        #[command(flatten)]
        options: GenerateOptions,

        /// Build mode; watch defaults to on in development
        #[arg(long, value_enum, default_value = "production")]
        mode: BuildMode,

        /// Force the watch trigger on
        #[arg(long, conflicts_with = "no_watch")]
        watch: bool,

        /// Force the watch trigger off
        #[arg(long = "no-watch")]
        no_watch: bool,
    },

    /// Watch the store directory and regenerate continuously
    Watch {
        #[command(flatten)]
        options: GenerateOptions,
    },
}

/// Options shared by `generate` and `watch`; each one overrides the matching
/// `storegen.toml` key.
#[derive(Args, Debug)]
pub struct GenerateOptions {
    /// Project root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory scanned for store definition files
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Include globs (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub include: Option<Vec<String>>,

    /// Exclude globs (comma separated; exclude wins over include)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Output path for the generated helper
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output flavor; inferred from the output extension when omitted
    #[arg(long, value_enum)]
    pub output_type: Option<OutputKind>,

    /// Debounce window in milliseconds for watch-triggered regeneration
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}
