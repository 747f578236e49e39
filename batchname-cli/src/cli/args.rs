use batchname_core::Preset;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Preview-first batch renaming of the files in a directory
#[derive(Parser, Debug)]
#[command(name = "batchname")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Log more (-v for each rename, -vv for planning details)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "BATCHNAME_YES")]
    pub yes: bool,
}

/// Text supplied to presets that need it
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Prefix, suffix, text to find or remove, or the custom regex
    #[arg(long, visible_alias = "pattern", allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Replacement for replace-text and custom
    #[arg(long = "with", visible_alias = "replacement", allow_hyphen_values = true)]
    pub replace_with: Option<String>,
}

/// Which files of the directory are considered
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Include glob patterns, matched against file names
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Exclude glob patterns, matched against file names
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Leave dotfiles alone
    #[arg(long)]
    pub skip_hidden: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what a preset would rename, without touching any file
    Preview {
        /// Preset to apply (see `batchname presets`)
        preset: Preset,

        /// Directory whose files are renamed. Defaults to the current directory
        dir: Option<PathBuf>,

        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Preview output format (defaults from config if not specified)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// Preview, confirm and rename in one step
    Rename {
        /// Preset to apply (see `batchname presets`)
        preset: Preset,

        /// Directory whose files are renamed. Defaults to the current directory
        dir: Option<PathBuf>,

        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Show preview before confirmation prompt
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,

        /// Show preview only, don't rename anything
        #[arg(long)]
        dry_run: bool,

        /// Don't write a rollback log
        #[arg(long)]
        no_log: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress all output (alias for --preview none)
        #[arg(long)]
        quiet: bool,
    },

    /// List the available presets
    Presets {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show example patterns for the custom preset
    Examples {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// List rollback logs written by earlier renames
    Logs {
        /// Directory to look in. Defaults to the current directory
        dir: Option<PathBuf>,

        /// Maximum number of logs to show
        #[arg(long)]
        limit: Option<usize>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Write the completion file into this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}
