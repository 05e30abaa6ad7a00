//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan sources and write the POT template
//! - `sync`: Merge the extracted messages into every locale catalog
//! - `init`: Initialize msgsync configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Sync(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (config file is searched from here)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Directory holding one subdirectory per locale (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Locale whose new entries are pre-filled with the source text (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Template path (default: <messagesRoot>/<domain>.pot)
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the template instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Locales to synchronize (default: config `locales`, else every locale directory).
    /// Can be specified multiple times: --locale es --locale fr
    #[arg(long = "locale", short)]
    pub locales: Vec<String>,

    /// Disable fuzzy matching
    #[arg(long)]
    pub no_fuzzy: bool,

    /// Minimum similarity (0 to 1) for a fuzzy match (overrides config file)
    #[arg(long)]
    pub fuzzy_threshold: Option<f64>,

    /// Report what would change without writing catalogs
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan source files and write the POT template
    Extract(ExtractCommand),
    /// Synchronize locale catalogs with the messages found in source files
    Sync(SyncCommand),
    /// Initialize a new .msgsyncrc.json configuration file
    Init,
}
