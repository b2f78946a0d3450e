//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Interactive JavaFX layout tree builder with FXML export
#[derive(Parser, Debug)]
#[command(name = "fxtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .fxtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Edit a layout interactively (default)
    Shell {
        /// Layout file to load first
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print a layout file as an indented outline
    Print {
        /// Positional layout file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show a layout file as a tree
    Tree {
        /// Positional layout file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Export a layout file to FXML
    Export {
        /// Positional layout file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Target .fxml file (default: stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Re-emit a layout file in canonical positional form
    Fmt {
        /// Positional layout file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },
}
