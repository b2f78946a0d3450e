//! Command handlers: thin wrappers that load settings and layouts, call the
//! codec, and print results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::shell::Shell;
use crate::codec::{export_markup, load_tree, render_annotated, render_markup, render_outline, TreeNodeConvert};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::util::path::expand_path;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load(Some(&project_dir))?;

    match &cli.command {
        None => _shell(settings, None),
        Some(Commands::Shell { file }) => _shell(settings, file.as_deref()),
        Some(Commands::Print { file }) => _print(file),
        Some(Commands::Tree { file }) => _tree(file),
        Some(Commands::Export { file, output }) => _export(&settings, file, output.as_deref()),
        Some(Commands::Fmt { file }) => _fmt(file),
        Some(Commands::Config { command }) => _config(command, &settings, &project_dir),
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) => Ok(expand_path(&dir.to_string_lossy())),
        None => std::env::current_dir().map_err(|e| CliError::io("resolve current directory", e)),
    }
}

#[instrument(skip(settings))]
fn _shell(settings: Settings, file: Option<&Path>) -> CliResult<()> {
    let stdin = io::stdin();
    let mut shell = Shell::new(settings, stdin.lock(), io::stdout());
    if let Some(file) = file {
        shell.preload(&expand_path(&file.to_string_lossy()))?;
    }
    shell.run()
}

#[instrument]
fn _print(file: &Path) -> CliResult<()> {
    let tree = load_tree(&expand_path(&file.to_string_lossy()))?;
    debug!("loaded {} nodes", tree.node_count());
    output::document(&render_outline(&tree));
    Ok(())
}

#[instrument]
fn _tree(file: &Path) -> CliResult<()> {
    let tree = load_tree(&expand_path(&file.to_string_lossy()))?;
    println!("{}", tree.to_tree_string());
    Ok(())
}

#[instrument(skip(settings))]
fn _export(settings: &Settings, file: &Path, target: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(&expand_path(&file.to_string_lossy()))?;
    let options = settings.markup_options();
    match target {
        Some(target) => {
            let target = expand_path(&target.to_string_lossy());
            export_markup(&tree, &options, &target)?;
            output::action("Exported", &target.display());
        }
        None => output::document(&render_markup(&tree, &options)),
    }
    Ok(())
}

#[instrument]
fn _fmt(file: &Path) -> CliResult<()> {
    let tree = load_tree(&expand_path(&file.to_string_lossy()))?;
    output::document(&render_annotated(&tree));
    Ok(())
}

#[instrument(skip(settings))]
fn _config(command: &ConfigCommands, settings: &Settings, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::document(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no config directory)".to_string());
            println!("global: {global}");
            println!("local:  {}", local_config_path(project_dir).display());
        }
        ConfigCommands::Init { global } => {
            let target = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?
            } else {
                local_config_path(project_dir)
            };
            write_template(&target)?;
            output::success(&format!("Created {}", target.display()));
        }
    }
    Ok(())
}

fn write_template(target: &Path) -> CliResult<()> {
    if target.exists() {
        return Err(CliError::Usage(format!(
            "config already exists: {}",
            target.display()
        )));
    }
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::io(format!("create {}", parent.display()), e))?;
    }
    fs::write(target, Settings::template())
        .map_err(|e| CliError::io(format!("write {}", target.display()), e))
}

#[instrument]
fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
