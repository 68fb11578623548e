//! Command dispatch: each subcommand runs load, act, save as needed.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::actions::{self, Action};
use crate::application::store::{self, TreeStore};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::domain::{NodeId, VIRTUAL_ROOT_ID};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    let data_file = cli
        .file
        .clone()
        .unwrap_or_else(|| settings.data_file.clone());
    let store = TreeStore::new(data_file, settings.root_label.clone());

    match &cli.command {
        Some(Commands::Add { id, name, parent }) => {
            require_label(name)?;
            require_id(id)?;
            mutate(
                &store,
                &settings,
                Action::Add {
                    id: id.clone(),
                    name: name.clone(),
                    parent: parent.clone(),
                },
            )
        }
        Some(Commands::Rename { id, name }) => {
            require_label(name)?;
            mutate(
                &store,
                &settings,
                Action::Rename {
                    id: id.clone(),
                    name: name.clone(),
                },
            )
        }
        Some(Commands::Attach { parent, child }) => mutate(
            &store,
            &settings,
            Action::Attach {
                parent: parent.clone(),
                child: child.clone(),
            },
        ),
        Some(Commands::Move { child, new_parent }) => mutate(
            &store,
            &settings,
            Action::Move {
                child: child.clone(),
                new_parent: new_parent.clone(),
            },
        ),
        Some(Commands::Delete { id }) => mutate(&store, &settings, Action::Delete { id: id.clone() }),
        Some(Commands::Reset { yes }) => reset(&store, &settings, *yes),
        Some(Commands::Show) => show(&store),
        Some(Commands::Dfs { start }) => dfs(&store, start.as_ref()),
        Some(Commands::Bfs { start }) => bfs(&store, start.as_ref()),
        Some(Commands::Stats { start }) => stats(&store, start.as_ref()),
        Some(Commands::Export) => export(&store),
        Some(Commands::Config { command }) => execute_config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "kintree", &mut io::stdout());
            Ok(())
        }
        None => show(&store),
    }
}

/// Reject blank display names before they reach the tree.
fn require_label(name: &str) -> CliResult<()> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidArgs("name must not be empty".to_string()));
    }
    Ok(())
}

fn require_id(id: &NodeId) -> CliResult<()> {
    if matches!(id, NodeId::Text(s) if s.trim().is_empty()) {
        return Err(CliError::InvalidArgs("id must not be empty".to_string()));
    }
    Ok(())
}

#[instrument(skip(store, settings))]
fn mutate(store: &TreeStore, settings: &Settings, action: Action) -> CliResult<()> {
    debug!("data file: {}", store.path().display());
    let mut tree = store.load();
    let msg = actions::apply(&mut tree, action, &settings.root_label)?;
    store.save(&tree)?;
    output::success(&msg);
    Ok(())
}

#[instrument(skip(store, settings))]
fn reset(store: &TreeStore, settings: &Settings, yes: bool) -> CliResult<()> {
    if !yes {
        output::prompt("Reset the tree and lose all data? [y/N]");
        let mut answer = String::new();
        let confirmed = io::stdin().read_line(&mut answer).is_ok()
            && answer.trim().eq_ignore_ascii_case("y");
        if !confirmed {
            output::info("aborted");
            return Ok(());
        }
    }
    mutate(store, settings, Action::Reset)
}

#[instrument(skip(store))]
fn show(store: &TreeStore) -> CliResult<()> {
    let tree = store.load();
    print!("{}", output::render_forest(&tree));
    output::detail(&format!(
        "total nodes (including virtual root): {}",
        tree.len()
    ));
    Ok(())
}

#[instrument(skip(store))]
fn dfs(store: &TreeStore, start: Option<&NodeId>) -> CliResult<()> {
    let tree = store.load();
    let start = start.cloned().unwrap_or(VIRTUAL_ROOT_ID);
    let order = tree.depth_first(&start)?;
    output::info(&output::traversal_labels(&tree, &order));
    Ok(())
}

#[instrument(skip(store))]
fn bfs(store: &TreeStore, start: Option<&NodeId>) -> CliResult<()> {
    let tree = store.load();
    let start = start.cloned().unwrap_or(VIRTUAL_ROOT_ID);
    let order = tree.breadth_first(&start)?;
    output::info(&output::traversal_labels(&tree, &order));
    Ok(())
}

#[instrument(skip(store))]
fn stats(store: &TreeStore, start: Option<&NodeId>) -> CliResult<()> {
    let tree = store.load();
    let start = start.cloned().unwrap_or(VIRTUAL_ROOT_ID);
    let depth = tree.max_depth(&start)?;
    let descendants = tree.count_descendants(&start)?;
    output::header(&format!("stats for {}", start));
    output::detail(&format!("max depth: {}", depth));
    output::detail(&format!("descendants: {}", descendants));
    Ok(())
}

#[instrument(skip(store))]
fn export(store: &TreeStore) -> CliResult<()> {
    let tree = store.load();
    output::info(&store::to_json(&tree)?);
    Ok(())
}

fn execute_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            let Some(path) = config::global_config_path() else {
                return Err(CliError::InvalidArgs(
                    "cannot determine config directory".to_string(),
                ));
            };
            if path.exists() {
                output::info(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(io_err("create config directory"))?;
            }
            std::fs::write(&path, Settings::template()).map_err(io_err("write config template"))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::info("no config directory available"),
            }
            Ok(())
        }
    }
}

fn io_err(context: &str) -> impl Fn(std::io::Error) -> CliError + '_ {
    move |e| {
        CliError::App(crate::application::ApplicationError::Store {
            context: context.to_string(),
            source: Box::new(e),
        })
    }
}
