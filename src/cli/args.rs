//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::NodeId;

/// Family forest manager: structural edits, traversals, JSON persistence
#[derive(Parser, Debug)]
#[command(name = "kintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data file override (default from config: family.json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a person under a parent
    Add {
        /// New unique id (number or text)
        id: NodeId,
        /// Display name
        name: String,
        /// Parent id (default: the virtual root)
        #[arg(short, long, default_value = "0")]
        parent: NodeId,
    },

    /// Rename a person
    Rename {
        /// Person id
        id: NodeId,
        /// New display name
        name: String,
    },

    /// Attach a child under a parent (re-parents if already attached)
    Attach {
        /// Parent id
        parent: NodeId,
        /// Child id
        child: NodeId,
    },

    /// Move a whole subtree under a new parent
    Move {
        /// Root of the subtree to move
        child: NodeId,
        /// New parent id
        new_parent: NodeId,
    },

    /// Delete a person and all descendants
    Delete {
        /// Root of the subtree to delete
        id: NodeId,
    },

    /// Reset to a fresh single-root tree
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Render the forest as a tree
    Show,

    /// Depth-first (preorder) listing
    Dfs {
        /// Start node (default: the virtual root)
        start: Option<NodeId>,
    },

    /// Breadth-first (level order) listing
    Bfs {
        /// Start node (default: the virtual root)
        start: Option<NodeId>,
    },

    /// Max depth and descendant count
    Stats {
        /// Start node (default: the virtual root)
        start: Option<NodeId>,
    },

    /// Dump the JSON record list to stdout
    Export,

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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config path
    Path,
}
