//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - daemon: run the store daemon or check that it answers
//! - task: create, list, update and delete tasks
//! - product: add and list catalog products
//! - index: list the methods the daemon answers

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskshop - in-memory task and product store
#[derive(Parser, Debug)]
#[command(name = "taskshop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Daemon management commands
    Daemon {
        #[command(subcommand)]
        command: DaemonCommands,
    },

    /// Task commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Product catalog commands
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Show the methods the daemon answers
    Index,
}

/// Daemon subcommands
#[derive(Subcommand, Debug)]
pub enum DaemonCommands {
    /// Run the daemon in the foreground until interrupted
    Start,
    /// Check whether the daemon answers
    Status,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        /// Task id (integer or text)
        id: String,
        /// Task title
        title: String,
        /// Mark the task completed
        #[arg(long)]
        completed: bool,
    },

    /// List all tasks in creation order
    List,

    /// Update the title and/or completion of a task
    Update {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Delete a task
    Delete { id: String },
}

/// Product subcommands
#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Add a product to the catalog
    Add {
        name: String,
        category: String,
        #[arg(allow_negative_numbers = true)]
        price: f64,
    },

    /// List products, optionally filtered
    List {
        /// Category (case-insensitive)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Minimum price, inclusive
        #[arg(long)]
        price_min: Option<String>,
        /// Maximum price, inclusive
        #[arg(long)]
        price_max: Option<String>,
    },
}
