//! CLI module for taskshop - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for running the daemon
//! and for talking to it as a client.

pub mod commands;

pub use commands::Cli;
