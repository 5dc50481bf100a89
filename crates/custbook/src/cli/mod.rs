//! Command-line interface for custbook.
//!
//! This module provides the CLI structure for the `custbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, FieldArgs, ListCommand, OutputFormat,
    ResetCommand, ShowCommand, StatusCommand, UpdateCommand,
};

/// custbook - Keep track of your customers
///
/// Customer records are kept in a local database and listed newest first.
#[derive(Debug, Parser)]
#[command(name = "custbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all customers, newest first
    List(ListCommand),

    /// Show a single customer
    Show(ShowCommand),

    /// Add a customer
    Add(AddCommand),

    /// Change fields of an existing customer
    Update(UpdateCommand),

    /// Delete a customer
    Delete(DeleteCommand),

    /// Replace all customers with the seed data
    Reset(ResetCommand),

    /// Print the stored customer list as JSON
    Export,

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Debug,
            }
        }
    }
}
