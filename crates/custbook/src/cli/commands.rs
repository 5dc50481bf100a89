//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::customer::{CustomerFields, CustomerId};

/// Parse an id argument; `CustomerId`'s `From<String>` would always yield a text id.
fn parse_customer_id(raw: &str) -> Result<CustomerId, Infallible> {
    raw.parse()
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Customer id (integers are numeric ids, anything else is a text id)
    #[arg(allow_negative_numbers = true, value_parser = parse_customer_id)]
    pub id: CustomerId,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Id of the new customer; must not already exist
    #[arg(long, allow_negative_numbers = true, value_parser = parse_customer_id)]
    pub id: CustomerId,

    /// Customer fields (unset fields are left empty)
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Id of the customer to update
    #[arg(allow_negative_numbers = true, value_parser = parse_customer_id)]
    pub id: CustomerId,

    /// Fields to change (unset fields keep their current value)
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the customer to delete
    #[arg(allow_negative_numbers = true, value_parser = parse_customer_id)]
    pub id: CustomerId,
}

/// Reset command arguments.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Mutable customer fields as optional flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Customer name
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Country
    #[arg(long)]
    pub country: Option<String>,
}

impl FieldArgs {
    /// Whether no field flag was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.country.is_none()
    }

    /// Overlay the given flags on `base`.
    #[must_use]
    pub fn merge_into(self, base: CustomerFields) -> CustomerFields {
        CustomerFields {
            name: self.name.unwrap_or(base.name),
            email: self.email.unwrap_or(base.email),
            address: self.address.unwrap_or(base.address),
            phone: self.phone.unwrap_or(base.phone),
            country: self.country.unwrap_or(base.country),
        }
    }
}

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
