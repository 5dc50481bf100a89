//! `custbook` - CLI for the customer store
//!
//! This binary is the presentation layer over [`custbook::CustomerStore`]:
//! each invocation opens the store, runs one operation and prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use custbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, OutputFormat, ShowCommand, StatusCommand,
    UpdateCommand,
};
use custbook::seed::resolve_seed;
use custbook::{
    init_logging, Config, Customer, CustomerFields, CustomerStore, Error, SlotStore, SqliteSlots,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn error_message(err: &dyn std::error::Error) -> String {
    format!("error: {err}")
}

fn run(cli: Cli) -> CliResult {
    // `config` subcommands must keep working when the configuration is broken.
    let config_path = cli.config;
    let load = || Config::load_from(config_path.clone());

    match cli.command {
        Command::List(cmd) => handle_list(&load()?, cmd.format),
        Command::Show(cmd) => handle_show(&load()?, &cmd),
        Command::Add(cmd) => handle_add(&load()?, cmd),
        Command::Update(cmd) => handle_update(&load()?, cmd),
        Command::Delete(cmd) => {
            let mut store = open_store(&load()?)?;
            match store.delete(&cmd.id)? {
                Some(removed) => println!("Deleted customer {} ({})", removed.id, removed.name),
                None => println!("No customer with id {}; nothing deleted.", cmd.id),
            }
            Ok(())
        }
        Command::Reset(cmd) => {
            if !cmd.yes {
                println!("This will replace all customers with the seed data.");
                println!("Use --yes to confirm.");
                return Ok(());
            }
            let mut store = open_store(&load()?)?;
            store.reset()?;
            println!("Reset to {} seed customers.", store.len());
            Ok(())
        }
        Command::Export => {
            let store = open_store(&load()?)?;
            let raw = store
                .slots()
                .read(store.key())?
                .unwrap_or_else(|| "[]".to_string());
            println!("{raw}");
            Ok(())
        }
        Command::Status(cmd) => handle_status(&load()?, &cmd),
        Command::Config(cmd) => handle_config(config_path.clone(), cmd),
    }
}

fn open_store(config: &Config) -> Result<CustomerStore<SqliteSlots>, Error> {
    let slots = SqliteSlots::open(config.database_path())?;
    let seed = resolve_seed(config.seed.file.as_deref())?;
    CustomerStore::open(slots, config.storage.slot_key.clone(), seed)
}

fn handle_list(config: &Config, format: OutputFormat) -> CliResult {
    let store = open_store(config)?;
    let customers = store.customers();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(customers)?),
        OutputFormat::Plain => {
            for c in customers {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    c.id, c.name, c.email, c.address, c.phone, c.country
                );
            }
        }
        OutputFormat::Table => print_table(customers),
    }
    Ok(())
}

fn print_table(customers: &[Customer]) {
    const HEADERS: [&str; 6] = ["ID", "NAME", "EMAIL", "PHONE", "COUNTRY", "ADDRESS"];

    let rows: Vec<[String; 6]> = customers
        .iter()
        .map(|c| {
            [
                c.id.to_string(),
                c.name.clone(),
                c.email.clone(),
                c.phone.clone(),
                c.country.clone(),
                c.address.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", render_row(&HEADERS, &widths));
    for row in &rows {
        println!("{}", render_row(row, &widths));
    }
    if rows.is_empty() {
        println!("(no customers)");
    }
}

fn render_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> CliResult {
    let store = open_store(config)?;
    let customer = store
        .lookup(&cmd.id)
        .ok_or_else(|| Error::CustomerNotFound(cmd.id.clone()))?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(customer)?);
    } else {
        println!("Id:       {}", customer.id);
        println!("Name:     {}", customer.name);
        println!("Email:    {}", customer.email);
        println!("Address:  {}", customer.address);
        println!("Phone:    {}", customer.phone);
        println!("Country:  {}", customer.country);
    }
    Ok(())
}

fn handle_add(config: &Config, cmd: AddCommand) -> CliResult {
    let mut store = open_store(config)?;
    if store.lookup(&cmd.id).is_some() {
        warn!(
            "A customer with id {} already exists; lookups will see the new one first",
            cmd.id
        );
    }

    let customer = Customer::new(cmd.id, cmd.fields.merge_into(CustomerFields::default()));
    let id = customer.id.clone();
    store.create(customer)?;
    println!("Created customer {id}");
    Ok(())
}

fn handle_update(config: &Config, cmd: UpdateCommand) -> CliResult {
    let mut store = open_store(config)?;
    if cmd.fields.is_empty() {
        println!("No fields given; nothing to update.");
        return Ok(());
    }

    let current = store
        .lookup(&cmd.id)
        .map(Customer::fields)
        .ok_or_else(|| Error::CustomerNotFound(cmd.id.clone()))?;

    store.update(&cmd.id, cmd.fields.merge_into(current))?;
    println!("Updated customer {}", cmd.id);
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> CliResult {
    let store = open_store(config)?;
    let stats = store.slots().stats()?;
    let last_write = store.slots().last_written(store.key())?;

    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "slot_key": store.key(),
            "customers": store.len(),
            "last_write": last_write.map(|t| t.to_rfc3339()),
            "database_slots": stats.total_slots,
            "database_last_write": stats.last_write.map(|t| t.to_rfc3339()),
            "database_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("custbook status");
        println!("---------------");
        println!("Database:      {}", config.database_path().display());
        println!("Slot key:      {}", store.key());
        println!("Customers:     {}", store.len());
        println!(
            "Last write:    {}",
            last_write.map_or_else(|| "never".to_string(), |t| t.to_rfc3339())
        );
        println!("Slots in db:   {}", stats.total_slots);
        println!(
            "Db last write: {}",
            stats
                .last_write
                .map_or_else(|| "never".to_string(), |t| t.to_rfc3339())
        );
        println!("Size (bytes):  {}", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Slot key:       {}", config.storage.slot_key);
                println!();
                println!("[Seed]");
                match &config.seed.file {
                    Some(file) => println!("  File:           {}", file.display()),
                    None => println!("  File:           (built-in)"),
                }
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
