//! `custbook` - A customer record manager backed by a durable key-value slot
//!
//! This library provides the customer store, its persistence backends and the
//! ambient configuration, error and logging layers used by the `custbook` CLI.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod customer;
pub mod error;
pub mod logging;
pub mod seed;
pub mod storage;
pub mod store;

pub use config::Config;
pub use customer::{Customer, CustomerFields, CustomerId};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{MemorySlots, SlotStore, SqliteSlots, StorageStats};
pub use store::CustomerStore;
