//! # kindstore Executor
//!
//! The command surface of the kindstore datastore. Transports deserialize a
//! [`Command`], hand it to an [`Executor`] and serialize the resulting
//! [`Output`] or [`Error`].
//!
//! ## Quick Start
//!
//! ```text
//! use kindstore_executor::{Command, Executor, Output};
//!
//! let executor = Executor::in_memory(AdapterConfig::default());
//! let keys = executor.execute(Command::Put { entities })?;
//! ```
//!
//! ## Commands
//!
//! | Category | Commands |
//! |----------|----------|
//! | Entity | Put, Get, Delete |
//! | Query | RunQuery, Next, Count, QueryHistory |
//! | Transaction | BeginTransaction, Commit, Rollback (no-ops) |
//! | Index | CreateIndex, GetIndices, UpdateIndex, DeleteIndex |

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
mod handlers;
mod output;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
