// src/db/mod.rs

//! Database layer for the cookbook
//!
//! All state lives in a single SQLite file. Every connection handed out by
//! [`open`] has foreign key enforcement switched on, which is what makes the
//! `ingredients -> recipes` cascade work.

mod migrations;
pub mod models;
pub mod paths;
pub mod schema;

use crate::error::{Error, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// How long a connection waits on SQLite's write lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create (if needed) and migrate the database at `db_path`
pub fn init(db_path: impl AsRef<Path>) -> Result<()> {
    let db_path = db_path.as_ref();
    info!("Initializing database at {}", db_path.display());

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::InitError(format!(
                "Failed to create database directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let conn = open(db_path)?;
    schema::migrate(&conn)?;
    Ok(())
}

/// Open a connection to an existing database
pub fn open(db_path: impl AsRef<Path>) -> Result<Connection> {
    let db_path = db_path.as_ref();
    debug!("Opening database {}", db_path.display());

    let conn = Connection::open(db_path).map_err(|e| {
        Error::IoError(format!(
            "Failed to open database {}: {}",
            db_path.display(),
            e
        ))
    })?;
    configure(&conn)?;
    Ok(conn)
}

/// Open a private in-memory database with the schema applied
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

/// Run `f` inside an immediate transaction
///
/// The transaction is committed only if `f` returns `Ok`. On an error (or a
/// panic) the transaction is dropped, which rolls it back. Immediate mode
/// takes the write lock up front so concurrent writers queue behind each
/// other instead of interleaving.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = f(&tx)?;
    tx.commit()?;
    Ok(value)
}
