//! SQLite-backed annotation store.
//!
//! The store holds an already materialized splice graph in the `location`,
//! `edge` and `transcripts` tables, with transcript names kept in
//! `transcript_annotations`. Reading it yields an [`AnnotationGraph`] of the
//! same shape as one built from a GTF file, so either source can be used
//! downstream.
//!
//! Writes go through a single [`AnnotationStore`] handle (`&mut self`) and
//! happen inside one transaction per call.
//!
//! [`AnnotationGraph`]: crate::data_structs::graph::AnnotationGraph

mod read;
pub(crate) mod schema;
mod write;

use std::path::Path;

use log::debug;
use rusqlite::{
    Connection,
    OpenFlags,
};

use crate::error::{
    Result,
    SjError,
};

#[derive(Debug)]
pub struct AnnotationStore {
    conn: Connection,
}

impl AnnotationStore {
    /// Opens an existing store. Fails if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            SjError::Storage {
                message: format!("cannot open store {}: {}", path.display(), e),
                source:  Some(e),
            }
        })?;
        debug!("Opened annotation store {}", path.display());
        Ok(Self { conn })
    }

    /// Creates (or opens) a store file and makes sure all tables exist.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA)?;
        Ok(())
    }
}
