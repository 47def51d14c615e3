use anyhow::Result;
use log::{info, warn};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::JsonConnection;
use crate::domain::models::entry::WritingEntry as DomainEntry;
use crate::storage::traits::EntryStorage;

/// JSON-slot entry repository. The slot holds one ordered array of entry
/// records; every save rewrites it in full.
#[derive(Clone)]
pub struct EntryRepository {
    connection: JsonConnection,
}

impl EntryRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl EntryStorage for EntryRepository {
    fn load_entries(&self) -> Result<Vec<DomainEntry>> {
        let file_path = self.connection.entries_file_path();

        if !file_path.exists() {
            info!("No entries slot at {}, starting empty", file_path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);

        // Malformed slot data is recovered locally: reset to an empty
        // collection and log, never surface the failure to the caller.
        match serde_json::from_reader::<_, Vec<DomainEntry>>(reader) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Failed to parse entries slot {}: {}. Starting with an empty collection",
                    file_path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_entries(&self, entries: &[DomainEntry]) -> Result<()> {
        let file_path = self.connection.entries_file_path();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, entries)?;
        Ok(())
    }
}
