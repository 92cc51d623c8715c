//! Daily record book with one-record-per-date upsert semantics.
//!
//! The record book is the sole owner of the persisted history and of the
//! measurement preferences for the lifetime of the installation. History is
//! held in memory for the session and written back wholesale on every
//! capture; the in-memory copy stays authoritative even when a persist
//! attempt fails.

use crate::{prefs, KeyValueStore, Record, Result, Snapshot};
use chrono::NaiveDate;

pub(crate) const KEY_RECORDS: &str = "records";

/// Owner of the record history and preferences, backed by a key-value store
#[derive(Debug)]
pub struct RecordBook<S: KeyValueStore> {
    store: S,
    history: Vec<Record>,
}

impl<S: KeyValueStore> RecordBook<S> {
    /// Open the record book, loading any persisted history.
    ///
    /// Missing or malformed persisted history yields an empty history; no
    /// recovery of individual corrupt entries is attempted.
    pub fn open(store: S) -> Self {
        let history = load_history(&store);
        Self { store, history }
    }

    /// Record today's measurements, replacing any record already captured
    /// today. The date comes from the local wall clock.
    pub fn upsert(&mut self, snapshot: &Snapshot, body_fat: f64) -> Result<&[Record]> {
        self.upsert_dated(chrono::Local::now().date_naive(), snapshot, body_fat)
    }

    /// Record measurements for an explicit date.
    ///
    /// Removes any existing record with the same date, appends the new one,
    /// then persists the whole history. The in-memory history is updated
    /// before the persist attempt, so on persistence failure the caller
    /// still sees the new record for the rest of the session.
    pub fn upsert_dated(
        &mut self,
        date: NaiveDate,
        snapshot: &Snapshot,
        body_fat: f64,
    ) -> Result<&[Record]> {
        self.history.retain(|record| record.date != date);
        self.history.push(Record::new(date, snapshot, body_fat));

        let serialized = serde_json::to_string(&self.history)?;
        self.store.set(KEY_RECORDS, &serialized)?;

        tracing::info!("Recorded {:.2}% body fat for {}", body_fat, date);
        Ok(&self.history)
    }

    /// History in insertion order
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    /// History sorted by date, for charting and tabular display.
    ///
    /// Internal order is insertion order, so a re-captured past date sits at
    /// the end; display always goes through this sorted view.
    pub fn sorted_history(&self) -> Vec<Record> {
        let mut sorted = self.history.clone();
        sorted.sort_by_key(|record| record.date);
        sorted
    }

    /// Last-used measurement preferences (defaults when absent)
    pub fn preferences(&self) -> Snapshot {
        prefs::load(&self.store)
    }

    /// Persist the current field values as preferences
    pub fn save_preferences(&mut self, snapshot: &Snapshot) -> Result<()> {
        prefs::save(&mut self.store, snapshot)
    }
}

/// Deserialize the persisted history, treating anything unreadable as empty
fn load_history(store: &impl KeyValueStore) -> Vec<Record> {
    let raw = match store.get(KEY_RECORDS) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read record history: {}. Starting empty.", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Record>>(&raw) {
        Ok(history) => {
            tracing::debug!("Loaded {} records", history.len());
            history
        }
        Err(e) => {
            tracing::warn!("Malformed record history: {}. Starting empty.", e);
            Vec::new()
        }
    }
}
