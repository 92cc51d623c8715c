//! Form session layer: the explicit update-snapshot entry point.
//!
//! Every field mutation goes through [`Tracker::update`], which persists the
//! new preferences and returns the recomputed live estimate synchronously.
//! The estimate itself is only persisted on an explicit [`Tracker::capture`].

use crate::{estimator, Error, Field, KeyValueStore, Record, RecordBook, Result, Sex, Snapshot};

/// A stateful form session over a record book.
///
/// Holds the working snapshot (pre-populated from preferences) and routes
/// all mutations and captures through the record book.
#[derive(Debug)]
pub struct Tracker<S: KeyValueStore> {
    book: RecordBook<S>,
    snapshot: Snapshot,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Open a session, pre-populating the working snapshot from preferences
    pub fn open(store: S) -> Self {
        let book = RecordBook::open(store);
        let snapshot = book.preferences();
        Self { book, snapshot }
    }

    /// The current working snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Mutate one measurement field.
    ///
    /// Persists the new preferences and returns the recomputed live
    /// estimate (`None` when the formula is undefined for the new values).
    /// On a preferences persistence failure the error is returned but the
    /// in-memory snapshot keeps the new value.
    pub fn update(&mut self, field: Field, value: f64) -> Result<Option<f64>> {
        self.snapshot.set(field, value);
        self.book.save_preferences(&self.snapshot)?;
        Ok(self.live_estimate())
    }

    /// Change the sex selection, with the same contract as [`Self::update`]
    pub fn set_sex(&mut self, sex: Sex) -> Result<Option<f64>> {
        self.snapshot.sex = sex;
        self.book.save_preferences(&self.snapshot)?;
        Ok(self.live_estimate())
    }

    /// Current estimate for the working snapshot, without any mutation
    pub fn live_estimate(&self) -> Option<f64> {
        estimator::estimate(&self.snapshot).ok()
    }

    /// Capture the working snapshot as today's record.
    ///
    /// Evaluates the estimator and upserts the result into the record book;
    /// an undefined estimate is an error and nothing is recorded.
    pub fn capture(&mut self) -> Result<Record> {
        let body_fat = estimator::estimate(&self.snapshot)?;
        let history = self.book.upsert(&self.snapshot, body_fat)?;
        history
            .last()
            .cloned()
            .ok_or_else(|| Error::Store("history empty after upsert".into()))
    }

    /// History in insertion order
    pub fn history(&self) -> &[Record] {
        self.book.history()
    }

    /// History sorted by date, for display
    pub fn sorted_history(&self) -> Vec<Record> {
        self.book.sorted_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, MemoryStore};

    #[test]
    fn test_update_returns_live_estimate() {
        let mut tracker = Tracker::open(MemoryStore::new());

        let estimate = tracker.update(Field::Waist, 85.0).unwrap();
        assert!(estimate.is_some());

        let expected = estimator::estimate(tracker.snapshot()).unwrap();
        assert_eq!(estimate, Some(expected));
    }

    #[test]
    fn test_update_to_undefined_inputs_yields_none() {
        let mut tracker = Tracker::open(MemoryStore::new());

        // neck == waist makes the male formula undefined
        let estimate = tracker.update(Field::Neck, 80.0).unwrap();
        assert_eq!(estimate, None);
        assert_eq!(tracker.snapshot().neck, 80.0);
    }

    #[test]
    fn test_sex_change_switches_formula() {
        let mut tracker = Tracker::open(MemoryStore::new());

        let male = tracker.live_estimate().unwrap();
        let female = tracker.set_sex(Sex::Female).unwrap().unwrap();
        assert_ne!(male, female);
    }

    #[test]
    fn test_capture_records_today() {
        let mut tracker = Tracker::open(MemoryStore::new());

        let record = tracker.capture().unwrap();
        assert_eq!(record.date, chrono::Local::now().date_naive());
        assert_eq!(record.body_fat, tracker.live_estimate().unwrap());
        assert_eq!(tracker.history().len(), 1);

        // A second capture on the same day replaces, not appends
        tracker.update(Field::Waist, 82.0).unwrap();
        tracker.capture().unwrap();
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.history()[0].waist, 82.0);
    }

    #[test]
    fn test_capture_with_undefined_estimate_records_nothing() {
        let mut tracker = Tracker::open(MemoryStore::new());
        tracker.update(Field::Neck, 90.0).unwrap();

        assert!(matches!(
            tracker.capture(),
            Err(Error::UndefinedEstimate(_))
        ));
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_preferences_survive_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();

        {
            let store = FileStore::open(temp_dir.path()).unwrap();
            let mut tracker = Tracker::open(store);
            tracker.update(Field::Height, 182.0).unwrap();
            tracker.set_sex(Sex::Female).unwrap();
        }

        let store = FileStore::open(temp_dir.path()).unwrap();
        let tracker = Tracker::open(store);
        assert_eq!(tracker.snapshot().height, 182.0);
        assert_eq!(tracker.snapshot().sex, Sex::Female);
    }
}
