//! Last-used measurement preferences.
//!
//! Preferences pre-populate the form on the next session. They live under
//! individual keys (`height`, `neck`, `waist`, `hip`, `gender`) and are
//! rewritten on every field change, independently of the record history.

use crate::{Field, KeyValueStore, Result, Sex, Snapshot};

pub(crate) const KEY_GENDER: &str = "gender";

const FIELDS: [Field; 4] = [Field::Height, Field::Neck, Field::Waist, Field::Hip];

/// Load the last-used snapshot.
///
/// Each field falls back to its default independently when its key is
/// missing or unparsable (height 170, neck 38, waist 80, hip 100, male).
/// Never an error to the caller.
pub fn load(store: &impl KeyValueStore) -> Snapshot {
    let defaults = Snapshot::default();

    let sex = match read_key(store, KEY_GENDER) {
        Some(value) => Sex::parse(&value).unwrap_or_else(|| {
            tracing::warn!("Unrecognised gender value {:?}, using default", value);
            defaults.sex
        }),
        None => defaults.sex,
    };

    let mut snapshot = Snapshot { sex, ..defaults };
    for field in FIELDS {
        snapshot.set(field, numeric_field(store, field, defaults.get(field)));
    }
    snapshot
}

/// Persist the current snapshot as the new preferences.
///
/// Each field is written to its own key; the keys are independent, so a
/// failure partway through can leave earlier keys updated.
pub fn save(store: &mut impl KeyValueStore, snapshot: &Snapshot) -> Result<()> {
    store.set(KEY_GENDER, snapshot.sex.as_str())?;
    for field in FIELDS {
        store.set(field.key(), &snapshot.get(field).to_string())?;
    }

    tracing::debug!("Saved measurement preferences");
    Ok(())
}

fn read_key(store: &impl KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to read key {:?}: {}. Using default.", key, e);
            None
        }
    }
}

fn numeric_field(store: &impl KeyValueStore, field: Field, default: f64) -> f64 {
    match read_key(store, field.key()) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Unparsable value {:?} for key {:?}, using default",
                value,
                field.key()
            );
            default
        }),
        None => default,
    }
}
