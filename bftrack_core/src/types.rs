//! Core domain types for the bftrack body-composition tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Biological sex selection for the estimation formula
//! - Measurement snapshots as entered at one point in time
//! - Daily records (snapshot plus derived estimate, keyed by calendar date)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Measurement Types
// ============================================================================

/// Biological sex selection, which picks the estimation formula branch
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Stored string form (the `gender` key value)
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Parse a stored string, `None` on anything unrecognised
    pub fn parse(s: &str) -> Option<Sex> {
        match s.trim().to_lowercase().as_str() {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// One measurement field of a snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Height,
    Neck,
    Waist,
    Hip,
}

impl Field {
    /// Persisted key for this field
    pub fn key(&self) -> &'static str {
        match self {
            Field::Height => "height",
            Field::Neck => "neck",
            Field::Waist => "waist",
            Field::Hip => "hip",
        }
    }
}

/// A single set of measurements plus sex selection, as entered at one
/// point in time. All circumferences and the height are in centimetres.
///
/// `hip` is semantically meaningful only when `sex` is `Female`; the male
/// formula ignores it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub height: f64,
    pub neck: f64,
    pub waist: f64,
    pub hip: f64,
    pub sex: Sex,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            height: 170.0,
            neck: 38.0,
            waist: 80.0,
            hip: 100.0,
            sex: Sex::Male,
        }
    }
}

impl Snapshot {
    /// Read one measurement field
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Height => self.height,
            Field::Neck => self.neck,
            Field::Waist => self.waist,
            Field::Hip => self.hip,
        }
    }

    /// Overwrite one measurement field
    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::Height => self.height = value,
            Field::Neck => self.neck = value,
            Field::Waist => self.waist = value,
            Field::Hip => self.hip = value,
        }
    }
}

// ============================================================================
// Record Types
// ============================================================================

/// A persisted daily record: the measurements at capture time plus the
/// estimate derived from them, keyed by calendar date.
///
/// `body_fat` is the estimator output at capture time, stored verbatim and
/// never recomputed from the measurements afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub height: f64,
    pub neck: f64,
    pub waist: f64,
    pub hip: f64,
    #[serde(rename = "bodyFat")]
    pub body_fat: f64,
}

impl Record {
    /// Build a record for `date` from the current measurements and estimate
    pub fn new(date: NaiveDate, snapshot: &Snapshot, body_fat: f64) -> Self {
        Self {
            date,
            height: snapshot.height,
            neck: snapshot.neck,
            waist: snapshot.waist,
            hip: snapshot.hip,
            body_fat,
        }
    }
}
