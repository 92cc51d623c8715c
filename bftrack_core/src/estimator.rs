//! Body-fat estimation via the U.S. Navy circumference method.
//!
//! The estimator is a pure function over a [`Snapshot`]: no state, no I/O,
//! safe to call on every field change for a live preview.

use crate::{Error, Result, Sex, Snapshot};

/// Estimate body-fat percentage from a measurement snapshot.
///
/// Branches on `sex`:
/// - male: `86.010 * log10(waist - neck) - 70.041 * log10(height) + 30.30`
/// - female: `163.205 * log10(waist + hip - neck) - 97.684 * log10(height) - 104.912`
///
/// The result is rounded to two decimal places; the rounded value is both
/// the display value and the stored value. No plausibility clamping is
/// applied, so results outside `[0, 100]` pass through unmodified.
///
/// Returns [`Error::UndefinedEstimate`] when a logarithm argument is not
/// strictly positive (`height <= 0`, or the circumference term `<= 0`).
pub fn estimate(snapshot: &Snapshot) -> Result<f64> {
    if snapshot.height <= 0.0 {
        return Err(Error::UndefinedEstimate(format!(
            "height must be positive, got {}",
            snapshot.height
        )));
    }

    let percent = match snapshot.sex {
        Sex::Male => {
            let girth = snapshot.waist - snapshot.neck;
            if girth <= 0.0 {
                return Err(Error::UndefinedEstimate(format!(
                    "waist - neck must be positive, got {girth}"
                )));
            }
            86.010 * girth.log10() - 70.041 * snapshot.height.log10() + 30.30
        }
        Sex::Female => {
            let girth = snapshot.waist + snapshot.hip - snapshot.neck;
            if girth <= 0.0 {
                return Err(Error::UndefinedEstimate(format!(
                    "waist + hip - neck must be positive, got {girth}"
                )));
            }
            163.205 * girth.log10() - 97.684 * snapshot.height.log10() - 104.912
        }
    };

    Ok(round2(percent))
}

/// Round to the two-decimal display/storage convention
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
