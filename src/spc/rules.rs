//! Runs rule for detecting a sustained shift away from the center line.
//!
//! A run is a sequence of consecutive points strictly on one side of the
//! center line. When a run reaches the configured length (6 by default), its
//! most recent members are flagged as special-cause variation.
//!
//! A single signed counter tracks the current run: positive while above the
//! center line, negative while below. A point on the opposite side starts a
//! new run of length one. A point exactly on the center line leaves the
//! counter untouched and never becomes a run member itself.
//!
//! # References
//!
//! - Provost, L.P. & Murray, S.K. (2011). *The Health Care Data Guide*, run
//!   chart rule 1 ("shift").
//! - Perla, R.J., Provost, L.P. & Murray, S.K. (2011). "The run chart: a simple
//!   analytical tool for learning from variation in healthcare processes",
//!   *BMJ Quality & Safety* 20(1), pp. 46-51.

use tracing::trace;

use super::chart::PointClass;

/// Classify `values` (in chronological order) against `center`.
///
/// Returns one class per value. `run_length` must be at least 2, the same
/// bound [`AnalyzerConfig::validate`](crate::AnalyzerConfig::validate) enforces.
pub fn classify_runs(values: &[f64], center: f64, run_length: usize) -> Vec<PointClass> {
    debug_assert!(run_length >= 2, "run_length must be >= 2");
    let mut classes = vec![PointClass::Common; values.len()];
    let mut counter: i64 = 0;
    // Indices of the points in the current run.
    let mut members: Vec<usize> = Vec::new();

    for (i, &v) in values.iter().enumerate() {
        if v > center {
            if counter < 0 {
                counter = 0;
                members.clear();
            }
            counter += 1;
            members.push(i);
        } else if v < center {
            if counter > 0 {
                counter = 0;
                members.clear();
            }
            counter -= 1;
            members.push(i);
        } else {
            continue;
        }

        if counter.unsigned_abs() as usize >= run_length {
            let class = if counter > 0 {
                PointClass::SpecialCauseHigh
            } else {
                PointClass::SpecialCauseLow
            };
            trace!(index = i, run = counter, ?class, "run threshold reached");
            for &idx in &members[members.len() - run_length..] {
                mark(&mut classes[idx], class);
            }
        }
    }

    classes
}

/// Apply `class` to a point; a high classification is never downgraded.
fn mark(slot: &mut PointClass, class: PointClass) {
    if *slot != PointClass::SpecialCauseHigh {
        *slot = class;
    }
}
