//! Per-object fan-out for table and sky-plot refreshes.
//!
//! Every row is independent: a failure is logged and kept in that row's
//! slot, the rest of the batch is unaffected. With the `parallel` feature the
//! rows are evaluated on the rayon pool; output order always matches input
//! order.

use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::AstroResult;
use crate::models::{EquatorialPosition, ObserverFrame, Visibility};

use super::visibility::VisibilityEngine;

/// Evaluate visibility for every target against the same frame.
///
/// # Arguments
/// * `engine` - Horizon model
/// * `frame` - Observer site and reference instant shared by all rows
/// * `targets` - Catalog positions, `None` where coordinates are unknown
///
/// # Returns
/// One result per target, in input order.
pub fn compute_batch(
    engine: &VisibilityEngine,
    frame: &ObserverFrame,
    targets: &[Option<EquatorialPosition>],
) -> Vec<AstroResult<Visibility>> {
    let evaluate = |(index, target): (usize, &Option<EquatorialPosition>)| {
        let result = engine.compute_for(frame, target.as_ref());
        if let Err(e) = &result {
            warn!("visibility for row {index} failed ({}): {e}", e.kind());
        }
        result
    };

    #[cfg(feature = "parallel")]
    let results: Vec<_> = targets.par_iter().enumerate().map(evaluate).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = targets.iter().enumerate().map(evaluate).collect();

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeodeticLocation, TimeInstant};
    use crate::time::TimeCorrections;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_batch_keeps_order_and_unavailable_rows() {
        let frame = ObserverFrame::new(
            GeodeticLocation::at_default_elevation(50.7374, 7.0982).unwrap(),
            TimeInstant::new(
                Utc.with_ymd_and_hms(2024, 11, 2, 20, 0, 0).unwrap(),
                TimeCorrections::default(),
            ),
        );
        let engine = VisibilityEngine::default();
        let targets: Vec<Option<EquatorialPosition>> = vec![
            EquatorialPosition::new(0.712, 41.269).ok(),
            None,
            EquatorialPosition::new(5.588, -5.391).ok(),
        ];

        let rows = compute_batch(&engine, &frame, &targets);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], Ok(Visibility::Unavailable));

        for (row, target) in rows.iter().zip(&targets) {
            if let Some(target) = target {
                let expected = engine.compute_visibility(&frame, target).unwrap();
                assert_eq!(row.as_ref().unwrap(), &Visibility::Available(expected));
            }
        }
    }

    #[test]
    fn test_empty_batch() {
        let frame = ObserverFrame::new(
            GeodeticLocation::at_default_elevation(0.0, 0.0).unwrap(),
            TimeInstant::now(TimeCorrections::default()),
        );
        assert!(compute_batch(&VisibilityEngine::default(), &frame, &[]).is_empty());
    }
}
