//! Position Simulator
//!
//! Stand-in for the device GPS feed: each tick every tourist drifts by a
//! small uniform delta, then has their status re-derived against the
//! high-risk zones. `alert` is sticky and never touched here.

use crate::store::TrackingStore;
use crate::tourist::{EpochTime, TouristStatus};
use geo_zones::{GeoPoint, ZoneRegistry};
use rand::Rng;

/// Max drift per axis per tick, degrees
pub const POSITION_DRIFT_DEG: f64 = 0.001;

#[derive(Debug, Clone, Copy)]
pub struct PositionSimulator {
    pub drift_deg: f64,
}

impl PositionSimulator {
    pub fn new() -> Self {
        Self {
            drift_deg: POSITION_DRIFT_DEG,
        }
    }

    /// Advance every tourist by one tick: perturb position, stamp time,
    /// append history, re-derive non-alert status.
    ///
    /// With predictive warnings disabled the geofence evaluator is skipped
    /// entirely and every non-alert tourist resolves to `safe`.
    pub fn advance<R: Rng>(
        &self,
        store: &mut TrackingStore,
        zones: &ZoneRegistry,
        predictive_warnings: bool,
        rng: &mut R,
        now: EpochTime,
    ) {
        for tourist in store.iter_mut() {
            let next = GeoPoint::new(
                tourist.location.lat + (rng.gen::<f64>() - 0.5) * (self.drift_deg * 2.0),
                tourist.location.lng + (rng.gen::<f64>() - 0.5) * (self.drift_deg * 2.0),
            );
            tourist.move_to(next, now);

            if tourist.status == TouristStatus::Alert {
                continue;
            }
            tourist.status = if !predictive_warnings {
                TouristStatus::Safe
            } else if zones.containing_high_risk(next).is_some() {
                TouristStatus::Warning
            } else {
                TouristStatus::Safe
            };
        }
    }
}

impl Default for PositionSimulator {
    fn default() -> Self {
        Self::new()
    }
}
