//! Alert Log and Alert Generator
//!
//! Alerts are immutable once created and reference tourists by uid only.
//! The log is most-recent-first and bounded; the generator fires
//! probabilistically on the tick cadence and applies the sticky `alert`
//! status override after the simulator's zone pass.

use crate::store::TrackingStore;
use crate::tourist::{EpochTime, TouristStatus};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::info;

/// Alert log cap; overflow evicts the oldest entry
pub const ALERT_LOG_CAP: usize = 50;

/// Per-tick probability of raising a new alert
pub const ALERT_PROBABILITY: f64 = 0.1;

/// Detail string attached to simulated alerts
pub const ALERT_DETAILS: &str =
    "Potential fall detected after 15 minutes of inactivity in a high-risk zone.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "SOS")]
    Sos,
    GeoFence,
    Inactivity,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sos => "SOS",
            Self::GeoFence => "GeoFence",
            Self::Inactivity => "Inactivity",
        }
    }

    fn sample<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => Self::Sos,
            1 => Self::GeoFence,
            _ => Self::Inactivity,
        }
    }
}

/// Immutable alert record; `uid` is a weak reference into the tracking store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub uid: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub timestamp: EpochTime,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Bounded, most-recent-first alert collection
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: VecDeque<Alert>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self {
            alerts: VecDeque::with_capacity(ALERT_LOG_CAP),
        }
    }

    /// Prepend an alert, evicting the oldest past the cap
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push_front(alert);
        self.alerts.truncate(ALERT_LOG_CAP);
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// Most-recent-first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Projection for the alert panel's sortable time column
    pub fn sorted_by_time(&self, order: SortOrder) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self.alerts.iter().cloned().collect();
        alerts.sort_by_key(|a| a.timestamp);
        if order == SortOrder::Desc {
            alerts.reverse();
        }
        alerts
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlertGenerator {
    pub probability: f64,
}

impl AlertGenerator {
    pub fn new() -> Self {
        Self {
            probability: ALERT_PROBABILITY,
        }
    }

    /// Roll the per-tick probability; on success raise one alert.
    pub fn maybe_fire<R: Rng>(
        &self,
        store: &mut TrackingStore,
        log: &mut AlertLog,
        rng: &mut R,
        now: EpochTime,
    ) -> Option<Alert> {
        if rng.gen::<f64>() >= self.probability {
            return None;
        }
        self.fire(store, log, rng, now)
    }

    /// Raise an alert for one uniformly chosen tourist not already on
    /// alert, set the sticky `alert` status, and prepend to the log.
    /// No-op when every tourist is already on alert.
    pub fn fire<R: Rng>(
        &self,
        store: &mut TrackingStore,
        log: &mut AlertLog,
        rng: &mut R,
        now: EpochTime,
    ) -> Option<Alert> {
        let candidates: Vec<String> = store
            .iter()
            .filter(|t| t.status != TouristStatus::Alert)
            .map(|t| t.uid.clone())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let uid = candidates[rng.gen_range(0..candidates.len())].clone();
        let alert = Alert {
            id: format!("alert-{}", now.as_millis()),
            uid: uid.clone(),
            alert_type: AlertType::sample(rng),
            timestamp: now,
            details: ALERT_DETAILS.to_string(),
        };

        if let Some(tourist) = store.get_mut(&uid) {
            tourist.status = TouristStatus::Alert;
        }
        info!(alert_id = %alert.id, %uid, alert_type = alert.alert_type.as_str(), "alert raised");
        log.push(alert.clone());

        Some(alert)
    }
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn alert_at(seconds: i64) -> Alert {
        Alert {
            id: format!("alert-{}", seconds * 1_000),
            uid: "tourist-id-0".to_string(),
            alert_type: AlertType::Sos,
            timestamp: EpochTime::from_seconds(seconds),
            details: ALERT_DETAILS.to_string(),
        }
    }

    #[test]
    fn log_capped_with_newest_at_front() {
        let mut log = AlertLog::new();
        for s in 0..80 {
            log.push(alert_at(s));
            assert!(log.len() <= ALERT_LOG_CAP);
            assert_eq!(log.latest().unwrap().timestamp.seconds, s);
        }

        assert_eq!(log.len(), ALERT_LOG_CAP);
        // Oldest 30 evicted; survivors are 30..=79, newest first
        assert_eq!(log.iter().next().unwrap().timestamp.seconds, 79);
        assert_eq!(log.iter().last().unwrap().timestamp.seconds, 30);
    }

    #[test]
    fn sorted_projection_both_directions() {
        let mut log = AlertLog::new();
        for s in [5, 1, 9, 3] {
            log.push(alert_at(s));
        }

        let asc: Vec<i64> = log
            .sorted_by_time(SortOrder::Asc)
            .iter()
            .map(|a| a.timestamp.seconds)
            .collect();
        assert_eq!(asc, vec![1, 3, 5, 9]);

        let desc: Vec<i64> = log
            .sorted_by_time(SortOrder::Desc)
            .iter()
            .map(|a| a.timestamp.seconds)
            .collect();
        assert_eq!(desc, vec![9, 5, 3, 1]);
    }

    #[test]
    fn fire_marks_tourist_and_skips_existing_alerts() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut store =
            TrackingStore::seed_himalayan(3, &mut rng, EpochTime::from_seconds(0));
        let mut log = AlertLog::new();
        let generator = AlertGenerator::new();

        // Exhaust the roster: every fire must pick a non-alert tourist
        for s in 1..=3 {
            let alert = generator
                .fire(&mut store, &mut log, &mut rng, EpochTime::from_seconds(s))
                .expect("a candidate remains");
            assert_eq!(
                store.get(&alert.uid).unwrap().status,
                TouristStatus::Alert
            );
        }
        assert_eq!(store.stats().alert, 3);
        assert_eq!(log.len(), 3);

        // Everyone on alert: generator must no-op
        assert!(generator
            .fire(&mut store, &mut log, &mut rng, EpochTime::from_seconds(4))
            .is_none());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn alert_ids_unique_per_fire() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut store =
            TrackingStore::seed_himalayan(5, &mut rng, EpochTime::from_seconds(0));
        let mut log = AlertLog::new();
        let generator = AlertGenerator::new();

        let a = generator
            .fire(&mut store, &mut log, &mut rng, EpochTime::from_seconds(1))
            .unwrap();
        let b = generator
            .fire(&mut store, &mut log, &mut rng, EpochTime::from_seconds(2))
            .unwrap();
        assert_ne!(a.id, b.id);
        assert!(log.get(&a.id).is_some());
        assert!(log.get(&b.id).is_some());
        assert!(log.get("alert-unknown").is_none());
    }

    #[test]
    fn alert_type_wire_names() {
        assert_eq!(serde_json::to_string(&AlertType::Sos).unwrap(), "\"SOS\"");
        assert_eq!(
            serde_json::to_string(&AlertType::GeoFence).unwrap(),
            "\"GeoFence\""
        );
        assert_eq!(
            serde_json::to_string(&AlertType::Inactivity).unwrap(),
            "\"Inactivity\""
        );
    }
}
