//! Tourist record and position history

use geo_zones::GeoPoint;
use serde::{Deserialize, Serialize};

/// Position history cap per tourist; oldest entry evicted on overflow
pub const HISTORY_CAP: usize = 10;

/// Epoch timestamp with nanosecond fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpochTime {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl EpochTime {
    pub fn now() -> Self {
        let now = chrono::Utc::now();
        Self {
            seconds: now.timestamp(),
            nanoseconds: now.timestamp_subsec_nanos(),
        }
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            seconds,
            nanoseconds: 0,
        }
    }

    pub fn as_millis(&self) -> i64 {
        self.seconds * 1_000 + i64::from(self.nanoseconds) / 1_000_000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouristStatus {
    Safe,
    Warning,
    Alert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechComfort {
    Low,
    Medium,
    High,
}

impl TechComfort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
}

/// One entry in a tourist's bounded position history
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrackedPoint {
    pub position: GeoPoint,
    pub timestamp: EpochTime,
}

/// Tracked tourist with static profile and live position state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tourist {
    pub uid: String,
    pub name: String,
    pub location: GeoPoint,
    pub last_updated: EpochTime,
    pub status: TouristStatus,
    pub age: u8,
    pub tech_comfort: TechComfort,
    pub medical_notes: String,
    pub emergency_contact: EmergencyContact,
    /// Most-recent-last, capped at [`HISTORY_CAP`]
    pub location_history: Vec<TrackedPoint>,
}

impl Tourist {
    /// Move the tourist, stamping the time and appending to history.
    /// Status is untouched here; the tick pipeline derives it afterwards.
    pub fn move_to(&mut self, position: GeoPoint, timestamp: EpochTime) {
        self.location = position;
        self.last_updated = timestamp;
        self.location_history.push(TrackedPoint {
            position,
            timestamp,
        });
        if self.location_history.len() > HISTORY_CAP {
            let overflow = self.location_history.len() - HISTORY_CAP;
            self.location_history.drain(..overflow);
        }
    }
}
