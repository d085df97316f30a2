//! Tourist Tracking Core
//!
//! Authoritative in-memory state for the safety dashboard:
//! - Tourist records with bounded position history
//! - Simulated position feed on a fixed tick cadence
//! - Alert log with probabilistic alert generation
//! - `SafetyCore` container owning both stores behind a single tick writer
//!
//! All state is process-lifetime only; nothing here persists across restarts.

pub mod alerts;
pub mod engine;
pub mod simulator;
pub mod store;
pub mod tourist;

// Re-exports
pub use alerts::{
    Alert, AlertGenerator, AlertLog, AlertType, SortOrder, ALERT_DETAILS, ALERT_LOG_CAP,
    ALERT_PROBABILITY,
};
pub use engine::{SafetyCore, TickHandle, TICK_PERIOD};
pub use simulator::{PositionSimulator, POSITION_DRIFT_DEG};
pub use store::{StoreStats, TrackingStore, REGION_CENTER};
pub use tourist::{EmergencyContact, EpochTime, TechComfort, Tourist, TouristStatus, TrackedPoint, HISTORY_CAP};
