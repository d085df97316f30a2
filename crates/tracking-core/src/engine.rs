//! Safety Core
//!
//! Owned, injectable container for the two shared stores plus the tick
//! pipeline that mutates them. All writes funnel through `tick`, which
//! applies an ordered reducer pair: zone-status pass first, alert-override
//! pass second, so `alert` always wins within a tick.

use crate::alerts::{Alert, AlertGenerator, AlertLog};
use crate::simulator::PositionSimulator;
use crate::store::TrackingStore;
use crate::tourist::EpochTime;
use geo_zones::ZoneRegistry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Position feed cadence
pub const TICK_PERIOD: Duration = Duration::from_millis(3000);

pub struct SafetyCore {
    zones: Arc<ZoneRegistry>,
    tourists: RwLock<TrackingStore>,
    alerts: RwLock<AlertLog>,
    simulator: PositionSimulator,
    generator: AlertGenerator,
    predictive_warnings: AtomicBool,
    ticks: AtomicU64,
}

impl SafetyCore {
    pub fn new(zones: Arc<ZoneRegistry>, tourists: TrackingStore) -> Self {
        Self::with_components(
            zones,
            tourists,
            PositionSimulator::new(),
            AlertGenerator::new(),
        )
    }

    /// Construct with explicit simulator/generator, for deterministic tests
    /// and tuned deployments.
    pub fn with_components(
        zones: Arc<ZoneRegistry>,
        tourists: TrackingStore,
        simulator: PositionSimulator,
        generator: AlertGenerator,
    ) -> Self {
        Self {
            zones,
            tourists: RwLock::new(tourists),
            alerts: RwLock::new(AlertLog::new()),
            simulator,
            generator,
            predictive_warnings: AtomicBool::new(true),
            ticks: AtomicU64::new(0),
        }
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn tourists(&self) -> &RwLock<TrackingStore> {
        &self.tourists
    }

    pub fn alerts(&self) -> &RwLock<AlertLog> {
        &self.alerts
    }

    pub fn predictive_warnings(&self) -> bool {
        self.predictive_warnings.load(Ordering::Relaxed)
    }

    pub fn set_predictive_warnings(&self, enabled: bool) {
        self.predictive_warnings.store(enabled, Ordering::Relaxed);
        info!(enabled, "predictive warnings toggled");
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Run one tick. Holds both store write locks for the duration so the
    /// two passes are atomic with respect to readers: zone-status
    /// derivation first, then the alert generator's sticky override.
    pub async fn tick<R: Rng>(&self, rng: &mut R) -> Option<Alert> {
        let now = EpochTime::now();
        let mut tourists = self.tourists.write().await;
        let mut alerts = self.alerts.write().await;

        self.simulator.advance(
            &mut tourists,
            &self.zones,
            self.predictive_warnings(),
            rng,
            now,
        );
        let fired = self
            .generator
            .maybe_fire(&mut tourists, &mut alerts, rng, now);

        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(tick, tourists = tourists.len(), alerts = alerts.len(), "tick complete");
        fired
    }

    /// Spawn the recurring tick task. The returned handle is the lifecycle
    /// owner; dropping it without `stop` leaves the task running.
    pub fn start(self: Arc<Self>, period: Duration) -> TickHandle {
        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut interval = tokio::time::interval(period);
            // First tick of an interval fires immediately; skip it so the
            // seeded roster is visible unperturbed for one period.
            interval.tick().await;
            loop {
                interval.tick().await;
                self.tick(&mut rng).await;
            }
        });
        TickHandle { task }
    }
}

/// Handle for the running tick loop
pub struct TickHandle {
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
