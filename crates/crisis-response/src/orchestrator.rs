//! Crisis Response Orchestrator
//!
//! State machine per alert-selection event:
//! `idle → pending → resolved` or `idle → pending → failed`.
//!
//! Each selection is tagged with a monotonically increasing token. A
//! completion applies its result only while its token is still the latest,
//! so a superseded request resolving late can never overwrite a newer
//! artifact. The artifact is replaced with `pending` eagerly at selection
//! so stale results are never shown during a new request.

use crate::client::{GenerationError, ResponseGenerator};
use crate::prompt::IncidentPrompt;
use crate::schema::CrisisResponse;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use tracking_core::SafetyCore;

/// The single live crisis artifact; replaced wholesale on each selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CrisisArtifact {
    Idle,
    Pending {
        alert_id: String,
    },
    Resolved {
        alert_id: String,
        response: CrisisResponse,
    },
    Failed {
        alert_id: String,
        error: String,
    },
}

/// Token counter plus the artifact it guards; shared with in-flight
/// generation tasks
struct SelectionState {
    latest: AtomicU64,
    artifact: RwLock<CrisisArtifact>,
}

pub struct CrisisOrchestrator {
    core: Arc<SafetyCore>,
    generator: Arc<dyn ResponseGenerator>,
    state: Arc<SelectionState>,
}

impl CrisisOrchestrator {
    pub fn new(core: Arc<SafetyCore>, generator: Arc<dyn ResponseGenerator>) -> Self {
        Self {
            core,
            generator,
            state: Arc::new(SelectionState {
                latest: AtomicU64::new(0),
                artifact: RwLock::new(CrisisArtifact::Idle),
            }),
        }
    }

    pub async fn current(&self) -> CrisisArtifact {
        self.state.artifact.read().await.clone()
    }

    /// Handle an alert selection. Returns the selection token, or `None`
    /// when the alert or its tourist cannot be found; that lookup failure
    /// is absorbed and the current artifact is left untouched.
    pub async fn select_alert(&self, alert_id: &str) -> Option<u64> {
        // One store lock at a time; the tick holds tourists then alerts,
        // so holding alerts while waiting on tourists here can wedge it
        let alert = {
            let alerts = self.core.alerts().read().await;
            let Some(alert) = alerts.get(alert_id) else {
                debug!(alert_id, "selection ignored: alert not in log");
                return None;
            };
            alert.clone()
        };
        let tourist = {
            let tourists = self.core.tourists().read().await;
            let Some(tourist) = tourists.get(&alert.uid) else {
                debug!(alert_id, uid = %alert.uid, "selection ignored: tourist not in store");
                return None;
            };
            tourist.clone()
        };

        let token = self.state.latest.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.artifact.write().await = CrisisArtifact::Pending {
            alert_id: alert.id.clone(),
        };
        info!(token, alert_id = %alert.id, uid = %alert.uid, "crisis generation started");

        let prompt = IncidentPrompt::new(&tourist, &alert);
        let generator = Arc::clone(&self.generator);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let outcome = generator.generate(prompt.as_str()).await;
            state.complete(token, &alert.id, outcome).await;
        });

        Some(token)
    }
}

impl SelectionState {
    /// Apply a generation outcome if its selection is still the latest.
    async fn complete(
        &self,
        token: u64,
        alert_id: &str,
        outcome: Result<CrisisResponse, GenerationError>,
    ) {
        if self.latest.load(Ordering::SeqCst) != token {
            debug!(token, alert_id, "stale generation result discarded");
            return;
        }
        let mut artifact = self.artifact.write().await;
        // Re-check under the write lock; a newer selection may have raced in
        if self.latest.load(Ordering::SeqCst) != token {
            debug!(token, alert_id, "stale generation result discarded");
            return;
        }

        *artifact = match outcome {
            Ok(response) => {
                info!(token, alert_id, "crisis generation resolved");
                CrisisArtifact::Resolved {
                    alert_id: alert_id.to_string(),
                    response,
                }
            }
            Err(err) => {
                warn!(token, alert_id, error = %err, "crisis generation failed");
                CrisisArtifact::Failed {
                    alert_id: alert_id.to_string(),
                    error: err.to_string(),
                }
            }
        };
    }
}
