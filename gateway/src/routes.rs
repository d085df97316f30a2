//! API Routes
//!
//! Read models over the tracking store, alert log and zone registry, plus
//! the two mutations the dashboard needs: alert selection (which drives
//! crisis generation) and the predictive-warnings setting. Map rendering
//! is an external collaborator; it only consumes positions, zones,
//! statuses and the focus hint returned on selection.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use crisis_response::CrisisArtifact;
use geo_zones::{GeoPoint, GeoZone};
use serde::{Deserialize, Serialize};
use tracking_core::{
    Alert, EmergencyContact, EpochTime, SortOrder, StoreStats, TechComfort, Tourist,
    TouristStatus, TrackedPoint,
};

use crate::AppState;

/// Map zoom used when focusing on a selected alert's tourist
const FOCUS_ZOOM: u8 = 13;

// ========== Request/Response Types ==========

#[derive(Serialize)]
pub struct TouristSummary {
    pub uid: String,
    pub name: String,
    pub location: GeoPoint,
    pub status: TouristStatus,
    pub last_updated: EpochTime,
}

#[derive(Deserialize)]
pub struct RegisterTouristRequest {
    pub uid: Option<String>,
    pub name: String,
    pub age: u8,
    pub tech_comfort: TechComfort,
    pub medical_notes: Option<String>,
    pub emergency_contact: EmergencyContact,
    pub location: Option<GeoPoint>,
}

#[derive(Deserialize)]
pub struct AlertListParams {
    pub order: Option<SortOrder>,
}

#[derive(Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
    pub count: usize,
}

/// Recenter hint for the external map collaborator
#[derive(Serialize)]
pub struct MapFocus {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
}

#[derive(Serialize)]
pub struct SelectAlertResponse {
    pub selected: bool,
    pub token: Option<u64>,
    pub focus: Option<MapFocus>,
}

#[derive(Serialize, Deserialize)]
pub struct Settings {
    pub predictive_warnings: bool,
}

// ========== Route Handlers ==========

/// Current positions and statuses for every tracked tourist
pub async fn list_tourists(State(state): State<AppState>) -> Json<Vec<TouristSummary>> {
    let tourists = state.core.tourists().read().await;
    let summaries = tourists
        .iter()
        .map(|t| TouristSummary {
            uid: t.uid.clone(),
            name: t.name.clone(),
            location: t.location,
            status: t.status,
            last_updated: t.last_updated,
        })
        .collect();
    Json(summaries)
}

/// Full profile including bounded position history
pub async fn get_tourist(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<Tourist>, (StatusCode, String)> {
    let tourists = state.core.tourists().read().await;
    tourists
        .get(&uid)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("Tourist {} not found", uid)))
}

/// Admit a tourist into the tracked roster; a taken uid is a conflict
pub async fn register_tourist(
    State(state): State<AppState>,
    Json(req): Json<RegisterTouristRequest>,
) -> Result<(StatusCode, Json<Tourist>), (StatusCode, String)> {
    let now = EpochTime::now();
    let location = req.location.unwrap_or(tracking_core::REGION_CENTER);
    let tourist = Tourist {
        uid: req
            .uid
            .unwrap_or_else(|| format!("tourist-{}", uuid::Uuid::new_v4())),
        name: req.name,
        location,
        last_updated: now,
        status: TouristStatus::Safe,
        age: req.age,
        tech_comfort: req.tech_comfort,
        medical_notes: req.medical_notes.unwrap_or_else(|| "None".to_string()),
        emergency_contact: req.emergency_contact,
        location_history: vec![TrackedPoint {
            position: location,
            timestamp: now,
        }],
    };

    let mut tourists = state.core.tourists().write().await;
    if tourists.get(&tourist.uid).is_some() {
        return Err((
            StatusCode::CONFLICT,
            format!("Tourist {} already registered", tourist.uid),
        ));
    }
    tourists.insert(tourist.clone());
    tracing::info!(uid = %tourist.uid, "tourist registered");

    Ok((StatusCode::CREATED, Json(tourist)))
}

/// Status roll-up for the stats bar
pub async fn stats(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.core.tourists().read().await.stats())
}

/// Current zones read model
pub async fn list_zones(State(state): State<AppState>) -> Json<Vec<GeoZone>> {
    Json(state.core.zones().iter().cloned().collect())
}

/// Alert log, most-recent-first unless an explicit time order is requested
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<AlertListParams>,
) -> Json<AlertsResponse> {
    let log = state.core.alerts().read().await;
    let alerts = match params.order {
        Some(order) => log.sorted_by_time(order),
        None => log.iter().cloned().collect(),
    };
    let count = alerts.len();
    Json(AlertsResponse { alerts, count })
}

/// Select an alert, kicking off crisis-response generation. A vanished
/// alert or tourist is absorbed: `selected` is false and the current
/// artifact is untouched.
pub async fn select_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<SelectAlertResponse> {
    let token = state.orchestrator.select_alert(&id).await;

    // One store lock at a time; the tick holds tourists and alerts together
    let focus = if token.is_some() {
        let uid = {
            let alerts = state.core.alerts().read().await;
            alerts.get(&id).map(|a| a.uid.clone())
        };
        match uid {
            Some(uid) => {
                let tourists = state.core.tourists().read().await;
                tourists.get(&uid).map(|t| MapFocus {
                    lat: t.location.lat,
                    lng: t.location.lng,
                    zoom: FOCUS_ZOOM,
                })
            }
            None => None,
        }
    } else {
        None
    };

    Json(SelectAlertResponse {
        selected: token.is_some(),
        token,
        focus,
    })
}

/// Current crisis artifact for the response panel
pub async fn current_crisis(State(state): State<AppState>) -> Json<CrisisArtifact> {
    Json(state.orchestrator.current().await)
}

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(Settings {
        predictive_warnings: state.core.predictive_warnings(),
    })
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Json<Settings> {
    state.core.set_predictive_warnings(settings.predictive_warnings);
    Json(Settings {
        predictive_warnings: state.core.predictive_warnings(),
    })
}

// ========== Router ==========

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/tourists", get(list_tourists).post(register_tourist))
        .route("/tourists/:uid", get(get_tourist))
        .route("/stats", get(stats))
        .route("/zones", get(list_zones))
        .route("/alerts", get(list_alerts))
        .route("/alerts/:id/select", post(select_alert))
        .route("/crisis", get(current_crisis))
        .route("/settings", get(get_settings).put(put_settings))
        .with_state(state)
}
