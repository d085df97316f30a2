//! Crisis response schema
//!
//! The generation service is contractually bound to return a single JSON
//! object with exactly these four sections, every field a string. The same
//! shape is declared to the service as a response schema so replies parse
//! strictly or not at all.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyDetectionStatus {
    pub level: String,
    pub cause: String,
    pub risk_score: String,
    pub action_required: String,
    pub geo_fencing_violation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalIdRetrieval {
    pub status: String,
    pub tourist_name: String,
    pub emergency_contact: String,
    pub critical_medical_data: String,
    pub document_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualGuidance {
    pub target_team: String,
    pub mission_priority: String,
    pub critical_protocol: String,
    pub resource_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultilingualCommunication {
    pub source_language: String,
    pub target_language: String,
    pub message_for_rescue_team: String,
    pub message_for_contact: String,
}

/// Complete four-section crisis briefing, stored verbatim as parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisResponse {
    pub anomaly_detection_status: AnomalyDetectionStatus,
    pub digital_id_retrieval: DigitalIdRetrieval,
    pub contextual_guidance: ContextualGuidance,
    pub multilingual_communication: MultilingualCommunication,
}

fn string_fields(names: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> = names
        .iter()
        .map(|n| (n.to_string(), json!({ "type": "STRING" })))
        .collect();
    json!({ "type": "OBJECT", "properties": properties })
}

/// Response-schema declaration sent with every generation request
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "anomaly_detection_status": string_fields(&[
                "level", "cause", "risk_score", "action_required", "geo_fencing_violation",
            ]),
            "digital_id_retrieval": string_fields(&[
                "status", "tourist_name", "emergency_contact", "critical_medical_data",
                "document_hash",
            ]),
            "contextual_guidance": string_fields(&[
                "target_team", "mission_priority", "critical_protocol", "resource_note",
            ]),
            "multilingual_communication": string_fields(&[
                "source_language", "target_language", "message_for_rescue_team",
                "message_for_contact",
            ]),
        }
    })
}
