//! Incident prompt assembly

use tracking_core::{Alert, Tourist};

/// Persona and JSON-only mandate for the generation service
pub const SYSTEM_INSTRUCTION: &str = "You are 'TourSafe Cognitive Core,' an AI Agent \
for safety analysis in India. Output MUST be a single, valid JSON object.";

/// Fixed target language for rescue-team messaging
pub const TARGET_RESCUE_LANGUAGE: &str = "Hindi";

/// Fixed primary rescue authority for the monitored region
pub const RESCUE_AUTHORITY: &str = "NDRF / SDRF Uttarakhand";

/// Natural-language incident briefing request, assembled from one tourist
/// record and one alert. Positions are rounded to 4 decimal places.
pub struct IncidentPrompt {
    text: String,
}

impl IncidentPrompt {
    pub fn new(tourist: &Tourist, alert: &Alert) -> Self {
        let text = format!(
            "Simulate a Level 3 Crisis Alert based on the following input data: \
             1. User ID: {uid} ({age}-year-old tourist, {tech} tech comfort). \
             2. Location: {lat:.4}, {lng:.4} (Himalayan trekking zone, India). \
             3. Anomaly Data: Alert Type is '{alert_type}'. Details: {details}. \
             4. Tourist Medical Data: {medical}. \
             5. Emergency Contact: {contact_name} ({contact_phone}). \
             6. Required Target Language for Rescue Team: {language}. \
             7. Primary Rescue Authority: {authority}. \
             Generate the full crisis response analysis.",
            uid = tourist.uid,
            age = tourist.age,
            tech = tourist.tech_comfort.as_str(),
            lat = tourist.location.lat,
            lng = tourist.location.lng,
            alert_type = alert.alert_type.as_str(),
            details = alert.details,
            medical = tourist.medical_notes,
            contact_name = tourist.emergency_contact.name,
            contact_phone = tourist.emergency_contact.phone,
            language = TARGET_RESCUE_LANGUAGE,
            authority = RESCUE_AUTHORITY,
        );
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracking_core::{
        AlertType, EmergencyContact, EpochTime, TechComfort, TouristStatus, TrackedPoint,
        ALERT_DETAILS,
    };

    fn sample_pair() -> (Tourist, Alert) {
        let now = EpochTime::from_seconds(1_700_000_000);
        let location = geo_point(31.071234, 78.909876);
        let tourist = Tourist {
            uid: "tourist-id-3".to_string(),
            name: "Vihaan Gupta".to_string(),
            location,
            last_updated: now,
            status: TouristStatus::Alert,
            age: 41,
            tech_comfort: TechComfort::Low,
            medical_notes: "Allergy: Sulfa Drugs".to_string(),
            emergency_contact: EmergencyContact {
                name: "Rohan Gupta".to_string(),
                phone: "+91 98765 43203".to_string(),
            },
            location_history: vec![TrackedPoint {
                position: location,
                timestamp: now,
            }],
        };
        let alert = Alert {
            id: "alert-1700000000000".to_string(),
            uid: tourist.uid.clone(),
            alert_type: AlertType::Sos,
            timestamp: now,
            details: ALERT_DETAILS.to_string(),
        };
        (tourist, alert)
    }

    fn geo_point(lat: f64, lng: f64) -> geo_zones::GeoPoint {
        geo_zones::GeoPoint::new(lat, lng)
    }

    #[test]
    fn prompt_embeds_all_incident_fields() {
        let (tourist, alert) = sample_pair();
        let prompt = IncidentPrompt::new(&tourist, &alert);
        let text = prompt.as_str();

        assert!(text.contains("tourist-id-3"));
        assert!(text.contains("41-year-old"));
        assert!(text.contains("low tech comfort"));
        assert!(text.contains("'SOS'"));
        assert!(text.contains("Allergy: Sulfa Drugs"));
        assert!(text.contains("Rohan Gupta (+91 98765 43203)"));
        assert!(text.contains("Hindi"));
        assert!(text.contains("NDRF / SDRF Uttarakhand"));
    }

    #[test]
    fn position_rounded_to_four_decimals() {
        let (tourist, alert) = sample_pair();
        let text = IncidentPrompt::new(&tourist, &alert).text;
        assert!(text.contains("31.0712, 78.9099"));
        assert!(!text.contains("31.071234"));
    }
}
