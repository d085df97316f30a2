//! Tracking Store
//!
//! Exclusive owner of all tourist records. Mutated only from the tick
//! pipeline (and registration); read models clone what they need.

use crate::tourist::{
    EmergencyContact, EpochTime, TechComfort, Tourist, TouristStatus, TrackedPoint,
};
use geo_zones::GeoPoint;
use rand::Rng;
use serde::Serialize;

/// Seed roster for the simulated Himalayan deployment
const INDIAN_NAMES: [&str; 20] = [
    "Aarav Sharma",
    "Vivaan Singh",
    "Aditya Kumar",
    "Vihaan Gupta",
    "Arjun Patel",
    "Sai Joshi",
    "Reyansh Reddy",
    "Ayaan Verma",
    "Krishna Nair",
    "Ishaan Khan",
    "Saanvi Devi",
    "Aanya Mehta",
    "Aadhya Mishra",
    "Myra Agarwal",
    "Ananya Jain",
    "Pari Shah",
    "Diya Kumar",
    "Riya Singh",
    "Siya Patel",
    "Anika Gupta",
];

/// Rishikesh trailhead, center of the monitored region
pub const REGION_CENTER: GeoPoint = GeoPoint {
    lat: 30.0869,
    lng: 78.2676,
};

/// Status roll-up for the dashboard stats bar
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub safe: usize,
    pub warning: usize,
    pub alert: usize,
}

#[derive(Debug, Default)]
pub struct TrackingStore {
    tourists: Vec<Tourist>,
}

impl TrackingStore {
    pub fn new() -> Self {
        Self {
            tourists: Vec::new(),
        }
    }

    /// Seed `count` tourists scattered around the region center, mirroring
    /// the field-trial roster: cycling tech comfort, occasional medical
    /// note, derived emergency contact.
    pub fn seed_himalayan<R: Rng>(count: usize, rng: &mut R, now: EpochTime) -> Self {
        let mut store = Self::new();

        for i in 0..count {
            let name = INDIAN_NAMES[i % INDIAN_NAMES.len()];
            let surname = name.split_whitespace().last().unwrap_or("Sharma");
            let location = GeoPoint::new(
                REGION_CENTER.lat + (rng.gen::<f64>() - 0.5) * 0.5,
                REGION_CENTER.lng + (rng.gen::<f64>() - 0.5) * 0.5,
            );
            let tech_comfort = match i % 3 {
                0 => TechComfort::Low,
                1 => TechComfort::Medium,
                _ => TechComfort::High,
            };
            let medical_notes = if rng.gen::<f64>() < 0.2 {
                "Allergy: Sulfa Drugs".to_string()
            } else {
                "None".to_string()
            };

            store.insert(Tourist {
                uid: format!("tourist-id-{i}"),
                name: name.to_string(),
                location,
                last_updated: now,
                status: TouristStatus::Safe,
                age: 20 + rng.gen_range(0..40),
                tech_comfort,
                medical_notes,
                emergency_contact: EmergencyContact {
                    name: format!("Rohan {surname}"),
                    phone: format!("+91 98765 432{i:02}"),
                },
                location_history: vec![TrackedPoint {
                    position: location,
                    timestamp: now,
                }],
            });
        }

        store
    }

    pub fn insert(&mut self, tourist: Tourist) {
        self.tourists.push(tourist);
    }

    pub fn get(&self, uid: &str) -> Option<&Tourist> {
        self.tourists.iter().find(|t| t.uid == uid)
    }

    pub fn get_mut(&mut self, uid: &str) -> Option<&mut Tourist> {
        self.tourists.iter_mut().find(|t| t.uid == uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tourist> {
        self.tourists.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tourist> {
        self.tourists.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.tourists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tourists.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            total: self.tourists.len(),
            ..Default::default()
        };
        for tourist in &self.tourists {
            match tourist.status {
                TouristStatus::Safe => stats.safe += 1,
                TouristStatus::Warning => stats.warning += 1,
                TouristStatus::Alert => stats.alert += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seeded_roster_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let store = TrackingStore::seed_himalayan(20, &mut rng, EpochTime::from_seconds(0));

        assert_eq!(store.len(), 20);
        for (i, tourist) in store.iter().enumerate() {
            assert_eq!(tourist.uid, format!("tourist-id-{i}"));
            assert_eq!(tourist.status, TouristStatus::Safe);
            assert!((20..60).contains(&tourist.age));
            assert_eq!(tourist.location_history.len(), 1);
            // Scatter stays within the ±0.25° box around the trailhead
            assert!((tourist.location.lat - REGION_CENTER.lat).abs() <= 0.25);
            assert!((tourist.location.lng - REGION_CENTER.lng).abs() <= 0.25);
        }

        let stats = store.stats();
        assert_eq!(stats.total, 20);
        assert_eq!(stats.safe, 20);
        assert_eq!(stats.warning + stats.alert, 0);
    }

    #[test]
    fn lookup_by_uid() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = TrackingStore::seed_himalayan(5, &mut rng, EpochTime::from_seconds(0));

        assert!(store.get("tourist-id-3").is_some());
        assert!(store.get("tourist-id-99").is_none());

        store.get_mut("tourist-id-3").unwrap().status = TouristStatus::Alert;
        assert_eq!(store.stats().alert, 1);
    }
}
