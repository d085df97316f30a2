//! Geo-Zones Library
//!
//! Static registry of named risk polygons for the monitored region plus the
//! geofence evaluator used by the tracking tick. Zones are immutable once
//! loaded; evaluation is a pure function over the polygon list.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("Zone not found: {0}")]
    NotFound(String),
    #[error("Degenerate polygon for zone {id}: {vertices} vertices (minimum 3)")]
    DegeneratePolygon { id: String, vertices: usize },
}

pub type Result<T> = std::result::Result<T, ZoneError>;

/// WGS84 point in floating-point degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
}

/// Named risk polygon, immutable after registry load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoZone {
    pub id: String,
    pub name: String,
    pub risk: RiskLevel,
    pub bounds: Vec<GeoPoint>,
}

impl GeoZone {
    pub fn contains(&self, point: GeoPoint) -> bool {
        point_in_polygon(point, &self.bounds)
    }
}

/// Ray-casting point-in-polygon test.
///
/// Casts a horizontal ray at the point's latitude and counts edge crossings,
/// wrapping last vertex back to first; an odd count means inside. Works for
/// non-convex polygons. Points exactly on an edge or vertex follow the raw
/// half-open crossing rule (`>` on one endpoint, `>=` implied on the other),
/// which is implementation-defined but stable; callers must not rely on a
/// particular answer for exact touches.
pub fn point_in_polygon(point: GeoPoint, bounds: &[GeoPoint]) -> bool {
    if bounds.len() < 3 {
        return false;
    }

    let GeoPoint { lat, lng } = point;
    let mut inside = false;
    let mut j = bounds.len() - 1;

    for i in 0..bounds.len() {
        let (xi, yi) = (bounds[i].lng, bounds[i].lat);
        let (xj, yj) = (bounds[j].lng, bounds[j].lat);

        let crosses = ((yi > lat) != (yj > lat))
            && lng < (xj - xi) * (lat - yi) / (yj - yi) + xi;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Static set of risk zones, loaded once at startup
pub struct ZoneRegistry {
    zones: Vec<GeoZone>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self { zones: Vec::new() }
    }

    /// Default zone set for the Himalayan monitoring region
    pub fn himalayan_defaults() -> Self {
        let mut registry = Self::new();

        registry
            .load(GeoZone {
                id: "zone-1".to_string(),
                name: "High-Altitude Avalanche Zone".to_string(),
                risk: RiskLevel::High,
                bounds: vec![
                    GeoPoint::new(31.05, 78.85),
                    GeoPoint::new(31.10, 78.88),
                    GeoPoint::new(31.07, 78.95),
                    GeoPoint::new(31.02, 78.92),
                ],
            })
            .expect("default zone-1 is well-formed");

        registry
            .load(GeoZone {
                id: "zone-2".to_string(),
                name: "Restricted Nanda Devi Sanctuary".to_string(),
                risk: RiskLevel::Medium,
                bounds: vec![
                    GeoPoint::new(30.40, 79.80),
                    GeoPoint::new(30.45, 79.82),
                    GeoPoint::new(30.43, 79.88),
                    GeoPoint::new(30.38, 79.85),
                ],
            })
            .expect("default zone-2 is well-formed");

        registry
    }

    /// Add a zone, rejecting polygons with fewer than 3 vertices
    pub fn load(&mut self, zone: GeoZone) -> Result<()> {
        if zone.bounds.len() < 3 {
            return Err(ZoneError::DegeneratePolygon {
                id: zone.id,
                vertices: zone.bounds.len(),
            });
        }
        self.zones.push(zone);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&GeoZone> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .ok_or_else(|| ZoneError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoZone> {
        self.zones.iter()
    }

    pub fn high_risk(&self) -> impl Iterator<Item = &GeoZone> {
        self.zones.iter().filter(|z| z.risk == RiskLevel::High)
    }

    /// First high-risk zone containing the point, if any
    pub fn containing_high_risk(&self, point: GeoPoint) -> Option<&GeoZone> {
        self.high_risk().find(|z| z.contains(point))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zone_1_bounds() -> Vec<GeoPoint> {
        ZoneRegistry::himalayan_defaults()
            .get("zone-1")
            .unwrap()
            .bounds
            .clone()
    }

    #[test]
    fn point_inside_zone_1() {
        // Reference scenario point from the avalanche zone interior
        assert!(point_in_polygon(GeoPoint::new(31.07, 78.90), &zone_1_bounds()));
    }

    #[test]
    fn point_outside_zone_1() {
        assert!(!point_in_polygon(GeoPoint::new(30.0869, 78.2676), &zone_1_bounds()));
        assert!(!point_in_polygon(GeoPoint::new(31.20, 78.90), &zone_1_bounds()));
    }

    #[test]
    fn non_convex_polygon() {
        // Arrowhead pointing right; the notch at (0.5, 0.0) is outside
        let bounds = vec![
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.0, 0.5),
            GeoPoint::new(-1.0, 1.0),
            GeoPoint::new(-1.0, -1.0),
            GeoPoint::new(0.0, -0.5),
            GeoPoint::new(0.0, -1.0),
        ];
        assert!(point_in_polygon(GeoPoint::new(0.0, -0.75), &bounds));
        assert!(!point_in_polygon(GeoPoint::new(0.5, 0.9), &bounds));
        assert!(point_in_polygon(GeoPoint::new(-0.5, 0.0), &bounds));
    }

    #[test]
    fn degenerate_polygon_is_never_inside() {
        let line = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert!(!point_in_polygon(GeoPoint::new(0.5, 0.5), &line));
        assert!(!point_in_polygon(GeoPoint::new(0.0, 0.0), &[]));
    }

    #[test]
    fn registry_rejects_degenerate_zone() {
        let mut registry = ZoneRegistry::new();
        let err = registry
            .load(GeoZone {
                id: "bad".to_string(),
                name: "Bad".to_string(),
                risk: RiskLevel::High,
                bounds: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)],
            })
            .unwrap_err();
        assert!(matches!(err, ZoneError::DegeneratePolygon { vertices: 2, .. }));
    }

    #[test]
    fn containing_high_risk_ignores_medium_zones() {
        let registry = ZoneRegistry::himalayan_defaults();
        // Interior of medium-risk zone-2
        let inside_sanctuary = GeoPoint::new(30.42, 79.84);
        assert!(registry.get("zone-2").unwrap().contains(inside_sanctuary));
        assert!(registry.containing_high_risk(inside_sanctuary).is_none());

        let inside_avalanche = GeoPoint::new(31.07, 78.90);
        let hit = registry.containing_high_risk(inside_avalanche).unwrap();
        assert_eq!(hit.id, "zone-1");
    }

    proptest! {
        /// The evaluator only looks at the edge set, so any cyclic rotation
        /// of the vertex list must give the same answer.
        #[test]
        fn invariant_under_cyclic_rotation(
            vertices in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 3..9),
            lat in -90.0f64..90.0,
            lng in -180.0f64..180.0,
            shift in 0usize..9,
        ) {
            let bounds: Vec<GeoPoint> = vertices
                .iter()
                .map(|&(lat, lng)| GeoPoint::new(lat, lng))
                .collect();
            let point = GeoPoint::new(lat, lng);

            let mut rotated = bounds.clone();
            rotated.rotate_left(shift % bounds.len());

            prop_assert_eq!(
                point_in_polygon(point, &bounds),
                point_in_polygon(point, &rotated)
            );
        }
    }
}
