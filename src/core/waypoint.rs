//! User-supplied route control point.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A waypoint: a coordinate with optional clearance and label.
///
/// Clearance is the minimum safe distance from coastline or obstacles at
/// this point, in degrees of arc; route geometry carries it from the
/// mesh onto smoothed waypoints so the corridor polygon can be derived
/// without another mesh lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            coordinate: Coordinate::new(lat, lon),
            clearance: None,
            label: None,
        }
    }

    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            clearance: None,
            label: None,
        }
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = Some(clearance);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Great-circle distance to another waypoint in kilometers.
    #[inline]
    pub fn geographic_distance(&self, other: &Waypoint) -> f64 {
        self.coordinate.geographic_distance(&other.coordinate)
    }
}

impl From<Coordinate> for Waypoint {
    fn from(coordinate: Coordinate) -> Self {
        Self::from_coordinate(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let wp = Waypoint::new(59.91, 10.75)
            .with_clearance(0.02)
            .with_label("Oslo");
        assert_eq!(wp.clearance, Some(0.02));
        assert_eq!(wp.label.as_deref(), Some("Oslo"));
    }

    #[test]
    fn test_distance_delegates_to_coordinate() {
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 1.0);
        assert!((a.geographic_distance(&b) - 111.19).abs() < 0.1);
    }
}
