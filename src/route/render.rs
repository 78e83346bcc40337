//! Renderer-neutral route description.

use serde::{Deserialize, Serialize};

use crate::route::{corridor_polygon, Route};

/// Visual style for a rendered route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStyle {
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            color: default_color(),
            width: default_width(),
            opacity: default_opacity(),
        }
    }
}

fn default_color() -> String {
    "red".to_string()
}
fn default_width() -> f64 {
    25.0
}
fn default_opacity() -> f64 {
    0.2
}

/// Complete drawing description for one route: an id, the smoothed
/// coordinate track as `[lat, lon]` pairs, the style, and optionally
/// the clearance corridor outline. Contains no renderer types; any
/// map layer can consume the serialized form.
#[derive(Debug, Clone, Serialize)]
pub struct RouteAnnotation {
    pub id: String,
    pub coordinates: Vec<[f64; 2]>,
    pub style: RouteStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corridor: Option<Vec<[f64; 2]>>,
}

impl RouteAnnotation {
    pub fn from_route(id: impl Into<String>, route: &Route, style: RouteStyle) -> Self {
        let coordinates = route
            .waypoints()
            .iter()
            .map(|wp| [wp.coordinate.x, wp.coordinate.y])
            .collect();
        Self {
            id: id.into(),
            coordinates,
            style,
            corridor: None,
        }
    }

    /// Attach the clearance corridor polygon derived from the route's
    /// waypoint sequence.
    pub fn with_corridor(mut self, route: &Route) -> Self {
        let polygon = corridor_polygon(&route.waypoints());
        if !polygon.is_empty() {
            self.corridor = Some(polygon.iter().map(|c| [c.x, c.y]).collect());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;
    use crate::core::Waypoint;
    use crate::mesh::{MeshDataset, MeshDatabase};
    use crate::route::RouteSegment;

    fn small_route() -> Route {
        let db = MeshDatabase::from_dataset(MeshDataset {
            index: vec![[0.0, 0.0], [1.0, 0.0]],
            adjacent: vec![vec![1], vec![0]],
            ..Default::default()
        });
        let mut route = Route::new();
        route.push(
            RouteSegment::new(
                &db,
                Waypoint::new(0.0, 0.0).with_clearance(0.1),
                vec![0, 1],
                Waypoint::new(1.0, 0.0).with_clearance(0.1),
                &RouteConfig::default(),
            )
            .unwrap(),
        );
        route
    }

    #[test]
    fn test_style_defaults() {
        let style = RouteStyle::default();
        assert_eq!(style.color, "red");
        assert!((style.width - 25.0).abs() < 1e-9);
        assert!((style.opacity - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_annotation_tracks_route() {
        let route = small_route();
        let annotation = RouteAnnotation::from_route("leg-1", &route, RouteStyle::default());
        assert_eq!(annotation.id, "leg-1");
        assert_eq!(annotation.coordinates.len(), route.waypoints().len());
        assert!(annotation.corridor.is_none());
    }

    #[test]
    fn test_corridor_attachment() {
        let route = small_route();
        let annotation = RouteAnnotation::from_route("leg-1", &route, RouteStyle::default())
            .with_corridor(&route);
        let corridor = annotation.corridor.unwrap();
        assert_eq!(corridor.len(), 2 * route.waypoints().len());
    }

    #[test]
    fn test_serializes_without_renderer_types() {
        let route = small_route();
        let annotation = RouteAnnotation::from_route("leg-1", &route, RouteStyle::default());
        let json = serde_json::to_string(&annotation).unwrap();
        assert!(json.contains("\"color\":\"red\""));
        assert!(!json.contains("corridor"));
    }
}
