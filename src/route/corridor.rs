//! Clearance corridor outline around a waypoint sequence.

use crate::core::{Coordinate, Waypoint};

/// Smallest half-width used when a waypoint carries no clearance.
const MIN_HALF_WIDTH: f64 = 0.005;
/// Largest half-width regardless of recorded clearance.
const MAX_HALF_WIDTH: f64 = 0.5;

/// Closed polygon outlining the clearance corridor along `waypoints`.
///
/// Each consecutive pair contributes a perpendicular offset scaled by
/// the leading waypoint's clamped clearance, with the longitude
/// component divided by cos(latitude) so the corridor keeps its width
/// away from the equator. The polygon runs down the right side and
/// back up the left. Fewer than two waypoints yield an empty polygon.
pub fn corridor_polygon(waypoints: &[Waypoint]) -> Vec<Coordinate> {
    if waypoints.len() < 2 {
        return Vec::new();
    }

    let mut right = Vec::with_capacity(waypoints.len());
    let mut left = Vec::with_capacity(waypoints.len());

    for (i, pair) in waypoints.windows(2).enumerate() {
        let a = pair[0].coordinate;
        let b = pair[1].coordinate;
        let direction = b.sub(&a).normalized();
        let half = half_width(&pair[0]);

        let mut offset = direction.perpendicular().scale(half);
        let lat_cos = (a.x * std::f64::consts::PI / 180.0).cos();
        if lat_cos.abs() > 1e-9 {
            offset.y /= lat_cos;
        }

        if i == 0 {
            right.push(a.add(&offset));
            left.push(a.sub(&offset));
        }
        right.push(b.add(&offset));
        left.push(b.sub(&offset));
    }

    left.reverse();
    right.extend(left);
    right
}

fn half_width(waypoint: &Waypoint) -> f64 {
    waypoint
        .clearance
        .unwrap_or(0.0)
        .max(MIN_HALF_WIDTH)
        .min(MAX_HALF_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_waypoints_make_a_quad() {
        let waypoints = vec![
            Waypoint::new(0.0, 0.0).with_clearance(0.1),
            Waypoint::new(0.0, 1.0).with_clearance(0.1),
        ];
        let polygon = corridor_polygon(&waypoints);
        assert_eq!(polygon.len(), 4);
    }

    #[test]
    fn test_right_side_first_then_left_reversed() {
        // Eastward track at the equator: the perpendicular of (0, 1)
        // is (1, 0), so the right side sits at higher latitude.
        let waypoints = vec![
            Waypoint::new(0.0, 0.0).with_clearance(0.1),
            Waypoint::new(0.0, 1.0).with_clearance(0.1),
        ];
        let polygon = corridor_polygon(&waypoints);

        assert!((polygon[0].x - 0.1).abs() < 1e-9);
        assert!((polygon[1].x - 0.1).abs() < 1e-9);
        assert!((polygon[2].x + 0.1).abs() < 1e-9);
        assert!((polygon[3].x + 0.1).abs() < 1e-9);
        // Left side comes back in reverse order.
        assert!((polygon[2].y - 1.0).abs() < 1e-9);
        assert!((polygon[3].y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_clearance_is_clamped() {
        let narrow = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(0.0, 1.0),
        ];
        let polygon = corridor_polygon(&narrow);
        assert!((polygon[0].x - MIN_HALF_WIDTH).abs() < 1e-9);

        let wide = vec![
            Waypoint::new(0.0, 0.0).with_clearance(50.0),
            Waypoint::new(0.0, 1.0).with_clearance(50.0),
        ];
        let polygon = corridor_polygon(&wide);
        assert!((polygon[0].x - MAX_HALF_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn test_longitude_widens_with_latitude() {
        // Northward track at 60 degrees latitude: the offset is pure
        // longitude and must be divided by cos(60) = 0.5.
        let waypoints = vec![
            Waypoint::new(60.0, 0.0).with_clearance(0.1),
            Waypoint::new(61.0, 0.0).with_clearance(0.1),
        ];
        let polygon = corridor_polygon(&waypoints);
        assert!((polygon[0].y.abs() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_input_is_empty() {
        assert!(corridor_polygon(&[]).is_empty());
        assert!(corridor_polygon(&[Waypoint::new(0.0, 0.0)]).is_empty());
    }
}
