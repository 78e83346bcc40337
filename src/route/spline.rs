//! Cardinal spline interpolation over waypoint control points.

use crate::core::{Coordinate, Waypoint};

/// Interpolates a cardinal spline through `points`, emitting `samples`
/// evenly spaced points per control-point pair.
///
/// The first and last output points are the exact input endpoints, and
/// every control point appears unchanged in the output. Interpolated
/// points inherit the clearance of the control point opening their
/// segment. Fewer than three control points pass through untouched.
pub fn cardinal_spline(points: &[Waypoint], tension: f64, samples: usize) -> Vec<Waypoint> {
    if points.len() < 3 || samples < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((points.len() - 1) * samples + 1);
    out.push(points[0].clone());

    for i in 0..points.len() - 1 {
        let p1 = points[i].coordinate;
        let p2 = points[i + 1].coordinate;
        // Clamped neighbors at the ends.
        let p0 = points[i.saturating_sub(1)].coordinate;
        let p3 = points[(i + 2).min(points.len() - 1)].coordinate;

        let m1 = p2.sub(&p0).scale(tension);
        let m2 = p3.sub(&p1).scale(tension);

        for s in 1..=samples {
            if s == samples {
                out.push(points[i + 1].clone());
                continue;
            }
            let t = s as f64 / samples as f64;
            let mut sample = Waypoint::from_coordinate(hermite(&p1, &m1, &p2, &m2, t));
            sample.clearance = points[i].clearance;
            out.push(sample);
        }
    }

    out
}

/// Cubic Hermite blend of point/tangent pairs at parameter `t`.
fn hermite(p1: &Coordinate, m1: &Coordinate, p2: &Coordinate, m2: &Coordinate, t: f64) -> Coordinate {
    let t2 = t * t;
    let t3 = t2 * t;
    let h1 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h2 = t3 - 2.0 * t2 + t;
    let h3 = -2.0 * t3 + 3.0 * t2;
    let h4 = t3 - t2;

    p1.scale(h1)
        .add(&m1.scale(h2))
        .add(&p2.scale(h3))
        .add(&m2.scale(h4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Coordinate, b: &Coordinate) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_endpoints_are_exact() {
        let points = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 2.0),
            Waypoint::new(3.0, 1.0),
        ];
        let curve = cardinal_spline(&points, 0.25, 8);

        assert!(close(&curve[0].coordinate, &points[0].coordinate));
        assert!(close(
            &curve.last().unwrap().coordinate,
            &points.last().unwrap().coordinate
        ));
    }

    #[test]
    fn test_sample_count() {
        let points = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(2.0, 1.0),
            Waypoint::new(3.0, 1.0),
        ];
        let curve = cardinal_spline(&points, 0.25, 8);
        assert_eq!(curve.len(), (points.len() - 1) * 8 + 1);
    }

    #[test]
    fn test_control_points_appear_in_output() {
        let points = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 2.0),
            Waypoint::new(2.0, 0.0),
        ];
        let samples = 4;
        let curve = cardinal_spline(&points, 0.25, samples);
        assert!(close(&curve[samples].coordinate, &points[1].coordinate));
    }

    #[test]
    fn test_samples_inherit_clearance() {
        let points = vec![
            Waypoint::new(0.0, 0.0).with_clearance(0.1),
            Waypoint::new(1.0, 0.0).with_clearance(0.2),
            Waypoint::new(2.0, 0.0).with_clearance(0.3),
        ];
        let curve = cardinal_spline(&points, 0.25, 4);

        // Interior samples of the first segment carry the opening
        // control point's clearance.
        for wp in &curve[1..4] {
            assert_eq!(wp.clearance, Some(0.1));
        }
        assert_eq!(curve[4].clearance, Some(0.2));
    }

    #[test]
    fn test_short_input_passes_through() {
        let points = vec![Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 1.0)];
        let curve = cardinal_spline(&points, 0.25, 8);
        assert_eq!(curve.len(), 2);
        assert!(close(&curve[0].coordinate, &points[0].coordinate));
        assert!(close(&curve[1].coordinate, &points[1].coordinate));
    }

    #[test]
    fn test_zero_tension_stays_near_polyline() {
        // With zero tension the tangents vanish and the blend reduces
        // to a smoothstep between control points, so every sample lies
        // on the connecting segment.
        let points = vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 1.0),
            Waypoint::new(2.0, 2.0),
        ];
        let curve = cardinal_spline(&points, 0.0, 8);
        for wp in &curve {
            assert!((wp.coordinate.x - wp.coordinate.y).abs() < 1e-9);
        }
    }
}
