//! Single planned leg between two requested waypoints.

use crate::config::RouteConfig;
use crate::core::{Coordinate, Waypoint};
use crate::error::{Result, VarunaError};
use crate::mesh::MeshDatabase;
use crate::route::spline::cardinal_spline;

/// A smoothed leg derived from a mesh vertex path.
///
/// Construction runs the full pipeline in one pass: endpoint trimming
/// against the first and last mesh edges, clearance-scaled displacement
/// of interior corners, consecutive-duplicate removal, then cardinal
/// spline interpolation. Any change to the inputs means building a new
/// segment; there is no incremental update.
#[derive(Debug, Clone)]
pub struct RouteSegment {
    path: Vec<u32>,
    waypoints: Vec<Waypoint>,
}

impl RouteSegment {
    pub fn new(
        db: &MeshDatabase,
        start: Waypoint,
        path: Vec<u32>,
        end: Waypoint,
        config: &RouteConfig,
    ) -> Result<Self> {
        let coords: Vec<Coordinate> = path
            .iter()
            .map(|&id| db.coordinate_of(id).ok_or(VarunaError::UnknownVertex(id)))
            .collect::<Result<_>>()?;

        let controls = if coords.len() > 2 {
            Self::build_controls(db, &start, &path, &coords, &end)
        } else {
            vec![start.clone(), end.clone()]
        };

        let deduped = dedupe_consecutive(controls);
        let waypoints = cardinal_spline(&deduped, config.spline_tension, config.spline_samples);

        Ok(Self { path, waypoints })
    }

    /// Control-point sequence for a path with interior vertices: the
    /// exact start, its projection onto the first edge, the displaced
    /// interior vertices, the end's projection onto the last edge, and
    /// the exact end.
    fn build_controls(
        db: &MeshDatabase,
        start: &Waypoint,
        path: &[u32],
        coords: &[Coordinate],
        end: &Waypoint,
    ) -> Vec<Waypoint> {
        let m = coords.len();
        let edge_clearance: Vec<f64> = path
            .windows(2)
            .map(|pair| db.edge_clearance(pair[0], pair[1]))
            .collect();

        let proj_start = start.coordinate.project_onto_segment(&coords[0], &coords[1]);
        let proj_end = end
            .coordinate
            .project_onto_segment(&coords[m - 1], &coords[m - 2]);

        let mut controls = Vec::with_capacity(m + 2);
        controls.push(start.clone());
        controls
            .push(Waypoint::from_coordinate(proj_start).with_clearance(edge_clearance[0]));

        for j in 1..m - 1 {
            let previous = if j == 1 { proj_start } else { coords[j - 1] };
            let next = if j == m - 2 { proj_end } else { coords[j + 1] };
            let clearance = edge_clearance[j - 1].min(edge_clearance[j]);
            let displaced = displace_corner(&coords[j], &previous, &next, clearance);
            controls.push(Waypoint::from_coordinate(displaced).with_clearance(clearance));
        }

        controls
            .push(Waypoint::from_coordinate(proj_end).with_clearance(edge_clearance[m - 2]));
        controls.push(end.clone());
        controls
    }

    /// Mesh vertex ids this leg follows.
    pub fn path(&self) -> &[u32] {
        &self.path
    }

    /// Final smoothed waypoint sequence.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Great-circle length of the smoothed sequence in kilometers.
    pub fn distance(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].geographic_distance(&pair[1]))
            .sum()
    }
}

/// Pulls a corner vertex along its angle bisector, scaled by the
/// available clearance and by how sharp the turn is. A straight-through
/// vertex (angle near 180 degrees) barely moves; a hairpin moves by the
/// full clearance.
fn displace_corner(
    corner: &Coordinate,
    previous: &Coordinate,
    next: &Coordinate,
    clearance: f64,
) -> Coordinate {
    let to_previous = previous.sub(corner).normalized();
    let to_next = next.sub(corner).normalized();
    let bisector = to_previous.add(&to_next).normalized();
    if bisector.length() < 1e-12 {
        return *corner;
    }
    let sharpness = (1.0 + to_previous.dot(&to_next)) / 2.0;
    corner.add(&bisector.scale(clearance * sharpness))
}

fn dedupe_consecutive(points: Vec<Waypoint>) -> Vec<Waypoint> {
    let mut out: Vec<Waypoint> = Vec::with_capacity(points.len());
    for wp in points {
        if let Some(last) = out.last() {
            if last.coordinate.distance(&wp.coordinate) < 1e-9 {
                continue;
            }
        }
        out.push(wp);
    }
    out
}
