//! Editable voyage: an ordered waypoint list kept in sync with its
//! planned legs.
//!
//! Every edit replans only the legs touching the edited position; the
//! route cache makes repeated planning of untouched legs cheap when it
//! does happen. Edits are transactional: a failed replan leaves the
//! voyage exactly as it was.

use crate::core::{Coordinate, Waypoint};
use crate::error::{Result, VarunaError};
use crate::plotter::RoutePlotter;
use crate::route::Route;

/// Waypoint list plus one planned leg per consecutive pair;
/// `routes[i]` connects `waypoints[i]` to `waypoints[i + 1]`.
pub struct Voyage {
    plotter: RoutePlotter,
    waypoints: Vec<Waypoint>,
    routes: Vec<Route>,
}

impl Voyage {
    pub fn new(plotter: RoutePlotter) -> Self {
        Self {
            plotter,
            waypoints: Vec::new(),
            routes: Vec::new(),
        }
    }

    fn plan_leg(&mut self, from: &Waypoint, to: &Waypoint) -> Result<Route> {
        self.plotter.plot(&[from.clone(), to.clone()])
    }

    /// Append a waypoint, planning the leg from the current last one.
    pub fn push(&mut self, waypoint: Waypoint) -> Result<()> {
        if let Some(last) = self.waypoints.last().cloned() {
            let leg = self.plan_leg(&last, &waypoint)?;
            self.routes.push(leg);
        }
        self.waypoints.push(waypoint);
        Ok(())
    }

    /// Drop the final waypoint and its incoming leg.
    pub fn pop(&mut self) -> Option<Waypoint> {
        let waypoint = self.waypoints.pop()?;
        self.routes.pop();
        Some(waypoint)
    }

    /// Move the waypoint at `index`, replanning the leg before and the
    /// leg after it.
    pub fn set(&mut self, index: usize, waypoint: Waypoint) -> Result<()> {
        if index >= self.waypoints.len() {
            return Err(VarunaError::WaypointIndex {
                index,
                len: self.waypoints.len(),
            });
        }

        let incoming = if index > 0 {
            let previous = self.waypoints[index - 1].clone();
            Some(self.plan_leg(&previous, &waypoint)?)
        } else {
            None
        };
        let outgoing = if index + 1 < self.waypoints.len() {
            let next = self.waypoints[index + 1].clone();
            Some(self.plan_leg(&waypoint, &next)?)
        } else {
            None
        };

        if let Some(leg) = incoming {
            self.routes[index - 1] = leg;
        }
        if let Some(leg) = outgoing {
            self.routes[index] = leg;
        }
        self.waypoints[index] = waypoint;
        Ok(())
    }

    /// Insert a waypoint before `index` (`index == len` appends),
    /// splitting the leg it lands on.
    pub fn insert(&mut self, index: usize, waypoint: Waypoint) -> Result<()> {
        if index > self.waypoints.len() {
            return Err(VarunaError::WaypointIndex {
                index,
                len: self.waypoints.len(),
            });
        }
        if index == self.waypoints.len() {
            return self.push(waypoint);
        }

        let incoming = if index > 0 {
            let previous = self.waypoints[index - 1].clone();
            Some(self.plan_leg(&previous, &waypoint)?)
        } else {
            None
        };
        let next = self.waypoints[index].clone();
        let outgoing = self.plan_leg(&waypoint, &next)?;

        if let Some(leg) = incoming {
            self.routes[index - 1] = leg;
            self.routes.insert(index, outgoing);
        } else {
            self.routes.insert(0, outgoing);
        }
        self.waypoints.insert(index, waypoint);
        Ok(())
    }

    /// Remove the waypoint at `index`, joining its neighbors with a
    /// freshly planned leg when both exist.
    pub fn remove(&mut self, index: usize) -> Result<Waypoint> {
        if index >= self.waypoints.len() {
            return Err(VarunaError::WaypointIndex {
                index,
                len: self.waypoints.len(),
            });
        }

        let joining = if index > 0 && index + 1 < self.waypoints.len() {
            let previous = self.waypoints[index - 1].clone();
            let next = self.waypoints[index + 1].clone();
            Some(self.plan_leg(&previous, &next)?)
        } else {
            None
        };

        let removed = self.waypoints.remove(index);
        match joining {
            Some(leg) => {
                // Two legs collapse into one.
                self.routes.remove(index);
                self.routes[index - 1] = leg;
            }
            None => {
                if index == 0 {
                    if !self.routes.is_empty() {
                        self.routes.remove(0);
                    }
                } else {
                    self.routes.pop();
                }
            }
        }
        Ok(removed)
    }

    /// Sum of all planned leg distances in kilometers.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.distance()).sum()
    }

    /// Nearest point on the planned track to `at`: (leg index, index of
    /// the track segment's first waypoint within that leg, distance).
    ///
    /// Measures against each track segment rather than the sampled
    /// points, so a position between two samples still reports its true
    /// cross-track distance.
    pub fn closest_point(&self, at: &Coordinate) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for (leg_idx, route) in self.routes.iter().enumerate() {
            for (seg_idx, pair) in route.waypoints().windows(2).enumerate() {
                let d = at.fast_geographic_distance_to_segment(
                    &pair[0].coordinate,
                    &pair[1].coordinate,
                );
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((leg_idx, seg_idx, d));
                }
            }
        }
        best
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.routes.clear();
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn plotter_mut(&mut self) -> &mut RoutePlotter {
        &mut self.plotter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::mesh::{MeshDataset, MeshDatabase};

    /// Straight line of five vertices one degree apart.
    fn line_voyage() -> Voyage {
        let db = MeshDatabase::from_dataset(MeshDataset {
            index: vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]],
            adjacent: vec![vec![1], vec![0, 2], vec![1, 3], vec![2, 4], vec![3]],
            ..Default::default()
        });
        Voyage::new(RoutePlotter::new(db, PlannerConfig::default()))
    }

    #[test]
    fn test_push_builds_legs_incrementally() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        assert_eq!(voyage.routes().len(), 0);

        voyage.push(Waypoint::new(2.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();
        assert_eq!(voyage.len(), 3);
        assert_eq!(voyage.routes().len(), 2);
        assert!(voyage.total_distance() > 0.0);
    }

    #[test]
    fn test_pop_drops_last_leg() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(2.0, 0.0)).unwrap();

        let popped = voyage.pop().unwrap();
        assert!((popped.coordinate.x - 2.0).abs() < 1e-12);
        assert_eq!(voyage.len(), 1);
        assert!(voyage.routes().is_empty());
    }

    #[test]
    fn test_set_replans_adjacent_legs_only() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(2.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();
        let distance_before = voyage.total_distance();

        voyage.set(1, Waypoint::new(3.0, 0.0)).unwrap();
        assert_eq!(voyage.routes().len(), 2);
        assert!((voyage.total_distance() - distance_before).abs() < 1.0);
        assert!((voyage.waypoints()[1].coordinate.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_insert_splits_a_leg() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();

        voyage.insert(1, Waypoint::new(2.0, 0.0)).unwrap();
        assert_eq!(voyage.len(), 3);
        assert_eq!(voyage.routes().len(), 2);
    }

    #[test]
    fn test_remove_joins_neighbors() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(2.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();

        voyage.remove(1).unwrap();
        assert_eq!(voyage.len(), 2);
        assert_eq!(voyage.routes().len(), 1);
        assert_eq!(voyage.routes()[0].segment(0).unwrap().path(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_endpoint_drops_one_leg() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(2.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();

        voyage.remove(0).unwrap();
        assert_eq!(voyage.len(), 2);
        assert_eq!(voyage.routes().len(), 1);
    }

    #[test]
    fn test_failed_edit_leaves_state_untouched() {
        let db = MeshDatabase::from_dataset(MeshDataset {
            index: vec![[0.0, 0.0], [1.0, 0.0], [50.0, 50.0]],
            adjacent: vec![vec![1], vec![0], vec![]],
            ..Default::default()
        });
        let mut voyage = Voyage::new(RoutePlotter::new(db, PlannerConfig::default()));
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(1.0, 0.0)).unwrap();

        // The isolated vertex cannot be reached.
        assert!(voyage.push(Waypoint::new(50.0, 50.0)).is_err());
        assert_eq!(voyage.len(), 2);
        assert_eq!(voyage.routes().len(), 1);

        assert!(voyage.set(1, Waypoint::new(50.0, 50.0)).is_err());
        assert!((voyage.waypoints()[1].coordinate.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_closest_point() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();

        let (leg, _, distance) = voyage
            .closest_point(&Coordinate::new(2.0, 0.1))
            .unwrap();
        assert_eq!(leg, 0);
        assert!(distance < 20.0);
    }

    #[test]
    fn test_closest_point_measures_cross_track_between_samples() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();

        // A position abeam the track between two samples reports its
        // perpendicular offset, not the distance to the nearest sample.
        let off_track = Coordinate::new(1.95, 0.1);
        let (_, _, distance) = voyage.closest_point(&off_track).unwrap();

        let nearest_sample = voyage.routes()[0]
            .waypoints()
            .iter()
            .map(|wp| off_track.fast_geographic_distance(&wp.coordinate))
            .fold(f64::MAX, f64::min);
        assert!(distance <= nearest_sample + 1e-9);
        assert!(distance < 0.2);
    }

    #[test]
    fn test_clear() {
        let mut voyage = line_voyage();
        voyage.push(Waypoint::new(0.0, 0.0)).unwrap();
        voyage.push(Waypoint::new(4.0, 0.0)).unwrap();
        voyage.clear();
        assert!(voyage.is_empty());
        assert!(voyage.routes().is_empty());
    }
}
