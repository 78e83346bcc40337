//! Route plotting orchestration.
//!
//! `RoutePlotter` ties the pieces together: snap each requested
//! waypoint to its nearest mesh vertex, run A* between consecutive
//! snaps, smooth each vertex path into a segment, and assemble the
//! legs into a route. Whole waypoint lists are cached; a repeat
//! request within the cache key's rounding tolerance skips planning
//! entirely.

use log::{debug, info};

use crate::cache::PathCache;
use crate::config::PlannerConfig;
use crate::core::Waypoint;
use crate::error::{Result, SnapTarget, VarunaError};
use crate::mesh::MeshDatabase;
use crate::planning::AStarPathfinder;
use crate::route::{Route, RouteAnnotation, RouteSegment};

pub struct RoutePlotter {
    db: MeshDatabase,
    cache: PathCache,
    config: PlannerConfig,
}

impl RoutePlotter {
    pub fn new(db: MeshDatabase, config: PlannerConfig) -> Self {
        let cache = PathCache::new(config.cache.initial_ttl);
        Self { db, cache, config }
    }

    /// Plan a route through `waypoints` in order.
    ///
    /// Fails up front on fewer than two waypoints. Any snap failure or
    /// unreachable leg aborts the whole plot; there is no partial
    /// route. A successful plot is cached under the rounded-coordinate
    /// key before it is returned.
    pub fn plot(&mut self, waypoints: &[Waypoint]) -> Result<Route> {
        if waypoints.len() < 2 {
            return Err(VarunaError::TooFewWaypoints(waypoints.len()));
        }
        if !self.db.is_ready() {
            return Err(VarunaError::MeshNotReady(
                "mesh database has no routable data".to_string(),
            ));
        }

        let key = PathCache::key_for(waypoints);
        if self.cache.contains(&key) {
            if let Some(route) = self.cache.get(&key) {
                debug!("route cache hit for {key}");
                return Ok(route.clone());
            }
        }

        let finder =
            AStarPathfinder::new(&self.db).with_max_iterations(self.config.search.max_iterations);
        let mut route = Route::new();

        for pair in waypoints.windows(2) {
            let origin = &pair[0];
            let destination = &pair[1];

            let from = self.db.nearest_vertex(&origin.coordinate).ok_or(
                VarunaError::SnapFailed {
                    target: SnapTarget::Origin,
                    lat: origin.coordinate.x,
                    lon: origin.coordinate.y,
                },
            )?;
            let to = self.db.nearest_vertex(&destination.coordinate).ok_or(
                VarunaError::SnapFailed {
                    target: SnapTarget::Destination,
                    lat: destination.coordinate.x,
                    lon: destination.coordinate.y,
                },
            )?;

            let path = finder.find_path(from.id, to.id)?;
            let segment = RouteSegment::new(
                &self.db,
                origin.clone(),
                path,
                destination.clone(),
                &self.config.route,
            )?;
            route.push(segment);
        }

        info!(
            "plotted route with {} legs, {:.1} km",
            route.len(),
            route.distance()
        );
        self.cache.insert(key, route.clone());
        Ok(route)
    }

    /// Render description for a planned route, using the configured
    /// style and including the clearance corridor.
    pub fn annotate(&self, id: impl Into<String>, route: &Route) -> RouteAnnotation {
        RouteAnnotation::from_route(id, route, self.config.style.clone()).with_corridor(route)
    }

    /// Age the route cache by one tick. Call on the interval given by
    /// `config.cache.sweep_interval_secs`.
    pub fn sweep_cache(&mut self) {
        self.cache.sweep();
    }

    pub fn database(&self) -> &MeshDatabase {
        &self.db
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshDataset;

    /// Right-angle mesh: (0,0) - (1,0) - (1,1).
    fn triangle_plotter() -> RoutePlotter {
        let db = MeshDatabase::from_dataset(MeshDataset {
            index: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
            adjacent: vec![vec![1], vec![0, 2], vec![1]],
            route_index: vec![vec![0], vec![0, 1], vec![1]],
            route_data: vec![0.1, 0.2],
            ..Default::default()
        });
        RoutePlotter::new(db, PlannerConfig::default())
    }

    #[test]
    fn test_plot_snaps_and_follows_mesh() {
        let mut plotter = triangle_plotter();
        let route = plotter
            .plot(&[Waypoint::new(0.05, -0.02), Waypoint::new(1.02, 1.01)])
            .unwrap();

        assert_eq!(route.len(), 1);
        assert_eq!(route.segment(0).unwrap().path(), &[0, 1, 2]);

        // Endpoints are the exact request, not the snapped vertices.
        let waypoints = route.waypoints();
        assert!((waypoints.first().unwrap().coordinate.x - 0.05).abs() < 1e-12);
        assert!((waypoints.last().unwrap().coordinate.y - 1.01).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_waypoints() {
        let mut plotter = triangle_plotter();
        let result = plotter.plot(&[Waypoint::new(0.0, 0.0)]);
        assert!(matches!(result, Err(VarunaError::TooFewWaypoints(1))));
    }

    #[test]
    fn test_cache_hit_double_bumps_ttl() {
        let mut plotter = triangle_plotter();
        let request = [Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 1.0)];
        let key = PathCache::key_for(&request);

        plotter.plot(&request).unwrap();
        assert_eq!(plotter.cache().ttl(&key), Some(3));

        // Hit path runs contains then get: 3 -> 4 -> 17.
        plotter.plot(&request).unwrap();
        assert_eq!(plotter.cache().ttl(&key), Some(17));
    }

    #[test]
    fn test_nearby_request_shares_cache_entry() {
        let mut plotter = triangle_plotter();
        plotter
            .plot(&[Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 1.0)])
            .unwrap();
        // Within the 2-decimal rounding of the first request.
        let route = plotter
            .plot(&[Waypoint::new(0.001, 0.002), Waypoint::new(1.001, 0.999)])
            .unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(plotter.cache().len(), 1);
    }

    #[test]
    fn test_multi_leg_plot() {
        let mut plotter = triangle_plotter();
        let route = plotter
            .plot(&[
                Waypoint::new(0.0, 0.0),
                Waypoint::new(1.0, 0.0),
                Waypoint::new(1.0, 1.0),
            ])
            .unwrap();
        assert_eq!(route.len(), 2);
        assert!(route.distance() > 0.0);
    }

    #[test]
    fn test_unreachable_leg_aborts_whole_plot() {
        let db = MeshDatabase::from_dataset(MeshDataset {
            index: vec![[0.0, 0.0], [1.0, 0.0], [50.0, 50.0]],
            adjacent: vec![vec![1], vec![0], vec![]],
            ..Default::default()
        });
        let mut plotter = RoutePlotter::new(db, PlannerConfig::default());
        let result = plotter.plot(&[
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 0.0),
            Waypoint::new(50.0, 50.0),
        ]);
        assert!(matches!(result, Err(VarunaError::NoPath { .. })));
    }

    #[test]
    fn test_empty_database_is_not_ready() {
        let mut plotter = RoutePlotter::new(
            MeshDatabase::from_dataset(MeshDataset::default()),
            PlannerConfig::default(),
        );
        let result = plotter.plot(&[Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 1.0)]);
        assert!(matches!(result, Err(VarunaError::MeshNotReady(_))));
    }

    #[test]
    fn test_sweep_expires_unused_routes() {
        let mut plotter = triangle_plotter();
        let request = [Waypoint::new(0.0, 0.0), Waypoint::new(1.0, 1.0)];
        plotter.plot(&request).unwrap();

        for _ in 0..3 {
            plotter.sweep_cache();
        }
        assert!(plotter.cache().is_empty());
    }
}
