//! Multi-leg route assembled by the plotter.

use crate::core::Waypoint;
use crate::route::RouteSegment;

/// Ordered sequence of planned legs, one per requested waypoint pair.
#[derive(Debug, Clone, Default)]
pub struct Route {
    segments: Vec<RouteSegment>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: RouteSegment) {
        self.segments.push(segment);
    }

    pub fn segment(&self, index: usize) -> Option<&RouteSegment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total great-circle length over all legs in kilometers.
    pub fn distance(&self) -> f64 {
        self.segments.iter().map(|s| s.distance()).sum()
    }

    /// Concatenated waypoint sequence with leg joints deduplicated:
    /// each leg ends where the next begins, so the shared point is
    /// emitted once.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        let mut out: Vec<Waypoint> = Vec::new();
        for segment in &self.segments {
            for wp in segment.waypoints() {
                if let Some(last) = out.last() {
                    if last.coordinate.distance(&wp.coordinate) < 1e-9 {
                        continue;
                    }
                }
                out.push(wp.clone());
            }
        }
        out
    }
}
