//! Object cache: owns the flat shape list and its spatial tree.
//!
//! The cache is the single entry point for spatial queries over a set
//! of shapes. It keeps the backing list and the tree in sync, and
//! round-trips through a tagged-union JSON format where unknown variant
//! tags are skipped with a logged warning instead of failing the load.

use log::warn;
use serde::Deserialize;

use crate::core::Coordinate;
use crate::error::Result;
use crate::geometry::{Shape, SpatialTree};

/// Expanding-ring start radius for nearest-object search, in degrees.
pub const NEAREST_START_RADIUS: f64 = 4.0;

/// Expanding-ring cap; a search that finds nothing inside this radius
/// gives up.
pub const NEAREST_MAX_RADIUS: f64 = 180.0;

#[derive(Deserialize)]
struct TaggedShape {
    #[serde(rename = "type")]
    tag: String,
    data: serde_json::Value,
}

/// Cache of geometric objects with spatial search.
#[derive(Debug, Clone, Default)]
pub struct GeometryCache {
    shapes: Vec<Shape>,
    tree: SpatialTree,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape; it is indexed immediately.
    pub fn add(&mut self, shape: Shape) {
        let id = self.shapes.len();
        self.tree.insert(id, shape.center(), shape.radius());
        self.shapes.push(shape);
    }

    /// Drop all shapes and the index.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.tree.clear();
    }

    /// Reinsert every held shape into a fresh tree.
    pub fn rebuild(&mut self) {
        self.tree.clear();
        for (id, shape) in self.shapes.iter().enumerate() {
            self.tree.insert(id, shape.center(), shape.radius());
        }
    }

    /// The backing shape list, in insertion order.
    pub fn list(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shape by insertion index.
    pub fn by_index(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Index of the closest shape to `at`, by expanding-ring search.
    ///
    /// Starts at [`NEAREST_START_RADIUS`] and doubles until at least
    /// one candidate turns up or the ring exceeds
    /// [`NEAREST_MAX_RADIUS`], then picks the candidate with the least
    /// fast-geographic distance *within that ring's result set*. This
    /// is deliberately not a guaranteed global nearest neighbor: the
    /// early stop is part of the behavior downstream route snapping is
    /// tuned against.
    pub fn find_nearest_index(&self, at: &Coordinate) -> Option<usize> {
        let mut found = Vec::new();
        let mut radius = NEAREST_START_RADIUS;

        while found.is_empty() && radius < NEAREST_MAX_RADIUS {
            self.tree.find_intersecting(radius, at, &mut found);
            radius *= 2.0;
        }

        let mut best = None;
        let mut best_distance = f64::MAX;
        for id in found {
            let d = self.shapes[id].center().fast_geographic_distance(at);
            if d < best_distance {
                best_distance = d;
                best = Some(id);
            }
        }
        best
    }

    /// The closest shape to `at`; see [`GeometryCache::find_nearest_index`].
    pub fn find_nearest(&self, at: &Coordinate) -> Option<&Shape> {
        self.find_nearest_index(at).map(|id| &self.shapes[id])
    }

    /// Shapes whose area contains `at`, found through a radius query.
    ///
    /// The tree reports by intersecting bounding spheres; the result is
    /// post-filtered with each shape's own containment test.
    pub fn find_within_radius(&self, radius: f64, at: &Coordinate) -> Vec<&Shape> {
        self.find_within_radius_raw(radius, at)
            .into_iter()
            .map(|id| &self.shapes[id])
            .filter(|shape| shape.contains_point(at))
            .collect()
    }

    /// Raw (unfiltered) radius-query result: indices of shapes whose
    /// bounding sphere intersects the query disk.
    pub fn find_within_radius_raw(&self, radius: f64, at: &Coordinate) -> Vec<usize> {
        let mut out = Vec::new();
        self.tree.find_intersecting(radius, at, &mut out);
        out
    }

    /// Shapes within `radius` of the finite segment `p0`-`p1`.
    pub fn find_along_line(&self, radius: f64, p0: &Coordinate, p1: &Coordinate) -> Vec<&Shape> {
        let mut out = Vec::new();
        self.tree.find_along_segment(radius, p0, p1, &mut out);
        out.into_iter().map(|id| &self.shapes[id]).collect()
    }

    /// Serialize to a JSON array of `{type, data}` records.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.shapes)?)
    }

    /// Rebuild the cache from a serialized string.
    ///
    /// Records with an unknown `type` tag, or which fail to parse, are
    /// skipped with a warning; everything else loads.
    pub fn deserialize(&mut self, data: &str) -> Result<()> {
        self.clear();
        let records: Vec<serde_json::Value> = serde_json::from_str(data)?;

        for record in records {
            let tagged: TaggedShape = match serde_json::from_value(record.clone()) {
                Ok(t) => t,
                Err(e) => {
                    warn!("Skipping malformed geometry record: {e}");
                    continue;
                }
            };

            match tagged.tag.as_str() {
                "Point" | "Circle" | "Line" | "Polygon" | "PolyLine" => {
                    match serde_json::from_value::<Shape>(record) {
                        Ok(shape) => self.add(shape),
                        Err(e) => warn!("Skipping unreadable {} record: {e}", tagged.tag),
                    }
                }
                other => warn!("Skipping geometry record with unknown type: {other}"),
            }
        }

        Ok(())
    }
}
