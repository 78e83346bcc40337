//! Adaptive quad-partition tree over geometric objects.
//!
//! Nodes live in an arena and address each other by index; each node
//! holds up to four children keyed by a 2-bit quadrant code relative to
//! its own center. Insertion order fixes the tree shape -- there is no
//! rebalancing, which is acceptable because the mesh is built once and
//! queried many times, and keeps query results deterministic.
//!
//! Invariant maintained on every insertion: a node's bounding radius
//! covers every descendant,
//! `node.radius >= distance(node.center, desc.center) + desc.radius`.

use crate::core::Coordinate;

/// One arena node: an object reference plus quadrant children.
#[derive(Debug, Clone)]
struct Node {
    center: Coordinate,
    /// Enlarged bounding radius covering the whole subtree.
    radius: f64,
    /// Index into the owning collection's object list. `None` only for
    /// the synthetic root, which is never reported by queries.
    object: Option<usize>,
    children: [Option<usize>; 4],
}

impl Node {
    fn new(center: Coordinate, radius: f64, object: Option<usize>) -> Self {
        Self {
            center,
            radius,
            object,
            children: [None; 4],
        }
    }
}

/// Unbalanced spatial tree with radius and line-proximity queries.
#[derive(Debug, Clone)]
pub struct SpatialTree {
    nodes: Vec<Node>,
}

impl SpatialTree {
    /// Create an empty tree: a synthetic root at the origin with zero
    /// radius and no object.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Coordinate::default(), 0.0, None)],
        }
    }

    /// Number of inserted objects (the root does not count).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every object, keeping only the synthetic root.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0].radius = 0.0;
        self.nodes[0].children = [None; 4];
    }

    /// Insert an object with the given center and bounding radius.
    ///
    /// Walks down from the root picking the quadrant of the offset from
    /// each ancestor's center, enlarging every ancestor's bounding
    /// radius along the path, and parks the new node in the first empty
    /// slot.
    pub fn insert(&mut self, object: usize, center: Coordinate, radius: f64) {
        let id = self.nodes.len();
        self.nodes.push(Node::new(center, radius, Some(object)));

        let mut current = 0;
        loop {
            let dx = self.nodes[current].center.x - center.x;
            let dy = self.nodes[current].center.y - center.y;
            let quadrant = (dx >= 0.0) as usize + 2 * ((dy >= 0.0) as usize);

            let offset = (dx * dx + dy * dy).sqrt();
            let node = &mut self.nodes[current];
            node.radius = node.radius.max(offset + radius);

            match node.children[quadrant] {
                None => {
                    node.children[quadrant] = Some(id);
                    return;
                }
                Some(child) => current = child,
            }
        }
    }

    /// Collect objects whose bounding sphere intersects the query disk.
    ///
    /// Reports every child whose enlarged bound touches the disk, then
    /// recurses into it. Results are a superset of true intersections;
    /// callers must post-filter for exact containment.
    pub fn find_intersecting(&self, radius: f64, at: &Coordinate, out: &mut Vec<usize>) {
        self.find_intersecting_from(0, radius, at, out);
    }

    fn find_intersecting_from(&self, from: usize, radius: f64, at: &Coordinate, out: &mut Vec<usize>) {
        for slot in self.nodes[from].children {
            let Some(child) = slot else { continue };
            let node = &self.nodes[child];
            if node.center.distance(at) <= node.radius + radius {
                if let Some(object) = node.object {
                    out.push(object);
                }
                self.find_intersecting_from(child, radius, at, out);
            }
        }
    }

    /// Collect objects within `radius` of the finite segment `p0`-`p1`.
    ///
    /// A child is reported only when its own object's center is within
    /// the threshold, but its subtree is always walked while the
    /// enlarged bound still intersects the corridor -- a far-off parent
    /// can shadow close descendants otherwise.
    pub fn find_along_segment(
        &self,
        radius: f64,
        p0: &Coordinate,
        p1: &Coordinate,
        out: &mut Vec<usize>,
    ) {
        self.find_along_segment_from(0, radius, p0, p1, out);
    }

    fn find_along_segment_from(
        &self,
        from: usize,
        radius: f64,
        p0: &Coordinate,
        p1: &Coordinate,
        out: &mut Vec<usize>,
    ) {
        for slot in self.nodes[from].children {
            let Some(child) = slot else { continue };
            let node = &self.nodes[child];
            let offset = node.center.distance_to_segment(p0, p1);

            if offset <= node.radius + radius {
                if offset < radius {
                    if let Some(object) = node.object {
                        out.push(object);
                    }
                }
                self.find_along_segment_from(child, radius, p0, p1, out);
            }
        }
    }
}

impl Default for SpatialTree {
    fn default() -> Self {
        Self::new()
    }
}
