//! A* search over the mesh database.
//!
//! The pathfinder is stateless between searches: per-search g-scores,
//! predecessors and the open/closed sets live in a scratch owned by
//! each call, never on the vertices, so searches against one shared
//! database cannot interfere.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::debug;

use crate::error::{Result, VarunaError};
use crate::mesh::{MeshDatabase, Vertex};
use crate::planning::SortedIdSet;

/// Pluggable per-edge traversal cost.
///
/// Multiplies the fast-geographic edge length during relaxation. This
/// is the seam for future cost models (clearance, weather, vessel
/// draft); the shipped implementation is [`UnitCost`].
pub trait EdgeCost {
    fn cost(&self, from: &Vertex, to: &Vertex) -> f64;
}

/// Uniform cost: every edge weighs its plain length.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCost;

impl EdgeCost for UnitCost {
    #[inline]
    fn cost(&self, _from: &Vertex, _to: &Vertex) -> f64 {
        1.0
    }
}

/// Entry in the open queue, ordered by ascending estimated total cost.
#[derive(Clone, Copy)]
struct OpenNode {
    id: u32,
    f_score: f64,
}

impl Eq for OpenNode {}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior.
        other
            .f_score
            .partial_cmp(&self.f_score)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-search scratch; dropped when the search returns, which is what
/// makes "state is fully reset afterward" hold by construction.
struct SearchScratch {
    g_score: HashMap<u32, f64>,
    came_from: HashMap<u32, u32>,
    open: SortedIdSet,
    closed: SortedIdSet,
    queue: BinaryHeap<OpenNode>,
}

impl SearchScratch {
    fn new() -> Self {
        Self {
            g_score: HashMap::new(),
            came_from: HashMap::new(),
            open: SortedIdSet::new(),
            closed: SortedIdSet::new(),
            queue: BinaryHeap::new(),
        }
    }
}

/// Stateless A* pathfinder bound to a mesh database.
pub struct AStarPathfinder<'a, C: EdgeCost = UnitCost> {
    db: &'a MeshDatabase,
    cost: C,
    max_iterations: usize,
}

impl<'a> AStarPathfinder<'a, UnitCost> {
    /// Pathfinder with unit edge cost and the default iteration cap.
    pub fn new(db: &'a MeshDatabase) -> Self {
        Self::with_cost(db, UnitCost)
    }
}

impl<'a, C: EdgeCost> AStarPathfinder<'a, C> {
    pub fn with_cost(db: &'a MeshDatabase, cost: C) -> Self {
        Self {
            db,
            cost,
            max_iterations: 100_000,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Least-cost vertex-id sequence from `start` to `goal`, in
    /// start-to-goal order.
    ///
    /// `start == goal` is a trivial single-vertex path. A disconnected
    /// pair returns [`VarunaError::NoPath`] after full exploration --
    /// never a panic -- and leaves no residue for later searches.
    pub fn find_path(&self, start: u32, goal: u32) -> Result<Vec<u32>> {
        let start_vertex = self
            .db
            .vertex_by_index(start)
            .ok_or(VarunaError::UnknownVertex(start))?;
        let goal_vertex = self
            .db
            .vertex_by_index(goal)
            .ok_or(VarunaError::UnknownVertex(goal))?;

        if start == goal {
            return Ok(vec![start]);
        }

        let mut scratch = SearchScratch::new();
        scratch.g_score.insert(start, 0.0);
        scratch.queue.push(OpenNode {
            id: start,
            f_score: start_vertex.distance_to(goal_vertex),
        });
        scratch.open.insert(start);

        let mut iterations = 0;

        while let Some(current) = scratch.queue.pop() {
            // The queue can hold stale duplicates for relaxed vertices;
            // the closed set is authoritative.
            if scratch.closed.contains(current.id) {
                continue;
            }
            scratch.open.remove(current.id);

            if current.id == goal {
                return Ok(self.reconstruct(&scratch, start, goal));
            }

            iterations += 1;
            if iterations > self.max_iterations {
                debug!(
                    "A* gave up after {iterations} iterations searching {start} -> {goal}"
                );
                break;
            }

            scratch.closed.insert(current.id);
            let current_vertex = match self.db.vertex_by_index(current.id) {
                Some(v) => v,
                None => continue,
            };
            let current_g = scratch.g_score[&current.id];

            for &neighbor_id in &current_vertex.adjacent {
                if scratch.closed.contains(neighbor_id) {
                    continue;
                }
                let Some(neighbor) = self.db.vertex_by_index(neighbor_id) else {
                    continue;
                };

                let tentative = current_g
                    + current_vertex.distance_to(neighbor)
                        * self.cost.cost(current_vertex, neighbor);

                let best = scratch
                    .g_score
                    .get(&neighbor_id)
                    .copied()
                    .unwrap_or(f64::MAX);
                if tentative >= best {
                    continue;
                }

                scratch.came_from.insert(neighbor_id, current.id);
                scratch.g_score.insert(neighbor_id, tentative);

                let f_score = tentative + neighbor.distance_to(goal_vertex);
                if !scratch.open.contains(neighbor_id) {
                    scratch.open.insert(neighbor_id);
                }
                scratch.queue.push(OpenNode {
                    id: neighbor_id,
                    f_score,
                });
            }
        }

        Err(VarunaError::NoPath {
            from: start,
            to: goal,
        })
    }

    /// Follow predecessor links from the goal back to the start.
    fn reconstruct(&self, scratch: &SearchScratch, start: u32, goal: u32) -> Vec<u32> {
        let mut path = vec![goal];
        let mut current = goal;
        while current != start {
            match scratch.came_from.get(&current) {
                Some(&previous) => {
                    path.push(previous);
                    current = previous;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}
