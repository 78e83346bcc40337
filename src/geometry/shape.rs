//! Geometric object variants.
//!
//! Shapes are a closed set; dispatch is by pattern matching. Shared
//! fields live in [`ShapeCommon`]. Center and bounding radius are
//! derived once at construction and never recomputed -- the spatial
//! tree's invariants depend on them staying fixed after insertion.

use serde::{Deserialize, Serialize};

use crate::core::Coordinate;

/// Fields shared by every shape variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShapeCommon {
    /// Center of the shape (polygon centroid, line midpoint, ...).
    pub center: Coordinate,
    /// Bounding radius around the center.
    pub radius: f64,
    /// Draw order hint for embedding renderers.
    #[serde(default)]
    pub z_order: i32,
    /// Visibility flag for embedding renderers.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Opaque payload carried through serialization untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

fn default_visible() -> bool {
    true
}

impl ShapeCommon {
    fn at(center: Coordinate, radius: f64) -> Self {
        Self {
            center,
            radius,
            z_order: 0,
            visible: true,
            payload: None,
        }
    }
}

/// A geometric object.
///
/// The serialized form is adjacently tagged (`{"type": ..., "data":
/// ...}`) to match the object-cache wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Shape {
    Point {
        #[serde(flatten)]
        common: ShapeCommon,
    },
    Circle {
        #[serde(flatten)]
        common: ShapeCommon,
    },
    Line {
        #[serde(flatten)]
        common: ShapeCommon,
        start: Coordinate,
        end: Coordinate,
    },
    Polygon {
        #[serde(flatten)]
        common: ShapeCommon,
        points: Vec<Coordinate>,
    },
    PolyLine {
        #[serde(flatten)]
        common: ShapeCommon,
        points: Vec<Coordinate>,
    },
}

impl Shape {
    /// A dimensionless point.
    pub fn point(center: Coordinate) -> Self {
        Shape::Point {
            common: ShapeCommon::at(center, 0.0),
        }
    }

    /// A circle with the given radius.
    pub fn circle(center: Coordinate, radius: f64) -> Self {
        Shape::Circle {
            common: ShapeCommon::at(center, radius),
        }
    }

    /// A line segment. Center = midpoint, radius = half the length.
    pub fn line(start: Coordinate, end: Coordinate) -> Self {
        let delta = end.sub(&start);
        let center = start.add(&delta.scale(0.5));
        Shape::Line {
            common: ShapeCommon::at(center, delta.length() / 2.0),
            start,
            end,
        }
    }

    /// A closed polygon. Center = signed-area centroid, radius = max
    /// vertex distance from the centroid.
    pub fn polygon(points: Vec<Coordinate>) -> Self {
        let center = polygon_centroid(&points);
        let radius = max_vertex_distance(&center, &points);
        Shape::Polygon {
            common: ShapeCommon::at(center, radius),
            points,
        }
    }

    /// An open polyline. Center = vertex mean, radius = max vertex
    /// distance from the mean.
    pub fn polyline(points: Vec<Coordinate>) -> Self {
        let center = vertex_mean(&points);
        let radius = max_vertex_distance(&center, &points);
        Shape::PolyLine {
            common: ShapeCommon::at(center, radius),
            points,
        }
    }

    pub fn common(&self) -> &ShapeCommon {
        match self {
            Shape::Point { common }
            | Shape::Circle { common }
            | Shape::Line { common, .. }
            | Shape::Polygon { common, .. }
            | Shape::PolyLine { common, .. } => common,
        }
    }

    pub fn common_mut(&mut self) -> &mut ShapeCommon {
        match self {
            Shape::Point { common }
            | Shape::Circle { common }
            | Shape::Line { common, .. }
            | Shape::Polygon { common, .. }
            | Shape::PolyLine { common, .. } => common,
        }
    }

    #[inline]
    pub fn center(&self) -> Coordinate {
        self.common().center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.common().radius
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.common().visible
    }

    /// Variant tag used in the serialized object-cache format.
    pub fn tag(&self) -> &'static str {
        match self {
            Shape::Point { .. } => "Point",
            Shape::Circle { .. } => "Circle",
            Shape::Line { .. } => "Line",
            Shape::Polygon { .. } => "Polygon",
            Shape::PolyLine { .. } => "PolyLine",
        }
    }

    /// Check whether a point lies inside this shape.
    ///
    /// Polygons use an even-odd ray cast over their vertices; every
    /// other variant tests against the bounding disc.
    pub fn contains_point(&self, p: &Coordinate) -> bool {
        match self {
            Shape::Polygon { points, .. } => point_in_polygon(p, points),
            _ => self.center().distance(p) <= self.radius(),
        }
    }
}

/// Signed-area centroid of a closed polygon.
fn polygon_centroid(points: &[Coordinate]) -> Coordinate {
    if points.is_empty() {
        return Coordinate::default();
    }
    if points.len() < 3 {
        return vertex_mean(points);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut signed_area = 0.0;

    for i in 0..points.len() {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % points.len()];
        let a = p0.x * p1.y - p1.x * p0.y;
        signed_area += a;
        cx += (p0.x + p1.x) * a;
        cy += (p0.y + p1.y) * a;
    }

    if signed_area == 0.0 {
        // Degenerate (collinear) ring
        return vertex_mean(points);
    }

    Coordinate::new(cx / (3.0 * signed_area), cy / (3.0 * signed_area))
}

fn vertex_mean(points: &[Coordinate]) -> Coordinate {
    if points.is_empty() {
        return Coordinate::default();
    }
    let mut sum = Coordinate::default();
    for p in points {
        sum = sum.add(p);
    }
    sum.scale(1.0 / points.len() as f64)
}

fn max_vertex_distance(center: &Coordinate, points: &[Coordinate]) -> f64 {
    points
        .iter()
        .map(|p| center.distance(p))
        .fold(0.0, f64::max)
}

/// Even-odd ray cast point-in-polygon test.
fn point_in_polygon(p: &Coordinate, points: &[Coordinate]) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);

    for i in 0..points.len() {
        let pi = &points[i];
        let pj = &points[j];
        if ((pi.y > p.y) != (pj.y > p.y))
            && (p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}
