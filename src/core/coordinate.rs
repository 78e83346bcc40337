//! 2D geographic coordinate and distance metrics.
//!
//! The convention throughout the crate is `x` = latitude, `y` =
//! longitude, both in degrees. Three distance metrics coexist:
//!
//! - [`Coordinate::distance`]: planar Euclidean, for tree bookkeeping
//! - [`Coordinate::geographic_distance`]: haversine great-circle (km),
//!   for reported route distances
//! - [`Coordinate::fast_geographic_distance`]: cheap approximation used
//!   in hot paths (search cost, heuristic, nearest-candidate ranking)

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees to radians.
const DEG_PER_RADIAN: f64 = 0.0174532925;

/// Approximate great-circle length of one degree, tuned against the
/// haversine metric at mid latitudes. Used by the fast distance only.
const DEG_LENGTH: f64 = 1.1025;

/// A 2D geographic point. `x` = latitude, `y` = longitude, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn add(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new(self.x + other.x, self.y + other.y)
    }

    #[inline]
    pub fn sub(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Coordinate {
        Coordinate::new(self.x * factor, self.y * factor)
    }

    #[inline]
    pub fn dot(&self, other: &Coordinate) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Clockwise perpendicular of this vector.
    #[inline]
    pub fn perpendicular(&self) -> Coordinate {
        Coordinate::new(self.y, -self.x)
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector with the same direction, or the zero vector unchanged.
    pub fn normalized(&self) -> Coordinate {
        let len = self.length();
        if len == 0.0 {
            *self
        } else {
            Coordinate::new(self.x / len, self.y / len)
        }
    }

    /// Planar Euclidean distance in degrees.
    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Great-circle (haversine) distance in kilometers.
    pub fn geographic_distance(&self, other: &Coordinate) -> f64 {
        let d_lat = (other.x - self.x).to_radians();
        let d_lon = (other.y - self.y).to_radians();
        let lat1 = self.x.to_radians();
        let lat2 = other.x.to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Fast but less accurate geographic distance.
    ///
    /// Scales the longitude delta by the cosine of `other`'s latitude
    /// and applies a flat degree-length factor. Callers that feed the
    /// same metric on both sides of a comparison (search ranking,
    /// nearest-candidate selection) do not pay for the error.
    #[inline]
    pub fn fast_geographic_distance(&self, other: &Coordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = (self.y - other.y) * (other.x * DEG_PER_RADIAN).cos();
        (dx * dx + dy * dy).sqrt() * DEG_LENGTH
    }

    /// Planar distance from this point to the finite segment `a`-`b`.
    pub fn distance_to_segment(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let projected = self.project_onto_segment(a, b);
        self.distance(&projected)
    }

    /// Fast geographic distance from this point to the finite segment
    /// `a`-`b`, scaling the longitude delta by the cosine of the
    /// projected point's latitude.
    pub fn fast_geographic_distance_to_segment(&self, a: &Coordinate, b: &Coordinate) -> f64 {
        let projected = self.project_onto_segment(a, b);
        let dx = self.x - projected.x;
        let dy = (self.y - projected.y) * (projected.x * DEG_PER_RADIAN).cos();
        (dx * dx + dy * dy).sqrt() * DEG_LENGTH
    }

    /// Closest point on the finite segment `a`-`b` to this point.
    ///
    /// The projection parameter is clamped to `[0, 1]`. A degenerate
    /// segment (`a` == `b`, denominator zero) snaps to the far endpoint
    /// `b`.
    pub fn project_onto_segment(&self, a: &Coordinate, b: &Coordinate) -> Coordinate {
        let ab = b.sub(a);
        let ab2 = ab.dot(&ab);
        if ab2 == 0.0 {
            return *b;
        }

        let t = (self.sub(a).dot(&ab) / ab2).clamp(0.0, 1.0);
        a.add(&ab.scale(t))
    }

    /// Fixed-precision identity key, two decimals per component.
    ///
    /// Waypoints closer than ~1 km collapse onto the same key, which is
    /// what the path cache wants: tiny drags of a waypoint reuse the
    /// cached route.
    pub fn hash_key(&self) -> String {
        format!("{:.2}x{:.2}", self.x, self.y)
    }
}
