//! Axis-aligned 3D boxes used for enclosure queries.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Closed axis-aligned box `[min, max]` on every axis.
///
/// Flat data (2D particles stored with a constant z) uses a zero extent on
/// that axis; [`measure`](Self::measure) then returns the area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BoundingBox {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Cube `[lo, hi]³`.
    pub fn cube(lo: f64, hi: f64) -> Self {
        Self::new(Vector3::repeat(lo), Vector3::repeat(hi))
    }

    /// Smallest box holding every point, `None` without points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vector3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bb = Self::new(first, first);
        for p in iter {
            bb.min = bb.min.inf(p);
            bb.max = bb.max.sup(p);
        }
        Some(bb)
    }

    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Axes with zero (or negative) extent.
    pub fn flat_axes(&self) -> [bool; 3] {
        let e = self.extents();
        [e[0] <= 0.0, e[1] <= 0.0, e[2] <= 0.0]
    }

    /// Product of the positive extents: volume, or area for flat boxes.
    pub fn measure(&self) -> f64 {
        let flat = self.flat_axes();
        if flat.iter().all(|&f| f) {
            return 0.0;
        }
        self.measure_except(flat)
    }

    /// Product of the extents of every axis not marked in `flat`. An inverted
    /// axis counts as empty, so the result is 0.
    pub fn measure_except(&self, flat: [bool; 3]) -> f64 {
        let e = self.extents();
        (0..3).filter(|&a| !flat[a]).map(|a| e[a].max(0.0)).product()
    }

    pub fn contains(&self, p: &Vector3<f64>) -> bool {
        (0..3).all(|a| self.min[a] <= p[a] && p[a] <= self.max[a])
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &BoundingBox) -> bool {
        (0..3).all(|a| self.min[a] <= other.min[a] && other.max[a] <= self.max[a])
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        (0..3).all(|a| self.min[a] <= other.max[a] && other.min[a] <= self.max[a])
    }

    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Move every face with a positive extent inwards by `margin`. Flat axes
    /// are left alone.
    pub fn shrunk(&self, margin: f64) -> Self {
        let mut out = *self;
        for a in 0..3 {
            if self.max[a] > self.min[a] {
                out.min[a] += margin;
                out.max[a] -= margin;
            }
        }
        out
    }

    /// Box of half-width `range` around `center`.
    pub fn around(center: &Vector3<f64>, range: f64) -> Self {
        let r = Vector3::repeat(range);
        Self::new(center - r, center + r)
    }
}
