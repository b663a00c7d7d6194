//! Periodic boundary conditions on top of a bounded particle container.
//!
//! The wrapped container is borrowed and left untouched; this layer only
//! redefines the geometric primitives:
//! - difference vectors follow the minimum-image convention,
//! - there is no boundary, so the density uses the whole primary cell and
//!   every particle counts as "inside",
//! - box queries crossing the primary cell are replicated over the 26
//!   neighbouring periodic images (plus the identity). A translated box that
//!   misses every particle costs one bounds check in the index.
use super::bbox::BoundingBox;
use super::container::ParticleContainer;
use log::warn;
use nalgebra::Vector3;

/// Wrap `v` into `(-period/2, period/2]` on every axis.
///
/// The interval is half-open on the low side: `+period/2` is kept while
/// `-period/2` becomes `+period/2`.
pub fn periodify(v: &mut Vector3<f64>, period: &Vector3<f64>) {
    for i in 0..3 {
        let half = period[i] / 2.0;
        if v[i] > half {
            v[i] -= period[i];
        }
        if v[i] <= -half {
            v[i] += period[i];
        }
    }
}

/// Read-only periodic view of a particle container.
#[derive(Debug)]
pub struct PeriodicParticles<'a, C: ?Sized> {
    inner: &'a C,
    primary_cell: BoundingBox,
    period: Vector3<f64>,
}

impl<C: ?Sized> Clone for PeriodicParticles<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for PeriodicParticles<'_, C> {}

impl<'a, C: ParticleContainer + ?Sized> PeriodicParticles<'a, C> {
    pub fn new(inner: &'a C, primary_cell: BoundingBox, period: Vector3<f64>) -> Self {
        let extents = primary_cell.extents();
        for a in 0..3 {
            let p = period[a];
            if !(p.is_finite() && p > 0.0) {
                warn!("PeriodicParticles: degenerate period {p} on axis {a}");
            } else if (p - extents[a]).abs() > 1e-9 * p {
                warn!(
                    "PeriodicParticles: period {p} on axis {a} differs from primary cell extent {}",
                    extents[a]
                );
            }
        }
        Self {
            inner,
            primary_cell,
            period,
        }
    }

    /// Use the container's bounding box as primary cell and its extents as
    /// period.
    pub fn from_cell(inner: &'a C) -> Self {
        let cell = inner.bounding_box();
        Self::new(inner, cell, cell.extents())
    }

    pub fn inner(&self) -> &'a C {
        self.inner
    }

    pub fn period(&self) -> Vector3<f64> {
        self.period
    }

    pub fn primary_cell(&self) -> BoundingBox {
        self.primary_cell
    }

    pub fn periodified(&self, mut v: Vector3<f64>) -> Vector3<f64> {
        periodify(&mut v, &self.period);
        v
    }
}

impl<'a, C: ParticleContainer + ?Sized> ParticleContainer for PeriodicParticles<'a, C> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn position(&self, i: usize) -> Vector3<f64> {
        self.inner.position(i)
    }

    fn bounding_box(&self) -> BoundingBox {
        self.primary_cell
    }

    fn diff_from(&self, from: &Vector3<f64>, to: usize) -> Vector3<f64> {
        self.periodified(self.inner.diff_from(from, to))
    }

    fn diff(&self, from: usize, to: usize) -> Vector3<f64> {
        self.periodified(self.inner.diff(from, to))
    }

    /// Particle count over the primary cell measure. No margin: a periodic
    /// system has no boundary.
    fn number_density(&self) -> f64 {
        self.len() as f64 / self.primary_cell.measure()
    }

    /// Every particle, whatever the margin.
    fn select_inside(&self, _margin: f64) -> Vec<usize> {
        (0..self.len()).collect()
    }

    fn select_enclosed(&self, query: &BoundingBox) -> Vec<usize> {
        if self.primary_cell.encloses(query) {
            return self.inner.select_enclosed(query);
        }
        let mut total = Vec::new();
        for i in -1..=1 {
            for j in -1..=1 {
                for k in -1..=1 {
                    let shift = Vector3::new(
                        i as f64 * self.period[0],
                        j as f64 * self.period[1],
                        k as f64 * self.period[2],
                    );
                    total.extend(self.inner.select_enclosed(&query.translated(&shift)));
                }
            }
        }
        total.sort_unstable();
        total.dedup();
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Particles;

    fn wrap(x: f64, period: f64) -> f64 {
        let mut v = Vector3::new(x, 0.0, 0.0);
        periodify(&mut v, &Vector3::repeat(period));
        v[0]
    }

    #[test]
    fn periodify_half_open_interval() {
        assert_eq!(wrap(6.0, 10.0), -4.0);
        assert_eq!(wrap(5.0, 10.0), 5.0);
        assert_eq!(wrap(-5.0, 10.0), 5.0);
        assert_eq!(wrap(-4.9, 10.0), -4.9);
        assert_eq!(wrap(0.0, 10.0), 0.0);
    }

    #[test]
    fn periodify_acts_per_axis() {
        let mut v = Vector3::new(6.0, -5.0, 2.0);
        periodify(&mut v, &Vector3::new(10.0, 10.0, 3.0));
        assert_eq!(v, Vector3::new(-4.0, 5.0, -1.0));
    }

    #[test]
    fn enclosed_query_inside_cell_delegates() {
        let pts = vec![Vector3::new(1.0, 1.0, 1.0), Vector3::new(5.0, 5.0, 5.0)];
        let particles = Particles::new(pts, BoundingBox::cube(0.0, 10.0));
        let periodic = PeriodicParticles::from_cell(&particles);
        let query = BoundingBox::cube(4.0, 6.0);
        assert_eq!(periodic.select_enclosed(&query), particles.select_enclosed(&query));
    }

    #[test]
    fn corner_query_reaches_all_images() {
        let pts = vec![
            Vector3::new(9.8, 9.8, 9.8),
            Vector3::new(0.1, 0.1, 0.1),
            Vector3::new(0.1, 9.9, 0.2),
            Vector3::new(5.0, 5.0, 5.0),
        ];
        let particles = Particles::new(pts, BoundingBox::cube(0.0, 10.0));
        let periodic = PeriodicParticles::from_cell(&particles);
        let query = BoundingBox::cube(9.5, 10.5);
        assert_eq!(periodic.select_enclosed(&query), vec![0, 1, 2]);
    }
}
