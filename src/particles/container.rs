//! Flat particle sets with boundary-aware geometric queries.
use super::bbox::BoundingBox;
use super::index::CellIndex;
use nalgebra::Vector3;

/// Geometric queries served to linkers and structure analysis.
///
/// The provided methods only go through [`diff`](Self::diff) and
/// [`select_enclosed`](Self::select_enclosed), so a container that redefines
/// those (e.g. with periodic boundaries) gets consistent neighbour queries.
pub trait ParticleContainer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position(&self, i: usize) -> Vector3<f64>;

    fn bounding_box(&self) -> BoundingBox;

    /// Displacement from an arbitrary point to particle `to`.
    fn diff_from(&self, from: &Vector3<f64>, to: usize) -> Vector3<f64>;

    /// Displacement from particle `from` to particle `to`.
    fn diff(&self, from: usize, to: usize) -> Vector3<f64> {
        self.diff_from(&self.position(from), to)
    }

    fn number_density(&self) -> f64;

    /// Particles far enough from the boundary to have a complete
    /// neighbourhood within `margin`.
    fn select_inside(&self, margin: f64) -> Vec<usize>;

    /// Particles whose position lies in `query`, sorted ascending.
    fn select_enclosed(&self, query: &BoundingBox) -> Vec<usize>;

    /// Particles other than `i` closer than `range` to it, sorted ascending.
    fn select_within(&self, i: usize, range: f64) -> Vec<usize> {
        let query = BoundingBox::around(&self.position(i), range);
        self.select_enclosed(&query)
            .into_iter()
            .filter(|&j| j != i && self.diff(i, j).norm() < range)
            .collect()
    }

    /// Every pair `(i, j)`, `i < j`, closer than `cutoff`.
    fn bonds(&self, cutoff: f64) -> Vec<(usize, usize)> {
        let mut bonds = Vec::new();
        for i in 0..self.len() {
            bonds.extend(
                self.select_within(i, cutoff)
                    .into_iter()
                    .filter(|&j| j > i)
                    .map(|j| (i, j)),
            );
        }
        bonds
    }
}

/// Particle positions inside a bounded domain, indexed for box queries.
#[derive(Clone, Debug)]
pub struct Particles {
    positions: Vec<Vector3<f64>>,
    bounding_box: BoundingBox,
    boundary_margin: f64,
    /// Axes along which the domain has no extent (2D data in 3D vectors).
    flat_axes: [bool; 3],
    index: CellIndex,
}

impl Particles {
    pub fn new(positions: Vec<Vector3<f64>>, bounding_box: BoundingBox) -> Self {
        let index = CellIndex::build(&positions);
        Self {
            positions,
            bounding_box,
            boundary_margin: 0.0,
            flat_axes: bounding_box.flat_axes(),
            index,
        }
    }

    /// Use the positions' own extent as the domain.
    pub fn from_positions(positions: Vec<Vector3<f64>>) -> Self {
        let bb = BoundingBox::from_points(&positions)
            .unwrap_or_else(|| BoundingBox::new(Vector3::zeros(), Vector3::zeros()));
        Self::new(positions, bb)
    }

    /// Margin excluded from each side of the domain by
    /// [`number_density`](ParticleContainer::number_density).
    pub fn with_boundary_margin(mut self, margin: f64) -> Self {
        self.boundary_margin = margin;
        self
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn boundary_margin(&self) -> f64 {
        self.boundary_margin
    }
}

impl ParticleContainer for Particles {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, i: usize) -> Vector3<f64> {
        self.positions[i]
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    fn diff_from(&self, from: &Vector3<f64>, to: usize) -> Vector3<f64> {
        self.positions[to] - from
    }

    fn diff(&self, from: usize, to: usize) -> Vector3<f64> {
        self.positions[to] - self.positions[from]
    }

    /// Count of particles in the domain shrunk by the boundary margin, over
    /// the shrunk domain's measure. Zero once the margin swallows the domain.
    fn number_density(&self) -> f64 {
        let inner = self.bounding_box.shrunk(self.boundary_margin);
        let measure = inner.measure_except(self.flat_axes);
        if measure <= 0.0 {
            return 0.0;
        }
        self.select_inside(self.boundary_margin).len() as f64 / measure
    }

    fn select_inside(&self, margin: f64) -> Vec<usize> {
        self.select_enclosed(&self.bounding_box.shrunk(margin))
    }

    fn select_enclosed(&self, query: &BoundingBox) -> Vec<usize> {
        self.index.query(&self.positions, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(xs: &[f64]) -> Particles {
        let pts = xs.iter().map(|&x| Vector3::new(x, 5.0, 5.0)).collect();
        Particles::new(pts, BoundingBox::cube(0.0, 10.0))
    }

    #[test]
    fn raw_diff_points_from_to() {
        let p = row(&[1.0, 4.0]);
        assert_eq!(p.diff(0, 1), Vector3::new(3.0, 0.0, 0.0));
        assert_eq!(p.diff_from(&Vector3::new(0.0, 5.0, 4.0), 0), Vector3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn inside_selection_excludes_margin() {
        let p = row(&[0.5, 3.0, 9.5]);
        assert_eq!(p.select_inside(1.0), vec![1]);
        assert_eq!(p.select_inside(0.0), vec![0, 1, 2]);
    }

    #[test]
    fn density_uses_shrunk_domain() {
        let p = row(&[0.5, 3.0, 6.0, 9.5]).with_boundary_margin(1.0);
        assert_eq!(p.number_density(), 2.0 / 512.0);
        let q = row(&[0.5, 3.0, 6.0, 9.5]);
        assert_eq!(q.number_density(), 4.0 / 1000.0);
        assert_eq!(p.boundary_margin(), 1.0);
        assert_eq!(p.positions().len(), 4);
    }

    #[test]
    fn margin_wider_than_thin_axis_empties_the_domain() {
        let pts = vec![Vector3::new(5.0, 5.0, 0.5), Vector3::new(2.0, 8.0, 0.5)];
        let slab = BoundingBox::new(Vector3::zeros(), Vector3::new(10.0, 10.0, 1.0));
        let p = Particles::new(pts.clone(), slab).with_boundary_margin(0.6);
        assert!(p.select_inside(0.6).is_empty());
        assert_eq!(p.number_density(), 0.0);
        let q = Particles::new(pts, slab).with_boundary_margin(6.0);
        assert_eq!(q.number_density(), 0.0);
    }

    #[test]
    fn flat_domain_density_is_per_area() {
        let pts = vec![Vector3::new(5.0, 5.0, 0.0), Vector3::new(1.0, 1.0, 0.0)];
        let sheet = BoundingBox::new(Vector3::zeros(), Vector3::new(10.0, 10.0, 0.0));
        let p = Particles::new(pts, sheet).with_boundary_margin(2.0);
        assert_eq!(p.number_density(), 1.0 / 36.0);
    }

    #[test]
    fn neighbours_and_bonds() {
        let p = row(&[1.0, 2.0, 2.5, 8.0]);
        assert_eq!(p.select_within(1, 1.1), vec![0, 2]);
        assert_eq!(p.bonds(1.1), vec![(0, 1), (1, 2)]);
        assert!(p.select_within(3, 1.0).is_empty());
    }
}
