//! Uniform-cell spatial index over particle positions.
//!
//! The grid spans the positions' own bounding box with roughly one particle
//! per cell. Queries that miss that box return immediately, which keeps
//! speculative queries (e.g. periodic images of a box) cheap.
use super::bbox::BoundingBox;
use nalgebra::Vector3;

#[derive(Clone, Debug, Default)]
pub struct CellIndex {
    bounds: Option<BoundingBox>,
    counts: [usize; 3],
    cell_size: [f64; 3],
    cells: Vec<Vec<usize>>,
}

impl CellIndex {
    pub fn build(positions: &[Vector3<f64>]) -> Self {
        let Some(bounds) = BoundingBox::from_points(positions) else {
            return Self::default();
        };
        let per_axis = (positions.len() as f64).cbrt().ceil().max(1.0) as usize;
        let extents = bounds.extents();
        let mut counts = [1usize; 3];
        let mut cell_size = [1.0f64; 3];
        for a in 0..3 {
            if extents[a] > 0.0 {
                counts[a] = per_axis;
                cell_size[a] = extents[a] / per_axis as f64;
            }
        }
        let mut index = Self {
            bounds: Some(bounds),
            counts,
            cell_size,
            cells: vec![Vec::new(); counts.iter().product()],
        };
        for (i, p) in positions.iter().enumerate() {
            let c = index.cell_coords(p);
            let flat = index.flat(c);
            index.cells[flat].push(i);
        }
        index
    }

    /// Indices of `positions` inside `query`, sorted ascending.
    pub fn query(&self, positions: &[Vector3<f64>], query: &BoundingBox) -> Vec<usize> {
        let Some(bounds) = self.bounds else {
            return Vec::new();
        };
        if !bounds.intersects(query) {
            return Vec::new();
        }
        let lo = self.cell_coords(&query.min);
        let hi = self.cell_coords(&query.max);
        let mut found = Vec::new();
        for z in lo[2]..=hi[2] {
            for y in lo[1]..=hi[1] {
                for x in lo[0]..=hi[0] {
                    let cell = &self.cells[self.flat([x, y, z])];
                    found.extend(cell.iter().copied().filter(|&i| query.contains(&positions[i])));
                }
            }
        }
        found.sort_unstable();
        found
    }

    fn cell_coords(&self, p: &Vector3<f64>) -> [usize; 3] {
        let origin = self.bounds.map(|b| b.min).unwrap_or_else(Vector3::zeros);
        let mut c = [0usize; 3];
        for a in 0..3 {
            let t = ((p[a] - origin[a]) / self.cell_size[a]).floor();
            c[a] = if t.is_nan() || t < 0.0 {
                0
            } else {
                (t as usize).min(self.counts[a] - 1)
            };
        }
        c
    }

    fn flat(&self, c: [usize; 3]) -> usize {
        c[0] + self.counts[0] * (c[1] + self.counts[1] * c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice(n: usize) -> Vec<Vector3<f64>> {
        let mut out = Vec::new();
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    out.push(Vector3::new(x as f64, y as f64, z as f64));
                }
            }
        }
        out
    }

    #[test]
    fn query_matches_brute_force() {
        let pts = lattice(6);
        let index = CellIndex::build(&pts);
        let query = BoundingBox::new(Vector3::new(1.5, 0.0, 2.0), Vector3::new(3.0, 2.5, 4.5));
        let expected: Vec<usize> = (0..pts.len()).filter(|&i| query.contains(&pts[i])).collect();
        assert_eq!(index.query(&pts, &query), expected);
        assert_eq!(expected.len(), 2 * 3 * 3);
    }

    #[test]
    fn distant_query_is_empty() {
        let pts = lattice(3);
        let index = CellIndex::build(&pts);
        assert!(index.query(&pts, &BoundingBox::cube(10.0, 11.0)).is_empty());
        assert!(CellIndex::build(&[]).query(&[], &BoundingBox::cube(0.0, 1.0)).is_empty());
    }

    #[test]
    fn flat_positions_index() {
        let pts: Vec<_> = (0..10).map(|i| Vector3::new(i as f64, 0.5 * i as f64, 2.0)).collect();
        let index = CellIndex::build(&pts);
        let query = BoundingBox::new(Vector3::new(2.0, 0.0, 0.0), Vector3::new(5.0, 10.0, 5.0));
        assert_eq!(index.query(&pts, &query), vec![2, 3, 4, 5]);
    }
}
