use particle_locator::image::GridF32;

/// Isotropic Gaussian spot of unit amplitude on a zero background.
pub fn gaussian_spot<const D: usize>(dims: [usize; D], center: [f32; D], sigma: f32) -> GridF32<D> {
    assert!(sigma > 0.0, "sigma must be positive");
    GridF32::from_fn(dims, |c| {
        let r2: f32 = c
            .iter()
            .zip(center.iter())
            .map(|(&x, &x0)| (x as f32 - x0) * (x as f32 - x0))
            .sum();
        (-r2 / (2.0 * sigma * sigma)).exp()
    })
}

/// Unit-valued axis-aligned box `[lo, hi)` on every axis.
pub fn bright_box<const D: usize>(dims: [usize; D], lo: usize, hi: usize) -> GridF32<D> {
    assert!(lo < hi, "box must not be empty");
    GridF32::from_fn(dims, |c| {
        if c.iter().all(|&x| x >= lo && x < hi) {
            1.0
        } else {
            0.0
        }
    })
}
