//! Separable Gaussian blur over grids of any dimensionality.
//!
//! Kernels are sampled Gaussians truncated at `ceil(3σ)` and normalised to
//! unit sum. Border samples clamp to the grid extents.
use crate::image::GridF32;

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Sampled, normalised Gaussian kernel.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    pub fn new(sigma: f32) -> Self {
        if sigma <= 0.0 {
            return Self { taps: vec![1.0] };
        }
        let radius = (3.0 * sigma).ceil().max(1.0) as isize;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f32> = (-radius..=radius)
            .map(|k| (-((k * k) as f32) / denom).exp())
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps }
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve `src` with `filter` along `axis`, writing into `dst`.
///
/// `dst` is reshaped to `src.dims`.
pub fn filter_axis<const D: usize>(
    src: &GridF32<D>,
    dst: &mut GridF32<D>,
    axis: usize,
    filter: &dyn SeparableFilter,
) {
    dst.reset(src.dims);
    let n = src.dims[axis];
    if n == 0 || src.is_empty() {
        return;
    }
    let taps = filter.taps();
    let radius = (taps.len() / 2) as isize;
    let stride = src.strides()[axis];
    for (i, out) in dst.data.iter_mut().enumerate() {
        let c = (i / stride) % n;
        let base = i - c * stride;
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let j = clamp_index(c as isize + k as isize - radius, n);
            acc += tap * src.data[base + j * stride];
        }
        *out = acc;
    }
}

/// Blur `src` by a Gaussian of standard deviation `sigma` along every axis.
///
/// `tmp` is scratch space; both `dst` and `tmp` are reshaped as needed. A
/// non-positive `sigma` copies `src`.
pub fn gaussian_blur_into<const D: usize>(
    src: &GridF32<D>,
    dst: &mut GridF32<D>,
    tmp: &mut GridF32<D>,
    sigma: f32,
) {
    dst.reset(src.dims);
    dst.data.copy_from_slice(&src.data);
    if sigma <= 0.0 {
        return;
    }
    let kernel = GaussianKernel::new(sigma);
    for axis in 0..D {
        filter_axis(dst, tmp, axis, &kernel);
        std::mem::swap(dst, tmp);
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageF32, SignalF32};

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        let k = GaussianKernel::new(1.3);
        let taps = k.taps();
        assert_eq!(taps.len(), 2 * 4 + 1);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-7);
        }
    }

    #[test]
    fn blur_preserves_constant_grid() {
        let src = ImageF32::from_fn([9, 7], |_| 0.5);
        let mut dst = ImageF32::new([1, 1]);
        let mut tmp = ImageF32::new([1, 1]);
        gaussian_blur_into(&src, &mut dst, &mut tmp, 2.0);
        assert_eq!(dst.dims, [9, 7]);
        assert!(dst.data.iter().all(|&v| (v - 0.5).abs() < 1e-5));
    }

    #[test]
    fn blur_spreads_an_impulse_along_every_axis() {
        let mut src = ImageF32::new([11, 11]);
        src.set([5, 5], 1.0);
        let mut dst = ImageF32::new([0, 0]);
        let mut tmp = ImageF32::new([0, 0]);
        gaussian_blur_into(&src, &mut dst, &mut tmp, 1.0);
        let centre = dst.get([5, 5]);
        assert!(centre < 1.0);
        assert!((dst.get([4, 5]) - dst.get([5, 4])).abs() < 1e-6);
        assert!(dst.get([4, 5]) < centre);
        let sum: f32 = dst.data.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_sigma_copies() {
        let src = SignalF32::from_fn([5], |[x]| x as f32);
        let mut dst = SignalF32::new([0]);
        let mut tmp = SignalF32::new([0]);
        gaussian_blur_into(&src, &mut dst, &mut tmp, 0.0);
        assert_eq!(dst, src);
    }
}
