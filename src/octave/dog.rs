//! Difference-of-Gaussian blob detector for a single octave.
//!
//! Design
//! - `n + 3` Gaussian layers with blur `σ_i = k·2^(i/n)` are built
//!   incrementally, each from the previous one.
//! - `n + 2` DoG layers `G_{i+1} − G_i` approximate the scale-normalised
//!   Laplacian. Bright blobs are DoG minima.
//! - Layers `1..=n` are searched for voxels strictly below their
//!   `3^(D+1) − 1` neighbours in space and scale. Border voxels are skipped.
//! - Position and scale are refined by independent parabola fits along each
//!   axis, clamped to half a sample.
//!
//! The layer `G_n` carries blur `2k` and seeds the next octave once halved.
use super::filters::gaussian_blur_into;
use super::options::OctaveOptions;
use super::{Blob, OctaveDetector};
use crate::image::GridF32;

/// Blur assumed to be already present in a raw camera image.
const PRIOR_BLUR: f32 = 0.5;
const EPS: f32 = 1e-12;

#[derive(Clone, Debug)]
pub struct DogOctave<const D: usize> {
    dims: [usize; D],
    options: OctaveOptions,
    layers_g: Vec<GridF32<D>>,
    layers_dog: Vec<GridF32<D>>,
    tmp: GridF32<D>,
}

impl<const D: usize> DogOctave<D> {
    pub fn new(dims: [usize; D], options: OctaveOptions) -> Self {
        let options = OctaveOptions {
            n_layers: options.n_layers.max(1),
            ..options
        };
        let n = options.n_layers;
        Self {
            dims,
            options,
            layers_g: (0..n + 3).map(|_| GridF32::new(dims)).collect(),
            layers_dog: (0..n + 2).map(|_| GridF32::new(dims)).collect(),
            tmp: GridF32::new(dims),
        }
    }

    pub fn n_layers(&self) -> usize {
        self.options.n_layers
    }

    /// Blur of Gaussian layer `i` relative to the octave's pixel grid.
    pub fn layer_sigma(&self, i: f32) -> f32 {
        self.options.radius_preblur * 2f32.powf(i / self.options.n_layers as f32)
    }

    pub fn gaussian_layer(&self, i: usize) -> &GridF32<D> {
        &self.layers_g[i]
    }

    pub fn dog_layer(&self, i: usize) -> &GridF32<D> {
        &self.layers_dog[i]
    }

    fn fill_layers(&mut self, image: &GridF32<D>, full_cascade: bool) {
        let k = self.options.radius_preblur;
        let first_sigma = if full_cascade {
            (k * k - PRIOR_BLUR * PRIOR_BLUR).max(0.0).sqrt()
        } else {
            0.0
        };
        gaussian_blur_into(image, &mut self.layers_g[0], &mut self.tmp, first_sigma);

        for i in 1..self.layers_g.len() {
            let prev = self.layer_sigma((i - 1) as f32);
            let next = self.layer_sigma(i as f32);
            let step = (next * next - prev * prev).max(0.0).sqrt();
            let tmp = &mut self.tmp;
            let (done, todo) = self.layers_g.split_at_mut(i);
            gaussian_blur_into(&done[i - 1], &mut todo[0], tmp, step);
        }

        for (i, dog) in self.layers_dog.iter_mut().enumerate() {
            let lower = &self.layers_g[i];
            let upper = &self.layers_g[i + 1];
            dog.reset(lower.dims);
            for ((d, &a), &b) in dog.data.iter_mut().zip(&lower.data).zip(&upper.data) {
                *d = b - a;
            }
        }
    }

    fn find_minima(&self) -> Vec<Blob<D>> {
        let dims = self.layers_dog[0].dims;
        if dims.iter().any(|&d| d < 3) {
            return Vec::new();
        }
        let offsets = neighbour_offsets(&self.layers_dog[0]);
        let strides = self.layers_dog[0].strides();
        let threshold = -self.options.min_response.abs();
        let n = self.options.n_layers;

        let mut blobs = Vec::new();
        for l in 1..=n {
            let below = &self.layers_dog[l - 1];
            let here = &self.layers_dog[l];
            let above = &self.layers_dog[l + 1];
            for (i, &v) in here.data.iter().enumerate() {
                if v >= threshold {
                    continue;
                }
                let coords = here.coords(i);
                if coords
                    .iter()
                    .zip(dims.iter())
                    .any(|(&c, &d)| c == 0 || c + 1 == d)
                {
                    continue;
                }
                let is_min = offsets.iter().all(|&o| {
                    let j = (i as isize + o) as usize;
                    (o == 0 || here.data[j] > v) && below.data[j] > v && above.data[j] > v
                });
                if !is_min {
                    continue;
                }

                let mut center = [0f32; D];
                for a in 0..D {
                    let s = strides[a];
                    let offset = parabola_offset(here.data[i - s], v, here.data[i + s]);
                    center[a] = coords[a] as f32 + offset;
                }
                let ds = parabola_offset(below.data[i], v, above.data[i]);
                // DoG layer l sits between G_l and G_{l+1}.
                let sigma = self.layer_sigma(l as f32 + 0.5 + ds);
                blobs.push(Blob {
                    center,
                    radius: sigma * (D as f32).sqrt(),
                    response: v,
                });
            }
        }
        blobs
    }
}

impl<const D: usize> OctaveDetector<D> for DogOctave<D> {
    fn dims(&self) -> [usize; D] {
        self.dims
    }

    fn radius_preblur(&self) -> f32 {
        self.options.radius_preblur
    }

    fn set_radius_preblur(&mut self, k: f32) {
        self.options.radius_preblur = k;
    }

    fn detect(&mut self, image: &GridF32<D>, full_cascade: bool) -> Vec<Blob<D>> {
        debug_assert_eq!(image.dims, self.dims, "octave input has unexpected dims");
        self.fill_layers(image, full_cascade);
        self.find_minima()
    }

    fn seed_layer(&self) -> &GridF32<D> {
        &self.layers_g[self.options.n_layers]
    }
}

/// Flat offsets of the `3^D` cells around (and including) a cell.
fn neighbour_offsets<const D: usize>(grid: &GridF32<D>) -> Vec<isize> {
    let strides = grid.strides();
    let mut offsets = vec![0isize];
    for &s in strides.iter() {
        let s = s as isize;
        offsets = offsets
            .iter()
            .flat_map(|&o| [o - s, o, o + s])
            .collect();
    }
    offsets
}

/// Vertex of the parabola through `(-1, m)`, `(0, c)`, `(1, p)`.
fn parabola_offset(m: f32, c: f32, p: f32) -> f32 {
    let denom = m - 2.0 * c + p;
    if denom.abs() < EPS {
        return 0.0;
    }
    (0.5 * (m - p) / denom).clamp(-0.5, 0.5)
}
