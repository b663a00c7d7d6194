//! Single-resolution blob detection.
//!
//! An octave detector works on one pyramid level at a fixed resolution and
//! reports blobs in its own pixel coordinates. The multiscale finder owns one
//! detector per octave and maps their output back to the native frame.
//!
//! Modules
//! - [`filters`] – Gaussian kernels and separable N-d blur.
//! - [`dog`] – Difference-of-Gaussian reference detector.
//! - [`options`] – serde-loadable detector knobs.

pub mod dog;
pub mod filters;
pub mod options;

use crate::image::GridF32;
use serde::ser::{Serialize, SerializeStruct, Serializer};

pub use dog::DogOctave;
pub use options::OctaveOptions;

/// A located feature: centre in pixel coordinates (x first), radius and
/// detector response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob<const D: usize> {
    pub center: [f32; D],
    pub radius: f32,
    pub response: f32,
}

impl<const D: usize> Blob<D> {
    /// Multiply centre and radius by `factor`.
    pub fn rescale(&mut self, factor: f32) {
        for c in &mut self.center {
            *c *= factor;
        }
        self.radius *= factor;
    }

    /// Add `offset` to every centre coordinate.
    pub fn shift(&mut self, offset: f32) {
        for c in &mut self.center {
            *c += offset;
        }
    }

    /// Euclidean distance between the centres of two blobs.
    pub fn distance(&self, other: &Blob<D>) -> f32 {
        self.center
            .iter()
            .zip(other.center.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }
}

impl<const D: usize> Serialize for Blob<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Blob", 3)?;
        state.serialize_field("center", &self.center[..])?;
        state.serialize_field("radius", &self.radius)?;
        state.serialize_field("response", &self.response)?;
        state.end()
    }
}

/// Contract between the multiscale finder and a single-octave detector.
pub trait OctaveDetector<const D: usize>: Send {
    /// Resolution this detector was configured for.
    fn dims(&self) -> [usize; D];

    fn radius_preblur(&self) -> f32;

    fn set_radius_preblur(&mut self, k: f32);

    /// Detect blobs in `image`.
    ///
    /// `full_cascade = true` marks a raw image that has to be blurred to the
    /// preblur radius first. `false` marks an input already carrying the
    /// preblur radius, as produced by downscaling the previous octave's seed
    /// layer.
    fn detect(&mut self, image: &GridF32<D>, full_cascade: bool) -> Vec<Blob<D>>;

    /// Gaussian layer with twice the preblur blur, filled by the last
    /// [`detect`](Self::detect) call. Seeds the next octave.
    fn seed_layer(&self) -> &GridF32<D>;
}
