#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod multiscale;
pub mod particles;

// Building blocks of the finder, public for custom octave detectors.
pub mod config;
pub mod octave;

// --- High-level re-exports -------------------------------------------------

pub use crate::diagnostics::{MultiscaleReport, OctaveReport};
pub use crate::error::GeometryError;
pub use crate::multiscale::{
    MultiscaleFinder, MultiscaleFinder1D, MultiscaleFinder2D, MultiscaleFinder3D,
};
pub use crate::octave::{Blob, OctaveDetector, OctaveOptions};
pub use crate::particles::{BoundingBox, ParticleContainer, Particles, PeriodicParticles};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use particle_locator::prelude::*;
///
/// # fn main() {
/// let img = ImageF32::new([256, 256]);
/// let mut finder = MultiscaleFinder2D::new(img.dims, OctaveOptions::default());
/// let blobs = finder.detect(&img).expect("dims match");
/// println!("found={} octaves={}", blobs.len(), finder.n_octaves());
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, SignalF32, VolumeF32};
    pub use crate::particles::{BoundingBox, ParticleContainer, Particles, PeriodicParticles};
    pub use crate::{Blob, MultiscaleFinder2D, MultiscaleFinder3D, OctaveOptions};
}
