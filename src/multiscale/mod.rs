//! Multiscale blob finder driving one octave detector per pyramid level.
//!
//! Overview
//! - Octave 0 works on the input upsampled 2× by sample duplication, octave 1
//!   on the input itself, and every octave `o >= 2` on a 2^D box average of
//!   octave `o − 1`'s seed layer (blur `2k`, so `k` once halved). The
//!   scale-space stays continuous without re-blurring the raw image.
//! - Octaves are appended while every axis is at least
//!   [`MIN_OCTAVE_EXTENT`]; octave 0 always exists.
//! - Detections are scaled by [`octave_scale`] and seam-corrected by the
//!   [`Layout`] into native pixel coordinates, then concatenated octave by
//!   octave. No cross-octave deduplication is done.
//!
//! Modules
//! - [`layout`] – per-dimensionality upsample, downscale and seam hooks.
//! - [`batch`] – frame-parallel detection over many inputs.
//!
//! Typical usage:
//! ```no_run
//! use particle_locator::image::ImageF32;
//! use particle_locator::multiscale::MultiscaleFinder2D;
//! use particle_locator::octave::OctaveOptions;
//!
//! # fn example(img: ImageF32) -> Result<(), particle_locator::GeometryError> {
//! let mut finder = MultiscaleFinder2D::new(img.dims, OctaveOptions::default());
//! let blobs = finder.detect(&img)?;
//! println!("{} blobs over {} octaves", blobs.len(), finder.n_octaves());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod layout;

use crate::diagnostics::{MultiscaleReport, OctaveReport};
use crate::error::GeometryError;
use crate::image::GridF32;
use crate::octave::{Blob, DogOctave, OctaveDetector, OctaveOptions};
use log::debug;
use std::marker::PhantomData;
use std::time::Instant;

pub use batch::detect_frames;
pub use layout::{Layout, Line, Plane, Volume};

/// Octaves stop once any axis would fall below this many samples.
pub const MIN_OCTAVE_EXTENT: usize = 12;

pub type MultiscaleFinder1D = MultiscaleFinder<Line, DogOctave<1>, 1>;
pub type MultiscaleFinder2D = MultiscaleFinder<Plane, DogOctave<2>, 2>;
pub type MultiscaleFinder3D = MultiscaleFinder<Volume, DogOctave<3>, 3>;

/// Linear size of one octave pixel in native pixels.
pub fn octave_scale(octave: usize) -> f32 {
    if octave == 0 {
        0.5
    } else {
        2f32.powi(octave as i32 - 1)
    }
}

/// Resolutions of every octave for a native input of `native` samples.
pub fn octave_dims<const D: usize>(native: [usize; D]) -> Vec<[usize; D]> {
    let mut dims = vec![native.map(|e| 2 * e)];
    let mut current = native;
    while current.iter().all(|&e| e >= MIN_OCTAVE_EXTENT) {
        dims.push(current);
        current = current.map(|e| e / 2);
    }
    dims
}

#[derive(Clone, Debug)]
pub struct MultiscaleFinder<L, O, const D: usize> {
    native_dims: [usize; D],
    octaves: Vec<O>,
    /// Octave 0 input; fully overwritten by every call.
    upscaled: GridF32<D>,
    /// Octave `o >= 2` input; reset before each use.
    downscaled: GridF32<D>,
    layout: PhantomData<L>,
}

struct OctaveRun<const D: usize> {
    blobs: Vec<Blob<D>>,
    detect_ms: f64,
}

impl<const D: usize> OctaveRun<D> {
    fn timed<O: OctaveDetector<D>>(detector: &mut O, input: &GridF32<D>, full_cascade: bool) -> Self {
        let start = Instant::now();
        let blobs = detector.detect(input, full_cascade);
        Self {
            blobs,
            detect_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

impl<L: Layout<D>, const D: usize> MultiscaleFinder<L, DogOctave<D>, D> {
    /// Finder backed by the DoG reference detector.
    pub fn new(native_dims: [usize; D], options: OctaveOptions) -> Self {
        Self::with_detectors(native_dims, |dims| DogOctave::new(dims, options))
    }
}

impl<L: Layout<D>, O: OctaveDetector<D>, const D: usize> MultiscaleFinder<L, O, D> {
    /// Build the octave cascade, creating one detector per resolution.
    pub fn with_detectors(native_dims: [usize; D], make_detector: impl FnMut([usize; D]) -> O) -> Self {
        let dims = octave_dims(native_dims);
        let octaves: Vec<O> = dims.into_iter().map(make_detector).collect();
        debug!(
            "MultiscaleFinder::new layout={} dims={:?} octaves={}",
            L::NAME,
            native_dims,
            octaves.len()
        );
        Self {
            native_dims,
            octaves,
            upscaled: GridF32::new(native_dims.map(|e| 2 * e)),
            downscaled: GridF32::new(native_dims.map(|e| e / 2)),
            layout: PhantomData,
        }
    }

    pub fn n_octaves(&self) -> usize {
        self.octaves.len()
    }

    pub fn octave(&self, o: usize) -> &O {
        &self.octaves[o]
    }

    pub fn octaves(&self) -> &[O] {
        &self.octaves
    }

    pub fn native_dims(&self) -> [usize; D] {
        self.native_dims
    }

    /// Extent of the native input along x.
    pub fn native_width(&self) -> usize {
        self.native_dims.first().copied().unwrap_or(0)
    }

    pub fn radius_preblur(&self) -> f32 {
        self.octaves[0].radius_preblur()
    }

    /// Apply the same preblur radius to every octave so that responses stay
    /// comparable across scales.
    pub fn set_radius_preblur(&mut self, k: f32) {
        for octave in &mut self.octaves {
            octave.set_radius_preblur(k);
        }
    }

    /// Detect blobs at every scale and return them in native coordinates.
    pub fn detect(&mut self, image: &GridF32<D>) -> Result<Vec<Blob<D>>, GeometryError> {
        self.detect_with_report(image).map(|(blobs, _)| blobs)
    }

    /// Same as [`detect`](Self::detect), also returning per-octave diagnostics.
    pub fn detect_with_report(
        &mut self,
        image: &GridF32<D>,
    ) -> Result<(Vec<Blob<D>>, MultiscaleReport), GeometryError> {
        if image.dims != self.native_dims {
            return Err(GeometryError::shape_mismatch(&self.native_dims, &image.dims));
        }
        debug!(
            "MultiscaleFinder::detect start layout={} dims={:?} octaves={}",
            L::NAME,
            self.native_dims,
            self.octaves.len()
        );
        let total_start = Instant::now();
        let mut report = MultiscaleReport {
            layout: L::NAME.to_string(),
            ..Default::default()
        };
        let mut blobs = Vec::new();

        let upsample_start = Instant::now();
        L::upsample(image, &mut self.upscaled);
        let upsample_ms = upsample_start.elapsed().as_secs_f64() * 1000.0;

        let (first, rest) = self.octaves.split_at_mut(1);
        let (finest, native) =
            detect_fine_octaves(&mut first[0], rest.first_mut(), &self.upscaled, image);
        append_octave::<L, D>(0, self.upscaled.dims, finest, upsample_ms, &mut blobs, &mut report);
        if let Some(run) = native {
            append_octave::<L, D>(1, self.native_dims, run, 0.0, &mut blobs, &mut report);
        }

        for o in 2..self.octaves.len() {
            let resample_start = Instant::now();
            let (done, todo) = self.octaves.split_at_mut(o);
            let target = &mut todo[0];
            self.downscaled.reset(target.dims());
            L::downscale(done[o - 1].seed_layer(), &mut self.downscaled);
            let resample_ms = resample_start.elapsed().as_secs_f64() * 1000.0;

            let run = OctaveRun::timed(target, &self.downscaled, false);
            append_octave::<L, D>(o, self.downscaled.dims, run, resample_ms, &mut blobs, &mut report);
        }

        report.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "MultiscaleFinder::detect done blobs={} total_ms={:.3}",
            blobs.len(),
            report.total_ms
        );
        Ok((blobs, report))
    }
}

/// Octaves 0 and 1 read independent inputs and may run side by side.
#[cfg(feature = "parallel")]
fn detect_fine_octaves<O: OctaveDetector<D>, const D: usize>(
    finest: &mut O,
    native: Option<&mut O>,
    upscaled: &GridF32<D>,
    image: &GridF32<D>,
) -> (OctaveRun<D>, Option<OctaveRun<D>>) {
    rayon::join(
        || OctaveRun::timed(finest, upscaled, true),
        || native.map(|detector| OctaveRun::timed(detector, image, true)),
    )
}

#[cfg(not(feature = "parallel"))]
fn detect_fine_octaves<O: OctaveDetector<D>, const D: usize>(
    finest: &mut O,
    native: Option<&mut O>,
    upscaled: &GridF32<D>,
    image: &GridF32<D>,
) -> (OctaveRun<D>, Option<OctaveRun<D>>) {
    let finest = OctaveRun::timed(finest, upscaled, true);
    let native = native.map(|detector| OctaveRun::timed(detector, image, true));
    (finest, native)
}

fn append_octave<L: Layout<D>, const D: usize>(
    octave: usize,
    dims: [usize; D],
    run: OctaveRun<D>,
    resample_ms: f64,
    blobs: &mut Vec<Blob<D>>,
    report: &mut MultiscaleReport,
) {
    let scale = octave_scale(octave);
    let count = run.blobs.len();
    blobs.reserve(count);
    for mut blob in run.blobs {
        blob.rescale(scale);
        L::seam(&mut blob, octave);
        blobs.push(blob);
    }
    debug!(
        "MultiscaleFinder octave={} dims={:?} scale={} blobs={} detect_ms={:.3}",
        octave, dims, scale, count, run.detect_ms
    );
    report.octaves.push(OctaveReport {
        octave_index: octave,
        dims: dims.to_vec(),
        scale,
        blob_count: count,
        resample_ms,
        detect_ms: run.detect_ms,
    });
}
