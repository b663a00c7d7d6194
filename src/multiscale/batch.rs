//! Detection over many frames.
//!
//! Frames are independent. Each worker clones the prototype finder so that
//! scratch buffers and octave detectors are never shared. A frame that fails
//! its geometry check yields an `Err` in its slot and does not affect the
//! others.
use super::{Layout, MultiscaleFinder};
use crate::error::GeometryError;
use crate::image::GridF32;
use crate::octave::{Blob, OctaveDetector};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub type FrameResult<const D: usize> = Result<Vec<Blob<D>>, GeometryError>;

/// Run `prototype` over `frames`, returning one result per frame in order.
#[cfg(feature = "parallel")]
pub fn detect_frames<L, O, const D: usize>(
    prototype: &MultiscaleFinder<L, O, D>,
    frames: &[GridF32<D>],
) -> Vec<FrameResult<D>>
where
    L: Layout<D> + Clone + Send + Sync,
    O: OctaveDetector<D> + Clone + Sync,
{
    frames
        .par_iter()
        .map_init(|| prototype.clone(), |finder, frame| finder.detect(frame))
        .collect()
}

/// Run `prototype` over `frames`, returning one result per frame in order.
#[cfg(not(feature = "parallel"))]
pub fn detect_frames<L, O, const D: usize>(
    prototype: &MultiscaleFinder<L, O, D>,
    frames: &[GridF32<D>],
) -> Vec<FrameResult<D>>
where
    L: Layout<D> + Clone + Send + Sync,
    O: OctaveDetector<D> + Clone + Sync,
{
    let mut finder = prototype.clone();
    frames.iter().map(|frame| finder.detect(frame)).collect()
}
