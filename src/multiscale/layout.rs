//! Per-dimensionality resampling used between octaves.
//!
//! - Upsampling to octave 0 duplicates every sample into the 2^D block it
//!   covers. No interpolation, so no extra blur reaches the finest octave.
//! - Downscaling to octave `o >= 2` averages 2^D blocks of the previous
//!   octave's seed layer. The trailing sample of an odd-sized axis is dropped.
//! - Both map a coarse sample `j` onto the fine-sample centre `2j + 0.5`;
//!   [`Layout::seam`] restores that half-pixel after plain scaling.
use super::octave_scale;
use crate::image::GridF32;
use crate::octave::Blob;

/// Resampling capability of one dimensionality.
pub trait Layout<const D: usize> {
    /// Short name used in logs and reports.
    const NAME: &'static str;

    /// Fill `dst` (reshaped to `2·src.dims`) by sample duplication.
    fn upsample(src: &GridF32<D>, dst: &mut GridF32<D>);

    /// Fill `dst` (its dims already set to `src.dims / 2`) by box averaging.
    fn downscale(src: &GridF32<D>, dst: &mut GridF32<D>);

    /// Pixel-centre correction for a blob already scaled to native units.
    fn seam(blob: &mut Blob<D>, octave: usize) {
        blob.shift(0.5 * (octave_scale(octave) - 1.0));
    }
}

/// 1D signals.
#[derive(Clone, Copy, Debug, Default)]
pub struct Line;

/// 2D images.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plane;

/// 3D volumes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Volume;

impl Layout<1> for Line {
    const NAME: &'static str = "1d";

    fn upsample(src: &GridF32<1>, dst: &mut GridF32<1>) {
        dst.reset([2 * src.dims[0]]);
        for (x, out) in dst.data.iter_mut().enumerate() {
            *out = src.data[x / 2];
        }
    }

    fn downscale(src: &GridF32<1>, dst: &mut GridF32<1>) {
        debug_assert!(2 * dst.dims[0] <= src.dims[0]);
        for (x, out) in dst.data.iter_mut().enumerate() {
            *out = 0.5 * (src.data[2 * x] + src.data[2 * x + 1]);
        }
    }
}

impl Layout<2> for Plane {
    const NAME: &'static str = "2d";

    fn upsample(src: &GridF32<2>, dst: &mut GridF32<2>) {
        dst.reset([2 * src.width(), 2 * src.height()]);
        for y in 0..dst.height() {
            let src_row = src.row(y / 2);
            for (x, out) in dst.row_mut(y).iter_mut().enumerate() {
                *out = src_row[x / 2];
            }
        }
    }

    fn downscale(src: &GridF32<2>, dst: &mut GridF32<2>) {
        debug_assert!(2 * dst.width() <= src.width() && 2 * dst.height() <= src.height());
        for y in 0..dst.height() {
            let top = src.row(2 * y);
            let bottom = src.row(2 * y + 1);
            for (x, out) in dst.row_mut(y).iter_mut().enumerate() {
                let sx = 2 * x;
                *out = 0.25 * (top[sx] + top[sx + 1] + bottom[sx] + bottom[sx + 1]);
            }
        }
    }
}

impl Layout<3> for Volume {
    const NAME: &'static str = "3d";

    fn upsample(src: &GridF32<3>, dst: &mut GridF32<3>) {
        let [w, h, d] = src.dims;
        dst.reset([2 * w, 2 * h, 2 * d]);
        let [dw, dh, dd] = dst.dims;
        let mut i = 0usize;
        for z in 0..dd {
            for y in 0..dh {
                let src_row = ((z / 2) * h + y / 2) * w;
                for x in 0..dw {
                    dst.data[i] = src.data[src_row + x / 2];
                    i += 1;
                }
            }
        }
    }

    fn downscale(src: &GridF32<3>, dst: &mut GridF32<3>) {
        let [w, h, _] = src.dims;
        let [dw, dh, dd] = dst.dims;
        debug_assert!(2 * dw <= w && 2 * dh <= h && 2 * dd <= src.dims[2]);
        let plane = w * h;
        let mut i = 0usize;
        for z in 0..dd {
            for y in 0..dh {
                let r00 = (2 * z) * plane + (2 * y) * w;
                let r01 = r00 + w;
                let r10 = r00 + plane;
                let r11 = r10 + w;
                for x in 0..dw {
                    let sx = 2 * x;
                    let sum: f32 = [r00, r01, r10, r11]
                        .iter()
                        .map(|&r| src.data[r + sx] + src.data[r + sx + 1])
                        .sum();
                    dst.data[i] = 0.125 * sum;
                    i += 1;
                }
            }
        }
    }
}
