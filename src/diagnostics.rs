//! Structured diagnostics returned by [`MultiscaleFinder::detect_with_report`].
//!
//! [`MultiscaleFinder::detect_with_report`]: crate::multiscale::MultiscaleFinder::detect_with_report
use serde::{Deserialize, Serialize};

/// Statistics for a single octave of one detection call.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OctaveReport {
    pub octave_index: usize,
    /// Octave resolution, x first.
    pub dims: Vec<usize>,
    /// Linear scale of one octave pixel in native pixels.
    pub scale: f32,
    pub blob_count: usize,
    /// Time spent resampling the octave input.
    pub resample_ms: f64,
    /// Time spent in the octave detector.
    pub detect_ms: f64,
}

/// Per-frame trace of the multiscale finder.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultiscaleReport {
    pub layout: String,
    pub total_ms: f64,
    pub octaves: Vec<OctaveReport>,
}

impl MultiscaleReport {
    pub fn blob_count(&self) -> usize {
        self.octaves.iter().map(|o| o.blob_count).sum()
    }

    pub fn octave(&self, index: usize) -> Option<&OctaveReport> {
        self.octaves.iter().find(|o| o.octave_index == index)
    }
}
