use serde::Deserialize;

/// Knobs shared by every octave of a multiscale finder.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OctaveOptions {
    /// Number of DoG layers searched for extrema per octave (>= 1).
    pub n_layers: usize,
    /// Blur (Gaussian sigma, pixels) of the first layer of each octave.
    pub radius_preblur: f32,
    /// Minimum DoG magnitude for a minimum to be reported.
    pub min_response: f32,
}

impl Default for OctaveOptions {
    fn default() -> Self {
        Self {
            n_layers: 3,
            radius_preblur: 1.6,
            min_response: 0.01,
        }
    }
}

impl OctaveOptions {
    pub fn new(n_layers: usize) -> Self {
        Self {
            n_layers,
            ..Default::default()
        }
    }

    pub fn with_radius_preblur(mut self, k: f32) -> Self {
        self.radius_preblur = k;
        self
    }

    pub fn with_min_response(mut self, min_response: f32) -> Self {
        self.min_response = min_response;
        self
    }
}
