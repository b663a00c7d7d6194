//! Error types returned by the detection pipeline.

/// Reasons why a frame cannot be processed by the multiscale finder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// The input grid does not have the native dimensions the finder was
    /// built for. Dimensions are listed axis by axis (x first).
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
}

impl GeometryError {
    pub(crate) fn shape_mismatch(expected: &[usize], found: &[usize]) -> Self {
        GeometryError::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::ShapeMismatch { expected, found } => write!(
                f,
                "invalid geometry: input has dims {found:?}, finder expects {expected:?}"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}
