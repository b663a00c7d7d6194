//! Owned `f32` sample grids of one, two or three axes.
//!
//! Storage is a single contiguous buffer with axis 0 (x) varying fastest,
//! then y, then z. Pixel centres sit on integer coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GridF32<const D: usize> {
    /// Extent along each axis, x first.
    pub dims: [usize; D],
    /// Backing storage, x fastest.
    pub data: Vec<f32>,
}

/// One-dimensional signal.
pub type SignalF32 = GridF32<1>;
/// Two-dimensional image, `dims = [width, height]`.
pub type ImageF32 = GridF32<2>;
/// Three-dimensional volume, `dims = [width, height, depth]`.
pub type VolumeF32 = GridF32<3>;

impl<const D: usize> GridF32<D> {
    /// Zero-initialised grid of the given dimensions.
    pub fn new(dims: [usize; D]) -> Self {
        Self {
            dims,
            data: vec![0.0; dims.iter().product()],
        }
    }

    /// Fill a grid by evaluating `f` at every integer coordinate.
    pub fn from_fn(dims: [usize; D], mut f: impl FnMut([usize; D]) -> f32) -> Self {
        let mut grid = Self::new(dims);
        for i in 0..grid.data.len() {
            grid.data[i] = f(grid.coords(i));
        }
        grid
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element step between neighbours along each axis.
    pub fn strides(&self) -> [usize; D] {
        let mut strides = [1usize; D];
        for a in 1..D {
            strides[a] = strides[a - 1] * self.dims[a - 1];
        }
        strides
    }

    #[inline]
    pub fn idx(&self, coords: [usize; D]) -> usize {
        let mut i = 0usize;
        let mut stride = 1usize;
        for a in 0..D {
            i += coords[a] * stride;
            stride *= self.dims[a];
        }
        i
    }

    /// Integer coordinates of a linear index.
    #[inline]
    pub fn coords(&self, mut i: usize) -> [usize; D] {
        let mut c = [0usize; D];
        for a in 0..D {
            c[a] = i % self.dims[a];
            i /= self.dims[a];
        }
        c
    }

    #[inline]
    pub fn get(&self, coords: [usize; D]) -> f32 {
        self.data[self.idx(coords)]
    }

    #[inline]
    pub fn set(&mut self, coords: [usize; D], v: f32) {
        let i = self.idx(coords);
        self.data[i] = v;
    }

    /// Resize to `dims` and zero every sample, reusing the allocation.
    pub fn reset(&mut self, dims: [usize; D]) {
        self.dims = dims;
        self.data.clear();
        self.data.resize(dims.iter().product(), 0.0);
    }

    /// Largest sample value, `None` for an empty grid.
    pub fn max_value(&self) -> Option<f32> {
        self.data.iter().copied().reduce(f32::max)
    }
}

impl GridF32<2> {
    #[inline]
    pub fn width(&self) -> usize {
        self.dims[0]
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims[1]
    }

    /// Convert tightly packed 8-bit grayscale bytes to `[0, 1]` floats.
    /// Returns `None` when `bytes` does not hold `width * height` samples.
    pub fn from_gray_bytes(width: usize, height: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width * height {
            return None;
        }
        let data = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Some(Self {
            dims: [width, height],
            data,
        })
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.dims[0];
        &self.data[start..start + self.dims[0]]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.dims[0];
        let end = start + self.dims[0];
        &mut self.data[start..end]
    }
}
