pub mod grid;
pub mod io;

pub use self::grid::{GridF32, ImageF32, SignalF32, VolumeF32};
