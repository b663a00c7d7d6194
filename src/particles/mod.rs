//! Particle containers and periodic boundary geometry.
//!
//! - [`bbox`] – axis-aligned boxes.
//! - [`index`] – uniform-cell spatial index.
//! - [`container`] – the [`ParticleContainer`] contract and the bounded
//!   [`Particles`] set.
//! - [`periodic`] – [`PeriodicParticles`], a minimum-image view over any
//!   container.

pub mod bbox;
pub mod container;
pub mod index;
pub mod periodic;

pub use bbox::BoundingBox;
pub use container::{ParticleContainer, Particles};
pub use index::CellIndex;
pub use periodic::{periodify, PeriodicParticles};
