//! Core simulation data structures and the per-tick engine.
//!
//! Everything in here is pure state transformation: no rendering, no I/O, no
//! clocks. The driver owns the [`Simulation`] between ticks.

pub mod boundary;
pub mod collision;
pub mod event;
pub mod integrate;
pub mod particle;
pub mod sim;

pub use boundary::Boundary;
pub use event::CollisionEvent;
pub use integrate::DragModel;
pub use particle::Particle;
pub use sim::{FrameMode, SimConfig, Simulation};
