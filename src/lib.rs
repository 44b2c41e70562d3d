//! spinsim — a reusable rotating-boundary collision simulation core.
//!
//! A single 2D point-mass disc moves under gravity and a configurable drag
//! model inside a rotating regular convex polygon (hexagon, square, ...) and
//! bounces off its edges with restitution and friction. The core is headless
//! and deterministic: the driver calls [`Simulation::step`] with a fixed time
//! step and reads back the updated kinematic state, plus the tick's collision
//! events for bounce-triggered effects. Rendering, input handling, pacing and
//! export are external collaborators.
//!
//! Core modules:
//! - `core::boundary`: the rotating polygon (derived vertices, angle advance)
//! - `core::particle`: the disc's kinematic state
//! - `core::integrate`: semi-implicit Euler with drag policies
//! - `core::collision`: per-edge detection and restitution/friction response
//! - `core::sim`: the per-tick orchestrator and configuration
//!
//! Known limitation: detection is discrete (per step), so a particle whose
//! per-tick travel exceeds the edge clearance can tunnel through a wall.
//! Bound `dt` or clamp speeds in the driver; the core does not treat this as
//! an error.

pub mod core;
pub mod error;

pub use crate::core::{
    Boundary, CollisionEvent, DragModel, FrameMode, Particle, SimConfig, Simulation,
};
pub use crate::error::{Error, Result};
