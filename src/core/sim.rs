use crate::core::{collision, integrate, Boundary, CollisionEvent, DragModel, Particle};
use crate::error::{Error, Result};
use glam::DVec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which reference frame the particle state lives in.
///
/// Both formulations produce equivalent trajectories up to integration
/// tolerance; pick whichever the driver finds convenient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameMode {
    /// Rotating boundary, fixed gravity. The resolver sees moving walls.
    Inertial,
    /// Boundary held stationary; the particle lives in the co-rotating frame
    /// and feels rotated gravity plus centrifugal and Coriolis pseudo-forces.
    /// The resolver sees stationary walls. Reported world-frame state is a
    /// projection (see [`Simulation::world_position`]).
    Rotating,
}

/// Per-simulation physics configuration. Fields are public; validation runs
/// at construction time via [`SimConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Gravitational acceleration (world frame).
    pub gravity: DVec2,
    /// Restitution coefficient e in [0, 1]: fraction of normal-relative
    /// speed retained (sign-reversed) after a bounce.
    pub restitution: f64,
    /// Friction coefficient μ in [0, 1]: fraction of tangential-relative
    /// speed removed on contact.
    pub friction: f64,
    /// Drag policy applied during integration.
    pub drag: DragModel,
    /// Reference-frame formulation.
    pub frame: FrameMode,
}

impl SimConfig {
    /// Configuration with the given gravity, restitution and friction, no
    /// drag, inertial frame.
    pub fn new(gravity: DVec2, restitution: f64, friction: f64) -> Result<Self> {
        let cfg = Self {
            gravity,
            restitution,
            friction,
            drag: DragModel::None,
            frame: FrameMode::Inertial,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replace the drag policy (validated).
    pub fn with_drag(mut self, drag: DragModel) -> Result<Self> {
        drag.validate()?;
        self.drag = drag;
        Ok(self)
    }

    /// Replace the frame formulation.
    pub fn with_frame(mut self, frame: FrameMode) -> Self {
        self.frame = frame;
        self
    }

    /// Fail fast on out-of-contract parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(Error::InvalidParam("gravity must be finite".into()));
        }
        if !self.restitution.is_finite() || !(0.0..=1.0).contains(&self.restitution) {
            return Err(Error::InvalidParam("restitution must be in [0, 1]".into()));
        }
        if !self.friction.is_finite() || !(0.0..=1.0).contains(&self.friction) {
            return Err(Error::InvalidParam("friction must be in [0, 1]".into()));
        }
        self.drag.validate()
    }
}

/// One particle-boundary pair advanced by a fixed time step.
///
/// Per tick, in fixed order: advance the boundary angle, integrate the
/// particle's kinematics, then detect and resolve collisions per edge in
/// ascending index. Every flagged edge is resolved independently within the
/// tick; this is an approximation rather than a simultaneous multi-contact
/// solve, acceptable when `dt` is small relative to the angular and linear
/// speeds.
#[derive(Debug, Clone)]
pub struct Simulation {
    boundary: Boundary,
    /// Particle state in the active frame: world coordinates for
    /// [`FrameMode::Inertial`], co-rotating coordinates for
    /// [`FrameMode::Rotating`].
    particle: Particle,
    config: SimConfig,
    time: f64,
    /// Collision events of the most recent tick; rebuilt every `step`.
    events: Vec<CollisionEvent>,
}

impl Simulation {
    /// Create a simulation from a boundary, a particle given in **world**
    /// coordinates, and a validated configuration.
    pub fn new(boundary: Boundary, particle: Particle, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let mut sim = Self {
            boundary,
            particle,
            config,
            time: 0.0,
            events: Vec::new(),
        };
        if config.frame == FrameMode::Rotating {
            sim.particle = to_rotating(&sim.boundary, &particle);
        }
        debug!(
            sides = sim.boundary.sides(),
            circumradius = sim.boundary.circumradius(),
            omega = sim.boundary.angular_velocity(),
            frame = ?config.frame,
            "simulation created"
        );
        Ok(sim)
    }

    /// Create a simulation with a seeded random initial state: the particle
    /// is rejection-sampled strictly inside the polygon (margin = radius)
    /// with velocity components uniform in `[-speed, speed]`.
    ///
    /// Pass a seed to reproduce exact sequences; `None` seeds from entropy.
    pub fn with_random_start(
        boundary: Boundary,
        radius: f64,
        speed: f64,
        config: SimConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(Error::InvalidParam("speed must be finite and >= 0".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if radius >= boundary.apothem() {
            return Err(Error::InvalidParam(
                "particle radius must be smaller than the boundary apothem".into(),
            ));
        }

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rand::rng().random()),
        };

        // Rejection-sample a position whose disc clears every edge.
        let c = boundary.center();
        let half = boundary.circumradius();
        let max_attempts = 10_000usize;
        let mut attempts = 0usize;
        let pos = loop {
            if attempts >= max_attempts {
                return Err(Error::InvalidParam(
                    "failed to place the particle inside the boundary; radius too large?".into(),
                ));
            }
            attempts += 1;
            let candidate = c + DVec2::new(
                rng.random_range(-half..=half),
                rng.random_range(-half..=half),
            );
            if boundary.contains(candidate) && clears_all_edges(&boundary, candidate, radius) {
                break candidate;
            }
        };

        let vel = DVec2::new(
            rng.random_range(-speed..=speed),
            rng.random_range(-speed..=speed),
        );
        Self::new(boundary, Particle::new(pos, vel, radius)?, config)
    }

    /// Elapsed simulation time.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Particle state in the active frame (see [`FrameMode`]).
    #[inline]
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Particle position in world coordinates, regardless of frame mode.
    pub fn world_position(&self) -> DVec2 {
        match self.config.frame {
            FrameMode::Inertial => self.particle.pos,
            FrameMode::Rotating => {
                let c = self.boundary.center();
                c + rotate(self.particle.pos - c, self.boundary.angle())
            }
        }
    }

    /// Particle velocity in world coordinates, regardless of frame mode.
    pub fn world_velocity(&self) -> DVec2 {
        match self.config.frame {
            FrameMode::Inertial => self.particle.vel,
            FrameMode::Rotating => {
                let r_world = self.world_position() - self.boundary.center();
                rotate(self.particle.vel, self.boundary.angle())
                    + self.boundary.angular_velocity() * DVec2::new(-r_world.y, r_world.x)
            }
        }
    }

    /// Kinetic energy from the world-frame velocity (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.particle.mass() * self.world_velocity().length_squared()
    }

    /// Advance by one fixed time step and return the tick's collision
    /// events (empty on most ticks). `dt` must be finite and positive.
    pub fn step(&mut self, dt: f64) -> Result<&[CollisionEvent]> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }

        // (a) advance the boundary angle.
        self.boundary.advance(dt);

        // (b) integrate kinematics under frame-appropriate acceleration.
        let (accel, frame_gravity) = self.frame_acceleration();
        let altitude = altitude_of(self.particle.pos, self.boundary.center(), frame_gravity);
        integrate::semi_implicit_step(
            &mut self.particle,
            accel,
            &self.config.drag,
            altitude,
            dt,
        );

        // (c) detect and resolve per edge, ascending index. Later edges see
        // the position corrections of earlier ones within the same tick.
        self.events.clear();
        let edges = match self.config.frame {
            FrameMode::Inertial => self.boundary.edges(),
            FrameMode::Rotating => edges_at_rest(&self.boundary),
        };
        for (k, (a, b)) in edges.into_iter().enumerate() {
            let Some(mut ev) = collision::detect_edge(&self.particle, &self.boundary, k, a, b)
            else {
                continue;
            };
            if self.config.frame == FrameMode::Inertial {
                ev.wall_velocity = self.boundary.wall_velocity_at(ev.contact);
            }
            collision::resolve(
                &mut self.particle,
                &ev,
                self.config.restitution,
                self.config.friction,
            );
            debug!(edge = ev.edge, depth = ev.depth, "collision resolved");
            self.events.push(ev);
        }

        self.time += dt;
        Ok(&self.events)
    }

    /// Collision events of the most recent tick.
    #[inline]
    pub fn last_events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Per-tick acceleration in the active frame, plus the frame's gravity
    /// vector (which defines "up" for the altitude-dependent drag density).
    fn frame_acceleration(&self) -> (DVec2, DVec2) {
        let g = self.config.gravity;
        match self.config.frame {
            FrameMode::Inertial => (g, g),
            FrameMode::Rotating => {
                let omega = self.boundary.angular_velocity();
                let g_rot = rotate(g, -self.boundary.angle());
                let r = self.particle.pos - self.boundary.center();
                let v = self.particle.vel;
                let centrifugal = omega * omega * r;
                let coriolis = 2.0 * omega * DVec2::new(v.y, -v.x);
                (g_rot + centrifugal + coriolis, g_rot)
            }
        }
    }
}

/// Rotate a vector by `theta` radians.
#[inline]
fn rotate(v: DVec2, theta: f64) -> DVec2 {
    DVec2::from_angle(theta).rotate(v)
}

/// Altitude above the boundary center, measured against the gravity
/// direction; 0 in zero gravity.
fn altitude_of(pos: DVec2, center: DVec2, gravity: DVec2) -> f64 {
    let g_len = gravity.length();
    if g_len <= f64::EPSILON {
        return 0.0;
    }
    -(pos - center).dot(gravity / g_len)
}

/// World state mapped into the boundary's co-rotating frame.
fn to_rotating(boundary: &Boundary, particle: &Particle) -> Particle {
    let c = boundary.center();
    let theta = boundary.angle();
    let omega = boundary.angular_velocity();
    let r_world = particle.pos - c;
    let wall = omega * DVec2::new(-r_world.y, r_world.x);
    let mut p = *particle;
    p.pos = c + rotate(r_world, -theta);
    p.vel = rotate(particle.vel - wall, -theta);
    p
}

/// Boundary edges with the rotation frozen at angle 0 (co-rotating frame).
fn edges_at_rest(boundary: &Boundary) -> Vec<(DVec2, DVec2)> {
    let verts = boundary.vertices_at(0.0);
    (0..verts.len())
        .map(|k| (verts[k], verts[(k + 1) % verts.len()]))
        .collect()
}

/// True if the disc at `pos` keeps at least `radius` clearance from every
/// edge segment.
fn clears_all_edges(boundary: &Boundary, pos: DVec2, radius: f64) -> bool {
    boundary.edges().into_iter().all(|(a, b)| {
        let cp = collision::closest_point_on_segment(pos, a, b);
        (pos - cp).length_squared() > radius * radius
    })
}
