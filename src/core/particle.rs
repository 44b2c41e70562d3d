use crate::error::{Error, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The simulated disc: a 2D point-mass with a collision radius.
///
/// Fields:
/// - `pos`: position of the disc's center
/// - `vel`: velocity
/// - `radius`: collision radius (> 0, constant for the particle's lifetime)
/// - `mass`: mass (> 0); only the aerodynamic drag model reads it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Center position.
    pub pos: DVec2,
    /// Velocity.
    pub vel: DVec2,
    radius: f64,
    mass: f64,
}

impl Particle {
    /// Create a new particle with unit mass, validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` is non-positive or any component
    ///   is NaN/inf.
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !pos.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !vel.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            pos,
            vel,
            radius,
            mass: 1.0,
        })
    }

    /// Override the mass (validated as finite and > 0).
    pub fn with_mass(mut self, mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        self.mass = mass;
        Ok(self)
    }

    /// Collision radius (> 0).
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mass (> 0).
    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Set position (validated as finite).
    pub fn set_position(&mut self, pos: DVec2) -> Result<()> {
        if !pos.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        self.pos = pos;
        Ok(())
    }

    /// Set velocity (validated as finite).
    pub fn set_velocity(&mut self, vel: DVec2) -> Result<()> {
        if !vel.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        self.vel = vel;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particle_ok() -> Result<()> {
        let p = Particle::new(DVec2::new(0.0, 1.0), DVec2::new(2.0, -3.0), 0.5)?;
        assert_eq!(p.pos, DVec2::new(0.0, 1.0));
        assert_eq!(p.vel, DVec2::new(2.0, -3.0));
        assert_eq!(p.radius(), 0.5);
        assert_eq!(p.mass(), 1.0);
        Ok(())
    }

    #[test]
    fn invalid_radius_rejected() {
        let err = Particle::new(DVec2::ZERO, DVec2::ZERO, 0.0).unwrap_err();
        assert!(err.to_string().contains("radius"));
        let err = Particle::new(DVec2::ZERO, DVec2::ZERO, f64::NAN).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn invalid_mass_rejected() -> Result<()> {
        let p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0)?;
        let err = p.with_mass(-1.0).unwrap_err();
        assert!(err.to_string().contains("mass"));
        Ok(())
    }

    #[test]
    fn non_finite_state_rejected() {
        let err = Particle::new(DVec2::new(f64::INFINITY, 0.0), DVec2::ZERO, 1.0).unwrap_err();
        assert!(err.to_string().contains("position"));

        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0).unwrap();
        assert!(p.set_velocity(DVec2::new(0.0, f64::NAN)).is_err());
        assert!(p.set_position(DVec2::new(1.0, 2.0)).is_ok());
    }

    #[test]
    fn kinetic_energy_computed() -> Result<()> {
        // v = (3,4), |v|^2 = 25; KE = 0.5 * m * 25
        let p = Particle::new(DVec2::ZERO, DVec2::new(3.0, 4.0), 1.0)?.with_mass(2.0)?;
        assert!((p.kinetic_energy() - 25.0).abs() < 1e-12);
        Ok(())
    }
}
