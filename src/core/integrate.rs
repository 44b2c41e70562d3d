use crate::core::Particle;
use crate::error::{Error, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Velocity-loss policy applied during integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragModel {
    /// No drag.
    None,
    /// Per-tick multiplicative damping: `v *= factor` after the velocity
    /// update, `factor` in (0, 1]. The "air friction" of the bouncing-ball
    /// variants; note the loss per unit time depends on the tick rate.
    Damping { factor: f64 },
    /// Quadratic aerodynamic drag added to the acceleration before the
    /// velocity update: `a = -0.5 * ρ * |v| * v * cd * area / m`.
    ///
    /// With `scale_height` set, density decays exponentially with altitude:
    /// `ρ(h) = density * exp(-h / H)` (descent-style scenarios).
    Aerodynamic {
        /// Reference density ρ0 (at altitude 0).
        density: f64,
        /// Drag coefficient.
        drag_coeff: f64,
        /// Reference cross-sectional area.
        area: f64,
        /// Atmosphere scale height H; `None` for uniform density.
        scale_height: Option<f64>,
    },
}

impl DragModel {
    /// Validate parameters at configuration time.
    pub fn validate(&self) -> Result<()> {
        match *self {
            DragModel::None => Ok(()),
            DragModel::Damping { factor } => {
                if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
                    return Err(Error::InvalidParam(
                        "damping factor must be in (0, 1]".into(),
                    ));
                }
                Ok(())
            }
            DragModel::Aerodynamic {
                density,
                drag_coeff,
                area,
                scale_height,
            } => {
                for (name, v) in [
                    ("density", density),
                    ("drag_coeff", drag_coeff),
                    ("area", area),
                ] {
                    if !v.is_finite() || v < 0.0 {
                        return Err(Error::InvalidParam(format!(
                            "{name} must be finite and >= 0"
                        )));
                    }
                }
                if let Some(h) = scale_height {
                    if !h.is_finite() || h <= 0.0 {
                        return Err(Error::InvalidParam(
                            "scale_height must be finite and > 0".into(),
                        ));
                    }
                }
                Ok(())
            }
        }
    }

    /// Drag acceleration for a particle of mass `m` moving at `vel`, at the
    /// given altitude. Zero for the multiplicative policy, which acts on the
    /// velocity itself.
    pub fn acceleration(&self, vel: DVec2, mass: f64, altitude: f64) -> DVec2 {
        match *self {
            DragModel::None | DragModel::Damping { .. } => DVec2::ZERO,
            DragModel::Aerodynamic {
                density,
                drag_coeff,
                area,
                scale_height,
            } => {
                let rho = match scale_height {
                    Some(h) => density * (-altitude / h).exp(),
                    None => density,
                };
                -0.5 * rho * vel.length() * drag_coeff * area / mass * vel
            }
        }
    }

    /// Multiplicative per-tick velocity factor (1 for the other policies).
    #[inline]
    pub fn velocity_factor(&self) -> f64 {
        match *self {
            DragModel::Damping { factor } => factor,
            _ => 1.0,
        }
    }
}

/// Advance a particle by one semi-implicit (symplectic) Euler step:
/// velocity from acceleration first, then position from the new velocity.
///
/// `accel` is the full non-drag acceleration for the tick (gravity, plus the
/// pseudo-forces in rotating-frame mode); `altitude` feeds the
/// altitude-dependent density of [`DragModel::Aerodynamic`].
pub fn semi_implicit_step(
    particle: &mut Particle,
    accel: DVec2,
    drag: &DragModel,
    altitude: f64,
    dt: f64,
) {
    let a = accel + drag.acceleration(particle.vel, particle.mass(), altitude);
    particle.vel = (particle.vel + a * dt) * drag.velocity_factor();
    particle.pos += particle.vel * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn validate_rejects_bad_params() {
        assert!(DragModel::Damping { factor: 0.0 }.validate().is_err());
        assert!(DragModel::Damping { factor: 1.5 }.validate().is_err());
        assert!(DragModel::Damping { factor: 0.99 }.validate().is_ok());
        assert!(DragModel::Aerodynamic {
            density: -1.0,
            drag_coeff: 1.0,
            area: 1.0,
            scale_height: None,
        }
        .validate()
        .is_err());
        assert!(DragModel::Aerodynamic {
            density: 0.02,
            drag_coeff: 1.0,
            area: 63.6,
            scale_height: Some(8500.0),
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn symplectic_order_velocity_first() -> crate::error::Result<()> {
        // One step from rest under gravity: v' = g*dt, p' = p + v'*dt
        // (plain Euler would leave the position unchanged).
        let mut p = Particle::new(DVec2::ZERO, DVec2::ZERO, 1.0)?;
        let g = DVec2::new(0.0, -10.0);
        semi_implicit_step(&mut p, g, &DragModel::None, 0.0, 0.5);
        assert_relative_eq!(p.vel.y, -5.0, max_relative = 1e-12);
        assert_relative_eq!(p.pos.y, -2.5, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn damping_applies_after_velocity_update() -> crate::error::Result<()> {
        let mut p = Particle::new(DVec2::ZERO, DVec2::new(10.0, 0.0), 1.0)?;
        let g = DVec2::new(0.0, -10.0);
        semi_implicit_step(&mut p, g, &DragModel::Damping { factor: 0.9 }, 0.0, 0.1);
        // v' = (v + g*dt) * k, componentwise.
        assert_relative_eq!(p.vel.x, 9.0, max_relative = 1e-12);
        assert_relative_eq!(p.vel.y, -0.9, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn aerodynamic_drag_opposes_velocity() {
        let drag = DragModel::Aerodynamic {
            density: 0.02,
            drag_coeff: 1.0,
            area: 63.6,
            scale_height: None,
        };
        let v = DVec2::new(0.0, -100.0);
        let a = drag.acceleration(v, 1000.0, 0.0);
        // -0.5 * 0.02 * 100 * 1 * 63.6 / 1000 * (0, -100) = (0, 6.36)
        assert_relative_eq!(a.y, 6.36, max_relative = 1e-12);
        assert_eq!(a.x, 0.0);
        assert!(a.dot(v) < 0.0);
    }

    #[test]
    fn density_decays_with_altitude() {
        let drag = DragModel::Aerodynamic {
            density: 1.0,
            drag_coeff: 1.0,
            area: 1.0,
            scale_height: Some(100.0),
        };
        let v = DVec2::new(50.0, 0.0);
        let low = drag.acceleration(v, 1.0, 0.0).length();
        let high = drag.acceleration(v, 1.0, 100.0).length();
        assert_relative_eq!(high, low * (-1.0_f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn zero_velocity_produces_no_drag_accel() {
        let drag = DragModel::Aerodynamic {
            density: 1.0,
            drag_coeff: 1.0,
            area: 1.0,
            scale_height: None,
        };
        assert_eq!(drag.acceleration(DVec2::ZERO, 1.0, 0.0), DVec2::ZERO);
    }
}
