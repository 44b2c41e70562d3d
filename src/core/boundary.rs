use crate::error::{Error, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// The rotating regular convex polygon the particle is confined by.
///
/// Center, circumradius and side count are fixed for the boundary's lifetime;
/// only the rotation angle mutates, by [`Boundary::advance`]. Vertices are
/// derived on demand, never stored:
///
/// `vertex_k(angle) = center + R * (cos(angle + 2πk/N), sin(angle + 2πk/N))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    center: DVec2,
    circumradius: f64,
    sides: usize,
    /// Current rotation angle in radians, kept in [0, 2π).
    angle: f64,
    /// Angular velocity in rad/s; 0 for a stationary boundary, negative for
    /// reverse spin.
    angular_velocity: f64,
}

impl Boundary {
    /// Create a regular polygon boundary at `angle = 0`.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `sides < 3`, `circumradius` is not finite
    ///   and positive, or any other component is NaN/inf.
    pub fn new(
        center: DVec2,
        circumradius: f64,
        sides: usize,
        angular_velocity: f64,
    ) -> Result<Self> {
        if sides < 3 {
            return Err(Error::InvalidParam("sides must be >= 3".into()));
        }
        if !circumradius.is_finite() || circumradius <= 0.0 {
            return Err(Error::InvalidParam(
                "circumradius must be finite and > 0".into(),
            ));
        }
        if !center.is_finite() {
            return Err(Error::InvalidParam("center must be finite".into()));
        }
        if !angular_velocity.is_finite() {
            return Err(Error::InvalidParam(
                "angular_velocity must be finite".into(),
            ));
        }
        Ok(Self {
            center,
            circumradius,
            sides,
            angle: 0.0,
            angular_velocity,
        })
    }

    /// Override the initial rotation angle (wrapped into [0, 2π)).
    pub fn with_angle(mut self, angle: f64) -> Result<Self> {
        if !angle.is_finite() {
            return Err(Error::InvalidParam("angle must be finite".into()));
        }
        self.angle = angle.rem_euclid(TAU);
        Ok(self)
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    #[inline]
    pub fn circumradius(&self) -> f64 {
        self.circumradius
    }

    #[inline]
    pub fn sides(&self) -> usize {
        self.sides
    }

    /// Current rotation angle in [0, 2π).
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Perpendicular distance from the center to an edge midpoint.
    #[inline]
    pub fn apothem(&self) -> f64 {
        self.circumradius * (PI / self.sides as f64).cos()
    }

    /// Advance the rotation by one time step: `angle += ω * dt`, wrapped
    /// into [0, 2π).
    pub fn advance(&mut self, dt: f64) {
        self.angle = (self.angle + self.angular_velocity * dt).rem_euclid(TAU);
    }

    /// Vertices for an arbitrary rotation angle; pure function of `angle`.
    pub fn vertices_at(&self, angle: f64) -> Vec<DVec2> {
        (0..self.sides)
            .map(|k| {
                let theta = angle + TAU * k as f64 / self.sides as f64;
                self.center + self.circumradius * DVec2::from_angle(theta)
            })
            .collect()
    }

    /// Vertices at the current rotation angle, in order.
    pub fn vertices(&self) -> Vec<DVec2> {
        self.vertices_at(self.angle)
    }

    /// Edges at the current rotation angle as `(vertex_k, vertex_{k+1})`
    /// pairs, ascending k, closing back to vertex 0.
    pub fn edges(&self) -> Vec<(DVec2, DVec2)> {
        let verts = self.vertices();
        (0..verts.len())
            .map(|k| (verts[k], verts[(k + 1) % verts.len()]))
            .collect()
    }

    /// Instantaneous velocity of the wall material at `point` due to the
    /// boundary's rotation: `w = ω × r = ω * (-r_y, r_x)`.
    #[inline]
    pub fn wall_velocity_at(&self, point: DVec2) -> DVec2 {
        let r = point - self.center;
        self.angular_velocity * DVec2::new(-r.y, r.x)
    }

    /// True if `point` lies inside (or on) every edge's inward half-plane.
    pub fn contains(&self, point: DVec2) -> bool {
        self.edges().into_iter().all(|(a, b)| {
            let edge = b - a;
            // Inward perpendicular, oriented toward the center.
            let mut n = DVec2::new(-edge.y, edge.x);
            if n.dot(self.center - a) < 0.0 {
                n = -n;
            }
            n.dot(point - a) >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_boundary_rejected() {
        assert!(Boundary::new(DVec2::ZERO, 1.0, 2, 0.0).is_err());
        assert!(Boundary::new(DVec2::ZERO, 0.0, 6, 0.0).is_err());
        assert!(Boundary::new(DVec2::ZERO, f64::NAN, 6, 0.0).is_err());
        assert!(Boundary::new(DVec2::ZERO, 1.0, 6, f64::INFINITY).is_err());
    }

    #[test]
    fn vertices_lie_on_circumcircle() -> Result<()> {
        let b = Boundary::new(DVec2::new(3.0, -2.0), 5.0, 6, 1.0)?;
        for angle in [0.0, 0.37, 1.9, 4.4, 11.0] {
            for v in b.vertices_at(angle) {
                let d = (v - b.center()).length();
                assert!(
                    (d - 5.0).abs() < 1e-12,
                    "vertex at distance {d} from center for angle {angle}"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn advance_wraps_angle() -> Result<()> {
        let mut b = Boundary::new(DVec2::ZERO, 1.0, 4, 3.0)?;
        for _ in 0..100 {
            b.advance(0.1);
            assert!((0.0..TAU).contains(&b.angle()));
        }
        // Negative spin wraps from below.
        let mut b = Boundary::new(DVec2::ZERO, 1.0, 4, -1.0)?;
        b.advance(0.5);
        assert!((b.angle() - (TAU - 0.5)).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn hexagon_apothem() -> Result<()> {
        let b = Boundary::new(DVec2::ZERO, 250.0, 6, 0.0)?;
        let expected = 250.0 * (3.0_f64).sqrt() / 2.0;
        assert!((b.apothem() - expected).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn wall_velocity_is_tangential() -> Result<()> {
        let b = Boundary::new(DVec2::ZERO, 2.0, 6, 1.5)?;
        let p = DVec2::new(2.0, 0.0);
        let w = b.wall_velocity_at(p);
        // ω × r for r = (2, 0): (0, 3). Perpendicular to r.
        assert!((w - DVec2::new(0.0, 3.0)).length() < 1e-12);
        assert!(w.dot(p - b.center()).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn containment() -> Result<()> {
        let b = Boundary::new(DVec2::ZERO, 1.0, 6, 0.0)?;
        assert!(b.contains(DVec2::ZERO));
        assert!(b.contains(DVec2::new(0.5, 0.0)));
        assert!(!b.contains(DVec2::new(1.5, 0.0)));
        // Just past the apothem, toward an edge midpoint.
        assert!(!b.contains(DVec2::new(0.0, b.apothem() + 1e-6)));
        Ok(())
    }
}
