use glam::DVec2;

/// A single particle-edge contact realized during one tick.
///
/// Transient: the simulation rebuilds its event list every tick and the
/// driver reads it back before the next `step` call (renderers use it for
/// bounce-triggered effects). Nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Index of the flagged edge (ascending vertex order).
    pub edge: usize,
    /// Closest point on the edge segment to the particle center.
    pub contact: DVec2,
    /// Unit contact normal, inward-facing by convention (toward the boundary
    /// interior). Points outward only when the particle has tunneled past
    /// the edge line within the tick.
    pub normal: DVec2,
    /// Penetration depth: `radius - distance`, > 0 for a flagged contact.
    pub depth: f64,
    /// Instantaneous wall velocity at the contact point (zero for a
    /// stationary boundary or in the co-rotating frame).
    pub wall_velocity: DVec2,
}

impl CollisionEvent {
    /// True if the given velocity approaches the wall along the contact
    /// normal (the resolver only changes velocity for approaching contacts).
    #[inline]
    pub fn approaching(&self, vel: DVec2) -> bool {
        (vel - self.wall_velocity).dot(self.normal) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approaching_uses_relative_velocity() {
        let ev = CollisionEvent {
            edge: 0,
            contact: DVec2::new(1.0, 0.0),
            normal: DVec2::new(-1.0, 0.0),
            depth: 0.05,
            wall_velocity: DVec2::ZERO,
        };
        assert!(ev.approaching(DVec2::new(2.0, 0.0)));
        assert!(!ev.approaching(DVec2::new(-2.0, 0.0)));

        // A wall moving outward faster than the particle is separating.
        let moving = CollisionEvent {
            wall_velocity: DVec2::new(3.0, 0.0),
            ..ev
        };
        assert!(!moving.approaching(DVec2::new(2.0, 0.0)));
    }
}
