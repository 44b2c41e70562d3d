use crate::core::{Boundary, CollisionEvent, Particle};
use glam::DVec2;

/// Below this squared length a separation vector is treated as zero and the
/// normal falls back to the edge perpendicular.
const EPS_LEN_SQ: f64 = 1e-24;

/// Closest point to `p` on the finite segment `a`-`b`.
///
/// Projects `p` onto the segment's line and clamps the projection parameter
/// to [0, 1]; a zero-length segment degrades to the single vertex `a`.
pub fn closest_point_on_segment(p: DVec2, a: DVec2, b: DVec2) -> DVec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= EPS_LEN_SQ {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + t * ab
}

/// Test one edge of the boundary against the particle's disc.
///
/// Returns a [`CollisionEvent`] when the center's distance to the segment is
/// strictly below the radius. The contact normal is the unit separation
/// vector from contact point to center; when that separation is (near) zero
/// the edge perpendicular oriented toward the boundary center is used
/// instead, so no zero vector is ever normalized. The event's wall velocity
/// is left zero; the orchestrator fills it in for a spinning boundary once
/// the contact point is known.
pub fn detect_edge(
    particle: &Particle,
    boundary: &Boundary,
    edge: usize,
    a: DVec2,
    b: DVec2,
) -> Option<CollisionEvent> {
    let contact = closest_point_on_segment(particle.pos, a, b);
    let diff = particle.pos - contact;
    let dist_sq = diff.length_squared();
    if dist_sq >= particle.radius() * particle.radius() {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist_sq > EPS_LEN_SQ {
        diff / dist
    } else {
        inward_perpendicular(a, b, boundary.center())
    };
    Some(CollisionEvent {
        edge,
        contact,
        normal,
        depth: particle.radius() - dist,
        wall_velocity: DVec2::ZERO,
    })
}

/// Apply the collision response for one flagged contact.
///
/// Velocity changes only for approaching contacts (`u·n < 0` in the wall's
/// rest frame); separating contacts are skipped so successive ticks do not
/// double-count a bounce. The position correction along the normal applies
/// unconditionally, guaranteeing the post-tick distance to the edge is at
/// least the radius. Boundary state is never mutated.
pub fn resolve(particle: &mut Particle, ev: &CollisionEvent, restitution: f64, friction: f64) {
    let u = particle.vel - ev.wall_velocity;
    let un = u.dot(ev.normal);
    if un < 0.0 {
        // Reflect with restitution, then bleed the tangential component.
        let reflected = u - (1.0 + restitution) * un * ev.normal;
        let normal_part = reflected.dot(ev.normal) * ev.normal;
        let tangent_part = (reflected - normal_part) * (1.0 - friction);
        particle.vel = normal_part + tangent_part + ev.wall_velocity;
    }
    particle.pos += ev.normal * ev.depth;
}

/// Unit perpendicular of `a`-`b` oriented toward `center` (the inward
/// convention). Falls back to the x axis if the edge itself is degenerate.
fn inward_perpendicular(a: DVec2, b: DVec2, center: DVec2) -> DVec2 {
    let ab = b - a;
    if ab.length_squared() <= EPS_LEN_SQ {
        let toward = center - a;
        if toward.length_squared() > EPS_LEN_SQ {
            return toward.normalize();
        }
        return DVec2::X;
    }
    let n = DVec2::new(-ab.y, ab.x).normalize();
    if n.dot(center - a) < 0.0 {
        -n
    } else {
        n
    }
}
