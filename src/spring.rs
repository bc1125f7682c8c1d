use crate::error::{LatticeError, Result};
use crate::particle::PointMass;
use crate::types::{LinkId, ParticleId};

/// A damped spring connecting two point masses by index.
///
/// Links are fully assembled at construction; only the rest length may be
/// rewritten afterwards (the builder sets it to the bind-time edge length).
#[derive(Clone, Copy, Debug)]
pub struct SpringLink {
    pub stiffness: f32,
    pub damping: f32,
    pub rest_length: f32,
    /// The two endpoint particles, `endpoints[0] != endpoints[1]`.
    pub endpoints: [ParticleId; 2],
}

impl SpringLink {
    pub fn new(i: ParticleId, j: ParticleId, stiffness: f32, damping: f32, rest_length: f32) -> Self {
        debug_assert_ne!(i, j, "spring link must connect two distinct particles");
        Self {
            stiffness,
            damping,
            rest_length,
            endpoints: [i, j],
        }
    }

    /// Evaluates the spring-damper force pair and accumulates it into both
    /// endpoint particles.
    ///
    /// For endpoints `i`, `j` with separation `d = x_j − x_i` of length `l`:
    /// the elastic force on `i` is `k (l − l_rest) û` and the damping force
    /// is `d ((v_j − v_i) · û) û`, with `û = d / l`; `j` receives the exact
    /// negation. A pinned endpoint receives zero force. The `link` index is
    /// only used to label the error when the endpoints coincide.
    pub fn apply_forces(&self, link: LinkId, particles: &mut [PointMass]) -> Result<()> {
        let [i, j] = self.endpoints;

        let delta = particles[j].position - particles[i].position;
        let length = delta.length();
        if length == 0.0 {
            return Err(LatticeError::DegenerateLink { link, particle: i });
        }
        let unit = delta / length;

        let elastic = self.stiffness * (length - self.rest_length);
        let rel_vel = (particles[j].velocity - particles[i].velocity).dot(unit);
        let f_i = (elastic + self.damping * rel_vel) * unit;

        if !particles[i].pinned {
            particles[i].add_force(f_i);
        }
        if !particles[j].pinned {
            particles[j].add_force(-f_i);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn pair(xi: Vec3, xj: Vec3, vi: Vec3, vj: Vec3) -> Vec<PointMass> {
        vec![PointMass::new(xi, vi, 1.0), PointMass::new(xj, vj, 1.0)]
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        // Rest length 1, actual length 2 along x: tension of k * 1.
        let mut ps = pair(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
        );
        let link = SpringLink::new(0, 1, 10.0, 0.0, 1.0);
        link.apply_forces(0, &mut ps).unwrap();

        assert_relative_eq!(ps[0].force.x, 10.0);
        assert_relative_eq!(ps[1].force.x, -10.0);
        assert_eq!(ps[0].force.y, 0.0);
        assert_eq!(ps[0].force.z, 0.0);
    }

    #[test]
    fn forces_obey_newtons_third_law() {
        // Arbitrary positions and velocities, both coefficients nonzero.
        let mut ps = pair(
            Vec3::new(0.3, -1.2, 2.0),
            Vec3::new(-0.7, 0.4, 1.1),
            Vec3::new(0.1, 0.0, -0.5),
            Vec3::new(-0.2, 0.9, 0.3),
        );
        let link = SpringLink::new(0, 1, 7.3, 1.9, 0.8);
        link.apply_forces(0, &mut ps).unwrap();

        let sum = ps[0].force + ps[1].force;
        assert_relative_eq!(sum.length(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn pinned_endpoint_receives_no_force() {
        let mut ps = pair(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
        );
        ps[0].pinned = true;
        let link = SpringLink::new(0, 1, 10.0, 0.5, 1.0);
        link.apply_forces(0, &mut ps).unwrap();

        assert_eq!(ps[0].force, Vec3::ZERO);
        assert!(ps[1].force.x < 0.0);
    }

    #[test]
    fn damping_resists_separation() {
        // Endpoints at rest length but moving apart: only damping acts,
        // and it opposes the separation.
        let mut ps = pair(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
        );
        let link = SpringLink::new(0, 1, 10.0, 2.0, 1.0);
        link.apply_forces(0, &mut ps).unwrap();

        assert_relative_eq!(ps[0].force.x, 2.0);
        assert_relative_eq!(ps[1].force.x, -2.0);
    }

    #[test]
    fn coincident_endpoints_error() {
        let mut ps = pair(Vec3::ONE, Vec3::ONE, Vec3::ZERO, Vec3::ZERO);
        let link = SpringLink::new(0, 1, 10.0, 0.0, 1.0);
        let err = link.apply_forces(3, &mut ps).unwrap_err();
        assert_eq!(err, LatticeError::DegenerateLink { link: 3, particle: 0 });
    }

    #[test]
    fn forces_accumulate_over_multiple_links() {
        // Two identical links touching the same particles double the force.
        let mut ps = pair(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
        );
        let link = SpringLink::new(0, 1, 10.0, 0.0, 1.0);
        link.apply_forces(0, &mut ps).unwrap();
        link.apply_forces(1, &mut ps).unwrap();

        assert_relative_eq!(ps[0].force.x, 20.0);
    }
}
