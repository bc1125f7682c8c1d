use glam::Vec3;

/// A single simulated point mass at one lattice vertex.
#[derive(Clone, Copy, Debug)]
pub struct PointMass {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Force accumulator; cleared at the start of every force pass.
    pub force: Vec3,
    pub mass: f32,
    /// Pinned particles receive no forces and act as fixed anchors.
    pub pinned: bool,
}

impl PointMass {
    /// Creates a particle at `position` with initial `velocity`.
    ///
    /// The mass is forced positive by taking its absolute value.
    pub fn new(position: Vec3, velocity: Vec3, mass: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            force: Vec3::ZERO,
            mass: mass.abs(),
            pinned: false,
        }
    }

    #[inline]
    pub fn clear_force(&mut self) {
        self.force = Vec3::ZERO;
    }

    #[inline]
    pub fn add_force(&mut self, f: Vec3) {
        self.force += f;
    }

    /// Accumulates the gravitational force `mass * g`, or nothing if the
    /// particle is pinned.
    pub fn apply_gravity(&mut self, g: Vec3) {
        if !self.pinned {
            self.add_force(self.mass * g);
        }
    }

    /// Derives acceleration from the accumulated force: `a = F / m`.
    #[inline]
    pub fn update_acceleration(&mut self) {
        self.acceleration = self.force / self.mass;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_mass_is_made_positive() {
        let p = PointMass::new(Vec3::ZERO, Vec3::ZERO, -2.5);
        assert_eq!(p.mass, 2.5);
    }

    #[test]
    fn gravity_scales_with_mass() {
        let mut p = PointMass::new(Vec3::ZERO, Vec3::ZERO, 4.0);
        p.apply_gravity(Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(p.force, Vec3::new(0.0, -4.0, 0.0));
    }

    #[test]
    fn pinned_particle_ignores_gravity() {
        let mut p = PointMass::new(Vec3::ZERO, Vec3::ZERO, 4.0);
        p.pinned = true;
        p.apply_gravity(Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(p.force, Vec3::ZERO);
    }

    #[test]
    fn forces_accumulate_until_cleared() {
        let mut p = PointMass::new(Vec3::ZERO, Vec3::ZERO, 2.0);
        p.add_force(Vec3::new(1.0, 0.0, 0.0));
        p.add_force(Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(p.force, Vec3::new(1.0, 3.0, 0.0));

        p.update_acceleration();
        assert_eq!(p.acceleration, Vec3::new(0.5, 1.5, 0.0));

        p.clear_force();
        assert_eq!(p.force, Vec3::ZERO);
    }
}
