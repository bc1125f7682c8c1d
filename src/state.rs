use crate::error::{LatticeError, Result};
use crate::particle::PointMass;
use glam::Vec3;

/// Flat algebraic state of the whole particle system.
///
/// For `N` particles the vector holds `2N` entries: slots `[0, N)` are
/// positions and slots `[N, 2N)` are velocities, or their derivatives
/// (velocities and accelerations) when the vector holds the output of the
/// dynamics function. Keeping both halves in one flat array makes the
/// Runge-Kutta stage arithmetic a pair of whole-vector operations.
///
/// The vector does not own any particles; it is copied to and from the
/// particle array around each force evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    entries: Vec<Vec3>,
    particle_count: usize,
}

impl StateVector {
    /// Creates an all-zero state for `particle_count` particles.
    pub fn zeroed(particle_count: usize) -> Self {
        Self {
            entries: vec![Vec3::ZERO; particle_count * 2],
            particle_count,
        }
    }

    /// Captures the current positions and velocities of `particles`.
    pub fn from_particles(particles: &[PointMass]) -> Self {
        let n = particles.len();
        let mut entries = Vec::with_capacity(n * 2);
        entries.extend(particles.iter().map(|p| p.position));
        entries.extend(particles.iter().map(|p| p.velocity));
        Self {
            entries,
            particle_count: n,
        }
    }

    /// Writes this state's positions and velocities back into `particles`.
    ///
    /// ### Errors
    /// [`LatticeError::LengthMismatch`] if `particles` does not match this
    /// vector's particle count.
    pub fn write_to_particles(&self, particles: &mut [PointMass]) -> Result<()> {
        if particles.len() != self.particle_count {
            return Err(LatticeError::LengthMismatch {
                left: self.len(),
                right: particles.len() * 2,
            });
        }
        for (i, p) in particles.iter_mut().enumerate() {
            p.position = self.entries[i];
            p.velocity = self.entries[i + self.particle_count];
        }
        Ok(())
    }

    /// Number of `Vec3` entries (twice the particle count).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Position slot (or position-derivative slot) for particle `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        self.entries[i]
    }

    /// Velocity slot (or velocity-derivative slot) for particle `i`.
    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        self.entries[i + self.particle_count]
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, v: Vec3) {
        self.entries[i] = v;
    }

    #[inline]
    pub fn set_velocity(&mut self, i: usize, v: Vec3) {
        self.entries[i + self.particle_count] = v;
    }

    /// Entry-wise sum of two state vectors.
    ///
    /// ### Errors
    /// [`LatticeError::LengthMismatch`] if the operands have different
    /// lengths; the operation never truncates silently.
    pub fn add(&self, other: &StateVector) -> Result<StateVector> {
        if self.len() != other.len() {
            return Err(LatticeError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        let entries = self
            .entries
            .iter()
            .zip(&other.entries)
            .map(|(a, b)| *a + *b)
            .collect();
        Ok(StateVector {
            entries,
            particle_count: self.particle_count,
        })
    }

    /// Entry-wise scaling by `factor`.
    pub fn scale(&self, factor: f32) -> StateVector {
        StateVector {
            entries: self.entries.iter().map(|v| *v * factor).collect(),
            particle_count: self.particle_count,
        }
    }
}
