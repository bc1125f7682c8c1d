//! The simulation context and its RK4 time integrator.
//!
//! [`Simulation`] owns the particle array, the spring links, the control
//! lattice, and the authoritative [`StateVector`]. One fixed-size time step
//! is computed to completion before the next begins; there is no hidden
//! global state.
//!
//! The dynamics function reads the particle array, so every Runge-Kutta
//! stage first loads its (possibly perturbed) stage state into the
//! particles before evaluating forces; otherwise K2..K4 would see the
//! state from the start of the step.

use crate::builder::LatticeParts;
use crate::config::SimConfig;
use crate::error::Result;
use crate::lattice::ControlLattice;
use crate::particle::PointMass;
use crate::spring::SpringLink;
use crate::state::StateVector;
use glam::Vec3;

/// Whether the simulation advances on [`Simulation::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimStatus {
    Stopped,
    Running,
}

/// A running lattice simulation: particles, springs, lattice, and the
/// authoritative state vector, advanced with classic 4th-order Runge-Kutta.
#[derive(Debug)]
pub struct Simulation {
    particles: Vec<PointMass>,
    links: Vec<SpringLink>,
    lattice: ControlLattice,
    state: StateVector,
    gravity: Vec3,
    time_step: f32,
    step_count: u64,
    time: f32,
    status: SimStatus,
}

impl Simulation {
    /// Wraps built lattice parts into a stopped simulation at `t = 0`.
    pub fn new(parts: LatticeParts, config: &SimConfig) -> Self {
        let state = StateVector::from_particles(&parts.particles);
        Self {
            particles: parts.particles,
            links: parts.links,
            lattice: parts.lattice,
            state,
            gravity: config.gravity,
            time_step: config.time_step,
            step_count: 0,
            time: 0.0,
            status: SimStatus::Stopped,
        }
    }

    /// Starts the simulation. Calling this while already running is a no-op.
    pub fn start(&mut self) {
        self.status = SimStatus::Running;
    }

    /// Stops the simulation; [`Simulation::step`] becomes a no-op.
    pub fn stop(&mut self) {
        self.status = SimStatus::Stopped;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == SimStatus::Running
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// The control lattice (bind-time cell bounds, grid shape).
    #[inline]
    pub fn lattice(&self) -> &ControlLattice {
        &self.lattice
    }

    /// Current particles, for deformation and debug rendering.
    #[inline]
    pub fn particles(&self) -> &[PointMass] {
        &self.particles
    }

    /// Spring links, for drawing the lattice wireframe.
    #[inline]
    pub fn links(&self) -> &[SpringLink] {
        &self.links
    }

    #[inline]
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// The system dynamics function `F(state, t)`.
    ///
    /// Loads `state` into the particle array, then:
    /// 1. copies the velocity half into the position-derivative half,
    /// 2. clears every force accumulator and applies gravity,
    /// 3. evaluates every spring link,
    /// 4. writes `a = F/m` into the velocity-derivative half.
    fn derivative(&mut self, state: &StateVector, _time: f32) -> Result<StateVector> {
        state.write_to_particles(&mut self.particles)?;

        let n = state.particle_count();
        let mut deriv = StateVector::zeroed(n);
        for i in 0..n {
            deriv.set_position(i, state.velocity(i));
        }

        for p in &mut self.particles {
            p.clear_force();
            p.apply_gravity(self.gravity);
        }
        for (li, link) in self.links.iter().enumerate() {
            link.apply_forces(li, &mut self.particles)?;
        }
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.update_acceleration();
            deriv.set_velocity(i, p.acceleration);
        }
        Ok(deriv)
    }

    /// Advances the simulation by one fixed time step (no-op when stopped).
    ///
    /// ### Errors
    /// [`crate::error::LatticeError::DegenerateLink`] if two linked
    /// particles coincide mid-step. The authoritative state is left
    /// unchanged and the particle mirror is restored, so the caller may
    /// stop, tweak, or retry.
    pub fn step(&mut self) -> Result<()> {
        if self.status == SimStatus::Stopped {
            return Ok(());
        }
        match self.rk4_step() {
            Ok(new_state) => {
                new_state.write_to_particles(&mut self.particles)?;
                self.state = new_state;
                self.step_count += 1;
                // Fixed step size: derive t from the counter instead of
                // accumulating floating-point additions.
                self.time = self.step_count as f32 * self.time_step;
                Ok(())
            }
            Err(e) => {
                self.state.write_to_particles(&mut self.particles)?;
                Err(e)
            }
        }
    }

    /// One classic RK4 update of the authoritative state.
    fn rk4_step(&mut self) -> Result<StateVector> {
        let h = self.time_step;
        let t = self.time;
        let s0 = self.state.clone();

        let k1 = self.derivative(&s0, t)?;
        let k2 = self.derivative(&s0.add(&k1.scale(h / 2.0))?, t + h / 2.0)?;
        let k3 = self.derivative(&s0.add(&k2.scale(h / 2.0))?, t + h / 2.0)?;
        let k4 = self.derivative(&s0.add(&k3.scale(h))?, t + h)?;

        let weighted = k1
            .add(&k2.scale(2.0))?
            .add(&k3.scale(2.0))?
            .add(&k4)?
            .scale(h / 6.0);
        s0.add(&weighted)
    }
}
