//! Physically based free-form deformation of a surface mesh.
//!
//! A coarse control lattice of point masses and damped springs is built
//! around the mesh, simulated with 4th-order Runge-Kutta under gravity with
//! pinned anchors, and each mesh vertex is reconstructed every frame as a
//! trilinear blend of its cell's eight corner masses.
//!
//! Main components:
//! - [`builder`] — lattice construction: grid particles, spring topology, cells.
//! - [`simulation`] — the simulation context and RK4 time integration.
//! - [`mapper`] — bind-time embedding and run-time trilinear reconstruction.
//! - [`lattice`] — the cell grid and its spatial lookup.
//! - [`particle`] / [`spring`] — the point-mass and damped-spring primitives.
//! - [`state`] — the flat position/velocity state vector the integrator works on.
//! - [`mesh`] — the immutable surface mesh an external loader supplies.
//! - [`config`] — tunable simulation parameters and the pinning rule.
//! - [`error`] — error types.
//! - [`types`] — shared index aliases.

pub mod builder;
pub mod cell;
pub mod config;
pub mod error;
pub mod lattice;
pub mod mapper;
pub mod mesh;
pub mod particle;
pub mod simulation;
pub mod spring;
pub mod state;
pub mod types;

pub use builder::{LatticeBuilder, LatticeParts};
pub use config::{PinRule, SimConfig};
pub use error::{LatticeError, Result};
pub use lattice::ControlLattice;
pub use mapper::{DeformationMapper, OutOfBoundsPolicy, VertexBinding};
pub use mesh::{SurfaceMesh, Triangle};
pub use particle::PointMass;
pub use simulation::{SimStatus, Simulation};
pub use spring::SpringLink;
pub use state::StateVector;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// End-to-end: build a lattice around a mesh, bind, simulate, deform.
    #[test]
    fn deformer_pipeline_runs() {
        let mesh = SurfaceMesh {
            positions: vec![
                Vec3::new(0.2, 0.3, 0.1),
                Vec3::new(0.8, 0.5, 0.6),
                Vec3::new(0.4, 0.9, 0.4),
            ],
            triangles: vec![Triangle {
                vertices: [0, 1, 2],
                normals: [0, 0, 0],
            }],
            normals: vec![Vec3::Z],
        };

        let (min, max) = mesh.padded_bounds(0.02).unwrap();
        let cfg = SimConfig {
            planes: 2,
            rows: 2,
            cols: 2,
            ..SimConfig::default()
        };
        let parts = LatticeBuilder::new(min, max, cfg).unwrap().build();
        let mapper = DeformationMapper::bind(
            &mesh,
            &parts.lattice,
            &parts.particles,
            OutOfBoundsPolicy::Reject,
        )
        .unwrap();

        let mut sim = Simulation::new(parts, &cfg);
        sim.start();
        for _ in 0..10 {
            sim.step().unwrap();
        }

        let mut deformed = Vec::new();
        mapper.deformed_positions(sim.lattice(), sim.particles(), &mut deformed);
        assert_eq!(deformed.len(), mesh.positions.len());

        // Gravity has pulled the free part of the lattice, so at least one
        // vertex has moved, and nothing went non-finite.
        assert!(deformed.iter().all(|p| p.is_finite()));
        assert!(
            deformed
                .iter()
                .zip(&mesh.positions)
                .any(|(&d, &r)| (d - r).length() > 1e-6)
        );
    }
}
