//! Bind-time embedding of mesh vertices and run-time reconstruction.
//!
//! At bind time each mesh vertex is located in its enclosing lattice cell
//! and given local parametric coordinates `(u, v, w) ∈ [0,1]³` relative to
//! that cell's bind-time bounds. At run time the deformed vertex position is
//! the trilinear blend of the cell's *current* eight corner positions, so
//! an undeformed lattice reproduces the mesh exactly.

use crate::error::{LatticeError, Result};
use crate::lattice::ControlLattice;
use crate::mesh::SurfaceMesh;
use crate::particle::PointMass;
use crate::types::CellId;
use glam::Vec3;

/// What to do with a mesh vertex that no lattice cell contains at bind time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutOfBoundsPolicy {
    /// Fail the bind with [`LatticeError::OutOfBoundsVertex`].
    Reject,
    /// Clamp the vertex into the lattice bounds and bind it to the cell
    /// found there; the vertex deforms as if it sat on the lattice surface.
    Clamp,
    /// Leave the vertex unbound; it keeps its rest position forever.
    Exclude,
}

/// Per-vertex record: enclosing cell plus local parametric coordinates,
/// computed once at bind time and read-only thereafter.
#[derive(Clone, Copy, Debug)]
pub struct VertexBinding {
    pub cell: CellId,
    pub uvw: Vec3,
}

/// Maps mesh vertices through the deforming lattice.
#[derive(Debug)]
pub struct DeformationMapper {
    bindings: Vec<Option<VertexBinding>>,
    rest_positions: Vec<Vec3>,
}

impl DeformationMapper {
    /// Binds every mesh vertex to its enclosing cell.
    ///
    /// Must run before the simulation starts: the parametric coordinates
    /// are computed against the particles' bind-time positions.
    ///
    /// ### Errors
    /// [`LatticeError::OutOfBoundsVertex`] if a vertex lies outside the
    /// lattice and `policy` is [`OutOfBoundsPolicy::Reject`].
    pub fn bind(
        mesh: &SurfaceMesh,
        lattice: &ControlLattice,
        particles: &[PointMass],
        policy: OutOfBoundsPolicy,
    ) -> Result<Self> {
        let mut bindings = Vec::with_capacity(mesh.positions.len());
        for (vertex, &pos) in mesh.positions.iter().enumerate() {
            let binding = match lattice.locate_cell(pos) {
                Some(cell) => Some(bind_point(pos, cell, lattice, particles)),
                None => match policy {
                    OutOfBoundsPolicy::Reject => {
                        return Err(LatticeError::OutOfBoundsVertex { vertex });
                    }
                    OutOfBoundsPolicy::Clamp => {
                        let clamped = lattice.clamp_point(pos);
                        // Rounding at the high faces can leave the clamped
                        // point a hair outside every cell; fall back to the
                        // cell with the nearest center.
                        let cell = lattice
                            .locate_cell(clamped)
                            .unwrap_or_else(|| nearest_cell(clamped, lattice));
                        Some(bind_point(clamped, cell, lattice, particles))
                    }
                    OutOfBoundsPolicy::Exclude => None,
                },
            };
            bindings.push(binding);
        }
        Ok(Self {
            bindings,
            rest_positions: mesh.positions.clone(),
        })
    }

    /// The binding for `vertex`, or `None` if it was excluded.
    #[inline]
    pub fn binding(&self, vertex: usize) -> Option<&VertexBinding> {
        self.bindings[vertex].as_ref()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.bindings.len()
    }

    /// Reconstructs the deformed position of one vertex from the current
    /// corner positions of its cell. Unbound vertices return their rest
    /// position.
    pub fn deformed_position(
        &self,
        vertex: usize,
        lattice: &ControlLattice,
        particles: &[PointMass],
    ) -> Vec3 {
        match self.bindings[vertex] {
            Some(binding) => trilinear(&binding, lattice, particles),
            None => self.rest_positions[vertex],
        }
    }

    /// Reconstructs every vertex into `out` (cleared first); the per-frame
    /// output an external renderer consumes.
    pub fn deformed_positions(
        &self,
        lattice: &ControlLattice,
        particles: &[PointMass],
        out: &mut Vec<Vec3>,
    ) {
        out.clear();
        out.reserve(self.bindings.len());
        for vertex in 0..self.bindings.len() {
            out.push(self.deformed_position(vertex, lattice, particles));
        }
    }
}

/// Local parametric coordinates of `pos` within `cell`, from the bind-time
/// corner positions: corner 1 differs from corner 0 along x, corner 2 along
/// y, corner 4 along z.
fn bind_point(
    pos: Vec3,
    cell: CellId,
    lattice: &ControlLattice,
    particles: &[PointMass],
) -> VertexBinding {
    let corners = &lattice.cells[cell].corners;
    let origin = particles[corners[0]].position;
    let uvw = Vec3::new(
        (pos.x - origin.x) / (particles[corners[1]].position.x - origin.x),
        (pos.y - origin.y) / (particles[corners[2]].position.y - origin.y),
        (pos.z - origin.z) / (particles[corners[4]].position.z - origin.z),
    )
    .clamp(Vec3::ZERO, Vec3::ONE);
    VertexBinding { cell, uvw }
}

/// Trilinear blend of the cell's current corner positions: the corner at
/// local offset `(a, b, c) ∈ {0,1}³` weighs
/// `(a?u:1−u)·(b?v:1−v)·(c?w:1−w)`.
fn trilinear(binding: &VertexBinding, lattice: &ControlLattice, particles: &[PointMass]) -> Vec3 {
    let Vec3 { x: u, y: v, z: w } = binding.uvw;
    let corners = &lattice.cells[binding.cell].corners;

    let mut pos = Vec3::ZERO;
    for (corner, &id) in corners.iter().enumerate() {
        let wu = if corner & 1 != 0 { u } else { 1.0 - u };
        let wv = if corner & 2 != 0 { v } else { 1.0 - v };
        let ww = if corner & 4 != 0 { w } else { 1.0 - w };
        pos += wu * wv * ww * particles[id].position;
    }
    pos
}

/// Cell whose center is closest to `point`; total and deterministic
/// (first-in-scan-order wins ties).
fn nearest_cell(point: Vec3, lattice: &ControlLattice) -> CellId {
    let mut best = 0;
    let mut best_d2 = f32::MAX;
    for (id, cell) in lattice.cells.iter().enumerate() {
        let center = (cell.min + cell.max) / 2.0;
        let d2 = (center - point).length_squared();
        if d2 < best_d2 {
            best_d2 = d2;
            best = id;
        }
    }
    best
}
