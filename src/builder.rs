//! Construction of the control lattice: particles, spring topology, cells.
//!
//! Given a bounding box and a cell resolution of L planes × M rows × N
//! columns, the builder produces:
//!
//! 1. `(L+1)(M+1)(N+1)` point masses on a regular grid spanning the box,
//!    with the total lattice mass divided evenly among them.
//! 2. Spring links per cell: interior body diagonals plus, for each of the
//!    three face directions, one side's edges and diagonals, with the far
//!    boundary filled in at the last cell of the row, column, or plane.
//!    Shared faces are emitted once; edges along shared cell borders are
//!    reached from both adjacent face families and so carry two links. The
//!    total is exactly `16·L·M·N + 4·M·L + 4·N·L + 4·M·N`.
//! 3. `L·M·N` cells, each holding its eight corner indices and its
//!    bind-time bounding box.

use crate::cell::Cell;
use crate::config::{PinRule, SimConfig};
use crate::error::{LatticeError, Result};
use crate::lattice::ControlLattice;
use crate::particle::PointMass;
use crate::spring::SpringLink;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Everything the builder produces; the pieces are deliberately separate so
/// the lattice can index into a particle array it does not own.
#[derive(Debug)]
pub struct LatticeParts {
    pub lattice: ControlLattice,
    pub particles: Vec<PointMass>,
    pub links: Vec<SpringLink>,
}

/// Builder for a lattice spanning a bounding box at a given resolution.
pub struct LatticeBuilder {
    min: Vec3,
    max: Vec3,
    config: SimConfig,
}

impl LatticeBuilder {
    /// Validates the resolution and bounding box.
    ///
    /// ### Errors
    /// - [`LatticeError::InvalidResolution`] if any axis has zero cells.
    /// - [`LatticeError::DegenerateBounds`] if the box has non-positive
    ///   extent on any axis (zero-size cells would break the spatial
    ///   lookup and every rest length).
    pub fn new(min: Vec3, max: Vec3, config: SimConfig) -> Result<Self> {
        if config.planes == 0 || config.rows == 0 || config.cols == 0 {
            return Err(LatticeError::InvalidResolution {
                planes: config.planes,
                rows: config.rows,
                cols: config.cols,
            });
        }
        let extent = max - min;
        if extent.x <= 0.0 || extent.y <= 0.0 || extent.z <= 0.0 {
            return Err(LatticeError::DegenerateBounds { extent });
        }
        Ok(Self { min, max, config })
    }

    /// Builds the lattice with all particles at rest.
    pub fn build(self) -> LatticeParts {
        self.build_inner(|| Vec3::ZERO)
    }

    /// Builds the lattice with randomized initial velocities: each particle
    /// gets a uniformly random direction on the unit sphere scaled by a
    /// speed drawn from `speed_avg ± speed_range`.
    pub fn build_with_random_velocities(
        self,
        speed_avg: f32,
        speed_range: f32,
        rng: &mut impl Rng,
    ) -> LatticeParts {
        self.build_inner(|| {
            let speed = rng.random_range((speed_avg - speed_range)..=(speed_avg + speed_range));
            speed.abs() * random_unit_vector(rng)
        })
    }

    fn build_inner(self, mut velocity: impl FnMut() -> Vec3) -> LatticeParts {
        let (planes, rows, cols) = (self.config.planes, self.config.rows, self.config.cols);
        let cell_size = (self.max - self.min) / Vec3::new(cols as f32, rows as f32, planes as f32);

        let particles = self.build_particles(cell_size, &mut velocity);
        let (cells, links) = self.build_cells_and_links(cell_size, &particles);

        LatticeParts {
            lattice: ControlLattice {
                cells,
                planes,
                rows,
                cols,
                min: self.min,
                max: self.max,
                cell_size,
            },
            particles,
            links,
        }
    }

    fn build_particles(&self, cell_size: Vec3, velocity: &mut impl FnMut() -> Vec3) -> Vec<PointMass> {
        let (planes, rows, cols) = (self.config.planes, self.config.rows, self.config.cols);
        let count = (planes + 1) * (rows + 1) * (cols + 1);
        let mass = self.config.total_mass / count as f32;

        // Grid order: x fastest, then y, then z, so the flat index of the
        // vertex at (x, y, z) is x + y(N+1) + z(M+1)(N+1).
        let mut particles = Vec::with_capacity(count);
        for z in 0..=planes {
            for y in 0..=rows {
                for x in 0..=cols {
                    let position = self.min
                        + Vec3::new(
                            x as f32 * cell_size.x,
                            y as f32 * cell_size.y,
                            z as f32 * cell_size.z,
                        );
                    let mut p = PointMass::new(position, velocity(), mass);
                    p.pinned = match self.config.pin {
                        PinRule::None => false,
                        PinRule::TopRow => y == rows,
                        PinRule::Coords(f) => f(x, y, z),
                    };
                    particles.push(p);
                }
            }
        }
        particles
    }

    fn build_cells_and_links(
        &self,
        cell_size: Vec3,
        particles: &[PointMass],
    ) -> (Vec<Cell>, Vec<SpringLink>) {
        let (planes, rows, cols) = (self.config.planes, self.config.rows, self.config.cols);
        let (w, h, d) = (cell_size.x, cell_size.y, cell_size.z);

        // Rest lengths for the four kinds of link in a cell.
        let depth_height_diag = (d * d + h * h).sqrt();
        let depth_width_diag = (d * d + w * w).sqrt();
        let height_width_diag = (h * h + w * w).sqrt();
        let body_diag = (w * w + h * h + d * d).sqrt();

        let expected_links =
            16 * planes * rows * cols + 4 * rows * planes + 4 * cols * planes + 4 * rows * cols;
        let mut links = Vec::with_capacity(expected_links);
        let mut cells = Vec::with_capacity(planes * rows * cols);

        let k = self.config.stiffness;
        let damp = self.config.damping;
        let push = |links: &mut Vec<SpringLink>, i: usize, j: usize, rest: f32| {
            links.push(SpringLink::new(i, j, k, damp, rest));
        };

        let row_stride = cols + 1;
        let plane_stride = (rows + 1) * (cols + 1);

        for p in 0..planes {
            for r in 0..rows {
                for c in 0..cols {
                    // The eight corner indices of this cell: bit 0 = column,
                    // bit 1 = row, bit 2 = plane.
                    let bbl = c + r * row_stride + p * plane_stride;
                    let bbr = bbl + 1;
                    let btl = c + (r + 1) * row_stride + p * plane_stride;
                    let btr = btl + 1;
                    let fbl = c + r * row_stride + (p + 1) * plane_stride;
                    let fbr = fbl + 1;
                    let ftl = c + (r + 1) * row_stride + (p + 1) * plane_stride;
                    let ftr = ftl + 1;

                    cells.push(Cell {
                        plane: p,
                        row: r,
                        col: c,
                        corners: [bbl, bbr, btl, btr, fbl, fbr, ftl, ftr],
                        min: particles[bbl].position,
                        max: particles[ftr].position,
                    });

                    // Interior body diagonals.
                    push(&mut links, ftl, bbr, body_diag);
                    push(&mut links, ftr, bbl, body_diag);
                    push(&mut links, btl, fbr, body_diag);
                    push(&mut links, btr, fbl, body_diag);

                    // Depth direction (back → front), left side of the cell;
                    // the right side belongs to the next cell in the row,
                    // except at the far column.
                    push(&mut links, bbl, fbl, d);
                    push(&mut links, btl, ftl, d);
                    push(&mut links, btl, fbl, depth_height_diag);
                    push(&mut links, ftl, bbl, depth_height_diag);
                    if c == cols - 1 {
                        push(&mut links, bbr, fbr, d);
                        push(&mut links, btr, ftr, d);
                        push(&mut links, btr, fbr, depth_height_diag);
                        push(&mut links, bbr, ftr, depth_height_diag);
                    }

                    // Width direction (left → right), bottom face; the top
                    // face belongs to the next row, except at the far row.
                    push(&mut links, bbl, bbr, w);
                    push(&mut links, fbl, fbr, w);
                    push(&mut links, bbr, fbl, depth_width_diag);
                    push(&mut links, bbl, fbr, depth_width_diag);
                    if r == rows - 1 {
                        push(&mut links, btl, btr, w);
                        push(&mut links, ftl, ftr, w);
                        push(&mut links, btr, ftl, depth_width_diag);
                        push(&mut links, btl, ftr, depth_width_diag);
                    }

                    // Height direction (bottom → top), back face; the front
                    // face belongs to the next plane, except at the far one.
                    push(&mut links, bbl, btl, h);
                    push(&mut links, bbr, btr, h);
                    push(&mut links, bbl, btr, height_width_diag);
                    push(&mut links, bbr, btl, height_width_diag);
                    if p == planes - 1 {
                        push(&mut links, fbl, ftl, h);
                        push(&mut links, fbr, ftr, h);
                        push(&mut links, ftl, fbr, height_width_diag);
                        push(&mut links, fbl, ftr, height_width_diag);
                    }
                }
            }
        }

        debug_assert_eq!(links.len(), expected_links);
        (cells, links)
    }
}

/// Uniformly random direction on the unit sphere (azimuth angle plus
/// uniform height).
fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    let theta = rng.random_range(-PI..PI);
    let y: f32 = rng.random_range(-1.0..=1.0);
    let r = (1.0 - y * y).sqrt();
    Vec3::new(r * theta.cos(), y, -r * theta.sin())
}
