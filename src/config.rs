use glam::Vec3;

/// Which lattice vertices are pinned in place by the builder.
#[derive(Clone, Copy, Debug)]
pub enum PinRule {
    /// No vertex is pinned; the lattice is in free fall.
    None,
    /// Pin every vertex of the topmost row (maximum y), one per column on
    /// every plane. Anchors the lattice against gravity.
    TopRow,
    /// Pin each vertex for which the predicate returns `true`, given its
    /// grid coordinates `(x, y, z)` with `x ∈ [0, cols]`, `y ∈ [0, rows]`,
    /// `z ∈ [0, planes]`.
    Coords(fn(usize, usize, usize) -> bool),
}

/// Tunable parameters for the lattice and its simulation.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Number of cells along z.
    pub planes: usize,
    /// Number of cells along y.
    pub rows: usize,
    /// Number of cells along x.
    pub cols: usize,
    /// Total mass of the lattice, divided evenly over its vertices.
    pub total_mass: f32,
    /// Spring stiffness coefficient for every link.
    pub stiffness: f32,
    /// Spring damping coefficient for every link.
    pub damping: f32,
    /// Constant acceleration applied to every unpinned particle.
    pub gravity: Vec3,
    /// Fixed integration time step.
    pub time_step: f32,
    /// Pinning rule applied at build time.
    pub pin: PinRule,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            planes: 2,
            rows: 12,
            cols: 4,
            total_mass: 1000.0,
            stiffness: 11.1,
            damping: 2.8,
            gravity: Vec3::new(0.2, -0.6, -0.05),
            time_step: 0.05,
            pin: PinRule::TopRow,
        }
    }
}
