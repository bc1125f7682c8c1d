/// Identifier for a point mass in the simulation's particle array.
///
/// This is an index into the `Vec<PointMass>` produced by
/// [`crate::builder::LatticeBuilder`], and is only meaningful within
/// the lifetime of a given lattice instance.
pub type ParticleId = usize;

/// Identifier for a spring link in the link array.
pub type LinkId = usize;

/// Identifier for a cell in a [`crate::lattice::ControlLattice`].
///
/// This is an index into `ControlLattice::cells`.
pub type CellId = usize;
