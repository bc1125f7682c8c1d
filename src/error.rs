//! Error types for lattice construction, integration, and mesh binding.

use crate::types::{LinkId, ParticleId};
use glam::Vec3;
use thiserror::Error;

/// Errors that can occur while building or running a lattice deformer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    /// Grid resolution has a zero cell count on at least one axis.
    #[error("invalid lattice resolution {planes}x{rows}x{cols}: every axis needs at least one cell")]
    InvalidResolution {
        /// Requested cell count along z.
        planes: usize,
        /// Requested cell count along y.
        rows: usize,
        /// Requested cell count along x.
        cols: usize,
    },

    /// Bounding box has zero or negative extent on at least one axis.
    #[error("degenerate bounding box: extent {extent:?} must be positive on every axis")]
    DegenerateBounds {
        /// Extent of the box (max − min) per axis.
        extent: Vec3,
    },

    /// A spring link's endpoints coincide, so its direction is undefined.
    /// The integration step that hit this is aborted.
    #[error("degenerate spring link {link}: endpoints meet at particle {particle}")]
    DegenerateLink {
        /// Index of the offending link.
        link: LinkId,
        /// First endpoint of the link.
        particle: ParticleId,
    },

    /// A mesh vertex lies outside every cell of the lattice at bind time.
    #[error("mesh vertex {vertex} lies outside the lattice bounds")]
    OutOfBoundsVertex {
        /// Index of the vertex in the mesh's vertex array.
        vertex: usize,
    },

    /// State-vector algebra between vectors of different particle counts.
    #[error("state vector length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
}

/// Result type for lattice deformer operations.
pub type Result<T> = std::result::Result<T, LatticeError>;
