use crate::types::ParticleId;
use glam::Vec3;

/// One cubic cell of the control lattice.
///
/// `corners` holds the particle indices of the cell's eight vertices,
/// ordered so that bit 0 of the corner index selects the column (x), bit 1
/// the row (y), and bit 2 the plane (z): corner 0 is back-bottom-left,
/// corner 7 front-top-right.
///
/// `min`/`max` are captured from the two extreme corner positions at build
/// time and are never updated as the lattice deforms; they are a static
/// spatial-indexing aid, not a live bounding box.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub plane: usize,
    pub row: usize,
    pub col: usize,
    pub corners: [ParticleId; 8],
    pub min: Vec3,
    pub max: Vec3,
}

impl Cell {
    /// `true` if `point` lies within the bind-time bounds, inclusive on all
    /// six faces.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}
