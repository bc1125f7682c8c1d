use crate::cell::Cell;
use crate::types::CellId;
use glam::Vec3;

/// The regular grid of cells driving the deformation.
///
/// The lattice owns only the cells; the point masses they index live in the
/// owning [`crate::simulation::Simulation`]'s particle array. All bounds are
/// bind-time bounds and stay fixed while the particles move.
#[derive(Clone, Debug)]
pub struct ControlLattice {
    /// Cells in `(plane * rows + row) * cols + col` order.
    pub cells: Vec<Cell>,
    /// Cell counts per axis: z, y, x.
    pub planes: usize,
    pub rows: usize,
    pub cols: usize,
    /// Overall bind-time bounds.
    pub min: Vec3,
    pub max: Vec3,
    /// Uniform cell extents: width (x), height (y), depth (z).
    pub cell_size: Vec3,
}

impl ControlLattice {
    /// Flat index of the cell at grid coordinates `(plane, row, col)`.
    #[inline]
    pub fn cell_index(&self, plane: usize, row: usize, col: usize) -> CellId {
        (plane * self.rows + row) * self.cols + col
    }

    /// Finds the cell whose bind-time bounds contain `point`.
    ///
    /// Linear scan in cell order; the **first** matching cell wins, which
    /// makes the result deterministic for points lying exactly on a face
    /// shared by two cells. Returns `None` for points outside the lattice's
    /// bind-time bounding box; the caller decides whether that is fatal.
    pub fn locate_cell(&self, point: Vec3) -> Option<CellId> {
        self.cells.iter().position(|c| c.contains(point))
    }

    /// Clamps `point` into the lattice's overall bind-time bounds.
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::LatticeBuilder;
    use crate::config::SimConfig;

    fn small_lattice() -> ControlLattice {
        let cfg = SimConfig {
            planes: 2,
            rows: 2,
            cols: 2,
            ..SimConfig::default()
        };
        LatticeBuilder::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0), cfg)
            .unwrap()
            .build()
            .lattice
    }

    #[test]
    fn cell_index_matches_scan_order() {
        let lat = small_lattice();
        for (i, c) in lat.cells.iter().enumerate() {
            assert_eq!(lat.cell_index(c.plane, c.row, c.col), i);
        }
    }

    #[test]
    fn locate_cell_finds_interior_points() {
        let lat = small_lattice();
        // Centers of the first and last cells.
        assert_eq!(lat.locate_cell(Vec3::new(0.5, 0.5, 0.5)), Some(0));
        assert_eq!(
            lat.locate_cell(Vec3::new(1.5, 1.5, 1.5)),
            Some(lat.cells.len() - 1)
        );
    }

    #[test]
    fn shared_corner_resolves_to_first_cell_in_scan_order() {
        let lat = small_lattice();
        // (1,1,1) is the corner shared by all eight cells; the scan picks
        // cell 0, and repeatably so.
        assert_eq!(lat.locate_cell(Vec3::ONE), Some(0));
        assert_eq!(lat.locate_cell(Vec3::ONE), Some(0));
    }

    #[test]
    fn lattice_corners_are_inside() {
        let lat = small_lattice();
        assert_eq!(lat.locate_cell(lat.min), Some(0));
        assert!(lat.locate_cell(lat.max).is_some());
    }

    #[test]
    fn outside_points_are_not_found() {
        let lat = small_lattice();
        assert_eq!(lat.locate_cell(Vec3::new(-0.1, 1.0, 1.0)), None);
        assert_eq!(lat.locate_cell(Vec3::new(1.0, 2.1, 1.0)), None);
        assert_eq!(lat.locate_cell(Vec3::splat(5.0)), None);
    }

    #[test]
    fn clamp_point_projects_into_bounds() {
        let lat = small_lattice();
        let clamped = lat.clamp_point(Vec3::new(-1.0, 3.0, 1.0));
        assert_eq!(clamped, Vec3::new(0.0, 2.0, 1.0));
        assert!(lat.locate_cell(clamped).is_some());
    }
}
