use glam::Vec3;

/// One triangle of a surface mesh, as index triples into the vertex and
/// normal arrays.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub vertices: [usize; 3],
    pub normals: [usize; 3],
}

/// An immutable surface mesh produced by an external loader.
///
/// The deformer only ever reads `positions`; triangles and normals are
/// carried through untouched for the renderer's benefit.
#[derive(Clone, Debug)]
pub struct SurfaceMesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    pub normals: Vec<Vec3>,
}

impl SurfaceMesh {
    /// Axis-aligned bounds of the vertex positions, or `None` for an empty
    /// mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for &p in &self.positions[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }

    /// Bounds inflated by `margin` on every side, so that vertices sitting
    /// exactly on the mesh's bounding box still fall inside the lattice.
    pub fn padded_bounds(&self, margin: f32) -> Option<(Vec3, Vec3)> {
        let (min, max) = self.bounds()?;
        Some((min - Vec3::splat(margin), max + Vec3::splat(margin)))
    }
}
