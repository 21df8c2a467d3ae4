use super::tube::{connect_rings, create_ring, Mesh};
use crate::error::{Error, Result};
use crate::growth::{BranchId, BranchTree};
use crate::math::SectionFrame;

/// Segments shorter than this are degenerate: no direction can be derived.
const MIN_SEGMENT_LENGTH_SQUARED: f32 = 1.0e-12;

/// Parameters for mesh generation
#[derive(Debug, Clone, Copy)]
pub struct MeshParams {
    /// Vertices per cross-sectional ring (more = smoother tubes)
    pub radial_resolution: usize,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            radial_resolution: 12,
        }
    }
}

/// Walks a finished branch tree and emits one closed tube per branch.
///
/// Every branch contributes exactly two rings of `radial_resolution`
/// vertices (start and end) and `radial_resolution` quads connecting them,
/// so buffer sizes follow directly from the branch count. Clone branches
/// reuse the parent's cross-section frame via minimal-rotation transport to
/// keep the tube seam-free; laterals get an independent frame.
pub struct TreeMesher {
    params: MeshParams,
}

impl TreeMesher {
    pub fn new(params: MeshParams) -> Self {
        Self { params }
    }

    pub fn tessellate(&self, tree: &BranchTree) -> Result<Mesh> {
        let resolution = self.params.radial_resolution;
        if resolution == 0 {
            return Err(Error::configuration("radial resolution must be positive"));
        }

        let mut mesh = Mesh::with_capacity(tree.len() * resolution * 2, tree.len() * resolution * 6);
        let mut frames: Vec<Option<SectionFrame>> = vec![None; tree.len()];

        // Pre-order walk with an explicit stack; a parent's frame is always
        // computed before any of its children are visited.
        let mut stack: Vec<BranchId> = vec![0];
        while let Some(id) = stack.pop() {
            let branch = tree.get(id);

            let axis = branch.end - branch.start;
            if axis.length_squared() < MIN_SEGMENT_LENGTH_SQUARED {
                return Err(Error::geometry(format!(
                    "branch {} has zero length, cannot orient its cross-section",
                    id
                )));
            }
            let axis = axis.normalize();

            let frame = match branch.parent {
                Some(parent) if branch.is_clone => frames[parent]
                    .map(|f| f.transported_to(axis))
                    .unwrap_or_else(|| SectionFrame::from_axis(axis)),
                _ => SectionFrame::from_axis(axis),
            };

            let start_ring = create_ring(branch.start, &frame, branch.start_radius, resolution, 0.0);
            let end_ring = create_ring(branch.end, &frame, branch.end_radius, resolution, 1.0);

            let ring1 = mesh.add_vertices(start_ring);
            let ring2 = mesh.add_vertices(end_ring);
            connect_rings(&mut mesh, ring1, ring2, resolution);

            frames[id] = Some(frame);
            for child in branch.children.iter().rev() {
                stack.push(*child);
            }
        }

        mesh.calculate_bounds();
        Ok(mesh)
    }
}
