use crate::math::{SectionFrame, Vec3};

/// A vertex with position, outward normal, and tube UV
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: [0.0, 0.0],
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    /// Convert to flat array for the GPU buffer.
    /// Layout: position(3) + normal(3) + uv(2) = 8 floats
    pub fn to_array(&self) -> [f32; 8] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv[0], self.uv[1],
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Bounding sphere, used to frame the camera
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            ..Self::default()
        }
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    /// Add a triangle (indices are relative to the mesh's vertex buffer)
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.push(a);
        self.indices.push(b);
        self.indices.push(c);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    /// Calculate bounding sphere
    pub fn calculate_bounds(&mut self) {
        if self.vertices.is_empty() {
            self.bounds_center = Vec3::ZERO;
            self.bounds_radius = 0.0;
            return;
        }

        let mut center = Vec3::ZERO;
        for v in &self.vertices {
            center = center + v.position;
        }
        center = center.scale(1.0 / self.vertices.len() as f32);

        let mut max_dist = 0.0f32;
        for v in &self.vertices {
            max_dist = max_dist.max(v.position.distance(&center));
        }

        self.bounds_center = center;
        self.bounds_radius = max_dist;
    }

    /// Get interleaved vertex buffer data as flat f32 array
    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Bare vertex positions, 3 floats per vertex
    pub fn positions(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z])
            .collect()
    }

    /// Get index data
    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Create a ring of vertices around `center` in the frame's ring plane.
/// Vertex i sits at phase `i/segments` of a full turn from the frame's `u`
/// axis, so rings built from transported frames stay phase-aligned.
pub fn create_ring(
    center: Vec3,
    frame: &SectionFrame,
    radius: f32,
    segments: usize,
    v_coord: f32,
) -> Vec<Vertex> {
    (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let outward = frame.u.scale(angle.cos()) + frame.v.scale(angle.sin());
            let u = i as f32 / segments as f32;

            Vertex::new(center + outward.scale(radius), outward).with_uv(u, v_coord)
        })
        .collect()
}

/// Connect two rings with quads, two triangles each
pub fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_to_array() {
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::UP).with_uv(0.5, 1.0);
        let arr = v.to_array();
        assert_eq!(arr.len(), 8);
        assert_eq!(arr[0], 1.0); // position.x
        assert_eq!(arr[4], 1.0); // normal.y
        assert_eq!(arr[6], 0.5); // uv.u
    }

    #[test]
    fn test_mesh_add_vertices() {
        let mut mesh = Mesh::new();
        let start = mesh.add_vertices(vec![
            Vertex::new(Vec3::ZERO, Vec3::UP),
            Vertex::new(Vec3::RIGHT, Vec3::UP),
        ]);
        assert_eq!(start, 0);
        assert_eq!(mesh.vertex_count(), 2);

        let start = mesh.add_vertices(vec![Vertex::new(Vec3::UP, Vec3::UP)]);
        assert_eq!(start, 2);
    }

    #[test]
    fn test_mesh_add_quad() {
        let mut mesh = Mesh::new();
        mesh.add_quad(0, 1, 2, 3);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_create_ring_on_circle() {
        let frame = crate::math::SectionFrame::from_axis(Vec3::UP);
        let ring = create_ring(Vec3::ZERO, &frame, 1.0, 8, 0.0);
        assert_eq!(ring.len(), 8);

        for v in &ring {
            // On the unit circle in the XZ plane
            let dist = (v.position.x.powi(2) + v.position.z.powi(2)).sqrt();
            assert!((dist - 1.0).abs() < 0.001);
            assert!(v.position.y.abs() < 0.001);
            // Normal points outward
            assert!((v.normal.length() - 1.0).abs() < 0.001);
            assert!(v.normal.dot(&Vec3::UP).abs() < 0.001);
        }
    }

    #[test]
    fn test_ring_phase_starts_at_u_axis() {
        let frame = crate::math::SectionFrame::from_axis(Vec3::UP);
        let ring = create_ring(Vec3::ZERO, &frame, 2.0, 4, 0.0);
        assert!(ring[0].position.distance(&frame.u.scale(2.0)) < 0.001);
    }

    #[test]
    fn test_connect_rings_counts() {
        let frame = crate::math::SectionFrame::from_axis(Vec3::UP);
        let mut mesh = Mesh::new();
        let r1 = mesh.add_vertices(create_ring(Vec3::ZERO, &frame, 1.0, 4, 0.0));
        let r2 = mesh.add_vertices(create_ring(Vec3::UP, &frame, 0.8, 4, 1.0));
        connect_rings(&mut mesh, r1, r2, 4);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 8); // 4 quads
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_calculate_bounds() {
        let mut mesh = Mesh::new();
        mesh.add_vertices(vec![
            Vertex::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::UP),
            Vertex::new(Vec3::new(1.0, 0.0, 0.0), Vec3::UP),
            Vertex::new(Vec3::new(0.0, 2.0, 0.0), Vec3::UP),
        ]);
        mesh.calculate_bounds();
        assert!(mesh.bounds_radius > 0.0);
    }

    #[test]
    fn test_vertex_data_flat() {
        let mut mesh = Mesh::new();
        mesh.add_vertices(vec![
            Vertex::new(Vec3::ZERO, Vec3::UP),
            Vertex::new(Vec3::RIGHT, Vec3::UP),
        ]);

        assert_eq!(mesh.vertex_data().len(), 16); // 2 vertices * 8 floats
        assert_eq!(mesh.positions().len(), 6); // 2 vertices * 3 floats
    }
}
