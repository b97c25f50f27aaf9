//! Mesh geometry data
//!
//! Data-only: positions and triangle indices, enough to build collision
//! shapes and debug visualisations. GPU upload and rendering live outside
//! this crate.

use crate::foundation::math::Point3;
use crate::scene::SceneError;

/// Indexed triangle mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<Point3>,
    indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh from positions and triangle indices
    ///
    /// Every index must reference an existing position.
    pub fn new(positions: Vec<Point3>, indices: Vec<[u32; 3]>) -> Result<Self, SceneError> {
        let vertex_count = positions.len() as u32;
        for triangle in &indices {
            if triangle.iter().any(|&index| index >= vertex_count) {
                return Err(SceneError::InvalidMesh {
                    detail: format!(
                        "triangle {:?} references a vertex beyond {}",
                        triangle, vertex_count
                    ),
                });
            }
        }
        Ok(Self { positions, indices })
    }

    /// Axis-aligned cuboid centered at the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        let positions = vec![
            Point3::new(-hx, -hy, -hz),
            Point3::new(hx, -hy, -hz),
            Point3::new(hx, hy, -hz),
            Point3::new(-hx, hy, -hz),
            Point3::new(-hx, -hy, hz),
            Point3::new(hx, -hy, hz),
            Point3::new(hx, hy, hz),
            Point3::new(-hx, hy, hz),
        ];
        let indices = vec![
            // -Z face
            [0, 2, 1], [0, 3, 2],
            // +Z face
            [4, 5, 6], [4, 6, 7],
            // -X face
            [0, 4, 7], [0, 7, 3],
            // +X face
            [1, 2, 6], [1, 6, 5],
            // -Y face
            [0, 1, 5], [0, 5, 4],
            // +Y face
            [3, 7, 6], [3, 6, 2],
        ];
        Self { positions, indices }
    }

    /// Flat plane in the XZ plane, centered at the origin
    pub fn plane(width: f32, depth: f32) -> Self {
        let (hx, hz) = (width * 0.5, depth * 0.5);
        let positions = vec![
            Point3::new(-hx, 0.0, -hz),
            Point3::new(hx, 0.0, -hz),
            Point3::new(hx, 0.0, hz),
            Point3::new(-hx, 0.0, hz),
        ];
        let indices = vec![[0, 2, 1], [0, 3, 2]];
        Self { positions, indices }
    }

    /// Vertex positions
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Triangle index list
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}
