/// Polygon faces, meshes and their projected 2D counterparts
use nalgebra::{Matrix4, Point2, Point3};

use crate::error::{RenderError, RenderResult};
use crate::vector::Vec3;

/// A planar polygon boundary with at least three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    vertices: Vec<Vec3>,
}

impl Face {
    pub fn new(vertices: Vec<Vec3>) -> RenderResult<Self> {
        if vertices.len() < 3 {
            return Err(RenderError::InvalidFace {
                vertices: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Apply a homogeneous transform to every vertex
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Face {
        let vertices = self
            .vertices
            .iter()
            .map(|v| matrix.transform_point(&Point3::from(*v)).coords)
            .collect();
        Face { vertices }
    }
}

/// An ordered collection of faces
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            faces: Vec::with_capacity(capacity),
        }
    }

    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(|f| f.vertices.len()).sum()
    }

    /// New mesh with every vertex transformed, face order preserved
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Mesh {
        Mesh {
            faces: self.faces.iter().map(|f| f.transformed(matrix)).collect(),
        }
    }

    /// Axis-aligned box of extent `size` around `center`, six quad faces
    pub fn cuboid(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        let (left, right) = (center.x - half.x, center.x + half.x);
        let (bottom, top) = (center.y - half.y, center.y + half.y);
        let (front, back) = (center.z - half.z, center.z + half.z);

        let corners = [
            Vec3::new(left, bottom, front),
            Vec3::new(left, bottom, back),
            Vec3::new(right, bottom, back),
            Vec3::new(right, bottom, front),
            Vec3::new(left, top, front),
            Vec3::new(left, top, back),
            Vec3::new(right, top, back),
            Vec3::new(right, top, front),
        ];

        // Corner indices per face, in boundary order
        const QUADS: [[usize; 4]; 6] = [
            [0, 1, 2, 3], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // left
            [3, 2, 6, 7], // right
            [0, 3, 7, 4], // front
            [1, 2, 6, 5], // back
        ];

        let faces = QUADS
            .iter()
            .map(|quad| Face {
                vertices: quad.iter().map(|&i| corners[i]).collect(),
            })
            .collect();
        Self { faces }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// A face after projection, one pixel coordinate per source vertex
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    pub points: Vec<Point2<f32>>,
}

/// Projected faces in source order, minus any that failed to project
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectedMesh {
    pub faces: Vec<ProjectedFace>,
    pub skipped_faces: usize,
}

impl ProjectedMesh {
    pub fn points(&self) -> impl Iterator<Item = &Point2<f32>> {
        self.faces.iter().flat_map(|f| f.points.iter())
    }
}
