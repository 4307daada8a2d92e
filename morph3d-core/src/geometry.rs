/// Geometry primitives for indexed triangle meshes
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

/// Normal reported for triangles whose edges are collinear or coincident.
pub const FALLBACK_NORMAL: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// A triangular face: three vertex indices and an optional normal index per corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub normals: [Option<usize>; 3],
}

impl Face {
    pub fn new(vertices: [usize; 3]) -> Self {
        Self {
            vertices,
            normals: [None; 3],
        }
    }

    pub fn with_normals(vertices: [usize; 3], normals: [Option<usize>; 3]) -> Self {
        Self { vertices, normals }
    }
}

/// Three resolved corner positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    /// Arithmetic mean of the three corners
    pub fn centroid(&self) -> Point3<f32> {
        let [p0, p1, p2] = self.points;
        Point3::from((p0.coords + p1.coords + p2.coords) / 3.0)
    }

    /// Unit normal of the counter-clockwise winding, or [`FALLBACK_NORMAL`]
    /// when the triangle has no area
    pub fn normal(&self) -> Vector3<f32> {
        let [p0, p1, p2] = self.points;
        let edge1 = p1 - p0;
        let edge2 = p2 - p0;
        let cross = edge1.cross(&edge2);

        let length = cross.norm();
        if length > 0.0 {
            cross / length
        } else {
            FALLBACK_NORMAL
        }
    }
}

/// Centroid of `face` resolved against `vertices`.
///
/// # Panics
///
/// Panics if the face references a vertex outside `vertices`.
pub fn centroid(face: &Face, vertices: &[Point3<f32>]) -> Point3<f32> {
    resolve(face, vertices).centroid()
}

/// Face normal of `face` resolved against `vertices`.
///
/// # Panics
///
/// Panics if the face references a vertex outside `vertices`.
pub fn face_normal(face: &Face, vertices: &[Point3<f32>]) -> Vector3<f32> {
    resolve(face, vertices).normal()
}

fn resolve(face: &Face, vertices: &[Point3<f32>]) -> Triangle {
    let [a, b, c] = face.vertices;
    Triangle::new(vertices[a], vertices[b], vertices[c])
}

/// An indexed triangle mesh.
///
/// Construction checks that every face index is in range; the mesh cannot be
/// edited afterwards except by normalization.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    faces: Vec<Face>,
    normals: Vec<Vector3<f32>>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Point3<f32>>,
        faces: Vec<Face>,
        normals: Vec<Vector3<f32>>,
    ) -> Result<Self> {
        for (i, face) in faces.iter().enumerate() {
            for &index in &face.vertices {
                if index >= vertices.len() {
                    return Err(MeshError::InvalidVertexIndex {
                        face: i,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
            for &index in face.normals.iter().flatten() {
                if index >= normals.len() {
                    return Err(MeshError::InvalidNormalIndex {
                        face: i,
                        index,
                        normal_count: normals.len(),
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            faces,
            normals,
        })
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Normals as stored in the source file, referenced by [`Face::normals`]
    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn has_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        self.faces
            .get(face)
            .map(|face| resolve(face, &self.vertices))
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|face| resolve(face, &self.vertices))
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Point3<f32>] {
        &mut self.vertices
    }

    /// Axis-aligned cube centered at the origin, 12 outward-wound triangles
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ];

        let faces = [
            // Front
            [4, 5, 6],
            [4, 6, 7],
            // Back
            [0, 3, 2],
            [0, 2, 1],
            // Top
            [3, 7, 6],
            [3, 6, 2],
            // Bottom
            [0, 1, 5],
            [0, 5, 4],
            // Right
            [1, 2, 6],
            [1, 6, 5],
            // Left
            [0, 4, 7],
            [0, 7, 3],
        ]
        .into_iter()
        .map(Face::new)
        .collect();

        Self {
            vertices,
            faces,
            normals: Vec::new(),
        }
    }

    /// Regular octahedron with its six vertices on the coordinate axes
    pub fn octahedron(radius: f32) -> Self {
        let r = radius;
        // +x, -x, +y, -y, +z, -z
        let vertices = vec![
            Point3::new(r, 0.0, 0.0),
            Point3::new(-r, 0.0, 0.0),
            Point3::new(0.0, r, 0.0),
            Point3::new(0.0, -r, 0.0),
            Point3::new(0.0, 0.0, r),
            Point3::new(0.0, 0.0, -r),
        ];

        let mut faces = Vec::with_capacity(8);
        for (sx, x) in [(1.0f32, 0), (-1.0, 1)] {
            for (sy, y) in [(1.0f32, 2), (-1.0, 3)] {
                for (sz, z) in [(1.0f32, 4), (-1.0, 5)] {
                    // Octants with an odd number of negative axes flip winding
                    if sx * sy * sz > 0.0 {
                        faces.push(Face::new([x, y, z]));
                    } else {
                        faces.push(Face::new([x, z, y]));
                    }
                }
            }
        }

        Self {
            vertices,
            faces,
            normals: Vec::new(),
        }
    }
}
