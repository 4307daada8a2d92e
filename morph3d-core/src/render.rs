/// Per-frame morph geometry: interpolated triangles with fresh face normals
use nalgebra::{Point3, Vector3};

use crate::align::align;
use crate::associate::FaceAssociation;
use crate::geometry::{Mesh, Triangle};

/// One emitted triangle of a morph frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphedTriangle {
    pub points: [Point3<f32>; 3],
    pub normal: Vector3<f32>,
    /// Face of mesh A this triangle was produced from
    pub source_face: usize,
    /// Face of mesh B it is morphing into, if any
    pub target_face: Option<usize>,
}

impl MorphedTriangle {
    pub fn centroid(&self) -> Point3<f32> {
        Triangle {
            points: self.points,
        }
        .centroid()
    }
}

/// A line from a triangle's centroid along its normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSegment {
    pub from: Point3<f32>,
    pub to: Point3<f32>,
}

/// Blend every face of `a` towards its associated face of `b` at parameter `t`.
///
/// `t` is clamped into `[0, 1]`. Faces without a usable partner, either
/// because the table says so or because the index is outside `b`, are emitted
/// as A's own geometry. Normals always come from the emitted points.
pub fn render_frame(
    a: &Mesh,
    b: &Mesh,
    table: &FaceAssociation,
    t: f32,
) -> Vec<MorphedTriangle> {
    let t = t.clamp(0.0, 1.0);

    a.triangles()
        .enumerate()
        .map(|(i, source)| {
            let partner = table
                .get(i)
                .and_then(|j| b.triangle(j).map(|target| (j, target)));

            match partner {
                Some((j, target)) => {
                    let aligned = align(&source.points, &target.points).points;
                    let blended = Triangle {
                        points: [0usize, 1, 2].map(|k| source.points[k].lerp(&aligned[k], t)),
                    };
                    MorphedTriangle {
                        points: blended.points,
                        normal: blended.normal(),
                        source_face: i,
                        target_face: Some(j),
                    }
                }
                None => MorphedTriangle {
                    points: source.points,
                    normal: source.normal(),
                    source_face: i,
                    target_face: None,
                },
            }
        })
        .collect()
}

/// Debug segments for the normal-visualization mode
pub fn normal_segments(frame: &[MorphedTriangle], length: f32) -> Vec<NormalSegment> {
    frame
        .iter()
        .map(|triangle| {
            let from = triangle.centroid();
            NormalSegment {
                from,
                to: from + triangle.normal * length,
            }
        })
        .collect()
}
