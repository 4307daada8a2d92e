/// Recentering and rescaling meshes into a shared unit frame
use nalgebra::{Point3, Vector3};

use crate::geometry::Mesh;

/// Scale used when every vertex sits on the centroid.
pub const DEGENERATE_SCALE: f32 = 1.0;

/// The translation and scale applied by [`normalize_points`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub centroid: Point3<f32>,
    pub scale: f32,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            centroid: Point3::origin(),
            scale: DEGENERATE_SCALE,
        }
    }
}

/// Move the centroid of `points` to the origin and shrink or grow them so the
/// farthest one lies at distance 1.
///
/// An empty slice is left alone. When all points coincide they collapse onto
/// the origin and the scale stays at [`DEGENERATE_SCALE`].
pub fn normalize_points(points: &mut [Point3<f32>]) -> Normalization {
    if points.is_empty() {
        return Normalization::default();
    }

    let sum: Vector3<f32> = points.iter().map(|p| p.coords).sum();
    let centroid = Point3::from(sum / points.len() as f32);

    for p in points.iter_mut() {
        *p = Point3::from(*p - centroid);
    }

    let max_distance = points
        .iter()
        .map(|p| p.coords.norm())
        .fold(0.0f32, f32::max);
    let scale = if max_distance == 0.0 {
        DEGENERATE_SCALE
    } else {
        max_distance
    };

    for p in points.iter_mut() {
        *p = Point3::from(p.coords / scale);
    }

    Normalization { centroid, scale }
}

/// Return `mesh` recentered on its vertex centroid and scaled to unit radius
pub fn normalize(mut mesh: Mesh) -> Mesh {
    let applied = normalize_points(mesh.vertices_mut());
    log::debug!(
        "normalized {} vertices: centroid {:?}, scale {}",
        mesh.vertex_count(),
        applied.centroid,
        applied.scale
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn mean(points: &[Point3<f32>]) -> Vector3<f32> {
        points.iter().map(|p| p.coords).sum::<Vector3<f32>>() / points.len() as f32
    }

    fn max_norm(points: &[Point3<f32>]) -> f32 {
        points.iter().map(|p| p.coords.norm()).fold(0.0, f32::max)
    }

    fn offset_box() -> Mesh {
        let vertices = vec![
            Point3::new(10.0, 20.0, 30.0),
            Point3::new(14.0, 20.0, 30.0),
            Point3::new(14.0, 22.0, 30.0),
            Point3::new(10.0, 22.0, 31.0),
            Point3::new(12.0, 25.0, 29.0),
        ];
        let faces = vec![Face::new([0, 1, 2]), Face::new([0, 2, 3]), Face::new([1, 4, 3])];
        Mesh::new(vertices, faces, Vec::new()).unwrap()
    }

    #[test]
    fn test_normalized_mesh_is_centered_with_unit_radius() {
        let mesh = normalize(offset_box());
        assert!(mean(mesh.vertices()).norm() < 1e-5);
        assert_relative_eq!(max_norm(mesh.vertices()), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_normalize_is_a_fixed_point() {
        let once = normalize(offset_box());
        let twice = normalize(once.clone());
        for (a, b) in once.vertices().iter().zip(twice.vertices()) {
            assert_relative_eq!(a, b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_normalization_report() {
        let mut points = vec![Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 1.0, 1.0)];
        let applied = normalize_points(&mut points);
        assert_relative_eq!(applied.centroid, Point3::new(2.0, 1.0, 1.0));
        assert_relative_eq!(applied.scale, 1.0);
        assert_relative_eq!(points[0], Point3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(points[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_mesh_is_untouched() {
        let mesh = normalize(Mesh::default());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(normalize_points(&mut []), Normalization::default());
    }

    #[test]
    fn test_coincident_vertices_collapse_to_origin() {
        let mut points = vec![Point3::new(4.0, -1.0, 2.0); 3];
        let applied = normalize_points(&mut points);
        assert_eq!(applied.scale, DEGENERATE_SCALE);
        for p in &points {
            assert_abs_diff_eq!(p.coords.norm(), 0.0);
        }
    }

    #[test]
    fn test_faces_survive_normalization() {
        let before = offset_box();
        let after = normalize(before.clone());
        assert_eq!(before.faces(), after.faces());
    }
}
