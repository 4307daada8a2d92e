/// Nearest-centroid face correspondence between two meshes
use std::time::Instant;

use nalgebra::Point3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geometry::Mesh;

/// For every face of a source mesh, the index of the closest target face.
///
/// The mapping is many-to-one: several source faces may share a target and
/// some target faces may never be chosen. Entries are `None` only when the
/// target mesh has no faces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaceAssociation {
    targets: Vec<Option<usize>>,
}

impl FaceAssociation {
    /// Match each face of `source` to the face of `target` whose centroid is
    /// nearest. Ties go to the earliest target face.
    pub fn build(source: &Mesh, target: &Mesh) -> Self {
        let started = Instant::now();

        let source_centroids: Vec<Point3<f32>> =
            source.triangles().map(|t| t.centroid()).collect();
        let target_centroids: Vec<Point3<f32>> =
            target.triangles().map(|t| t.centroid()).collect();

        #[cfg(feature = "parallel")]
        let targets: Vec<Option<usize>> = source_centroids
            .par_iter()
            .map(|c| nearest(c, &target_centroids))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let targets: Vec<Option<usize>> = source_centroids
            .iter()
            .map(|c| nearest(c, &target_centroids))
            .collect();

        log::debug!(
            "associated {} source faces with {} target faces in {:?}",
            source_centroids.len(),
            target_centroids.len(),
            started.elapsed()
        );

        Self { targets }
    }

    /// Wrap a precomputed table
    pub fn from_targets(targets: Vec<Option<usize>>) -> Self {
        Self { targets }
    }

    /// Target face for `face`, or `None` when it has none or lies past the table
    pub fn get(&self, face: usize) -> Option<usize> {
        self.targets.get(face).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.targets
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.targets.iter().copied()
    }
}

/// Shorthand for [`FaceAssociation::build`]
pub fn associate(source: &Mesh, target: &Mesh) -> FaceAssociation {
    FaceAssociation::build(source, target)
}

/// Index of the candidate closest to `point`, first one on ties
pub fn nearest(point: &Point3<f32>, candidates: &[Point3<f32>]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        let distance = (candidate - point).norm();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}
