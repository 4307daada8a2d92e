/// The two meshes and their face association, owned together for a whole run
use crate::associate::FaceAssociation;
use crate::geometry::Mesh;
use crate::normalize::normalize;
use crate::render::{render_frame, MorphedTriangle};

/// Everything the per-frame renderer needs that never changes after startup
#[derive(Debug, Clone)]
pub struct MorphScene {
    source: Mesh,
    target: Mesh,
    association: FaceAssociation,
}

impl MorphScene {
    /// Normalize both meshes and associate their faces
    pub fn new(source: Mesh, target: Mesh) -> Self {
        if !source.has_faces() {
            log::warn!("mesh A has no faces; nothing will be drawn");
        }
        if !target.has_faces() {
            log::warn!("mesh B has no faces; mesh A will be shown without morphing");
        }

        let source = normalize(source);
        let target = normalize(target);
        let association = FaceAssociation::build(&source, &target);

        Self {
            source,
            target,
            association,
        }
    }

    pub fn source(&self) -> &Mesh {
        &self.source
    }

    pub fn target(&self) -> &Mesh {
        &self.target
    }

    pub fn association(&self) -> &FaceAssociation {
        &self.association
    }

    /// Geometry for one frame at morph parameter `t`
    pub fn frame(&self, t: f32) -> Vec<MorphedTriangle> {
        render_frame(&self.source, &self.target, &self.association, t)
    }
}
