/// morph3d core library - mesh loading and the morphing engine
///
/// This library holds everything that does not touch a terminal or window:
/// OBJ parsing, normalization, face association, triangle alignment, the
/// morph state machine, per-frame geometry, and the camera math used to
/// project that geometry.

pub mod align;
pub mod associate;
pub mod error;
pub mod geometry;
pub mod morph;
pub mod normalize;
pub mod obj;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use align::{align, align_points, Alignment};
pub use associate::{associate, FaceAssociation};
pub use error::{MeshError, Result};
pub use geometry::{centroid, face_normal, Face, Mesh, Triangle, FALLBACK_NORMAL};
pub use morph::{Direction, MorphConfig, MorphState};
pub use normalize::{normalize, Normalization};
pub use projection::{Camera, CAMERA_STEP};
pub use render::{normal_segments, render_frame, MorphedTriangle, NormalSegment};
pub use scene::MorphScene;
pub use transform::Turntable;
