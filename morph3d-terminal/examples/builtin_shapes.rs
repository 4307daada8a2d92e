/// Example: morph the built-in cube into the built-in octahedron
///
/// Usage: cargo run --example builtin_shapes
use morph3d_core::{Mesh, MorphScene};
use morph3d_terminal::{TerminalApp, ViewerConfig};
use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    let scene = MorphScene::new(Mesh::cube(2.0), Mesh::octahedron(1.0));
    let config = ViewerConfig {
        show_normals: true,
        ..ViewerConfig::default()
    };

    let mut app = TerminalApp::new(scene, config)?;
    app.run()
}
