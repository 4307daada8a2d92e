/// morph3d - morph one OBJ mesh into another in the terminal
///
/// Controls:
///   - m: pause / resume the morph
///   - s: step the morph while paused
///   - n: show face normals
///   - q/e: raise / lower the camera
///   - w, Up/Down: move towards / away from the meshes
///   - Left/Right: tilt the view
///   - Esc: quit
use anyhow::{Context, Result};
use clap::Parser;
use morph3d_core::{obj, MorphConfig, MorphScene};
use morph3d_terminal::{TerminalApp, ViewerConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "morph3d", version, about = "Morph between two OBJ meshes in the terminal")]
struct Cli {
    /// Mesh shown at the start of the morph
    mesh_a: PathBuf,

    /// Mesh the morph travels towards
    mesh_b: PathBuf,

    /// Change in the morph parameter per frame while animating
    #[arg(long, default_value_t = 0.006, value_parser = positive_f32)]
    step: f32,

    /// Change in the morph parameter per manual step
    #[arg(long, default_value_t = 0.02, value_parser = positive_f32)]
    manual_step: f32,

    /// Length of the face normal segments
    #[arg(long, default_value_t = 0.08, value_parser = positive_f32)]
    normal_length: f32,

    /// Target frame rate
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Turntable speed in degrees per frame
    #[arg(long, default_value_t = 0.15, value_parser = positive_f32)]
    spin: f32,

    /// Start with face normals visible
    #[arg(long)]
    show_normals: bool,

    /// Start with the animation paused
    #[arg(long)]
    paused: bool,
}

fn positive_f32(value: &str) -> std::result::Result<f32, String> {
    let parsed: f32 = value
        .parse()
        .map_err(|e| format!("`{value}` is not a number: {e}"))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("`{value}` must be a positive number"))
    }
}

impl Cli {
    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            fps: self.fps,
            spin: self.spin,
            start_paused: self.paused,
            show_normals: self.show_normals,
            morph: MorphConfig {
                auto_step: self.step,
                manual_step: self.manual_step,
                normal_length: self.normal_length,
            },
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mesh_a = obj::load(&cli.mesh_a)
        .with_context(|| format!("failed to load mesh A from {}", cli.mesh_a.display()))?;
    let mesh_b = obj::load(&cli.mesh_b)
        .with_context(|| format!("failed to load mesh B from {}", cli.mesh_b.display()))?;

    log::info!(
        "mesh A: {} vertices, {} faces",
        mesh_a.vertex_count(),
        mesh_a.face_count()
    );
    log::info!(
        "mesh B: {} vertices, {} faces",
        mesh_b.vertex_count(),
        mesh_b.face_count()
    );

    let scene = MorphScene::new(mesh_a, mesh_b);
    let mut app =
        TerminalApp::new(scene, cli.viewer_config()).context("failed to query the terminal")?;
    app.run().context("terminal viewer failed")?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
