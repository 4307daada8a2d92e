/// Terminal front end for the morph engine
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use morph3d_core::{
    normal_segments, Camera, MorphConfig, MorphScene, MorphState, Turntable, CAMERA_STEP,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 0.5;

/// Rows reserved for the HUD at the top of the screen
const HUD_ROWS: u16 = 3;

/// Viewer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Target frames per second
    pub fps: u32,
    /// Turntable speed in degrees per frame
    pub spin: f32,
    pub start_paused: bool,
    pub show_normals: bool,
    pub morph: MorphConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            spin: 0.15,
            start_paused: false,
            show_normals: false,
            morph: MorphConfig::default(),
        }
    }
}

/// Something a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleAnimate,
    ToggleNormals,
    Step,
    CameraUp,
    CameraDown,
    DollyIn,
    DollyOut,
    TiltUp,
    TiltDown,
}

/// Map a key press onto a viewer command
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('m') => Some(Command::ToggleAnimate),
        KeyCode::Char('n') => Some(Command::ToggleNormals),
        KeyCode::Char('s') => Some(Command::Step),
        KeyCode::Char('q') => Some(Command::CameraUp),
        KeyCode::Char('e') => Some(Command::CameraDown),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::DollyIn),
        KeyCode::Down => Some(Command::DollyOut),
        KeyCode::Left => Some(Command::TiltDown),
        KeyCode::Right => Some(Command::TiltUp),
        _ => None,
    }
}

/// Apply `command` to the morph state and camera. Returns `false` on quit.
pub fn apply_command(command: Command, state: &mut MorphState, camera: &mut Camera) -> bool {
    match command {
        Command::Quit => return false,
        Command::ToggleAnimate => state.toggle_animate(),
        Command::ToggleNormals => state.toggle_show_normals(),
        Command::Step => {
            state.step_forward();
        }
        Command::CameraUp => camera.raise(CAMERA_STEP),
        Command::CameraDown => camera.raise(-CAMERA_STEP),
        Command::DollyIn => camera.dolly(CAMERA_STEP),
        Command::DollyOut => camera.dolly(-CAMERA_STEP),
        Command::TiltUp => camera.tilt_by(CAMERA_STEP),
        Command::TiltDown => camera.tilt_by(-CAMERA_STEP),
    }
    true
}

/// Status text drawn over the frame
pub fn hud_lines(scene: &MorphScene, state: &MorphState, fps: f32) -> [String; 3] {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    [
        format!(
            "Faces A: {} | Faces B: {} | FPS: {:.1}",
            scene.source().face_count(),
            scene.target().face_count(),
            fps
        ),
        format!(
            "morph t: {:.3} | anim: {} | normals: {}",
            state.current_t(),
            on_off(!state.is_paused()),
            on_off(state.shows_normals())
        ),
        "m pause/resume | n normals | s step | q/e camera up/down | w/arrows move | Esc quit"
            .to_string(),
    ]
}

fn camera_aspect(width: u16, height: u16) -> f32 {
    width as f32 * CELL_ASPECT / height.max(1) as f32
}

/// Main application struct for the terminal morph viewer
pub struct TerminalApp {
    scene: MorphScene,
    state: MorphState,
    camera: Camera,
    turntable: Turntable,
    renderer: AsciiRenderer,
    config: ViewerConfig,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: MorphScene, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let mut state = MorphState::with_config(config.morph);
        if config.start_paused {
            state.toggle_animate();
        }
        if config.show_normals {
            state.toggle_show_normals();
        }

        Ok(Self {
            scene,
            state,
            camera: Camera::new(camera_aspect(width, height)),
            turntable: Turntable::new(config.spin),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            config,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let result = execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)
            .and_then(|()| self.main_loop());

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.fps.max(1)));

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            self.render()?;
            self.update();

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(command) = command_for(&key) {
                    self.running = apply_command(command, &mut self.state, &mut self.camera);
                }
            }
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.camera.aspect = camera_aspect(width, height);
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        self.state.advance();
        self.turntable.advance();
    }

    fn render(&mut self) -> io::Result<()> {
        let model = self.turntable.model_matrix();
        let frame = self.scene.frame(self.state.current_t());

        self.renderer.clear();
        self.renderer.render_frame(&frame, &model, &self.camera);
        if self.state.shows_normals() {
            let segments = normal_segments(&frame, self.state.config().normal_length);
            self.renderer.render_segments(&segments, &model, &self.camera);
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        for (row, line) in hud_lines(&self.scene, &self.state, self.fps).iter().enumerate() {
            let row = row as u16;
            if row >= HUD_ROWS {
                break;
            }
            queue!(
                stdout,
                cursor::MoveTo(0, row),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::Yellow),
                Print(line),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}
