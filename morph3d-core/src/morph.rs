//! Morph progress: the ping-pong interpolation parameter and its controls

/// Tunables for the morph animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphConfig {
    /// Change in `t` per frame while animating
    pub auto_step: f32,
    /// Change in `t` per manual step while paused
    pub manual_step: f32,
    /// Length of the debug normal segments
    pub normal_length: f32,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            auto_step: 0.006,
            manual_step: 0.02,
            normal_length: 0.08,
        }
    }
}

/// Which way `t` is currently travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards mesh B (`t` grows)
    Forward,
    /// Towards mesh A (`t` shrinks)
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Interpolation parameter plus the user-facing toggles that drive it.
///
/// `t` stays within `[0, 1]`: 0 shows mesh A, 1 shows mesh B.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphState {
    t: f32,
    direction: Direction,
    paused: bool,
    show_normals: bool,
    config: MorphConfig,
}

impl MorphState {
    pub fn new() -> Self {
        Self::with_config(MorphConfig::default())
    }

    pub fn with_config(config: MorphConfig) -> Self {
        Self {
            t: 0.0,
            direction: Direction::Forward,
            paused: false,
            show_normals: false,
            config,
        }
    }

    pub fn current_t(&self) -> f32 {
        self.t
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn shows_normals(&self) -> bool {
        self.show_normals
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Switch between animating and paused
    pub fn toggle_animate(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_show_normals(&mut self) {
        self.show_normals = !self.show_normals;
    }

    /// Move `t` by `delta` while paused, clamped to `[0, 1]`.
    ///
    /// Returns `false` and does nothing while animating.
    pub fn step(&mut self, delta: f32) -> bool {
        if !self.paused {
            return false;
        }
        self.t = (self.t + delta).clamp(0.0, 1.0);
        true
    }

    /// [`step`](Self::step) by the configured manual increment
    pub fn step_forward(&mut self) -> bool {
        self.step(self.config.manual_step)
    }

    /// Per-frame update. While animating, `t` moves by the automatic step and
    /// bounces off both ends; while paused nothing changes.
    pub fn advance(&mut self) {
        if self.paused {
            return;
        }

        self.t += self.config.auto_step * self.direction.sign();
        if self.t >= 1.0 {
            self.t = 1.0;
            self.direction = Direction::Backward;
        } else if self.t <= 0.0 {
            self.t = 0.0;
            self.direction = Direction::Forward;
        }
    }
}

impl Default for MorphState {
    fn default() -> Self {
        Self::new()
    }
}
