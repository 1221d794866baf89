use crate::action::Action;
use pawgrove_camera::Camera;

/// Errors from controller configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("move speed must be finite and positive, got {0}")]
    InvalidMoveSpeed(f32),
    #[error("look sensitivity must be finite and positive, got {0}")]
    InvalidSensitivity(f32),
}

/// Directional keys held during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveState {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Tuning for [`CameraController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// World units per second.
    pub move_speed: f32,
    /// Radians per pixel of mouse motion.
    pub look_sensitivity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            look_sensitivity: 0.25_f32.to_radians(),
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.move_speed.is_finite() || self.move_speed <= 0.0 {
            return Err(ConfigError::InvalidMoveSpeed(self.move_speed));
        }
        if !self.look_sensitivity.is_finite() || self.look_sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.look_sensitivity));
        }
        Ok(())
    }
}

/// Turns held keys and mouse deltas into camera actions.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    config: ControllerConfig,
}

impl CameraController {
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(
            move_speed = config.move_speed,
            look_sensitivity = config.look_sensitivity,
            "camera controller configured"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Walk/strafe actions for one frame. Opposing keys cancel out.
    pub fn movement_actions(&self, keys: &MoveState, dt: f32) -> Vec<Action> {
        if keys.is_idle() {
            return Vec::new();
        }
        let step = self.config.move_speed * dt;
        let mut actions = Vec::with_capacity(2);

        match (keys.forward, keys.backward) {
            (true, false) => actions.push(Action::Walk(step)),
            (false, true) => actions.push(Action::Walk(-step)),
            _ => {}
        }
        match (keys.right, keys.left) {
            (true, false) => actions.push(Action::Strafe(step)),
            (false, true) => actions.push(Action::Strafe(-step)),
            _ => {}
        }
        actions
    }

    /// Pitch/yaw actions for a mouse delta in pixels.
    pub fn look_actions(&self, dx: f32, dy: f32) -> Vec<Action> {
        let mut actions = Vec::with_capacity(2);
        if dy != 0.0 {
            actions.push(Action::Pitch(dy * self.config.look_sensitivity));
        }
        if dx != 0.0 {
            actions.push(Action::RotateY(dx * self.config.look_sensitivity));
        }
        actions
    }

    /// Apply this frame's movement and rebuild the view matrix once.
    pub fn update(&self, camera: &mut Camera, keys: &MoveState, dt: f32) {
        for action in self.movement_actions(keys, dt) {
            action.apply(camera);
        }
        camera.update_view_matrix();
    }

    /// Apply mouse look. The view matrix is rebuilt by the next [`update`].
    ///
    /// [`update`]: CameraController::update
    pub fn look(&self, camera: &mut Camera, dx: f32, dy: f32) {
        for action in self.look_actions(dx, dy) {
            action.apply(camera);
        }
    }
}
