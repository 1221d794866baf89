use pawgrove_camera::Camera;

/// A camera command produced from one frame of input.
///
/// Distances are already scaled by elapsed time; angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move along the look axis.
    Walk(f32),
    /// Move along the right axis.
    Strafe(f32),
    /// Tilt up/down about the right axis.
    Pitch(f32),
    /// Turn about the world Y axis.
    RotateY(f32),
}

impl Action {
    /// Forward the action to the matching camera operation.
    ///
    /// Does not rebuild the view matrix.
    pub fn apply(self, camera: &mut Camera) {
        match self {
            Action::Walk(d) => camera.walk(d),
            Action::Strafe(d) => camera.strafe(d),
            Action::Pitch(angle) => camera.pitch(angle),
            Action::RotateY(angle) => camera.rotate_y(angle),
        }
    }
}
