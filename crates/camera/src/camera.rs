use glam::{Mat3, Mat4, Vec3, Vec4};

/// First-person camera with an explicitly maintained orthonormal basis.
///
/// View space is left-handed: `look` is +Z, `right` is +X, `up` is +Y.
/// The projection maps depth to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    right: Vec3,
    up: Vec3,
    look: Vec3,

    near_z: f32,
    far_z: f32,
    aspect: f32,
    fov_y: f32,
    near_window_height: f32,
    far_window_height: f32,

    view: Mat4,
    proj: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera at the origin looking down +Z, with a 1 rad vertical field of
    /// view, square aspect and a `[1, 1000]` depth range.
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::Y,
            look: Vec3::Z,
            near_z: 1.0,
            far_z: 1000.0,
            aspect: 1.0,
            fov_y: 1.0,
            near_window_height: 0.0,
            far_window_height: 0.0,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        };
        camera.set_lens(camera.fov_y, camera.aspect, camera.near_z, camera.far_z);
        camera.update_view_matrix();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the eye. Accepts a `Vec3`, `[x, y, z]` or `(x, y, z)`.
    pub fn set_position(&mut self, position: impl Into<Vec3>) {
        self.position = position.into();
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn look(&self) -> Vec3 {
        self.look
    }

    pub fn near_z(&self) -> f32 {
        self.near_z
    }

    pub fn far_z(&self) -> f32 {
        self.far_z
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view derived from `fov_y` and `aspect`.
    pub fn fov_x(&self) -> f32 {
        ((self.fov_y * 0.5).tan() * self.aspect).atan() * 2.0
    }

    pub fn near_window_width(&self) -> f32 {
        self.near_window_height * self.aspect
    }

    pub fn near_window_height(&self) -> f32 {
        self.near_window_height
    }

    pub fn far_window_width(&self) -> f32 {
        self.far_window_height * self.aspect
    }

    pub fn far_window_height(&self) -> f32 {
        self.far_window_height
    }

    /// Configure the frustum and rebuild the projection matrix.
    ///
    /// Expects `0 < fov_y < π`, `aspect > 0` and `0 < zn < zf`. Values outside
    /// that domain are stored as given and produce a degenerate projection.
    pub fn set_lens(&mut self, fov_y: f32, aspect: f32, zn: f32, zf: f32) {
        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near_z = zn;
        self.far_z = zf;

        let half_tan = (0.5 * fov_y).tan();
        self.near_window_height = 2.0 * zn * half_tan;
        self.far_window_height = 2.0 * zf * half_tan;

        self.proj = Mat4::perspective_lh(fov_y, aspect, zn, zf);
        tracing::debug!(fov_y, aspect, near = zn, far = zf, "camera lens updated");
    }

    /// Place the eye at `eye` and orient it towards `target`.
    ///
    /// `world_up` must not be parallel to `target - eye`. The view matrix is
    /// not rebuilt.
    pub fn look_at(
        &mut self,
        eye: impl Into<Vec3>,
        target: impl Into<Vec3>,
        world_up: impl Into<Vec3>,
    ) {
        let eye = eye.into();
        let look = (target.into() - eye).normalize();
        let right = world_up.into().normalize().cross(look).normalize();
        let up = look.cross(right);

        self.position = eye;
        self.look = look;
        self.right = right;
        self.up = up;
    }

    /// View matrix as of the last `update_view_matrix`.
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix as of the last `set_lens`.
    pub fn proj(&self) -> Mat4 {
        self.proj
    }

    /// View followed by projection, from the cached matrices.
    pub fn view_proj(&self) -> Mat4 {
        self.proj * self.view
    }

    /// Translate along the right axis by `d` world units.
    pub fn strafe(&mut self, d: f32) {
        self.position += d * self.right;
    }

    /// Translate along the look axis by `d` world units.
    pub fn walk(&mut self, d: f32) {
        self.position += d * self.look;
    }

    /// Rotate `up` and `look` about the camera's right axis.
    pub fn pitch(&mut self, angle: f32) {
        let r = Mat3::from_axis_angle(self.right, angle);
        self.up = r * self.up;
        self.look = r * self.look;
    }

    /// Rotate the whole basis about the world Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        let r = Mat3::from_rotation_y(angle);
        self.right = r * self.right;
        self.up = r * self.up;
        self.look = r * self.look;
    }

    /// Re-orthonormalize the basis and rebuild the cached view matrix.
    pub fn update_view_matrix(&mut self) {
        // look is trusted; up and right are re-derived from it to remove drift.
        let look = self.look.normalize();
        let up = look.cross(self.right).normalize();
        let right = up.cross(look);

        let x = -self.position.dot(right);
        let y = -self.position.dot(up);
        let z = -self.position.dot(look);

        self.right = right;
        self.up = up;
        self.look = look;

        self.view = Mat4::from_cols(
            Vec4::new(right.x, up.x, look.x, 0.0),
            Vec4::new(right.y, up.y, look.y, 0.0),
            Vec4::new(right.z, up.z, look.z, 0.0),
            Vec4::new(x, y, z, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(cam: &Camera) {
        let (r, u, l) = (cam.right(), cam.up(), cam.look());
        assert!(r.dot(u).abs() < EPS, "right.up = {}", r.dot(u));
        assert!(r.dot(l).abs() < EPS, "right.look = {}", r.dot(l));
        assert!(u.dot(l).abs() < EPS, "up.look = {}", u.dot(l));
        assert!((r.length() - 1.0).abs() < EPS);
        assert!((u.length() - 1.0).abs() < EPS);
        assert!((l.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn default_camera() {
        let cam = Camera::new();
        assert_eq!(cam.position(), Vec3::ZERO);
        assert_eq!(cam.right(), Vec3::X);
        assert_eq!(cam.up(), Vec3::Y);
        assert_eq!(cam.look(), Vec3::Z);
        assert_eq!(cam.near_z(), 1.0);
        assert_eq!(cam.far_z(), 1000.0);
        assert_eq!(cam.aspect(), 1.0);
        assert_eq!(cam.fov_y(), 1.0);
        assert!(cam.view().abs_diff_eq(Mat4::IDENTITY, EPS));
        assert!(!cam.proj().col(0).x.is_nan());
    }

    #[test]
    fn set_lens_window_heights() {
        let mut cam = Camera::new();
        cam.set_lens(FRAC_PI_4, 16.0 / 9.0, 0.5, 250.0);

        let half_tan = (FRAC_PI_4 / 2.0).tan();
        assert!((cam.near_window_height() - 2.0 * 0.5 * half_tan).abs() < EPS);
        assert!((cam.far_window_height() - 2.0 * 250.0 * half_tan).abs() < 1e-3);
        assert_eq!(cam.fov_y(), FRAC_PI_4);
        assert_eq!(cam.aspect(), 16.0 / 9.0);
        assert_eq!(cam.near_z(), 0.5);
        assert_eq!(cam.far_z(), 250.0);
    }

    #[test]
    fn window_widths_are_derived() {
        let mut cam = Camera::new();
        cam.set_lens(1.2, 1.5, 2.0, 100.0);
        assert_eq!(cam.near_window_width(), cam.near_window_height() * 1.5);
        assert_eq!(cam.far_window_width(), cam.far_window_height() * 1.5);
    }

    #[test]
    fn fov_x_matches_aspect() {
        let mut cam = Camera::new();
        cam.set_lens(FRAC_PI_2, 1.0, 1.0, 10.0);
        assert!((cam.fov_x() - FRAC_PI_2).abs() < EPS);

        cam.set_lens(FRAC_PI_2, 2.0, 1.0, 10.0);
        assert!((cam.fov_x() - 2.0 * 2.0_f32.atan()).abs() < EPS);
    }

    #[test]
    fn proj_matches_lh_perspective() {
        let mut cam = Camera::new();
        cam.set_lens(0.9, 1.25, 0.1, 500.0);
        assert!(
            cam.proj()
                .abs_diff_eq(Mat4::perspective_lh(0.9, 1.25, 0.1, 500.0), EPS)
        );

        // Near plane maps to depth 0, far plane to depth 1.
        let near = cam.proj().project_point3(Vec3::new(0.0, 0.0, 0.1));
        let far = cam.proj().project_point3(Vec3::new(0.0, 0.0, 500.0));
        assert!(near.z.abs() < EPS);
        assert!((far.z - 1.0).abs() < EPS);
    }

    #[test]
    fn look_at_from_behind_origin() {
        let mut cam = Camera::new();
        cam.look_at(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
        );
        cam.update_view_matrix();

        assert!(cam.look().abs_diff_eq(Vec3::Z, EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, -5.0));

        let eye_in_view = cam.view().transform_point3(Vec3::new(0.0, 0.0, -5.0));
        assert!(eye_in_view.abs_diff_eq(Vec3::ZERO, EPS));

        let target_in_view = cam.view().transform_point3(Vec3::ZERO);
        assert!(target_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));
    }

    #[test]
    fn look_at_accepts_arrays_and_unnormalized_up() {
        let mut cam = Camera::new();
        cam.look_at([4.0, 3.0, -2.0], [0.0, 0.0, 0.0], [0.0, 7.0, 0.0]);
        assert_orthonormal(&cam);
        assert!(cam.up().y > 0.0);
    }

    #[test]
    fn look_at_does_not_rebuild_view() {
        let mut cam = Camera::new();
        let before = cam.view();
        cam.look_at([10.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(cam.view(), before);

        cam.update_view_matrix();
        assert_ne!(cam.view(), before);
    }

    #[test]
    fn set_position_overloads() {
        let mut cam = Camera::new();
        cam.set_position((1.0, 2.0, 3.0));
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 3.0));
        cam.set_position([4.0, 5.0, 6.0]);
        assert_eq!(cam.position(), Vec3::new(4.0, 5.0, 6.0));
        cam.set_position(Vec3::NEG_ONE);
        assert_eq!(cam.position(), Vec3::NEG_ONE);
    }

    #[test]
    fn strafe_round_trip() {
        let mut cam = Camera::new();
        cam.set_position([1.5, -2.0, 3.25]);
        cam.rotate_y(0.7);
        cam.update_view_matrix();
        let start = cam.position();

        cam.strafe(5.0);
        assert!(!cam.position().abs_diff_eq(start, EPS));
        cam.strafe(-5.0);
        assert!(cam.position().abs_diff_eq(start, EPS));
    }

    #[test]
    fn strafe_and_walk_follow_basis() {
        let mut cam = Camera::new();
        cam.strafe(2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), EPS));
        cam.walk(3.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(2.0, 0.0, 3.0), EPS));
    }

    #[test]
    fn walk_zero_is_noop() {
        let mut cam = Camera::new();
        cam.look_at([3.0, 4.0, -8.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        cam.update_view_matrix();
        let position = cam.position();
        let view = cam.view();

        cam.walk(0.0);
        assert_eq!(cam.position(), position);
        assert_eq!(cam.view(), view);

        cam.update_view_matrix();
        assert!(cam.view().abs_diff_eq(view, EPS));
    }

    #[test]
    fn mutations_leave_view_stale() {
        let mut cam = Camera::new();
        let view = cam.view();
        cam.walk(3.0);
        cam.strafe(1.0);
        cam.pitch(0.2);
        cam.rotate_y(0.4);
        cam.set_position([9.0, 9.0, 9.0]);
        assert_eq!(cam.view(), view);
    }

    #[test]
    fn rotate_y_turns_towards_right() {
        let mut cam = Camera::new();
        cam.rotate_y(FRAC_PI_2);
        assert!(cam.look().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.right().abs_diff_eq(Vec3::NEG_Z, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(cam.position(), Vec3::ZERO);
    }

    #[test]
    fn pitch_keeps_right_fixed() {
        let mut cam = Camera::new();
        cam.pitch(FRAC_PI_2);
        assert_eq!(cam.right(), Vec3::X);
        assert!(cam.up().abs_diff_eq(Vec3::Z, EPS));
        assert!(cam.look().abs_diff_eq(Vec3::NEG_Y, EPS));
    }

    #[test]
    fn basis_stays_orthonormal_under_rotation() {
        let mut cam = Camera::new();
        for i in 0..2_000 {
            let t = i as f32;
            cam.pitch((t * 0.37).sin() * 0.05);
            cam.rotate_y((t * 0.11).cos() * 0.08);
            if i % 7 == 0 {
                cam.update_view_matrix();
                assert_orthonormal(&cam);
            }
        }
        cam.update_view_matrix();
        assert_orthonormal(&cam);
    }

    #[test]
    fn rebuild_corrects_drifted_basis() {
        let mut cam = Camera::new();
        // Thousands of unrebuilt rotations accumulate floating-point drift.
        for _ in 0..10_000 {
            cam.pitch(0.013);
            cam.rotate_y(-0.029);
        }
        cam.update_view_matrix();
        assert_orthonormal(&cam);
    }

    #[test]
    fn view_matches_look_to_construction() {
        let mut cam = Camera::new();
        cam.set_position([2.0, 1.0, -6.0]);
        cam.rotate_y(0.3);
        cam.pitch(-0.2);
        cam.walk(1.5);
        cam.update_view_matrix();

        let expected = Mat4::look_to_lh(cam.position(), cam.look(), cam.up());
        assert!(cam.view().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn view_maps_basis_to_axes() {
        let mut cam = Camera::new();
        cam.look_at([1.0, 2.0, 3.0], [-4.0, 0.5, 9.0], [0.0, 1.0, 0.0]);
        cam.update_view_matrix();

        let eye = cam.position();
        let view = cam.view();
        assert!(view.transform_point3(eye).abs_diff_eq(Vec3::ZERO, 1e-4));
        assert!(
            view.transform_point3(eye + cam.look())
                .abs_diff_eq(Vec3::Z, 1e-4)
        );
        assert!(
            view.transform_point3(eye + cam.right())
                .abs_diff_eq(Vec3::X, 1e-4)
        );
        assert!(
            view.transform_point3(eye + cam.up())
                .abs_diff_eq(Vec3::Y, 1e-4)
        );
    }

    #[test]
    fn view_proj_composes_cached_matrices() {
        let mut cam = Camera::new();
        cam.set_lens(FRAC_PI_4, 4.0 / 3.0, 1.0, 1000.0);
        cam.look_at([0.0, 2.0, -15.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        cam.update_view_matrix();
        cam.rotate_y(0.25);
        cam.update_view_matrix();

        assert_eq!(cam.view_proj(), cam.proj() * cam.view());

        let p = Vec3::new(0.5, 0.25, 3.0);
        let stepwise = cam.proj().project_point3(cam.view().transform_point3(p));
        let combined = cam.view_proj().project_point3(p);
        assert!(stepwise.abs_diff_eq(combined, 1e-4));
    }

    #[test]
    fn update_view_leaves_proj_untouched() {
        let mut cam = Camera::new();
        cam.set_lens(0.8, 2.0, 0.5, 50.0);
        let proj = cam.proj();
        cam.walk(4.0);
        cam.pitch(0.3);
        cam.update_view_matrix();
        assert_eq!(cam.proj(), proj);
    }
}
