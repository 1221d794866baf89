//! Camera: a movable, orientable viewpoint producing view/projection matrices.
//!
//! The camera keeps its own right/up/look basis and updates it incrementally
//! from strafe, walk, pitch and yaw commands. Matrices are cached and only
//! rebuilt on request.
//!
//! # Invariants
//! - After `update_view_matrix`, right/up/look are orthonormal.
//! - Mutations never rebuild the view matrix; call `update_view_matrix` once
//!   per frame before reading `view` or `view_proj`.
//! - Only `set_lens` touches the projection matrix.

mod camera;

pub use camera::Camera;
