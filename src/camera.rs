use glam::{Mat4, Vec2, Vec3};

use crate::input::{InputState, MouseButton};

/// Camera parameters consumed by the renderer's global uniform buffer.
#[derive(Clone, Debug)]
pub struct CameraParams {
    pub view_proj: Mat4,
    pub position: Vec3,
}

/// Orthographic orbit camera: a -5..5 frustum looking at the origin from
/// (0, 0, 10), so the whole object grid stays in frame.
///
/// Dragging with the left mouse button orbits around the origin while
/// `controls_enabled` is set; the projection stays orthographic so the
/// grid keeps its size.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub controls_enabled: bool,
    yaw: f32,
    pitch: f32,
    distance: f32,
    last_cursor: Option<Vec2>,
}

const FRUSTUM_HALF_EXTENT: f32 = 5.0;
const NEAR: f32 = 0.001;
const FAR: f32 = 1000.0;
const DRAG_SENSITIVITY: f32 = 0.008;
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            controls_enabled: true,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
            last_cursor: None,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the input snapshot once per frame; a left-button drag
    /// rotates the eye around the origin.
    pub fn update(&mut self, input: &InputState) {
        let cursor = input.mouse_position();
        let dragging = self.controls_enabled && input.is_mouse_button_down(MouseButton::LEFT);
        if dragging {
            if let Some(last) = self.last_cursor {
                let delta = cursor - last;
                self.yaw -= delta.x * DRAG_SENSITIVITY;
                self.pitch = (self.pitch + delta.y * DRAG_SENSITIVITY)
                    .clamp(-PITCH_LIMIT, PITCH_LIMIT);
            }
            self.last_cursor = Some(cursor);
        } else {
            self.last_cursor = None;
        }
    }

    pub fn position(&self) -> Vec3 {
        let rotation = Mat4::from_rotation_y(self.yaw) * Mat4::from_rotation_x(self.pitch);
        (rotation * Vec3::new(0.0, 0.0, self.distance).extend(1.0)).truncate()
    }

    pub fn params(&self, aspect: f32) -> CameraParams {
        let position = self.position();
        let view = Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Y);
        let half_width = FRUSTUM_HALF_EXTENT * aspect.max(0.01);
        let projection = Mat4::orthographic_rh(
            -half_width,
            half_width,
            -FRUSTUM_HALF_EXTENT,
            FRUSTUM_HALF_EXTENT,
            NEAR,
            FAR,
        );
        CameraParams {
            view_proj: projection * view,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_position_matches_the_demo() {
        let camera = OrbitCamera::new();
        let position = camera.position();
        assert!((position - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn drag_orbits_only_while_enabled() {
        let input = InputState::new();
        input.set_mouse_position(Vec2::new(100.0, 100.0));

        let mut camera = OrbitCamera::new();
        camera.controls_enabled = false;
        input.set_mouse_button_down(MouseButton::LEFT);
        camera.update(&input);
        input.set_mouse_position(Vec2::new(160.0, 100.0));
        camera.update(&input);
        assert!((camera.position() - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);

        camera.controls_enabled = true;
        input.set_mouse_position(Vec2::new(100.0, 100.0));
        camera.update(&input);
        input.set_mouse_position(Vec2::new(160.0, 100.0));
        camera.update(&input);
        let moved = camera.position();
        assert!((moved - Vec3::new(0.0, 0.0, 10.0)).length() > 1e-3);
        assert!((moved.length() - 10.0).abs() < 1e-4, "orbit keeps distance");
    }

    #[test]
    fn params_keep_the_eye_position() {
        let camera = OrbitCamera::new();
        let params = camera.params(1.0);
        assert!((params.position - camera.position()).length() < 1e-6);
    }
}
