use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::fly_camera::FlyCamera;

/// Translates keyboard and mouse input into free-fly camera motion.
///
/// WASD moves along the look direction, Space/Shift move vertically, and
/// dragging with the left mouse button turns the camera. The scroll wheel
/// scales the movement speed.
pub struct CameraController {
    pub move_speed: f32,
    pub look_speed: f32,
    forward_pressed: bool,
    backward_pressed: bool,
    left_pressed: bool,
    right_pressed: bool,
    up_pressed: bool,
    down_pressed: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(move_speed: f32, look_speed: f32) -> Self {
        Self {
            move_speed,
            look_speed,
            forward_pressed: false,
            backward_pressed: false,
            left_pressed: false,
            right_pressed: false,
            up_pressed: false,
            down_pressed: false,
            is_mouse_pressed: false,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut FlyCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / 20.0
                    }
                };
                // Scroll up = faster, scroll down = slower.
                self.move_speed = (self.move_speed * (1.0 + scroll_amount * 0.1))
                    .clamp(0.25, 50.0);
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    camera.add_yaw(delta.0 as f32 * self.look_speed);
                    camera.add_pitch(-delta.1 as f32 * self.look_speed);
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent) {
        let pressed = event.state == ElementState::Pressed;
        match event.physical_key {
            PhysicalKey::Code(KeyCode::KeyW) => self.forward_pressed = pressed,
            PhysicalKey::Code(KeyCode::KeyS) => self.backward_pressed = pressed,
            PhysicalKey::Code(KeyCode::KeyA) => self.left_pressed = pressed,
            PhysicalKey::Code(KeyCode::KeyD) => self.right_pressed = pressed,
            PhysicalKey::Code(KeyCode::Space) => self.up_pressed = pressed,
            PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight) => {
                self.down_pressed = pressed
            }
            _ => (),
        }
    }

    /// Moves the camera according to the keys held this frame.
    pub fn update_camera(&mut self, camera: &mut FlyCamera, delta_time: f32) {
        let distance = self.move_speed * delta_time;
        let forward = camera.forward();
        let right = camera.right();

        if self.forward_pressed {
            camera.position += forward * distance;
        }
        if self.backward_pressed {
            camera.position -= forward * distance;
        }
        if self.right_pressed {
            camera.position += right * distance;
        }
        if self.left_pressed {
            camera.position -= right * distance;
        }
        if self.up_pressed {
            camera.position += camera.up * distance;
        }
        if self.down_pressed {
            camera.position -= camera.up * distance;
        }
    }

    /// Returns true while the look drag is active
    pub fn is_looking(&self) -> bool {
        self.is_mouse_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn key_event_stub() -> CameraController {
        CameraController::new(2.0, 0.004)
    }

    #[test]
    fn held_forward_key_moves_along_the_look_vector() {
        let mut controller = key_event_stub();
        controller.forward_pressed = true;
        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 5.0), 1.0);

        controller.update_camera(&mut camera, 0.5);

        // Default forward is -Z; speed 2.0 for half a second covers 1 unit.
        assert!((camera.position.z - 4.0).abs() < 1e-5);
        assert!(camera.position.x.abs() < 1e-5);
    }

    #[test]
    fn opposing_keys_cancel_out() {
        let mut controller = key_event_stub();
        controller.left_pressed = true;
        controller.right_pressed = true;
        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 0.0), 1.0);

        controller.update_camera(&mut camera, 1.0);

        assert!(camera.position.magnitude() < 1e-5);
    }

    #[test]
    fn vertical_keys_move_along_world_up() {
        let mut controller = key_event_stub();
        controller.up_pressed = true;
        let mut camera = FlyCamera::new(Vector3::new(0.0, 1.0, 0.0), 1.0);

        controller.update_camera(&mut camera, 1.0);

        assert!((camera.position.y - 3.0).abs() < 1e-5);
    }
}
