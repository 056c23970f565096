use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Free-fly camera driven by yaw/pitch Euler angles.
///
/// The look direction is derived from the angles every frame; the
/// controller moves `position` along the current forward/right axes.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        let view = Matrix4::look_to_rh(eye, self.forward(), self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FlyCamera {
    /// Creates a camera at `position` looking down the negative Z axis.
    pub fn new(position: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            position,
            yaw: Rad(-std::f32::consts::FRAC_PI_2),
            pitch: Rad(0.0),
            up: Vector3::unit_y(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    /// Unit look direction derived from yaw and pitch.
    pub fn forward(&self) -> Vector3<f32> {
        Vector3::new(
            self.yaw.0.cos() * self.pitch.0.cos(),
            self.pitch.0.sin(),
            self.yaw.0.sin() * self.pitch.0.cos(),
        )
        .normalize()
    }

    /// Unit right axis, perpendicular to forward and world up.
    pub fn right(&self) -> Vector3<f32> {
        self.forward().cross(self.up).normalize()
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += Rad(delta);
    }

    /// Adds pitch, clamped just short of straight up/down so the look
    /// vector never degenerates against world up.
    pub fn add_pitch(&mut self, delta: f32) {
        let limit = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = Rad((self.pitch.0 + delta).clamp(-limit, limit));
    }

    /// Points the camera at a world-space target.
    pub fn set_look_at(&mut self, target: Vector3<f32>) {
        let dir = target - self.position;
        let horizontal = Vector2::new(dir.x, dir.z).magnitude();
        self.yaw = Rad(dir.z.atan2(dir.x));
        self.pitch = Rad(dir.y.atan2(horizontal));
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position =
            [self.position.x, self.position.y, self.position.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = FlyCamera::new(Vector3::new(0.0, 0.0, 5.0), 1.0);
        assert_close(camera.forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_close(camera.right(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 0.0), 1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch.0 < std::f32::consts::FRAC_PI_2);
        camera.add_pitch(-20.0);
        assert!(camera.pitch.0 > -std::f32::consts::FRAC_PI_2);
        // The look vector stays well-defined at the limits.
        assert!(camera.forward().magnitude() > 0.99);
    }

    #[test]
    fn look_at_faces_the_target() {
        let mut camera = FlyCamera::new(Vector3::new(0.0, 0.0, 0.0), 1.0);
        camera.set_look_at(Vector3::new(3.0, 0.0, 0.0));
        assert_close(camera.forward(), Vector3::new(1.0, 0.0, 0.0));

        camera.set_look_at(Vector3::new(0.0, 4.0, -4.0));
        let forward = camera.forward();
        assert!(forward.y > 0.0 && forward.z < 0.0);
    }

    #[test]
    fn uniform_tracks_the_eye_position() {
        let mut camera = FlyCamera::new(Vector3::new(1.0, 2.0, 3.0), 1.0);
        camera.position = Vector3::new(4.0, 5.0, 6.0);
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position, [4.0, 5.0, 6.0, 1.0]);
    }
}
