//! Camera description, pointer rays and the cursor marker.
//!
//! These types avoid platform APIs; the native frontend builds its
//! view-projection from the same [`Camera`] the session hit-tests against.

use crate::constants::{
    CAMERA_FOVY_DEGREES, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, CURSOR_PLANE_Z, DEFAULT_ASPECT,
};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: DEFAULT_ASPECT,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the eye through a point in normalized device coordinates.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Where the ray crosses the plane `z = plane_z`, if in front of the origin.
    pub fn hit_z_plane(&self, plane_z: f32) -> Option<Vec3> {
        if self.dir.z.abs() <= 1e-6 {
            return None;
        }
        let t = (plane_z - self.origin.z) / self.dir.z;
        (t >= 0.0).then(|| self.at(t))
    }
}

/// On-screen marker that trails the raw pointer.
#[derive(Clone, Debug)]
pub struct CursorMarker {
    pub ndc: Vec2,
    pub world: Vec3,
    pub visible: bool,
}

impl Default for CursorMarker {
    fn default() -> Self {
        Self {
            ndc: Vec2::ZERO,
            world: Vec3::new(0.0, 0.0, CURSOR_PLANE_Z),
            visible: false,
        }
    }
}

impl CursorMarker {
    /// Ease toward `target` and re-project onto the focal plane.
    pub fn follow(&mut self, target: Vec2, smoothing: f32, camera: &Camera) {
        self.ndc = self.ndc.lerp(target, smoothing);
        if let Some(p) = camera.ray_through(self.ndc).hit_z_plane(CURSOR_PLANE_Z) {
            self.world = p;
        }
    }
}
