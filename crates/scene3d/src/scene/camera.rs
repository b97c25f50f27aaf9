//! Camera payload for scene nodes
//!
//! The camera's eye position comes from the node it is attached to; the
//! payload only carries the look-at target, up vector, and projection
//! parameters. Right-handed, Y-up, OpenGL-style clip space.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Projection parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Perspective projection
    Perspective {
        /// Vertical field of view in radians
        fov_y: f32,
        /// Viewport aspect ratio (width / height)
        aspect: f32,
        /// Near clipping distance
        near: f32,
        /// Far clipping distance
        far: f32,
    },
    /// Orthographic projection
    Orthographic {
        /// Left clipping plane
        left: f32,
        /// Right clipping plane
        right: f32,
        /// Bottom clipping plane
        bottom: f32,
        /// Top clipping plane
        top: f32,
        /// Near clipping distance
        near: f32,
        /// Far clipping distance
        far: f32,
    },
}

/// Camera attached to a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World-space point the camera looks at
    pub target: Vec3,
    /// Up vector, typically +Y
    pub up: Vec3,
    /// Projection parameters
    pub projection: Projection,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// `fov_y_degrees` is converted to radians internally.
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            target: Vec3::zeros(),
            up: Vec3::y(),
            projection: Projection::Perspective {
                fov_y: crate::foundation::math::utils::deg_to_rad(fov_y_degrees),
                aspect,
                near,
                far,
            },
        }
    }

    /// Create an orthographic camera looking at the origin
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            target: Vec3::zeros(),
            up: Vec3::y(),
            projection: Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            },
        }
    }

    /// Point the camera at a new target
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// View matrix for a camera positioned at `eye`
    pub fn view_matrix(&self, eye: Vec3) -> Mat4 {
        Mat4::look_at(eye, self.target, self.up)
    }

    /// Projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective(fov_y, aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic(left, right, bottom, top, near, far),
        }
    }
}
