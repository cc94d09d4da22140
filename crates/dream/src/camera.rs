//! View matrix construction.

use dream_linalg::{Mat44, Vec3f};

/// Builds a view matrix for an eye at `origin` looking along `direction`.
///
/// `direction` must be a unit vector and `up` must not be parallel to it. The camera's side
/// vector is `direction × up` (normalized), and its actual up vector is recomputed as
/// `side × direction`, so `up` only needs to point roughly upwards.
///
/// The returned matrix transforms world coordinates into camera space, where the camera sits at
/// the origin and looks down the negative Z axis.
///
/// # Examples
///
/// ```
/// # use dream::{camera::look_at, *};
/// let view = look_at(vec3(0.0, 0.0, 5.0), -Vec3f::Z, Vec3f::Y);
/// assert_approx_eq!(view * Vec3f::ZERO, vec3(0.0, 0.0, -5.0));
/// ```
pub fn look_at(origin: Vec3f, direction: Vec3f, up: Vec3f) -> Mat44 {
    let side = direction.cross(up).normalize();
    let true_up = side.cross(direction);

    let mut rotation = Mat44::IDENTITY;
    rotation.set(0, 0, side);
    rotation.set(0, 1, true_up);
    rotation.set(0, 2, -direction);
    rotation.transpose();

    rotation.translated_matrix(-origin)
}

/// A camera positioned at a point, looking in a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCamera {
    origin: Vec3f,
    direction: Vec3f,
    up: Vec3f,
}

impl Default for PointCamera {
    /// A camera at the origin, looking along +Z with +Y up.
    fn default() -> Self {
        Self {
            origin: Vec3f::ZERO,
            direction: Vec3f::Z,
            up: Vec3f::Y,
        }
    }
}

impl PointCamera {
    /// Creates a camera at `origin` looking along the unit vector `direction`, with `up` pointing
    /// roughly upwards.
    pub fn new(origin: Vec3f, direction: Vec3f, up: Vec3f) -> Self {
        Self {
            origin,
            direction,
            up,
        }
    }

    /// Returns the world-to-camera transform, see [`look_at`].
    pub fn view_matrix(&self) -> Mat44 {
        look_at(self.origin, self.direction, self.up)
    }

    /// Moves the camera to `origin` and points it along `direction`, keeping the up vector.
    pub fn set_line(&mut self, origin: Vec3f, direction: Vec3f) {
        self.origin = origin;
        self.direction = direction;
    }

    /// Points the camera from its current position towards `target`.
    ///
    /// Does nothing if `target` is the camera's own position.
    pub fn look_towards(&mut self, target: Vec3f) {
        let offset = target - self.origin;
        if offset.length2() == 0.0 {
            log::debug!("camera at {:?} cannot look at itself", self.origin);
            return;
        }
        self.direction = offset.normalize();
    }

    pub fn origin(&self) -> Vec3f {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec3f) {
        self.origin = origin;
    }

    pub fn direction(&self) -> Vec3f {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3f) {
        self.direction = direction;
    }

    pub fn up(&self) -> Vec3f {
        self.up
    }

    pub fn set_up(&mut self, up: Vec3f) {
        self.up = up;
    }
}
