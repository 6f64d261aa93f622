use serde::{Deserialize, Serialize};

/// A rotation, as a unit quaternion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quaternion {
    /// The real part.
    pub w: f64,
    /// The i coefficient.
    pub x: f64,
    /// The j coefficient.
    pub y: f64,
    /// The k coefficient.
    pub z: f64,
}

/// A translation, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    /// X
    pub x: f64,
    /// Y
    pub y: f64,
    /// Z
    pub z: f64,
}

/// The pose of a sensor in the file-level coordinate system.
///
/// The rotation is applied first, then the translation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigidBody {
    /// The rotation.
    pub rotation: Quaternion,
    /// The translation.
    pub translation: Translation,
}

impl Default for Quaternion {
    fn default() -> Quaternion {
        Quaternion {
            w: 1.,
            x: 0.,
            y: 0.,
            z: 0.,
        }
    }
}

impl RigidBody {
    /// Returns true if this pose is the identity transform.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::RigidBody;
    /// assert!(RigidBody::default().is_identity());
    /// ```
    pub fn is_identity(&self) -> bool {
        *self == RigidBody::default()
    }
}
