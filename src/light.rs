use std::str::FromStr;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::transform::TransformState;

/// Frame a light direction is fixed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightAnchor {
    /// The light rotates together with the map.
    Map,
    /// The light stays fixed on screen while the camera rotates.
    #[default]
    Viewport,
}

impl FromStr for LightAnchor {
    type Err = UnknownAnchor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "map" => Ok(Self::Map),
            "viewport" => Ok(Self::Viewport),
            _ => Err(UnknownAnchor(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown light anchor `{0}` (expected `map` or `viewport`)")]
pub struct UnknownAnchor(pub String);

/// Light position in spherical coordinates plus its Cartesian form.
///
/// Angles are stored in degrees. An azimuth of 0° points "up" the map, so
/// 90° is added before converting to the x/y plane. Both forms only change
/// together through the setters; serialized positions carry the Cartesian
/// vector alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec3", into = "Vec3")]
pub struct LightPosition {
    radial: f32,
    azimuthal: f32,
    polar: f32,
    cartesian: Vec3,
}

impl LightPosition {
    pub fn from_spherical(radial: f32, azimuthal: f32, polar: f32) -> Self {
        let a = (azimuthal + 90.0).to_radians();
        let p = polar.to_radians();
        let cartesian = Vec3::new(
            radial * a.cos() * p.sin(),
            radial * a.sin() * p.sin(),
            radial * p.cos(),
        );
        Self {
            radial,
            azimuthal,
            polar,
            cartesian,
        }
    }

    /// Builds a position from an already Cartesian vector, which is kept
    /// verbatim so later reads are exact.
    pub fn from_cartesian(cartesian: Vec3) -> Self {
        let radial = cartesian.length();
        let (azimuthal, polar) = if radial > 0.0 {
            (
                cartesian.y.atan2(cartesian.x).to_degrees() - 90.0,
                (cartesian.z / radial).clamp(-1.0, 1.0).acos().to_degrees(),
            )
        } else {
            (0.0, 0.0)
        };
        Self {
            radial,
            azimuthal,
            polar,
            cartesian,
        }
    }

    pub fn set_spherical(&mut self, radial: f32, azimuthal: f32, polar: f32) {
        *self = Self::from_spherical(radial, azimuthal, polar);
    }

    pub fn set_cartesian(&mut self, cartesian: Vec3) {
        *self = Self::from_cartesian(cartesian);
    }

    pub fn radial(&self) -> f32 {
        self.radial
    }

    pub fn azimuthal(&self) -> f32 {
        self.azimuthal
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn cartesian(&self) -> Vec3 {
        self.cartesian
    }
}

impl From<Vec3> for LightPosition {
    fn from(cartesian: Vec3) -> Self {
        Self::from_cartesian(cartesian)
    }
}

impl From<LightPosition> for Vec3 {
    fn from(position: LightPosition) -> Self {
        position.cartesian
    }
}

impl Default for LightPosition {
    fn default() -> Self {
        Self::from_spherical(1.15, 210.0, 30.0)
    }
}

/// Style-resolved lighting for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedLight {
    pub color: Vec3,
    pub position: LightPosition,
    pub intensity: f32,
    pub anchor: LightAnchor,
}

impl Default for EvaluatedLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            position: LightPosition::default(),
            intensity: 0.5,
            anchor: LightAnchor::Viewport,
        }
    }
}

pub fn light_color(light: &EvaluatedLight) -> [f32; 3] {
    light.color.to_array()
}

pub fn light_intensity(light: &EvaluatedLight) -> f32 {
    light.intensity
}

/// Resolves the light direction for the current camera.
///
/// Viewport-anchored lights are counter-rotated by the camera bearing so they
/// keep their on-screen direction; map-anchored lights are returned as is.
pub fn light_position(light: &EvaluatedLight, state: &TransformState) -> [f32; 3] {
    let position = light.position.cartesian();
    let mut rotation = Mat3::IDENTITY;
    if light.anchor == LightAnchor::Viewport {
        rotation = Mat3::from_rotation_z(-state.bearing() as f32) * rotation;
    }
    (rotation * position).to_array()
}
