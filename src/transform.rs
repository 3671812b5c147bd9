use serde::{Deserialize, Serialize};

/// Camera snapshot used while preparing a draw call.
///
/// Only the pieces consumed by the uniform builders are tracked here: the
/// fractional zoom and the bearing (radians, counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformState {
    pub zoom: f64,
    pub bearing: f64,
}

impl TransformState {
    pub fn new(zoom: f64, bearing: f64) -> Self {
        Self { zoom, bearing }
    }

    /// Returns a copy rotated to the given bearing expressed in degrees.
    pub fn with_bearing_degrees(self, degrees: f64) -> Self {
        Self {
            bearing: degrees.to_radians(),
            ..self
        }
    }

    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom level of the tile pyramid currently being drawn.
    pub fn integer_zoom(&self) -> u8 {
        self.zoom.floor().clamp(0.0, f64::from(u8::MAX)) as u8
    }

    /// Scale factor between two zoom levels `zoom` apart.
    pub fn zoom_scale(&self, zoom: f64) -> f64 {
        2f64.powf(zoom)
    }

    pub fn scale_zoom(&self, scale: f64) -> f64 {
        scale.log2()
    }
}
