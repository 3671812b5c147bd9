use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Blend between the pattern images of two adjacent integer zoom levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossfadeParameters {
    pub from_scale: f32,
    pub to_scale: f32,
    pub t: f32,
}

impl CrossfadeParameters {
    pub fn new(from_scale: f32, to_scale: f32, t: f32) -> Self {
        Self {
            from_scale,
            to_scale,
            t,
        }
    }

    /// Derives the crossfade for `zoom` given the last integer zoom the map
    /// settled on and how long ago that happened.
    ///
    /// A zero `fade_duration` means the fade has already completed.
    pub fn from_zoom_history(
        zoom: f64,
        last_integer_zoom: f64,
        since_last_integer_zoom: Duration,
        fade_duration: Duration,
    ) -> Self {
        let fraction = (zoom - zoom.floor()) as f32;
        let progress = if fade_duration.is_zero() {
            1.0
        } else {
            (since_last_integer_zoom.as_secs_f32() / fade_duration.as_secs_f32()).min(1.0)
        };

        if zoom > last_integer_zoom {
            Self::new(2.0, 1.0, fraction + (1.0 - fraction) * progress)
        } else {
            Self::new(0.5, 1.0, 1.0 - (1.0 - progress) * fraction)
        }
    }
}

impl Default for CrossfadeParameters {
    fn default() -> Self {
        Self::new(1.0, 1.0, 0.0)
    }
}
