use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nominal size of a tile in device-independent pixels.
pub const TILE_SIZE: f64 = 512.0;

/// Number of tile units spanning one tile edge.
pub const EXTENT: f64 = 8192.0;

pub const MAX_ZOOM: u8 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileIdError {
    #[error("tile zoom {0} exceeds the maximum of {max}", max = MAX_ZOOM)]
    ZoomOutOfRange(u8),
    #[error("tile {x}/{y} is outside the {dim}x{dim} grid at zoom {z}")]
    CoordinateOutOfRange { z: u8, x: u32, y: u32, dim: u64 },
}

/// Position of a tile inside the tile pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalTileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl CanonicalTileId {
    pub fn new(z: u8, x: u32, y: u32) -> Result<Self, TileIdError> {
        if z > MAX_ZOOM {
            return Err(TileIdError::ZoomOutOfRange(z));
        }
        let dim = 1u64 << z;
        if u64::from(x) >= dim || u64::from(y) >= dim {
            return Err(TileIdError::CoordinateOutOfRange { z, x, y, dim });
        }
        Ok(Self { z, x, y })
    }
}

impl fmt::Display for CanonicalTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A canonical tile plus the number of world copies it is shifted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnwrappedTileId {
    pub wrap: i16,
    pub canonical: CanonicalTileId,
}

impl UnwrappedTileId {
    pub fn new(wrap: i16, canonical: CanonicalTileId) -> Self {
        Self { wrap, canonical }
    }

    /// Converts a length in pixels at `zoom` into this tile's units.
    pub fn pixels_to_tile_units(&self, pixels: f64, zoom: f64) -> f64 {
        pixels * (EXTENT / (TILE_SIZE * 2f64.powf(zoom - f64::from(self.canonical.z))))
    }
}

impl fmt::Display for UnwrappedTileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (wrap {})", self.canonical, self.wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_coordinates_outside_the_grid() {
        assert!(CanonicalTileId::new(4, 15, 15).is_ok());
        assert_eq!(
            CanonicalTileId::new(4, 16, 0),
            Err(TileIdError::CoordinateOutOfRange {
                z: 4,
                x: 16,
                y: 0,
                dim: 16
            })
        );
        assert_eq!(
            CanonicalTileId::new(33, 0, 0),
            Err(TileIdError::ZoomOutOfRange(33))
        );
    }

    #[test]
    fn one_pixel_at_tile_zoom_is_sixteen_units() {
        let tile = UnwrappedTileId::new(0, CanonicalTileId::new(4, 3, 2).unwrap());
        assert_eq!(tile.pixels_to_tile_units(1.0, 4.0), 16.0);
        assert_eq!(tile.pixels_to_tile_units(1.0, 5.0), 8.0);
        assert_eq!(tile.pixels_to_tile_units(2.0, 3.0), 64.0);
    }

    #[test]
    fn display_includes_wrap() {
        let tile = UnwrappedTileId::new(-1, CanonicalTileId::new(2, 1, 3).unwrap());
        assert_eq!(tile.to_string(), "2/1/3 (wrap -1)");
    }
}
