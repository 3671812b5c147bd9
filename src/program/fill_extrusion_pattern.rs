use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use log::trace;

use super::uniforms::{AtlasSize, UniformValue};
use crate::crossfade::CrossfadeParameters;
use crate::light::{light_color, light_intensity, light_position, EvaluatedLight};
use crate::tile::{UnwrappedTileId, TILE_SIZE};
use crate::transform::TransformState;

/// Pixel size of `tile` when drawn at the camera's integer zoom.
pub fn tile_size_at_nearest_zoom(tile: &UnwrappedTileId, state: &TransformState) -> i32 {
    let zoom_delta = f64::from(state.integer_zoom()) - f64::from(tile.canonical.z);
    (TILE_SIZE * state.zoom_scale(zoom_delta)) as i32
}

/// Top-left corner of `tile` in world pixels at the camera's integer zoom,
/// with wrapped world copies shifted horizontally.
pub fn pixel_origin(tile: &UnwrappedTileId, state: &TransformState) -> [i32; 2] {
    let size = tile_size_at_nearest_zoom(tile, state);
    let canonical = tile.canonical;
    let world_x = f64::from(canonical.x)
        + f64::from(tile.wrap) * state.zoom_scale(f64::from(canonical.z));
    let pixel_x = (f64::from(size) * world_x) as i32;
    // Integer product wraps like the shader-side 32-bit reconstruction.
    let pixel_y = (size as u32).wrapping_mul(canonical.y) as i32;
    [pixel_x, pixel_y]
}

/// Splits a pixel coordinate into its high and low 16 bits.
///
/// Single floats lose integer precision past 2^24, so the shader receives
/// both halves and rebuilds `upper * 65536 + lower` itself.
pub fn split_pixel_coord(value: i32) -> (f32, f32) {
    ((value >> 16) as f32, (value & 0xFFFF) as f32)
}

/// Layout uniforms of the pattern extrusion program, in shader order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillExtrusionPatternLayoutUniforms {
    pub matrix: Mat4,
    pub opacity: f32,
    pub scale: [f32; 4],
    pub texsize: [f32; 2],
    pub fade: f32,
    pub pixel_coord_upper: [f32; 2],
    pub pixel_coord_lower: [f32; 2],
    pub height_factor: f32,
    pub lightcolor: [f32; 3],
    pub lightpos: [f32; 3],
    pub lightintensity: f32,
    pub vertical_gradient: f32,
}

impl FillExtrusionPatternLayoutUniforms {
    pub const NAMES: [&'static str; 12] = [
        "matrix",
        "opacity",
        "scale",
        "texsize",
        "fade",
        "pixel_coord_upper",
        "pixel_coord_lower",
        "height_factor",
        "lightcolor",
        "lightpos",
        "lightintensity",
        "vertical_gradient",
    ];

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        matrix: Mat4,
        atlas_size: AtlasSize,
        crossfade: &CrossfadeParameters,
        tile: &UnwrappedTileId,
        state: &TransformState,
        opacity: f32,
        height_factor: f32,
        pixel_ratio: f32,
        light: &EvaluatedLight,
        vertical_gradient: f32,
    ) -> Self {
        let integer_zoom = f64::from(state.integer_zoom());
        let tile_ratio = (1.0 / tile.pixels_to_tile_units(1.0, integer_zoom)) as f32;
        let [pixel_x, pixel_y] = pixel_origin(tile, state);
        let (upper_x, lower_x) = split_pixel_coord(pixel_x);
        let (upper_y, lower_y) = split_pixel_coord(pixel_y);
        trace!("pattern origin for {tile}: ({pixel_x}, {pixel_y}), tile ratio {tile_ratio}");

        Self {
            matrix,
            opacity,
            scale: [
                pixel_ratio,
                tile_ratio,
                crossfade.from_scale,
                crossfade.to_scale,
            ],
            texsize: atlas_size.to_array(),
            fade: crossfade.t,
            pixel_coord_upper: [upper_x, upper_y],
            pixel_coord_lower: [lower_x, lower_y],
            height_factor,
            lightcolor: light_color(light),
            lightpos: light_position(light, state),
            lightintensity: light_intensity(light),
            vertical_gradient,
        }
    }

    pub fn values(&self) -> [(&'static str, UniformValue); 12] {
        let [
            matrix,
            opacity,
            scale,
            texsize,
            fade,
            upper,
            lower,
            height_factor,
            lightcolor,
            lightpos,
            lightintensity,
            vertical_gradient,
        ] = Self::NAMES;
        [
            (matrix, UniformValue::mat4(self.matrix)),
            (opacity, UniformValue::Float(self.opacity)),
            (scale, UniformValue::Vec4(self.scale)),
            (texsize, UniformValue::Vec2(self.texsize)),
            (fade, UniformValue::Float(self.fade)),
            (upper, UniformValue::Vec2(self.pixel_coord_upper)),
            (lower, UniformValue::Vec2(self.pixel_coord_lower)),
            (height_factor, UniformValue::Float(self.height_factor)),
            (lightcolor, UniformValue::Vec3(self.lightcolor)),
            (lightpos, UniformValue::Vec3(self.lightpos)),
            (lightintensity, UniformValue::Float(self.lightintensity)),
            (vertical_gradient, UniformValue::Float(self.vertical_gradient)),
        ]
    }

    pub fn to_ubo(&self) -> FillExtrusionPatternUbo {
        FillExtrusionPatternUbo {
            matrix: self.matrix.to_cols_array_2d(),
            opacity: self.opacity,
            _pad0: [0.0; 3],
            scale: self.scale,
            texsize: self.texsize,
            fade: self.fade,
            _pad1: 0.0,
            pixel_coord_upper: self.pixel_coord_upper,
            pixel_coord_lower: self.pixel_coord_lower,
            height_factor: self.height_factor,
            _pad2: [0.0; 3],
            lightcolor: self.lightcolor,
            _pad3: 0.0,
            lightpos: self.lightpos,
            lightintensity: self.lightintensity,
            vertical_gradient: self.vertical_gradient,
            _pad4: [0.0; 3],
        }
    }
}

/// std140 image of [`FillExtrusionPatternLayoutUniforms`], matching
/// `FillExtrusionPatternUniforms` in the WGSL source.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FillExtrusionPatternUbo {
    pub matrix: [[f32; 4]; 4],
    pub opacity: f32,
    _pad0: [f32; 3],
    pub scale: [f32; 4],
    pub texsize: [f32; 2],
    pub fade: f32,
    _pad1: f32,
    pub pixel_coord_upper: [f32; 2],
    pub pixel_coord_lower: [f32; 2],
    pub height_factor: f32,
    _pad2: [f32; 3],
    pub lightcolor: [f32; 3],
    _pad3: f32,
    pub lightpos: [f32; 3],
    pub lightintensity: f32,
    pub vertical_gradient: f32,
    _pad4: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<FillExtrusionPatternUbo>() == 192);
