use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use log::trace;

use super::uniforms::UniformValue;
use crate::light::{light_color, light_intensity, light_position, EvaluatedLight};
use crate::transform::TransformState;

/// Layout uniforms of the plain color extrusion program, in shader order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillExtrusionLayoutUniforms {
    pub matrix: Mat4,
    pub opacity: f32,
    pub lightcolor: [f32; 3],
    pub lightpos: [f32; 3],
    pub lightintensity: f32,
    pub vertical_gradient: f32,
}

impl FillExtrusionLayoutUniforms {
    pub const NAMES: [&'static str; 6] = [
        "matrix",
        "opacity",
        "lightcolor",
        "lightpos",
        "lightintensity",
        "vertical_gradient",
    ];

    pub fn new(
        matrix: Mat4,
        state: &TransformState,
        opacity: f32,
        light: &EvaluatedLight,
        vertical_gradient: f32,
    ) -> Self {
        let uniforms = Self {
            matrix,
            opacity,
            lightcolor: light_color(light),
            lightpos: light_position(light, state),
            lightintensity: light_intensity(light),
            vertical_gradient,
        };
        trace!("fill extrusion uniforms: {uniforms:?}");
        uniforms
    }

    pub fn values(&self) -> [(&'static str, UniformValue); 6] {
        let [matrix, opacity, lightcolor, lightpos, lightintensity, vertical_gradient] =
            Self::NAMES;
        [
            (matrix, UniformValue::mat4(self.matrix)),
            (opacity, UniformValue::Float(self.opacity)),
            (lightcolor, UniformValue::Vec3(self.lightcolor)),
            (lightpos, UniformValue::Vec3(self.lightpos)),
            (lightintensity, UniformValue::Float(self.lightintensity)),
            (vertical_gradient, UniformValue::Float(self.vertical_gradient)),
        ]
    }

    pub fn to_ubo(&self) -> FillExtrusionUbo {
        FillExtrusionUbo {
            matrix: self.matrix.to_cols_array_2d(),
            opacity: self.opacity,
            _pad0: [0.0; 3],
            lightcolor: self.lightcolor,
            _pad1: 0.0,
            lightpos: self.lightpos,
            lightintensity: self.lightintensity,
            vertical_gradient: self.vertical_gradient,
            _pad2: [0.0; 3],
        }
    }
}

/// std140 image of [`FillExtrusionLayoutUniforms`], matching
/// `FillExtrusionUniforms` in the WGSL source.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FillExtrusionUbo {
    pub matrix: [[f32; 4]; 4],
    pub opacity: f32,
    _pad0: [f32; 3],
    pub lightcolor: [f32; 3],
    _pad1: f32,
    pub lightpos: [f32; 3],
    pub lightintensity: f32,
    pub vertical_gradient: f32,
    _pad2: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<FillExtrusionUbo>() == 128);
