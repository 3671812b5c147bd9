pub mod fill_extrusion;
pub mod fill_extrusion_pattern;
pub(crate) mod shader;
pub mod uniforms;

pub use fill_extrusion::{FillExtrusionLayoutUniforms, FillExtrusionUbo};
pub use fill_extrusion_pattern::{
    pixel_origin, split_pixel_coord, tile_size_at_nearest_zoom,
    FillExtrusionPatternLayoutUniforms, FillExtrusionPatternUbo,
};
pub use shader::{FILL_EXTRUSION_PATTERN_WGSL, FILL_EXTRUSION_WGSL};
pub use uniforms::{AtlasSize, UniformValue};
