//! Uniform values for the extruded fill ("3D building") programs of a map
//! tile renderer.
//!
//! The crate turns an evaluated light, the camera state and a tile's place in
//! the tile pyramid into the exact uniform blocks the plain and pattern
//! extrusion shaders expect. Program compilation, tessellation and atlas
//! packing live elsewhere; everything here is a pure function of its inputs.

pub mod crossfade;
pub mod draw;
pub mod light;
pub mod program;
pub mod tile;
pub mod transform;
pub mod vertex;

pub use crossfade::CrossfadeParameters;
pub use draw::{Draw, DrawError, DrawUniforms, DrawVariant, PatternInputs};
pub use light::{
    light_color, light_intensity, light_position, EvaluatedLight, LightAnchor, LightPosition,
};
pub use program::{
    AtlasSize, FillExtrusionLayoutUniforms, FillExtrusionPatternLayoutUniforms, UniformValue,
};
pub use tile::{CanonicalTileId, TileIdError, UnwrappedTileId};
pub use transform::TransformState;
pub use vertex::{layout_vertex, FillExtrusionLayoutVertex};
