use std::str::FromStr;

use glam::{Mat4, Vec3};
use log::debug;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crossfade::CrossfadeParameters;
use crate::light::{EvaluatedLight, LightAnchor, LightPosition, UnknownAnchor};
use crate::program::{
    AtlasSize, FillExtrusionLayoutUniforms, FillExtrusionPatternLayoutUniforms, UniformValue,
};
use crate::tile::{CanonicalTileId, TileIdError, UnwrappedTileId};
use crate::transform::TransformState;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid draw XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("<{0}> tag is missing")]
    MissingTag(&'static str),
    #[error("<{tag}> is not a number: `{value}`")]
    InvalidNumber { tag: &'static str, value: String },
    #[error("<{tag}> expects {expected} components, found {found}")]
    InvalidVector {
        tag: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unknown program variant `{0}` (expected `plain` or `pattern`)")]
    UnknownVariant(String),
    #[error(transparent)]
    Anchor(#[from] UnknownAnchor),
    #[error(transparent)]
    Tile(#[from] TileIdError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawVariant {
    #[default]
    Plain,
    Pattern,
}

impl FromStr for DrawVariant {
    type Err = DrawError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "pattern" => Ok(Self::Pattern),
            _ => Err(DrawError::UnknownVariant(value.to_string())),
        }
    }
}

/// Inputs only the pattern program needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternInputs {
    pub tile: UnwrappedTileId,
    pub atlas_size: AtlasSize,
    pub crossfade: CrossfadeParameters,
    pub height_factor: f32,
    pub pixel_ratio: f32,
}

/// Already resolved inputs of one extrusion draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub matrix: Mat4,
    pub state: TransformState,
    pub opacity: f32,
    pub vertical_gradient: f32,
    pub light: EvaluatedLight,
    pub pattern: Option<PatternInputs>,
}

impl Draw {
    /// Parses a draw description.
    ///
    /// ```xml
    /// <draw>
    ///   <variant>pattern</variant>
    ///   <zoom>4</zoom>
    ///   <bearing>30</bearing>
    ///   <light><anchor>map</anchor><cartesian>1 0 0</cartesian></light>
    ///   <tile>4 3 2 0</tile>
    ///   <atlas>512 256</atlas>
    /// </draw>
    /// ```
    pub fn from_xml(xml: &str) -> Result<Self, DrawError> {
        let document = Document::parse(xml)?;
        let root = document.root_element();

        let variant = optional_text(&root, "variant")
            .map(|text| text.parse::<DrawVariant>())
            .transpose()?
            .unwrap_or_default();
        let zoom = parse_f64(&root, "zoom")?.ok_or(DrawError::MissingTag("zoom"))?;
        let bearing = parse_f64(&root, "bearing")?.unwrap_or(0.0);
        let state = TransformState::new(zoom, 0.0).with_bearing_degrees(bearing);

        let matrix = match parse_floats::<16>(&root, "matrix")? {
            Some(columns) => Mat4::from_cols_array(&columns),
            None => Mat4::IDENTITY,
        };

        let light = match root.children().find(|child| child.has_tag_name("light")) {
            Some(node) => parse_light(&node)?,
            None => EvaluatedLight::default(),
        };

        let pattern = match variant {
            DrawVariant::Plain => None,
            DrawVariant::Pattern => Some(parse_pattern(&root)?),
        };

        let draw = Self {
            matrix,
            state,
            opacity: parse_f32(&root, "opacity")?.unwrap_or(1.0),
            vertical_gradient: parse_f32(&root, "vertical-gradient")?.unwrap_or(1.0),
            light,
            pattern,
        };
        debug!(
            "parsed {:?} draw at zoom {} (bearing {bearing}°)",
            draw.variant(),
            draw.state.zoom()
        );
        Ok(draw)
    }

    pub fn variant(&self) -> DrawVariant {
        if self.pattern.is_some() {
            DrawVariant::Pattern
        } else {
            DrawVariant::Plain
        }
    }

    pub fn layout_uniforms(&self) -> DrawUniforms {
        match &self.pattern {
            None => DrawUniforms::Plain(FillExtrusionLayoutUniforms::new(
                self.matrix,
                &self.state,
                self.opacity,
                &self.light,
                self.vertical_gradient,
            )),
            Some(pattern) => DrawUniforms::Pattern(FillExtrusionPatternLayoutUniforms::new(
                self.matrix,
                pattern.atlas_size,
                &pattern.crossfade,
                &pattern.tile,
                &self.state,
                self.opacity,
                pattern.height_factor,
                pattern.pixel_ratio,
                &self.light,
                self.vertical_gradient,
            )),
        }
    }
}

/// Layout uniforms of whichever program a draw uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawUniforms {
    Plain(FillExtrusionLayoutUniforms),
    Pattern(FillExtrusionPatternLayoutUniforms),
}

impl DrawUniforms {
    pub fn program_name(&self) -> &'static str {
        match self {
            Self::Plain(_) => "fill_extrusion",
            Self::Pattern(_) => "fill_extrusion_pattern",
        }
    }

    pub fn values(&self) -> Vec<(&'static str, UniformValue)> {
        match self {
            Self::Plain(uniforms) => uniforms.values().to_vec(),
            Self::Pattern(uniforms) => uniforms.values().to_vec(),
        }
    }

    /// Bytes of the std140 uniform block, ready for `queue.write_buffer`.
    pub fn ubo_bytes(&self) -> Vec<u8> {
        match self {
            Self::Plain(uniforms) => bytemuck::bytes_of(&uniforms.to_ubo()).to_vec(),
            Self::Pattern(uniforms) => bytemuck::bytes_of(&uniforms.to_ubo()).to_vec(),
        }
    }

    pub fn report(&self) -> UniformReport {
        UniformReport {
            program: self.program_name(),
            uniforms: self
                .values()
                .into_iter()
                .map(|(name, value)| UniformEntry { name, value })
                .collect(),
        }
    }
}

/// Serializable listing of a uniform set, preserving shader order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformReport {
    pub program: &'static str,
    pub uniforms: Vec<UniformEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformEntry {
    pub name: &'static str,
    pub value: UniformValue,
}

fn parse_light(node: &Node<'_, '_>) -> Result<EvaluatedLight, DrawError> {
    let defaults = EvaluatedLight::default();
    let color = match parse_floats::<3>(node, "color")? {
        Some([r, g, b]) => Vec3::new(r / 255.0, g / 255.0, b / 255.0),
        None => defaults.color,
    };
    let position = match (
        parse_floats::<3>(node, "position")?,
        parse_floats::<3>(node, "cartesian")?,
    ) {
        (_, Some(cartesian)) => LightPosition::from_cartesian(Vec3::from_array(cartesian)),
        (Some([radial, azimuthal, polar]), None) => {
            LightPosition::from_spherical(radial, azimuthal, polar)
        }
        (None, None) => defaults.position,
    };
    let anchor = optional_text(node, "anchor")
        .map(|text| text.parse::<LightAnchor>())
        .transpose()?
        .unwrap_or(defaults.anchor);

    Ok(EvaluatedLight {
        color,
        position,
        intensity: parse_f32(node, "intensity")?.unwrap_or(defaults.intensity),
        anchor,
    })
}

fn parse_pattern(root: &Node<'_, '_>) -> Result<PatternInputs, DrawError> {
    let [z, x, y, wrap] =
        parse_numbers::<i64, 4>(root, "tile")?.ok_or(DrawError::MissingTag("tile"))?;
    let canonical =
        CanonicalTileId::new(narrow("tile", z)?, narrow("tile", x)?, narrow("tile", y)?)?;
    let [width, height] =
        parse_numbers::<u32, 2>(root, "atlas")?.ok_or(DrawError::MissingTag("atlas"))?;
    let crossfade = match parse_floats::<3>(root, "crossfade")? {
        Some([from_scale, to_scale, t]) => CrossfadeParameters::new(from_scale, to_scale, t),
        None => CrossfadeParameters::default(),
    };

    Ok(PatternInputs {
        tile: UnwrappedTileId::new(narrow("tile", wrap)?, canonical),
        atlas_size: AtlasSize::new(width, height),
        crossfade,
        height_factor: parse_f32(root, "height-factor")?.unwrap_or(1.0),
        pixel_ratio: parse_f32(root, "pixel-ratio")?.unwrap_or(1.0),
    })
}

fn optional_text<'a>(node: &Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn parse_f64(node: &Node<'_, '_>, tag: &'static str) -> Result<Option<f64>, DrawError> {
    optional_text(node, tag)
        .map(|text| {
            text.parse::<f64>().map_err(|_| DrawError::InvalidNumber {
                tag,
                value: text.to_string(),
            })
        })
        .transpose()
}

fn parse_f32(node: &Node<'_, '_>, tag: &'static str) -> Result<Option<f32>, DrawError> {
    Ok(parse_f64(node, tag)?.map(|value| value as f32))
}

fn parse_floats<const N: usize>(
    node: &Node<'_, '_>,
    tag: &'static str,
) -> Result<Option<[f32; N]>, DrawError> {
    parse_numbers::<f32, N>(node, tag)
}

fn parse_numbers<T: FromStr, const N: usize>(
    node: &Node<'_, '_>,
    tag: &'static str,
) -> Result<Option<[T; N]>, DrawError> {
    let Some(text) = optional_text(node, tag) else {
        return Ok(None);
    };
    let numbers = text
        .split_whitespace()
        .map(|component| {
            component
                .parse::<T>()
                .map_err(|_| DrawError::InvalidNumber {
                    tag,
                    value: component.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let found = numbers.len();
    numbers
        .try_into()
        .map(Some)
        .map_err(|_| DrawError::InvalidVector {
            tag,
            expected: N,
            found,
        })
}

fn narrow<T: TryFrom<i64>>(tag: &'static str, value: i64) -> Result<T, DrawError> {
    T::try_from(value).map_err(|_| DrawError::InvalidNumber {
        tag,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"
    <draw>
        <opacity>0.8</opacity>
        <vertical-gradient>1</vertical-gradient>
        <zoom>15.5</zoom>
        <bearing>45</bearing>
        <light>
            <color>255 255 255</color>
            <intensity>0.5</intensity>
            <anchor>map</anchor>
            <cartesian>1 0 0</cartesian>
        </light>
    </draw>
    "#;

    const PATTERN: &str = r#"
    <draw>
        <variant>pattern</variant>
        <zoom>4</zoom>
        <tile>4 3 2 0</tile>
        <atlas>512 256</atlas>
        <crossfade>2 1 0.5</crossfade>
        <pixel-ratio>2</pixel-ratio>
        <height-factor>0.25</height-factor>
    </draw>
    "#;

    #[test]
    fn parses_plain_draw() {
        let draw = Draw::from_xml(PLAIN).unwrap();
        assert_eq!(draw.variant(), DrawVariant::Plain);
        assert_eq!(draw.state.integer_zoom(), 15);
        assert_eq!(draw.light.anchor, LightAnchor::Map);
        assert_eq!(draw.matrix, Mat4::IDENTITY);

        let DrawUniforms::Plain(uniforms) = draw.layout_uniforms() else {
            panic!("expected plain uniforms");
        };
        assert_eq!(uniforms.lightcolor, [1.0, 1.0, 1.0]);
        assert_eq!(uniforms.lightpos, [1.0, 0.0, 0.0]);
        assert_eq!(uniforms.lightintensity, 0.5);
        assert_eq!(uniforms.opacity, 0.8);
        assert_eq!(uniforms.vertical_gradient, 1.0);
    }

    #[test]
    fn parses_pattern_draw() {
        let draw = Draw::from_xml(PATTERN).unwrap();
        let pattern = draw.pattern.unwrap();
        assert_eq!(pattern.tile.canonical, CanonicalTileId::new(4, 3, 2).unwrap());
        assert_eq!(pattern.atlas_size, AtlasSize::new(512, 256));
        assert_eq!(pattern.crossfade, CrossfadeParameters::new(2.0, 1.0, 0.5));

        let uniforms = draw.layout_uniforms();
        assert_eq!(uniforms.program_name(), "fill_extrusion_pattern");
        assert_eq!(uniforms.ubo_bytes().len(), 192);
        let values = uniforms.values();
        assert_eq!(values[2], ("scale", UniformValue::Vec4([2.0, 0.0625, 2.0, 1.0])));
        assert_eq!(values[5], ("pixel_coord_upper", UniformValue::Vec2([0.0, 0.0])));
        assert_eq!(
            values[6],
            ("pixel_coord_lower", UniformValue::Vec2([1536.0, 1024.0]))
        );
    }

    #[test]
    fn light_defaults_apply_without_light_tag() {
        let draw = Draw::from_xml("<draw><zoom>3</zoom></draw>").unwrap();
        assert_eq!(draw.light, EvaluatedLight::default());
        assert_eq!(draw.opacity, 1.0);
    }

    #[test]
    fn missing_zoom_is_an_error() {
        let err = Draw::from_xml("<draw><opacity>1</opacity></draw>").unwrap_err();
        assert!(matches!(err, DrawError::MissingTag("zoom")));
    }

    #[test]
    fn pattern_requires_a_tile() {
        let xml = "<draw><variant>pattern</variant><zoom>3</zoom><atlas>1 1</atlas></draw>";
        assert!(matches!(
            Draw::from_xml(xml),
            Err(DrawError::MissingTag("tile"))
        ));
    }

    #[test]
    fn rejects_out_of_range_tiles() {
        let xml = "<draw><variant>pattern</variant><zoom>3</zoom>\
                   <tile>2 4 0 0</tile><atlas>1 1</atlas></draw>";
        assert!(matches!(Draw::from_xml(xml), Err(DrawError::Tile(_))));
    }

    #[test]
    fn rejects_fractional_and_negative_tile_components() {
        for tile in ["4 -1.9 2.7 0.5", "4 3.0 2 0", "4 -1 2 0", "4 3 2 40000", "-4 3 2 0"] {
            let xml = format!(
                "<draw><variant>pattern</variant><zoom>4</zoom>\
                 <tile>{tile}</tile><atlas>8 8</atlas></draw>"
            );
            let err = Draw::from_xml(&xml).unwrap_err();
            assert!(
                matches!(err, DrawError::InvalidNumber { tag: "tile", .. }),
                "{tile}: {err}"
            );
        }
    }

    #[test]
    fn rejects_negative_atlas_size() {
        let xml = "<draw><variant>pattern</variant><zoom>4</zoom>\
                   <tile>4 3 2 -1</tile><atlas>-8 1</atlas></draw>";
        let err = Draw::from_xml(xml).unwrap_err();
        assert_eq!(err.to_string(), "<atlas> is not a number: `-8`");
    }

    #[test]
    fn negative_wrap_is_accepted() {
        let xml = "<draw><variant>pattern</variant><zoom>4</zoom>\
                   <tile>4 3 2 -1</tile><atlas>8 8</atlas></draw>";
        let pattern = Draw::from_xml(xml).unwrap().pattern.unwrap();
        assert_eq!(pattern.tile.wrap, -1);
    }

    #[test]
    fn reports_bad_numbers_and_vectors() {
        let err = Draw::from_xml("<draw><zoom>high</zoom></draw>").unwrap_err();
        assert_eq!(err.to_string(), "<zoom> is not a number: `high`");

        let err = Draw::from_xml("<draw><zoom>1</zoom><matrix>1 0 0</matrix></draw>").unwrap_err();
        assert!(matches!(
            err,
            DrawError::InvalidVector {
                tag: "matrix",
                expected: 16,
                found: 3
            }
        ));
    }

    #[test]
    fn rejects_unknown_anchor_and_variant() {
        let xml = "<draw><zoom>1</zoom><light><anchor>sky</anchor></light></draw>";
        assert!(matches!(Draw::from_xml(xml), Err(DrawError::Anchor(_))));
        let xml = "<draw><variant>hatched</variant><zoom>1</zoom></draw>";
        assert!(matches!(
            Draw::from_xml(xml),
            Err(DrawError::UnknownVariant(_))
        ));
    }

    #[test]
    fn report_serializes_in_shader_order() {
        let report = Draw::from_xml(PLAIN).unwrap().layout_uniforms().report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["program"], "fill_extrusion");
        assert_eq!(json["uniforms"][0]["name"], "matrix");
        assert_eq!(json["uniforms"][5]["name"], "vertical_gradient");
        assert_eq!(json["uniforms"][4]["value"], 0.5);
    }
}
