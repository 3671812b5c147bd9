use std::fmt;

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// A single uniform value as the shader sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    pub fn mat4(matrix: Mat4) -> Self {
        Self::Mat4(matrix.to_cols_array_2d())
    }

    /// Number of scalar components.
    pub fn components(&self) -> usize {
        match self {
            Self::Float(_) => 1,
            Self::Vec2(_) => 2,
            Self::Vec3(_) => 3,
            Self::Vec4(_) => 4,
            Self::Mat4(_) => 16,
        }
    }
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, values: &[f32]) -> fmt::Result {
            f.write_str("(")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value:.4}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::Float(value) => write!(f, "{value:.4}"),
            Self::Vec2(values) => list(f, values),
            Self::Vec3(values) => list(f, values),
            Self::Vec4(values) => list(f, values),
            Self::Mat4(columns) => {
                f.write_str("[")?;
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    list(f, column)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Size of the pattern image atlas in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AtlasSize {
    pub width: u32,
    pub height: u32,
}

impl AtlasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_array(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_vectors_and_scalars() {
        assert_eq!(UniformValue::Float(0.5).to_string(), "0.5000");
        assert_eq!(
            UniformValue::Vec3([1.0, 0.0, 0.25]).to_string(),
            "(1.0000, 0.0000, 0.2500)"
        );
    }

    #[test]
    fn matrix_is_column_major() {
        let value = UniformValue::mat4(Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0)));
        let UniformValue::Mat4(columns) = value else {
            panic!("expected a matrix");
        };
        assert_eq!(columns[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(value.components(), 16);
    }

    #[test]
    fn atlas_size_widens_to_floats() {
        assert_eq!(AtlasSize::new(512, 256).to_array(), [512.0, 256.0]);
    }
}
