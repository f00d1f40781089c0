use crate::color::Color;
use crate::texture::MediaSource;
use crate::uniforms::{UniformType, UniformValue};

use thiserror::Error;

/// A loosely-typed uniform value, as handed over by a scripting or sketching front-end.
///
/// The upload type of such a value is inferred from its shape by `DynamicUniform::infer`:
///
/// - a number is a `Float`,
/// - a sequence of one to four numbers is a vector of that length,
/// - a three-component math vector is a `FloatVec3`,
/// - a color is a `FloatVec4`,
/// - a matrix is a `FloatMat3` or a `FloatMat4` depending on its dimension,
/// - an image, video or offscreen surface is a `Sampler2d`.
///
/// Prefer `AsUniformValue` when the type is known at compile time.
#[derive(Clone, Debug, PartialEq)]
pub enum DynamicUniform {
    /// A single number.
    Number(f64),
    /// A list of numbers.
    Sequence(Vec<f64>),
    /// A three-component math vector.
    Vector3([f32; 3]),
    /// A normalized color.
    Color(Color),
    /// A matrix that knows its own dimension.
    Matrix(Matrix),
    /// An image, video or offscreen surface.
    Media(MediaSource),
}

/// Column-major matrix handed over through the dynamic path.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Matrix {
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
}

/// Error that can happen when converting a `DynamicUniform` into a `UniformValue`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UniformError {
    /// The value doesn't match any of the recognized shapes.
    #[error("didn't recognize the type of this uniform ({0})")]
    Unrecognized(String),

    /// A type hint was given that the value can't be uploaded as.
    #[error("a {shape} can't be uploaded as {hint:?}")]
    HintMismatch {
        /// The shape of the value.
        shape: &'static str,
        /// The requested type.
        hint: UniformType,
    },
}

impl DynamicUniform {
    /// Infers the upload type of this value.
    ///
    /// A `hint` forces the type when the shape can fill it: a number can only be a `Float`, a
    /// sequence can be any float type with the same number of components (nine for a
    /// `FloatMat3`, sixteen for a `FloatMat4`). For other shapes the hint must agree with the
    /// inferred type.
    pub fn infer(self, hint: Option<UniformType>) -> Result<UniformValue, UniformError> {
        let shape = self.shape();

        let value = match (self, hint) {
            (DynamicUniform::Number(v), None) |
            (DynamicUniform::Number(v), Some(UniformType::Float)) => UniformValue::Float(v as f32),

            (DynamicUniform::Sequence(seq), None) => {
                match UniformType::float_vec(seq.len()) {
                    Some(ty) => from_components(&seq, ty),
                    None => {
                        return Err(UniformError::Unrecognized(
                            format!("sequence of {} numbers", seq.len())));
                    },
                }
            },

            (DynamicUniform::Sequence(seq), Some(hint)) => {
                if hint.num_components() != Some(seq.len()) {
                    return Err(UniformError::HintMismatch { shape, hint });
                }
                from_components(&seq, hint)
            },

            (DynamicUniform::Vector3(v), _) => UniformValue::Vec3(v),
            (DynamicUniform::Color(c), _) => UniformValue::Vec4(c.to_array()),
            (DynamicUniform::Matrix(Matrix::Mat3(m)), _) => UniformValue::Mat3(m),
            (DynamicUniform::Matrix(Matrix::Mat4(m)), _) => UniformValue::Mat4(m),
            (DynamicUniform::Media(media), _) => UniformValue::Texture(media),

            (DynamicUniform::Number(_), Some(hint)) => {
                return Err(UniformError::HintMismatch { shape, hint });
            },
        };

        match hint {
            Some(hint) if hint != value.get_type() => Err(UniformError::HintMismatch { shape, hint }),
            _ => Ok(value),
        }
    }

    fn shape(&self) -> &'static str {
        match *self {
            DynamicUniform::Number(_) => "number",
            DynamicUniform::Sequence(_) => "sequence",
            DynamicUniform::Vector3(_) => "vector",
            DynamicUniform::Color(_) => "color",
            DynamicUniform::Matrix(_) => "matrix",
            DynamicUniform::Media(_) => "media source",
        }
    }
}

/// Builds a float value of type `ty` out of exactly `ty.num_components()` numbers.
fn from_components(seq: &[f64], ty: UniformType) -> UniformValue {
    let c = |i: usize| seq[i] as f32;

    match ty {
        UniformType::Float => UniformValue::Float(c(0)),
        UniformType::FloatVec2 => UniformValue::Vec2([c(0), c(1)]),
        UniformType::FloatVec3 => UniformValue::Vec3([c(0), c(1), c(2)]),
        UniformType::FloatVec4 => UniformValue::Vec4([c(0), c(1), c(2), c(3)]),
        UniformType::FloatMat3 => {
            let mut m = [[0.0; 3]; 3];
            for (i, column) in m.iter_mut().enumerate() {
                for (j, cell) in column.iter_mut().enumerate() {
                    *cell = c(i * 3 + j);
                }
            }
            UniformValue::Mat3(m)
        },
        UniformType::FloatMat4 => {
            let mut m = [[0.0; 4]; 4];
            for (i, column) in m.iter_mut().enumerate() {
                for (j, cell) in column.iter_mut().enumerate() {
                    *cell = c(i * 4 + j);
                }
            }
            UniformValue::Mat4(m)
        },
        UniformType::Sampler2d => unreachable!("samplers have no components"),
    }
}

impl From<f64> for DynamicUniform {
    #[inline]
    fn from(v: f64) -> DynamicUniform {
        DynamicUniform::Number(v)
    }
}

impl From<f32> for DynamicUniform {
    #[inline]
    fn from(v: f32) -> DynamicUniform {
        DynamicUniform::Number(v as f64)
    }
}

impl From<i32> for DynamicUniform {
    #[inline]
    fn from(v: i32) -> DynamicUniform {
        DynamicUniform::Number(v as f64)
    }
}

impl From<Vec<f64>> for DynamicUniform {
    #[inline]
    fn from(v: Vec<f64>) -> DynamicUniform {
        DynamicUniform::Sequence(v)
    }
}

impl<'a> From<&'a [f64]> for DynamicUniform {
    #[inline]
    fn from(v: &'a [f64]) -> DynamicUniform {
        DynamicUniform::Sequence(v.to_vec())
    }
}

impl<'a> From<&'a [f32]> for DynamicUniform {
    #[inline]
    fn from(v: &'a [f32]) -> DynamicUniform {
        DynamicUniform::Sequence(v.iter().map(|&x| x as f64).collect())
    }
}

impl<const N: usize> From<[f64; N]> for DynamicUniform {
    #[inline]
    fn from(v: [f64; N]) -> DynamicUniform {
        DynamicUniform::Sequence(v.to_vec())
    }
}

impl From<Color> for DynamicUniform {
    #[inline]
    fn from(c: Color) -> DynamicUniform {
        DynamicUniform::Color(c)
    }
}

impl From<Matrix> for DynamicUniform {
    #[inline]
    fn from(m: Matrix) -> DynamicUniform {
        DynamicUniform::Matrix(m)
    }
}

impl From<MediaSource> for DynamicUniform {
    #[inline]
    fn from(media: MediaSource) -> DynamicUniform {
        DynamicUniform::Media(media)
    }
}

#[cfg(feature = "cgmath")]
impl From<cgmath::Vector3<f32>> for DynamicUniform {
    #[inline]
    fn from(v: cgmath::Vector3<f32>) -> DynamicUniform {
        DynamicUniform::Vector3(v.into())
    }
}

#[cfg(feature = "cgmath")]
impl From<cgmath::Matrix3<f32>> for DynamicUniform {
    #[inline]
    fn from(m: cgmath::Matrix3<f32>) -> DynamicUniform {
        DynamicUniform::Matrix(Matrix::Mat3(m.into()))
    }
}

#[cfg(feature = "cgmath")]
impl From<cgmath::Matrix4<f32>> for DynamicUniform {
    #[inline]
    fn from(m: cgmath::Matrix4<f32>) -> DynamicUniform {
        DynamicUniform::Matrix(Matrix::Mat4(m.into()))
    }
}
