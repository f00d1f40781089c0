use crate::color::Color;
use crate::texture::MediaSource;

/// Type of a uniform, as decided by the first value set on it.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UniformType {
    Float,
    FloatVec2,
    FloatVec3,
    FloatVec4,
    FloatMat3,
    FloatMat4,
    Sampler2d,
}

impl UniformType {
    /// Returns the vector type with `len` components, if there is one.
    ///
    /// A single component is a plain `Float`.
    #[inline]
    pub fn float_vec(len: usize) -> Option<UniformType> {
        match len {
            1 => Some(UniformType::Float),
            2 => Some(UniformType::FloatVec2),
            3 => Some(UniformType::FloatVec3),
            4 => Some(UniformType::FloatVec4),
            _ => None,
        }
    }

    /// Returns the number of floats a value of this type is made of, or `None` for samplers.
    #[inline]
    pub fn num_components(&self) -> Option<usize> {
        match *self {
            UniformType::Float => Some(1),
            UniformType::FloatVec2 => Some(2),
            UniformType::FloatVec3 => Some(3),
            UniformType::FloatVec4 => Some(4),
            UniformType::FloatMat3 => Some(9),
            UniformType::FloatMat4 => Some(16),
            UniformType::Sampler2d => None,
        }
    }
}

/// Value that can be used as the value of a uniform.
///
/// This is the typed way of setting uniforms: the upload type is decided by the Rust type at the
/// call site. See `DynamicUniform` for the inferred way.
pub trait AsUniformValue {
    /// Builds a `UniformValue`.
    fn as_uniform_value(&self) -> UniformValue;
}

/// Represents a value to bind to a uniform.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// 3x3 column-major matrix.
    Mat3([[f32; 3]; 3]),
    /// 4x4 column-major matrix.
    Mat4([[f32; 4]; 4]),
    /// A texture sampled through texture unit 0.
    Texture(MediaSource),
}

impl UniformValue {
    /// Returns the type of the uniform this value is uploaded to.
    #[inline]
    pub fn get_type(&self) -> UniformType {
        match *self {
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::FloatVec2,
            UniformValue::Vec3(_) => UniformType::FloatVec3,
            UniformValue::Vec4(_) => UniformType::FloatVec4,
            UniformValue::Mat3(_) => UniformType::FloatMat3,
            UniformValue::Mat4(_) => UniformType::FloatMat4,
            UniformValue::Texture(_) => UniformType::Sampler2d,
        }
    }

    /// Returns the raw value to upload, or `None` for textures, which need to be bound first.
    #[inline]
    pub(crate) fn to_raw(&self) -> Option<RawUniformValue> {
        match *self {
            UniformValue::Float(v) => Some(RawUniformValue::Float(v)),
            UniformValue::Vec2(v) => Some(RawUniformValue::Vec2(v)),
            UniformValue::Vec3(v) => Some(RawUniformValue::Vec3(v)),
            UniformValue::Vec4(v) => Some(RawUniformValue::Vec4(v)),
            UniformValue::Mat3(v) => Some(RawUniformValue::Mat3(v)),
            UniformValue::Mat4(v) => Some(RawUniformValue::Mat4(v)),
            UniformValue::Texture(_) => None,
        }
    }
}

/// The value that is actually sent with a `glUniform*` call.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RawUniformValue {
    /// Used for sampler uniforms, which receive the index of a texture unit.
    SignedInt(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
}

impl AsUniformValue for UniformValue {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        self.clone()
    }
}

impl AsUniformValue for f32 {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Float(*self)
    }
}

impl AsUniformValue for [f32; 2] {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Vec2(*self)
    }
}

impl AsUniformValue for [f32; 3] {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Vec3(*self)
    }
}

impl AsUniformValue for [f32; 4] {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Vec4(*self)
    }
}

impl AsUniformValue for (f32, f32) {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Vec2([self.0, self.1])
    }
}

impl AsUniformValue for (f32, f32, f32) {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Vec3([self.0, self.1, self.2])
    }
}

impl AsUniformValue for (f32, f32, f32, f32) {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Vec4([self.0, self.1, self.2, self.3])
    }
}

impl AsUniformValue for [[f32; 3]; 3] {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Mat3(*self)
    }
}

impl AsUniformValue for [[f32; 4]; 4] {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Mat4(*self)
    }
}

impl AsUniformValue for Color {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Vec4(self.to_array())
    }
}

impl AsUniformValue for MediaSource {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        UniformValue::Texture(self.clone())
    }
}

impl<'a, T: ?Sized> AsUniformValue for &'a T where T: AsUniformValue {
    #[inline]
    fn as_uniform_value(&self) -> UniformValue {
        (**self).as_uniform_value()
    }
}

#[cfg(feature = "cgmath")]
mod cgmath_impls {
    use super::{AsUniformValue, UniformValue};

    impl AsUniformValue for cgmath::Vector2<f32> {
        #[inline]
        fn as_uniform_value(&self) -> UniformValue {
            UniformValue::Vec2((*self).into())
        }
    }

    impl AsUniformValue for cgmath::Vector3<f32> {
        #[inline]
        fn as_uniform_value(&self) -> UniformValue {
            UniformValue::Vec3((*self).into())
        }
    }

    impl AsUniformValue for cgmath::Vector4<f32> {
        #[inline]
        fn as_uniform_value(&self) -> UniformValue {
            UniformValue::Vec4((*self).into())
        }
    }

    impl AsUniformValue for cgmath::Point3<f32> {
        #[inline]
        fn as_uniform_value(&self) -> UniformValue {
            UniformValue::Vec3((*self).into())
        }
    }

    impl AsUniformValue for cgmath::Matrix3<f32> {
        #[inline]
        fn as_uniform_value(&self) -> UniformValue {
            UniformValue::Mat3((*self).into())
        }
    }

    impl AsUniformValue for cgmath::Matrix4<f32> {
        #[inline]
        fn as_uniform_value(&self) -> UniformValue {
            UniformValue::Mat4((*self).into())
        }
    }
}
