use crate::context::RenderContext;
use crate::gl;
use crate::ToGlEnum;

/// Function that the GPU will use for blending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendingFunction {
    /// Simply overwrite the destination pixel with the source pixel.
    ///
    /// The alpha channels are simply ignored. This is the default mode, and it is implemented
    /// by disabling `GL_BLEND` entirely.
    AlwaysReplace,

    /// For each individual component (red, green, blue, and alpha), a weighted addition
    /// between the source and the destination.
    ///
    /// The result is equal to `source_component * source_factor + dest_component * dest_factor`.
    Addition {
        /// The factor to apply to the source pixel.
        source: LinearBlendingFactor,

        /// The factor to apply to the destination pixel.
        destination: LinearBlendingFactor,
    },
}

impl BlendingFunction {
    /// Blending used for translucent materials: `(GL_SRC_ALPHA, GL_ONE_MINUS_SRC_ALPHA)` with
    /// `GL_FUNC_ADD`.
    ///
    /// If the source's alpha is 0, the destination's color will stay the same. If the source's
    /// alpha is 1, the destination's color will be replaced by the source's.
    #[inline]
    pub fn alpha_blending() -> BlendingFunction {
        BlendingFunction::Addition {
            source: LinearBlendingFactor::SourceAlpha,
            destination: LinearBlendingFactor::OneMinusSourceAlpha,
        }
    }
}

impl Default for BlendingFunction {
    #[inline]
    fn default() -> BlendingFunction {
        BlendingFunction::AlwaysReplace
    }
}

/// Indicates which value to multiply each component with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinearBlendingFactor {
    /// Multiply the component by zero.
    Zero,

    /// Multiply the component by one.
    One,

    /// Multiply the component by the alpha value of the source.
    SourceAlpha,

    /// Multiply the component by `1.0` minus the alpha value of the source.
    OneMinusSourceAlpha,
}

impl ToGlEnum for LinearBlendingFactor {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            LinearBlendingFactor::Zero => gl::ZERO,
            LinearBlendingFactor::One => gl::ONE,
            LinearBlendingFactor::SourceAlpha => gl::SRC_ALPHA,
            LinearBlendingFactor::OneMinusSourceAlpha => gl::ONE_MINUS_SRC_ALPHA,
        }
    }
}

/// Equation combining the weighted source and destination. Corresponds to `glBlendEquation`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendEquation {
    /// `GL_FUNC_ADD`
    Addition,
}

impl ToGlEnum for BlendEquation {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            BlendEquation::Addition => gl::FUNC_ADD,
        }
    }
}

/// Brings the blend state of the context in line with `blending_function`.
pub fn sync_blending(ctxt: &mut RenderContext, blending_function: BlendingFunction) {
    let (source, destination) = match blending_function {
        BlendingFunction::AlwaysReplace => {
            ctxt.set_blend_enabled(false);
            return;
        },
        BlendingFunction::Addition { source, destination } => (source, destination),
    };

    ctxt.set_blend_enabled(true);
    ctxt.blend_equation(BlendEquation::Addition);
    ctxt.blend_func(source, destination);
}
