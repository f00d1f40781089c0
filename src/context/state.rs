use crate::backend::{ProgramId, TextureId};
use crate::draw_parameters::{BlendEquation, LinearBlendingFactor};

use smallvec::SmallVec;

/// Represents the current OpenGL state, as far as pigment knows it.
///
/// The render context consults this cache before every state change and only forwards the
/// calls that would actually change something.
#[derive(Clone, Debug, PartialEq)]
pub struct GlState {
    /// The latest value passed to `glUseProgram`.
    pub program: Option<ProgramId>,

    /// The latest value passed to `glActiveTexture`, minus `GL_TEXTURE0`.
    pub active_texture: u32,

    /// The texture bound to `GL_TEXTURE_2D` on each unit touched so far.
    pub texture_units: SmallVec<[TextureUnitState; 4]>,

    /// Whether `GL_BLEND` is enabled.
    pub enabled_blend: bool,

    /// The latest values passed to `glBlendFunc`.
    pub blend_func: (LinearBlendingFactor, LinearBlendingFactor),

    /// The latest value passed to `glBlendEquation`.
    pub blend_equation: BlendEquation,

    /// The latest value passed to `glDepthMask`.
    pub depth_mask: bool,
}

/// State of a texture unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureUnitState {
    /// The texture bound to `GL_TEXTURE_2D`.
    pub texture: Option<TextureId>,
}

impl GlState {
    /// Returns the texture bound on the active unit.
    #[inline]
    pub fn bound_texture(&self) -> Option<TextureId> {
        self.texture_units.get(self.active_texture as usize).and_then(|unit| unit.texture)
    }
}

impl Default for GlState {
    fn default() -> GlState {
        GlState {
            program: None,
            active_texture: 0,
            texture_units: SmallVec::new(),
            enabled_blend: false,
            blend_func: (LinearBlendingFactor::One, LinearBlendingFactor::Zero),
            blend_equation: BlendEquation::Addition,
            depth_mask: true,
        }
    }
}
