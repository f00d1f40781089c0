/*!

The low-level graphics interface that the rest of the crate drives.

Everything pigment does to the GPU goes through the `Backend` trait: creating and filling
textures, compiling and linking programs, uploading uniforms, and toggling blend and depth-mask
state. The `gles` module contains the implementation that talks to a real OpenGL ES 2.0
context. Any other implementation (a recording backend for tests, a WebGL bridge, ...) only has
to honor the same contract.

Implementations are not expected to cache state. Redundant calls are filtered by the
`RenderContext` before they reach the backend.

*/
use crate::draw_parameters::{BlendEquation, LinearBlendingFactor};
use crate::program::{ProgramCreationError, ShaderStage};
use crate::texture::TextureParameter;
use crate::uniforms::RawUniformValue;

pub mod gles;

/// Name of a texture object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Name of a linked program object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(pub u32);

/// Name of a compiled, not yet linked, shader object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub u32);

/// Location of an active uniform inside a linked program.
///
/// Locations are only meaningful for the program they were queried from, and only until that
/// program is linked again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniformLocation(pub i32);

/// Trait for types that can be used as the graphics backend of a `RenderContext`.
///
/// All methods operate on the implicit "current" objects of the underlying API, exactly like
/// the OpenGL calls they mirror: `tex_image_2d`, `tex_parameter` and `generate_mipmap` affect
/// the texture bound on the active unit, `uniform` affects the program in use.
pub trait Backend {
    /// Allocates a new texture object. Corresponds to `glGenTextures`.
    fn create_texture(&mut self) -> TextureId;

    /// Destroys a texture object. Corresponds to `glDeleteTextures`.
    fn delete_texture(&mut self, texture: TextureId);

    /// Selects the texture unit that subsequent binds affect. Corresponds to `glActiveTexture`.
    fn active_texture(&mut self, unit: u32);

    /// Binds a texture to `GL_TEXTURE_2D`, or unbinds with `None`.
    fn bind_texture(&mut self, texture: Option<TextureId>);

    /// Uploads RGBA, 8 bits per channel pixels into mip level 0 of the bound texture.
    ///
    /// Rows are given bottom first, as `glTexImage2D` reads them. `pixels` is guaranteed by the caller to hold exactly `width * height * 4` bytes.
    fn tex_image_2d(&mut self, width: u32, height: u32, pixels: &[u8]);

    /// Sets a sampling parameter of the bound texture. Corresponds to `glTexParameteri`.
    fn tex_parameter(&mut self, parameter: TextureParameter);

    /// Generates the mipmap chain of the bound texture.
    fn generate_mipmap(&mut self);

    /// Compiles a single shader stage.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str)
                      -> Result<ShaderId, ProgramCreationError>;

    /// Links a vertex and a fragment shader together.
    ///
    /// The shaders stay valid after this call and must be deleted by the caller.
    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId)
                    -> Result<ProgramId, ProgramCreationError>;

    /// Destroys a shader object.
    fn delete_shader(&mut self, shader: ShaderId);

    /// Destroys a program object.
    fn delete_program(&mut self, program: ProgramId);

    /// Makes a program current, or none with `None`. Corresponds to `glUseProgram`.
    fn use_program(&mut self, program: Option<ProgramId>);

    /// Returns the location of an active uniform, or `None` if the program has no active
    /// uniform with this name.
    fn get_uniform_location(&mut self, program: ProgramId, name: &str)
                            -> Option<UniformLocation>;

    /// Uploads a value to a uniform of the program in use.
    fn uniform(&mut self, location: UniformLocation, value: &RawUniformValue);

    /// Enables or disables `GL_BLEND`.
    fn set_blend_enabled(&mut self, enabled: bool);

    /// Corresponds to `glBlendFunc`.
    fn blend_func(&mut self, source: LinearBlendingFactor, destination: LinearBlendingFactor);

    /// Corresponds to `glBlendEquation`.
    fn blend_equation(&mut self, equation: BlendEquation);

    /// Enables or disables writes to the depth buffer. Corresponds to `glDepthMask`.
    fn depth_mask(&mut self, write: bool);
}
