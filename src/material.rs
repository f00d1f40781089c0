/*!
The material operations.

A `Renderer` owns a `RenderContext` and a `ProgramCache`. Each material call picks the program
the material needs, makes it current and uploads the uniforms it uses. There is no persistent
material object: the next call replaces whatever the previous one set.

```no_run
# fn example(backend: pigment::backend::gles::GlesBackend,
#            image: pigment::texture::MediaSource) -> Result<(), pigment::material::MaterialError> {
use pigment::material::Renderer;

let mut renderer = Renderer::new(backend);

renderer.ambient_material(250)?;              // opaque gray
renderer.specular_material((255, 0, 0, 128))?; // translucent red, blended
renderer.texture(&image)?;
renderer.normal_material()?;
# Ok(())
# }
```

Color materials also drive the blend state. A color whose alpha is below `1.0` enables
`SRC_ALPHA, ONE_MINUS_SRC_ALPHA` blending and disables depth writes. An opaque color disables
blending and enables depth writes.

*/
use std::rc::Rc;

use thiserror::Error;

use crate::backend::Backend;
use crate::color::{Color, ColorArgs, ColorError, ColorModel, RgbColorModel};
use crate::context::{ContextOptions, RenderContext};
use crate::draw_parameters::{sync_blending, sync_depth_mask, BlendingFunction};
use crate::program::{Program, ProgramCache, ProgramCreationError, ShaderInput};
use crate::shaders::{Defines, ShaderKey, ShaderSource};
use crate::texture::{self, MediaSource};

/// Name of the color uniform of the color materials.
pub const MATERIAL_COLOR: &str = "uMaterialColor";

/// Name of the sampler uniform of the texture material.
pub const SAMPLER: &str = "uSampler";

/// Define that turns on the specular term of the light vertex shader.
pub const IS_SPECULAR: &str = "IS_SPECULAR";

/// Define that makes the light fragment shader sample a texture.
pub const IS_TEXTURE: &str = "IS_TEXTURE";

/// Error that can happen during a material call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MaterialError {
    /// The program of the material couldn't be built.
    #[error(transparent)]
    Program(#[from] ProgramCreationError),

    /// The color arguments couldn't be normalized.
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Applies materials and user shaders to a render context.
pub struct Renderer<C = RgbColorModel> {
    context: RenderContext,
    programs: ProgramCache,
    color_model: C,
    active: Option<Rc<Program>>,
}

impl Renderer<RgbColorModel> {
    /// Builds a renderer around a backend, with the default options and color model.
    #[inline]
    pub fn new<B>(backend: B) -> Renderer where B: Backend + 'static {
        Renderer::with_options(backend, ContextOptions::default())
    }

    /// Builds a renderer with custom context options.
    #[inline]
    pub fn with_options<B>(backend: B, options: ContextOptions) -> Renderer
        where B: Backend + 'static
    {
        Renderer::from_parts(RenderContext::with_options(backend, options), ProgramCache::new(),
                             RgbColorModel::default())
    }
}

impl<C> Renderer<C> where C: ColorModel {
    /// Builds a renderer out of its parts.
    #[inline]
    pub fn from_parts(context: RenderContext, programs: ProgramCache, color_model: C)
                      -> Renderer<C>
    {
        Renderer {
            context,
            programs,
            color_model,
            active: None,
        }
    }

    /// Returns the render context.
    #[inline]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Returns the render context.
    #[inline]
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    /// Returns the program cache.
    #[inline]
    pub fn programs(&self) -> &ProgramCache {
        &self.programs
    }

    /// Returns the program cache, for example to override library sources.
    #[inline]
    pub fn programs_mut(&mut self) -> &mut ProgramCache {
        &mut self.programs
    }

    /// Returns the color model.
    #[inline]
    pub fn color_model(&self) -> &C {
        &self.color_model
    }

    /// Returns the program made current by the last successful material or `shader` call.
    #[inline]
    pub fn active_program(&self) -> Option<&Rc<Program>> {
        self.active.as_ref()
    }

    /// Colors surfaces with their normals.
    pub fn normal_material(&mut self) -> Result<&mut Self, MaterialError> {
        self.select(ShaderKey::NormalVert.into(), ShaderKey::NormalFrag.into())?;
        Ok(self)
    }

    /// Flat material color.
    ///
    /// Draws with the same program as `ambient_material`.
    #[inline]
    pub fn basic_material<A>(&mut self, color: A) -> Result<&mut Self, MaterialError>
        where A: ColorArgs
    {
        self.color_material(color, false)
    }

    /// Material color lit by ambient, directional and point lights.
    #[inline]
    pub fn ambient_material<A>(&mut self, color: A) -> Result<&mut Self, MaterialError>
        where A: ColorArgs
    {
        self.color_material(color, false)
    }

    /// Like `ambient_material`, with a specular highlight from point lights.
    #[inline]
    pub fn specular_material<A>(&mut self, color: A) -> Result<&mut Self, MaterialError>
        where A: ColorArgs
    {
        self.color_material(color, true)
    }

    /// Samples `media` instead of a material color.
    ///
    /// Does nothing if the media isn't ready or can't be used as a texture.
    pub fn texture(&mut self, media: &MediaSource) -> Result<&mut Self, MaterialError> {
        if !texture::can_bind(media) {
            log::trace!("texture skipped, media is {:?}", media.readiness());
            return Ok(self);
        }

        let fragment = ShaderInput::Variant(ShaderKey::LightTextureFrag,
                                            Defines::new().with(IS_TEXTURE, true));
        let program = self.select(ShaderKey::LightVert.into(), fragment)?;

        program.set_uniform(SAMPLER, media);
        program.upload_uniform(&mut self.context, SAMPLER);

        Ok(self)
    }

    /// Builds a program from source code, outside of the cache.
    pub fn create_shader(&mut self, vertex_shader: &str, fragment_shader: &str)
                         -> Result<Rc<Program>, ProgramCreationError>
    {
        Program::from_source(&mut self.context, vertex_shader, fragment_shader).map(Rc::new)
    }

    /// Makes a user program current and uploads its uniforms.
    pub fn shader(&mut self, program: &Rc<Program>) -> Result<&mut Self, MaterialError> {
        program.upload_uniforms(&mut self.context);
        self.active = Some(program.clone());
        Ok(self)
    }

    /// Returns the variant of `program` built with the defines recorded on it.
    ///
    /// Both stages are composed with the defines. The uniforms of `program` are copied to the
    /// variant.
    pub fn specialize(&mut self, program: &Program) -> Result<Rc<Program>, ProgramCreationError> {
        let defines = program.defines();
        let vertex = ShaderSource::with_defines(program.vertex_source(), defines.clone());
        let fragment = ShaderSource::with_defines(program.fragment_source(), defines);

        let variant = self.programs.get_shader(&mut self.context, vertex, fragment)?;
        program.copy_uniforms_to(&variant);
        Ok(variant)
    }

    /// Destroys the texture created for `media`, if any.
    #[inline]
    pub fn release_texture(&mut self, media: &MediaSource) {
        texture::release_texture(&mut self.context, media);
    }

    fn color_material<A>(&mut self, color: A, specular: bool) -> Result<&mut Self, MaterialError>
        where A: ColorArgs
    {
        let color = self.color_model.normalize(&color.into_color_args())?;

        let vertex = if specular {
            ShaderInput::Variant(ShaderKey::LightVert, Defines::new().with(IS_SPECULAR, true))
        } else {
            ShaderKey::LightVert.into()
        };
        let program = self.select(vertex, ShaderKey::LightTextureFrag.into())?;

        program.set_uniform(MATERIAL_COLOR, color);
        program.upload_uniform(&mut self.context, MATERIAL_COLOR);
        apply_color_blend(&mut self.context, &color);

        Ok(self)
    }

    /// Gets a program from the cache and makes it current.
    fn select<'a>(&mut self, vertex: ShaderInput<'a>, fragment: ShaderInput<'a>)
                  -> Result<Rc<Program>, ProgramCreationError>
    {
        let program = self.programs.get_shader(&mut self.context, vertex, fragment)?;
        program.use_program(&mut self.context);
        self.active = Some(program.clone());
        Ok(program)
    }
}

/// Translucent colors are blended over what's behind them and don't write depth.
fn apply_color_blend(ctxt: &mut RenderContext, color: &Color) {
    if color.is_translucent() {
        sync_depth_mask(ctxt, false);
        sync_blending(ctxt, BlendingFunction::alpha_blending());
    } else {
        sync_depth_mask(ctxt, true);
        sync_blending(ctxt, BlendingFunction::AlwaysReplace);
    }
}
