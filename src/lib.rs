/*!
Shader programs and material state for a real-time 3D renderer, on top of OpenGL ES 2.0.

pigment sits between a loosely-typed scene API (the kind a creative-coding library exposes)
and the fixed, stateful GPU pipeline. It compiles and caches shader programs, turns images and
video frames into textures, uploads uniforms of any supported shape, and switches blending and
depth writes according to the alpha of material colors.

# Initialization

Everything starts with a `Backend`. The `GlesBackend` drives a real OpenGL ES 2.0 context; it
only needs a way to load the GL function pointers of a context that is current on this thread.

```no_run
# fn get_proc_address(_: &str) -> *const std::os::raw::c_void { std::ptr::null() }
use pigment::backend::gles::GlesBackend;
use pigment::material::Renderer;

let backend = unsafe { GlesBackend::new(|symbol| get_proc_address(symbol)) };
let mut renderer = Renderer::new(backend);
```

# Materials

Each material call selects the program it needs, makes it current, and uploads its uniforms:

```no_run
# fn example(renderer: &mut pigment::material::Renderer) -> Result<(), pigment::material::MaterialError> {
renderer.normal_material()?;
renderer.ambient_material(250)?;
renderer.specular_material((255, 0, 0, 128))?;
# Ok(())
# }
```

Textures are created from `MediaSource`s. A video whose current frame isn't loaded yet is
silently skipped, and picked up on a later frame.

# Custom shaders

```no_run
# fn example(renderer: &mut pigment::material::Renderer, vs: &str, fs: &str) -> Result<(), pigment::material::MaterialError> {
let program = renderer.create_shader(vs, fs)?;
program.set_uniform("uTime", 1.5f32);
program.set_uniform("uTint", [1.0, 0.0, 0.0, 1.0]);
renderer.shader(&program)?;
# Ok(())
# }
```

# State

All GL state changes go through the `RenderContext`, which remembers the current program,
texture bindings, blend and depth-mask state, and skips calls that wouldn't change anything.
If other code touches the same GL context, call `RenderContext::invalidate_state` afterwards.

*/
#![warn(missing_docs)]

pub use crate::backend::Backend;
pub use crate::color::{Color, ColorModel, RgbColorModel};
pub use crate::context::{ContextOptions, RenderContext};
pub use crate::material::{MaterialError, Renderer};
pub use crate::program::{Program, ProgramCreationError};
pub use crate::texture::{MediaSource, StaticImage, VideoFrame};
pub use crate::uniforms::{AsUniformValue, DynamicUniform, UniformValue};

pub mod backend;
pub mod color;
pub mod context;
pub mod draw_parameters;
pub mod material;
pub mod program;
pub mod shaders;
pub mod texture;
pub mod uniforms;

#[allow(clippy::all, missing_docs, unused_parens, non_upper_case_globals)]
mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

/// Internal trait for enums that can be turned into GLenum.
trait ToGlEnum {
    /// Returns the value.
    fn to_glenum(&self) -> gl::types::GLenum;
}
