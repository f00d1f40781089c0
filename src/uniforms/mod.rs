/*!
A uniform is a global variable in your program. Each material call uploads the uniforms its
program needs, and user programs receive theirs through `Program::set_uniform`.

There are two ways to build a uniform value.

The typed way goes through the `AsUniformValue` trait. The type of the uniform is decided by
the Rust type of the value:

```no_run
# fn example(program: &pigment::program::Program) {
program.set_uniform("uTint", [1.0, 0.5, 0.0, 1.0]);
program.set_uniform("uTime", 0.25f32);
# }
```

The inferred way goes through `DynamicUniform`, for values whose shape is only known at
runtime. An optional `UniformType` hint resolves ambiguous shapes, for example a flat list of
sixteen numbers meant as a matrix:

```no_run
# fn example(program: &pigment::program::Program, flat: Vec<f64>) {
use pigment::uniforms::{DynamicUniform, UniformType};
program.set_uniform_dynamic("uModel", DynamicUniform::Sequence(flat),
                            Some(UniformType::FloatMat4));
# }
```

Textures are uniforms too: a `MediaSource` value is bound on texture unit 0 when the program
is used, and the sampler receives the unit index.

*/
pub use self::dynamic::{DynamicUniform, Matrix, UniformError};
pub use self::sampler::{MagnifySamplerFilter, MinifySamplerFilter, SamplerWrapFunction};
pub use self::value::{AsUniformValue, RawUniformValue, UniformType, UniformValue};

mod dynamic;
mod sampler;
mod value;
