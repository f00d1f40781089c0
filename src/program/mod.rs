/*!
Programs, and the cache that hands them out.

A `Program` is a linked vertex and fragment shader pair, plus the uniforms and preprocessor
defines that were recorded on it. Programs are built from source text, either directly with
`Program::from_source` or through a `ProgramCache`, which compiles each distinct pair of source
texts only once.

*/
use crate::gl;
use crate::ToGlEnum;

use std::sync::Mutex;

use thiserror::Error;

pub use self::cache::{ProgramCache, ShaderInput};
pub use self::program::Program;

mod cache;
mod program;
mod shader;
mod uniforms_storage;

lazy_static::lazy_static! {
    /// Some shader compilers have race-condition issues, so we lock this mutex
    /// every time we compile a shader or link a program.
    static ref COMPILER_GLOBAL_LOCK: Mutex<()> = Mutex::new(());
}

/// Error that can be triggered when creating a `Program`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProgramCreationError {
    /// Error while compiling one of the shaders.
    #[error("compilation error in one of the shaders: {0}")]
    CompilationError(String),

    /// Error while linking the program.
    #[error("error while linking shaders together: {0}")]
    LinkingError(String),

    /// One of the requested shader types is not supported by the backend.
    #[error("one of the requested shader types is not supported by the backend")]
    ShaderTypeNotSupported,
}

/// The stage a shader runs at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Runs once per vertex.
    Vertex,
    /// Runs once per fragment.
    Fragment,
}

impl ToGlEnum for ShaderStage {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}
