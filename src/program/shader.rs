use crate::backend::{ProgramId, ShaderId};
use crate::context::RenderContext;
use crate::program::{ProgramCreationError, ShaderStage, COMPILER_GLOBAL_LOCK};

/// A single, compiled but unlinked, shader.
///
/// Must be released with `destroy` once the program is linked.
struct Shader {
    id: ShaderId,
}

impl Shader {
    #[inline]
    fn destroy(self, ctxt: &mut RenderContext) {
        ctxt.backend.delete_shader(self.id);
    }
}

/// Builds an individual shader.
fn build_shader(ctxt: &mut RenderContext, stage: ShaderStage, source_code: &str)
                -> Result<Shader, ProgramCreationError>
{
    let _lock = COMPILER_GLOBAL_LOCK.lock();
    let id = ctxt.backend.compile_shader(stage, source_code)?;
    Ok(Shader { id })
}

/// Compiles both stages and links them into a new program object.
///
/// The intermediate shader objects are always destroyed, whether linking succeeds or not.
pub(crate) fn build_program(ctxt: &mut RenderContext, vertex_shader: &str,
                            fragment_shader: &str) -> Result<ProgramId, ProgramCreationError>
{
    let vertex = build_shader(ctxt, ShaderStage::Vertex, vertex_shader)?;

    let fragment = match build_shader(ctxt, ShaderStage::Fragment, fragment_shader) {
        Ok(f) => f,
        Err(e) => {
            vertex.destroy(ctxt);
            return Err(e);
        }
    };

    let linked = {
        let _lock = COMPILER_GLOBAL_LOCK.lock();
        ctxt.backend.link_program(vertex.id, fragment.id)
    };

    vertex.destroy(ctxt);
    fragment.destroy(ctxt);

    linked
}
