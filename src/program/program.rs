use std::cell::{Cell, RefCell};
use std::fmt;

use fnv::FnvHashMap;

use crate::backend::{ProgramId, UniformLocation};
use crate::context::RenderContext;
use crate::program::shader::build_program;
use crate::program::uniforms_storage::UniformsStorage;
use crate::program::ProgramCreationError;
use crate::shaders::{DefineValue, Defines};
use crate::texture;
use crate::uniforms::{AsUniformValue, DynamicUniform, RawUniformValue, UniformType, UniformValue};

/// A combination of a vertex and a fragment shader, linked together, with the uniforms and
/// defines recorded on it.
///
/// Setting a uniform only records its value. Values are sent to the GPU when the program is
/// used by a material call or by `Renderer::shader`, and only if they changed since the last
/// upload.
pub struct Program {
    id: Cell<ProgramId>,
    vertex_shader: String,
    fragment_shader: String,
    uniforms: RefCell<FnvHashMap<String, UniformEntry>>,
    defines: RefCell<Defines>,
    storage: UniformsStorage,
}

struct UniformEntry {
    value: UniformValue,
    location: Location,
}

/// Location of a uniform in the linked program, resolved on first upload.
#[derive(Copy, Clone)]
enum Location {
    Unresolved,
    Inactive,
    At(UniformLocation),
}

impl Program {
    /// Compiles and links a program from the source code of its two stages.
    pub fn from_source(ctxt: &mut RenderContext, vertex_shader: &str, fragment_shader: &str)
                       -> Result<Program, ProgramCreationError>
    {
        let id = build_program(ctxt, vertex_shader, fragment_shader)?;
        log::debug!("linked program {:?}", id);

        Ok(Program {
            id: Cell::new(id),
            vertex_shader: vertex_shader.to_owned(),
            fragment_shader: fragment_shader.to_owned(),
            uniforms: RefCell::new(FnvHashMap::default()),
            defines: RefCell::new(Defines::new()),
            storage: UniformsStorage::new(),
        })
    }

    /// Returns the name of the linked program object.
    #[inline]
    pub fn get_id(&self) -> ProgramId {
        self.id.get()
    }

    /// Returns the source code of the vertex shader.
    #[inline]
    pub fn vertex_source(&self) -> &str {
        &self.vertex_shader
    }

    /// Returns the source code of the fragment shader.
    #[inline]
    pub fn fragment_source(&self) -> &str {
        &self.fragment_shader
    }

    /// Records the value of a uniform.
    ///
    /// The first value set on a name decides the type of the uniform. A later value of another
    /// type is ignored with a warning.
    pub fn set_uniform<V>(&self, name: &str, value: V) where V: AsUniformValue {
        self.store(name, value.as_uniform_value());
    }

    /// Records the value of a uniform whose type is inferred from the shape of `value`.
    ///
    /// Values that can't be converted are reported through `log::error!` and leave the
    /// uniform unchanged.
    pub fn set_uniform_dynamic<V>(&self, name: &str, value: V, hint: Option<UniformType>)
        where V: Into<DynamicUniform>
    {
        match value.into().infer(hint) {
            Ok(value) => self.store(name, value),
            Err(err) => log::error!("uniform `{}` left unchanged: {}", name, err),
        }
    }

    fn store(&self, name: &str, value: UniformValue) {
        let mut uniforms = self.uniforms.borrow_mut();

        match uniforms.get_mut(name) {
            Some(entry) if entry.value.get_type() != value.get_type() => {
                log::warn!("uniform `{}` is a {:?}, ignoring a value of type {:?}", name,
                           entry.value.get_type(), value.get_type());
            },
            Some(entry) => entry.value = value,
            None => {
                uniforms.insert(name.to_owned(), UniformEntry {
                    value,
                    location: Location::Unresolved,
                });
            },
        }
    }

    /// Returns the value last recorded for a uniform, or `None` if it was never set.
    #[inline]
    pub fn get_uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.borrow().get(name).map(|e| e.value.clone())
    }

    /// Returns the type of a uniform, or `None` if it was never set.
    #[inline]
    pub fn uniform_type(&self, name: &str) -> Option<UniformType> {
        self.uniforms.borrow().get(name).map(|e| e.value.get_type())
    }

    /// Records a preprocessor define.
    ///
    /// This doesn't recompile anything. Pass the program to `Renderer::specialize` to get the
    /// variant built with its defines.
    pub fn set_define<V>(&self, name: &str, value: V) -> &Program where V: Into<DefineValue> {
        self.defines.borrow_mut().set(name, value);
        self
    }

    /// Returns the defines recorded with `set_define`.
    #[inline]
    pub fn defines(&self) -> Defines {
        self.defines.borrow().clone()
    }

    /// Recompiles and relinks the sources of this program.
    ///
    /// The previous program object is destroyed. Every uniform location is resolved again and
    /// every recorded value is uploaded again on the next use. On error, the program is left
    /// untouched.
    pub fn relink(&self, ctxt: &mut RenderContext) -> Result<(), ProgramCreationError> {
        let id = build_program(ctxt, &self.vertex_shader, &self.fragment_shader)?;
        let old = self.id.replace(id);
        ctxt.delete_program(old);
        log::debug!("relinked program {:?} as {:?}", old, id);

        for entry in self.uniforms.borrow_mut().values_mut() {
            entry.location = Location::Unresolved;
        }
        self.storage.clear();

        Ok(())
    }

    /// Makes this program current.
    #[inline]
    pub(crate) fn use_program(&self, ctxt: &mut RenderContext) {
        ctxt.use_program(self.id.get());
    }

    /// Uploads the recorded value of `name`, if any. The program must be in use.
    ///
    /// Texture uniforms bind their media on texture unit 0 and receive the unit index. Nothing
    /// is uploaded if the media can't be bound.
    pub(crate) fn upload_uniform(&self, ctxt: &mut RenderContext, name: &str) {
        let (value, location) = match self.resolve(ctxt, name) {
            Some(v) => v,
            None => return,
        };

        let raw = match value {
            UniformValue::Texture(ref media) => {
                if texture::bind_texture(ctxt, media).is_none() {
                    return;
                }
                RawUniformValue::SignedInt(0)
            },
            ref other => match other.to_raw() {
                Some(raw) => raw,
                None => return,
            },
        };

        self.storage.set_uniform_value(ctxt, self.id.get(), location, &raw);
    }

    /// Uses this program and uploads every recorded uniform.
    pub(crate) fn upload_uniforms(&self, ctxt: &mut RenderContext) {
        self.use_program(ctxt);

        let mut names: Vec<String> = self.uniforms.borrow().keys().cloned().collect();
        names.sort();

        for name in names {
            self.upload_uniform(ctxt, &name);
        }
    }

    /// Records every uniform of this program on `other`.
    pub(crate) fn copy_uniforms_to(&self, other: &Program) {
        if std::ptr::eq(self, other) {
            return;
        }

        for (name, entry) in self.uniforms.borrow().iter() {
            other.store(name, entry.value.clone());
        }
    }

    /// Returns the value of `name` and its location, or `None` if it was never set or isn't an
    /// active uniform of the program.
    fn resolve(&self, ctxt: &mut RenderContext, name: &str)
               -> Option<(UniformValue, UniformLocation)>
    {
        let mut uniforms = self.uniforms.borrow_mut();
        let entry = uniforms.get_mut(name)?;

        if let Location::Unresolved = entry.location {
            entry.location = match ctxt.backend.get_uniform_location(self.id.get(), name) {
                Some(location) => Location::At(location),
                None => {
                    log::trace!("`{}` isn't an active uniform of program {:?}", name,
                                self.id.get());
                    Location::Inactive
                },
            };
        }

        match entry.location {
            Location::At(location) => Some((entry.value.clone(), location)),
            _ => None,
        }
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        formatter.debug_struct("Program")
                 .field("id", &self.id.get())
                 .field("uniforms", &self.uniforms.borrow().len())
                 .field("defines", &*self.defines.borrow())
                 .finish()
    }
}
