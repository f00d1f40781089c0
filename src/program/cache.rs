use std::borrow::Cow;
use std::rc::Rc;

use fnv::FnvHashMap;

use crate::context::RenderContext;
use crate::program::{Program, ProgramCreationError};
use crate::shaders::{Defines, ShaderKey, ShaderLibrary, ShaderSource};

/// Describes where the source code of one stage comes from.
#[derive(Clone, Debug)]
pub enum ShaderInput<'a> {
    /// A source of the shader library.
    Named(ShaderKey),

    /// A source of the shader library, composed with defines.
    Variant(ShaderKey, Defines),

    /// Source code used verbatim.
    Literal(&'a str),

    /// Source code composed with defines.
    Composed(ShaderSource),
}

impl<'a> From<ShaderKey> for ShaderInput<'a> {
    #[inline]
    fn from(key: ShaderKey) -> ShaderInput<'a> {
        ShaderInput::Named(key)
    }
}

impl<'a> From<&'a str> for ShaderInput<'a> {
    #[inline]
    fn from(source: &'a str) -> ShaderInput<'a> {
        ShaderInput::Literal(source)
    }
}

impl<'a> From<ShaderSource> for ShaderInput<'a> {
    #[inline]
    fn from(source: ShaderSource) -> ShaderInput<'a> {
        ShaderInput::Composed(source)
    }
}

/// A stage input that only depends on the library.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum LibraryInput {
    Named(ShaderKey),
    Variant(ShaderKey, Defines),
}

impl LibraryInput {
    fn of(input: &ShaderInput<'_>) -> Option<LibraryInput> {
        match *input {
            ShaderInput::Named(key) => Some(LibraryInput::Named(key)),
            ShaderInput::Variant(key, ref defines) => {
                Some(LibraryInput::Variant(key, defines.clone()))
            },
            _ => None,
        }
    }
}

/// Hands out programs, linking each distinct pair of source texts only once.
///
/// Programs are keyed by their final source text, after library lookup and define composition.
/// Two requests that resolve to the same texts receive the same `Rc<Program>`, and a variant
/// with different defines is a different program.
///
/// Requests made only of library keys are also remembered by key, so repeating them doesn't
/// compose any source text.
pub struct ProgramCache {
    programs: FnvHashMap<(String, String), Rc<Program>>,
    // valid until the library is borrowed mutably
    by_input: FnvHashMap<(LibraryInput, LibraryInput), Rc<Program>>,
    library: ShaderLibrary,
}

impl ProgramCache {
    /// Builds an empty cache that resolves names through the default library.
    #[inline]
    pub fn new() -> ProgramCache {
        ProgramCache::with_library(ShaderLibrary::new())
    }

    /// Builds an empty cache that resolves names through `library`.
    #[inline]
    pub fn with_library(library: ShaderLibrary) -> ProgramCache {
        ProgramCache {
            programs: FnvHashMap::default(),
            by_input: FnvHashMap::default(),
            library,
        }
    }

    /// Returns the library used to resolve shader names.
    #[inline]
    pub fn library(&self) -> &ShaderLibrary {
        &self.library
    }

    /// Returns the library used to resolve shader names.
    ///
    /// Programs already in the cache keep the sources they were built with.
    #[inline]
    pub fn library_mut(&mut self) -> &mut ShaderLibrary {
        self.by_input.clear();
        &mut self.library
    }

    /// Returns the number of programs in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Returns true if no program was built yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Returns the final source text of a stage.
    pub fn resolve<'b>(&'b self, input: &'b ShaderInput<'_>) -> Cow<'b, str> {
        match *input {
            ShaderInput::Named(key) => Cow::Borrowed(self.library.source(key)),
            ShaderInput::Variant(key, ref defines) => {
                Cow::Owned(defines.compose(self.library.source(key)))
            },
            ShaderInput::Literal(source) => Cow::Borrowed(source),
            ShaderInput::Composed(ref source) => Cow::Owned(source.compose()),
        }
    }

    /// Returns the program made of these two stages, linking it on the first request.
    ///
    /// Link errors are returned and nothing is inserted, so the next request tries again.
    pub fn get_shader<'a, V, F>(&mut self, ctxt: &mut RenderContext, vertex: V, fragment: F)
                                -> Result<Rc<Program>, ProgramCreationError>
        where V: Into<ShaderInput<'a>>, F: Into<ShaderInput<'a>>
    {
        let (vertex, fragment) = (vertex.into(), fragment.into());

        let inputs = match (LibraryInput::of(&vertex), LibraryInput::of(&fragment)) {
            (Some(v), Some(f)) => Some((v, f)),
            _ => None,
        };
        if let Some(program) = inputs.as_ref().and_then(|inputs| self.by_input.get(inputs)) {
            log::trace!("program cache hit for {:?}", program.get_id());
            return Ok(program.clone());
        }

        let key = (self.resolve(&vertex).into_owned(), self.resolve(&fragment).into_owned());

        let program = match self.programs.get(&key) {
            Some(program) => {
                log::trace!("program cache hit for {:?}", program.get_id());
                program.clone()
            },
            None => {
                let program = Rc::new(Program::from_source(ctxt, &key.0, &key.1)?);
                log::debug!("program cache now holds {} programs", self.programs.len() + 1);
                self.programs.insert(key, program.clone());
                program
            },
        };

        if let Some(inputs) = inputs {
            self.by_input.insert(inputs, program.clone());
        }

        Ok(program)
    }
}

impl Default for ProgramCache {
    #[inline]
    fn default() -> ProgramCache {
        ProgramCache::new()
    }
}
