/*!

The render context: a backend plus everything pigment knows about its current state.

Every operation of the crate receives the context explicitly. There is no hidden "current GL
context" anywhere: whatever a material or texture call changes is visible in its signature, and
in `RenderContext::state` afterwards.

*/
use crate::backend::{Backend, ProgramId, TextureId};
use crate::draw_parameters::{BlendEquation, LinearBlendingFactor};

pub use self::state::{GlState, TextureUnitState};

mod state;

/// Options for a `RenderContext`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContextOptions {
    /// If `true`, state changes that match the cached `GlState` are not forwarded to the
    /// backend.
    ///
    /// Turn this off when other code issues GL calls on the same context without going through
    /// pigment, or call `RenderContext::invalidate_state` after such calls.
    ///
    /// The default value is `true`.
    pub skip_redundant_state_changes: bool,
}

impl Default for ContextOptions {
    #[inline]
    fn default() -> ContextOptions {
        ContextOptions {
            skip_redundant_state_changes: true,
        }
    }
}

/// A backend and its cached state.
pub struct RenderContext {
    pub(crate) backend: Box<dyn Backend>,
    pub(crate) state: GlState,
    options: ContextOptions,
    // one bit per `StateSlot` whose cached value can't be trusted
    stale: u8,
}

#[derive(Copy, Clone, Debug)]
enum StateSlot {
    Program,
    ActiveTexture,
    TextureBinding,
    Blend,
    BlendFunc,
    BlendEquation,
    DepthMask,
}

impl RenderContext {
    /// Builds a context around a backend.
    ///
    /// The backend's GL context may already have been used by other code, so the first state
    /// change of each kind is always forwarded.
    #[inline]
    pub fn new<B>(backend: B) -> RenderContext where B: Backend + 'static {
        RenderContext::with_options(backend, ContextOptions::default())
    }

    /// Builds a context with custom options.
    pub fn with_options<B>(backend: B, options: ContextOptions) -> RenderContext
        where B: Backend + 'static
    {
        RenderContext {
            backend: Box::new(backend),
            state: GlState::default(),
            options,
            stale: u8::MAX,
        }
    }

    /// Returns the cached state of the backend.
    #[inline]
    pub fn state(&self) -> &GlState {
        &self.state
    }

    /// Returns the options of this context.
    #[inline]
    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Forgets the cached state.
    ///
    /// The next state change of each kind is forwarded to the backend unconditionally.
    pub fn invalidate_state(&mut self) {
        log::trace!("render context state invalidated");
        self.state = GlState::default();
        self.stale = u8::MAX;
    }

    /// Returns true if the backend call for `slot` can be skipped.
    fn is_current(&mut self, slot: StateSlot, up_to_date: bool) -> bool {
        let bit = 1 << slot as u8;
        if self.stale & bit != 0 {
            self.stale &= !bit;
            return false;
        }

        up_to_date && self.options.skip_redundant_state_changes
    }

    pub(crate) fn use_program(&mut self, program: ProgramId) {
        if self.is_current(StateSlot::Program, self.state.program == Some(program)) {
            return;
        }

        self.backend.use_program(Some(program));
        self.state.program = Some(program);
    }

    pub(crate) fn active_texture(&mut self, unit: u32) {
        if self.is_current(StateSlot::ActiveTexture, self.state.active_texture == unit) {
            return;
        }

        self.backend.active_texture(unit);
        self.state.active_texture = unit;
    }

    /// Binds `texture` on the active unit.
    pub(crate) fn bind_texture(&mut self, texture: TextureId) {
        let unit = self.state.active_texture as usize;
        let bound = self.state.bound_texture() == Some(texture);
        if self.is_current(StateSlot::TextureBinding, bound) {
            return;
        }

        self.backend.bind_texture(Some(texture));

        if self.state.texture_units.len() <= unit {
            self.state.texture_units.resize(unit + 1, TextureUnitState::default());
        }
        self.state.texture_units[unit].texture = Some(texture);
    }

    /// Destroys a texture, unbinding it from every unit it was bound to.
    pub(crate) fn delete_texture(&mut self, texture: TextureId) {
        self.backend.delete_texture(texture);

        for unit in self.state.texture_units.iter_mut() {
            if unit.texture == Some(texture) {
                unit.texture = None;
            }
        }
    }

    /// Destroys a program, forgetting it if it was in use.
    pub(crate) fn delete_program(&mut self, program: ProgramId) {
        self.backend.delete_program(program);

        if self.state.program == Some(program) {
            self.state.program = None;
        }
    }

    pub(crate) fn set_blend_enabled(&mut self, enabled: bool) {
        if self.is_current(StateSlot::Blend, self.state.enabled_blend == enabled) {
            return;
        }

        self.backend.set_blend_enabled(enabled);
        self.state.enabled_blend = enabled;
    }

    pub(crate) fn blend_func(&mut self, source: LinearBlendingFactor,
                             destination: LinearBlendingFactor)
    {
        if self.is_current(StateSlot::BlendFunc, self.state.blend_func == (source, destination)) {
            return;
        }

        self.backend.blend_func(source, destination);
        self.state.blend_func = (source, destination);
    }

    pub(crate) fn blend_equation(&mut self, equation: BlendEquation) {
        if self.is_current(StateSlot::BlendEquation, self.state.blend_equation == equation) {
            return;
        }

        self.backend.blend_equation(equation);
        self.state.blend_equation = equation;
    }

    pub(crate) fn depth_mask(&mut self, write: bool) {
        if self.is_current(StateSlot::DepthMask, self.state.depth_mask == write) {
            return;
        }

        self.backend.depth_mask(write);
        self.state.depth_mask = write;
    }
}
