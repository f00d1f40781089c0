use std::cell::RefCell;

use smallvec::SmallVec;

use crate::backend::{ProgramId, UniformLocation};
use crate::context::RenderContext;
use crate::uniforms::RawUniformValue;

/// The last raw value uploaded to each location of a program.
pub(crate) struct UniformsStorage {
    values: RefCell<SmallVec<[Option<RawUniformValue>; 16]>>,
}

impl UniformsStorage {
    /// Builds a new empty storage.
    #[inline]
    pub fn new() -> UniformsStorage {
        UniformsStorage {
            values: RefCell::new(SmallVec::new()),
        }
    }

    /// Compares `value` with the value stored in this object. If the values differ, updates
    /// the storage and calls `glUniform`.
    ///
    /// `program` must be the program in use.
    pub fn set_uniform_value(&self, ctxt: &mut RenderContext, program: ProgramId,
                             location: UniformLocation, value: &RawUniformValue)
    {
        debug_assert_eq!(ctxt.state.program, Some(program));

        let index = match usize::try_from(location.0) {
            Ok(index) => index,
            Err(_) => return,
        };

        let mut values = self.values.borrow_mut();

        if values.len() <= index {
            values.resize(index + 1, None);
        }

        if values[index].as_ref() == Some(value) && ctxt.options().skip_redundant_state_changes {
            return;
        }

        values[index] = Some(*value);
        ctxt.backend.uniform(location, value);
    }

    /// Forgets every stored value, after the program has been linked again.
    #[inline]
    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}
