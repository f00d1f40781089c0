use crate::context::RenderContext;

/// Enables or disables writes to the depth buffer.
///
/// Translucent geometry is drawn with writes disabled so that it doesn't occlude what is drawn
/// behind it afterwards.
#[inline]
pub fn sync_depth_mask(ctxt: &mut RenderContext, write: bool) {
    ctxt.depth_mask(write);
}
