/*!

Blend and depth-mask state.

Materials don't carry draw parameters of their own. Instead, every color-based material call
derives the blend and depth-mask state from the alpha of its color and applies it immediately
on the render context.

*/
pub use self::blend::{sync_blending, BlendEquation, BlendingFunction, LinearBlendingFactor};
pub use self::depth::sync_depth_mask;

mod blend;
mod depth;
