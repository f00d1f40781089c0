use pigment::draw_parameters::{sync_blending, sync_depth_mask, BlendingFunction,
                               LinearBlendingFactor};
use pigment::{ContextOptions, RenderContext, Renderer};

mod support;

use support::Call;

#[test]
fn default_state() {
    let (backend, _gl) = support::build_backend();
    let ctxt = RenderContext::new(backend);

    let state = ctxt.state();
    assert_eq!(state.program, None);
    assert_eq!(state.active_texture, 0);
    assert_eq!(state.bound_texture(), None);
    assert!(!state.enabled_blend);
    assert!(state.depth_mask);
    assert!(ctxt.options().skip_redundant_state_changes);
}

#[test]
fn first_change_of_each_kind_is_sent() {
    let (backend, gl) = support::build_backend();
    let mut ctxt = RenderContext::new(backend);

    // matches the cached defaults, but the context may have been used before
    sync_depth_mask(&mut ctxt, true);
    sync_blending(&mut ctxt, BlendingFunction::AlwaysReplace);

    assert_eq!(gl.calls(), vec![Call::DepthMask(true), Call::SetBlendEnabled(false)]);
}

#[test]
fn redundant_changes_are_skipped() {
    let (backend, gl) = support::build_backend();
    let mut ctxt = RenderContext::new(backend);

    sync_depth_mask(&mut ctxt, true);
    sync_blending(&mut ctxt, BlendingFunction::AlwaysReplace);
    gl.clear_calls();

    sync_depth_mask(&mut ctxt, true);
    sync_blending(&mut ctxt, BlendingFunction::AlwaysReplace);
    assert!(gl.calls().is_empty());

    sync_blending(&mut ctxt, BlendingFunction::alpha_blending());
    sync_blending(&mut ctxt, BlendingFunction::alpha_blending());
    assert_eq!(gl.count(|c| matches!(c, Call::SetBlendEnabled(true))), 1);
    assert_eq!(gl.count(|c| matches!(c, Call::BlendEquation(_))), 1);
    assert_eq!(gl.count(|c| matches!(c, Call::BlendFunc(..))), 1);
    assert_eq!(ctxt.state().blend_func,
               (LinearBlendingFactor::SourceAlpha, LinearBlendingFactor::OneMinusSourceAlpha));
}

#[test]
fn invalidated_state_is_sent_again() {
    let (backend, gl) = support::build_backend();
    let mut ctxt = RenderContext::new(backend);

    sync_depth_mask(&mut ctxt, true);
    ctxt.invalidate_state();
    sync_depth_mask(&mut ctxt, true);
    sync_depth_mask(&mut ctxt, true);

    assert_eq!(gl.count(|c| *c == Call::DepthMask(true)), 2);
}

#[test]
fn skipping_can_be_disabled() {
    let (backend, gl) = support::build_backend();
    let options = ContextOptions { skip_redundant_state_changes: false };
    let mut renderer = Renderer::with_options(backend, options);

    renderer.ambient_material(255).unwrap();
    renderer.ambient_material(255).unwrap();

    assert_eq!(gl.count(|c| matches!(c, Call::UseProgram(_))), 2);
    assert_eq!(gl.count(|c| *c == Call::DepthMask(true)), 2);
    assert_eq!(gl.count(|c| *c == Call::SetBlendEnabled(false)), 2);
    assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 2);
}

#[test]
fn material_state_is_mirrored() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.specular_material((0, 0, 255, 100)).unwrap();

    let state = renderer.context().state();
    assert_eq!(state.program, gl.current_program());
    assert_eq!(state.enabled_blend, gl.blend_enabled());
    assert_eq!(state.depth_mask, gl.depth_mask());
    assert!(state.enabled_blend);
}
