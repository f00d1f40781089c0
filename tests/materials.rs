use pigment::draw_parameters::{BlendEquation, LinearBlendingFactor};
use pigment::material::{MaterialError, MATERIAL_COLOR};
use pigment::program::ProgramCreationError;
use pigment::shaders::ShaderKey;
use pigment::uniforms::RawUniformValue;
use pigment::color::ColorError;

mod support;

use support::Call;

fn material_color(renderer: &pigment::Renderer, gl: &support::Gl) -> [f32; 4] {
    let program = renderer.active_program().unwrap().get_id();
    match gl.uniform(program, MATERIAL_COLOR) {
        Some(RawUniformValue::Vec4(c)) => c,
        other => panic!("unexpected uMaterialColor: {:?}", other),
    }
}

#[test]
fn ambient_gray() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.ambient_material(250).unwrap();

    let color = material_color(&renderer, &gl);
    for &c in &color[..3] {
        assert!((c - 0.98).abs() < 0.001, "{:?}", color);
    }
    assert_eq!(color[3], 1.0);

    let program = renderer.active_program().unwrap().get_id();
    assert_eq!(gl.current_program(), Some(program));

    let (vertex, _) = gl.sources(program);
    assert!(!vertex.contains("#define IS_SPECULAR"));

    assert!(!gl.blend_enabled());
    assert!(gl.depth_mask());
}

#[test]
fn translucent_color_blends() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.ambient_material((255, 255, 255, 127.5)).unwrap();

    assert!(gl.blend_enabled());
    assert!(!gl.depth_mask());

    let calls = gl.calls();
    assert!(calls.contains(&Call::BlendEquation(BlendEquation::Addition)));
    assert!(calls.contains(&Call::BlendFunc(LinearBlendingFactor::SourceAlpha,
                                            LinearBlendingFactor::OneMinusSourceAlpha)));
}

#[test]
fn opaque_color_after_translucent() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.ambient_material((255, 0, 0, 128)).unwrap();
    renderer.ambient_material((255, 0, 0)).unwrap();

    assert!(!gl.blend_enabled());
    assert!(gl.depth_mask());
}

#[test]
fn specular_is_a_distinct_variant() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.ambient_material(100).unwrap();
    let ambient = renderer.active_program().unwrap().clone();

    renderer.specular_material(100).unwrap();
    let specular = renderer.active_program().unwrap().clone();

    assert_ne!(ambient.get_id(), specular.get_id());
    assert_eq!(gl.current_program(), Some(specular.get_id()));

    let (vertex, fragment) = gl.sources(specular.get_id());
    assert!(vertex.contains("#define IS_SPECULAR"));
    assert!(!fragment.contains("#define IS_TEXTURE"));
    assert_eq!(fragment, ShaderKey::LightTextureFrag.default_source());
}

#[test]
fn basic_and_ambient_share_a_program() {
    let (mut renderer, _gl) = support::build_renderer();

    renderer.basic_material(10).unwrap();
    let basic = renderer.active_program().unwrap().clone();
    renderer.ambient_material(20).unwrap();
    let ambient = renderer.active_program().unwrap().clone();

    assert!(std::rc::Rc::ptr_eq(&basic, &ambient));
    assert_eq!(renderer.programs().len(), 1);
}

#[test]
fn normal_material() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.normal_material().unwrap();

    let program = renderer.active_program().unwrap().get_id();
    assert_eq!(gl.current_program(), Some(program));
    assert_eq!(gl.sources(program), (ShaderKey::NormalVert.default_source().to_owned(),
                                     ShaderKey::NormalFrag.default_source().to_owned()));
    assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 0);
    assert_eq!(gl.count(|c| matches!(c, Call::SetBlendEnabled(_) | Call::DepthMask(_))), 0);
}

#[test]
fn every_call_activates_its_program() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.normal_material().unwrap();
    let normal = gl.current_program();
    renderer.ambient_material(0).unwrap();
    let ambient = gl.current_program();
    renderer.normal_material().unwrap();

    assert_ne!(normal, ambient);
    assert_eq!(gl.current_program(), normal);
}

#[test]
fn chaining() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.normal_material().unwrap()
            .specular_material("#ff000080").unwrap()
            .ambient_material(("#00ff00", 255)).unwrap();

    assert_eq!(material_color(&renderer, &gl), [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(renderer.programs().len(), 3);
}

#[test]
fn unchanged_color_is_not_uploaded_twice() {
    let (mut renderer, gl) = support::build_renderer();

    renderer.ambient_material(128).unwrap();
    renderer.ambient_material(128).unwrap();

    assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 1);
    assert_eq!(gl.count(|c| matches!(c, Call::LinkProgram(_))), 1);
}

#[test]
fn bad_color_arguments() {
    let (mut renderer, gl) = support::build_renderer();

    let err = renderer.ambient_material("chartreuse").err().unwrap();
    assert_eq!(err, MaterialError::Color(ColorError::UnrecognizedString("chartreuse".to_owned())));
    assert!(renderer.active_program().is_none());
    assert_eq!(gl.current_program(), None);
}

#[test]
fn compilation_failure_is_reported() {
    let (mut renderer, gl) = support::build_renderer();
    renderer.programs_mut().library_mut().set_source(ShaderKey::NormalFrag, "invalid");

    match renderer.normal_material() {
        Err(MaterialError::Program(ProgramCreationError::CompilationError(_))) => (),
        other => panic!("{:?}", other.map(|_| ())),
    }

    assert!(renderer.programs().is_empty());
    assert_eq!(gl.live_programs(), 0);
    // the vertex shader compiled and must not leak
    assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 1);
}
