use pigment::uniforms::{DynamicUniform, Matrix, RawUniformValue, UniformType, UniformValue};
use pigment::Color;

mod support;

use support::Call;

const VERTEX: &str = "\
uniform mat4 uModel;
uniform mat3 uNormal;
uniform vec3 uLight;
void main() {}
";

const FRAGMENT: &str = "\
precision mediump float;
uniform float uTime;
uniform vec2 uOffset;
uniform vec4 uTint;
uniform sampler2D uImage;
void main() {}
";

#[test]
fn inferred_types() {
    let (mut renderer, _gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    program.set_uniform_dynamic("uTime", 3.0, None);
    program.set_uniform_dynamic("uLight", [1.0, 2.0, 3.0], None);
    program.set_uniform_dynamic("uTint", [1.0, 2.0, 3.0, 4.0], None);
    program.set_uniform_dynamic("uModel", cgmath::Matrix4::<f32>::from_scale(2.0), None);
    program.set_uniform_dynamic("uNormal", Matrix::Mat3([[1.0, 0.0, 0.0],
                                                         [0.0, 1.0, 0.0],
                                                         [0.0, 0.0, 1.0]]), None);

    assert_eq!(program.uniform_type("uTime"), Some(UniformType::Float));
    assert_eq!(program.uniform_type("uLight"), Some(UniformType::FloatVec3));
    assert_eq!(program.uniform_type("uTint"), Some(UniformType::FloatVec4));
    assert_eq!(program.uniform_type("uModel"), Some(UniformType::FloatMat4));
    assert_eq!(program.uniform_type("uNormal"), Some(UniformType::FloatMat3));
}

#[test]
fn media_is_a_texture() {
    let (mut renderer, _gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();
    let image = support::build_image(2, 2);

    program.set_uniform_dynamic("uImage", image.clone(), None);

    assert_eq!(program.get_uniform("uImage"), Some(UniformValue::Texture(image)));
}

#[test]
fn never_set_is_none() {
    let (mut renderer, _gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    assert_eq!(program.get_uniform("uTime"), None);
    assert_eq!(program.uniform_type("uTime"), None);
}

#[test]
fn unrecognized_shape_leaves_uniform_unchanged() {
    let (mut renderer, _gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    program.set_uniform_dynamic("uOffset", DynamicUniform::Sequence(vec![0.0; 7]), None);
    assert_eq!(program.get_uniform("uOffset"), None);

    program.set_uniform("uOffset", [1.0, 2.0]);
    program.set_uniform_dynamic("uOffset", DynamicUniform::Sequence(vec![]), None);
    assert_eq!(program.get_uniform("uOffset"), Some(UniformValue::Vec2([1.0, 2.0])));
}

#[test]
fn type_is_fixed_by_first_value() {
    let (mut renderer, _gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    program.set_uniform("uTime", 1.0f32);
    program.set_uniform("uTime", [1.0, 2.0]);
    assert_eq!(program.get_uniform("uTime"), Some(UniformValue::Float(1.0)));

    program.set_uniform("uTime", 2.0f32);
    assert_eq!(program.get_uniform("uTime"), Some(UniformValue::Float(2.0)));
}

#[test]
fn flat_matrix_needs_a_hint() {
    let (mut renderer, _gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();
    let flat: Vec<f64> = (0..16).map(|i| i as f64).collect();

    program.set_uniform_dynamic("uModel", flat.clone(), None);
    assert_eq!(program.get_uniform("uModel"), None);

    program.set_uniform_dynamic("uModel", flat, Some(UniformType::FloatMat4));
    match program.get_uniform("uModel") {
        Some(UniformValue::Mat4(m)) => {
            assert_eq!(m[0], [0.0, 1.0, 2.0, 3.0]);
            assert_eq!(m[3], [12.0, 13.0, 14.0, 15.0]);
        },
        other => panic!("{:?}", other),
    }
}

#[test]
fn shader_uploads_everything() {
    let (mut renderer, gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();
    let image = support::build_image(2, 2);

    program.set_uniform("uTime", 0.5f32);
    program.set_uniform("uTint", Color::new(1.0, 0.0, 0.0, 1.0));
    program.set_uniform("uModel", cgmath::Matrix4::<f32>::from_translation(
        cgmath::Vector3::new(1.0, 2.0, 3.0)));
    program.set_uniform("uImage", &image);

    renderer.shader(&program).unwrap();

    let id = program.get_id();
    assert_eq!(gl.current_program(), Some(id));
    assert_eq!(gl.uniform(id, "uTime"), Some(RawUniformValue::Float(0.5)));
    assert_eq!(gl.uniform(id, "uTint"), Some(RawUniformValue::Vec4([1.0, 0.0, 0.0, 1.0])));
    assert_eq!(gl.uniform(id, "uImage"), Some(RawUniformValue::SignedInt(0)));
    match gl.uniform(id, "uModel") {
        Some(RawUniformValue::Mat4(m)) => assert_eq!(m[3], [1.0, 2.0, 3.0, 1.0]),
        other => panic!("{:?}", other),
    }
    assert_eq!(gl.bound_texture(0), image.texture_record().unwrap().texture());
    assert!(std::rc::Rc::ptr_eq(renderer.active_program().unwrap(), &program));
}

#[test]
fn undeclared_uniforms_are_not_uploaded() {
    let (mut renderer, gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    program.set_uniform("uMissing", 1.0f32);
    renderer.shader(&program).unwrap();
    renderer.shader(&program).unwrap();

    assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 0);
}

#[test]
fn unchanged_values_are_not_uploaded_again() {
    let (mut renderer, gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    program.set_uniform("uTime", 1.0f32);
    renderer.shader(&program).unwrap();
    renderer.shader(&program).unwrap();
    assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 1);

    program.set_uniform("uTime", 2.0f32);
    renderer.shader(&program).unwrap();
    assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 2);
}

#[test]
fn relink_uploads_again() {
    let (mut renderer, gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    program.set_uniform("uTime", 1.0f32);
    renderer.shader(&program).unwrap();
    let old = program.get_id();

    program.relink(renderer.context_mut()).unwrap();
    assert_ne!(program.get_id(), old);
    assert!(gl.calls().contains(&Call::DeleteProgram(old)));

    renderer.shader(&program).unwrap();
    assert_eq!(gl.current_program(), Some(program.get_id()));
    assert_eq!(gl.uniform(program.get_id(), "uTime"), Some(RawUniformValue::Float(1.0)));
    assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 2);
}

#[test]
fn defines_take_effect_through_specialize() {
    let (mut renderer, gl) = support::build_renderer();
    let program = renderer.create_shader(VERTEX, FRAGMENT).unwrap();

    program.set_uniform("uTime", 4.0f32);
    program.set_define("USE_FOG", true).set_define("FOG_DENSITY", "0.5");
    assert_eq!(gl.count(|c| matches!(c, Call::LinkProgram(_))), 1);

    let variant = renderer.specialize(&program).unwrap();
    assert_ne!(variant.get_id(), program.get_id());
    assert!(variant.vertex_source().starts_with("#define FOG_DENSITY 0.5\n#define USE_FOG\n"));
    assert!(variant.fragment_source().starts_with("#define FOG_DENSITY 0.5\n#define USE_FOG\n"));
    assert_eq!(variant.get_uniform("uTime"), Some(UniformValue::Float(4.0)));

    let again = renderer.specialize(&program).unwrap();
    assert!(std::rc::Rc::ptr_eq(&variant, &again));
}

#[test]
fn specializing_without_defines_returns_the_cached_program() {
    let (mut renderer, _gl) = support::build_renderer();

    renderer.ambient_material(0).unwrap();
    let program = renderer.active_program().unwrap().clone();

    let same = renderer.specialize(&program).unwrap();
    assert!(std::rc::Rc::ptr_eq(&program, &same));
}
