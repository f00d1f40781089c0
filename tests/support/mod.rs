/*!
Test supports module.

Provides a headless `Backend` that simulates GL objects and records every call it receives.

*/

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pigment::backend::{Backend, ProgramId, ShaderId, TextureId, UniformLocation};
use pigment::draw_parameters::{BlendEquation, LinearBlendingFactor};
use pigment::program::{ProgramCreationError, ShaderStage};
use pigment::texture::{StaticImage, TextureParameter, VideoFrame};
use pigment::uniforms::RawUniformValue;
use pigment::{MediaSource, Renderer};

/// A call received by the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateTexture(TextureId),
    DeleteTexture(TextureId),
    ActiveTexture(u32),
    BindTexture(Option<TextureId>),
    TexImage2d { width: u32, height: u32 },
    TexParameter(TextureParameter),
    GenerateMipmap,
    CompileShader(ShaderStage),
    LinkProgram(ProgramId),
    DeleteShader(ShaderId),
    DeleteProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    Uniform(UniformLocation, RawUniformValue),
    SetBlendEnabled(bool),
    BlendFunc(LinearBlendingFactor, LinearBlendingFactor),
    BlendEquation(BlendEquation),
    DepthMask(bool),
}

struct SimulatedProgram {
    vertex: String,
    fragment: String,
    uniforms: Vec<String>,
    values: HashMap<String, RawUniformValue>,
}

#[derive(Default)]
struct Recording {
    calls: Vec<Call>,
    next_id: u32,
    shaders: HashMap<ShaderId, (ShaderStage, String)>,
    programs: HashMap<ProgramId, SimulatedProgram>,
    current_program: Option<ProgramId>,
    active_unit: u32,
    bound: HashMap<u32, TextureId>,
    blend: bool,
    depth_mask: bool,
    uploaded: Vec<u8>,
}

/// Handle to what a `RecordingBackend` received. Clones share the same recording.
#[derive(Clone)]
pub struct Gl(Rc<RefCell<Recording>>);

/// The backend half, given to the renderer.
pub struct RecordingBackend(Rc<RefCell<Recording>>);

/// Builds a recording backend and its handle.
pub fn build_backend() -> (RecordingBackend, Gl) {
    let recording = Rc::new(RefCell::new(Recording {
        depth_mask: true,
        ..Recording::default()
    }));

    (RecordingBackend(recording.clone()), Gl(recording))
}

/// Builds a renderer on top of a recording backend.
pub fn build_renderer() -> (Renderer, Gl) {
    let (backend, gl) = build_backend();
    (Renderer::new(backend), gl)
}

/// Builds an image of the given dimensions, filled with opaque white.
pub fn build_image(width: u32, height: u32) -> MediaSource {
    let pixels = vec![255; width as usize * height as usize * 4];
    MediaSource::from(StaticImage::new(width, height, pixels).unwrap())
}

/// Builds a video with its metadata and a first frame loaded.
pub fn build_loaded_video(width: u32, height: u32) -> (Rc<VideoFrame>, MediaSource) {
    let video = Rc::new(VideoFrame::new());
    video.set_metadata(width, height);
    video.set_frame(vec![0; width as usize * height as usize * 4]);
    let media = MediaSource::from(video.clone());
    (video, media)
}

/// Names of the uniforms declared in a GLSL source, in order.
fn declared_uniforms(source: &str, out: &mut Vec<String>) {
    for line in source.lines() {
        let line = line.trim();
        if !line.starts_with("uniform ") {
            continue;
        }

        let name = line.trim_end_matches(';').split_whitespace().last().unwrap();
        let name = name.split('[').next().unwrap().to_owned();
        if !out.contains(&name) {
            out.push(name);
        }
    }
}

impl Gl {
    /// Returns every call received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    /// Forgets the calls received so far.
    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    /// Returns the number of calls matching `f`.
    pub fn count<F>(&self, f: F) -> usize where F: Fn(&Call) -> bool {
        self.0.borrow().calls.iter().filter(|c| f(c)).count()
    }

    /// Returns the program in use.
    pub fn current_program(&self) -> Option<ProgramId> {
        self.0.borrow().current_program
    }

    /// Returns the texture bound on `unit`.
    pub fn bound_texture(&self, unit: u32) -> Option<TextureId> {
        self.0.borrow().bound.get(&unit).cloned()
    }

    /// Returns whether `GL_BLEND` is enabled.
    pub fn blend_enabled(&self) -> bool {
        self.0.borrow().blend
    }

    /// Returns whether depth writes are enabled.
    pub fn depth_mask(&self) -> bool {
        self.0.borrow().depth_mask
    }

    /// Returns the pixels of the last `tex_image_2d` call.
    pub fn uploaded_pixels(&self) -> Vec<u8> {
        self.0.borrow().uploaded.clone()
    }

    /// Returns the last value uploaded to `name` in `program`.
    pub fn uniform(&self, program: ProgramId, name: &str) -> Option<RawUniformValue> {
        self.0.borrow().programs.get(&program).and_then(|p| p.values.get(name).cloned())
    }

    /// Returns the vertex and fragment sources a program was linked from.
    pub fn sources(&self, program: ProgramId) -> (String, String) {
        let recording = self.0.borrow();
        let p = &recording.programs[&program];
        (p.vertex.clone(), p.fragment.clone())
    }

    /// Returns the number of live program objects.
    pub fn live_programs(&self) -> usize {
        self.0.borrow().programs.len()
    }
}

impl RecordingBackend {
    fn record(&mut self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }

    fn next_id(&mut self) -> u32 {
        let mut recording = self.0.borrow_mut();
        recording.next_id += 1;
        recording.next_id
    }
}

impl Backend for RecordingBackend {
    fn create_texture(&mut self) -> TextureId {
        let id = TextureId(self.next_id());
        self.record(Call::CreateTexture(id));
        id
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.record(Call::DeleteTexture(texture));
        self.0.borrow_mut().bound.retain(|_, t| *t != texture);
    }

    fn active_texture(&mut self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
        self.0.borrow_mut().active_unit = unit;
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.record(Call::BindTexture(texture));
        let mut recording = self.0.borrow_mut();
        let unit = recording.active_unit;
        match texture {
            Some(t) => { recording.bound.insert(unit, t); },
            None => { recording.bound.remove(&unit); },
        }
    }

    fn tex_image_2d(&mut self, width: u32, height: u32, pixels: &[u8]) {
        assert_eq!(pixels.len(), width as usize * height as usize * 4);
        assert!(self.0.borrow().bound.contains_key(&self.0.borrow().active_unit));
        self.0.borrow_mut().uploaded = pixels.to_vec();
        self.record(Call::TexImage2d { width, height });
    }

    fn tex_parameter(&mut self, parameter: TextureParameter) {
        self.record(Call::TexParameter(parameter));
    }

    fn generate_mipmap(&mut self) {
        self.record(Call::GenerateMipmap);
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str)
                      -> Result<ShaderId, ProgramCreationError>
    {
        self.record(Call::CompileShader(stage));

        if source.contains("invalid") {
            return Err(ProgramCreationError::CompilationError(
                "0:1: syntax error near `invalid`".to_owned()));
        }

        let id = ShaderId(self.next_id());
        self.0.borrow_mut().shaders.insert(id, (stage, source.to_owned()));
        Ok(id)
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId)
                    -> Result<ProgramId, ProgramCreationError>
    {
        let id = ProgramId(self.next_id());

        let (vertex, fragment) = {
            let recording = self.0.borrow();
            let vertex = recording.shaders[&vertex].clone();
            let fragment = recording.shaders[&fragment].clone();
            assert_eq!(vertex.0, ShaderStage::Vertex);
            assert_eq!(fragment.0, ShaderStage::Fragment);
            (vertex.1, fragment.1)
        };

        if !vertex.contains("main") || !fragment.contains("main") {
            return Err(ProgramCreationError::LinkingError("missing main()".to_owned()));
        }

        let mut uniforms = Vec::new();
        declared_uniforms(&vertex, &mut uniforms);
        declared_uniforms(&fragment, &mut uniforms);

        self.0.borrow_mut().programs.insert(id, SimulatedProgram {
            vertex,
            fragment,
            uniforms,
            values: HashMap::new(),
        });

        self.record(Call::LinkProgram(id));
        Ok(id)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.record(Call::DeleteShader(shader));
        self.0.borrow_mut().shaders.remove(&shader);
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.record(Call::DeleteProgram(program));
        let mut recording = self.0.borrow_mut();
        recording.programs.remove(&program);
        if recording.current_program == Some(program) {
            recording.current_program = None;
        }
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.record(Call::UseProgram(program));
        self.0.borrow_mut().current_program = program;
    }

    fn get_uniform_location(&mut self, program: ProgramId, name: &str)
                            -> Option<UniformLocation>
    {
        let recording = self.0.borrow();
        let index = recording.programs[&program].uniforms.iter().position(|u| u == name)?;
        Some(UniformLocation(index as i32))
    }

    fn uniform(&mut self, location: UniformLocation, value: &RawUniformValue) {
        self.record(Call::Uniform(location, *value));

        let mut recording = self.0.borrow_mut();
        let current = recording.current_program.expect("glUniform without a program in use");
        let program = recording.programs.get_mut(&current).unwrap();
        let name = program.uniforms[location.0 as usize].clone();
        program.values.insert(name, *value);
    }

    fn set_blend_enabled(&mut self, enabled: bool) {
        self.record(Call::SetBlendEnabled(enabled));
        self.0.borrow_mut().blend = enabled;
    }

    fn blend_func(&mut self, source: LinearBlendingFactor, destination: LinearBlendingFactor) {
        self.record(Call::BlendFunc(source, destination));
    }

    fn blend_equation(&mut self, equation: BlendEquation) {
        self.record(Call::BlendEquation(equation));
    }

    fn depth_mask(&mut self, write: bool) {
        self.record(Call::DepthMask(write));
        self.0.borrow_mut().depth_mask = write;
    }
}
