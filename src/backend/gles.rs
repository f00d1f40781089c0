/*!

Backend implementation for OpenGL ES 2.0 (and desktop contexts exposing the ES 2.0 subset).

The function pointers are loaded once, when the backend is built. The context they were loaded
from must be current on the calling thread for every call made through the backend.

*/
use crate::gl;
use crate::ToGlEnum;

use crate::backend::{Backend, ProgramId, ShaderId, TextureId, UniformLocation};
use crate::draw_parameters::{BlendEquation, LinearBlendingFactor};
use crate::program::{ProgramCreationError, ShaderStage};
use crate::texture::TextureParameter;
use crate::uniforms::RawUniformValue;

use std::ffi::CString;
use std::os::raw::c_void;
use std::ptr;

/// Drives a real OpenGL ES 2.0 context.
pub struct GlesBackend {
    gl: gl::Gles2,
}

impl GlesBackend {
    /// Loads the GL entry points through `get_proc_address`.
    ///
    /// # Safety
    ///
    /// The context that `get_proc_address` resolves symbols for must be current on this thread
    /// now and whenever the returned backend is used.
    pub unsafe fn new<F>(get_proc_address: F) -> GlesBackend
        where F: FnMut(&'static str) -> *const c_void
    {
        GlesBackend {
            gl: gl::Gles2::load_with(get_proc_address),
        }
    }

    unsafe fn shader_info_log(&self, id: gl::types::GLuint) -> String {
        let mut log_size: gl::types::GLint = 0;
        self.gl.GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut log_size);

        let mut log: Vec<u8> = Vec::with_capacity(log_size.max(1) as usize);
        let mut written: gl::types::GLsizei = 0;
        self.gl.GetShaderInfoLog(id, log_size, &mut written, log.as_mut_ptr() as *mut gl::types::GLchar);
        log.set_len(written.max(0) as usize);

        String::from_utf8_lossy(&log).into_owned()
    }

    unsafe fn program_info_log(&self, id: gl::types::GLuint) -> String {
        let mut log_size: gl::types::GLint = 0;
        self.gl.GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut log_size);

        let mut log: Vec<u8> = Vec::with_capacity(log_size.max(1) as usize);
        let mut written: gl::types::GLsizei = 0;
        self.gl.GetProgramInfoLog(id, log_size, &mut written, log.as_mut_ptr() as *mut gl::types::GLchar);
        log.set_len(written.max(0) as usize);

        String::from_utf8_lossy(&log).into_owned()
    }
}

impl Backend for GlesBackend {
    fn create_texture(&mut self) -> TextureId {
        let mut id: gl::types::GLuint = 0;
        unsafe { self.gl.GenTextures(1, &mut id) };
        TextureId(id)
    }

    fn delete_texture(&mut self, texture: TextureId) {
        unsafe { self.gl.DeleteTextures(1, &texture.0) };
    }

    fn active_texture(&mut self, unit: u32) {
        unsafe { self.gl.ActiveTexture(gl::TEXTURE0 + unit) };
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        let id = texture.map(|t| t.0).unwrap_or(0);
        unsafe { self.gl.BindTexture(gl::TEXTURE_2D, id) };
    }

    fn tex_image_2d(&mut self, width: u32, height: u32, pixels: &[u8]) {
        assert_eq!(pixels.len(), width as usize * height as usize * 4);

        unsafe {
            self.gl.PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            self.gl.TexImage2D(gl::TEXTURE_2D, 0, gl::RGBA as gl::types::GLint,
                               width as gl::types::GLsizei, height as gl::types::GLsizei, 0,
                               gl::RGBA, gl::UNSIGNED_BYTE, pixels.as_ptr() as *const c_void);
        }
    }

    fn tex_parameter(&mut self, parameter: TextureParameter) {
        let (name, value) = match parameter {
            TextureParameter::MagnifyFilter(f) => (gl::TEXTURE_MAG_FILTER, f.to_glenum()),
            TextureParameter::MinifyFilter(f) => (gl::TEXTURE_MIN_FILTER, f.to_glenum()),
            TextureParameter::WrapS(w) => (gl::TEXTURE_WRAP_S, w.to_glenum()),
            TextureParameter::WrapT(w) => (gl::TEXTURE_WRAP_T, w.to_glenum()),
        };

        unsafe { self.gl.TexParameteri(gl::TEXTURE_2D, name, value as gl::types::GLint) };
    }

    fn generate_mipmap(&mut self) {
        unsafe { self.gl.GenerateMipmap(gl::TEXTURE_2D) };
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str)
                      -> Result<ShaderId, ProgramCreationError>
    {
        let source = CString::new(source.as_bytes())
            .map_err(|_| ProgramCreationError::CompilationError(
                "shader source contains a nul byte".to_owned()))?;

        unsafe {
            let id = self.gl.CreateShader(stage.to_glenum());
            if id == 0 {
                return Err(ProgramCreationError::ShaderTypeNotSupported);
            }

            self.gl.ShaderSource(id, 1, [source.as_ptr()].as_ptr(), ptr::null());
            self.gl.CompileShader(id);

            let mut success: gl::types::GLint = 0;
            self.gl.GetShaderiv(id, gl::COMPILE_STATUS, &mut success);

            if success == gl::TRUE as gl::types::GLint {
                Ok(ShaderId(id))
            } else {
                let log = self.shader_info_log(id);
                self.gl.DeleteShader(id);
                Err(ProgramCreationError::CompilationError(log))
            }
        }
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId)
                    -> Result<ProgramId, ProgramCreationError>
    {
        unsafe {
            let id = self.gl.CreateProgram();
            self.gl.AttachShader(id, vertex.0);
            self.gl.AttachShader(id, fragment.0);
            self.gl.LinkProgram(id);
            self.gl.DetachShader(id, vertex.0);
            self.gl.DetachShader(id, fragment.0);

            let mut success: gl::types::GLint = 0;
            self.gl.GetProgramiv(id, gl::LINK_STATUS, &mut success);

            if success == gl::TRUE as gl::types::GLint {
                Ok(ProgramId(id))
            } else {
                let log = self.program_info_log(id);
                self.gl.DeleteProgram(id);
                Err(ProgramCreationError::LinkingError(log))
            }
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { self.gl.DeleteShader(shader.0) };
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { self.gl.DeleteProgram(program.0) };
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        let id = program.map(|p| p.0).unwrap_or(0);
        unsafe { self.gl.UseProgram(id) };
    }

    fn get_uniform_location(&mut self, program: ProgramId, name: &str)
                            -> Option<UniformLocation>
    {
        let name = CString::new(name.as_bytes()).ok()?;
        let location = unsafe { self.gl.GetUniformLocation(program.0, name.as_ptr()) };

        if location < 0 {
            None
        } else {
            Some(UniformLocation(location))
        }
    }

    fn uniform(&mut self, location: UniformLocation, value: &RawUniformValue) {
        let location = location.0;

        unsafe {
            match *value {
                RawUniformValue::SignedInt(v) => self.gl.Uniform1i(location, v),
                RawUniformValue::Float(v) => self.gl.Uniform1f(location, v),
                RawUniformValue::Vec2(v) => self.gl.Uniform2fv(location, 1, v.as_ptr()),
                RawUniformValue::Vec3(v) => self.gl.Uniform3fv(location, 1, v.as_ptr()),
                RawUniformValue::Vec4(v) => self.gl.Uniform4fv(location, 1, v.as_ptr()),
                RawUniformValue::Mat3(v) => {
                    self.gl.UniformMatrix3fv(location, 1, gl::FALSE, v.as_ptr() as *const f32)
                },
                RawUniformValue::Mat4(v) => {
                    self.gl.UniformMatrix4fv(location, 1, gl::FALSE, v.as_ptr() as *const f32)
                },
            }
        }
    }

    fn set_blend_enabled(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.Enable(gl::BLEND);
            } else {
                self.gl.Disable(gl::BLEND);
            }
        }
    }

    fn blend_func(&mut self, source: LinearBlendingFactor, destination: LinearBlendingFactor) {
        unsafe { self.gl.BlendFunc(source.to_glenum(), destination.to_glenum()) };
    }

    fn blend_equation(&mut self, equation: BlendEquation) {
        unsafe { self.gl.BlendEquation(equation.to_glenum()) };
    }

    fn depth_mask(&mut self, write: bool) {
        unsafe { self.gl.DepthMask(if write { gl::TRUE } else { gl::FALSE }) };
    }
}
