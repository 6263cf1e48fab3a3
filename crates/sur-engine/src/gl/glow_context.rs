use glow::HasContext;

use super::{ActiveParameter, GlContext};

/// [`GlContext`] over any `glow` context: native GL/GLES or, on wasm32, WebGL.
pub struct GlowContext<G> {
    gl: G,
}

impl<G: HasContext> GlowContext<G> {
    pub fn new(gl: G) -> Self {
        Self { gl }
    }

    /// The wrapped `glow` context, for callers that go on to render.
    pub fn raw(&self) -> &G {
        &self.gl
    }

    pub fn into_inner(self) -> G {
        self.gl
    }
}

// SAFETY: every handle passed back in was created by `self.gl`.
impl<G: HasContext> GlContext for GlowContext<G> {
    type Shader = G::Shader;
    type Program = G::Program;
    type UniformLocation = G::UniformLocation;

    fn create_shader(&self, stage: u32) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(stage) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn active_attribute_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl.get_active_attributes(program) }
    }

    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveParameter> {
        unsafe { self.gl.get_active_attribute(program, index) }.map(|a| ActiveParameter {
            name: a.name,
            size: a.size,
            gl_type: a.atype,
        })
    }

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn active_uniform_count(&self, program: Self::Program) -> u32 {
        unsafe { self.gl.get_active_uniforms(program) }
    }

    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveParameter> {
        unsafe { self.gl.get_active_uniform(program, index) }.map(|u| ActiveParameter {
            name: u.name,
            size: u.size,
            gl_type: u.utype,
        })
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }
}
