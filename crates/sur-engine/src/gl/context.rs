use std::fmt::Debug;

/// One active attribute or uniform as reported by the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveParameter {
    pub name: String,
    /// Array length; 1 for non-array parameters.
    pub size: i32,
    /// GL type enum (`FLOAT_VEC4`, `SAMPLER_2D`, ...).
    pub gl_type: u32,
}

/// The slice of a WebGL-style context the shader pipeline needs.
///
/// Methods take `&self` as WebGL and `glow` do; implementations that keep
/// state use interior mutability. Handles are cheap copies of opaque ids.
pub trait GlContext {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type UniformLocation: Clone + Debug;

    // ── Shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, stage: u32) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    // ── Programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;

    // ── Reflection ────────────────────────────────────────────────────────

    fn active_attribute_count(&self, program: Self::Program) -> u32;
    fn active_attribute(&self, program: Self::Program, index: u32) -> Option<ActiveParameter>;
    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    fn active_uniform_count(&self, program: Self::Program) -> u32;
    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveParameter>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
}

/// A canvas-like surface that hands out graphics contexts by id
/// (`"webgl"`, `"experimental-webgl"`, ...).
pub trait ContextSource {
    type Context: GlContext;

    /// Returns `None` when the surface does not support `id`.
    fn context(&self, id: &str) -> Option<Self::Context>;
}
