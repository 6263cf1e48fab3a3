//! A software [`GlContext`] that needs no GPU.
//!
//! Compilation runs the GLSL ES 1.00 checks in [`glsl`]; linking matches the
//! two stages' interfaces the way a WebGL implementation would and assigns
//! locations. Info logs use the `ERROR: 0:<line>: '<token>' : <message>`
//! shape browsers report.

mod glsl;

use std::cell::RefCell;

use super::{ActiveParameter, ContextSource, GlContext, MAX_VERTEX_ATTRIBS};
use glsl::{Interface, Stage, Storage};

// ── Handles ───────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HeadlessShader(u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HeadlessProgram(u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct HeadlessUniformLocation {
    program: u32,
    index: u32,
}

// ── Objects ───────────────────────────────────────────────────────────────

#[derive(Debug)]
enum CompileState {
    Pending,
    Compiled(Interface),
    Failed(String),
}

#[derive(Debug)]
struct ShaderObject {
    stage: Stage,
    source: String,
    state: CompileState,
}

#[derive(Debug, Clone)]
struct LinkedParameter {
    name: String,
    size: i32,
    gl_type: u32,
}

#[derive(Debug, Default)]
struct LinkedProgram {
    /// Active attributes; the index is the attribute location.
    attributes: Vec<LinkedParameter>,
    /// Active uniforms; the index is the uniform location id.
    uniforms: Vec<LinkedParameter>,
}

#[derive(Debug)]
enum LinkState {
    Pending,
    Linked(LinkedProgram),
    Failed(String),
}

#[derive(Debug)]
struct ProgramObject {
    attached: Vec<HeadlessShader>,
    state: LinkState,
}

#[derive(Debug, Default)]
struct Objects {
    shaders: Vec<ShaderObject>,
    programs: Vec<ProgramObject>,
    lost: bool,
}

// ── Context ───────────────────────────────────────────────────────────────

/// Software graphics context. Object ids start at 1; 0 is never handed out.
#[derive(Debug, Default)]
pub struct HeadlessContext {
    objects: RefCell<Objects>,
}

impl HeadlessContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates `WEBGL_lose_context`: every later object allocation fails.
    pub fn lose_context(&self) {
        self.objects.borrow_mut().lost = true;
    }

    pub fn is_context_lost(&self) -> bool {
        self.objects.borrow().lost
    }

    /// Number of shader objects allocated so far.
    pub fn shader_count(&self) -> usize {
        self.objects.borrow().shaders.len()
    }

    /// Number of program objects allocated so far.
    pub fn program_count(&self) -> usize {
        self.objects.borrow().programs.len()
    }

    /// Source last set on `shader`, if the handle is valid.
    pub fn shader_source_of(&self, shader: HeadlessShader) -> Option<String> {
        let objects = self.objects.borrow();
        objects.shaders.get(slot(shader.0)).map(|s| s.source.clone())
    }

    fn with_linked<T>(&self, program: HeadlessProgram, f: impl FnOnce(&LinkedProgram) -> T) -> Option<T> {
        let objects = self.objects.borrow();
        match &objects.programs.get(slot(program.0))?.state {
            LinkState::Linked(linked) => Some(f(linked)),
            _ => None,
        }
    }
}

fn slot(id: u32) -> usize {
    (id as usize).wrapping_sub(1)
}

fn next_id(len: usize) -> u32 {
    u32::try_from(len + 1).unwrap_or(u32::MAX)
}

impl GlContext for HeadlessContext {
    type Shader = HeadlessShader;
    type Program = HeadlessProgram;
    type UniformLocation = HeadlessUniformLocation;

    fn create_shader(&self, stage: u32) -> Result<HeadlessShader, String> {
        let mut objects = self.objects.borrow_mut();
        if objects.lost {
            return Err("context lost".to_string());
        }
        let stage = Stage::from_gl(stage).ok_or_else(|| format!("invalid shader type 0x{stage:04X}"))?;
        objects.shaders.push(ShaderObject {
            stage,
            source: String::new(),
            state: CompileState::Pending,
        });
        Ok(HeadlessShader(next_id(objects.shaders.len() - 1)))
    }

    fn shader_source(&self, shader: HeadlessShader, source: &str) {
        if let Some(obj) = self.objects.borrow_mut().shaders.get_mut(slot(shader.0)) {
            obj.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: HeadlessShader) {
        if let Some(obj) = self.objects.borrow_mut().shaders.get_mut(slot(shader.0)) {
            obj.state = match glsl::compile(&obj.source, obj.stage) {
                Ok(iface) => CompileState::Compiled(iface),
                Err(e) => CompileState::Failed(format!("{e}\n")),
            };
        }
    }

    fn shader_compile_status(&self, shader: HeadlessShader) -> bool {
        let objects = self.objects.borrow();
        matches!(objects.shaders.get(slot(shader.0)).map(|s| &s.state), Some(CompileState::Compiled(_)))
    }

    fn shader_info_log(&self, shader: HeadlessShader) -> String {
        let objects = self.objects.borrow();
        match objects.shaders.get(slot(shader.0)).map(|s| &s.state) {
            Some(CompileState::Failed(log)) => log.clone(),
            _ => String::new(),
        }
    }

    fn create_program(&self) -> Result<HeadlessProgram, String> {
        let mut objects = self.objects.borrow_mut();
        if objects.lost {
            return Err("context lost".to_string());
        }
        objects.programs.push(ProgramObject {
            attached: Vec::new(),
            state: LinkState::Pending,
        });
        Ok(HeadlessProgram(next_id(objects.programs.len() - 1)))
    }

    fn attach_shader(&self, program: HeadlessProgram, shader: HeadlessShader) {
        if let Some(obj) = self.objects.borrow_mut().programs.get_mut(slot(program.0)) {
            if !obj.attached.contains(&shader) {
                obj.attached.push(shader);
            }
        }
    }

    fn link_program(&self, program: HeadlessProgram) {
        let mut objects = self.objects.borrow_mut();
        let Some(attached) = objects.programs.get(slot(program.0)).map(|p| p.attached.clone()) else {
            return;
        };

        let result = {
            let shaders: Vec<&ShaderObject> = attached
                .iter()
                .filter_map(|s| objects.shaders.get(slot(s.0)))
                .collect();
            link(&shaders)
        };

        if let Some(obj) = objects.programs.get_mut(slot(program.0)) {
            obj.state = match result {
                Ok(linked) => LinkState::Linked(linked),
                Err(log) => LinkState::Failed(log),
            };
        }
    }

    fn program_link_status(&self, program: HeadlessProgram) -> bool {
        self.with_linked(program, |_| ()).is_some()
    }

    fn program_info_log(&self, program: HeadlessProgram) -> String {
        let objects = self.objects.borrow();
        match objects.programs.get(slot(program.0)).map(|p| &p.state) {
            Some(LinkState::Failed(log)) => log.clone(),
            _ => String::new(),
        }
    }

    fn active_attribute_count(&self, program: HeadlessProgram) -> u32 {
        self.with_linked(program, |p| p.attributes.len() as u32).unwrap_or(0)
    }

    fn active_attribute(&self, program: HeadlessProgram, index: u32) -> Option<ActiveParameter> {
        self.with_linked(program, |p| p.attributes.get(index as usize).map(to_active))
            .flatten()
    }

    fn attribute_location(&self, program: HeadlessProgram, name: &str) -> Option<u32> {
        self.with_linked(program, |p| {
            p.attributes.iter().position(|a| a.name == name).map(|i| i as u32)
        })
        .flatten()
    }

    fn active_uniform_count(&self, program: HeadlessProgram) -> u32 {
        self.with_linked(program, |p| p.uniforms.len() as u32).unwrap_or(0)
    }

    fn active_uniform(&self, program: HeadlessProgram, index: u32) -> Option<ActiveParameter> {
        self.with_linked(program, |p| p.uniforms.get(index as usize).map(to_active))
            .flatten()
    }

    fn uniform_location(&self, program: HeadlessProgram, name: &str) -> Option<HeadlessUniformLocation> {
        self.with_linked(program, |p| {
            // Arrays answer to both `name` and `name[0]`.
            p.uniforms
                .iter()
                .position(|u| u.name == name || u.name.strip_suffix("[0]") == Some(name))
                .map(|i| HeadlessUniformLocation { program: program.0, index: i as u32 })
        })
        .flatten()
    }
}

fn to_active(p: &LinkedParameter) -> ActiveParameter {
    ActiveParameter { name: p.name.clone(), size: p.size, gl_type: p.gl_type }
}

// ── Linking ───────────────────────────────────────────────────────────────

fn link(shaders: &[&ShaderObject]) -> Result<LinkedProgram, String> {
    let stage_of = |stage: Stage| -> Result<&Interface, String> {
        let mut found = shaders.iter().filter(|s| s.stage == stage);
        let what = if stage == Stage::Vertex { "vertex" } else { "fragment" };
        let shader = match (found.next(), found.next()) {
            (Some(s), None) => s,
            (None, _) => return Err(format!("error: no {what} shader attached\n")),
            (Some(_), Some(_)) => return Err(format!("error: more than one {what} shader attached\n")),
        };
        match &shader.state {
            CompileState::Compiled(iface) => Ok(iface),
            _ => Err(format!("error: attached {what} shader is not compiled\n")),
        }
    };
    let vertex = stage_of(Stage::Vertex)?;
    let fragment = stage_of(Stage::Fragment)?;

    for varying in fragment.declared(Storage::Varying).filter(|v| fragment.is_used(&v.name)) {
        match vertex.find(Storage::Varying, &varying.name) {
            None => {
                return Err(format!(
                    "error: varying '{}' used in the fragment shader is not declared in the vertex shader\n",
                    varying.name
                ));
            }
            Some(v) if v.ty != varying.ty => {
                return Err(format!("error: types of varying '{}' differ between shaders\n", varying.name));
            }
            Some(_) => {}
        }
    }

    for uniform in fragment.declared(Storage::Uniform) {
        if let Some(v) = vertex.find(Storage::Uniform, &uniform.name) {
            if v.ty != uniform.ty || v.array_len != uniform.array_len {
                return Err(format!("error: types of uniform '{}' differ between shaders\n", uniform.name));
            }
        }
    }

    let attributes: Vec<LinkedParameter> = vertex
        .declared(Storage::Attribute)
        .filter(|a| vertex.is_used(&a.name))
        .map(|a| LinkedParameter { name: a.name.clone(), size: 1, gl_type: a.gl_type })
        .collect();
    if attributes.len() > MAX_VERTEX_ATTRIBS {
        return Err(format!(
            "error: too many active attributes ({} > MAX_VERTEX_ATTRIBS {})\n",
            attributes.len(),
            MAX_VERTEX_ATTRIBS
        ));
    }

    let mut uniforms: Vec<LinkedParameter> = Vec::new();
    for iface in [vertex, fragment] {
        for u in iface.declared(Storage::Uniform).filter(|u| iface.is_used(&u.root)) {
            let name = match u.array_len {
                Some(_) => format!("{}[0]", u.name),
                None => u.name.clone(),
            };
            if uniforms.iter().all(|seen| seen.name != name) {
                let size = u.array_len.map_or(1, |n| n as i32);
                uniforms.push(LinkedParameter { name, size, gl_type: u.gl_type });
            }
        }
    }

    Ok(LinkedProgram { attributes, uniforms })
}

// ── Canvas ────────────────────────────────────────────────────────────────

/// A [`ContextSource`] handing out fresh [`HeadlessContext`]s.
#[derive(Debug, Clone)]
pub struct HeadlessCanvas {
    supported: Vec<String>,
}

impl HeadlessCanvas {
    /// Supports both `"webgl"` and `"experimental-webgl"`.
    pub fn new() -> Self {
        Self::with_context_ids(["webgl", "experimental-webgl"])
    }

    pub fn with_context_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { supported: ids.into_iter().map(Into::into).collect() }
    }

    /// A canvas with no graphics support at all.
    pub fn unsupported() -> Self {
        Self { supported: Vec::new() }
    }
}

impl Default for HeadlessCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextSource for HeadlessCanvas {
    type Context = HeadlessContext;

    fn context(&self, id: &str) -> Option<HeadlessContext> {
        self.supported.iter().any(|s| s == id).then(HeadlessContext::new)
    }
}
