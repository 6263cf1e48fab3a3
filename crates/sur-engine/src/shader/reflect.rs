use std::collections::HashMap;
use std::fmt;

use crate::gl::GlContext;

/// Which family of program parameters to enumerate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParameterKind {
    Attribute,
    Uniform,
}

impl ParameterKind {
    pub fn active_count<C: GlContext>(self, gl: &C, program: C::Program) -> u32 {
        match self {
            ParameterKind::Attribute => gl.active_attribute_count(program),
            ParameterKind::Uniform => gl.active_uniform_count(program),
        }
    }

    /// Names of the active parameters, in the order the context reports them.
    pub fn active_names<C: GlContext>(self, gl: &C, program: C::Program) -> Vec<String> {
        (0..self.active_count(gl, program))
            .filter_map(|index| match self {
                ParameterKind::Attribute => gl.active_attribute(program, index),
                ParameterKind::Uniform => gl.active_uniform(program, index),
            })
            .map(|p| p.name)
            .collect()
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ParameterKind::Attribute => "attribute",
            ParameterKind::Uniform => "uniform",
        })
    }
}

/// Name → location tables for a linked program.
pub struct ProgramParameters<C: GlContext> {
    pub attributes: HashMap<String, u32>,
    pub uniforms: HashMap<String, C::UniformLocation>,
}

impl<C: GlContext> fmt::Debug for ProgramParameters<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramParameters")
            .field("attributes", &self.attributes)
            .field("uniforms", &self.uniforms)
            .finish()
    }
}

/// Collects the active attributes and uniforms of a linked `program`.
///
/// Parameters the context reports but cannot locate are left out.
pub fn reflect<C: GlContext>(gl: &C, program: C::Program) -> ProgramParameters<C> {
    let mut attributes = HashMap::new();
    for name in ParameterKind::Attribute.active_names(gl, program) {
        match gl.attribute_location(program, &name) {
            Some(location) => {
                log::trace!("attribute '{name}' -> {location}");
                attributes.insert(name, location);
            }
            None => log::trace!("attribute '{name}' has no location"),
        }
    }

    let mut uniforms = HashMap::new();
    for name in ParameterKind::Uniform.active_names(gl, program) {
        match gl.uniform_location(program, &name) {
            Some(location) => {
                log::trace!("uniform '{name}' -> {location:?}");
                uniforms.insert(name, location);
            }
            None => log::trace!("uniform '{name}' has no location"),
        }
    }

    ProgramParameters { attributes, uniforms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::headless::HeadlessContext;
    use crate::shader::compile::{compile_shader, link_program};
    use crate::shader::ShaderRole;

    fn linked(gl: &HeadlessContext, vs: &str, fs: &str) -> <HeadlessContext as GlContext>::Program {
        let v = compile_shader(gl, "t", vs, ShaderRole::Vertex).unwrap();
        let f = compile_shader(gl, "t", fs, ShaderRole::Fragment).unwrap();
        link_program(gl, "t", v, f).unwrap()
    }

    #[test]
    fn kinds_dispatch_to_their_queries() {
        let gl = HeadlessContext::new();
        let p = linked(
            &gl,
            "attribute vec3 aPos; attribute vec3 aNormal; varying vec3 vN; void main() { vN = aNormal; gl_Position = vec4(aPos, 1.0); }",
            "precision mediump float; uniform vec3 uLight; varying vec3 vN; void main() { gl_FragColor = vec4(vN * uLight, 1.0); }",
        );
        assert_eq!(ParameterKind::Attribute.active_count(&gl, p), 2);
        assert_eq!(ParameterKind::Uniform.active_count(&gl, p), 1);
        assert_eq!(ParameterKind::Attribute.active_names(&gl, p), ["aPos", "aNormal"]);
        assert_eq!(ParameterKind::Uniform.active_names(&gl, p), ["uLight"]);
    }

    #[test]
    fn reflects_locations() {
        let gl = HeadlessContext::new();
        let p = linked(
            &gl,
            "attribute vec4 aPosition; uniform mat4 uMvp; void main() { gl_Position = uMvp * aPosition; }",
            "precision mediump float; uniform vec4 uColors[3]; void main() { gl_FragColor = uColors[1]; }",
        );
        let params = reflect(&gl, p);
        assert_eq!(params.attributes.len(), 1);
        assert_eq!(params.attributes["aPosition"], 0);
        assert_eq!(params.uniforms.len(), 2);
        assert!(params.uniforms.contains_key("uMvp"));
        assert!(params.uniforms.contains_key("uColors[0]"));
    }

    #[test]
    fn program_without_parameters_reflects_empty() {
        let gl = HeadlessContext::new();
        let p = linked(
            &gl,
            "void main() { gl_Position = vec4(0.0); }",
            "void main() { gl_FragColor = vec4(1.0); }",
        );
        let params = reflect(&gl, p);
        assert!(params.attributes.is_empty());
        assert!(params.uniforms.is_empty());
    }
}
