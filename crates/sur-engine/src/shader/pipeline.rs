use crate::error::{Result, SurError};
use crate::gl::GlContext;

use super::compile::{compile_shader, link_program};
use super::reflect::reflect;
use super::role::ShaderRole;
use super::set::{ShaderSet, ShaderSetCollection};

/// Compiles, links and reflects one shader set in place.
///
/// Fails with [`SurError::MissingShader`] before touching the context when a
/// role has no source. Stages compile vertex first, so with two broken
/// shaders the vertex error is the one reported. A set that is already
/// linked is left as it is.
pub fn compile_shader_set<C: GlContext>(gl: &C, set: &mut ShaderSet<C>) -> Result<()> {
    if set.is_linked() {
        log::trace!("shader set '{}' is already linked", set.name);
        return Ok(());
    }

    let (Some(vertex), Some(fragment)) = (
        set.sources.get(ShaderRole::Vertex),
        set.sources.get(ShaderRole::Fragment),
    ) else {
        let role = if set.sources.contains(ShaderRole::Vertex) { ShaderRole::Fragment } else { ShaderRole::Vertex };
        log::warn!("shader set '{}' has no {role} shader", set.name);
        return Err(SurError::MissingShader { set: set.name.clone(), role });
    };

    let vertex = compile_shader(gl, &set.name, &vertex.text, ShaderRole::Vertex)?;
    set.compiled.insert(ShaderRole::Vertex, vertex);
    let fragment = compile_shader(gl, &set.name, &fragment.text, ShaderRole::Fragment)?;
    set.compiled.insert(ShaderRole::Fragment, fragment);

    let program = link_program(gl, &set.name, vertex, fragment)?;
    set.program = Some(program);

    let params = reflect(gl, program);
    set.attributes = params.attributes;
    set.uniforms = params.uniforms;

    log::debug!(
        "compiled shader set '{}' ({} attribute(s), {} uniform(s))",
        set.name,
        set.attributes.len(),
        set.uniforms.len()
    );
    Ok(())
}

/// Compiles every set of `sets` in insertion order.
///
/// The collection is validated up front: each entry must be keyed by its
/// own non-empty program name, otherwise [`SurError::InvalidCollection`].
/// The first failing set aborts the batch; sets compiled before it keep
/// their programs and reflected tables, later sets are left untouched.
/// Sets linked by an earlier call keep their program.
pub fn compile_shader_sets<C: GlContext>(gl: &C, sets: &mut ShaderSetCollection<C>) -> Result<()> {
    validate_collection(sets)?;

    for (_, set) in sets.iter_mut() {
        compile_shader_set(gl, set)?;
    }

    log::info!("compiled {} shader set(s)", sets.len());
    Ok(())
}

fn validate_collection<C: GlContext>(sets: &ShaderSetCollection<C>) -> Result<()> {
    match sets.iter().find(|(key, set)| key.is_empty() || *key != set.name) {
        Some((key, set)) => Err(SurError::InvalidCollection {
            key: key.to_string(),
            name: set.name.clone(),
        }),
        None => Ok(()),
    }
}
