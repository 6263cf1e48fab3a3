use crate::error::{Result, SurError};
use crate::gl::GlContext;

use super::role::ShaderRole;

/// Compiles `source` as a `role` shader.
///
/// `label` names the owning shader set in errors. A rejected shader yields
/// [`SurError::Compilation`] with the context's info log; the shader object
/// stays allocated.
pub fn compile_shader<C: GlContext>(gl: &C, label: &str, source: &str, role: ShaderRole) -> Result<C::Shader> {
    let shader = gl.create_shader(role.gl_stage()).map_err(SurError::Context)?;

    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.shader_compile_status(shader) {
        let log = gl.shader_info_log(shader);
        log::warn!("'{label}': {role} shader failed to compile: {}", log.trim_end());
        return Err(SurError::Compilation {
            set: label.to_string(),
            role,
            log,
        });
    }

    Ok(shader)
}

/// Links a compiled vertex and fragment shader into a program.
///
/// Both handles must come from successful [`compile_shader`] calls.
pub fn link_program<C: GlContext>(gl: &C, label: &str, vertex: C::Shader, fragment: C::Shader) -> Result<C::Program> {
    let program = gl.create_program().map_err(SurError::Context)?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    if !gl.program_link_status(program) {
        let log = gl.program_info_log(program);
        log::warn!("'{label}': program failed to link: {}", log.trim_end());
        return Err(SurError::Link {
            set: label.to_string(),
            log,
        });
    }

    Ok(program)
}
