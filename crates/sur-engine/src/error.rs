//! Error taxonomy for context acquisition and the shader pipeline.
//!
//! Every failure is returned to the immediate caller; nothing is retried.

use thiserror::Error;

use crate::shader::ShaderRole;

pub type Result<T, E = SurError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SurError {
    /// The surface handed out no graphics context for any requested id.
    #[error("no graphics context available (tried {})", .tried.join(", "))]
    Environment { tried: Vec<String> },

    /// The context rejected a shader; `log` is its info log.
    #[error("shader compilation error in '{set}' ({role}): {log}")]
    Compilation {
        set: String,
        role: ShaderRole,
        log: String,
    },

    /// The context rejected a program; `log` is its info log.
    #[error("program link error in '{set}': {log}")]
    Link { set: String, log: String },

    /// A shader set lacks one of the two required stages.
    #[error("missing shader: set '{set}' has no {role} shader; shader sets require both a vertex and a fragment shader")]
    MissingShader { set: String, role: ShaderRole },

    /// A collection entry is not keyed by its own program name.
    #[error("invalid shader set collection: entry keyed '{key}' holds set '{name}'")]
    InvalidCollection { key: String, name: String },

    /// The context could not allocate a shader or program object.
    #[error("graphics context error: {0}")]
    Context(String),

    #[error(transparent)]
    Markup(#[from] sur_markup::ParseError),
}

impl SurError {
    /// Name of the shader set the error belongs to, if any.
    pub fn set_name(&self) -> Option<&str> {
        match self {
            SurError::Compilation { set, .. }
            | SurError::Link { set, .. }
            | SurError::MissingShader { set, .. } => Some(set),
            SurError::InvalidCollection { key, .. } => Some(key),
            _ => None,
        }
    }
}
