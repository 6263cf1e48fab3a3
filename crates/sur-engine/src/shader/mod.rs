//! Shader-set discovery and the compile → link → reflect pipeline.
//!
//! Intended usage:
//! - [`discover`] (or [`discover_document`]) groups markup nodes into sets
//! - [`compile_shader_sets`] builds a program per set and fills in the
//!   attribute/uniform location tables

mod compile;
mod discovery;
mod pipeline;
mod reflect;
mod role;
mod set;

pub use compile::{compile_shader, link_program};
pub use discovery::{discover, discover_document, ScriptNode, ShaderNode};
pub use pipeline::{compile_shader_set, compile_shader_sets};
pub use reflect::{reflect, ParameterKind, ProgramParameters};
pub use role::{RoleMap, ShaderRole};
pub use set::{ShaderSet, ShaderSetCollection, ShaderSource};
