//! Graphics-context seam.
//!
//! This module is responsible for:
//! - the [`GlContext`] contract the shader pipeline is written against
//! - [`ContextSource`], the canvas-like surface contexts are acquired from
//! - the `glow` adapter ([`GlowContext`]) for real GL / WebGL contexts
//! - [`headless`], a software context used by tests and tooling

mod context;
mod glow_context;
pub mod headless;

pub use context::{ActiveParameter, ContextSource, GlContext};
pub use glow_context::GlowContext;

// Shader stages.
pub const FRAGMENT_SHADER: u32 = 0x8B30;
pub const VERTEX_SHADER: u32 = 0x8B31;

// Active parameter types.
pub const INT: u32 = 0x1404;
pub const FLOAT: u32 = 0x1406;
pub const FLOAT_VEC2: u32 = 0x8B50;
pub const FLOAT_VEC3: u32 = 0x8B51;
pub const FLOAT_VEC4: u32 = 0x8B52;
pub const INT_VEC2: u32 = 0x8B53;
pub const INT_VEC3: u32 = 0x8B54;
pub const INT_VEC4: u32 = 0x8B55;
pub const BOOL: u32 = 0x8B56;
pub const BOOL_VEC2: u32 = 0x8B57;
pub const BOOL_VEC3: u32 = 0x8B58;
pub const BOOL_VEC4: u32 = 0x8B59;
pub const FLOAT_MAT2: u32 = 0x8B5A;
pub const FLOAT_MAT3: u32 = 0x8B5B;
pub const FLOAT_MAT4: u32 = 0x8B5C;
pub const SAMPLER_2D: u32 = 0x8B5E;
pub const SAMPLER_CUBE: u32 = 0x8B60;

/// Minimum `MAX_VERTEX_ATTRIBS` a WebGL implementation must support.
pub const MAX_VERTEX_ATTRIBS: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_constants_match_glow() {
        assert_eq!(VERTEX_SHADER, glow::VERTEX_SHADER);
        assert_eq!(FRAGMENT_SHADER, glow::FRAGMENT_SHADER);
        assert_eq!(FLOAT_VEC4, glow::FLOAT_VEC4);
        assert_eq!(SAMPLER_2D, glow::SAMPLER_2D);
    }
}
