//! Sur: a small convenience layer over WebGL-style contexts.
//!
//! - [`Sur`] acquires a context from a canvas-like surface and compiles the
//!   shader sets declared in markup
//! - [`shader`] holds discovery and the compile → link → reflect pipeline
//! - [`frame`] drives per-frame callbacks with elapsed seconds
//!
//! Everything is written against [`gl::GlContext`], so the same pipeline runs
//! on WebGL (wasm32, see `web`), native GL through `glow`, or the software
//! [`gl::headless`] context.

pub mod config;
pub mod error;
pub mod frame;
pub mod gl;
pub mod logging;
pub mod shader;
mod sur;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SurConfig;
pub use error::{Result, SurError};
pub use frame::{run_loop, FrameHost, LoopControl};
pub use shader::{compile_shader_set, compile_shader_sets, discover, ShaderRole, ShaderSet, ShaderSetCollection};
pub use sur::{Sur, S};
