//! The bootstrap object: one graphics context plus the shader sets compiled
//! against it.

use std::fmt;

use crate::config::SurConfig;
use crate::error::{Result, SurError};
use crate::gl::{ContextSource, GlContext};
use crate::shader::{ShaderNode, ShaderSet, ShaderSetCollection, compile_shader_sets, discover};

pub struct Sur<C: GlContext> {
    gl: C,
    shader_sets: ShaderSetCollection<C>,
}

/// Short alias for [`Sur`].
pub type S<C> = Sur<C>;

impl<C: GlContext> Sur<C> {
    /// Acquires a context from `surface`, then (unless disabled in `config`)
    /// discovers shader sets among `nodes` and compiles them all.
    ///
    /// Context ids are tried in `config.context_ids` order; when none yields a
    /// context the error lists every id tried. Any pipeline failure aborts
    /// the bootstrap.
    pub fn new<Src, I>(surface: &Src, nodes: I, config: SurConfig) -> Result<Self>
    where
        Src: ContextSource<Context = C> + ?Sized,
        I: IntoIterator,
        I::Item: ShaderNode,
    {
        let gl = acquire(surface, &config.context_ids)?;
        let mut sur = Self::with_context(gl);

        if config.init_shaders {
            sur.shader_sets = discover(nodes);
            compile_shader_sets(&sur.gl, &mut sur.shader_sets)?;
        } else {
            log::debug!("shader initialization disabled");
        }

        Ok(sur)
    }

    /// Like [`Sur::new`], reading shader nodes from the `<script>` elements
    /// of an HTML document.
    pub fn from_markup<Src>(surface: &Src, html: &str, config: SurConfig) -> Result<Self>
    where
        Src: ContextSource<Context = C> + ?Sized,
    {
        let doc = sur_markup::parse_str(html)?;
        Self::new(surface, doc.elements_by_tag("script"), config)
    }

    /// Wraps an already acquired context with no shader sets.
    pub fn with_context(gl: C) -> Self {
        Self {
            gl,
            shader_sets: ShaderSetCollection::new(),
        }
    }

    pub fn gl(&self) -> &C {
        &self.gl
    }

    pub fn shader_sets(&self) -> &ShaderSetCollection<C> {
        &self.shader_sets
    }

    pub fn shader_sets_mut(&mut self) -> &mut ShaderSetCollection<C> {
        &mut self.shader_sets
    }

    pub fn shader_set(&self, name: &str) -> Option<&ShaderSet<C>> {
        self.shader_sets.get(name)
    }

    /// The linked program of set `name`.
    pub fn program(&self, name: &str) -> Option<C::Program> {
        self.shader_sets.get(name).and_then(|set| set.program)
    }

    /// Compiles the sets added through [`Sur::shader_sets_mut`] since the
    /// last compile. Sets that are already linked keep their program.
    pub fn compile_shader_sets(&mut self) -> Result<()> {
        compile_shader_sets(&self.gl, &mut self.shader_sets)
    }

    pub fn into_parts(self) -> (C, ShaderSetCollection<C>) {
        (self.gl, self.shader_sets)
    }
}

impl<C: GlContext + fmt::Debug> fmt::Debug for Sur<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sur")
            .field("gl", &self.gl)
            .field("shader_sets", &self.shader_sets)
            .finish()
    }
}

fn acquire<Src>(surface: &Src, ids: &[String]) -> Result<Src::Context>
where
    Src: ContextSource + ?Sized,
{
    for id in ids {
        match surface.context(id) {
            Some(gl) => {
                log::info!("acquired '{id}' context");
                return Ok(gl);
            }
            None => log::debug!("surface has no '{id}' context"),
        }
    }
    log::error!("no graphics context available");
    Err(SurError::Environment { tried: ids.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::headless::{HeadlessCanvas, HeadlessContext};
    use crate::shader::{ScriptNode, ShaderRole};

    const VS: &str = "attribute vec4 aPosition; void main() { gl_Position = aPosition; }";
    const FS: &str = "precision mediump float; uniform vec4 uFragColor; void main() { gl_FragColor = uFragColor; }";

    #[test]
    fn compiles_discovered_sets() {
        let canvas = HeadlessCanvas::new();
        let sur = Sur::new(
            &canvas,
            [ScriptNode::vertex("test", VS), ScriptNode::fragment("test", FS)],
            SurConfig::default(),
        )
        .unwrap();
        assert!(sur.program("test").is_some());
        assert_eq!(sur.shader_set("test").unwrap().attribute("aPosition"), Some(0));
        assert_eq!(sur.gl().program_count(), 1);
    }

    #[test]
    fn first_matching_id_wins() {
        let canvas = HeadlessCanvas::with_context_ids(["experimental-webgl"]);
        let sur: Sur<HeadlessContext> = Sur::new(&canvas, Vec::<ScriptNode>::new(), SurConfig::default()).unwrap();
        assert!(sur.shader_sets().is_empty());
    }

    #[test]
    fn environment_error_lists_tried_ids() {
        let canvas = HeadlessCanvas::unsupported();
        let err = Sur::new(&canvas, Vec::<ScriptNode>::new(), SurConfig::default()).unwrap_err();
        match err {
            SurError::Environment { tried } => assert_eq!(tried, ["webgl", "experimental-webgl"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn late_sets_compile_on_demand() {
        let canvas = HeadlessCanvas::new();
        let mut sur = Sur::new(
            &canvas,
            [ScriptNode::vertex("test", VS), ScriptNode::fragment("test", FS)],
            SurConfig::default(),
        )
        .unwrap();
        let test = sur.program("test");

        sur.shader_sets_mut().get_or_create("late").set_source(ShaderRole::Vertex, VS);
        sur.shader_sets_mut().get_or_create("late").set_source(ShaderRole::Fragment, FS);
        sur.compile_shader_sets().unwrap();
        assert!(sur.program("late").is_some());
        assert_eq!(sur.program("test"), test);
        assert_eq!(sur.gl().program_count(), 2);
    }
}
