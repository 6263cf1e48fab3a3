use std::collections::HashMap;
use std::fmt;

use crate::gl::GlContext;

use super::role::{RoleMap, ShaderRole};

/// Shader text read from markup. Never mutated after discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub role: ShaderRole,
    pub text: String,
}

/// Everything known about one named program.
///
/// Populated in stages: `sources` by discovery, then `compiled`, `program`,
/// and finally the reflected `attributes` / `uniforms`.
pub struct ShaderSet<C: GlContext> {
    pub name: String,
    pub sources: RoleMap<ShaderSource>,
    pub compiled: RoleMap<C::Shader>,
    pub program: Option<C::Program>,
    pub attributes: HashMap<String, u32>,
    pub uniforms: HashMap<String, C::UniformLocation>,
}

impl<C: GlContext> ShaderSet<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: RoleMap::default(),
            compiled: RoleMap::default(),
            program: None,
            attributes: HashMap::new(),
            uniforms: HashMap::new(),
        }
    }

    /// Records `text` under `role`; a later source for the same role wins.
    pub fn set_source(&mut self, role: ShaderRole, text: impl Into<String>) {
        self.sources.insert(role, ShaderSource { role, text: text.into() });
    }

    pub fn with_source(mut self, role: ShaderRole, text: impl Into<String>) -> Self {
        self.set_source(role, text);
        self
    }

    pub fn source(&self, role: ShaderRole) -> Option<&str> {
        self.sources.get(role).map(|s| s.text.as_str())
    }

    /// Both roles have source text.
    pub fn is_compile_ready(&self) -> bool {
        self.sources.is_complete()
    }

    /// Both roles compiled successfully.
    pub fn is_link_ready(&self) -> bool {
        self.compiled.is_complete()
    }

    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    pub fn uniform(&self, name: &str) -> Option<&C::UniformLocation> {
        self.uniforms.get(name)
    }
}

impl<C: GlContext> fmt::Debug for ShaderSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderSet")
            .field("name", &self.name)
            .field("sources", &self.sources)
            .field("compiled", &self.compiled)
            .field("program", &self.program)
            .field("attributes", &self.attributes)
            .field("uniforms", &self.uniforms)
            .finish()
    }
}

/// Shader sets keyed by program name, in insertion (document) order.
pub struct ShaderSetCollection<C: GlContext> {
    entries: Vec<(String, ShaderSet<C>)>,
    index: HashMap<String, usize>,
}

impl<C: GlContext> Default for ShaderSetCollection<C> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<C: GlContext> ShaderSetCollection<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&ShaderSet<C>> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ShaderSet<C>> {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Inserts `set` under `key`. An existing key keeps its position and
    /// the replaced set is returned.
    pub fn insert(&mut self, key: impl Into<String>, set: ShaderSet<C>) -> Option<ShaderSet<C>> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, set)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, set));
                None
            }
        }
    }

    /// The set named `name`, created empty (and appended) if absent.
    pub fn get_or_create(&mut self, name: &str) -> &mut ShaderSet<C> {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.insert(name, ShaderSet::new(name));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShaderSet<C>)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ShaderSet<C>)> {
        self.entries.iter_mut().map(|(k, s)| (k.as_str(), s))
    }
}

impl<C: GlContext> fmt::Debug for ShaderSetCollection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
