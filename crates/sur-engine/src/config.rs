/// Bootstrap parameters for [`Sur`](crate::Sur).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurConfig {
    /// Discover and compile shader sets during bootstrap.
    ///
    /// When `false` the bootstrap only acquires a context and leaves the
    /// shader-set collection empty.
    pub init_shaders: bool,

    /// Context ids requested from the surface, in order. The first id that
    /// yields a context wins.
    pub context_ids: Vec<String>,
}

impl SurConfig {
    pub const DEFAULT_CONTEXT_IDS: [&'static str; 2] = ["webgl", "experimental-webgl"];

    pub fn with_init_shaders(mut self, init_shaders: bool) -> Self {
        self.init_shaders = init_shaders;
        self
    }

    pub fn with_context_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for SurConfig {
    fn default() -> Self {
        Self {
            init_shaders: true,
            context_ids: Self::DEFAULT_CONTEXT_IDS.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_webgl_then_experimental() {
        let config = SurConfig::default();
        assert!(config.init_shaders);
        assert_eq!(config.context_ids, ["webgl", "experimental-webgl"]);
    }

    #[test]
    fn builder_overrides() {
        let config = SurConfig::default()
            .with_init_shaders(false)
            .with_context_ids(["webgl2"]);
        assert!(!config.init_shaders);
        assert_eq!(config.context_ids, ["webgl2"]);
    }
}
