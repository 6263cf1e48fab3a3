use std::borrow::Cow;

use sur_markup::{Document, Element};

use crate::gl::GlContext;

use super::role::ShaderRole;
use super::set::ShaderSetCollection;

/// A markup node that may carry shader source.
pub trait ShaderNode {
    /// The node's declared `type` (e.g. `"vertex-shader"`).
    fn node_type(&self) -> Option<Cow<'_, str>>;
    /// The program name the node belongs to (`data-name`).
    fn name(&self) -> Option<Cow<'_, str>>;
    /// Raw shader source.
    fn text(&self) -> Cow<'_, str>;
}

/// A shader node built in code rather than read from a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptNode {
    pub node_type: Option<String>,
    pub name: Option<String>,
    pub text: String,
}

impl ScriptNode {
    pub fn new(node_type: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            node_type: Some(node_type.into()),
            name: Some(name.into()),
            text: text.into(),
        }
    }

    pub fn vertex(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ShaderRole::Vertex.tag(), name, text)
    }

    pub fn fragment(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ShaderRole::Fragment.tag(), name, text)
    }
}

impl ShaderNode for ScriptNode {
    fn node_type(&self) -> Option<Cow<'_, str>> {
        self.node_type.as_deref().map(Cow::Borrowed)
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.name.as_deref().map(Cow::Borrowed)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

impl ShaderNode for Element {
    fn node_type(&self) -> Option<Cow<'_, str>> {
        self.attr("type").map(Cow::Borrowed)
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        self.dataset("name").map(Cow::Borrowed)
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(Element::text(self))
    }
}

impl<N: ShaderNode + ?Sized> ShaderNode for &N {
    fn node_type(&self) -> Option<Cow<'_, str>> {
        (**self).node_type()
    }

    fn name(&self) -> Option<Cow<'_, str>> {
        (**self).name()
    }

    fn text(&self) -> Cow<'_, str> {
        (**self).text()
    }
}

/// Groups shader nodes into sets by program name.
///
/// Nodes whose type is not exactly a shader role tag are ignored; nodes
/// without a (non-empty) name are skipped. A repeated name + role replaces
/// the earlier text. Missing roles are left for compilation to report.
pub fn discover<C, I>(nodes: I) -> ShaderSetCollection<C>
where
    C: GlContext,
    I: IntoIterator,
    I::Item: ShaderNode,
{
    let mut sets = ShaderSetCollection::new();

    for node in nodes {
        let Some(role) = node.node_type().as_deref().and_then(ShaderRole::from_tag) else {
            continue;
        };
        let name = match node.name() {
            Some(name) if !name.is_empty() => name,
            _ => {
                log::trace!("skipping unnamed {role} shader node");
                continue;
            }
        };

        let set = sets.get_or_create(&name);
        if set.sources.contains(role) {
            log::debug!("shader set '{name}': later {role} source replaces the earlier one");
        }
        set.set_source(role, node.text());
    }

    log::debug!("discovered {} shader set(s)", sets.len());
    sets
}

/// Runs [`discover`] over every `<script>` element of `doc`, in document order.
pub fn discover_document<C: GlContext>(doc: &Document) -> ShaderSetCollection<C> {
    discover(doc.elements_by_tag("script"))
}
