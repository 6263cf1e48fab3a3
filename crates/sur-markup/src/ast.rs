// ── Document ──────────────────────────────────────────────────────────────

/// A parsed markup document: the top-level sequence of nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Iterates every element of the document depth-first, in source order.
    pub fn elements(&self) -> Elements<'_> {
        Elements::new(&self.children)
    }

    /// All elements named `tag` (case-insensitive), in document order.
    pub fn elements_by_tag<'d>(&'d self, tag: &str) -> Vec<&'d Element> {
        let tag = tag.to_ascii_lowercase();
        self.elements().filter(|el| el.name == tag).collect()
    }
}

// ── Node ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Character data with entities already decoded (raw for `script`/`style`).
    Text(String),
}

// ── Element ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lowercased tag name.
    pub name: String,
    /// Attributes in source order; names lowercased, values decoded.
    /// Bare attributes (`<input disabled>`) carry an empty value.
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
    /// 1-based position of the start tag's `<`.
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Element {
    /// Looks up an attribute value by (case-insensitive) name.
    ///
    /// When an attribute is repeated the first occurrence wins, as in browsers.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// `data-*` lookup: `dataset("name")` reads `data-name`.
    pub fn dataset(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{key}"))
    }

    /// Concatenated text of all descendant text nodes (DOM `textContent`).
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

// ── Traversal ─────────────────────────────────────────────────────────────

/// Pre-order element iterator returned by [`Document::elements`].
pub struct Elements<'d> {
    stack: Vec<std::slice::Iter<'d, Node>>,
}

impl<'d> Elements<'d> {
    fn new(roots: &'d [Node]) -> Self {
        Self { stack: vec![roots.iter()] }
    }
}

impl<'d> Iterator for Elements<'d> {
    type Item = &'d Element;

    fn next(&mut self) -> Option<&'d Element> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                None => { self.stack.pop(); }
                Some(Node::Text(_)) => {}
                Some(Node::Element(el)) => {
                    self.stack.push(el.children.iter());
                    return Some(el);
                }
            }
        }
    }
}
