use crate::ast::{Document, Element, Node};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenWithPos};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "source", "track", "wbr",
];

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: std::vec::IntoIter<TokenWithPos>,
    /// Elements whose end tag has not been seen yet, outermost first.
    open: Vec<Element>,
    root: Vec<Node>,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens: tokens.into_iter(), open: Vec::new(), root: Vec::new() }
    }

    /// Appends a finished node to the innermost open element (or the root).
    fn push_node(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_document(mut self) -> Result<Document, ParseError> {
        while let Some(TokenWithPos { token, line, col }) = self.tokens.next() {
            match token {
                Token::Eof => break,
                Token::Text(text) => {
                    if !text.is_empty() {
                        self.push_node(Node::Text(text));
                    }
                }
                Token::StartTag { name, attrs, self_closing } => {
                    let void = VOID_ELEMENTS.contains(&name.as_str());
                    let el = Element { name, attrs, children: Vec::new(), line, col };
                    if self_closing || void {
                        self.push_node(Node::Element(el));
                    } else {
                        self.open.push(el);
                    }
                }
                Token::EndTag(name) => self.close(&name, line, col)?,
            }
        }

        if let Some(unclosed) = self.open.last() {
            return Err(ParseError::new(
                format!("unclosed <{}> element", unclosed.name),
                unclosed.line,
                unclosed.col,
            ));
        }

        Ok(Document { children: self.root })
    }

    // ── End tag ───────────────────────────────────────────────────────────

    fn close(&mut self, name: &str, line: usize, col: usize) -> Result<(), ParseError> {
        // `</br>`-style end tags for void elements carry no structure.
        if VOID_ELEMENTS.contains(&name) {
            return Ok(());
        }
        match self.open.pop() {
            Some(el) if el.name == name => {
                self.push_node(Node::Element(el));
                Ok(())
            }
            Some(el) => Err(ParseError::new(
                format!("mismatched end tag </{name}>, expected </{}>", el.name),
                line,
                col,
            )),
            None => Err(ParseError::new(
                format!("unexpected end tag </{name}>"),
                line,
                col,
            )),
        }
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse a markup source string into a [`Document`].
pub fn parse_str(src: &str) -> Result<Document, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}
