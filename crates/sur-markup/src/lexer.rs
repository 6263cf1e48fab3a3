use crate::ast::Attr;
use crate::error::{line_col, ParseError};

/// Elements whose content is kept verbatim up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartTag {
        name: String,
        attrs: Vec<Attr>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
    // Sentinel
    Eof,
}

/// A token plus the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    /// Set after a raw-text start tag; the next token is its verbatim content.
    raw_text_of: Option<String>,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, raw_text_of: None }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let (tok, at) = self.next_token()?;
            let eof = tok == Token::Eof;
            let (line, col) = line_col(self.src, at);
            tokens.push(TokenWithPos { token: tok, line, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.rest().chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn err(&self, msg: impl Into<String>, at: usize) -> ParseError {
        ParseError::at(msg, self.src, at)
    }

    /// Produces the next token and the byte offset where it starts.
    /// Comments and declarations are skipped, so the offset is the token's own.
    fn next_token(&mut self) -> Result<(Token, usize), ParseError> {
        let start = self.pos;
        if let Some(tag) = self.raw_text_of.take() {
            return Ok((self.lex_raw_text(&tag)?, start));
        }

        loop {
            let start = self.pos;
            let rest = self.rest();
            if rest.is_empty() {
                return Ok((Token::Eof, start));
            }

            if rest.starts_with("<!--") {
                self.skip_comment()?;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                // `<!DOCTYPE html>` and processing instructions carry nothing we need.
                let start = self.pos;
                match rest.find('>') {
                    Some(end) => self.pos += end + 1,
                    None => return Err(self.err("unterminated markup declaration", start)),
                }
            } else if rest.starts_with("</") {
                return Ok((self.lex_end_tag()?, start));
            } else if starts_tag(rest) {
                return Ok((self.lex_start_tag()?, start));
            } else {
                return Ok((self.lex_text(), start));
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match self.rest()[4..].find("-->") {
            Some(end) => {
                self.pos += 4 + end + 3;
                Ok(())
            }
            None => Err(self.err("unterminated comment", start)),
        }
    }

    fn lex_text(&mut self) -> Token {
        let start = self.pos;
        // A `<` that does not open a tag is ordinary text.
        self.advance();
        while let Some(c) = self.peek() {
            if c == '<' && (starts_tag(self.rest()) || self.rest().starts_with("</") || self.rest().starts_with("<!")) {
                break;
            }
            self.advance();
        }
        Token::Text(decode_entities(&self.src[start..self.pos]))
    }

    fn lex_raw_text(&mut self, tag: &str) -> Result<Token, ParseError> {
        let start = self.pos;
        let close = format!("</{tag}");
        match find_ignore_ascii_case(self.rest(), &close) {
            Some(end) => {
                self.pos += end;
                Ok(Token::Text(self.src[start..self.pos].to_string()))
            }
            None => Err(self.err(format!("unterminated <{tag}> element"), start)),
        }
    }

    fn lex_name(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')) {
            self.advance();
        }
        self.src[start..self.pos].to_ascii_lowercase()
    }

    fn lex_end_tag(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.advance(); self.advance(); // consume `</`
        let name = self.lex_name();
        if name.is_empty() {
            return Err(self.err("expected a tag name after '</'", start));
        }
        self.skip_whitespace();
        match self.advance() {
            Some('>') => Ok(Token::EndTag(name)),
            _ => Err(self.err(format!("unterminated end tag </{name}>"), start)),
        }
    }

    fn lex_start_tag(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.advance(); // consume `<`
        let name = self.lex_name();
        let mut attrs = Vec::new();

        let self_closing = loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.err(format!("unterminated start tag <{name}>"), start)),
                Some('>') => { self.advance(); break false; }
                Some('/') if self.rest().starts_with("/>") => {
                    self.advance(); self.advance();
                    break true;
                }
                Some('/') => { self.advance(); }
                Some(_) => attrs.push(self.lex_attr()?),
            }
        };

        if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.raw_text_of = Some(name.clone());
        }

        Ok(Token::StartTag { name, attrs, self_closing })
    }

    fn lex_attr(&mut self) -> Result<Attr, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'')) {
            self.advance();
        }
        if self.pos == start {
            let bad = self.advance().unwrap_or('\0');
            return Err(self.err(format!("unexpected {bad:?} in tag"), start));
        }
        let name = self.src[start..self.pos].to_ascii_lowercase();

        self.skip_whitespace();
        if self.peek() != Some('=') {
            return Ok(Attr { name, value: String::new() });
        }
        self.advance(); // consume `=`
        self.skip_whitespace();

        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                let quote_at = self.pos;
                self.advance();
                let body = self.pos;
                match self.rest().find(q) {
                    Some(end) => {
                        self.pos += end + 1;
                        decode_entities(&self.src[body..body + end])
                    }
                    None => return Err(self.err(format!("unterminated value for attribute '{name}'"), quote_at)),
                }
            }
            _ => {
                let body = self.pos;
                while matches!(self.peek(), Some(c) if !c.is_whitespace() && c != '>') {
                    self.advance();
                }
                decode_entities(&self.src[body..self.pos])
            }
        };

        Ok(Attr { name, value })
    }
}

fn starts_tag(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next() == Some('<') && matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Decodes the basic named entities plus numeric references.
/// Unknown entities are left untouched.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => numeric_entity(entity),
            }?;
            Some((ch, semi + 1))
        });
        match decoded {
            Some((ch, len)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
