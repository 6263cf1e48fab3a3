//! GLSL ES 1.00 front end for the headless context.
//!
//! This is not a compiler. It tokenizes the source, checks the structure a
//! real front end would reject first (balanced brackets, statement ends,
//! stray tokens, `main`), and extracts the `attribute`/`uniform`/`varying`
//! interface plus the set of identifiers the code refers to.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::gl;

/// `(type name, GL type enum)` for the built-in types a declaration may use.
const TYPES: &[(&str, u32)] = &[
    ("float", gl::FLOAT),
    ("vec2", gl::FLOAT_VEC2),
    ("vec3", gl::FLOAT_VEC3),
    ("vec4", gl::FLOAT_VEC4),
    ("int", gl::INT),
    ("ivec2", gl::INT_VEC2),
    ("ivec3", gl::INT_VEC3),
    ("ivec4", gl::INT_VEC4),
    ("bool", gl::BOOL),
    ("bvec2", gl::BOOL_VEC2),
    ("bvec3", gl::BOOL_VEC3),
    ("bvec4", gl::BOOL_VEC4),
    ("mat2", gl::FLOAT_MAT2),
    ("mat3", gl::FLOAT_MAT3),
    ("mat4", gl::FLOAT_MAT4),
    ("sampler2D", gl::SAMPLER_2D),
    ("samplerCube", gl::SAMPLER_CUBE),
];

/// Types allowed for `attribute` and `varying` declarations.
const FLOAT_TYPES: &[&str] = &["float", "vec2", "vec3", "vec4", "mat2", "mat3", "mat4"];

const PRECISIONS: &[&str] = &["lowp", "mediump", "highp"];

/// Words that may be directly followed by an identifier besides type names.
const PREFIX_KEYWORDS: &[&str] = &[
    "void", "const", "in", "out", "inout", "invariant", "return", "else",
    "struct", "lowp", "mediump", "highp",
];

pub(crate) fn gl_type_of(ty: &str) -> Option<u32> {
    TYPES.iter().find(|(name, _)| *name == ty).map(|(_, t)| *t)
}

// ── Diagnostics ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompileError {
    pub line: usize,
    pub token: String,
    pub message: String,
}

impl CompileError {
    fn new(line: usize, token: impl Into<String>, message: impl Into<String>) -> Self {
        Self { line, token: token.into(), message: message.into() }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: 0:{}: '{}' : {}", self.line, self.token, self.message)
    }
}

// ── Interface ─────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub fn from_gl(stage: u32) -> Option<Self> {
        match stage {
            gl::VERTEX_SHADER => Some(Stage::Vertex),
            gl::FRAGMENT_SHADER => Some(Stage::Fragment),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Storage {
    Attribute,
    Uniform,
    Varying,
}

impl Storage {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "attribute" => Some(Storage::Attribute),
            "uniform" => Some(Storage::Uniform),
            "varying" => Some(Storage::Varying),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Declaration {
    pub storage: Storage,
    pub ty: String,
    pub gl_type: u32,
    /// Full parameter name; struct uniforms flatten to one declaration per
    /// basic-typed member (`uLight.color`, `uLights[1].color`).
    pub name: String,
    /// The declared variable the parameter belongs to.
    pub root: String,
    pub array_len: Option<u32>,
}

/// A member of a user-defined struct type.
#[derive(Debug, Clone, PartialEq)]
struct Field {
    ty: String,
    name: String,
    array_len: Option<u32>,
}

/// What a successfully checked shader exposes to the linker.
#[derive(Debug, Clone, Default)]
pub(crate) struct Interface {
    pub declarations: Vec<Declaration>,
    /// Identifiers referenced outside their own declarations.
    pub used: HashSet<String>,
}

impl Interface {
    pub fn declared(&self, storage: Storage) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(move |d| d.storage == storage)
    }

    pub fn find(&self, storage: Storage, name: &str) -> Option<&Declaration> {
        self.declared(storage).find(|d| d.name == name)
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }
}

// ── Lexer ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Number(String),
    Punct(char),
}

impl Tok {
    fn text(&self) -> String {
        match self {
            Tok::Ident(s) | Tok::Number(s) => s.clone(),
            Tok::Punct(c) => c.to_string(),
        }
    }

    fn is_punct(&self, c: char) -> bool {
        *self == Tok::Punct(c)
    }

    fn ident(&self) -> Option<&str> {
        match self {
            Tok::Ident(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Lexed {
    tok: Tok,
    line: usize,
}

const PUNCT: &str = "+-*/%=<>!&|^~?:;,.(){}[]";

fn lex(src: &str) -> Result<Vec<Lexed>, CompileError> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    let mut line = 1;
    let mut line_start = true;

    while i < chars.len() {
        let c = chars[i];
        if c == '\n' {
            line += 1;
            line_start = true;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Preprocessor directives run to the end of the line.
        if c == '#' {
            if !line_start {
                return Err(CompileError::new(line, "#", "invalid character"));
            }
            let start = i;
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            let directive: String = chars[start + 1..i].iter().collect();
            check_directive(directive.trim(), line)?;
            continue;
        }
        line_start = false;

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let opened = line;
            i += 2;
            loop {
                match chars.get(i) {
                    None => return Err(CompileError::new(opened, "/*", "unterminated comment")),
                    Some('*') if chars.get(i + 1) == Some(&'/') => {
                        i += 2;
                        break;
                    }
                    Some('\n') => {
                        line += 1;
                        i += 1;
                    }
                    Some(_) => i += 1,
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Lexed { tok: Tok::Ident(chars[start..i].iter().collect()), line });
            continue;
        }

        let starts_number = c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()));
        if starts_number {
            let start = i;
            while i < chars.len() {
                let d = chars[i];
                if d.is_ascii_alphanumeric() || d == '.' {
                    i += 1;
                } else if matches!(d, '+' | '-') && matches!(chars[i - 1], 'e' | 'E') && !is_hex(&chars[start..i]) {
                    i += 1;
                } else {
                    break;
                }
            }
            out.push(Lexed { tok: Tok::Number(chars[start..i].iter().collect()), line });
            continue;
        }

        if PUNCT.contains(c) {
            out.push(Lexed { tok: Tok::Punct(c), line });
            i += 1;
            continue;
        }

        return Err(CompileError::new(line, c.to_string(), "invalid character"));
    }

    Ok(out)
}

fn is_hex(digits: &[char]) -> bool {
    digits.len() > 1 && digits[0] == '0' && matches!(digits[1], 'x' | 'X')
}

fn check_directive(directive: &str, line: usize) -> Result<(), CompileError> {
    let mut words = directive.split_whitespace();
    if words.next() == Some("version") {
        let version = words.next().unwrap_or("");
        if version != "100" {
            return Err(CompileError::new(line, version, "version number not supported"));
        }
    }
    Ok(())
}

// ── Checker ───────────────────────────────────────────────────────────────

struct Checker<'t> {
    toks: &'t [Lexed],
    pos: usize,
    stage: Stage,
    /// Open brackets with the line they were opened on.
    brackets: Vec<(char, usize)>,
    structs: HashMap<String, Vec<Field>>,
    has_main: bool,
    iface: Interface,
}

/// Checks `src` as a shader of `stage` and returns its interface.
pub(crate) fn compile(src: &str, stage: Stage) -> Result<Interface, CompileError> {
    let toks = lex(src)?;
    let mut checker = Checker {
        toks: &toks,
        pos: 0,
        stage,
        brackets: Vec::new(),
        structs: HashMap::new(),
        has_main: false,
        iface: Interface::default(),
    };
    checker.run()?;
    Ok(checker.iface)
}

impl<'t> Checker<'t> {
    fn peek(&self) -> Option<&'t Lexed> {
        self.toks.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'t Tok> {
        self.toks.get(self.pos + offset).map(|l| &l.tok)
    }

    fn prev(&self) -> Option<&'t Tok> {
        self.pos.checked_sub(1).and_then(|p| self.toks.get(p)).map(|l| &l.tok)
    }

    fn last_line(&self) -> usize {
        self.toks.last().map_or(1, |l| l.line)
    }

    fn syntax_error(&self, at: &Lexed) -> CompileError {
        CompileError::new(at.line, at.tok.text(), "syntax error")
    }

    fn eof_error(&self) -> CompileError {
        CompileError::new(self.last_line(), "", "syntax error: unexpected end of file")
    }

    fn next(&mut self) -> Result<&'t Lexed, CompileError> {
        let lexed = self.peek().ok_or_else(|| self.eof_error())?;
        self.pos += 1;
        Ok(lexed)
    }

    fn is_type_name(&self, word: &str) -> bool {
        gl_type_of(word).is_some() || self.structs.contains_key(word)
    }

    fn run(&mut self) -> Result<(), CompileError> {
        while let Some(lexed) = self.peek() {
            let at_top = self.brackets.is_empty();
            match lexed.tok.ident() {
                Some(word) if Storage::from_keyword(word).is_some() => {
                    if !at_top {
                        return Err(self.syntax_error(lexed));
                    }
                    self.declaration()?;
                }
                Some("precision") if at_top => self.precision_statement()?,
                Some("struct") => self.struct_definition()?,
                _ => self.general()?,
            }
        }

        if let Some(&(open, line)) = self.brackets.last() {
            return Err(CompileError::new(line, open.to_string(), "syntax error: unexpected end of file"));
        }
        if let Some(last) = self.toks.last() {
            if !(last.tok.is_punct(';') || last.tok.is_punct('}')) {
                return Err(self.eof_error());
            }
        }
        if !self.has_main {
            return Err(CompileError::new(self.last_line(), "", "Missing main()"));
        }
        Ok(())
    }

    /// `attribute|uniform|varying [precision] type name ([N])? (, name ([N])?)* ;`
    fn declaration(&mut self) -> Result<(), CompileError> {
        let keyword = self.next()?;
        let storage = keyword.tok.ident().and_then(Storage::from_keyword).ok_or_else(|| self.syntax_error(keyword))?;
        if storage == Storage::Attribute && self.stage == Stage::Fragment {
            return Err(CompileError::new(keyword.line, "attribute", "supported in vertex shaders only"));
        }

        let mut ty_tok = self.next()?;
        if ty_tok.tok.ident().is_some_and(|w| PRECISIONS.contains(&w)) {
            ty_tok = self.next()?;
        }
        let ty = ty_tok.tok.ident().ok_or_else(|| self.syntax_error(ty_tok))?;
        if !self.is_type_name(ty) {
            return Err(self.syntax_error(ty_tok));
        }
        if storage != Storage::Uniform && !FLOAT_TYPES.contains(&ty) {
            let what = if storage == Storage::Attribute { "attribute" } else { "varying" };
            return Err(CompileError::new(ty_tok.line, what, format!("cannot be {ty}")));
        }

        loop {
            let (name_tok, name, array_len) = self.declarator()?;
            if self.iface.declarations.iter().any(|d| d.root == name) {
                return Err(CompileError::new(name_tok.line, name, "redefinition"));
            }

            let mut params = Vec::new();
            match array_len {
                Some(n) if self.structs.contains_key(ty) => {
                    for i in 0..n {
                        self.flatten(&format!("{name}[{i}]"), ty, None, &mut params);
                    }
                }
                _ => self.flatten(name, ty, array_len, &mut params),
            }
            for (param, ty, gl_type, array_len) in params {
                self.iface.declarations.push(Declaration {
                    storage,
                    ty,
                    gl_type,
                    name: param,
                    root: name.to_string(),
                    array_len,
                });
            }

            let sep = self.next()?;
            if sep.tok.is_punct(';') {
                return Ok(());
            }
            if !sep.tok.is_punct(',') {
                return Err(self.syntax_error(sep));
            }
        }
    }

    /// `name ([N])?` in a declaration or struct member list.
    fn declarator(&mut self) -> Result<(&'t Lexed, &'t str, Option<u32>), CompileError> {
        let name_tok = self.next()?;
        let name = name_tok.tok.ident().ok_or_else(|| self.syntax_error(name_tok))?;
        if name.starts_with("gl_") {
            return Err(CompileError::new(name_tok.line, name, "reserved built-in name"));
        }
        if self.is_type_name(name) || PREFIX_KEYWORDS.contains(&name) {
            return Err(self.syntax_error(name_tok));
        }

        let mut array_len = None;
        if self.peek().is_some_and(|l| l.tok.is_punct('[')) {
            self.pos += 1;
            let len_tok = self.next()?;
            let len = match &len_tok.tok {
                Tok::Number(n) => n.parse::<u32>().ok().filter(|n| *n > 0),
                _ => None,
            };
            array_len = Some(len.ok_or_else(|| CompileError::new(len_tok.line, len_tok.tok.text(), "array size must be a positive integer constant"))?);
            let close = self.next()?;
            if !close.tok.is_punct(']') {
                return Err(self.syntax_error(close));
            }
        }
        Ok((name_tok, name, array_len))
    }

    /// Expands `name` of type `ty` into `(name, type, GL type, array length)`
    /// entries for every basic-typed leaf, naming members the way
    /// `getActiveUniform` does.
    fn flatten(&self, name: &str, ty: &str, array_len: Option<u32>, out: &mut Vec<(String, String, u32, Option<u32>)>) {
        let Some(fields) = self.structs.get(ty) else {
            if let Some(gl_type) = gl_type_of(ty) {
                out.push((name.to_string(), ty.to_string(), gl_type, array_len));
            }
            return;
        };
        for field in fields {
            let member = format!("{name}.{}", field.name);
            match field.array_len {
                Some(n) if self.structs.contains_key(&field.ty) => {
                    for i in 0..n {
                        self.flatten(&format!("{member}[{i}]"), &field.ty, None, out);
                    }
                }
                len => self.flatten(&member, &field.ty, len, out),
            }
        }
    }

    /// `struct Name { ([precision] type name ([N])? (, name ([N])?)* ;)+ }`
    ///
    /// Any declarator after the closing brace is left to [`Self::general`].
    fn struct_definition(&mut self) -> Result<(), CompileError> {
        self.pos += 1; // consume `struct`
        let (name_tok, name, array_len) = self.declarator()?;
        if array_len.is_some() {
            return Err(self.syntax_error(name_tok));
        }
        let open = self.next()?;
        if !open.tok.is_punct('{') {
            return Err(self.syntax_error(open));
        }

        let mut fields: Vec<Field> = Vec::new();
        loop {
            let mut ty_tok = self.next()?;
            if ty_tok.tok.is_punct('}') {
                if fields.is_empty() {
                    return Err(self.syntax_error(ty_tok));
                }
                break;
            }
            if ty_tok.tok.ident().is_some_and(|w| PRECISIONS.contains(&w)) {
                ty_tok = self.next()?;
            }
            let ty = ty_tok.tok.ident().filter(|w| self.is_type_name(w)).ok_or_else(|| self.syntax_error(ty_tok))?;

            loop {
                let (field_tok, field, array_len) = self.declarator()?;
                if fields.iter().any(|f| f.name == field) {
                    return Err(CompileError::new(field_tok.line, field, "redefinition"));
                }
                fields.push(Field { ty: ty.to_string(), name: field.to_string(), array_len });

                let sep = self.next()?;
                if sep.tok.is_punct(';') {
                    break;
                }
                if !sep.tok.is_punct(',') {
                    return Err(self.syntax_error(sep));
                }
            }
        }

        self.structs.insert(name.to_string(), fields);
        Ok(())
    }

    /// `precision (lowp|mediump|highp) type ;`
    fn precision_statement(&mut self) -> Result<(), CompileError> {
        self.pos += 1; // consume `precision`
        let qualifier = self.next()?;
        if !qualifier.tok.ident().is_some_and(|w| PRECISIONS.contains(&w)) {
            return Err(self.syntax_error(qualifier));
        }
        let ty = self.next()?;
        if !ty.tok.ident().is_some_and(|w| matches!(w, "float" | "int" | "sampler2D" | "samplerCube")) {
            return Err(self.syntax_error(ty));
        }
        let semi = self.next()?;
        if !semi.tok.is_punct(';') {
            return Err(self.syntax_error(semi));
        }
        Ok(())
    }

    /// Any token outside a declaration: bracket balance, adjacency, `main`.
    fn general(&mut self) -> Result<(), CompileError> {
        let lexed = self.peek().ok_or_else(|| self.eof_error())?;
        let prev = self.prev();

        match &lexed.tok {
            Tok::Punct(c @ ('{' | '(' | '[')) => {
                self.brackets.push((*c, lexed.line));
            }
            Tok::Punct(c @ ('}' | ')' | ']')) => {
                let expected = match c {
                    '}' => '{',
                    ')' => '(',
                    _ => '[',
                };
                match self.brackets.pop() {
                    Some((open, _)) if open == expected => {}
                    _ => return Err(self.syntax_error(lexed)),
                }
                // A block ends after a complete statement.
                if *c == '}' && !prev.is_some_and(|p| p.is_punct(';') || p.is_punct('}') || p.is_punct('{')) {
                    return Err(self.syntax_error(lexed));
                }
            }
            Tok::Ident(word) => {
                if let Some(Tok::Ident(p)) = prev {
                    if !(self.is_type_name(p) || PREFIX_KEYWORDS.contains(&p.as_str())) {
                        return Err(self.syntax_error(lexed));
                    }
                }
                if matches!(prev, Some(Tok::Number(_))) {
                    return Err(self.syntax_error(lexed));
                }
                if word == "main" && self.brackets.is_empty() && prev.and_then(Tok::ident) == Some("void") {
                    self.has_main |= self.main_signature_follows();
                }
                self.iface.used.insert(word.clone());
            }
            Tok::Number(_) => {
                let allowed = match prev {
                    Some(Tok::Ident(p)) => matches!(p.as_str(), "return" | "else"),
                    Some(Tok::Number(_)) => false,
                    _ => true,
                };
                if !allowed {
                    return Err(self.syntax_error(lexed));
                }
            }
            Tok::Punct(_) => {}
        }

        self.pos += 1;
        Ok(())
    }

    /// With the cursor on `main`: `( )` or `( void )` followed by `{`.
    fn main_signature_follows(&self) -> bool {
        let is = |offset, c| self.peek_at(offset).is_some_and(|t| t.is_punct(c));
        if !is(1, '(') {
            return false;
        }
        let close = if self.peek_at(2).and_then(Tok::ident) == Some("void") { 3 } else { 2 };
        is(close, ')') && is(close + 1, '{')
    }
}
