//! Lexer and parser for the HTML subset that carries **Sur** shader scripts.
//!
//! This crate is dependency-free so markup can be scanned by tooling without
//! pulling in any graphics or browser bindings.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Document`, `Node`, `Element`, `Attr` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |
//!
//! # Quick start
//!
//! ```rust
//! use sur_markup::parse_str;
//!
//! let src = r#"
//!     <script type="vertex-shader" data-name="flat">
//!         attribute vec4 aPosition;
//!         void main() { gl_Position = aPosition; }
//!     </script>
//! "#;
//!
//! let doc = parse_str(src).unwrap();
//! let scripts = doc.elements_by_tag("script");
//! assert_eq!(scripts[0].dataset("name"), Some("flat"));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Attr, Document, Element, Node};
pub use error::ParseError;
pub use parser::parse_str;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> Document { parse_str(src).unwrap() }
    fn err(src: &str) -> ParseError { parse_str(src).unwrap_err() }

    #[test] fn empty_document() { assert!(ok("").children.is_empty()); }
    #[test] fn doctype_and_comments_are_skipped() {
        let doc = ok("<!DOCTYPE html><!-- header --><html></html><!-- tail -->");
        assert_eq!(doc.children.len(), 1);
    }
    #[test] fn nested_elements() {
        let doc = ok("<html><head><title>t</title></head><body><div><p>x</p></div></body></html>");
        let names: Vec<_> = doc.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["html", "head", "title", "body", "div", "p"]);
    }
    #[test] fn tag_names_are_case_insensitive() {
        let doc = ok("<SCRIPT Type='x-shader'></Script>");
        let el = &doc.elements_by_tag("script")[0];
        assert_eq!(el.attr("TYPE"), Some("x-shader"));
    }
    #[test] fn attribute_forms() {
        let doc = ok(r#"<input a="1" b='2' c=3 d>"#);
        let el = doc.elements().next().unwrap();
        assert_eq!(el.attr("a"), Some("1"));
        assert_eq!(el.attr("b"), Some("2"));
        assert_eq!(el.attr("c"), Some("3"));
        assert_eq!(el.attr("d"), Some(""));
        assert_eq!(el.attr("e"), None);
    }
    #[test] fn void_and_self_closing_elements() {
        let doc = ok("<div><br><img src=x /><meta charset=utf-8></div>");
        assert_eq!(doc.elements().count(), 4);
    }
    #[test] fn entities_in_text_and_attrs() {
        let doc = ok(r#"<p title="a &amp; b">&lt;tag&gt; &#65;&#x42; &bogus;</p>"#);
        let p = doc.elements().next().unwrap();
        assert_eq!(p.attr("title"), Some("a & b"));
        assert_eq!(p.text(), "<tag> AB &bogus;");
    }
    #[test] fn script_content_is_raw() {
        let doc = ok("<script>if (a < b && c > d) { x = '&amp;'; }</script>");
        let s = &doc.elements_by_tag("script")[0];
        assert_eq!(s.text(), "if (a < b && c > d) { x = '&amp;'; }");
        assert!(s.children.iter().all(|n| matches!(n, Node::Text(_))));
    }
    #[test] fn script_end_tag_is_case_insensitive() {
        let doc = ok("<script>void main() {}</SCRIPT>");
        assert_eq!(doc.elements_by_tag("script")[0].text(), "void main() {}");
    }
    #[test] fn empty_script() {
        let doc = ok("<script></script>");
        assert!(doc.elements_by_tag("script")[0].children.is_empty());
    }
    #[test] fn dataset_lookup() {
        let doc = ok(r#"<script data-name="prog" data-extra-key="v"></script>"#);
        let s = &doc.elements_by_tag("script")[0];
        assert_eq!(s.dataset("name"), Some("prog"));
        assert_eq!(s.dataset("extra-key"), Some("v"));
    }
    #[test] fn stray_less_than_is_text() {
        let doc = ok("<p>1 < 2</p>");
        assert_eq!(doc.elements().next().unwrap().text(), "1 < 2");
    }
    #[test] fn scripts_in_document_order() {
        let doc = ok(r#"<head><script id=a></script></head><body><div><script id=b></script></div><script id=c></script></body>"#);
        let ids: Vec<_> = doc.elements_by_tag("script").iter().filter_map(|s| s.attr("id")).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
    #[test] fn err_unclosed_element() {
        let e = err("<div>\n  <p>text</p>");
        assert_eq!((e.line, e.col), (1, 1));
        assert!(e.message.contains("<div>"));
    }
    #[test] fn err_mismatched_end_tag() {
        let e = err("<div><p></div>");
        assert_eq!((e.line, e.col), (1, 9));
    }
    #[test] fn err_unexpected_end_tag() { err("</div>"); }
    #[test] fn err_unterminated_script() { err("<script>void main() {}"); }
    #[test] fn err_unterminated_comment() { err("<!-- never ends"); }
    #[test] fn err_unterminated_attribute() { err(r#"<div class="oops></div>"#); }
    #[test] fn err_position_on_second_line() {
        let e = err("<div>\n</span>");
        assert_eq!((e.line, e.col), (2, 1));
    }
}
