//! Sanitizer for the rich-text blocks of a product page (description, usage,
//! warnings).
//!
//! The fragment is parsed with an HTML5 parser, so malformed input is repaired
//! rather than rejected, and then re-serialized from the tree keeping only
//! safe structure.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{Html, Node};

/// Elements removed together with their content.
const DROPPED_ELEMENTS: [&str; 3] = ["script", "style", "meta"];

const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

static INTER_TAG_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("valid inter-tag whitespace regex"));

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-line regex"));

/// Attributes that survive sanitization, per element.
fn allowed_attributes(element: &str) -> &'static [&'static str] {
    match element {
        "a" => &["href"],
        "img" => &["src", "alt"],
        _ => &[],
    }
}

/// Sanitizes an HTML fragment.
///
/// - `script`, `style` and `meta` elements are removed with their content;
///   comments are dropped.
/// - Every attribute is stripped except `href` on `a` and `src`/`alt` on `img`.
/// - Whitespace between tags is removed, runs of 3+ newlines collapse to one
///   blank line, and the result is trimmed.
///
/// Empty or whitespace-only input yields an empty string.
#[must_use]
pub fn sanitize_html(fragment: &str) -> String {
    if fragment.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_fragment(fragment);
    let mut out = String::with_capacity(fragment.len());
    for child in document.root_element().children() {
        write_node(child, &mut out);
    }

    let out = INTER_TAG_WHITESPACE.replace_all(&out, "><");
    let out = EXCESS_BLANK_LINES.replace_all(&out, "\n\n");
    out.trim().to_owned()
}

/// Sanitizes an optional fragment; `None` yields an empty string.
#[must_use]
pub fn sanitize_optional(fragment: Option<&str>) -> String {
    fragment.map(sanitize_html).unwrap_or_default()
}

fn write_node(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => escape_text(text, out),
        Node::Element(element) => {
            let name = element.name();
            if DROPPED_ELEMENTS.contains(&name) {
                return;
            }

            out.push('<');
            out.push_str(name);
            for attr in allowed_attributes(name) {
                if let Some(value) = element.attr(attr) {
                    out.push(' ');
                    out.push_str(attr);
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            for child in node.children() {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        _ => {}
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_disallowed_attributes() {
        let input = r#"<script>alert(1)</script><p onclick="x">Hello <img src="a.jpg" onerror="y"></p>"#;
        assert_eq!(sanitize_html(input), r#"<p>Hello <img src="a.jpg"></p>"#);
    }

    #[test]
    fn removes_style_and_meta_with_content() {
        let input = "<style>p{color:red}</style><meta charset=\"utf-8\"><p>Text</p>";
        assert_eq!(sanitize_html(input), "<p>Text</p>");
    }

    #[test]
    fn keeps_href_on_links_only() {
        let input = r#"<a href="/thuoc/x.html" target="_blank" class="lnk">x</a><span href="y">y</span>"#;
        assert_eq!(
            sanitize_html(input),
            r#"<a href="/thuoc/x.html">x</a><span>y</span>"#
        );
    }

    #[test]
    fn keeps_img_src_and_alt_in_fixed_order() {
        let input = r#"<img alt="Hộp" style="w" src="b.png">"#;
        assert_eq!(sanitize_html(input), r#"<img src="b.png" alt="Hộp">"#);
    }

    #[test]
    fn collapses_whitespace_between_tags() {
        let input = "<ul>\n   <li>Một</li>\n\t<li>Hai</li>\n</ul>";
        assert_eq!(sanitize_html(input), "<ul><li>Một</li><li>Hai</li></ul>");
    }

    #[test]
    fn collapses_runs_of_blank_lines() {
        let input = "Dòng 1\n\n\n\n\nDòng 2";
        assert_eq!(sanitize_html(input), "Dòng 1\n\nDòng 2");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(sanitize_html("   <b>x</b>  \n"), "<b>x</b>");
    }

    #[test]
    fn repairs_malformed_markup() {
        assert_eq!(
            sanitize_html("<div><p>open <i>x"),
            "<div><p>open <i>x</i></p></div>"
        );
        assert_eq!(sanitize_html("a & b"), "a &amp; b");
    }

    #[test]
    fn drops_comments() {
        assert_eq!(sanitize_html("<p>a<!-- hidden -->b</p>"), "<p>ab</p>");
    }

    #[test]
    fn escapes_attribute_quotes() {
        let input = r#"<a href='/x?q="2"&amp;p=1'>x</a>"#;
        assert_eq!(
            sanitize_html(input),
            r#"<a href="/x?q=&quot;2&quot;&amp;p=1">x</a>"#
        );
    }

    #[test]
    fn empty_and_missing_input_yield_empty_string() {
        assert_eq!(sanitize_html(""), "");
        assert_eq!(sanitize_html("  \n "), "");
        assert_eq!(sanitize_optional(None), "");
    }
}
