//! HTML rendering of formatted blocks
//!
//! Links open in a new browsing context and carry
//! `rel="noopener noreferrer"`. Only `http`, `https` and `mailto` targets
//! become anchors; anything else is rendered as its label.

use super::{Block, Inline};
use std::fmt::Write;

const LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;
const ALLOWED_SCHEMES: &[&str] = &["http://", "https://", "mailto:"];

/// Render blocks as an HTML fragment
pub fn to_html(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Paragraph { spans } => {
                out.push_str("<p>");
                write_spans(&mut out, spans);
                out.push_str("</p>");
            }
            Block::BulletList { items } => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    write_spans(&mut out, item);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
        }
    }

    out
}

fn write_spans(out: &mut String, spans: &[Inline]) {
    for span in spans {
        match span {
            Inline::Text { text } => out.push_str(&escape(text)),
            Inline::Bold { text } => {
                let _ = write!(out, "<strong>{}</strong>", escape(text));
            }
            Inline::Link { label, url } if is_safe_url(url) => {
                let _ = write!(
                    out,
                    r#"<a href="{}" {LINK_ATTRS}>{}</a>"#,
                    escape(url.trim()),
                    escape(label)
                );
            }
            Inline::Link { label, .. } => out.push_str(&escape(label)),
        }
    }
}

fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    ALLOWED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
