//! Assistant reply formatting
//!
//! Turns the raw text of an assistant turn into render-ready blocks:
//! paragraphs, bullet lists, and inline spans (plain, bold, hyperlink).
//! Everything here is a pure function of its input; blocks are recomputed on
//! every render and never stored.

mod html;
mod inline;

#[cfg(test)]
mod proptests;

pub use html::to_html;
pub use inline::format_inline;

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Separator between paragraphs in a reply
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A line starting (after optional indentation) with `-`, `•` or `*` and at
/// least one space or tab
static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[-•*][ \t]+").expect("bullet regex is valid"));

/// An inline span inside a paragraph or list item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Bold { text: String },
    /// Rendered so that it opens in a new context without opener or referrer
    Link { label: String, url: String },
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text { text: s.into() }
    }

    pub fn bold(s: impl Into<String>) -> Self {
        Inline::Bold { text: s.into() }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// The text a reader sees for this span
    pub fn visible_text(&self) -> &str {
        match self {
            Inline::Text { text } | Inline::Bold { text } => text,
            Inline::Link { label, .. } => label,
        }
    }
}

/// A render-ready block of an assistant reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { spans: Vec<Inline> },
    BulletList { items: Vec<Vec<Inline>> },
}

impl Block {
    /// Concatenated visible text; list items are joined with newlines
    pub fn plain_text(&self) -> String {
        fn join(spans: &[Inline]) -> String {
            spans.iter().map(Inline::visible_text).collect()
        }

        match self {
            Block::Paragraph { spans } => join(spans),
            Block::BulletList { items } => items
                .iter()
                .map(|item| join(item))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Format an assistant reply into blocks.
///
/// Content without any bullet line is kept whole as a single paragraph.
/// Otherwise the content is split into paragraphs on blank lines; paragraphs
/// with a bullet line become bullet lists, the rest plain paragraphs. Blank
/// paragraphs and lists left without items are dropped.
pub fn format(content: &str) -> Vec<Block> {
    let normalized = content.replace("\r\n", "\n");
    let paragraphs: Vec<&str> = normalized.split(PARAGRAPH_SEPARATOR).collect();

    if !paragraphs.iter().any(|p| is_bullet_paragraph(p)) {
        return vec![Block::Paragraph {
            spans: format_inline(content),
        }];
    }

    paragraphs
        .into_iter()
        .filter_map(|paragraph| {
            if is_bullet_paragraph(paragraph) {
                let items: Vec<Vec<Inline>> = paragraph.lines().filter_map(bullet_item).collect();
                (!items.is_empty()).then_some(Block::BulletList { items })
            } else if paragraph.trim().is_empty() {
                None
            } else {
                Some(Block::Paragraph {
                    spans: format_inline(paragraph),
                })
            }
        })
        .collect()
}

/// Whether any line of the paragraph begins with a bullet marker
pub fn is_bullet_paragraph(paragraph: &str) -> bool {
    paragraph.lines().any(|line| BULLET_LINE.is_match(line))
}

/// Strip one bullet prefix and trim; blank results yield no item
fn bullet_item(line: &str) -> Option<Vec<Inline>> {
    let stripped = BULLET_LINE.replace(line, "");
    let text = stripped.trim();
    (!text.is_empty()).then(|| format_inline(text))
}
