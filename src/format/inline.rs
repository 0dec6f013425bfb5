//! Inline span tokenizer
//!
//! A single left-to-right pass recognizes markdown-style links
//! `[label](url)` and bold runs `**text**`. Where a bold run would overlap
//! a link, the link wins and the unmatched `**` stays literal.

use super::Inline;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex is valid"));

/// Non-greedy and confined to one line
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid"));

/// Split text into plain, bold and link spans. Empty plain runs are omitted.
pub fn format_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    // A bold run that lost to a link leaves its closing `**` behind; bold
    // matching resumes past it so that marker stays literal.
    let mut bold_floor = 0;

    while cursor < text.len() {
        let link = LINK.captures_at(text, cursor);
        let bold = BOLD.captures_at(text, cursor.max(bold_floor));

        let bold_first = match (&link, &bold) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(l), Some(b)) => span_end(b) <= span_start(l),
        };

        if let (false, Some(l), Some(b)) = (bold_first, &link, &bold) {
            if span_start(b) < span_end(l) {
                bold_floor = span_end(b);
            }
        }

        let Some(caps) = (if bold_first { bold } else { link }) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        if whole.start() > cursor {
            spans.push(Inline::text(&text[cursor..whole.start()]));
        }
        spans.push(if bold_first {
            Inline::bold(&caps[1])
        } else {
            Inline::link(&caps[1], &caps[2])
        });
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(Inline::text(&text[cursor..]));
    }

    spans
}

fn span_start(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(usize::MAX, |m| m.start())
}

fn span_end(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(usize::MAX, |m| m.end())
}
