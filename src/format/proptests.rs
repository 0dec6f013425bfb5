//! Property-based tests for the formatter

use super::*;
use proptest::prelude::*;

/// Text that can contain newlines, spaces, and punctuation but none of the
/// characters that introduce markup
fn arb_marker_free_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?'\n:;()#]{0,120}".prop_map(String::from)
}

fn arb_item_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ,.]{0,40}[a-zA-Z0-9.]".prop_map(String::from)
}

fn arb_marker() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("-"), Just("•"), Just("*")]
}

fn arb_any_content() -> impl Strategy<Value = String> {
    "[a-z \n*\\-•\\[\\]()]{0,80}".prop_map(String::from)
}

proptest! {
    #[test]
    fn prop_marker_free_content_is_identity(content in arb_marker_free_text()) {
        let blocks = format(&content);
        prop_assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Paragraph { spans } => {
                let all_text = spans.iter().all(|s| matches!(s, Inline::Text { .. }));
                prop_assert!(all_text, "marker-free content produced a styled span");
                prop_assert_eq!(blocks[0].plain_text(), content);
            }
            Block::BulletList { .. } => prop_assert!(false, "expected a paragraph"),
        }
    }

    #[test]
    fn prop_bullet_line_yields_stripped_item(
        marker in arb_marker(),
        spaces in 1usize..4,
        text in arb_item_text(),
    ) {
        let content = format!("Intro\n\n{marker}{}{text}", " ".repeat(spaces));
        let blocks = format(&content);

        let found = blocks.iter().any(|block| match block {
            Block::BulletList { items } => items.iter().any(|item| {
                item == &vec![Inline::text(text.clone())]
            }),
            Block::Paragraph { .. } => false,
        });
        prop_assert!(found, "no item {:?} in {:?}", text, blocks);
    }

    #[test]
    fn prop_format_is_deterministic(content in arb_any_content()) {
        prop_assert_eq!(format(&content), format(&content));
    }

    #[test]
    fn prop_no_empty_items_or_text_spans(content in arb_any_content()) {
        for block in format(&content) {
            if let Block::BulletList { items } = &block {
                prop_assert!(!items.is_empty());
                for item in items {
                    prop_assert!(!item.is_empty());
                }
            }
            let spans: Vec<&Inline> = match &block {
                Block::Paragraph { spans } => spans.iter().collect(),
                Block::BulletList { items } => items.iter().flatten().collect(),
            };
            for span in spans {
                if let Inline::Text { text } = span {
                    prop_assert!(!text.is_empty());
                }
            }
        }
    }

    #[test]
    fn prop_inline_preserves_plain_text(text in "[a-z ]{0,20}", bold in "[a-z]{1,10}") {
        let spans = format_inline(&format!("{text}**{bold}**{text}"));
        prop_assert!(spans.contains(&Inline::bold(bold.clone())));
        let visible: String = spans.iter().map(Inline::visible_text).collect();
        prop_assert_eq!(visible, format!("{text}{bold}{text}"));
    }
}
