//! Plain-text preview rendering for markdown bodies
//!
//! Listing and neighbor cards carry a truncated preview of the article
//! body. Truncation operates on the rendered plain text, never on raw
//! markup, so a cut never lands inside a link target or emphasis marker.

use pulldown_cmark::{Event, Options, Parser, TagEnd};

use crate::article::ArticleSummary;

/// Character budget for the main listing and archive previews
pub const LIST_PREVIEW_CHARS: usize = 90;

/// Character budget for card-style previews (neighbors, tag listings,
/// top/featured block)
pub const CARD_PREVIEW_CHARS: usize = 130;

/// Render markdown to whitespace-normalized plain text.
pub fn plain_text(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut text = String::with_capacity(markdown.len());
    for event in parser {
        match event {
            Event::Text(chunk) | Event::Code(chunk) => text.push_str(&chunk),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            // Block boundaries become single spaces; inline ends don't
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::BlockQuote
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain-text preview of at most `budget` characters.
pub fn preview(markdown: &str, budget: usize) -> String {
    plain_text(markdown).chars().take(budget).collect()
}

/// Truncate every summary's content in place.
pub fn truncate_summaries(summaries: &mut [ArticleSummary], budget: usize) {
    for summary in summaries {
        summary.content = preview(&summary.content, budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_before_truncating() {
        let markdown = "# Heading\n\nSome **bold** text with a [link](https://example.com).";
        assert_eq!(
            plain_text(markdown),
            "Heading Some bold text with a link."
        );
    }

    #[test]
    fn preview_respects_character_budget() {
        let body = "word ".repeat(100);
        let cut = preview(&body, LIST_PREVIEW_CHARS);
        assert_eq!(cut.chars().count(), LIST_PREVIEW_CHARS);
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let body = "日本語のテキスト".repeat(40);
        let cut = preview(&body, CARD_PREVIEW_CHARS);
        assert_eq!(cut.chars().count(), CARD_PREVIEW_CHARS);
    }

    #[test]
    fn short_bodies_pass_through() {
        assert_eq!(preview("just a sentence", 90), "just a sentence");
    }

    #[test]
    fn inline_code_is_kept_as_text() {
        assert_eq!(plain_text("run `cargo test` now"), "run cargo test now");
    }
}
