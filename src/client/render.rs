//! Message content rendering.
//!
//! `render_segments` is total over its input: every content value maps to a
//! sequence of displayable segments with no error path.

use pulldown_cmark::{Event, Options, Parser, html};

use crate::llm::types::{Content, ContentPart};

pub const REFUSAL_PLACEHOLDER: &str = "[Refusal message]";
pub const UNKNOWN_PLACEHOLDER: &str = "[Unknown content]";

/// One displayable piece of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Refusal,
    Unknown,
}

impl<'a> Segment<'a> {
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match *self {
            Self::Text(text) => text,
            Self::Refusal => REFUSAL_PLACEHOLDER,
            Self::Unknown => UNKNOWN_PLACEHOLDER,
        }
    }
}

/// Map content to segments, one per part, in input order.
#[must_use]
pub fn render_segments(content: Option<&Content>) -> Vec<Segment<'_>> {
    match content {
        None => Vec::new(),
        Some(Content::Text(text)) => vec![Segment::Text(text)],
        Some(Content::Parts(parts)) => parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => Segment::Text(text),
                ContentPart::Refusal { .. } => Segment::Refusal,
                ContentPart::Unknown(_) => Segment::Unknown,
            })
            .collect(),
    }
}

/// Concatenated text of [`render_segments`]. Plain strings come back unchanged.
#[must_use]
pub fn render_text(content: Option<&Content>) -> String {
    render_segments(content)
        .iter()
        .map(Segment::as_str)
        .collect()
}

/// Markdown to HTML for assistant replies.
#[must_use]
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    // Drop inline/block raw HTML from model output before rendering.
    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
