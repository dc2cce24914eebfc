//! Markdown rendering for assistant answers.
//!
//! Answers are model output and land in the page through `inner_html`, so
//! raw HTML blocks and inline tags are removed before rendering. Only the
//! markup pulldown-cmark generates itself reaches the DOM.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{Event, Options, Parser, html};

const ANSWER_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS);

fn is_raw_html(event: &Event<'_>) -> bool {
    matches!(event, Event::Html(_) | Event::InlineHtml(_))
}

/// Render `markdown` to HTML with GFM tables, strikethrough and task lists.
pub fn render_markdown_html(markdown: &str) -> String {
    let events = Parser::new_ext(markdown, ANSWER_OPTIONS).filter(|event| !is_raw_html(event));
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}
