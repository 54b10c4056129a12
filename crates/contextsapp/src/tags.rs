//! Inline tag extraction.
//!
//! An inline tag is a `#` at the start of text or after whitespace, followed
//! by letters, digits, `_`, `-` or `/`. Purely numeric tokens (`#123`) are
//! issue references, not tags. Tags inside inline code and code blocks are
//! ignored, which is why the body goes through a markdown parser instead of a
//! plain scan.
//!
//! Emphasis and link markup is transparent: `**bold**#tag` has no tag because
//! the `#` follows `d`. Block starts and line breaks count as whitespace.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Extract inline tags from markdown text, in document order, with their `#`.
pub fn extract_inline_tags(markdown: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut text = String::new();
    // Last character before `text`; `None` at block starts
    let mut prev: Option<char> = None;
    let mut code_depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) if code_depth == 0 => text.push_str(&t),
            Event::Text(_) => {}
            // Emphasis markers are not characters of the text run
            Event::Start(tag) if is_inline(&tag) => {}
            Event::End(end) if is_inline_end(&end) => {}
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::Code(content) | Event::InlineHtml(content) => {
                prev = flush(&mut text, prev, &mut tags);
                prev = content.chars().next_back().or(prev);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut text, prev, &mut tags);
                prev = None;
                code_depth += 1;
            }
            Event::End(TagEnd::CodeBlock) => {
                code_depth = code_depth.saturating_sub(1);
                prev = None;
            }
            _ => {
                flush(&mut text, prev, &mut tags);
                prev = None;
            }
        }
    }
    flush(&mut text, prev, &mut tags);

    tags
}

fn is_inline(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn is_inline_end(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

/// Scan and empty the pending text run, returning its last character.
fn flush(text: &mut String, prev: Option<char>, tags: &mut Vec<String>) -> Option<char> {
    let last = scan_tags(text, prev, tags);
    text.clear();
    last
}

fn scan_tags(text: &str, mut prev: Option<char>, tags: &mut Vec<String>) -> Option<char> {
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let at_boundary = prev.map_or(true, char::is_whitespace);
        if ch == '#' && at_boundary {
            let start = idx + ch.len_utf8();
            let mut end = start;
            while let Some(&(next_idx, next)) = chars.peek() {
                if !is_tag_char(next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            let name = &text[start..end];
            if !name.is_empty() && !name.chars().all(|c| c.is_ascii_digit()) {
                tags.push(format!("#{}", name));
            }
            prev = text[..end].chars().next_back();
            continue;
        }
        prev = Some(ch);
    }

    prev
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '/'
}
