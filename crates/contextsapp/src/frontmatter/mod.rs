//! # Frontmatter
//!
//! Documents may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! tags: [work, active]
//! priority: 1
//! ---
//! # Body starts here
//! ```
//!
//! [`parse_frontmatter`] splits that block from the body and decodes it into
//! a [`Frontmatter`] map. Decoding is forgiving: a block that is not a YAML
//! mapping means "no frontmatter" rather than an error, since filters treat
//! missing metadata as empty anyway. A closed block is never part of the
//! body, whether or not it decodes. A block that never closes is ordinary
//! body text.

mod value;

pub use value::FrontmatterValue;

use log::debug;
use std::collections::BTreeMap;

/// Key/value pairs from a document's frontmatter block.
pub type Frontmatter = BTreeMap<String, FrontmatterValue>;

const FENCE: &str = "---";
const ALT_CLOSE: &str = "...";

/// Split `source` into its frontmatter (if any) and body.
///
/// The opening fence must be the very first line. The block closes at the
/// next line consisting of `---` or `...` (trailing whitespace allowed).
/// Once closed, the body starts after the closing fence even when the block
/// fails to decode.
pub fn parse_frontmatter(source: &str) -> (Option<Frontmatter>, &str) {
    let source_no_bom = source.strip_prefix('\u{feff}').unwrap_or(source);

    let Some(rest) = strip_fence_line(source_no_bom) else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == FENCE || trimmed == ALT_CLOSE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (decode_block(yaml), body);
        }
        offset += line.len();
    }

    debug!("frontmatter block is never closed, treating document as body only");
    (None, source)
}

/// Returns the remainder after an opening `---` line, if present.
fn strip_fence_line(source: &str) -> Option<&str> {
    let (first, rest) = match source.find('\n') {
        Some(idx) => (&source[..idx], &source[idx + 1..]),
        None => (source, ""),
    };
    (first.trim_end() == FENCE).then_some(rest)
}

fn decode_block(yaml: &str) -> Option<Frontmatter> {
    if yaml.trim().is_empty() {
        return Some(Frontmatter::new());
    }

    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(serde_yaml::Value::Mapping(map)) => Some(
            map.into_iter()
                .map(|(k, v)| (value::mapping_key(k), FrontmatterValue::from(v)))
                .collect(),
        ),
        Ok(serde_yaml::Value::Null) => Some(Frontmatter::new()),
        Ok(other) => {
            debug!("frontmatter is not a mapping: {:?}", other);
            None
        }
        Err(e) => {
            debug!("frontmatter failed to parse: {}", e);
            None
        }
    }
}
