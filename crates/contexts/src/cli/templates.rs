//! # CLI Templates
//!
//! Templates are stand-alone minijinja files, embedded here as string
//! constants. They are rendered with `trim_blocks`, so a block tag never
//! leaves its own line break behind: every output line ends where the
//! template line ends.
//!
//! Layout math (alignment, widths) is done in Rust and handed to the
//! templates as ready strings; templates only choose semantic styles.

pub const CONTEXT_LIST_TEMPLATE: &str = include_str!("templates/context_list.jinja");
pub const CONTEXT_DETAIL_TEMPLATE: &str = include_str!("templates/context_detail.jinja");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.jinja");
