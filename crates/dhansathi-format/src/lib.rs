//! Plain-text formatting of chat completions.
//!
//! Model output arrives with Markdown emphasis, headings, tables, bullet
//! lists and irregular spacing. [`sanitize`] rewrites it into the reply
//! format the chat UI renders: no markup, single spaces, at most one blank
//! line between paragraphs, and a fresh paragraph for numbered points and
//! section emoji.
//!
//! The rewrite is a fixed sequence of [`Rule`]s. Order matters; see
//! [`Rule::ALL`].

mod rules;
mod sanitizer;

pub use rules::{Rule, PARAGRAPH_BREAK, SECTION_EMOJI};
pub use sanitizer::{sanitize, Sanitizer};
