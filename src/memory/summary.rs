//! List-view projection of memories.

use super::types::{Memory, MemorySummary};

/// Number of characters of content kept in a list excerpt.
pub const EXCERPT_CHARS: usize = 115;

/// Appended to excerpts that were cut short.
pub const ELLIPSIS: &str = "...";

pub fn to_summary(memory: &Memory) -> MemorySummary {
    MemorySummary {
        id: memory.id.clone(),
        cover_url: memory.cover_url.clone(),
        excerpt: excerpt(&memory.content, EXCERPT_CHARS),
    }
}

/// First `max_chars` characters of `content`, plus [`ELLIPSIS`] if anything was cut.
/// Counts chars, not bytes, so multi-byte text is never split mid-character.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}
