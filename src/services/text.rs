//! Text metrics recorded on documents and snapshots.

/// Replace markup punctuation with spaces so it separates tokens instead of
/// counting as words. `"# Title"` is one word; `"[link](url)"` is two.
pub fn strip_markup(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '#' | '*' | '_' | '`' | '~' | '>' | '[' | ']' | '(' | ')' | '!' => ' ',
            _ => ch,
        })
        .collect()
}

/// Whitespace-delimited tokens after markup stripping.
pub fn count_words(text: &str) -> usize {
    strip_markup(text).split_whitespace().count()
}

/// Unicode scalar count. `.len()` would count bytes, which overstates
/// multibyte text.
pub fn count_chars(text: &str) -> usize {
    text.chars().count()
}

/// Byte length of the content as stored.
pub fn byte_size(text: &str) -> usize {
    text.len()
}
