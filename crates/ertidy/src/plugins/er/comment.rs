//! Trailing `//` comment removal

/// Byte offset of the first comment marker outside double-quoted text
pub fn find_comment(content: &str, marker: &str) -> Option<usize> {
    let mut in_quote = false;
    for (index, ch) in content.char_indices() {
        if ch == '"' {
            in_quote = !in_quote;
        } else if !in_quote && content[index..].starts_with(marker) {
            return Some(index);
        }
    }
    None
}

/// Cut `content` at its first comment marker and drop the whitespace left
/// in front of it. Content without a marker is returned unchanged.
pub fn strip_comment<'a>(content: &'a str, marker: &str) -> &'a str {
    match find_comment(content, marker) {
        Some(index) => content[..index].trim_end(),
        None => content,
    }
}
