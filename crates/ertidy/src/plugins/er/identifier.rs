//! Identifier repairs: hyphenated entity names and split attribute names

use std::borrow::Cow;

/// True for `"..."` names, which Mermaid already accepts verbatim
fn is_quoted(name: &str) -> bool {
    name.len() >= 2 && name.starts_with('"') && name.ends_with('"')
}

/// Replace every hyphen in an entity name with an underscore.
///
/// Quoted names and names containing whitespace are not identifiers and are
/// returned unchanged.
///
/// # Example
/// ```
/// use ertidy::plugins::er::normalize_entity_name;
///
/// assert_eq!(normalize_entity_name("IT-OPERATION"), "IT_OPERATION");
/// assert_eq!(normalize_entity_name("CATEGORY"), "CATEGORY");
/// ```
pub fn normalize_entity_name(name: &str) -> Cow<'_, str> {
    if !name.contains('-') || is_quoted(name) || name.contains(char::is_whitespace) {
        return Cow::Borrowed(name);
    }
    Cow::Owned(name.replace('-', "_"))
}

/// Concatenate the pieces of a split attribute name.
///
/// Casing is kept per piece: `["upload", "Date"]` becomes `uploadDate`.
pub fn join_name_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut joined = String::new();
    for token in tokens {
        joined.push_str(token.as_ref());
    }
    joined
}
