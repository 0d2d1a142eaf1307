//! Relationship label camel-casing

use std::borrow::Cow;

/// Collapse a multi-word label into one camelCase token.
///
/// The first word is kept verbatim; every later word gets its first
/// character upper-cased and the rest kept verbatim. Single-word labels,
/// including `snake_case` ones, are returned unchanged.
///
/// # Example
/// ```
/// use ertidy::plugins::er::camel_case_label;
///
/// assert_eq!(camel_case_label("belongs to"), "belongsTo");
/// assert_eq!(camel_case_label("applies_for"), "applies_for");
/// ```
pub fn camel_case_label(label: &str) -> Cow<'_, str> {
    let mut words = label.split_whitespace();
    let Some(first) = words.next() else {
        return Cow::Borrowed(label);
    };
    let mut rest = words.peekable();
    if rest.peek().is_none() {
        return Cow::Borrowed(label);
    }

    let mut out = String::with_capacity(label.len());
    out.push_str(first);
    for word in rest {
        capitalize_into(word, &mut out);
    }
    Cow::Owned(out)
}

fn capitalize_into(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}
