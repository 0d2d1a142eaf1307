//! Shared chumsky parser utilities for line parsing
//!
//! Lines are split into whitespace-separated tokens that remember their byte
//! span, so a rewrite can replace one token and copy the rest of the line
//! through unchanged.

use std::ops::Range;

use chumsky::prelude::*;
use chumsky::span::Span as _;

/// A token of a single line, borrowed from the line with its byte span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub text: &'src str,
    pub span: Range<usize>,
}

impl Token<'_> {
    /// True when the token opens a double-quoted string
    pub fn is_quoted(&self) -> bool {
        self.text.starts_with('"')
    }
}

/// Parse inline whitespace only (spaces and tabs, no newlines).
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just(' ').or(just('\t')).repeated().ignored()
}

/// Parse required inline whitespace (at least one space or tab).
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// Parse one token: a run of non-blank characters where a double-quoted
/// section may contain blanks. An unterminated quote runs to end of line.
pub fn spanned_token<'src>() -> impl Parser<'src, &'src str, Token<'src>> + Clone {
    let quoted = just('"')
        .then(none_of('"').repeated())
        .then(just('"').or_not())
        .ignored();
    let bare = none_of(" \t\"").ignored();

    quoted
        .or(bare)
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|text: &'src str, e| {
            let span: SimpleSpan = e.span();
            Token {
                text,
                span: span.start()..span.end(),
            }
        })
}

/// Parse a whole line into its tokens.
pub fn spanned_tokens<'src>() -> impl Parser<'src, &'src str, Vec<Token<'src>>> {
    spanned_token()
        .separated_by(inline_whitespace_required())
        .allow_trailing()
        .collect::<Vec<_>>()
        .padded_by(inline_whitespace())
        .then_ignore(end())
}

/// Split a single line into tokens. Never fails: a line that somehow does
/// not tokenize yields no tokens.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    spanned_tokens()
        .parse(line)
        .into_result()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<&str> {
        tokenize(line).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_inline_whitespace() {
        let parser = inline_whitespace().then(just("test")).then_ignore(end());
        assert!(parser.parse("test").into_result().is_ok());
        assert!(parser.parse(" test").into_result().is_ok());
        assert!(parser.parse("\ttest").into_result().is_ok());
        // Should NOT consume newlines
        assert!(parser.parse("\ntest").into_result().is_err());
    }

    #[test]
    fn test_inline_whitespace_required() {
        let parser = just("a")
            .then(inline_whitespace_required())
            .then(just("b"))
            .then_ignore(end());
        assert!(parser.parse("a b").into_result().is_ok());
        assert!(parser.parse("a \t b").into_result().is_ok());
        assert!(parser.parse("ab").into_result().is_err());
    }

    #[test]
    fn test_tokenize_attribute() {
        assert_eq!(texts("string upload Date"), vec!["string", "upload", "Date"]);
        assert_eq!(texts("  int  id\tPK  "), vec!["int", "id", "PK"]);
        assert!(texts("").is_empty());
        assert!(texts("   ").is_empty());
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("string upload Date");
        assert_eq!(tokens[1].span, 7..13);
        assert_eq!(tokens[2].span, 14..18);
    }

    #[test]
    fn test_tokenize_quoted() {
        let tokens = tokenize(r#"string name PK "the display name""#);
        assert_eq!(tokens.len(), 4);
        assert!(tokens[3].is_quoted());
        assert_eq!(tokens[3].text, r#""the display name""#);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        assert_eq!(texts(r#"string name "open ended"#), vec!["string", "name", r#""open ended"#]);
    }
}
