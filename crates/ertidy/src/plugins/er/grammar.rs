//! Token sets recognized by the ER line classifier
//!
//! Every literal the classifier matches against lives here: cardinality
//! operators, key modifiers, the line-comment marker and the Mermaid
//! directive prefix. The rest of the plugin only asks the grammar questions.

use std::ops::Range;

use crate::core::TidyError;

/// Left-hand cardinality markers, as written before the relationship line
pub const LEFT_MARKERS: [&str; 4] = ["|o", "||", "}o", "}|"];

/// Relationship lines: identifying (`--`) and non-identifying (`..`)
pub const LINE_STYLES: [&str; 2] = ["--", ".."];

/// Right-hand cardinality markers, as written after the relationship line
pub const RIGHT_MARKERS: [&str; 4] = ["o|", "||", "o{", "|{"];

/// Mermaid attribute key markers
pub const KEY_MODIFIERS: [&str; 3] = ["PK", "FK", "UK"];

/// The set of tokens an ER diagram is classified with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// Sorted longest first so the longest operator wins at a given position
    cardinality_operators: Vec<String>,
    key_modifiers: Vec<String>,
    comment_marker: String,
    directive_prefix: String,
}

impl Grammar {
    /// The grammar of Mermaid's `erDiagram` dialect
    pub fn mermaid() -> Self {
        let mut operators = Vec::with_capacity(LEFT_MARKERS.len() * 2 * RIGHT_MARKERS.len());
        for left in LEFT_MARKERS {
            for line in LINE_STYLES {
                for right in RIGHT_MARKERS {
                    operators.push(format!("{left}{line}{right}"));
                }
            }
        }

        Self {
            cardinality_operators: operators,
            key_modifiers: KEY_MODIFIERS.iter().map(|m| m.to_string()).collect(),
            comment_marker: "//".to_string(),
            directive_prefix: "%%".to_string(),
        }
    }

    /// Start an empty grammar
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// Start from this grammar, e.g. to add key modifiers
    pub fn to_builder(&self) -> GrammarBuilder {
        GrammarBuilder {
            cardinality_operators: self.cardinality_operators.clone(),
            key_modifiers: self.key_modifiers.clone(),
            comment_marker: Some(self.comment_marker.clone()),
            directive_prefix: Some(self.directive_prefix.clone()),
        }
    }

    pub fn cardinality_operators(&self) -> &[String] {
        &self.cardinality_operators
    }

    pub fn key_modifiers(&self) -> &[String] {
        &self.key_modifiers
    }

    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    pub fn directive_prefix(&self) -> &str {
        &self.directive_prefix
    }

    /// Byte range of the leftmost cardinality operator in `content`.
    ///
    /// When several operators start at the same position the longest wins.
    pub fn find_operator(&self, content: &str) -> Option<Range<usize>> {
        let mut best: Option<Range<usize>> = None;
        for operator in &self.cardinality_operators {
            if let Some(start) = content.find(operator.as_str()) {
                if best.as_ref().map_or(true, |b| start < b.start) {
                    best = Some(start..start + operator.len());
                }
            }
        }
        best
    }

    pub fn contains_operator(&self, content: &str) -> bool {
        self.find_operator(content).is_some()
    }

    /// True for a key modifier token or a comma-separated list of them
    ///
    /// Matching ignores ASCII case, as Mermaid's lexer does, so `pk`,
    /// `PK,` and `PK,FK` all qualify. An empty list item (`PK,,FK`) does not.
    pub fn is_key_modifier(&self, token: &str) -> bool {
        let list = token.strip_suffix(',').unwrap_or(token);
        !list.is_empty()
            && list.split(',').all(|item| {
                self.key_modifiers
                    .iter()
                    .any(|modifier| modifier.eq_ignore_ascii_case(item))
            })
    }

    /// True for Mermaid `%%` comments and `%%{...}%%` directives
    pub fn is_directive(&self, content: &str) -> bool {
        content.starts_with(self.directive_prefix.as_str())
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::mermaid()
    }
}

/// Builder for custom grammars
///
/// # Example
/// ```
/// use ertidy::plugins::er::Grammar;
///
/// let grammar = Grammar::mermaid()
///     .to_builder()
///     .key_modifier("IDX")
///     .build()
///     .unwrap();
/// assert!(grammar.is_key_modifier("IDX"));
/// assert!(grammar.is_key_modifier("PK,"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    cardinality_operators: Vec<String>,
    key_modifiers: Vec<String>,
    comment_marker: Option<String>,
    directive_prefix: Option<String>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cardinality_operator(mut self, operator: impl Into<String>) -> Self {
        self.cardinality_operators.push(operator.into());
        self
    }

    pub fn key_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.key_modifiers.push(modifier.into());
        self
    }

    pub fn comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = Some(marker.into());
        self
    }

    pub fn directive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.directive_prefix = Some(prefix.into());
        self
    }

    /// Validate and freeze the grammar
    ///
    /// Every token must be non-empty and free of whitespace. Key modifiers
    /// may not contain `,`. At least one cardinality operator is required.
    pub fn build(self) -> Result<Grammar, TidyError> {
        let mut operators = self.cardinality_operators;
        if operators.is_empty() {
            return Err(TidyError::invalid_grammar(
                "at least one cardinality operator is required",
            ));
        }
        for operator in &operators {
            validate_token("cardinality operator", operator)?;
        }
        operators.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        operators.dedup();

        let mut key_modifiers = self.key_modifiers;
        for modifier in &key_modifiers {
            validate_token("key modifier", modifier)?;
            if modifier.contains(',') {
                return Err(TidyError::invalid_grammar(format!(
                    "key modifier '{modifier}' contains ','"
                )));
            }
        }
        key_modifiers.dedup();

        let comment_marker = self.comment_marker.unwrap_or_else(|| "//".to_string());
        validate_token("comment marker", &comment_marker)?;

        let directive_prefix = self.directive_prefix.unwrap_or_else(|| "%%".to_string());
        validate_token("directive prefix", &directive_prefix)?;

        Ok(Grammar {
            cardinality_operators: operators,
            key_modifiers,
            comment_marker,
            directive_prefix,
        })
    }
}

fn validate_token(kind: &str, token: &str) -> Result<(), TidyError> {
    if token.is_empty() {
        return Err(TidyError::invalid_grammar(format!("empty {kind}")));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(TidyError::invalid_grammar(format!(
            "{kind} '{token}' contains whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mermaid_operator_family() {
        let grammar = Grammar::mermaid();
        assert_eq!(grammar.cardinality_operators().len(), 32);
        for op in ["||--o{", "||--|{", "||--o|", "|o..o|", "}|..|{", "}o--||"] {
            assert!(
                grammar.cardinality_operators().iter().any(|o| o == op),
                "missing {op}"
            );
        }
    }

    #[test]
    fn test_find_operator_leftmost() {
        let grammar = Grammar::mermaid();
        let content = "INCIDENT ||--o{ CATEGORY : belongs to";
        assert_eq!(grammar.find_operator(content), Some(9..15));
        assert_eq!(grammar.find_operator("A||--o{B"), Some(1..7));
        assert_eq!(grammar.find_operator("erDiagram"), None);
        assert_eq!(grammar.find_operator("IT-OPERATION {"), None);
    }

    #[test]
    fn test_find_operator_prefers_longest_at_same_start() {
        let grammar = Grammar::builder()
            .cardinality_operator("--")
            .cardinality_operator("-->")
            .build()
            .unwrap();
        assert_eq!(grammar.find_operator("A --> B"), Some(2..5));
    }

    #[test]
    fn test_key_modifiers() {
        let grammar = Grammar::mermaid();
        assert!(grammar.is_key_modifier("PK"));
        assert!(grammar.is_key_modifier("FK,"));
        assert!(grammar.is_key_modifier("UK"));
        assert!(!grammar.is_key_modifier("Date"));
    }

    #[test]
    fn test_key_modifier_lists() {
        let grammar = Grammar::mermaid();
        assert!(grammar.is_key_modifier("PK,FK"));
        assert!(grammar.is_key_modifier("PK,FK,UK"));
        assert!(grammar.is_key_modifier("FK,UK,"));
        assert!(!grammar.is_key_modifier("PK,,FK"));
        assert!(!grammar.is_key_modifier("PK,Date"));
        assert!(!grammar.is_key_modifier(","));
        assert!(!grammar.is_key_modifier(""));
    }

    #[test]
    fn test_key_modifiers_ignore_case() {
        let grammar = Grammar::mermaid();
        assert!(grammar.is_key_modifier("pk"));
        assert!(grammar.is_key_modifier("Fk,"));
        assert!(grammar.is_key_modifier("pk,fk"));
        assert!(!grammar.is_key_modifier("pkey"));
    }

    #[test]
    fn test_directive() {
        let grammar = Grammar::mermaid();
        assert!(grammar.is_directive("%% generated by a schema exporter"));
        assert!(grammar.is_directive("%%{init: {'theme': 'dark'}}%%"));
        assert!(!grammar.is_directive("string name"));
    }

    #[test]
    fn test_builder_rejects_bad_tokens() {
        assert!(Grammar::builder().build().is_err());
        assert!(Grammar::builder().cardinality_operator("").build().is_err());
        assert!(Grammar::builder()
            .cardinality_operator("-- >")
            .build()
            .is_err());
        assert!(Grammar::builder()
            .cardinality_operator("-->")
            .key_modifier("P K")
            .build()
            .is_err());
        assert!(Grammar::builder()
            .cardinality_operator("-->")
            .key_modifier("PK,FK")
            .build()
            .is_err());
        assert!(Grammar::builder()
            .cardinality_operator("-->")
            .comment_marker("")
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_defaults_markers() {
        let grammar = Grammar::builder()
            .cardinality_operator("-->")
            .build()
            .unwrap();
        assert_eq!(grammar.comment_marker(), "//");
        assert_eq!(grammar.directive_prefix(), "%%");
        assert!(grammar.key_modifiers().is_empty());
    }

    #[test]
    fn test_to_builder_round_trip() {
        let grammar = Grammar::mermaid();
        let rebuilt = grammar.to_builder().build().unwrap();
        assert_eq!(
            rebuilt.cardinality_operators().len(),
            grammar.cardinality_operators().len()
        );
        assert_eq!(rebuilt.key_modifiers(), grammar.key_modifiers());
    }
}
