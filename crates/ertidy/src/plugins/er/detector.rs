//! ER diagram detector
//!
//! Identifies Mermaid `erDiagram` syntax from input text.

use super::grammar::Grammar;
use crate::core::Detector;

/// Detector for ER diagram syntax
pub struct ErDetector {
    grammar: Grammar,
}

impl ErDetector {
    pub fn new() -> Self {
        Self::with_grammar(Grammar::mermaid())
    }

    pub fn with_grammar(grammar: Grammar) -> Self {
        Self { grammar }
    }
}

impl Default for ErDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ErDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        // Generated text often has a preamble, so skip blanks and %% lines.
        let first = input
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !self.grammar.is_directive(line));

        if first.is_some_and(|line| line.to_lowercase().starts_with("erdiagram")) {
            return 1.0;
        }

        let has_relationship = input
            .lines()
            .any(|line| self.grammar.contains_operator(line));
        let has_block = input.contains('{') && input.lines().any(|line| line.trim() == "}");

        match (has_relationship, has_block) {
            (true, true) => 0.8,
            (true, false) => 0.7,
            (false, true) => 0.3,
            (false, false) => 0.0,
        }
    }

    fn diagram_type(&self) -> &'static str {
        "er"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["erDiagram"]
    }
}
