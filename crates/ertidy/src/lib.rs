//! ertidy - Repair machine-generated Mermaid.js ER diagrams
//!
//! A library that rewrites `erDiagram` source into a form Mermaid renders
//! and downstream tools can look up: trailing `//` comments are removed,
//! split attribute names are rejoined, multi-word relationship labels become
//! camelCase and hyphens in entity names become underscores. Indentation,
//! blank lines, line order and line terminators are preserved.
//!
//! # Quick Start
//!
//! ```rust
//! use ertidy::normalize;
//!
//! let input = "erDiagram\n    INCIDENT ||--o{ CATEGORY : belongs to";
//! let clean = normalize(input);
//! assert_eq!(clean, "erDiagram\n    INCIDENT ||--o{ CATEGORY : belongsTo");
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use ertidy::prelude::*;
//!
//! let grammar = Grammar::mermaid().to_builder().key_modifier("IDX").build().unwrap();
//! let normalizer = ErNormalizer::with_grammar(grammar);
//!
//! let (clean, report) = normalizer.normalize_with_report("A {\n  string last Name IDX\n}");
//! assert_eq!(clean, "A {\n  string lastName IDX\n}");
//! assert_eq!(report.attribute_names_joined, 1);
//! ```

pub mod core;
pub mod plugins;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Detector, NormalizeReport, Normalizer, TidyError};
    pub use crate::plugins::er::{ErDetector, ErNormalizer, Grammar, GrammarBuilder};
}

/// Normalize Mermaid ER diagram text with the default grammar
///
/// Never fails: lines outside the entity/attribute/relationship grammar are
/// returned unchanged. Running it on its own output changes nothing.
///
/// # Example
/// ```rust
/// use ertidy::normalize;
///
/// let clean = normalize("IT-OPERATION {\n    string fileSize // The file size\n}");
/// assert_eq!(clean, "IT_OPERATION {\n    string fileSize\n}");
/// ```
pub fn normalize(input: &str) -> String {
    use crate::core::Normalizer as _;

    plugins::er::ErNormalizer::new().normalize(input)
}

/// Normalize Mermaid ER diagram text and report what was repaired
///
/// # Example
/// ```rust
/// use ertidy::normalize_with_report;
///
/// let (clean, report) = normalize_with_report("PERSON ||--o{ NAMED-DRIVER : is not");
/// assert_eq!(clean, "PERSON ||--o{ NAMED_DRIVER : isNot");
/// assert_eq!(report.changed_lines, vec![1]);
/// ```
pub fn normalize_with_report(input: &str) -> (String, NormalizeReport) {
    use crate::core::Normalizer as _;

    plugins::er::ErNormalizer::new().normalize_with_report(input)
}

/// Detect whether the input is a Mermaid ER diagram
///
/// Returns the diagram type name on success.
///
/// # Example
/// ```rust
/// use ertidy::detect;
///
/// assert_eq!(detect("erDiagram\n  A ||--o{ B : has").unwrap(), "er");
/// assert!(detect("graph TD; A-->B").is_err());
/// ```
pub fn detect(input: &str) -> Result<&'static str, TidyError> {
    use crate::core::Detector as _;

    let detector = plugins::er::ErDetector::new();
    if detector.detect(input) {
        Ok(detector.diagram_type())
    } else {
        let first_line = input.lines().map(str::trim).find(|l| !l.is_empty());
        Err(TidyError::unknown_diagram_type(
            first_line.unwrap_or("<empty input>"),
        ))
    }
}
