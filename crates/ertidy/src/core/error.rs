//! Core error types for diagram normalization
//!
//! Normalization itself never fails; these errors cover the fallible edges
//! around it: grammar construction and diagram detection.

use thiserror::Error;

/// Errors raised outside the (infallible) normalization pass
#[derive(Error, Debug)]
pub enum TidyError {
    #[error("Invalid grammar: {message}")]
    InvalidGrammar { message: String },

    #[error("Unknown diagram type: {diagram_type}")]
    UnknownDiagramType { diagram_type: String },
}

impl TidyError {
    /// Create a new grammar error
    pub fn invalid_grammar(message: impl Into<String>) -> Self {
        Self::InvalidGrammar {
            message: message.into(),
        }
    }

    /// Create a new detection error
    pub fn unknown_diagram_type(diagram_type: impl Into<String>) -> Self {
        Self::UnknownDiagramType {
            diagram_type: diagram_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grammar() {
        let error = TidyError::invalid_grammar("empty cardinality operator");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid grammar"));
        assert!(error_msg.contains("empty cardinality operator"));
    }

    #[test]
    fn test_unknown_diagram_type() {
        let error = TidyError::unknown_diagram_type("flowchart");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unknown diagram type"));
        assert!(error_msg.contains("flowchart"));
    }
}
