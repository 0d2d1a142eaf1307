//! Diagram type detection trait
//!
//! Detectors inspect raw input and report whether it looks like the
//! diagram type they handle, with a confidence score.

/// Core trait for diagram type detectors
pub trait Detector: Send + Sync {
    /// Returns true if the input is recognized as this diagram type
    fn detect(&self, input: &str) -> bool;

    /// Confidence in `[0.0, 1.0]` that the input is this diagram type
    fn confidence(&self, input: &str) -> f64;

    /// Short name of the detected diagram type
    fn diagram_type(&self) -> &'static str;

    /// Keywords that introduce this diagram type
    fn patterns(&self) -> Vec<&'static str>;
}
