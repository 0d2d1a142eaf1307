//! Core normalizer trait
//!
//! A normalizer rewrites diagram source into a syntactically clean form.
//! Implementations are pure: the same input always yields the same output,
//! and running a normalizer over its own output changes nothing.

use super::report::NormalizeReport;

/// Core trait for diagram normalizers
pub trait Normalizer: Send + Sync {
    /// Normalize diagram text
    fn normalize(&self, input: &str) -> String {
        self.normalize_with_report(input).0
    }

    /// Normalize diagram text and describe what was changed
    fn normalize_with_report(&self, input: &str) -> (String, NormalizeReport);

    /// Get the name of this normalizer
    fn name(&self) -> &'static str;

    /// Get the version of this normalizer
    fn version(&self) -> &'static str;
}
