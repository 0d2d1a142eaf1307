//! Summary of the repairs made by one normalization pass

use std::fmt;

/// Counters describing what a normalization pass changed
///
/// Line numbers are 1-based, matching how editors and diffs display them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Number of lines in the input
    pub lines_total: usize,
    /// Lines whose content differs from the input
    pub changed_lines: Vec<usize>,
    /// `//` comments removed
    pub comments_stripped: usize,
    /// Entity name occurrences rewritten from hyphens to underscores
    pub entity_names_repaired: usize,
    /// Attribute names rejoined from several tokens
    pub attribute_names_joined: usize,
    /// Relationship labels collapsed into camelCase
    pub labels_camel_cased: usize,
}

impl NormalizeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines that were rewritten
    pub fn lines_changed(&self) -> usize {
        self.changed_lines.len()
    }

    /// True when the input was already clean
    pub fn is_clean(&self) -> bool {
        self.changed_lines.is_empty()
    }

    /// Total number of individual repairs
    pub fn repair_count(&self) -> usize {
        self.comments_stripped
            + self.entity_names_repaired
            + self.attribute_names_joined
            + self.labels_camel_cased
    }
}

impl fmt::Display for NormalizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} lines changed ({} comments stripped, {} entity names repaired, {} attribute names joined, {} labels camel-cased)",
            self.lines_changed(),
            self.lines_total,
            self.comments_stripped,
            self.entity_names_repaired,
            self.attribute_names_joined,
            self.labels_camel_cased
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let report = NormalizeReport::new();
        assert!(report.is_clean());
        assert_eq!(report.lines_changed(), 0);
        assert_eq!(report.repair_count(), 0);
    }

    #[test]
    fn test_repair_count_sums_all_kinds() {
        let report = NormalizeReport {
            lines_total: 10,
            changed_lines: vec![2, 5],
            comments_stripped: 1,
            entity_names_repaired: 2,
            attribute_names_joined: 1,
            labels_camel_cased: 3,
        };
        assert!(!report.is_clean());
        assert_eq!(report.lines_changed(), 2);
        assert_eq!(report.repair_count(), 7);
    }

    #[test]
    fn test_display() {
        let report = NormalizeReport {
            lines_total: 4,
            changed_lines: vec![3],
            labels_camel_cased: 1,
            ..Default::default()
        };
        let text = report.to_string();
        assert!(text.starts_with("1/4 lines changed"));
        assert!(text.contains("1 labels camel-cased"));
    }
}
