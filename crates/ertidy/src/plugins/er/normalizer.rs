//! ER diagram normalizer
//!
//! Walks the input once, classifies each line, applies the repairs that fit
//! its kind and splices the results back into the original line.

use std::borrow::Cow;

use tracing::{debug, info, span, warn, Level};

use super::classifier::{AttributeLine, Classified, LineClassifier, LineKind, RelationshipLine};
use super::comment::find_comment;
use super::grammar::Grammar;
use super::identifier::{join_name_tokens, normalize_entity_name};
use super::label::camel_case_label;
use crate::core::{apply_edits, split_indent, split_lines, Edit, NormalizeReport, Normalizer};

/// Normalizer for Mermaid `erDiagram` source
///
/// Holds only an immutable grammar, so one instance can serve any number of
/// callers; all traversal state lives in the call.
#[derive(Debug, Clone, Default)]
pub struct ErNormalizer {
    grammar: Grammar,
}

impl ErNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grammar(grammar: Grammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn rewrite_line<'a>(
        &self,
        body: &'a str,
        classifier: &mut LineClassifier<'_>,
        report: &mut NormalizeReport,
    ) -> Cow<'a, str> {
        let (indent, content) = split_indent(body);
        let Classified {
            kind,
            code_len,
            has_comment,
        } = classifier.classify(content);
        let code = &content[..code_len];

        let edits = match &kind {
            LineKind::PassThrough => return Cow::Borrowed(body),
            LineKind::EntityFooter => Vec::new(),
            LineKind::EntityHeader(header) => self
                .entity_edit(code, header.name.clone(), report)
                .into_iter()
                .collect(),
            LineKind::Attribute(attribute) => {
                self.attribute_edit(code, attribute, report).into_iter().collect()
            }
            LineKind::Relationship(relationship) => {
                self.relationship_edits(code, relationship, report)
            }
        };

        if edits.is_empty() && !has_comment {
            return Cow::Borrowed(body);
        }
        if has_comment {
            report.comments_stripped += 1;
            debug!(kind = kind.name(), "Stripped trailing comment");
        }

        let mut line = String::with_capacity(body.len());
        line.push_str(indent);
        line.push_str(&apply_edits(code, edits));
        if has_comment {
            line.truncate(line.trim_end().len());
        }
        Cow::Owned(line)
    }

    fn entity_edit(
        &self,
        code: &str,
        range: std::ops::Range<usize>,
        report: &mut NormalizeReport,
    ) -> Option<Edit> {
        let name = &code[range.clone()];
        match normalize_entity_name(name) {
            Cow::Borrowed(_) => None,
            Cow::Owned(fixed) => {
                debug!(from = name, to = fixed.as_str(), "Repaired entity name");
                report.entity_names_repaired += 1;
                Some(Edit::new(range, fixed))
            }
        }
    }

    fn attribute_edit(
        &self,
        code: &str,
        attribute: &AttributeLine,
        report: &mut NormalizeReport,
    ) -> Option<Edit> {
        let (first, last) = match attribute.name.as_slice() {
            [first, .., last] => (first, last),
            _ => return None,
        };
        let pieces: Vec<&str> = attribute.name.iter().map(|r| &code[r.clone()]).collect();
        let joined = join_name_tokens(&pieces);
        let edit = Edit::new(first.start..last.end, joined.as_str());

        // Each of these would be read differently by the next pass
        if self.grammar.contains_operator(&joined)
            || self.grammar.is_key_modifier(&joined)
            || self.opens_comment(code, &[edit.clone()])
        {
            warn!(name = joined.as_str(), "Skipped joining attribute name");
            return None;
        }

        debug!(
            from = &code[first.start..last.end],
            to = joined.as_str(),
            "Joined split attribute name"
        );
        report.attribute_names_joined += 1;
        Some(edit)
    }

    fn relationship_edits(
        &self,
        code: &str,
        relationship: &RelationshipLine,
        report: &mut NormalizeReport,
    ) -> Vec<Edit> {
        let mut edits = Vec::new();
        edits.extend(self.entity_edit(code, relationship.left.clone(), report));
        edits.extend(self.entity_edit(code, relationship.right.clone(), report));

        if let Some(range) = &relationship.label {
            let label = &code[range.clone()];
            if let Cow::Owned(camel) = camel_case_label(label) {
                let edit = Edit::new(range.clone(), camel.as_str());
                let mut candidate = edits.clone();
                candidate.push(edit.clone());
                if self.opens_comment(code, &candidate) {
                    warn!(label, "Skipped camel-casing label");
                } else {
                    debug!(from = label, to = camel.as_str(), "Camel-cased label");
                    report.labels_camel_cased += 1;
                    edits.push(edit);
                }
            }
        }
        edits
    }

    /// Removing whitespace can glue `/ /` into a comment marker, which a
    /// second pass would then strip. Quotes anywhere earlier on the line
    /// decide whether it counts, so the whole rewritten line is checked.
    fn opens_comment(&self, code: &str, edits: &[Edit]) -> bool {
        let rewritten = apply_edits(code, edits.to_vec());
        find_comment(&rewritten, self.grammar.comment_marker()).is_some()
    }
}

impl Normalizer for ErNormalizer {
    fn normalize_with_report(&self, input: &str) -> (String, NormalizeReport) {
        let normalize_span = span!(Level::INFO, "normalize_er", input_len = input.len());
        let _enter = normalize_span.enter();

        let lines = split_lines(input);
        let mut report = NormalizeReport {
            lines_total: lines.len(),
            ..NormalizeReport::default()
        };
        let mut classifier = LineClassifier::new(&self.grammar);
        let mut output = String::with_capacity(input.len());

        for (index, line) in lines.iter().enumerate() {
            let rewritten = self.rewrite_line(line.body, &mut classifier, &mut report);
            if rewritten != line.body {
                report.changed_lines.push(index + 1);
            }
            output.push_str(&rewritten);
            output.push_str(line.terminator);
        }

        if let Some(entity) = classifier.state().current_entity() {
            warn!(entity, "Entity block not closed at end of input");
        }
        info!(
            lines = report.lines_total,
            changed = report.lines_changed(),
            repairs = report.repair_count(),
            "Normalization completed"
        );

        (output, report)
    }

    fn name(&self) -> &'static str {
        "er"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
