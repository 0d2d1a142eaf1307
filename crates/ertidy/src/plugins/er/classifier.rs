//! Line classifier with entity-block tracking
//!
//! Classification is a two-state machine: outside any entity block, or
//! inside one. Lines are handed in one at a time with indentation removed;
//! every span in the result is a byte range of that content.

use std::ops::Range;

use tracing::{trace, warn};

use super::comment::strip_comment;
use super::grammar::Grammar;
use crate::core::chumsky_utils::tokenize;

/// Where the traversal is relative to entity blocks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Outside,
    Inside {
        entity: String,
    },
}

impl BlockState {
    pub fn is_inside(&self) -> bool {
        matches!(self, BlockState::Inside { .. })
    }

    pub fn current_entity(&self) -> Option<&str> {
        match self {
            BlockState::Inside { entity } => Some(entity),
            BlockState::Outside => None,
        }
    }
}

/// `NAME {`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    /// The entity identifier, excluding any `["alias"]` suffix
    pub name: Range<usize>,
}

/// `type name [modifiers] ["comment"]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeLine {
    pub data_type: Option<Range<usize>>,
    /// One span per name token; more than one means the name was split
    pub name: Vec<Range<usize>>,
    pub modifiers: Vec<Range<usize>>,
    pub remark: Option<Range<usize>>,
}

/// `LEFT <operator> RIGHT [: label]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipLine {
    pub left: Range<usize>,
    pub operator: Range<usize>,
    pub right: Range<usize>,
    pub label: Option<Range<usize>>,
}

/// What kind of line the classifier saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    EntityHeader(HeaderLine),
    EntityFooter,
    Attribute(AttributeLine),
    Relationship(RelationshipLine),
    PassThrough,
}

impl LineKind {
    pub fn name(&self) -> &'static str {
        match self {
            LineKind::EntityHeader(_) => "entity-header",
            LineKind::EntityFooter => "entity-footer",
            LineKind::Attribute(_) => "attribute",
            LineKind::Relationship(_) => "relationship",
            LineKind::PassThrough => "pass-through",
        }
    }
}

/// A classified line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: LineKind,
    /// Length of the content once a trailing comment is cut off
    pub code_len: usize,
    /// Whether a trailing comment was found
    pub has_comment: bool,
}

/// Tags lines while tracking whether the traversal is inside an entity block
pub struct LineClassifier<'g> {
    grammar: &'g Grammar,
    state: BlockState,
}

impl<'g> LineClassifier<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            state: BlockState::Outside,
        }
    }

    pub fn state(&self) -> &BlockState {
        &self.state
    }

    /// Classify one line with its indentation already removed.
    pub fn classify(&mut self, content: &str) -> Classified {
        if self.grammar.is_directive(content) {
            trace!(kind = "pass-through", "Mermaid directive");
            return Classified {
                kind: LineKind::PassThrough,
                code_len: content.len(),
                has_comment: false,
            };
        }

        let code = strip_comment(content, self.grammar.comment_marker());
        // A marker is never empty, so stripping one always shortens the line
        let has_comment = code.len() < content.len();

        let kind = if self.state.is_inside() {
            self.classify_inside(code)
        } else {
            self.classify_outside(code)
        };
        trace!(
            kind = kind.name(),
            entity = self.state.current_entity(),
            "Classified line"
        );

        Classified {
            kind,
            code_len: code.len(),
            has_comment,
        }
    }

    fn classify_outside(&mut self, code: &str) -> LineKind {
        if let Some(relationship) = self.relationship(code) {
            return LineKind::Relationship(relationship);
        }
        if let Some(header) = self.header(code) {
            self.enter(code, &header);
            return LineKind::EntityHeader(header);
        }
        LineKind::PassThrough
    }

    fn classify_inside(&mut self, code: &str) -> LineKind {
        if code.trim() == "}" {
            self.state = BlockState::Outside;
            return LineKind::EntityFooter;
        }

        // A missing `}` must not turn the rest of the diagram into attributes.
        if let Some(relationship) = self.relationship(code) {
            if !code[relationship.left.clone()].contains(char::is_whitespace) {
                warn!(
                    entity = self.state.current_entity(),
                    "Entity block not closed before relationship line"
                );
                self.state = BlockState::Outside;
                return LineKind::Relationship(relationship);
            }
        }
        if let Some(header) = self.header(code) {
            warn!(
                entity = self.state.current_entity(),
                "Entity block not closed before next entity"
            );
            self.enter(code, &header);
            return LineKind::EntityHeader(header);
        }

        LineKind::Attribute(self.attribute(code))
    }

    fn enter(&mut self, code: &str, header: &HeaderLine) {
        self.state = BlockState::Inside {
            entity: code[header.name.clone()].to_string(),
        };
    }

    fn header(&self, code: &str) -> Option<HeaderLine> {
        let trimmed = code.trim_end();
        let before_brace = trimmed.strip_suffix('{')?.trim_end();
        if before_brace.is_empty() || self.grammar.contains_operator(trimmed) {
            return None;
        }
        let end = before_brace.find('[').unwrap_or(before_brace.len());
        let name = before_brace[..end].trim_end();
        if name.is_empty() {
            return None;
        }
        Some(HeaderLine {
            name: 0..name.len(),
        })
    }

    fn relationship(&self, code: &str) -> Option<RelationshipLine> {
        let operator = self.grammar.find_operator(code)?;

        let left = trimmed_range(code, 0..operator.start);
        let (right_end, label) = match code[operator.end..].find(':') {
            Some(offset) => {
                let colon = operator.end + offset;
                let label = trimmed_range(code, colon + 1..code.len());
                (colon, (!label.is_empty()).then_some(label))
            }
            None => (code.len(), None),
        };
        let right = trimmed_range(code, operator.end..right_end);

        if left.is_empty() || right.is_empty() {
            return None;
        }
        Some(RelationshipLine {
            left,
            operator,
            right,
            label,
        })
    }

    fn attribute(&self, code: &str) -> AttributeLine {
        let tokens = tokenize(code);
        let mut line = AttributeLine::default();
        let mut rest = tokens.into_iter();

        let Some(data_type) = rest.next() else {
            return line;
        };
        line.data_type = Some(data_type.span);

        let mut trailing = Vec::new();
        for token in rest.by_ref() {
            if token.is_quoted() || self.grammar.is_key_modifier(token.text) {
                trailing.push(token);
                break;
            }
            line.name.push(token.span);
        }
        trailing.extend(rest);

        for token in trailing {
            if token.is_quoted() {
                line.remark.get_or_insert(token.span);
            } else if self.grammar.is_key_modifier(token.text) {
                line.modifiers.push(token.span);
            }
        }
        line
    }
}

/// `range` shrunk to exclude surrounding whitespace in `text`
fn trimmed_range(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start().len());
    let end = range.start + slice.trim_end().len();
    start..end.max(start)
}
