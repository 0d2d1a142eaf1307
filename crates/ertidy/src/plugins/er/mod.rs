//! Entity-relationship diagram plugin
//!
//! Repairs the syntax defects generators typically leave in `erDiagram`
//! source: trailing `//` comments, attribute names split by a space,
//! multi-word relationship labels and hyphenated entity names.

mod classifier;
mod comment;
mod detector;
mod grammar;
mod identifier;
mod label;
mod normalizer;

pub use classifier::{
    AttributeLine, BlockState, Classified, HeaderLine, LineClassifier, LineKind, RelationshipLine,
};
pub use comment::{find_comment, strip_comment};
pub use detector::ErDetector;
pub use grammar::{Grammar, GrammarBuilder, KEY_MODIFIERS, LEFT_MARKERS, LINE_STYLES, RIGHT_MARKERS};
pub use identifier::{join_name_tokens, normalize_entity_name};
pub use label::camel_case_label;
pub use normalizer::ErNormalizer;
