//! Deduplication keys for saturation.
//!
//! Saturation repeatedly applies rules and adds newly produced `Node`s to a
//! stash. Regex-first rules are re-run on every pass, so without a stable key
//! the same atom would be added again and the fixpoint would never be reached.
//!
//! ## What counts as “the same node”
//!
//! - Segment span (`start`, `end`)
//! - Dimension (`dim`)
//! - Producing rule name (`rule_name`)
//! - The token value itself
//!
//! Including `rule_name` keeps distinct derivations of one span apart, which
//! the selection step needs for priority tie-breaking.

use crate::{DateMatch, Dimension, Lexeme, Node, NumeralData, PersonRecord, Place, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) dim: Dimension,
    pub(crate) rule_name: &'static str,
    pub(crate) kind_key: NodeKindKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum NodeKindKey {
    Numeral(i64, usize),
    Lexeme(Lexeme),
    Date(DateMatch),
    Person(PersonRecord),
    Place(Place),
    RegexMatch(String), // group 0 only
}

impl NodeKey {
    pub(crate) fn from_node(node: &Node) -> Self {
        let kind_key = match &node.token.kind {
            TokenKind::Numeral(NumeralData { value, digits }) => NodeKindKey::Numeral(*value, *digits),
            TokenKind::Lexeme(lexeme) => NodeKindKey::Lexeme(lexeme.clone()),
            TokenKind::Date(date) => NodeKindKey::Date(date.clone()),
            TokenKind::Person(person) => NodeKindKey::Person(person.clone()),
            TokenKind::Place(place) => NodeKindKey::Place(place.clone()),
            TokenKind::RegexMatch(groups) => {
                NodeKindKey::RegexMatch(groups.first().map(|s| s.as_str()).unwrap_or("").to_string())
            }
        };

        NodeKey {
            start: node.segments.start,
            end: node.segments.end,
            dim: node.token.dim,
            rule_name: node.rule_name,
            kind_key,
        }
    }
}
