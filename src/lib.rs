extern crate self as vestnik;

use regex::Regex;
use std::collections::HashMap;

#[macro_use]
mod macros;
mod api;
mod date;
mod engine;
mod person;
mod post;
mod registry;
mod rules;
mod segment;

pub use api::{
    Context, ExtractionDetails, ExtractionReport, Match, NodeSummary, Options, SaturationPass, extract_dates,
    extract_dates_with, extract_persons, extract_persons_with, extract_verbose_with, resolve_persons,
    resolve_persons_with,
};
pub use date::DateMatch;
pub use person::{KnownPerson, PersonRecord, ResolvedPerson, resolve};
pub use post::{Post, TagError, TagPolicy, date_label, is_admin, notification_targets, parse_tags, person_list};
pub use registry::{Admin, Registry, RegistryError, load_admins};
pub use segment::{Segment, SegmentKind, segment, title_case};

use crate::rules::name::lexicon::NamePart;

// --- Internal types ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dimension {
    /// Integer segments.
    Numeral,
    /// Single-word facts: month names, year markers, name components.
    Lexeme,
    /// Complete date expressions.
    Date,
    /// Complete personal names.
    Name,
    RegexMatch,
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub dim: Dimension,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumeralData {
    pub value: i64,
    /// Number of digits as written, leading zeros included ("09" has 2).
    pub digits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Lexeme {
    MonthName(u32),
    YearWord,
    Name(NamePart),
}

#[derive(Debug, Clone)]
pub(crate) enum TokenKind {
    Numeral(NumeralData),
    Lexeme(Lexeme),
    Date(DateMatch),
    Person(PersonRecord),
    Place(Place),
    RegexMatch(Vec<String>),
}

/// A surname-shaped word read as a place ("в Саратове"). It claims its span
/// in the name dimension without yielding a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Place {
    pub word: String,
}

// Trait to convert rule production results into tokens
pub(crate) trait IntoToken {
    fn into_token(self) -> Option<Token>;
}

impl IntoToken for NumeralData {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Numeral, kind: TokenKind::Numeral(self) })
    }
}

impl IntoToken for Lexeme {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Lexeme, kind: TokenKind::Lexeme(self) })
    }
}

impl IntoToken for DateMatch {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Date, kind: TokenKind::Date(self) })
    }
}

impl IntoToken for PersonRecord {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Name, kind: TokenKind::Person(self) })
    }
}

impl IntoToken for Place {
    fn into_token(self) -> Option<Token> {
        Some(Token { dim: Dimension::Name, kind: TokenKind::Place(self) })
    }
}

// Pattern items used by rules: either a Regex matched against one segment of
// the input, or a Predicate that matches an existing token in the stash.
#[derive(Debug)]
pub(crate) enum Pattern {
    /// Match a regular expression against a whole segment. The `Regex` is a
    /// static reference created by the `regex!` macro, which anchors it.
    Regex(&'static Regex),

    /// Match an already-discovered `Token` starting at the current segment.
    Predicate(fn(&Token) -> bool),
}

pub(crate) type Production = Box<dyn Fn(&[Token]) -> Option<Token> + Send + Sync>;

/// A grammar rule: a name, a positional `pattern` and a `production` that
/// receives the matched tokens and optionally returns a new `Token`.
pub(crate) struct Rule {
    pub name: &'static str,
    pub pattern: Vec<Pattern>,
    pub production: Production,
    /// Bucket mask - rule only activates if input has matching buckets.
    pub buckets: u32,
    /// Required dimensions in stash before this rule activates.
    pub deps: &'static [Dimension],
    /// Priority for tie-breaking between equal spans (higher = preferred).
    pub priority: u16,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("production", &"<function>")
            .field("buckets", &self.buckets)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Range {
    pub start: usize,
    /// Exclusive.
    pub end: usize,
}

impl Range {
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Parse tree node produced by rules.
///
/// `segments` indexes into the segmented input; `range` is the byte span of
/// the original text those segments cover.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub range: Range,
    pub segments: Range,
    pub token: Token,
    /// Name of the rule that produced this node.
    pub rule_name: &'static str,
}

/// Resolved value of a final node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value {
    Date(chrono::NaiveDate),
    Person(PersonRecord),
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedToken {
    pub node: Node,
    pub value: Value,
}

// --- Stash: lightweight container for discovered nodes ----------------------

/// Discovered nodes, indexed by their first segment.
#[derive(Debug, Clone, Default)]
pub(crate) struct Stash {
    nodes: Vec<Node>,
    /// Positions in `nodes` keyed by `segments.start`.
    by_start: HashMap<usize, Vec<usize>>,
}

impl Stash {
    pub fn empty() -> Self {
        Stash::default()
    }

    pub fn null(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes whose first segment is `position`.
    pub fn starting_at(&self, position: usize) -> impl Iterator<Item = &Node> {
        self.by_start.get(&position).into_iter().flatten().map(|&idx| &self.nodes[idx])
    }

    /// Append all nodes of `other`, keeping segment order.
    pub fn extend(&mut self, other: Stash) {
        self.nodes.extend(other.nodes);
        self.nodes.sort_by_key(|n| (n.segments.start, n.segments.end));
        self.by_start.clear();
        for (idx, node) in self.nodes.iter().enumerate() {
            self.by_start.entry(node.segments.start).or_default().push(idx);
        }
    }

    pub fn insert(&mut self, node: Node) {
        self.by_start.entry(node.segments.start).or_default().push(self.nodes.len());
        self.nodes.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(start: usize, end: usize, rule_name: &'static str) -> Node {
        Node {
            range: Range { start, end },
            segments: Range { start, end },
            token: Token { dim: Dimension::Lexeme, kind: TokenKind::Lexeme(Lexeme::YearWord) },
            rule_name,
        }
    }

    fn rules_at(stash: &Stash, position: usize) -> Vec<&'static str> {
        stash.starting_at(position).map(|n| n.rule_name).collect()
    }

    #[test]
    fn stash_looks_up_nodes_by_start_segment() {
        let mut stash = Stash::empty();
        stash.insert(node(2, 3, "c"));
        stash.insert(node(0, 1, "a"));

        let mut added = Stash::empty();
        added.insert(node(0, 2, "b"));
        added.insert(node(5, 6, "d"));
        stash.extend(added);

        assert_eq!(stash.len(), 4);
        assert_eq!(rules_at(&stash, 0), vec!["a", "b"]);
        assert_eq!(rules_at(&stash, 2), vec!["c"]);
        assert_eq!(rules_at(&stash, 5), vec!["d"]);
        assert!(rules_at(&stash, 1).is_empty());
        assert!(rules_at(&stash, 9).is_empty());
    }
}
