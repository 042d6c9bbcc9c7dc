//! Matching and saturation parser.
//!
//! This module is the operational core of the engine:
//!
//! - Segment the input and select the rules whose buckets are present
//!   (see `compiled_rules.rs` and `trigger.rs`).
//! - Repeatedly apply those rules to build up a `Stash` of `Node`s.
//! - Deduplicate produced nodes to keep saturation finite (see `dedup.rs`).
//! - Order the final-dimension nodes for selection (see `matches.rs`).
//!
//! ## Key concepts
//!
//! - **Rule** (`crate::Rule`): a sequence of `Pattern`s with a production.
//! - **Node** (`crate::Node`): a produced token with a segment span.
//! - **Stash** (`crate::Stash`): the growing set of discovered nodes.
//! - **Saturation**: apply rules until an iteration produces no new nodes.
//!
//! ## Pass structure
//!
//! ```text
//! (0) segment + trigger scan -> buckets
//! (1) initial regex pass     -> atoms from segments (numbers, month names, name parts)
//! (2) iterative passes       -> predicate rules compose atoms into dates / names
//! (3) candidate ordering     -> start asc, span length desc, priority desc
//! ```
//!
//! Output is deterministic given the same input, rules and context.

use super::compiled_rules::{CompiledRules, DimensionSet};
use super::dedup::NodeKey;
use super::metrics::{PassMetrics, RunMetrics, RunResult, SaturationMetrics};
use super::trigger::TriggerInfo;
use crate::segment::{Segment, segment};
use crate::{Dimension, Node, Pattern, Range, Rule, Stash, Token, TokenKind};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// A partially matched rule as the engine advances through its pattern.
///
/// ```text
/// pattern: [Predicate(is_day), Regex("\."), Predicate(is_month)]
///                              ^ next_idx once the day is consumed
///
/// route: [ Node(segments 0..1, "5") ]
/// position: 1 (the segment right after the last consumed node)
/// ```
struct PartialMatch<'a> {
    rule: &'a Rule,
    next_idx: usize,
    position: usize,
    route: Vec<Node>,
}

/// Parser orchestrates applying `Rule`s against an input string.
///
/// Usage: `Parser::new(input, &rules).run(&[Dimension::Date])`.
///
/// ```text
/// new() -> saturate() -> ordered_candidates()
///            └─ repeatedly grow stash using rules
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    segments: Vec<Segment<'a>>,
    stash: Stash,
    /// Keys of every node already in the stash.
    seen: HashSet<NodeKey>,
    compiled: CompiledRules<'a>,
    /// Active rules whose first pattern is a `Regex`.
    regex_rules: Vec<&'a Rule>,
    /// Active rules whose first pattern is a `Predicate`.
    predicate_rules: Vec<&'a Rule>,
    /// Keep per-pass node lists in the metrics.
    traced: bool,
}

impl<'a> Parser<'a> {
    /// Create a new `Parser` for `input` using pre-compiled rules.
    pub fn new_compiled(input: &'a str, compiled: CompiledRules<'a>) -> Self {
        let segments = segment(input);
        let trigger_info = TriggerInfo::scan(&segments);
        tracing::debug!(target: "vestnik::engine", buckets = ?trigger_info.buckets, segments = segments.len(), "trigger scan");

        let active_ids = compiled.active_ids(trigger_info.buckets);
        tracing::debug!(target: "vestnik::engine", "{}/{} rules active", active_ids.len(), compiled.rules.len());

        let active: Vec<&'a Rule> = active_ids.iter().map(|&id| compiled.rules[id]).collect();
        let regex_rules: Vec<&Rule> =
            active.iter().copied().filter(|r| matches!(r.pattern.first(), Some(Pattern::Regex(_)))).collect();
        let predicate_rules: Vec<&Rule> =
            active.iter().copied().filter(|r| matches!(r.pattern.first(), Some(Pattern::Predicate(_)))).collect();

        Parser {
            input,
            segments,
            stash: Stash::empty(),
            seen: HashSet::new(),
            compiled,
            regex_rules,
            predicate_rules,
            traced: false,
        }
    }

    /// Create a new `Parser` for `input` using `rules`.
    ///
    /// Rules starting with a regex seed the first pass from raw segments;
    /// rules starting with a predicate build on what the stash already holds.
    pub fn new(input: &'a str, rules: &'a [Rule]) -> Self {
        Self::new_compiled(input, CompiledRules::new(rules))
    }

    /// Record the nodes produced by each pass in the run metrics.
    pub fn traced(mut self) -> Self {
        self.traced = true;
        self
    }

    pub(crate) fn active_rule_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.regex_rules.iter().chain(self.predicate_rules.iter()).map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    fn regex_node(&self, pat: &regex::Regex, position: usize) -> Option<Node> {
        let seg = self.segments.get(position)?;
        let caps = pat.captures(seg.text)?;
        let groups: Vec<String> = caps.iter().map(|g| g.map(|g| g.as_str().to_string()).unwrap_or_default()).collect();
        Some(Node {
            range: Range { start: seg.start, end: seg.end },
            segments: Range { start: position, end: position + 1 },
            token: Token { dim: Dimension::RegexMatch, kind: TokenKind::RegexMatch(groups) },
            rule_name: "<regex>",
        })
    }

    /// Find nodes that match `pat` and start exactly at segment `position`.
    ///
    /// ```text
    /// input: "5 сентября"     segments: [5][сентября]
    /// position: 1
    /// Pattern::Regex(month)    -> Node at segments 1..2
    /// Pattern::Predicate(p)    -> stash nodes starting at segment 1
    /// ```
    fn lookup_item(&self, pat: &Pattern, position: usize) -> Vec<Node> {
        match pat {
            Pattern::Regex(re) => self.regex_node(re, position).into_iter().collect(),
            Pattern::Predicate(pred) => self.stash.starting_at(position).filter(|n| pred(&n.token)).cloned().collect(),
        }
    }

    /// Find nodes that match `pat` anywhere in the input.
    fn lookup_item_anywhere(&self, pat: &Pattern) -> Vec<Node> {
        match pat {
            Pattern::Regex(re) => (0..self.segments.len()).filter_map(|pos| self.regex_node(re, pos)).collect(),
            Pattern::Predicate(pred) => self.stash.nodes().iter().filter(|n| pred(&n.token)).cloned().collect(),
        }
    }

    /// Match a rule's first pattern anywhere and return a `PartialMatch` per hit.
    fn seed_first_pattern_anywhere(&self, rule: &'a Rule) -> Vec<PartialMatch<'a>> {
        let Some(first) = rule.pattern.first() else {
            return Vec::new();
        };
        self.lookup_item_anywhere(first)
            .into_iter()
            .map(|node| PartialMatch { rule, next_idx: 1, position: node.segments.end, route: vec![node] })
            .collect()
    }

    /// Depth-first expansion of `PartialMatch`es until the rule is satisfied.
    ///
    /// ```text
    /// [m0] --Regex--> [m1] --Predicate--> [m2]
    ///   │                           │
    ///   └─ (dead end, dropped)      └─ success -> collected
    /// ```
    fn match_all(&self, input_matches: Vec<PartialMatch<'a>>) -> Vec<PartialMatch<'a>> {
        let mut results = Vec::new();
        let mut stack: Vec<PartialMatch<'a>> = input_matches;

        while let Some(m) = stack.pop() {
            if m.next_idx >= m.rule.pattern.len() {
                results.push(m);
                continue;
            }

            let pat = &m.rule.pattern[m.next_idx];
            let nodes = self.lookup_item(pat, m.position);

            // Push in reverse order so we explore them in forward order (stack is LIFO)
            for node in nodes.into_iter().rev() {
                let mut route = m.route.clone();
                let position = node.segments.end;
                route.push(node);
                stack.push(PartialMatch { rule: m.rule, next_idx: m.next_idx + 1, position, route });
            }
        }

        results
    }

    /// Turn a completed `PartialMatch` into a `Node` via the rule's production.
    ///
    /// ```text
    /// route tokens ──> production closure ──> Token ──> Node spanning route
    /// ```
    fn produce_node(&self, m: &PartialMatch) -> Option<Node> {
        if m.next_idx < m.rule.pattern.len() {
            return None;
        }
        let (first, last) = (m.route.first()?, m.route.last()?);
        let tokens: Vec<Token> = m.route.iter().map(|n| n.token.clone()).collect();

        let Some(token) = (m.rule.production)(&tokens) else {
            tracing::trace!(target: "vestnik::engine", rule = m.rule.name, "production declined");
            return None;
        };

        let range = Range { start: first.range.start, end: last.range.end };
        tracing::trace!(
            target: "vestnik::engine",
            rule = m.rule.name,
            text = &self.input[range.start..range.end],
            token = ?token,
            "production ok"
        );

        Some(Node {
            range,
            segments: Range { start: first.segments.start, end: last.segments.end },
            token,
            rule_name: m.rule.name,
        })
    }

    /// Apply a set of rules once; returns the produced nodes plus counts of
    /// rules considered and rules seeded.
    fn apply_rules_once(&self, rule_set: &[&'a Rule]) -> (Vec<Node>, usize, usize) {
        let mut discovered = Vec::new();
        let mut rules_seeded = 0;

        for rule in rule_set {
            let starts = self.seed_first_pattern_anywhere(rule);
            if starts.is_empty() {
                continue;
            }
            rules_seeded += 1;

            for m in self.match_all(starts) {
                if let Some(node) = self.produce_node(&m) {
                    discovered.push(node);
                }
            }
        }
        (discovered, rule_set.len(), rules_seeded)
    }

    fn dimensions_in_stash(&self) -> DimensionSet {
        self.stash.nodes().iter().fold(DimensionSet::empty(), |dims, node| dims | DimensionSet::of(node.token.dim))
    }

    fn deps_satisfied(rule: &Rule, dims_in_stash: DimensionSet) -> bool {
        rule.deps.iter().all(|&dep| dims_in_stash.contains(DimensionSet::of(dep)))
    }

    /// Keep nodes not seen before; returns them as a stash.
    fn admit(&mut self, discovered: Vec<Node>) -> Stash {
        let mut newly_added = Stash::empty();
        for node in discovered {
            if self.seen.insert(NodeKey::from_node(&node)) {
                newly_added.insert(node);
            }
        }
        newly_added
    }

    fn pass_metrics(&self, started: Instant, added: &Stash, considered: usize, seeded: usize) -> PassMetrics {
        PassMetrics {
            duration: started.elapsed(),
            produced: added.len(),
            nodes: if self.traced { added.nodes().to_vec() } else { Vec::new() },
            rules_considered: considered,
            rules_seeded: seeded,
        }
    }

    /// Saturate the stash by repeatedly applying rules until a fixpoint.
    ///
    /// ```text
    /// regex_rules pass
    ///      │
    ///      ▼
    ///  stash grows ──┐
    ///                │ predicate + regex passes
    ///                └── repeat until fixed point
    /// ```
    fn saturate(&mut self) -> SaturationMetrics {
        let mut metrics = SaturationMetrics::default();
        let saturation_start = Instant::now();

        let regex_start = Instant::now();
        let regex_rules = self.regex_rules.clone();
        let (discovered, considered, seeded) = self.apply_rules_once(&regex_rules);
        let newly_added = self.admit(discovered);
        metrics.atoms = self.pass_metrics(regex_start, &newly_added, considered, seeded);
        if newly_added.null() {
            metrics.total = saturation_start.elapsed();
            return metrics;
        }
        self.stash.extend(newly_added);

        let mut all_saturate_rules: Vec<&Rule> = Vec::new();
        all_saturate_rules.extend(self.predicate_rules.iter().copied());
        all_saturate_rules.extend(self.regex_rules.iter().copied());

        loop {
            let iteration_start = Instant::now();

            let dims_in_stash = self.dimensions_in_stash();
            let saturate_rules: Vec<&Rule> =
                all_saturate_rules.iter().filter(|rule| Self::deps_satisfied(rule, dims_in_stash)).copied().collect();

            let (discovered, considered, seeded) = self.apply_rules_once(&saturate_rules);
            let newly_added = self.admit(discovered);
            metrics.compositions.push(self.pass_metrics(iteration_start, &newly_added, considered, seeded));
            tracing::debug!(
                target: "vestnik::engine",
                pass = metrics.compositions.len(),
                produced = newly_added.len(),
                "saturation pass"
            );
            if newly_added.null() {
                break;
            }
            self.stash.extend(newly_added);
        }

        metrics.total = saturation_start.elapsed();
        metrics
    }

    /// Nodes of the `targets` dimensions in selection order: leftmost first,
    /// then the longest span, then the higher rule priority.
    fn ordered_candidates(&self, targets: &[Dimension]) -> Vec<Node> {
        let rule_priority: HashMap<&str, u16> = self.compiled.rules.iter().map(|r| (r.name, r.priority)).collect();
        let priority = |node: &Node| rule_priority.get(node.rule_name).copied().unwrap_or(0);

        let mut candidates: Vec<Node> =
            self.stash.nodes().iter().filter(|n| targets.contains(&n.token.dim)).cloned().collect();

        candidates.sort_by(|a, b| {
            a.segments
                .start
                .cmp(&b.segments.start)
                .then(b.segments.len().cmp(&a.segments.len()))
                .then(priority(b).cmp(&priority(a)))
        });
        candidates
    }

    /// Saturate the stash and return the ordered candidates of `targets`
    /// together with timing details.
    pub fn run(mut self, targets: &[Dimension]) -> RunResult {
        let total_start = Instant::now();
        let saturation = self.saturate();
        let candidates = self.ordered_candidates(targets);

        RunResult { candidates, metrics: RunMetrics { total: total_start.elapsed(), saturation } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lexeme, NumeralData};

    fn rules() -> Vec<Rule> {
        vec![
            rule! {
                name: "integer",
                pattern: [re!(r"(\d+)")],
                prod: |tokens: &[Token]| -> Option<NumeralData> {
                    let TokenKind::RegexMatch(groups) = &tokens.first()?.kind else { return None };
                    let digits = groups.get(1)?;
                    Some(NumeralData { value: digits.parse().ok()?, digits: digits.len() })
                },
            },
            rule! {
                name: "year word",
                pattern: [re!(r"года")],
                prod: |_tokens: &[Token]| -> Option<Lexeme> { Some(Lexeme::YearWord) },
            },
            rule! {
                name: "number + year word",
                pattern: [
                    pred!(|t: &Token| matches!(t.kind, TokenKind::Numeral(_))),
                    pred!(|t: &Token| matches!(t.kind, TokenKind::Lexeme(Lexeme::YearWord))),
                ],
                deps: [Dimension::Numeral, Dimension::Lexeme],
                prod: |tokens: &[Token]| -> Option<Lexeme> {
                    match &tokens.first()?.kind {
                        TokenKind::Numeral(n) if n.value == 2024 => Some(Lexeme::MonthName(1)),
                        _ => None,
                    }
                },
            },
        ]
    }

    #[test]
    fn saturation_composes_atoms_across_passes() {
        let rules = rules();
        let run = Parser::new("в 2024 года", &rules).run(&[Dimension::Lexeme]);

        let spans: Vec<(usize, usize, &str)> =
            run.candidates.iter().map(|n| (n.segments.start, n.segments.end, n.rule_name)).collect();
        assert_eq!(spans, vec![(1, 3, "number + year word"), (2, 3, "year word")]);
        assert_eq!(run.metrics.saturation.atoms.produced, 2);
        // One pass composes, the next one finds nothing new.
        assert_eq!(run.metrics.saturation.compositions.len(), 2);
    }

    #[test]
    fn regex_matches_whole_segments_only() {
        let rules = rules();
        let run = Parser::new("2024годами", &rules).run(&[Dimension::Lexeme]);
        assert!(run.candidates.is_empty());
    }

    #[test]
    fn productions_returning_none_add_nothing() {
        let rules = rules();
        let run = Parser::new("1999 года", &rules).run(&[Dimension::Lexeme]);
        let names: Vec<&str> = run.candidates.iter().map(|n| n.rule_name).collect();
        assert_eq!(names, vec!["year word"]);
    }

    #[test]
    fn traced_runs_keep_nodes() {
        let rules = rules();
        let run = Parser::new("2024 года", &rules).traced().run(&[Dimension::Lexeme]);
        assert_eq!(run.metrics.saturation.atoms.nodes.len(), 2);
    }
}
