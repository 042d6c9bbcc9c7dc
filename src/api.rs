use crate::engine::{self, Matches, PassMetrics, RunResult};
use crate::{Dimension, KnownPerson, Node, PersonRecord, ResolvedPerson, ResolvedToken, Rule, TokenKind, Value};
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use std::time::Duration;

static DATE_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::date::rules::get);
static NAME_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::name::rules::get);

/// Extraction context.
///
/// Holds the environment needed to turn a written date into a calendar date.
#[derive(Debug, Clone)]
pub struct Context {
    /// The day extraction happens on. Dates before it roll over to next year.
    pub today: NaiveDate,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            Self { today: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap() }
        } else {
            Self { today: Local::now().date_naive() }
        }
    }
}

/// Options that affect name extraction.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Drop names lacking a first or last name. The next candidate at the
    /// same position (if any) is tried instead.
    pub require_full_name: bool,
}

/// A resolved value found in the input.
///
/// `start`/`end` are byte offsets into the original input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<T> {
    pub value: T,
    /// Slice of the original input that matched.
    pub body: String,
    pub start: usize,
    /// Exclusive.
    pub end: usize,
    /// Name of the grammar rule that produced the match.
    pub rule: &'static str,
}

/// A compact per-pass saturation trace.
#[derive(Debug, Clone)]
pub struct SaturationPass {
    pub pass: usize,
    pub duration: Duration,
    pub produced: usize,
    pub rules_considered: usize,
    pub rules_seeded: usize,
    pub samples: Vec<NodeSummary>,
}

/// A compact node summary used in verbose traces.
#[derive(Debug, Clone)]
pub struct NodeSummary {
    pub start: usize,
    pub end: usize,
    pub rule: String,
    pub preview: String,
}

/// Debug details of one extractor run.
#[derive(Debug, Clone)]
pub struct ExtractionDetails {
    pub total: Duration,
    pub saturation_total: Duration,
    pub saturation: Vec<SaturationPass>,
    /// Names of rules that were active for this input.
    pub active_rules: Vec<String>,
    /// Every final candidate, in selection order, before overlap removal.
    pub candidates: Vec<NodeSummary>,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub text: String,
    pub dates: Vec<Match<NaiveDate>>,
    pub persons: Vec<Match<PersonRecord>>,
    pub date_details: ExtractionDetails,
    pub name_details: ExtractionDetails,
}

fn run(text: &str, rules: &'static [Rule], target: Dimension) -> RunResult {
    engine::Parser::new(text, rules).run(&[target])
}

/// Dates in `text`, left to right, relative to today's local date.
///
/// # Example
/// ```
/// use vestnik::{Context, extract_dates_with};
/// use chrono::NaiveDate;
///
/// let ctx = Context { today: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap() };
/// let dates: Vec<_> = extract_dates_with("5 сентября, встречаемся в 10", &ctx).collect();
/// assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()]);
/// ```
pub fn extract_dates(text: &str) -> impl Iterator<Item = NaiveDate> + use<> {
    extract_dates_with(text, &Context::default())
}

/// Dates in `text`, left to right, relative to `context.today`.
///
/// The returned iterator is lazy: each date is validated and normalized only
/// when requested. Calling this again on the same text yields the same dates.
pub fn extract_dates_with(text: &str, context: &Context) -> impl Iterator<Item = NaiveDate> + use<> {
    let run = run(text, &DATE_RULES, Dimension::Date);
    Matches::new(run.candidates, context.clone(), Options::default()).filter_map(|rt| match rt.value {
        Value::Date(date) => Some(date),
        _ => None,
    })
}

/// Personal names in `text`, left to right.
///
/// # Example
/// ```
/// use vestnik::extract_persons;
///
/// let person = extract_persons("Иванов Иван Иванович придет").next().unwrap();
/// assert_eq!(person.to_string(), "Иванов Иван Иванович");
/// assert!(person.is_full());
/// ```
pub fn extract_persons(text: &str) -> impl Iterator<Item = PersonRecord> + use<> {
    extract_persons_with(text, &Options::default())
}

pub fn extract_persons_with(text: &str, options: &Options) -> impl Iterator<Item = PersonRecord> + use<> {
    let run = run(text, &NAME_RULES, Dimension::Name);
    Matches::new(run.candidates, Context::default(), options.clone()).filter_map(|rt| match rt.value {
        Value::Person(person) => Some(person),
        _ => None,
    })
}

/// Personal names in `text`, each looked up in `registry`.
pub fn resolve_persons<'r>(
    text: &str,
    registry: &'r [KnownPerson],
) -> impl Iterator<Item = ResolvedPerson<'r>> + use<'r> {
    resolve_persons_with(text, registry, &Options::default())
}

pub fn resolve_persons_with<'r>(
    text: &str,
    registry: &'r [KnownPerson],
    options: &Options,
) -> impl Iterator<Item = ResolvedPerson<'r>> + use<'r> {
    extract_persons_with(text, options).map(move |record| ResolvedPerson::new(record, registry))
}

/// Run both extractors over `text` and return the matches with debug details.
///
/// This is useful for rule debugging. The iterator-based functions above do
/// not allocate these traces.
pub fn extract_verbose_with(text: &str, context: &Context, options: &Options) -> ExtractionReport {
    let (date_matches, date_details) = verbose_run(text, &DATE_RULES, Dimension::Date, context, options);
    let (name_matches, name_details) = verbose_run(text, &NAME_RULES, Dimension::Name, context, options);

    let dates = date_matches
        .into_iter()
        .filter_map(|(m, value)| match value {
            Value::Date(date) => Some(m.with_value(date)),
            _ => None,
        })
        .collect();
    let persons = name_matches
        .into_iter()
        .filter_map(|(m, value)| match value {
            Value::Person(person) => Some(m.with_value(person)),
            _ => None,
        })
        .collect();

    ExtractionReport { text: text.to_string(), dates, persons, date_details, name_details }
}

impl Match<()> {
    fn with_value<T>(self, value: T) -> Match<T> {
        Match { value, body: self.body, start: self.start, end: self.end, rule: self.rule }
    }
}

fn verbose_run(
    text: &str,
    rules: &'static [Rule],
    target: Dimension,
    context: &Context,
    options: &Options,
) -> (Vec<(Match<()>, Value)>, ExtractionDetails) {
    let parser = engine::Parser::new(text, rules).traced();
    let active_rules = parser.active_rule_names().into_iter().map(str::to_string).collect();
    let run = parser.run(&[target]);

    let candidates = run.candidates.iter().map(node_to_summary).collect();
    let matches = Matches::new(run.candidates, context.clone(), options.clone())
        .map(|rt| resolved_to_match(text, rt))
        .collect();

    let saturation_metrics = &run.metrics.saturation;
    let saturation = std::iter::once(&saturation_metrics.atoms)
        .chain(saturation_metrics.compositions.iter())
        .enumerate()
        .map(|(pass, metrics)| pass_summary(pass, metrics))
        .collect();

    let details = ExtractionDetails {
        total: run.metrics.total,
        saturation_total: saturation_metrics.total,
        saturation,
        active_rules,
        candidates,
    };
    (matches, details)
}

fn pass_summary(pass: usize, metrics: &PassMetrics) -> SaturationPass {
    SaturationPass {
        pass,
        duration: metrics.duration,
        produced: metrics.produced,
        rules_considered: metrics.rules_considered,
        rules_seeded: metrics.rules_seeded,
        samples: metrics.nodes.iter().take(8).map(node_to_summary).collect(),
    }
}

fn resolved_to_match(input: &str, rt: ResolvedToken) -> (Match<()>, Value) {
    let start = rt.node.range.start;
    let end = rt.node.range.end;
    let body = input.get(start..end).unwrap_or("").to_string();

    (Match { value: (), body, start, end, rule: rt.node.rule_name }, rt.value)
}

fn node_to_summary(node: &Node) -> NodeSummary {
    NodeSummary {
        start: node.range.start,
        end: node.range.end,
        rule: node.rule_name.to_string(),
        preview: format_token_preview(&node.token.kind),
    }
}

fn format_token_preview(kind: &TokenKind) -> String {
    let s = match kind {
        TokenKind::Numeral(n) => format!("({})", n.value),
        TokenKind::Lexeme(lexeme) => format!("{:?}", lexeme),
        TokenKind::Date(date) => format!("{:?}", date),
        TokenKind::Person(person) => format!("«{}»", person),
        TokenKind::Place(place) => format!("place {}", place.word),
        TokenKind::RegexMatch(groups) => groups.first().cloned().unwrap_or_default(),
    };
    s.chars().take(80).collect()
}
