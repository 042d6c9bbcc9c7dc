//! Token resolution.
//!
//! Saturation produces `Node`s. Resolution turns a final node into a value:
//!
//! ```text
//! Node ──┬─ Date       -> normalize() against Context::today -> NaiveDate
//!        ├─ Name       -> PersonRecord (subject to Options)
//!        ├─ Place      -> claims the span, no value
//!        └─ everything else (atoms, raw regex) -> filtered
//! ```
//!
//! A rejection is not an error. An invalid node (an impossible date, a place)
//! still claims its span, so nothing shorter inside it is tried. A filtered
//! node only drops out and lets the next candidate at its position compete.

use crate::date::normalize;
use crate::{Context, Dimension, Node, Options, Range, ResolvedToken, Token, TokenKind, Value};

#[derive(Debug)]
pub(crate) enum Resolution {
    Resolved(ResolvedToken),
    /// The written text is a non-match; covers these segments.
    Invalid(Range),
    Filtered,
}

enum Outcome {
    Value(Value),
    Invalid,
    Filtered,
}

pub(crate) fn resolve_node(context: &Context, options: &Options, node: Node) -> Resolution {
    match resolve(context, options, &node.token) {
        Outcome::Value(value) => {
            tracing::debug!(
                target: "vestnik::engine",
                dim = ?node.token.dim,
                range = ?node.range,
                value = ?value,
                "resolved"
            );
            Resolution::Resolved(ResolvedToken { node, value })
        }
        Outcome::Invalid => {
            tracing::trace!(target: "vestnik::engine", rule = node.rule_name, range = ?node.range, "span rejected");
            Resolution::Invalid(node.segments)
        }
        Outcome::Filtered => {
            tracing::trace!(target: "vestnik::engine", rule = node.rule_name, range = ?node.range, "resolve filtered");
            Resolution::Filtered
        }
    }
}

fn resolve(context: &Context, options: &Options, token: &Token) -> Outcome {
    match (token.dim, &token.kind) {
        (Dimension::Date, TokenKind::Date(date)) => match normalize(date, context.today) {
            Some(date) => Outcome::Value(Value::Date(date)),
            None => Outcome::Invalid,
        },
        (Dimension::Name, TokenKind::Person(person)) => {
            if options.require_full_name && !person.is_full() {
                return Outcome::Filtered;
            }
            Outcome::Value(Value::Person(person.clone()))
        }
        (Dimension::Name, TokenKind::Place(_)) => Outcome::Invalid,
        _ => Outcome::Filtered,
    }
}
