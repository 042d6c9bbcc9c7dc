//! Matching and selection engine.
//!
//! Both extractors (dates and names) run the same engine with different rule
//! sets. The engine lives in focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! rules (one set) ──┐
//!                  │  CompiledRules::new           (compiled_rules.rs)
//!                  └───────────────┬──────────────
//!                                  │
//! input ── segment() ── TriggerInfo::scan ─┼─ select active rules (buckets)
//!                        (trigger.rs)      │
//!                                          v
//!                             Parser::saturate (parser.rs)
//!                               - seed atoms from segments (regex-first)
//!                               - iterate to fixpoint
//!                               - dedup via NodeKey (dedup.rs)
//!                                          │
//!                                          v
//!                             ordered candidates (start, longest, priority)
//!                                          │
//!                                          v
//!                             Matches iterator (matches.rs)
//!                               - resolve lazily (resolve.rs)
//!                               - invalid spans are skipped whole
//!                               - non-overlapping, left to right
//! ```
//!
//! Saturation lets composite rules (e.g. `DAY MONTH_NAME YEAR`) build on the
//! atoms (`DAY`, `MONTH_NAME`, `YEAR`) produced in the first pass.
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: derives `CompiledRules` from `Rule`s and indexes them
//!   by bucket.
//! - `trigger.rs`: scans the segmented input for coarse buckets.
//! - `parser.rs`: matching + saturation over a `Stash`, candidate ordering.
//! - `dedup.rs`: stable dedup keys to keep saturation finite.
//! - `resolve.rs`: turns a final node into a value (a date or a person).
//! - `matches.rs`: the lazy, non-overlapping selection iterator.
//! - `metrics.rs`: timing/debug data for runs and passes.
//!
//! ## Debugging
//!
//! Rule activation, productions and resolutions are traced with `tracing` at
//! `debug`/`trace` level under the `vestnik::engine` target.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/matches.rs"]
mod matches;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/trigger.rs"]
mod trigger;

pub use compiled_rules::BucketMask;
pub(crate) use matches::Matches;
pub use metrics::{PassMetrics, RunResult};
pub use parser::Parser;
