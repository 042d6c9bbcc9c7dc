//! Per-run observations for the debug report.
//!
//! Node lists are only kept when the parser was created with
//! `Parser::traced`; counts and durations are always recorded.

use crate::Node;
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Wall time of [`Parser::run`](super::Parser::run), ordering included.
    pub total: Duration,
    pub saturation: SaturationMetrics,
}

/// Saturation split into the atom pass and the composition passes after it.
#[derive(Debug, Default, Clone)]
pub struct SaturationMetrics {
    pub total: Duration,
    /// Pass 0: regex-first rules over raw segments.
    pub atoms: PassMetrics,
    /// Passes 1..: rules composing stash nodes, the last one producing nothing.
    pub compositions: Vec<PassMetrics>,
}

#[derive(Debug, Default, Clone)]
pub struct PassMetrics {
    pub duration: Duration,
    /// Nodes admitted to the stash (duplicates excluded).
    pub produced: usize,
    /// The admitted nodes themselves, in traced runs.
    pub nodes: Vec<Node>,
    /// Rules whose dependencies were met.
    pub rules_considered: usize,
    /// Rules whose first pattern matched somewhere.
    pub rules_seeded: usize,
}

/// Final-dimension candidates in selection order, with the run's metrics.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub candidates: Vec<Node>,
    pub metrics: RunMetrics,
}
