//! Lazy, non-overlapping selection of resolved matches.
//!
//! The parser hands over every final candidate in selection order. `Matches`
//! walks that order once, keeping a segment cursor:
//!
//! ```text
//! candidates: [0..5 "DAY.MONTH.YEAR"] [0..3 "DAY.MONTH"] [4..6 ...] [7..9 ...]
//!              ^ resolves? yes -> yield, cursor = 5
//!                                  [0..3] starts before cursor -> skip
//!                                  [4..6] starts before cursor -> skip
//!                                  [7..9] -> try next
//! ```
//!
//! An invalid candidate (`29.02.2025`, a place name) moves the cursor past its
//! span without yielding, so no shorter reading of the same text is tried. A
//! filtered candidate (a partial name under `require_full_name`) leaves the
//! cursor alone and the next candidate at that position gets its turn.
//! Nothing is resolved before the caller asks for the next item.

use super::resolve::{Resolution, resolve_node};
use crate::{Context, Node, Options, ResolvedToken};

#[derive(Debug)]
pub(crate) struct Matches {
    candidates: std::vec::IntoIter<Node>,
    context: Context,
    options: Options,
    cursor: usize,
}

impl Matches {
    pub(crate) fn new(candidates: Vec<Node>, context: Context, options: Options) -> Self {
        Matches { candidates: candidates.into_iter(), context, options, cursor: 0 }
    }
}

impl Iterator for Matches {
    type Item = ResolvedToken;

    fn next(&mut self) -> Option<ResolvedToken> {
        for node in self.candidates.by_ref() {
            if node.segments.start < self.cursor {
                continue;
            }
            match resolve_node(&self.context, &self.options, node) {
                Resolution::Resolved(resolved) => {
                    self.cursor = resolved.node.segments.end;
                    return Some(resolved);
                }
                Resolution::Invalid(segments) => self.cursor = segments.end,
                Resolution::Filtered => {}
            }
        }
        None
    }
}
