//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: the structures derived
//! from a rule list that make a run cheaper.
//!
//! 1. **Compile/index rules** (this module): wrap the rule set in
//!    `CompiledRules` and index it by coarse buckets.
//! 2. **Run** (see `parser.rs`): scan the input for buckets (`trigger.rs`),
//!    select the active rules, then saturate and select candidates.
//!
//! ## Extension points
//!
//! - Adding a new bucket:
//!   1. Add a `BucketMask` bit.
//!   2. Add a `BUCKET_*` constant and bump `BUCKET_COUNT`.
//!   3. Add it to `BUCKETS` below.
//!   4. Teach `TriggerInfo::scan` (in `trigger.rs`) to detect it.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules`.
//! - A rule with several buckets is active when *any* of them is present.
//!   Rules with no buckets are always active.

use crate::Rule;

/// Rule identifier (index into the rules vector).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS   = 1 << 0;
        const HAS_DOT      = 1 << 1;
        const MONTHISH     = 1 << 2;
        const YEARISH      = 1 << 3;
        const CAPITALIZED  = 1 << 4;
    }
}

bitflags::bitflags! {
    /// Tracks which dimensions are present in the stash.
    ///
    /// Used by the parser to skip rules whose inputs cannot exist yet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DimensionSet: u8 {
        const NUMERAL = 1 << 0;
        const LEXEME  = 1 << 1;
        const DATE    = 1 << 2;
        const NAME    = 1 << 3;
        const REGEX   = 1 << 4;
    }
}

impl DimensionSet {
    pub(crate) fn of(dim: crate::Dimension) -> Self {
        match dim {
            crate::Dimension::Numeral => DimensionSet::NUMERAL,
            crate::Dimension::Lexeme => DimensionSet::LEXEME,
            crate::Dimension::Date => DimensionSet::DATE,
            crate::Dimension::Name => DimensionSet::NAME,
            crate::Dimension::RegexMatch => DimensionSet::REGEX,
        }
    }
}

#[derive(Default, Debug)]
pub struct RuleIndex {
    pub always_on: Vec<RuleId>,
    pub by_bucket: [Vec<RuleId>; BUCKET_COUNT],
}

pub const BUCKET_COUNT: usize = 5;
pub const BUCKET_HAS_DIGITS: usize = 0;
pub const BUCKET_HAS_DOT: usize = 1;
pub const BUCKET_MONTHISH: usize = 2;
pub const BUCKET_YEARISH: usize = 3;
pub const BUCKET_CAPITALIZED: usize = 4;

/// Bucket bits paired with their slot in `RuleIndex::by_bucket`.
pub(crate) const BUCKETS: [(BucketMask, usize); BUCKET_COUNT] = [
    (BucketMask::HAS_DIGITS, BUCKET_HAS_DIGITS),
    (BucketMask::HAS_DOT, BUCKET_HAS_DOT),
    (BucketMask::MONTHISH, BUCKET_MONTHISH),
    (BucketMask::YEARISH, BUCKET_YEARISH),
    (BucketMask::CAPITALIZED, BUCKET_CAPITALIZED),
];

/// Pre-compiled rule set with bucket indexes.
#[derive(Debug)]
pub struct CompiledRules<'a> {
    pub rules: Vec<&'a Rule>,
    pub index: RuleIndex,
}

impl<'a> CompiledRules<'a> {
    /// Create a compiled rule set from a slice of rules.
    ///
    /// This is intentionally lightweight: patterns are not rewritten and no
    /// per-rule regex state is allocated.
    pub fn new(rules: &'a [Rule]) -> Self {
        let rule_refs: Vec<&Rule> = rules.iter().collect();
        let mut index = RuleIndex::default();

        for (id, rule) in rule_refs.iter().enumerate() {
            let buckets = BucketMask::from_bits_truncate(rule.buckets);
            if buckets.is_empty() {
                index.always_on.push(id);
                continue;
            }
            for (bit, slot) in BUCKETS {
                if buckets.contains(bit) {
                    index.by_bucket[slot].push(id);
                }
            }
        }

        CompiledRules { rules: rule_refs, index }
    }

    /// Ids of the rules enabled by `buckets`, in rule order.
    pub(crate) fn active_ids(&self, buckets: BucketMask) -> Vec<RuleId> {
        let mut ids: Vec<RuleId> = self.index.always_on.clone();
        for (bit, slot) in BUCKETS {
            if buckets.contains(bit) {
                ids.extend(&self.index.by_bucket[slot]);
            }
        }
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
