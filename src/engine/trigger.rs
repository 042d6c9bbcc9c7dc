//! Trigger scanning (input pre-classification).
//!
//! Inspects the segmented input and produces coarse buckets that let the
//! parser skip rules that cannot possibly match:
//!
//! - `HAS_DIGITS`: any integer segment.
//! - `HAS_DOT`: any `.` segment (numeric dates).
//! - `MONTHISH`: a word starting with a Russian month stem.
//! - `YEARISH`: a year marker (`г`, `год`, `года`, ...).
//! - `CAPITALIZED`: any capitalized word (name candidates).
//!
//! This is a *heuristic* scan. False positives are fine because the parser
//! still has to match full rule patterns; false negatives would drop matches,
//! so every check here is at least as loose as the rules it gates.

use super::compiled_rules::BucketMask;
use crate::rules::date::lexicon::{MONTH_STEMS, is_year_word};
use crate::segment::{Segment, SegmentKind, is_capitalized};

/// Input characteristics detected from the segments.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    pub fn scan(segments: &[Segment<'_>]) -> Self {
        let mut buckets = BucketMask::empty();

        for seg in segments {
            match seg.kind {
                SegmentKind::Integer => buckets |= BucketMask::HAS_DIGITS,
                SegmentKind::Punct if seg.text == "." => buckets |= BucketMask::HAS_DOT,
                SegmentKind::Punct => {}
                SegmentKind::Word => {
                    let lower = seg.text.to_lowercase();
                    if MONTH_STEMS.iter().any(|stem| lower.starts_with(stem)) {
                        buckets |= BucketMask::MONTHISH;
                    }
                    if is_year_word(&lower) {
                        buckets |= BucketMask::YEARISH;
                    }
                    if is_capitalized(seg.text) {
                        buckets |= BucketMask::CAPITALIZED;
                    }
                }
            }
        }

        TriggerInfo { buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;

    fn buckets(input: &str) -> BucketMask {
        TriggerInfo::scan(&segment(input)).buckets
    }

    #[test]
    fn numeric_date_sets_digit_and_dot() {
        assert_eq!(buckets("5.09"), BucketMask::HAS_DIGITS | BucketMask::HAS_DOT);
    }

    #[test]
    fn written_date_sets_month_and_year() {
        let b = buckets("5 сентября 2024 года");
        assert!(b.contains(BucketMask::MONTHISH));
        assert!(b.contains(BucketMask::YEARISH));
        assert!(!b.contains(BucketMask::CAPITALIZED));
    }

    #[test]
    fn capitalized_words_set_capitalized() {
        assert_eq!(buckets("придет Иванов"), BucketMask::CAPITALIZED);
        assert_eq!(buckets("все придут"), BucketMask::empty());
    }
}
