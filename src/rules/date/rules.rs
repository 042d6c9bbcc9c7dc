//! Date grammar.
//!
//! The alternatives, highest priority first:
//!
//! ```text
//! 1. DAY '.' MONTH                                   5.09
//! 2. DAY '.' MONTH '.' (YEAR | YEAR_SHORT) [YEAR_WORD] 5.09.2024, 5.09.24 года
//! 3. YEAR YEAR_WORD                                  2024 года
//! 4. DAY MONTH_NAME                                  5 сентября
//! 5. MONTH_NAME YEAR [YEAR_WORD]                     сентябрь 2024 г
//! 6. DAY MONTH_NAME YEAR [YEAR_WORD]                 5 сентября 2024 года
//! ```
//!
//! Optional year words are spelled out as a second rule with the same
//! priority. The longest match at a position wins; priority only decides
//! between matches covering the same segments.

use crate::engine::BucketMask;
use crate::rules::date::lexicon::{is_year_word, month_number};
use crate::rules::date::predicates::*;
use crate::rules::numeral::helpers::{first_match_lower, numeral, year_from};
use crate::rules::numeral::predicates::*;
use crate::{DateMatch, Dimension, Lexeme, Rule, Token};

fn number_at(tokens: &[Token], idx: usize) -> Option<u32> {
    u32::try_from(numeral(tokens.get(idx)?)?.value).ok()
}

fn year_at(tokens: &[Token], idx: usize) -> Option<i32> {
    year_from(numeral(tokens.get(idx)?)?)
}

fn month_name_at(tokens: &[Token], idx: usize) -> Option<u32> {
    month_from_name(tokens.get(idx)?)
}

/// Month word in any case form.
pub fn rule_month_name() -> Rule {
    rule! {
        name: "month name",
        pattern: [re!(r"(?i)[а-яё]{3,9}")],
        buckets: BucketMask::MONTHISH.bits(),
        prod: |tokens: &[Token]| -> Option<Lexeme> {
            month_number(&first_match_lower(tokens)?).map(Lexeme::MonthName)
        },
    }
}

/// `г`, `год`, `года`, ...
pub fn rule_year_word() -> Rule {
    rule! {
        name: "year word",
        pattern: [re!(r"(?i)г|гг|год[а-я]{0,2}")],
        buckets: BucketMask::YEARISH.bits(),
        prod: |tokens: &[Token]| -> Option<Lexeme> {
            is_year_word(&first_match_lower(tokens)?).then_some(Lexeme::YearWord)
        },
    }
}

/// 5.09
pub fn rule_day_dot_month() -> Rule {
    rule! {
        name: "<day>.<month>",
        pattern: [pred!(is_day), re!(r"\."), pred!(is_month_number)],
        buckets: BucketMask::HAS_DOT.bits(),
        deps: [Dimension::Numeral],
        priority: 6,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch { day: number_at(tokens, 0), month: number_at(tokens, 2), ..Default::default() })
        },
    }
}

/// 5.09.2024, 5.09.24
pub fn rule_day_dot_month_dot_year() -> Rule {
    rule! {
        name: "<day>.<month>.<year>",
        pattern: [pred!(is_day), re!(r"\."), pred!(is_month_number), re!(r"\."), pred!(is_year_or_short)],
        buckets: BucketMask::HAS_DOT.bits(),
        deps: [Dimension::Numeral],
        priority: 5,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch {
                day: number_at(tokens, 0),
                month: number_at(tokens, 2),
                year: Some(year_at(tokens, 4)?),
                year_word: false,
            })
        },
    }
}

/// 5.09.2024 г
pub fn rule_day_dot_month_dot_year_word() -> Rule {
    rule! {
        name: "<day>.<month>.<year> <year-word>",
        pattern: [
            pred!(is_day),
            re!(r"\."),
            pred!(is_month_number),
            re!(r"\."),
            pred!(is_year_or_short),
            pred!(is_year_marker),
        ],
        buckets: BucketMask::HAS_DOT.bits(),
        deps: [Dimension::Numeral, Dimension::Lexeme],
        priority: 5,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch {
                day: number_at(tokens, 0),
                month: number_at(tokens, 2),
                year: Some(year_at(tokens, 4)?),
                year_word: true,
            })
        },
    }
}

/// 2024 года
pub fn rule_year_year_word() -> Rule {
    rule! {
        name: "<year> <year-word>",
        pattern: [pred!(is_year), pred!(is_year_marker)],
        buckets: BucketMask::YEARISH.bits(),
        deps: [Dimension::Numeral, Dimension::Lexeme],
        priority: 4,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch { year: Some(year_at(tokens, 0)?), year_word: true, ..Default::default() })
        },
    }
}

/// 5 сентября
pub fn rule_day_month_name() -> Rule {
    rule! {
        name: "<day> <month-name>",
        pattern: [pred!(is_day), pred!(is_month_name)],
        buckets: BucketMask::MONTHISH.bits(),
        deps: [Dimension::Numeral, Dimension::Lexeme],
        priority: 3,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch { day: number_at(tokens, 0), month: Some(month_name_at(tokens, 1)?), ..Default::default() })
        },
    }
}

/// сентябрь 2024
pub fn rule_month_name_year() -> Rule {
    rule! {
        name: "<month-name> <year>",
        pattern: [pred!(is_month_name), pred!(is_year)],
        buckets: BucketMask::MONTHISH.bits(),
        deps: [Dimension::Numeral, Dimension::Lexeme],
        priority: 2,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch {
                month: Some(month_name_at(tokens, 0)?),
                year: Some(year_at(tokens, 1)?),
                ..Default::default()
            })
        },
    }
}

/// сентябрь 2024 года
pub fn rule_month_name_year_word() -> Rule {
    rule! {
        name: "<month-name> <year> <year-word>",
        pattern: [pred!(is_month_name), pred!(is_year), pred!(is_year_marker)],
        buckets: BucketMask::MONTHISH.bits(),
        deps: [Dimension::Numeral, Dimension::Lexeme],
        priority: 2,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch {
                month: Some(month_name_at(tokens, 0)?),
                year: Some(year_at(tokens, 1)?),
                year_word: true,
                ..Default::default()
            })
        },
    }
}

/// 5 сентября 2024
pub fn rule_day_month_name_year() -> Rule {
    rule! {
        name: "<day> <month-name> <year>",
        pattern: [pred!(is_day), pred!(is_month_name), pred!(is_year)],
        buckets: BucketMask::MONTHISH.bits(),
        deps: [Dimension::Numeral, Dimension::Lexeme],
        priority: 1,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch {
                day: number_at(tokens, 0),
                month: Some(month_name_at(tokens, 1)?),
                year: Some(year_at(tokens, 2)?),
                year_word: false,
            })
        },
    }
}

/// 5 сентября 2024 года
pub fn rule_day_month_name_year_word() -> Rule {
    rule! {
        name: "<day> <month-name> <year> <year-word>",
        pattern: [pred!(is_day), pred!(is_month_name), pred!(is_year), pred!(is_year_marker)],
        buckets: BucketMask::MONTHISH.bits(),
        deps: [Dimension::Numeral, Dimension::Lexeme],
        priority: 1,
        prod: |tokens: &[Token]| -> Option<DateMatch> {
            Some(DateMatch {
                day: number_at(tokens, 0),
                month: Some(month_name_at(tokens, 1)?),
                year: Some(year_at(tokens, 2)?),
                year_word: true,
            })
        },
    }
}

/// Full date rule set: atoms first, then the alternatives in priority order.
pub fn get() -> Vec<Rule> {
    let mut rules = crate::rules::numeral::rules::get();
    rules.extend([
        rule_month_name(),
        rule_year_word(),
        rule_day_dot_month(),
        rule_day_dot_month_dot_year(),
        rule_day_dot_month_dot_year_word(),
        rule_year_year_word(),
        rule_day_month_name(),
        rule_month_name_year(),
        rule_month_name_year_word(),
        rule_day_month_name_year(),
        rule_day_month_name_year_word(),
    ]);
    rules
}
