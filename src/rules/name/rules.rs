//! Personal-name grammar.
//!
//! Every capitalized word becomes one name part (FIRST, MIDDLE, LAST or WORD).
//! Composites, highest priority first:
//!
//! ```text
//! LAST FIRST MIDDLE    Иванов Иван Иванович
//! FIRST MIDDLE LAST    Иван Иванович Иванов
//! FIRST LAST           Иван Иванов
//! FIRST WORD           Иван Смит
//! LAST FIRST           Иванов Иван
//! FIRST MIDDLE         Иван Иванович
//! FIRST                Иван
//! LAST                 Иванов
//! ```
//!
//! Components are declined back to nominative using the gender of the first
//! name, else of the patronymic, else of the surname itself.
//!
//! A surname-shaped word right after `в`/`во` is a place (`в Саратове`,
//! `в Берлин`). That reading claims the span so no person is taken from it.

use crate::engine::BucketMask;
use crate::rules::name::lexicon::{NamePart, classify, nominative};
use crate::rules::name::predicates::*;
use crate::rules::numeral::helpers::regex_group;
use crate::segment::{is_capitalized, title_case};
use crate::{Dimension, Lexeme, PersonRecord, Place, Rule, Token};

fn part_at(tokens: &[Token], idx: usize) -> Option<&NamePart> {
    name_part(tokens.get(idx)?)
}

fn person(first: Option<&NamePart>, middle: Option<&NamePart>, last: Option<&NamePart>) -> Option<PersonRecord> {
    let gender = [first, middle, last].into_iter().flatten().find_map(|part| part.gender);
    let component = |part: Option<&NamePart>| part.map(|p| title_case(&nominative(p, gender)));
    Some(PersonRecord { first: component(first), middle: component(middle), last: component(last) })
}

/// Any capitalized word, classified by the name lexicon.
pub fn rule_name_word() -> Rule {
    rule! {
        name: "name word",
        pattern: [re!(r"\p{Lu}[\p{L}-]*")],
        buckets: BucketMask::CAPITALIZED.bits(),
        prod: |tokens: &[Token]| -> Option<Lexeme> {
            let word = regex_group(tokens.first()?, 0)?;
            if !is_capitalized(word) {
                return None;
            }
            Some(Lexeme::Name(classify(&word.to_lowercase())))
        },
    }
}

pub fn rule_last_first_middle() -> Rule {
    rule! {
        name: "<last> <first> <middle>",
        pattern: [pred!(is_surname), pred!(is_first_name), pred!(is_patronymic)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 8,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(Some(part_at(tokens, 1)?), Some(part_at(tokens, 2)?), Some(part_at(tokens, 0)?))
        },
    }
}

pub fn rule_first_middle_last() -> Rule {
    rule! {
        name: "<first> <middle> <last>",
        pattern: [pred!(is_first_name), pred!(is_patronymic), pred!(is_surname)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 7,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(Some(part_at(tokens, 0)?), Some(part_at(tokens, 1)?), Some(part_at(tokens, 2)?))
        },
    }
}

pub fn rule_first_last() -> Rule {
    rule! {
        name: "<first> <last>",
        pattern: [pred!(is_first_name), pred!(is_surname)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 6,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(Some(part_at(tokens, 0)?), None, Some(part_at(tokens, 1)?))
        },
    }
}

/// A first name followed by an unrecognized capitalized word, taken as the surname.
pub fn rule_first_word() -> Rule {
    rule! {
        name: "<first> <word>",
        pattern: [pred!(is_first_name), pred!(is_other_word)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 5,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(Some(part_at(tokens, 0)?), None, Some(part_at(tokens, 1)?))
        },
    }
}

pub fn rule_last_first() -> Rule {
    rule! {
        name: "<last> <first>",
        pattern: [pred!(is_surname), pred!(is_first_name)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 4,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(Some(part_at(tokens, 1)?), None, Some(part_at(tokens, 0)?))
        },
    }
}

pub fn rule_first_middle() -> Rule {
    rule! {
        name: "<first> <middle>",
        pattern: [pred!(is_first_name), pred!(is_patronymic)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 3,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(Some(part_at(tokens, 0)?), Some(part_at(tokens, 1)?), None)
        },
    }
}

pub fn rule_first() -> Rule {
    rule! {
        name: "<first>",
        pattern: [pred!(is_first_name)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 2,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(Some(part_at(tokens, 0)?), None, None)
        },
    }
}

pub fn rule_last() -> Rule {
    rule! {
        name: "<last>",
        pattern: [pred!(is_surname)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        priority: 1,
        prod: |tokens: &[Token]| -> Option<PersonRecord> {
            person(None, None, Some(part_at(tokens, 0)?))
        },
    }
}

pub fn rule_place() -> Rule {
    rule! {
        name: "в <place>",
        pattern: [re!(r"[вВ]о?"), pred!(is_surname)],
        buckets: BucketMask::CAPITALIZED.bits(),
        deps: [Dimension::Lexeme],
        prod: |tokens: &[Token]| -> Option<Place> {
            Some(Place { word: part_at(tokens, 1)?.word.clone() })
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![
        rule_name_word(),
        rule_place(),
        rule_last_first_middle(),
        rule_first_middle_last(),
        rule_first_last(),
        rule_first_word(),
        rule_last_first(),
        rule_first_middle(),
        rule_first(),
        rule_last(),
    ]
}
