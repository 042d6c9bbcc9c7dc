use crate::rules::numeral;
use crate::rules::numeral::helpers::{parse_digits, year_from};
use crate::rules::numeral::predicates::{is_day, is_month_number, is_year, is_year_short};
use crate::{Dimension, Token, TokenKind};

fn numerals(input: &str) -> Vec<(i64, usize)> {
    let rules = numeral::rules::get();
    let run = crate::engine::Parser::new(input, &rules).run(&[Dimension::Numeral]);
    run.candidates
        .iter()
        .filter_map(|n| match &n.token.kind {
            TokenKind::Numeral(nd) => Some((nd.value, nd.digits)),
            _ => None,
        })
        .collect()
}

fn token(digits: &str) -> Token {
    Token { dim: Dimension::Numeral, kind: TokenKind::Numeral(parse_digits(digits).unwrap()) }
}

#[test]
fn integer_segments_become_numerals() {
    assert_eq!(numerals("5.09.2024"), vec![(5, 1), (9, 2), (2024, 4)]);
    assert_eq!(numerals("в 10 часов"), vec![(10, 2)]);
    assert!(numerals("без цифр").is_empty());
}

#[test]
fn overlong_digit_runs_are_ignored() {
    assert!(numerals("123456789012345678901234567890").is_empty());
}

#[test]
fn date_component_predicates() {
    // (input, day, month, year, year_short)
    let cases = [
        ("5", true, true, false, false),
        ("05", true, true, false, true),
        ("13", true, false, false, true),
        ("31", true, false, false, true),
        ("32", false, false, false, true),
        ("0", false, false, false, false),
        ("005", false, false, false, false),
        ("2024", false, false, true, false),
        ("0999", false, false, false, false),
        ("2101", false, false, false, false),
    ];

    for (input, day, month, year, short) in cases {
        let t = token(input);
        assert_eq!(is_day(&t), day, "is_day({input})");
        assert_eq!(is_month_number(&t), month, "is_month_number({input})");
        assert_eq!(is_year(&t), year, "is_year({input})");
        assert_eq!(is_year_short(&t), short, "is_year_short({input})");
    }
}

#[test]
fn short_years_expand_to_this_century() {
    assert_eq!(year_from(&parse_digits("24").unwrap()), Some(2024));
    assert_eq!(year_from(&parse_digits("2019").unwrap()), Some(2019));
    assert_eq!(year_from(&parse_digits("123").unwrap()), None);
}
