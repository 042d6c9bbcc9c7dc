use crate::{Context, extract_dates_with};
use chrono::NaiveDate;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dates(input: &str, today: NaiveDate) -> Vec<NaiveDate> {
    extract_dates_with(input, &Context { today }).collect()
}

#[test]
fn written_dates() {
    let today = ymd(2024, 9, 10);
    // (input, expected)
    let cases: &[(&str, &[NaiveDate])] = &[
        ("5 сентября, встречаемся в 10", &[ymd(2025, 9, 5)]),
        ("собрание 15 сентября", &[ymd(2024, 9, 15)]),
        ("до 1 янв", &[ymd(2025, 1, 1)]),
        ("в сентябре 2025 г.", &[ymd(2025, 9, 1)]),
        ("ноябрь 2024", &[ymd(2024, 11, 1)]),
        ("5 сентября 2026 года", &[ymd(2026, 9, 5)]),
        ("30 мая 2027", &[ymd(2027, 5, 30)]),
        ("отчёт за 2030 год", &[ymd(2030, 1, 1)]),
        ("с 1.10 по 15 октября 2024 года", &[ymd(2024, 10, 1), ymd(2024, 10, 15)]),
    ];

    for (input, expected) in cases {
        assert_eq!(dates(input, today), *expected, "input: {input}");
    }
}

#[test]
fn numeric_dates() {
    let today = ymd(2024, 1, 1);
    let cases: &[(&str, &[NaiveDate])] = &[
        ("5.09", &[ymd(2024, 9, 5)]),
        ("Встреча 05.09.2024", &[ymd(2024, 9, 5)]),
        ("5.09.24 года", &[ymd(2024, 9, 5)]),
        ("15.09.2024г", &[ymd(2024, 9, 15)]),
        ("5.09.2025 г.", &[ymd(2025, 9, 5)]),
    ];

    for (input, expected) in cases {
        assert_eq!(dates(input, today), *expected, "input: {input}");
    }
}

#[test]
fn day_month_keeps_current_year_or_rolls_once() {
    assert_eq!(dates("20.09", ymd(2024, 9, 10)), vec![ymd(2024, 9, 20)]);
    assert_eq!(dates("10.09", ymd(2024, 9, 10)), vec![ymd(2024, 9, 10)]);
    assert_eq!(dates("1.09", ymd(2024, 9, 10)), vec![ymd(2025, 9, 1)]);
}

#[test]
fn explicit_year_before_today_rolls_once() {
    assert_eq!(dates("01.01.2020", ymd(2024, 9, 10)), vec![ymd(2021, 1, 1)]);
    assert_eq!(dates("2024 года", ymd(2024, 9, 10)), vec![ymd(2025, 1, 1)]);
}

#[test]
fn leap_day_rolls_to_february_28() {
    assert_eq!(dates("29.02.2024", ymd(2024, 9, 10)), vec![ymd(2025, 2, 28)]);
}

#[test]
fn invalid_calendar_dates_are_not_matched() {
    let today = ymd(2024, 1, 1);
    assert!(dates("31.02", today).is_empty());
    assert!(dates("31.02.2024", today).is_empty());
    assert!(dates("31 апреля", today).is_empty());
    assert_eq!(dates("31.04 или 30.04", today), vec![ymd(2024, 4, 30)]);
}

#[test]
fn invalid_date_with_year_does_not_fall_back_to_a_shorter_reading() {
    let today = ymd(2024, 1, 1);
    assert!(dates("29.02.2025", today).is_empty());
    assert!(dates("29 февраля 2025 года", today).is_empty());
    assert!(dates("29.02.25 г.", today).is_empty());
    assert_eq!(dates("29 февраля 2025 года, перенесли на 5 марта", today), vec![ymd(2024, 3, 5)]);
}

#[test]
fn non_dates_are_ignored() {
    let today = ymd(2024, 1, 1);
    for input in ["", "   ", "встречаемся в 10", "5.13", "32.01", "5 мамы", "2024", "марс 2024", "год"] {
        assert!(dates(input, today).is_empty(), "input: {input}");
    }
}

#[test]
fn extraction_is_idempotent() {
    let ctx = Context { today: ymd(2024, 9, 10) };
    let text = "с 1.10 по 15 октября 2024 года, потом 5.09";
    let first: Vec<_> = extract_dates_with(text, &ctx).collect();
    let second: Vec<_> = extract_dates_with(text, &ctx).collect();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn iteration_can_stop_early() {
    let ctx = Context { today: ymd(2024, 1, 1) };
    let first = extract_dates_with("5.09 и 6.09 и 7.09", &ctx).next();
    assert_eq!(first, Some(ymd(2024, 9, 5)));
}
