//! Russian month names and year markers.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lowercase prefixes shared by every form of a month name.
pub(crate) const MONTH_STEMS: &[&str] =
    &["янв", "фев", "мар", "апр", "ма", "июн", "июл", "авг", "сен", "окт", "ноя", "дек"];

/// Case endings of months declined like "январь" (soft stem).
const SOFT_ENDINGS: &[&str] = &["ь", "я", "е", "ю", "ём", "ем"];
/// Case endings of months declined like "март" (hard stem).
const HARD_ENDINGS: &[&str] = &["", "а", "е", "у", "ом"];

/// Every recognized month word (all cases plus common abbreviations),
/// lowercased, mapped to its number.
pub(crate) static MONTH_NAME: Lazy<HashMap<String, u32>> = Lazy::new(|| {
    let soft: [(&str, u32); 9] = [
        ("январ", 1),
        ("феврал", 2),
        ("апрел", 4),
        ("июн", 6),
        ("июл", 7),
        ("сентябр", 9),
        ("октябр", 10),
        ("ноябр", 11),
        ("декабр", 12),
    ];
    let hard: [(&str, u32); 2] = [("март", 3), ("август", 8)];
    let may = ["май", "мая", "мае", "маю", "маем"];
    let abbreviations: [(&str, u32); 14] = [
        ("янв", 1),
        ("фев", 2),
        ("февр", 2),
        ("мар", 3),
        ("апр", 4),
        ("июн", 6),
        ("июл", 7),
        ("авг", 8),
        ("сен", 9),
        ("сент", 9),
        ("окт", 10),
        ("ноя", 11),
        ("нояб", 11),
        ("дек", 12),
    ];

    let mut map = HashMap::new();
    for (stem, month) in soft {
        map.extend(SOFT_ENDINGS.iter().map(|ending| (format!("{stem}{ending}"), month)));
    }
    for (stem, month) in hard {
        map.extend(HARD_ENDINGS.iter().map(|ending| (format!("{stem}{ending}"), month)));
    }
    map.extend(may.iter().map(|form| (form.to_string(), 5)));
    map.extend(abbreviations.iter().map(|(form, month)| (form.to_string(), *month)));
    map
});

/// Month number of a (lowercase) month word in any case form.
pub fn month_number(lower: &str) -> Option<u32> {
    MONTH_NAME.get(lower).copied()
}

/// `г`, `гг`, `год` and its case forms.
pub fn is_year_word(lower: &str) -> bool {
    matches!(lower, "г" | "гг" | "год" | "года" | "году" | "годом" | "годе")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_forms_resolve_to_numbers() {
        let cases = [
            ("январь", 1),
            ("января", 1),
            ("январём", 1),
            ("февраля", 2),
            ("марта", 3),
            ("апреле", 4),
            ("май", 5),
            ("мая", 5),
            ("июня", 6),
            ("июле", 7),
            ("августа", 8),
            ("сентября", 9),
            ("сент", 9),
            ("октябрю", 10),
            ("ноября", 11),
            ("декабре", 12),
        ];
        for (word, month) in cases {
            assert_eq!(month_number(word), Some(month), "month_number({word})");
        }
    }

    #[test]
    fn non_months_are_rejected() {
        for word in ["мама", "марс", "сентябрята", "июнь2", ""] {
            assert_eq!(month_number(word), None, "month_number({word})");
        }
    }

    #[test]
    fn every_month_form_starts_with_a_trigger_stem() {
        for form in MONTH_NAME.keys() {
            assert!(MONTH_STEMS.iter().any(|stem| form.starts_with(stem)), "{form} has no stem");
        }
    }

    #[test]
    fn year_words() {
        assert!(is_year_word("года"));
        assert!(is_year_word("г"));
        assert!(!is_year_word("годы"));
        assert!(!is_year_word("город"));
    }
}
