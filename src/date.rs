use chrono::{Datelike, NaiveDate};

/// Components of a date expression as written in the text.
///
/// Forms like `2024 года` carry no day or month, and `сентябре 2024` carries
/// no day; the missing parts default to the first day / first month when the
/// match is turned into a calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateMatch {
    pub day: Option<u32>,
    pub month: Option<u32>,
    /// Absolute year; two-digit years are already expanded to 20YY.
    pub year: Option<i32>,
    /// A year marker (`г.`, `года`, ...) followed the year.
    pub year_word: bool,
}

/// Turn a match into a calendar date relative to `today`.
///
/// Returns `None` for calendar-invalid combinations such as `31.02`. A date
/// strictly before `today` moves forward by exactly one year, however far in
/// the past it was.
pub(crate) fn normalize(date: &DateMatch, today: NaiveDate) -> Option<NaiveDate> {
    let year = date.year.unwrap_or_else(|| today.year());
    let naive = NaiveDate::from_ymd_opt(year, date.month.unwrap_or(1), date.day.unwrap_or(1))?;

    if naive >= today { Some(naive) } else { Some(roll_forward(naive)) }
}

/// Same day next year; Feb 29 lands on Feb 28 of a common year.
fn roll_forward(date: NaiveDate) -> NaiveDate {
    let next = date.year() + 1;
    date.with_year(next).or_else(|| NaiveDate::from_ymd_opt(next, 2, 28)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day_month(day: u32, month: u32) -> DateMatch {
        DateMatch { day: Some(day), month: Some(month), ..Default::default() }
    }

    #[test]
    fn future_date_keeps_current_year() {
        assert_eq!(normalize(&day_month(15, 9), ymd(2024, 9, 10)), Some(ymd(2024, 9, 15)));
    }

    #[test]
    fn today_is_not_rolled() {
        assert_eq!(normalize(&day_month(10, 9), ymd(2024, 9, 10)), Some(ymd(2024, 9, 10)));
    }

    #[test]
    fn past_date_rolls_once() {
        assert_eq!(normalize(&day_month(5, 9), ymd(2024, 9, 10)), Some(ymd(2025, 9, 5)));
    }

    #[test]
    fn explicit_past_year_rolls_only_one_year() {
        let date = DateMatch { year: Some(2020), ..day_month(1, 3) };
        assert_eq!(normalize(&date, ymd(2024, 9, 10)), Some(ymd(2021, 3, 1)));
    }

    #[test]
    fn explicit_future_year_wins() {
        let date = DateMatch { year: Some(2027), ..day_month(1, 3) };
        assert_eq!(normalize(&date, ymd(2024, 9, 10)), Some(ymd(2027, 3, 1)));
    }

    #[test]
    fn invalid_calendar_day_is_rejected() {
        assert_eq!(normalize(&day_month(31, 2), ymd(2024, 1, 1)), None);
        assert_eq!(normalize(&day_month(31, 4), ymd(2024, 1, 1)), None);
    }

    #[test]
    fn missing_day_and_month_default_to_first() {
        let year_only = DateMatch { year: Some(2030), year_word: true, ..Default::default() };
        assert_eq!(normalize(&year_only, ymd(2024, 9, 10)), Some(ymd(2030, 1, 1)));

        let month_year = DateMatch { month: Some(11), year: Some(2024), ..Default::default() };
        assert_eq!(normalize(&month_year, ymd(2024, 9, 10)), Some(ymd(2024, 11, 1)));
    }

    #[test]
    fn leap_day_rolls_to_last_day_of_february() {
        let date = DateMatch { year: Some(2024), ..day_month(29, 2) };
        assert_eq!(normalize(&date, ymd(2024, 9, 10)), Some(ymd(2025, 2, 28)));
    }
}
