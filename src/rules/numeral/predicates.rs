use crate::{Token, TokenKind};

/// A day of month as written in dates: one or two digits, 1..=31.
pub fn is_day(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.digits <= 2 && (1..=31).contains(&nd.value))
}

/// A month number: one or two digits, 1..=12.
pub fn is_month_number(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.digits <= 2 && (1..=12).contains(&nd.value))
}

/// A four-digit year between 1000 and 2100.
pub fn is_year(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.digits == 4 && (1000..=2100).contains(&nd.value))
}

/// A two-digit year ("24" in "5.09.24").
pub fn is_year_short(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Numeral(nd) if nd.digits == 2)
}

pub fn is_year_or_short(t: &Token) -> bool {
    is_year(t) || is_year_short(t)
}
