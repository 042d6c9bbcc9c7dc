use crate::{NumeralData, Token, TokenKind};

/// Return capture group `idx` of a regex token, as written.
pub fn regex_group(token: &Token, idx: usize) -> Option<&str> {
    match &token.kind {
        TokenKind::RegexMatch(groups) => groups.get(idx).map(String::as_str),
        _ => None,
    }
}

/// Return the whole match of `tokens[0]`, lowercased.
pub fn first_match_lower(tokens: &[Token]) -> Option<String> {
    regex_group(tokens.first()?, 0).map(str::to_lowercase)
}

/// Build a `NumeralData` from a run of ASCII digits.
///
/// Runs too long for an `i64` produce nothing rather than a wrapped value.
pub fn parse_digits(digits: &str) -> Option<NumeralData> {
    Some(NumeralData { value: digits.parse().ok()?, digits: digits.len() })
}

pub fn numeral(token: &Token) -> Option<&NumeralData> {
    match &token.kind {
        TokenKind::Numeral(nd) => Some(nd),
        _ => None,
    }
}

/// Expand a written year: two digits mean 20YY, four digits are taken as is.
pub fn year_from(nd: &NumeralData) -> Option<i32> {
    let value = i32::try_from(nd.value).ok()?;
    match nd.digits {
        2 => Some(2000 + value),
        4 => Some(value),
        _ => None,
    }
}
