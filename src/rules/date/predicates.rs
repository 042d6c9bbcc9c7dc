use crate::{Lexeme, Token, TokenKind};

pub fn is_month_name(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Lexeme(Lexeme::MonthName(_)))
}

pub fn is_year_marker(t: &Token) -> bool {
    matches!(&t.kind, TokenKind::Lexeme(Lexeme::YearWord))
}

pub fn month_from_name(t: &Token) -> Option<u32> {
    match &t.kind {
        TokenKind::Lexeme(Lexeme::MonthName(m)) => Some(*m),
        _ => None,
    }
}
