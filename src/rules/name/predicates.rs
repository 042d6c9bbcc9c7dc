use crate::rules::name::lexicon::{NamePart, NameRole};
use crate::{Lexeme, Token, TokenKind};

pub fn name_part(t: &Token) -> Option<&NamePart> {
    match &t.kind {
        TokenKind::Lexeme(Lexeme::Name(part)) => Some(part),
        _ => None,
    }
}

fn has_role(t: &Token, role: NameRole) -> bool {
    name_part(t).is_some_and(|part| part.role == role)
}

pub fn is_first_name(t: &Token) -> bool {
    has_role(t, NameRole::First)
}

pub fn is_patronymic(t: &Token) -> bool {
    has_role(t, NameRole::Middle)
}

pub fn is_surname(t: &Token) -> bool {
    has_role(t, NameRole::Last)
}

/// Capitalized word with no name role of its own.
pub fn is_other_word(t: &Token) -> bool {
    has_role(t, NameRole::Word)
}
