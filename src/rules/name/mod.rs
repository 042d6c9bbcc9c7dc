pub mod lexicon;
pub mod predicates;
pub mod rules;
