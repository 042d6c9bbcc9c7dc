pub mod lexicon;
pub mod predicates;
pub mod rules;

#[cfg(test)]
mod tests;
