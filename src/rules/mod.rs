pub mod date;
pub mod name;
pub mod numeral;
