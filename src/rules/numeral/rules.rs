use crate::engine::BucketMask;
use crate::rules::numeral::helpers::{parse_digits, regex_group};
use crate::{NumeralData, Rule, Token};

/// Rule turning a run of digits into a numeral.
pub fn rule_integer() -> Rule {
    rule! {
        name: "integer (numeric)",
        pattern: [re!(r"(\d+)")],
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |tokens: &[Token]| -> Option<NumeralData> {
            parse_digits(regex_group(tokens.first()?, 1)?)
        },
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_integer()]
}
