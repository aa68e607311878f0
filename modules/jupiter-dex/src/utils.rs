use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

pub fn zero_big_decimal() -> BigDecimal {
    BigDecimal::from(0)
}

/// Exact integer parse of a decimal string. Empty and malformed inputs are
/// absent, which makes the enclosing record skip rather than abort the batch.
pub fn parse_big_int(input: &str) -> Option<BigInt> {
    if input.is_empty() {
        return None;
    }
    BigInt::from_str(input).ok()
}

pub fn parse_i64(input: &str) -> Option<i64> {
    if input.is_empty() {
        return None;
    }
    input.parse::<i64>().ok()
}
