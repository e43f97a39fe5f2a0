//! Parsing of size, precision and sign modifiers out of raw column type
//! strings such as `varchar(255)`, `decimal(10,2)` or `int(11) unsigned`.
//!
//! Catalog strings are not structured metadata, so every function reports
//! a mismatch through its return value instead of panicking.

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::{Result, extraction_error};

static COLUMN_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+\(([0-9]+)\)$").expect("column size pattern"));

static INT_MODIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:tiny|small|medium|big)?int(?:eger)?(?:\([0-9]+\))?(.*)$")
        .expect("integer modifier pattern")
});

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"decimal\(([0-9]+),([0-9]+)\)").expect("decimal pattern"));

/// Sign of an integer column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// Length bound of a `name(N)` type, e.g. `varchar(255)` -> 255
pub fn column_size(column: &str, column_type: &str) -> Result<u32> {
    COLUMN_SIZE
        .captures(column_type)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .ok_or_else(|| extraction_error(column, column_type))
}

/// Digit count and scale of a `decimal(P,S)` type
pub fn decimal_precision(column: &str, column_type: &str) -> Result<(u32, u32)> {
    DECIMAL
        .captures(column_type)
        .and_then(|caps| {
            let digits = caps[1].parse::<u32>().ok()?;
            let decimals = caps[2].parse::<u32>().ok()?;
            Some((digits, decimals))
        })
        .ok_or_else(|| extraction_error(column, column_type))
}

/// Sign of an integer type string such as `int(10) unsigned` or
/// `bigint unsigned zerofill`; anything without an `unsigned` modifier is signed.
pub fn int_signedness(column_type: &str) -> Signedness {
    let unsigned = INT_MODIFIERS
        .captures(column_type.trim())
        .map(|caps| {
            caps[1]
                .split_whitespace()
                .any(|word| word.eq_ignore_ascii_case("unsigned"))
        })
        .unwrap_or(false);

    if unsigned {
        Signedness::Unsigned
    } else {
        Signedness::Signed
    }
}
