//! Fixed-point money at 1e-2 scale (cents).
//!
//! Catalog prices arrive as decimal strings (`"3.84"`) and leave as two
//! decimal strings. In between the resolver works on plain `i64` minor units.
//! `Cents` marks the values that crossed that boundary so a raw integer is
//! never silently treated as money.
//!
//! # Conversion
//!
//! [`price_to_cents`] multiplies by 100 and truncates toward zero: `"3.849"`
//! becomes `384`, `"-3.849"` becomes `-384`. No floating point is used.

use std::fmt;

/// Minor units per major unit.
pub const CENTS_SCALE: i64 = 100;

/// A monetary amount in cents. `Cents(385)` renders as `3.85`.
///
/// There is no `From<i64>`; use [`Cents::new`] when a raw integer is known
/// to be in cents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    #[inline]
    pub const fn new(raw: i64) -> Self {
        Cents(raw)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / CENTS_SCALE;
        let frac = (self.0 % CENTS_SCALE).unsigned_abs();
        // -0.05 would otherwise lose its sign.
        if self.0 < 0 && units == 0 {
            write!(f, "-{units}.{frac:02}")
        } else {
            write!(f, "{units}.{frac:02}")
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced by [`price_to_cents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    EmptyPrice { field: &'static str },
    InvalidPrice { field: &'static str, raw: String },
    /// The integer part does not fit once scaled to cents.
    Overflow { field: &'static str, raw: String },
}

impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyError::EmptyPrice { field } => write!(f, "price field '{field}' is empty"),
            MoneyError::InvalidPrice { field, raw } => {
                write!(f, "price field '{field}' could not be parsed: '{raw}'")
            }
            MoneyError::Overflow { field, raw } => {
                write!(f, "price field '{field}' is out of range: '{raw}'")
            }
        }
    }
}

impl std::error::Error for MoneyError {}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert a decimal price string to cents, truncating past two places.
///
/// Accepts an optional leading `+`/`-` and an optional fractional part.
/// Rejects empty strings, non-digit characters and repeated separators.
pub fn price_to_cents(s: &str, field: &'static str) -> Result<Cents, MoneyError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MoneyError::EmptyPrice { field });
    }

    let invalid = || MoneyError::InvalidPrice {
        field,
        raw: s.to_string(),
    };
    let overflow = || MoneyError::Overflow {
        field,
        raw: s.to_string(),
    };

    let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    };

    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }

    // Only digit strings reach here, so a parse failure means overflow.
    let int_val: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| overflow())?
    };

    let frac_val = frac_part
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(2)
        .fold(0_i64, |acc, b| acc * 10 + i64::from(b - b'0'));

    let cents = int_val
        .checked_mul(CENTS_SCALE)
        .and_then(|v| v.checked_add(frac_val))
        .ok_or_else(overflow)?;

    Ok(Cents(if negative { -cents } else { cents }))
}
