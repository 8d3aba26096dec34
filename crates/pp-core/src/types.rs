use std::fmt;

/// Smallest allowed price point.
pub const MIN_PRICE_POINT: i64 = 0;

/// Largest allowed price point.
pub const MAX_PRICE_POINT: i64 = 9;

/// Which candidate wins when the nearest higher and lower matches are the
/// same distance from the seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Take the higher candidate. Default after construction.
    #[default]
    PreferGreater,
    /// Take the lower candidate.
    PreferLower,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::PreferGreater => "PREFER_GREATER",
            TieBreak::PreferLower => "PREFER_LOWER",
        }
    }

    /// Map the CLI/config `prefer_lower_prices` flag onto a preference.
    pub fn from_prefer_lower(prefer_lower: bool) -> Self {
        if prefer_lower {
            TieBreak::PreferLower
        } else {
            TieBreak::PreferGreater
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Construction-time validation failures. No resolver is returned when any of
/// these are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricePointError {
    /// No price points were supplied.
    Missing,
    /// A point is below [`MIN_PRICE_POINT`].
    TooSmall { index: usize, point: i64 },
    /// A point is above [`MAX_PRICE_POINT`].
    TooLarge { index: usize, point: i64 },
}

impl fmt::Display for PricePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricePointError::Missing => write!(f, "pricepoints: points not provided"),
            PricePointError::TooSmall { index, point } => write!(
                f,
                "pricepoints: point too small, less than {MIN_PRICE_POINT} (point {point} at index {index})"
            ),
            PricePointError::TooLarge { index, point } => write!(
                f,
                "pricepoints: point too large, greater than {MAX_PRICE_POINT} (point {point} at index {index})"
            ),
        }
    }
}

impl std::error::Error for PricePointError {}

/// Resolution-time failure. Per query; the resolver stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Neither scan found a matching price within the bounds.
    NoValidPrice { min: i64, max: i64 },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NoValidPrice { min, max } => write!(
                f,
                "pricepoints: no valid new price for product (min={min} max={max})"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
