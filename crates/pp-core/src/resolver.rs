use crate::{PricePointError, ResolveError, TieBreak, MAX_PRICE_POINT, MIN_PRICE_POINT};

/// A match found by one of the directional scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    price: i64,
    distance: u64,
}

/// Resolves prices onto a fixed set of allowed trailing digits.
///
/// The digit set is validated and sorted once at construction and never
/// changes afterwards. The only mutable state is the [`TieBreak`] preference;
/// callers that share a resolver should configure it up front (see
/// [`PriceResolver::with_tie_break`]) or pass the preference per call via
/// [`PriceResolver::resolve_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceResolver {
    points: Vec<u8>,
    tie_break: TieBreak,
}

impl PriceResolver {
    /// Validate `points` and build a resolver preferring greater prices.
    ///
    /// Points are checked left to right; the first point outside `[0, 9]`
    /// is reported together with its index. Duplicates are accepted.
    pub fn new(points: &[i64]) -> Result<Self, PricePointError> {
        if points.is_empty() {
            return Err(PricePointError::Missing);
        }

        let mut validated = Vec::with_capacity(points.len());
        for (index, &point) in points.iter().enumerate() {
            if point < MIN_PRICE_POINT {
                return Err(PricePointError::TooSmall { index, point });
            }
            if point > MAX_PRICE_POINT {
                return Err(PricePointError::TooLarge { index, point });
            }
            // In [0, 9], always fits.
            validated.push(point as u8);
        }
        validated.sort_unstable();

        Ok(Self {
            points: validated,
            tie_break: TieBreak::PreferGreater,
        })
    }

    /// Builder form of the preference setters.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// On a tie, resolve to the lower candidate.
    pub fn prefer_lower_prices(&mut self) {
        self.tie_break = TieBreak::PreferLower;
    }

    /// On a tie, resolve to the higher candidate (the default).
    pub fn prefer_greater_prices(&mut self) {
        self.tie_break = TieBreak::PreferGreater;
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Allowed digits, sorted ascending.
    pub fn points(&self) -> &[u8] {
        &self.points
    }

    /// True if the ones digit of `value` is an allowed price point.
    ///
    /// Uses the truncating remainder, so a negative value only matches
    /// when it is a multiple of ten and `0` is allowed.
    pub fn matches(&self, value: i64) -> bool {
        let unit = value % 10;
        self.points.iter().any(|&p| i64::from(p) == unit)
    }

    /// Resolve with the configured tie-break preference.
    pub fn resolve(&self, current: i64, min: i64, max: i64) -> Result<i64, ResolveError> {
        self.resolve_with(current, min, max, self.tie_break)
    }

    /// Resolve `current` to the nearest matching price in the bounds.
    ///
    /// `current` is clamped to `min` first and then to `max`, so an inverted
    /// range (`min > max`) always seeds at `max`. A seed that already matches
    /// is returned as is. Otherwise the nearer of the two scan results wins,
    /// with `tie_break` deciding between equal distances.
    pub fn resolve_with(
        &self,
        current: i64,
        min: i64,
        max: i64,
        tie_break: TieBreak,
    ) -> Result<i64, ResolveError> {
        let mut seed = current;
        if seed < min {
            seed = min;
        }
        if seed > max {
            seed = max;
        }

        if self.matches(seed) {
            return Ok(seed);
        }

        let high = self.next_highest(seed, max);
        let low = self.next_lowest(seed, min);

        match (high, low) {
            (None, None) => Err(ResolveError::NoValidPrice { min, max }),
            (None, Some(low)) => Ok(low.price),
            (Some(high), None) => Ok(high.price),
            (Some(high), Some(low)) => {
                if high.distance == low.distance {
                    return Ok(match tie_break {
                        TieBreak::PreferGreater => high.price,
                        TieBreak::PreferLower => low.price,
                    });
                }
                if high.distance > low.distance {
                    Ok(low.price)
                } else {
                    Ok(high.price)
                }
            }
        }
    }

    /// Scan upward from `seed`. `max` itself is never tested: the upper
    /// bound is exclusive while the lower bound of [`Self::next_lowest`] is
    /// inclusive. This asymmetry is intentional and decides documented
    /// tie-break outcomes, so it must not be "evened out".
    fn next_highest(&self, seed: i64, max: i64) -> Option<Candidate> {
        (seed..max).find(|&p| self.matches(p)).map(|price| Candidate {
            price,
            distance: price.abs_diff(seed),
        })
    }

    /// Scan downward from `seed` to `min` inclusive.
    fn next_lowest(&self, seed: i64, min: i64) -> Option<Candidate> {
        (min..=seed).rev().find(|&p| self.matches(p)).map(|price| Candidate {
            price,
            distance: seed.abs_diff(price),
        })
    }
}
