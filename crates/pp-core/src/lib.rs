//! pp-core
//!
//! Price-point resolution.
//!
//! Given a current price and a min/max bound (integer minor units), find the
//! closest price whose ones digit belongs to a configured set of allowed
//! digits. Ties between an equally distant higher and lower candidate are
//! broken by a [`TieBreak`] preference.
//!
//! Deterministic, pure logic. No IO, no decimal parsing, no allocation per query.

mod resolver;
mod types;

pub use resolver::PriceResolver;
pub use types::*;
