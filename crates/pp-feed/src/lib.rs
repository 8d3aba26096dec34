//! pp-feed
//!
//! Catalog IO around the resolver:
//! - decimal price strings <-> integer cents (`money`)
//! - streaming CSV repricing with per-run row counts (`reprice`)
//!
//! The resolver itself lives in `pp-core`; nothing here decides prices.

pub mod money;
pub mod reprice;

pub use money::{price_to_cents, Cents, MoneyError, CENTS_SCALE};
pub use reprice::{
    output_writer, reprice_file, reprice_reader, write_header, FeedError, RepriceReport,
    DEFAULT_NO_VALID_PRICE_MARKER, OUTPUT_HEADER,
};
