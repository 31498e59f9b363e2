//! Raise rate lookup.
//!
//! This module maps a rating, and for matrix tables a band position, to a
//! raise rate. Every lookup succeeds: keys the table does not know resolve to
//! a zero rate, and [`LookupOutcome`] records which fallback was taken.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateTable;
use crate::models::{BandPosition, Rating};

/// How a rate lookup was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The table had an entry for the key.
    Matched,
    /// The rating label is not one of S/A/B/C/D.
    UnknownRating,
    /// The rating is valid but the table has no entry for it.
    RatingNotConfigured,
    /// The table is a matrix and the band position is absent or unrecognised.
    UnknownBandPosition,
    /// The table is a matrix and has no entry for this rating and band position.
    BandNotConfigured,
}

/// The result of a rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLookup {
    /// The raise rate as a fraction. Zero unless `outcome` is `Matched`.
    pub rate: Decimal,
    /// Which branch of the lookup produced the rate.
    pub outcome: LookupOutcome,
}

impl RateLookup {
    fn matched(rate: Decimal) -> Self {
        Self {
            rate,
            outcome: LookupOutcome::Matched,
        }
    }

    fn zero(outcome: LookupOutcome) -> Self {
        Self {
            rate: Decimal::ZERO,
            outcome,
        }
    }
}

/// Resolves raise rates against an immutable rate table.
///
/// # Examples
///
/// ```
/// use raise_engine::calculation::RateResolver;
/// use raise_engine::config::RateTable;
/// use raise_engine::models::{BandPosition, Rating};
/// use rust_decimal::Decimal;
///
/// let resolver = RateResolver::new(RateTable::matrix([
///     (Rating::A, BandPosition::Mid, Decimal::new(5, 2)),
/// ]));
///
/// assert_eq!(resolver.resolve(Some(Rating::A), Some(BandPosition::Mid)), Decimal::new(5, 2));
/// assert_eq!(resolver.resolve(Some(Rating::A), Some(BandPosition::High)), Decimal::ZERO);
/// assert_eq!(resolver.resolve(None, Some(BandPosition::Mid)), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateResolver {
    table: RateTable,
}

impl RateResolver {
    /// Creates a resolver over the given table.
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Returns the underlying table.
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Returns true if lookups use the band position.
    pub fn requires_band_position(&self) -> bool {
        self.table.is_matrix()
    }

    /// Returns the raise rate for a rating and optional band position.
    ///
    /// Flat tables ignore `band_position`. Unknown or unconfigured keys give 0.
    pub fn resolve(&self, rating: Option<Rating>, band_position: Option<BandPosition>) -> Decimal {
        self.lookup(rating, band_position).rate
    }

    /// Like [`resolve`](Self::resolve), but also reports which branch was taken.
    pub fn lookup(&self, rating: Option<Rating>, band_position: Option<BandPosition>) -> RateLookup {
        let Some(rating) = rating else {
            return RateLookup::zero(LookupOutcome::UnknownRating);
        };

        match &self.table {
            RateTable::Flat(rates) => match rates.get(&rating) {
                Some(rate) => RateLookup::matched(*rate),
                None => RateLookup::zero(LookupOutcome::RatingNotConfigured),
            },
            RateTable::Matrix(rates) => {
                let Some(band_position) = band_position else {
                    return RateLookup::zero(LookupOutcome::UnknownBandPosition);
                };
                match rates.get(&rating) {
                    None => RateLookup::zero(LookupOutcome::RatingNotConfigured),
                    Some(bands) => match bands.get(&band_position) {
                        Some(rate) => RateLookup::matched(*rate),
                        None => RateLookup::zero(LookupOutcome::BandNotConfigured),
                    },
                }
            }
        }
    }
}

impl From<RateTable> for RateResolver {
    fn from(table: RateTable) -> Self {
        Self::new(table)
    }
}
