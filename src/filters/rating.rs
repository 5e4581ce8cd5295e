//! "N stars & up" rating tier filter.

use super::Filter;
use crate::catalog::Product;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A rating filter bucket. Tiers are inclusive lower bounds, so they overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RatingTier {
    Three,
    Four,
    Five,
}

impl RatingTier {
    /// Returns the minimum rating a product needs to pass this tier.
    pub fn threshold(&self) -> f64 {
        match self {
            RatingTier::Three => 3.0,
            RatingTier::Four => 4.0,
            RatingTier::Five => 4.5,
        }
    }

    /// Returns the star count shown on the filter control.
    pub fn stars(&self) -> u8 {
        match self {
            RatingTier::Three => 3,
            RatingTier::Four => 4,
            RatingTier::Five => 5,
        }
    }

    pub fn all() -> &'static [RatingTier] {
        &[RatingTier::Three, RatingTier::Four, RatingTier::Five]
    }
}

impl TryFrom<u8> for RatingTier {
    type Error = CatalogError;

    fn try_from(stars: u8) -> Result<Self, Self::Error> {
        match stars {
            3 => Ok(RatingTier::Three),
            4 => Ok(RatingTier::Four),
            5 => Ok(RatingTier::Five),
            _ => Err(CatalogError::InvalidRatingTier(stars.to_string())),
        }
    }
}

impl From<RatingTier> for u8 {
    fn from(tier: RatingTier) -> Self {
        tier.stars()
    }
}

impl FromStr for RatingTier {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| CatalogError::InvalidRatingTier(s.to_string()))
            .and_then(RatingTier::try_from)
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stars())
    }
}

/// Passes products whose rating meets any selected tier.
pub struct RatingFilter {
    tiers: BTreeSet<RatingTier>,
}

impl RatingFilter {
    /// Creates a new rating filter over the given tiers.
    pub fn new(tiers: impl IntoIterator<Item = RatingTier>) -> Self {
        Self { tiers: tiers.into_iter().collect() }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, product: &Product) -> bool {
        // Unrated products count as zero stars
        let stars = product.stars();
        self.tiers.iter().any(|tier| stars >= tier.threshold())
    }

    fn description(&self) -> String {
        let tiers: Vec<String> = self.tiers.iter().map(|t| format!("{}+", t)).collect();
        format!("Rating: {} stars", tiers.join(" or "))
    }
}
