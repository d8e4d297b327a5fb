//! Catalog filters
//!
//! Every option the catalog endpoints understand is spelled out here and
//! validated before an outbound request is built.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

/// Default number of products returned by the cheapest/most expensive listings.
pub const DEFAULT_PRICE_RANKING_LIMIT: u32 = 5;

/// Default number of products returned by the recent listing.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// Errors raised while validating catalog filters.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    /// A price bound is negative.
    #[error("price bound {0} must not be negative")]
    NegativePrice(Decimal),

    /// The minimum price is greater than the maximum price.
    #[error("minimum price {min} is greater than maximum price {max}")]
    InvertedPriceRange {
        /// Lower bound.
        min: Decimal,

        /// Upper bound.
        max: Decimal,
    },

    /// A listing limit of zero was requested.
    #[error("limit must be greater than zero")]
    ZeroLimit,

    /// The sort order is not recognised.
    #[error("unknown sort order {0:?}")]
    UnknownOrder(String),
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Alphabetical by name.
    #[default]
    Name,

    /// Cheapest first.
    PriceAsc,

    /// Most expensive first.
    PriceDesc,

    /// Most recently added first.
    Recent,
}

impl OrderBy {
    /// Query string value understood by the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::PriceAsc => "preco_asc",
            Self::PriceDesc => "preco_desc",
            Self::Recent => "recentes",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "nome" => Ok(Self::Name),
            "preco_asc" => Ok(Self::PriceAsc),
            "preco_desc" => Ok(Self::PriceDesc),
            "recentes" => Ok(Self::Recent),
            other => Err(FilterError::UnknownOrder(other.to_string())),
        }
    }
}

/// Public catalog filter for `GET /doces`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Free-text search over product names.
    pub search: Option<String>,

    /// Sort order.
    pub order_by: Option<OrderBy>,

    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
}

impl CatalogFilter {
    /// Validate the filter and render it as query pairs.
    ///
    /// Blank searches are dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] for negative or inverted price bounds.
    pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>, FilterError> {
        validate_price_range(self.min_price, self.max_price)?;

        let mut pairs = Vec::new();

        if let Some(search) = non_blank(self.search.as_deref()) {
            pairs.push(("search", search.to_string()));
        }

        if let Some(order_by) = self.order_by {
            pairs.push(("orderBy", order_by.as_str().to_string()));
        }

        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.normalize().to_string()));
        }

        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.normalize().to_string()));
        }

        Ok(pairs)
    }
}

/// Admin listing filter for `GET /admin/doces`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFilter {
    /// Restrict to available or unavailable products.
    pub available: Option<bool>,

    /// Free-text search over product names.
    pub search: Option<String>,
}

impl AdminFilter {
    /// Render the filter as query pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(available) = self.available {
            pairs.push(("disponivel", available.to_string()));
        }

        if let Some(search) = non_blank(self.search.as_deref()) {
            pairs.push(("search", search.to_string()));
        }

        pairs
    }
}

/// Validate an explicit price range query (`/doces/price-range`).
///
/// # Errors
///
/// Returns a [`FilterError`] for negative or inverted bounds.
pub fn price_range_pairs(
    min: Decimal,
    max: Decimal,
) -> Result<Vec<(&'static str, String)>, FilterError> {
    validate_price_range(Some(min), Some(max))?;

    Ok(vec![
        ("min", min.normalize().to_string()),
        ("max", max.normalize().to_string()),
    ])
}

/// Validate a listing limit.
///
/// # Errors
///
/// Returns [`FilterError::ZeroLimit`] when `limit` is zero.
pub fn limit_pairs(limit: u32) -> Result<Vec<(&'static str, String)>, FilterError> {
    if limit == 0 {
        return Err(FilterError::ZeroLimit);
    }

    Ok(vec![("limit", limit.to_string())])
}

fn validate_price_range(min: Option<Decimal>, max: Option<Decimal>) -> Result<(), FilterError> {
    for bound in [min, max].into_iter().flatten() {
        if bound.is_sign_negative() && !bound.is_zero() {
            return Err(FilterError::NegativePrice(bound));
        }
    }

    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(FilterError::InvertedPriceRange { min, max }),
        _ => Ok(()),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
