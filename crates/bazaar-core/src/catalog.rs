//! # Catalog Queries
//!
//! Pure read-side logic over product listings: conjunctive filtering,
//! 1-indexed pagination and average rating.
//!
//! ## Filter Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductFilter { category, condition, sellerId,                        │
//! │                  minPrice, maxPrice, search }                          │
//! │                                                                         │
//! │  product matches ⇔ every PRESENT field matches (AND)                   │
//! │                                                                         │
//! │  category / condition / sellerId  → equality                           │
//! │  minPrice ≤ price ≤ maxPrice (inclusive, dollars on the wire)          │
//! │  search → case-insensitive substring of title OR description           │
//! │  absent field → no exclusion                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductCategory, ProductCondition};

// =============================================================================
// Filtering
// =============================================================================

/// Optional constraints for `productsByFilter`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductFilter {
    #[serde(default)]
    pub category: Option<ProductCategory>,
    #[serde(default)]
    pub condition: Option<ProductCondition>,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default, rename = "minPrice", with = "crate::money::dollars::option")]
    #[ts(type = "number | null")]
    pub min_price_cents: Option<i64>,
    #[serde(default, rename = "maxPrice", with = "crate::money::dollars::option")]
    #[ts(type = "number | null")]
    pub max_price_cents: Option<i64>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ProductFilter {
    /// Whether `product` satisfies every present constraint.
    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|c| c != product.category) {
            return false;
        }
        if self.condition.is_some_and(|c| c != product.condition) {
            return false;
        }
        if self
            .seller_id
            .as_deref()
            .is_some_and(|seller| seller != product.seller_id)
        {
            return false;
        }
        if self.min_price_cents.is_some_and(|min| product.price_cents < min) {
            return false;
        }
        if self.max_price_cents.is_some_and(|max| product.price_cents > max) {
            return false;
        }

        match self.search.as_deref().filter(|s| !s.is_empty()) {
            Some(needle) => {
                let needle = needle.to_lowercase();
                product.title.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// ACTIVE products matching `filter`, in original order.
pub fn filter_active<'a, I>(products: I, filter: &ProductFilter) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|p| p.is_active() && filter.matches(p))
        .collect()
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total_items: i64,
}

/// Slices `items` into 1-indexed pages of `limit`.
///
/// ## Rules
/// - `page` and `limit` must both be ≥ 1, otherwise [`CoreError::InvalidPage`]
/// - slice = `[(page-1)*limit, (page-1)*limit + limit)`, clamped to the list
/// - `total_pages` = ⌈len / limit⌉ (0 for an empty list)
/// - a page past the end is empty, not an error
pub fn paginate<T>(items: Vec<T>, page: i64, limit: i64) -> CoreResult<Page<T>> {
    if page < 1 || limit < 1 {
        return Err(CoreError::InvalidPage);
    }

    let total_items = items.len() as i64;
    let total_pages = if total_items == 0 {
        0
    } else {
        (total_items - 1) / limit + 1
    };

    let start = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let take = usize::try_from(limit).unwrap_or(usize::MAX);

    let items = items.into_iter().skip(start).take(take).collect();

    Ok(Page {
        items,
        total_pages,
        current_page: page,
        total_items,
    })
}

// =============================================================================
// Ratings
// =============================================================================

/// Arithmetic mean of `ratings`; `None` when there are no ratings.
///
/// ```rust
/// use bazaar_core::catalog::average_rating;
///
/// assert_eq!(average_rating([4u8, 5]), Some(4.5));
/// assert_eq!(average_rating(Vec::<u8>::new()), None);
/// ```
pub fn average_rating<I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), r| (sum + u64::from(r), count + 1));

    if count == 0 {
        return None;
    }

    Some(sum as f64 / count as f64)
}

// =============================================================================
// Unit Tests
// =============================================================================
