//! Catalog listing parameters: sort order and page window.

use serde::{Deserialize, Serialize};

/// Sort order for product listings.
///
/// Parsing never fails: unknown values fall back to [`ProductSort::Default`],
/// which is store insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    /// Store insertion order.
    #[default]
    Default,
    /// Ascending lexicographic name.
    Name,
    /// Ascending price.
    PriceAsc,
    /// Descending price.
    PriceDesc,
}

impl ProductSort {
    /// Map a raw `sort` query value onto a sort order.
    ///
    /// ```
    /// use minishop_core::ProductSort;
    ///
    /// assert_eq!(ProductSort::parse(Some("price_desc")), ProductSort::PriceDesc);
    /// assert_eq!(ProductSort::parse(Some("rating")), ProductSort::Default);
    /// assert_eq!(ProductSort::parse(None), ProductSort::Default);
    /// ```
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => Self::Name,
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            _ => Self::Default,
        }
    }

    /// The query-string form of this sort order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Name => "name",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }
}

/// Errors that can occur when building a [`PageRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one product.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// A validated page window over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page used when the client does not ask for one.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the client does not ask for one.
    pub const DEFAULT_LIMIT: u32 = 3;
    /// Largest page size served; bigger requests are clamped to it.
    pub const MAX_LIMIT: u32 = 100;

    /// Build a page window, filling in defaults for absent values.
    ///
    /// # Errors
    ///
    /// Returns `PageError::ZeroPage` or `PageError::ZeroLimit` when a value
    /// of zero is supplied.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageError> {
        let page = page.unwrap_or(Self::DEFAULT_PAGE);
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);

        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageError::ZeroLimit);
        }

        Ok(Self {
            page,
            limit: limit.min(Self::MAX_LIMIT),
        })
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of products on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of products to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
