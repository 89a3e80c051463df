//! Hotel search parameters and result pages.
//!
//! [`SearchParams`] is the raw query string as the frontend sends it.
//! [`SearchParams::into_search`] turns it into a typed [`HotelSearch`],
//! dropping any numeric value that does not parse instead of rejecting
//! the request.

use serde::{Deserialize, Serialize};

/// Fixed number of hotels per search page.
pub const PAGE_SIZE: u64 = 5;

/// Raw search query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub destination: Option<String>,
    pub adult_count: Option<String>,
    pub child_count: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub stars: Vec<String>,
    pub max_price: Option<String>,
    pub sort_option: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    /// Highest star rating first.
    StarRating,
    PricePerNightAsc,
    PricePerNightDesc,
}

impl SortOption {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "starRating" => Some(Self::StarRating),
            "pricePerNightAsc" => Some(Self::PricePerNightAsc),
            "pricePerNightDesc" => Some(Self::PricePerNightDesc),
            _ => None,
        }
    }
}

/// Typed search filters. Every filter is optional; present filters are
/// combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelSearch {
    /// Case-insensitive substring of city or country.
    pub destination: Option<String>,
    pub min_adult_count: Option<u32>,
    pub min_child_count: Option<u32>,
    /// Hotels must offer all of these.
    pub facilities: Vec<String>,
    /// Hotels must be one of these types.
    pub types: Vec<String>,
    /// Hotels must have one of these ratings.
    pub star_ratings: Vec<u8>,
    pub max_price: Option<f64>,
    pub sort: Option<SortOption>,
    /// 1-indexed page number.
    pub page: u64,
}

impl Default for HotelSearch {
    fn default() -> Self {
        Self {
            destination: None,
            min_adult_count: None,
            min_child_count: None,
            facilities: Vec::new(),
            types: Vec::new(),
            star_ratings: Vec::new(),
            max_price: None,
            sort: None,
            page: 1,
        }
    }
}

impl HotelSearch {
    /// Number of records to skip for the requested page.
    ///
    /// Saturates at `i64::MAX`, the largest `START` the database takes;
    /// such a page is simply past the end.
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1)
            .saturating_mul(PAGE_SIZE)
            .min(i64::MAX as u64)
    }
}

fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

impl SearchParams {
    pub fn into_search(self) -> HotelSearch {
        let destination = self
            .destination
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let star_ratings = self
            .stars
            .iter()
            .filter_map(|s| parse_number::<u8>(Some(s.as_str())))
            .collect();

        let page = parse_number::<u64>(self.page.as_deref())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        HotelSearch {
            destination,
            min_adult_count: parse_number(self.adult_count.as_deref()),
            min_child_count: parse_number(self.child_count.as_deref()),
            facilities: non_blank(self.facilities),
            types: non_blank(self.types),
            star_ratings,
            max_price: parse_number::<f64>(self.max_price.as_deref()).filter(|p| p.is_finite()),
            sort: self.sort_option.as_deref().and_then(SortOption::parse),
            page,
        }
    }
}

/// Pagination block of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

impl PageInfo {
    pub fn new(total: u64, page: u64) -> Self {
        Self {
            total,
            page,
            pages: total.div_ceil(PAGE_SIZE),
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}
