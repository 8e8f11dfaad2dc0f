// src/pagination.rs

//! Pagination request parameters and response metadata
//!
//! The service reports pagination state in response headers. When any of
//! them is missing the page information is considered invalid and page
//! details are left out of both the summary line and structured output.

use reqwest::header::HeaderMap;
use serde::Serialize;
use std::fmt;

const HEADER_COUNT: &str = "x-pagination-count";
const HEADER_PAGE: &str = "x-pagination-page";
const HEADER_PAGE_SIZE: &str = "x-pagination-pagesize";
const HEADER_PAGE_TOTAL: &str = "x-pagination-pagetotal";

/// Page requested by the user
///
/// Values are passed through untouched; the service validates bounds and
/// applies its defaults when a value is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageRequest {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self { page, page_size }
    }

    /// Query parameters for the present values only
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("page_size", page_size.to_string()));
        }
        params
    }
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub page_total: Option<u64>,
    /// Total number of results across all pages
    pub count: Option<u64>,
}

impl PageInfo {
    /// Read pagination metadata from response headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        Self {
            page: number(HEADER_PAGE),
            page_size: number(HEADER_PAGE_SIZE),
            page_total: number(HEADER_PAGE_TOTAL),
            count: number(HEADER_COUNT),
        }
    }

    /// Whether the service reported complete pagination metadata
    pub fn is_valid(&self) -> bool {
        self.page.is_some()
            && self.page_size.is_some()
            && self.page_total.is_some()
            && self.count.is_some()
    }

    /// 1-based (from, to) positions of the results on the current page
    ///
    /// For an empty page `to` is one less than `from`. Header values are
    /// untrusted, so the arithmetic saturates at `u64::MAX` instead of
    /// overflowing.
    pub fn range(&self, num_results: usize) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(0);
        let from = (page - 1).saturating_mul(page_size).saturating_add(1);
        let to = from.saturating_add(num_results as u64).saturating_sub(1);
        (from, to)
    }

    /// Pagination block for structured output, only when valid
    pub fn as_pagination(&self, num_results: usize) -> Option<Pagination> {
        let (Some(page), Some(page_size), Some(page_total), Some(count)) =
            (self.page, self.page_size, self.page_total, self.count)
        else {
            return None;
        };
        let (from, to) = self.range(num_results);
        Some(Pagination {
            page,
            page_size,
            page_total,
            results_total: count,
            results_from: from,
            results_to: to,
        })
    }

    /// Summary of a fetched page for the human-readable result line
    ///
    /// `suffix` is already pluralized by the caller.
    pub fn summary(&self, num_results: usize, suffix: impl Into<String>) -> PageSummary {
        PageSummary {
            num_results,
            suffix: suffix.into(),
            pagination: self.as_pagination(num_results),
        }
    }
}

/// The `_pagination` object of the structured output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub page_total: u64,
    pub results_total: u64,
    pub results_from: u64,
    pub results_to: u64,
}

/// Human-readable description of a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub num_results: usize,
    pub suffix: String,
    pub pagination: Option<Pagination>,
}

impl PageSummary {
    /// Summary for a listing that has no pagination at all
    pub fn unpaged(num_results: usize, suffix: impl Into<String>) -> Self {
        PageInfo::default().summary(num_results, suffix)
    }

    /// The count part (`3` or `1-20 (20) of 45`)
    pub fn count_text(&self) -> String {
        match &self.pagination {
            Some(p) => format!(
                "{}-{} ({}) of {}",
                p.results_from, p.results_to, self.num_results, p.results_total
            ),
            None => self.num_results.to_string(),
        }
    }

    /// Everything after the count (suffix and page position)
    pub fn detail_text(&self) -> String {
        match &self.pagination {
            Some(p) => format!(
                "{} (page {} of {}, page size {})",
                self.suffix, p.page, p.page_total, p.page_size
            ),
            None => self.suffix.clone(),
        }
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count_text(), self.detail_text())
    }
}

/// Pick the singular or plural form for a count
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
