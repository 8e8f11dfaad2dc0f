// src/api/mod.rs

//! Access to the package service's listing endpoints
//!
//! Commands talk to the service through the [`Fetcher`] trait so they can be
//! exercised without a network. [`ApiClient`] is the HTTP implementation.

mod client;

pub use client::{ApiClient, ApiOptions, DEFAULT_API_HOST, failure_from_parts};

use crate::error::Result;
use crate::models::Entity;
use crate::pagination::{PageInfo, PageRequest};
use crate::query::QueryTerm;

/// Package formats that carry distributions
pub const FORMATS_WITH_DISTROS: [&str; 3] = ["alpine", "deb", "rpm"];

/// One page of listed entities
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub results: Vec<Entity>,
    pub page_info: PageInfo,
}

/// Fetches entity listings from the package service
///
/// Implementations return `Error::Api` for non-success responses and never
/// a partial list.
pub trait Fetcher {
    /// Packages in `owner/repo` matching every query term
    fn list_packages(
        &self,
        owner: &str,
        repo: &str,
        query: &[QueryTerm],
        page: PageRequest,
    ) -> Result<Page>;

    /// Repositories of `owner`, or of the authenticated user when `None`
    fn list_repos(&self, owner: Option<&str>, page: PageRequest) -> Result<Page>;

    /// Distributions, optionally limited to one package format
    fn list_distros(&self, package_format: Option<&str>) -> Result<Vec<Entity>>;
}
