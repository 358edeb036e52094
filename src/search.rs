//! Directory search filters.
//!
//! Substring filters are case-insensitive. An empty query matches
//! everything, so UIs can pass the search box through unconditionally.

use crate::service::{Service, ServiceCategory};

/// A single match criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceFilter {
    /// Substring of the service name.
    Name(String),
    Category(ServiceCategory),
    /// Substring of the address.
    Address(String),
    /// Minimum rating, inclusive.
    MinRating(f64),
    ApprovedOnly,
}

impl ServiceFilter {
    pub fn matches(&self, service: &Service) -> bool {
        match self {
            Self::Name(query) => contains_ci(&service.name, query),
            Self::Category(category) => service.category == *category,
            Self::Address(query) => contains_ci(&service.address, query),
            Self::MinRating(min) => service.rating >= *min,
            Self::ApprovedOnly => service.is_approved,
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A conjunction of filters. Empty query matches every service.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<ServiceFilter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: ServiceFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, service: &Service) -> bool {
        self.filters.iter().all(|f| f.matches(service))
    }

    /// Filter a service list, keeping input order.
    pub fn apply<'a>(&self, services: impl IntoIterator<Item = &'a Service>) -> Vec<&'a Service> {
        services.into_iter().filter(|s| self.matches(s)).collect()
    }
}

/// True if the free-text query hits the service's name, category label,
/// or address. An empty query matches everything.
pub fn matches_text(query: &str, service: &Service) -> bool {
    query.trim().is_empty()
        || contains_ci(&service.name, query)
        || contains_ci(&service.category.to_string(), query)
        || contains_ci(&service.address, query)
}

/// Free-text search across name, category, and address (union).
/// An empty query returns everything.
pub fn text_search<'a>(query: &str, services: &'a [Service]) -> Vec<&'a Service> {
    services.iter().filter(|s| matches_text(query, s)).collect()
}
