//! Typed bindings for the FTask REST surface.
//!
//! One module per resource, admin operations folded into their resource
//! module under an `admin` submodule. Every function takes the shared
//! [`crate::client::ApiClient`] and returns the unwrapped envelope payload.

pub mod auth;
pub mod bookings;
pub mod catalogs;
pub mod dashboard;
pub mod districts;
pub mod notifications;
pub mod partners;
pub mod reviews;
pub mod transactions;
pub mod users;
pub mod variants;

use serde::Deserialize;

/// Paging/sorting parameters shared by the list endpoints.
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl PageQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn sort(mut self, by: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort_by = Some(by.into());
        self.sort_direction = Some(direction.into());
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(direction) = &self.sort_direction {
            params.push(("sortDirection", direction.clone()));
        }
        params
    }
}

/// One page of a paged listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_params_in_order() {
        let query = PageQuery::default().page(2).size(20).sort("startAt", "desc");
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "2".to_string()),
                ("size", "20".to_string()),
                ("sortBy", "startAt".to_string()),
                ("sortDirection", "desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_page_query_sends_nothing() {
        assert!(PageQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_page_decodes_with_missing_counters() {
        let page: Page<String> = serde_json::from_str(r#"{"content":["a","b"]}"#).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 0);
    }
}
