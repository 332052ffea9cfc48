//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`FilterOperator`].

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination and sparse fieldsets.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Skips the first `offset` results (`page[offset]`).
    fn with_page_offset(mut self, offset: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_offset = Some(offset);
        self
    }

    /// Sets the number of results per page (`page[limit]`). Drupal caps this at 50.
    fn with_page_limit(mut self, limit: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_limit = Some(limit);
        self
    }
}

/// Comparison operator for a JSON:API `filter[...][operator]` parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterOperator {
    /// Exact match. This is the default.
    #[default]
    Equals,
    /// Value is a prefix of the field.
    StartsWith,
    /// Value appears anywhere in the field.
    Contains,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FilterOperator::Equals => "=",
            FilterOperator::StartsWith => "STARTS_WITH",
            FilterOperator::Contains => "CONTAINS",
        })
    }
}

impl FromStr for FilterOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(FilterOperator::Equals),
            "STARTS_WITH" => Ok(FilterOperator::StartsWith),
            "CONTAINS" => Ok(FilterOperator::Contains),
            _ => Err(()),
        }
    }
}

/// Fields shared by all query types: pagination.
#[derive(Clone, Copy, Default, Debug)]
pub struct QueryCommon {
    /// Number of results to skip. `None` starts from the first result.
    pub page_offset: Option<u32>,
    /// Results per page. `None` uses the server default.
    pub page_limit: Option<u32>,
}

impl QueryCommon {
    /// Appends the common pagination parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(offset) = self.page_offset {
            url.query_pairs_mut()
                .append_pair("page[offset]", &offset.to_string());
        };
        if let Some(limit) = self.page_limit {
            url.query_pairs_mut()
                .append_pair("page[limit]", &limit.to_string());
        };
        url
    }
}
