use std::collections::BTreeMap;

use url::Url;

use super::{
    common::{QueryCommon, SortDirection},
    Query,
};

/// Parameters for one page of a resource list.
///
/// `search` and filters with empty values are left off the wire, and the sort
/// direction is only sent together with a sort field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub common: QueryCommon,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl Query for ListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .extend_pairs(self.to_pairs().iter().map(|(k, v)| (k.as_str(), v.as_str())));
        url
    }
}

impl ListQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: &str) -> Self {
        self.sort_by = Some(sort_by.to_string());
        self
    }

    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filters.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_filters(mut self, filters: &[(&str, &str)]) -> Self {
        self.filters
            .extend(filters.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// The query as ordered key/value pairs, exactly as they go on the wire.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.common.to_pairs();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sortBy".to_string(), sort_by.to_string()));
            pairs.push(("sortOrder".to_string(), self.sort_direction().to_string()));
        }
        for (key, value) in self.filters.iter() {
            if key.is_empty() || value.is_empty() {
                continue;
            }
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.common.sort_direction
    }
}
