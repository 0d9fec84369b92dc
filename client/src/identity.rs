//! Which result set a filter state asks for.

use std::collections::{BTreeMap, BTreeSet};

use common::{
    facet_catalog::{FacetKey, FlagKey, ResourceType},
    filter_state::{FilterState, SortKey},
};
use serde::Serialize;


/// Everything that decides the contents of a result set, and nothing that
/// only decides how far into it we have paged. Two fetches with equal
/// identities extend the same list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QueryIdentity {
    pub resource_type: ResourceType,
    pub query: String,
    pub facets: BTreeMap<FacetKey, BTreeSet<String>>,
    pub flags: BTreeMap<FlagKey, bool>,
    pub sort: SortKey,
}

impl QueryIdentity {
    pub fn new(resource_type: &ResourceType, filter: &FilterState) -> Self {
        let filter = filter.clone().normalized();
        Self {
            resource_type: resource_type.clone(),
            query: filter.query.trim().to_string(),
            facets: filter.facets,
            flags: filter.flags,
            sort: filter.sort,
        }
    }

    /// The normalized filter this identity was derived from.
    pub fn filter(&self) -> FilterState {
        FilterState {
            query: self.query.clone(),
            facets: self.facets.clone(),
            sort: self.sort,
            flags: self.flags.clone(),
        }
    }

    /// Stable hex digest of the identity, used to key cached first pages.
    pub fn cache_key(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"));
        sha256::digest(canonical)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_and_empty_selections_do_not_change_identity() {
        let a = QueryIdentity::new(&ResourceType::Resources, &FilterState::new().with_query("soil"));
        let mut padded = FilterState::new().with_query("  soil ");
        padded.facets.insert(FacetKey::Topic, BTreeSet::new());
        let b = QueryIdentity::new(&ResourceType::Resources, &padded);
        assert_eq!(a, b);
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn section_sort_and_facets_change_identity() {
        let base = FilterState::new().with_query("soil");
        let a = QueryIdentity::new(&ResourceType::Resources, &base);
        let other_section = QueryIdentity::new(&ResourceType::Bulletins, &base);
        let other_sort = QueryIdentity::new(&ResourceType::Resources, &base.clone().with_sort(SortKey::Newest));
        let other_facet = QueryIdentity::new(&ResourceType::Resources, &base.clone().with_facet(FacetKey::Cost, ["free"]));
        for other in [other_section, other_sort, other_facet] {
            assert_ne!(a, other);
            assert_ne!(a.cache_key(), other.cache_key());
        }
        assert_eq!(a.cache_key().len(), 64);
    }
}
