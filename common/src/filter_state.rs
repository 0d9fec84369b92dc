//! The canonical description of what the user currently wants to see.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::facet_catalog::{FacetKey, FlagKey, ResourceType, catalog_for};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    Title,
    Newest,
    Quality,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Relevance, SortKey::Title, SortKey::Newest, SortKey::Quality];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Title => "title",
            Self::Newest => "newest",
            Self::Quality => "quality",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Best match",
            Self::Title => "Title (A to Z)",
            Self::Newest => "Newest first",
            Self::Quality => "Highest rated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == value)
    }

    pub fn is_default(self) -> bool {
        self == Self::default()
    }
}


/// Query text, facet selections, sort order and boolean toggles.
///
/// A normalized state never stores an empty facet set or a `false` flag, so
/// two states that mean the same thing compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub query: String,
    pub facets: BTreeMap<FacetKey, BTreeSet<String>>,
    pub sort: SortKey,
    pub flags: BTreeMap<FlagKey, bool>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_facet<I, V>(mut self, key: FacetKey, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.facets.remove(&key);
        } else {
            self.facets.insert(key, values);
        }
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_flag(mut self, flag: FlagKey, enabled: bool) -> Self {
        if enabled {
            self.flags.insert(flag, true);
        } else {
            self.flags.remove(&flag);
        }
        self
    }

    pub fn selected(&self, key: FacetKey) -> Option<&BTreeSet<String>> {
        self.facets.get(&key).filter(|values| !values.is_empty())
    }

    pub fn is_selected(&self, key: FacetKey, value: &str) -> bool {
        self.facets.get(&key).is_some_and(|values| values.contains(value))
    }

    pub fn flag(&self, flag: FlagKey) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    /// Number of facet values and flags currently constraining the results.
    pub fn active_filter_count(&self) -> usize {
        let facet_values: usize = self.facets.values().map(BTreeSet::len).sum();
        let flags = self.flags.values().filter(|enabled| **enabled).count();
        facet_values + flags
    }

    /// True when nothing but the sort order differs from the default state.
    pub fn is_unfiltered(&self) -> bool {
        self.query.trim().is_empty() && self.active_filter_count() == 0
    }

    /// Drops empty facet sets and disabled flags.
    pub fn normalized(mut self) -> Self {
        self.facets.retain(|_, values| !values.is_empty());
        self.flags.retain(|_, enabled| *enabled);
        self
    }

    /// Drops every facet key, facet value and flag the section's catalog
    /// does not list, then normalizes.
    pub fn retain_catalog(mut self, resource_type: &ResourceType) -> Self {
        let catalog = catalog_for(resource_type);
        self.facets.retain(|key, values| {
            values.retain(|value| catalog.is_valid(*key, value));
            !values.is_empty()
        });
        self.flags.retain(|flag, enabled| *enabled && catalog.supports_flag(*flag));
        self
    }
}
