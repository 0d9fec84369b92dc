//! Filter state <-> location query string.
//!
//! One convention is used everywhere: `q` carries the text, a single
//! `filters` parameter carries a JSON object whose arrays are facet
//! selections and whose `true` members are flags, and `sort` is present only
//! when it differs from relevance. The page location adds `section` and
//! `view` in front of those.

use std::{collections::BTreeSet, fmt::Display};

use common::{
    facet_catalog::{FacetKey, FlagKey, ResourceType, catalog_for},
    filter_state::{FilterState, SortKey},
};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::debounce::{DebounceTicket, Debouncer};


pub const QUERY_PARAM: &str = "q";
pub const FILTERS_PARAM: &str = "filters";
pub const SORT_PARAM: &str = "sort";
pub const SECTION_PARAM: &str = "section";
pub const VIEW_PARAM: &str = "view";

/// Serializes `state` to a query string without a leading `?`.
pub fn to_search_params(state: &FilterState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(filter_pairs(state))
        .finish()
}

/// Parses a query string (with or without a leading `?`). Never fails:
/// missing parameters take their defaults and anything the section's catalog
/// does not list is dropped.
pub fn from_search_params(query: &str, resource_type: &ResourceType) -> FilterState {
    let mut state = FilterState::default();
    for (name, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        match name.as_ref() {
            QUERY_PARAM => state.query = value.into_owned(),
            FILTERS_PARAM => decode_filters(&value, resource_type, &mut state),
            SORT_PARAM => state.sort = SortKey::parse(&value).unwrap_or_default(),
            _ => {}
        }
    }
    state.retain_catalog(resource_type)
}

/// The JSON `filters` value, or `None` when no facet or flag is active.
pub fn filters_json(state: &FilterState) -> Option<String> {
    let mut object = Map::new();
    for (key, values) in state.facets.iter().filter(|(_, values)| !values.is_empty()) {
        let values = values.iter().cloned().map(Value::String).collect();
        object.insert(key.as_str().to_string(), Value::Array(values));
    }
    for (flag, _) in state.flags.iter().filter(|(_, enabled)| **enabled) {
        object.insert(flag.as_str().to_string(), Value::Bool(true));
    }
    if object.is_empty() {
        return None;
    }
    Some(Value::Object(object).to_string())
}

pub(crate) fn filter_pairs(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if !state.query.is_empty() {
        pairs.push((QUERY_PARAM, state.query.clone()));
    }
    if let Some(filters) = filters_json(state) {
        pairs.push((FILTERS_PARAM, filters));
    }
    if !state.sort.is_default() {
        pairs.push((SORT_PARAM, state.sort.as_str().to_string()));
    }
    pairs
}

fn decode_filters(raw: &str, resource_type: &ResourceType, state: &mut FilterState) {
    let object = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            tracing::debug!(?other, "ignoring filters parameter that is not an object");
            return;
        }
        Err(err) => {
            tracing::debug!(%err, "ignoring malformed filters parameter");
            return;
        }
    };
    let catalog = catalog_for(resource_type);
    for (name, value) in object {
        if let Ok(key) = name.parse::<FacetKey>() {
            let values: BTreeSet<String> = match value {
                Value::Array(items) => items.into_iter().filter_map(|item| item.as_str().map(str::to_string)).collect(),
                Value::String(single) => BTreeSet::from([single]),
                _ => BTreeSet::new(),
            };
            let values: BTreeSet<String> = values.into_iter().filter(|value| catalog.is_valid(key, value)).collect();
            if !values.is_empty() {
                state.facets.insert(key, values);
            }
        } else if let Ok(flag) = name.parse::<FlagKey>() {
            if value.as_bool() == Some(true) && catalog.supports_flag(flag) {
                state.flags.insert(flag, true);
            }
        }
    }
}


/// Presentation of the result list. Only `list` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
    Map,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::List, ViewMode::Grid, ViewMode::Map];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
            Self::Map => "map",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.as_str() == value)
    }
}


/// Everything the directory page keeps in its URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryLocation {
    pub section: ResourceType,
    pub view: ViewMode,
    pub filter: FilterState,
}

impl DirectoryLocation {
    pub fn new(section: ResourceType, filter: FilterState) -> Self {
        let filter = filter.retain_catalog(&section);
        Self { section, view: ViewMode::default(), filter }
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut pairs = vec![(SECTION_PARAM, self.section.as_str().to_string())];
        if self.view != ViewMode::default() {
            pairs.push((VIEW_PARAM, self.view.as_str().to_string()));
        }
        pairs.extend(filter_pairs(&self.filter));
        form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish()
    }

    /// Parses a location query string; a missing or empty `section` selects
    /// the resource directory.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut section = ResourceType::default();
        let mut view = ViewMode::default();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                SECTION_PARAM if !value.is_empty() => section = ResourceType::from(value.as_ref()),
                VIEW_PARAM => view = ViewMode::parse(&value).unwrap_or_default(),
                _ => {}
            }
        }
        let filter = from_search_params(query, &section);
        Self { section, view, filter }
    }
}

impl Display for DirectoryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}


/// Batches location writes so that a burst of filter changes produces a
/// single history replace once the state has settled.
#[derive(Debug, Default)]
pub struct UrlSynchronizer {
    last_written: Option<DirectoryLocation>,
    pending: Option<DirectoryLocation>,
    debouncer: Debouncer,
}

impl UrlSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location currently shown in the address bar, as far as we know.
    pub fn current(&self) -> Option<&DirectoryLocation> {
        self.last_written.as_ref()
    }

    /// Records `location` as the latest desired state and supersedes any
    /// earlier staged write.
    pub fn stage(&mut self, location: DirectoryLocation) -> DebounceTicket {
        self.pending = Some(location);
        self.debouncer.arm()
    }

    /// Returns the location to `replace` with, if `ticket` is still the
    /// latest staged write and the location actually changed.
    pub fn settle(&mut self, ticket: DebounceTicket) -> Option<DirectoryLocation> {
        if !self.debouncer.is_current(ticket) {
            return None;
        }
        let pending = self.pending.take()?;
        if self.last_written.as_ref() == Some(&pending) {
            return None;
        }
        self.last_written = Some(pending.clone());
        Some(pending)
    }

    /// A section change: cancels staged replaces and returns the location to
    /// `push`, or `None` if it is already shown.
    pub fn navigate(&mut self, location: DirectoryLocation) -> Option<DirectoryLocation> {
        self.debouncer.cancel();
        self.pending = None;
        if self.last_written.as_ref() == Some(&location) {
            return None;
        }
        self.last_written = Some(location.clone());
        Some(location)
    }

    /// A location that arrived from the router (initial load, back/forward).
    /// Nothing needs writing for it.
    pub fn observe(&mut self, location: DirectoryLocation) {
        self.debouncer.cancel();
        self.pending = None;
        self.last_written = Some(location);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tomato_in_california() -> FilterState {
        FilterState::new()
            .with_query("tomato")
            .with_facet(FacetKey::State, ["CA"])
            .with_sort(SortKey::Newest)
    }

    #[test]
    fn scenario_query_state_and_sort() {
        let state = tomato_in_california();
        let encoded = to_search_params(&state);
        assert!(encoded.contains("q=tomato"), "{encoded}");
        assert!(encoded.contains("sort=newest"), "{encoded}");
        let filters: String = form_urlencoded::parse(encoded.as_bytes())
            .find(|(name, _)| name == FILTERS_PARAM)
            .map(|(_, value)| value.into_owned())
            .unwrap();
        assert_eq!(filters, r#"{"state":["CA"]}"#);
        assert_eq!(from_search_params(&encoded, &ResourceType::Universities), state);
    }

    #[test]
    fn round_trip_for_valid_states() {
        let states = [
            FilterState::new(),
            FilterState::new().with_query("cover crops & soil / 100%"),
            FilterState::new().with_sort(SortKey::Quality),
            tomato_in_california(),
            FilterState::new()
                .with_facet(FacetKey::State, ["WA", "OR", "ID"])
                .with_facet(FacetKey::Program, ["extension"])
                .with_flag(FlagKey::HasLocation, true),
        ];
        for state in states {
            let decoded = from_search_params(&to_search_params(&state), &ResourceType::Universities);
            assert_eq!(decoded, state);
        }
    }

    #[test]
    fn defaults_are_omitted() {
        assert_eq!(to_search_params(&FilterState::new()), "");
        assert_eq!(from_search_params("", &ResourceType::Resources), FilterState::new());
        assert_eq!(from_search_params("?", &ResourceType::Resources), FilterState::new());
    }

    #[test]
    fn malformed_filters_are_treated_as_empty() {
        for raw in ["q=soil&filters=%7Bnot-json", "q=soil&filters=%5B1%2C2%5D", "q=soil&filters="] {
            let state = from_search_params(raw, &ResourceType::Resources);
            assert_eq!(state, FilterState::new().with_query("soil"), "{raw}");
        }
    }

    #[test]
    fn unknown_keys_values_and_sort_are_dropped() {
        let filters = r#"{"state":["CA","ZZ"],"colour":["red"],"crop":["tomato"],"has_location":true,"rolling_deadline":true}"#;
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(FILTERS_PARAM, filters)
            .append_pair(SORT_PARAM, "random")
            .append_pair("page", "3")
            .finish();
        let state = from_search_params(&query, &ResourceType::Universities);
        assert_eq!(
            state,
            FilterState::new()
                .with_facet(FacetKey::State, ["CA"])
                .with_flag(FlagKey::HasLocation, true)
        );
    }

    #[test]
    fn location_carries_section_and_view() {
        let location = DirectoryLocation::new(ResourceType::Bulletins, FilterState::new().with_facet(FacetKey::Crop, ["berries"]))
            .with_view(ViewMode::Grid);
        let query = location.to_query_string();
        assert!(query.starts_with("section=bulletins&view=grid"), "{query}");
        assert_eq!(DirectoryLocation::parse(&format!("?{query}")), location);

        let bare = DirectoryLocation::parse("");
        assert_eq!(bare.section, ResourceType::Resources);
        assert_eq!(bare.view, ViewMode::List);
    }

    #[test]
    fn burst_of_stages_settles_once() {
        let mut sync = UrlSynchronizer::new();
        let mut tickets = Vec::new();
        for text in ["t", "to", "tom", "tomato"] {
            let location = DirectoryLocation::new(ResourceType::Resources, FilterState::new().with_query(text));
            tickets.push(sync.stage(location));
        }
        let written: Vec<_> = tickets.into_iter().filter_map(|ticket| sync.settle(ticket)).collect();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].filter.query, "tomato");
    }

    #[test]
    fn settle_skips_location_already_shown() {
        let mut sync = UrlSynchronizer::new();
        let shown = DirectoryLocation::new(ResourceType::Resources, FilterState::new().with_query("soil"));
        sync.observe(shown.clone());
        let ticket = sync.stage(shown);
        assert!(sync.settle(ticket).is_none());
    }

    #[test]
    fn navigate_cancels_pending_replace() {
        let mut sync = UrlSynchronizer::new();
        let ticket = sync.stage(DirectoryLocation::new(ResourceType::Resources, FilterState::new().with_query("soil")));
        let pushed = sync.navigate(DirectoryLocation::new(ResourceType::Universities, FilterState::new()));
        assert!(pushed.is_some());
        assert!(sync.settle(ticket).is_none());
        assert_eq!(sync.current().map(|l| l.section.clone()), Some(ResourceType::Universities));
    }
}
