//! Owner of the current [`FilterState`] for one directory view.
//!
//! Mutators never edit the state in place: each accepted change builds a new
//! `Rc<FilterState>`, swaps it in and calls every subscriber synchronously
//! before returning. Changes the facet catalog rejects, and changes that
//! leave the state equal to what it was, are silent no-ops.

use std::{collections::BTreeSet, rc::Rc};

use common::{
    facet_catalog::{FacetKey, FlagKey, ResourceType, catalog_for},
    filter_state::{FilterState, SortKey},
};


pub type SubscriberId = u64;

type Subscriber = Box<dyn FnMut(&Rc<FilterState>)>;

pub struct FilterStore {
    resource_type: ResourceType,
    state: Rc<FilterState>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: SubscriberId,
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("resource_type", &self.resource_type)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl FilterStore {
    pub fn new(resource_type: ResourceType) -> Self {
        Self::with_state(resource_type, FilterState::default())
    }

    pub fn with_state(resource_type: ResourceType, state: FilterState) -> Self {
        let state = state.retain_catalog(&resource_type);
        Self {
            resource_type,
            state: Rc::new(state),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    pub fn state(&self) -> Rc<FilterState> {
        self.state.clone()
    }

    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// Registers `subscriber`; it is called after every accepted change.
    /// Subscribers must not call back into the store.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Rc<FilterState>) + 'static) -> SubscriberId {
        let id = self.next_subscriber;
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> Option<Rc<FilterState>> {
        let mut next = (*self.state).clone();
        next.query = text.into();
        self.commit(next)
    }

    /// Replaces the selection of `key`. Rejected as a whole if any value is
    /// not listed for `key` in the active catalog; an empty list clears it.
    pub fn set_facet<I, V>(&mut self, key: FacetKey, values: I) -> Option<Rc<FilterState>>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let catalog = catalog_for(&self.resource_type);
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return self.clear_facet(key);
        }
        if let Some(rejected) = values.iter().find(|value| !catalog.is_valid(key, value)) {
            tracing::debug!(facet = key.as_str(), value = %rejected, section = %self.resource_type, "rejected facet value");
            return None;
        }
        let mut next = (*self.state).clone();
        next.facets.insert(key, values);
        self.commit(next)
    }

    /// Adds `value` to the selection of `key`, or removes it if present.
    pub fn toggle_facet_value(&mut self, key: FacetKey, value: &str) -> Option<Rc<FilterState>> {
        if !catalog_for(&self.resource_type).is_valid(key, value) {
            return None;
        }
        let mut values = self.state.facets.get(&key).cloned().unwrap_or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        self.set_facet(key, values)
    }

    /// Removes `key` entirely rather than leaving an empty selection.
    pub fn clear_facet(&mut self, key: FacetKey) -> Option<Rc<FilterState>> {
        let mut next = (*self.state).clone();
        next.facets.remove(&key);
        self.commit(next)
    }

    pub fn set_flag(&mut self, flag: FlagKey, enabled: bool) -> Option<Rc<FilterState>> {
        if !catalog_for(&self.resource_type).supports_flag(flag) {
            return None;
        }
        let next = (*self.state).clone().with_flag(flag, enabled);
        self.commit(next)
    }

    pub fn set_sort(&mut self, sort: SortKey) -> Option<Rc<FilterState>> {
        let mut next = (*self.state).clone();
        next.sort = sort;
        self.commit(next)
    }

    /// Resets text, facets, flags and sort to their defaults.
    pub fn clear_all(&mut self) -> Option<Rc<FilterState>> {
        self.commit(FilterState::default())
    }

    /// Switches to another section's catalog, dropping selections it lacks.
    /// Subscribers hear about every section change, even when no selection
    /// had to go.
    pub fn set_resource_type(&mut self, resource_type: ResourceType) -> Option<Rc<FilterState>> {
        if resource_type == self.resource_type {
            return None;
        }
        self.resource_type = resource_type;
        let next = (*self.state).clone().retain_catalog(&self.resource_type);
        Some(self.publish(next))
    }

    /// Adopts a state decoded from elsewhere, e.g. the location bar.
    pub fn replace(&mut self, state: FilterState) -> Option<Rc<FilterState>> {
        self.commit(state)
    }

    fn commit(&mut self, next: FilterState) -> Option<Rc<FilterState>> {
        let next = next.retain_catalog(&self.resource_type);
        if next == *self.state {
            return None;
        }
        Some(self.publish(next))
    }

    fn publish(&mut self, next: FilterState) -> Rc<FilterState> {
        let next = Rc::new(next);
        self.state = next.clone();
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&next);
        }
        next
    }
}
