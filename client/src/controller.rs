//! The directory page's state core.
//!
//! [`DirectoryController`] owns every piece of client state behind
//! `RefCell`s and exposes async operations for user intents. Each operation
//! borrows state only between awaits, so any number of them may be in
//! flight on a single-threaded executor; stale results are discarded by the
//! identity and sequence checks of the parts it delegates to.
//!
//! Listeners registered with [`DirectoryController::subscribe`] are called
//! after every change worth re-rendering.

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    rc::Rc,
};

use common::{
    facet_catalog::{FacetKey, FlagKey, ResourceType},
    filter_state::{FilterState, SortKey},
    resource::ResourceSummary,
    vote::{VoteAction, VoteState, VoteValue},
};
use futures_util::future::join;

use crate::{
    api::ResourceApi,
    config::ClientConfig,
    debounce::{Debouncer, Timer},
    error::ApiError,
    executor::{CommitOutcome, FetchTicket, QueryExecutor, QueryStatus},
    filter_store::FilterStore,
    identity::QueryIdentity,
    optimistic::{MutationPhase, SettleOutcome, VoteApplier},
    url_sync::{DirectoryLocation, UrlSynchronizer, ViewMode},
};


/// Writes the page location; the router in the browser, a recorder in tests.
pub trait LocationWriter {
    /// Rewrites the current history entry.
    fn replace(&self, location: &DirectoryLocation);

    /// Adds a history entry.
    fn push(&self, location: &DirectoryLocation);
}

/// A message for the visitor that outlives the action that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub detail: String,
}

impl Notice {
    fn vote_failed(error: &ApiError) -> Self {
        Self {
            title: "Your vote was not saved".to_string(),
            detail: error.to_string(),
        }
    }
}

pub type ListenerId = u64;

pub struct DirectoryController<A, T, L> {
    api: A,
    timer: T,
    location: L,
    config: ClientConfig,
    store: RefCell<FilterStore>,
    executor: RefCell<QueryExecutor>,
    url: RefCell<UrlSynchronizer>,
    votes: RefCell<VoteApplier>,
    view: Cell<ViewMode>,
    search_debounce: Debouncer,
    notices: RefCell<Vec<Notice>>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn()>)>>,
    next_listener: Cell<ListenerId>,
}

impl<A, T, L> std::fmt::Debug for DirectoryController<A, T, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryController")
            .field("store", &self.store)
            .field("executor", &self.executor)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl<A: ResourceApi, T: Timer, L: LocationWriter> DirectoryController<A, T, L> {
    /// Starts from `initial`, which is taken to be what the address bar
    /// already shows. Nothing is fetched until [`Self::restore`] or
    /// [`Self::refresh`] is awaited.
    pub fn new(api: A, timer: T, location: L, config: ClientConfig, initial: DirectoryLocation) -> Self {
        let initial = normalize(initial);
        let mut url = UrlSynchronizer::new();
        url.observe(initial.clone());
        Self {
            api,
            timer,
            location,
            executor: RefCell::new(QueryExecutor::new(config.page_size)),
            config,
            store: RefCell::new(FilterStore::with_state(initial.section.clone(), initial.filter.clone())),
            url: RefCell::new(url),
            votes: RefCell::new(VoteApplier::new()),
            view: Cell::new(initial.view),
            search_debounce: Debouncer::new(),
            notices: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(listener_id, _)| *listener_id != id);
    }

    // ---- snapshots for rendering ----

    pub fn filter(&self) -> Rc<FilterState> {
        self.store.borrow().state()
    }

    pub fn section(&self) -> ResourceType {
        self.store.borrow().resource_type().clone()
    }

    pub fn view(&self) -> ViewMode {
        self.view.get()
    }

    pub fn status(&self) -> QueryStatus {
        self.executor.borrow().status().clone()
    }

    /// Accumulated results, with the displayed vote state of each item.
    pub fn items(&self) -> Vec<ResourceSummary> {
        let votes = self.votes.borrow();
        self.executor
            .borrow()
            .results()
            .items()
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if let Some(state) = votes.state(&item.id) {
                    item.votes = Some(state);
                }
                item
            })
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.executor.borrow().results().has_more()
    }

    pub fn is_fetching_more(&self) -> bool {
        self.executor.borrow().results().is_fetching_more()
    }

    pub fn total(&self) -> Option<u64> {
        self.executor.borrow().results().total()
    }

    pub fn current_location(&self) -> DirectoryLocation {
        let store = self.store.borrow();
        DirectoryLocation::new(store.resource_type().clone(), (*store.state()).clone()).with_view(self.view.get())
    }

    pub fn vote_state(&self, entity_id: &str) -> Option<VoteState> {
        self.votes.borrow().state(entity_id)
    }

    pub fn vote_phase(&self, entity_id: &str) -> MutationPhase {
        self.votes.borrow().phase(entity_id)
    }

    /// Drains the notices queued since the last call.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    // ---- fetching ----

    /// Fetches the first page of the current filter, or the page at
    /// `cursor` of the current list. `None` if the request was refused.
    pub async fn execute(&self, cursor: Option<String>) -> Option<CommitOutcome> {
        let ticket = {
            let store = self.store.borrow();
            self.executor.borrow_mut().begin(store.resource_type(), &store.state(), cursor)?
        };
        self.notify();
        Some(self.run(ticket).await)
    }

    pub async fn refresh(&self) -> Option<CommitOutcome> {
        self.execute(None).await
    }

    /// Requests the next page; a no-op while one is already in flight.
    pub async fn load_more(&self) -> Option<CommitOutcome> {
        let ticket = self.executor.borrow_mut().begin_next_page()?;
        self.notify();
        Some(self.run(ticket).await)
    }

    /// Re-issues the request that failed last.
    pub async fn retry(&self) -> Option<CommitOutcome> {
        let ticket = self.executor.borrow_mut().retry()?;
        self.notify();
        Some(self.run(ticket).await)
    }

    async fn run(&self, ticket: FetchTicket) -> CommitOutcome {
        let first_page = ticket.request().is_first_page();
        let result = self.api.fetch_page(ticket.request()).await;
        let outcome = self.executor.borrow_mut().commit(ticket, result);
        match outcome {
            CommitOutcome::Applied { added } => {
                self.track_votes(first_page, added);
                self.notify();
            }
            CommitOutcome::Failed => self.notify(),
            CommitOutcome::Stale => {}
        }
        outcome
    }

    /// A fresh first page is the server's word on every listed entity and
    /// the only entities worth remembering. A later page only introduces the
    /// `added` entities at the tail; older items keep whatever state their
    /// votes settled to.
    fn track_votes(&self, first_page: bool, added: usize) {
        let executor = self.executor.borrow();
        let items = executor.results().items();
        let mut votes = self.votes.borrow_mut();
        if first_page {
            let listed: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();
            votes.retain(|entity_id| listed.contains(entity_id));
            for item in items {
                if let Some(state) = item.votes {
                    votes.track(&item.id, state);
                }
            }
        } else {
            for item in &items[items.len().saturating_sub(added)..] {
                if let Some(state) = item.votes {
                    votes.seed(&item.id, state);
                }
            }
        }
    }

    // ---- filter intents ----

    /// Updates the search text. The fetch and the location write wait until
    /// the text has been left alone for the search debounce interval.
    pub async fn set_query(&self, text: impl Into<String>) -> Option<CommitOutcome> {
        self.store.borrow_mut().set_query(text)?;
        self.notify();
        if !self.search_debounce.settle(&self.timer, self.config.search_debounce()).await {
            return None;
        }
        self.write_location();
        if !self.identity_changed() {
            return None;
        }
        self.execute(None).await
    }

    pub async fn set_facet(&self, key: FacetKey, values: Vec<String>) -> Option<CommitOutcome> {
        let changed = self.store.borrow_mut().set_facet(key, values);
        self.filter_changed(changed).await
    }

    pub async fn toggle_facet_value(&self, key: FacetKey, value: &str) -> Option<CommitOutcome> {
        let changed = self.store.borrow_mut().toggle_facet_value(key, value);
        self.filter_changed(changed).await
    }

    pub async fn clear_facet(&self, key: FacetKey) -> Option<CommitOutcome> {
        let changed = self.store.borrow_mut().clear_facet(key);
        self.filter_changed(changed).await
    }

    pub async fn set_flag(&self, flag: FlagKey, enabled: bool) -> Option<CommitOutcome> {
        let changed = self.store.borrow_mut().set_flag(flag, enabled);
        self.filter_changed(changed).await
    }

    pub async fn set_sort(&self, sort: SortKey) -> Option<CommitOutcome> {
        let changed = self.store.borrow_mut().set_sort(sort);
        self.filter_changed(changed).await
    }

    pub async fn clear_all(&self) -> Option<CommitOutcome> {
        let changed = self.store.borrow_mut().clear_all();
        self.filter_changed(changed).await
    }

    /// Facet, flag and sort changes fetch at once; the location follows
    /// after the location debounce interval.
    async fn filter_changed(&self, changed: Option<Rc<FilterState>>) -> Option<CommitOutcome> {
        changed?;
        // the immediate fetch below already carries any pending search text
        self.search_debounce.cancel();
        self.notify();
        let (outcome, ()) = join(self.execute(None), self.stage_location()).await;
        outcome
    }

    // ---- navigation ----

    /// Moves to another section as a new history entry.
    pub async fn switch_section(&self, section: ResourceType) -> Option<CommitOutcome> {
        if *self.store.borrow().resource_type() == section {
            return None;
        }
        self.store.borrow_mut().set_resource_type(section);
        self.search_debounce.cancel();
        let pushed = self.url.borrow_mut().navigate(self.current_location());
        if let Some(location) = pushed {
            self.location.push(&location);
        }
        self.notify();
        self.execute(None).await
    }

    pub async fn set_view(&self, view: ViewMode) {
        if self.view.replace(view) == view {
            return;
        }
        self.notify();
        self.stage_location().await;
    }

    /// Adopts a location reported by the router: the initial load, or a
    /// back/forward step. Locations this controller wrote itself are
    /// recognised and ignored.
    pub async fn restore(&self, location: DirectoryLocation) -> Option<CommitOutcome> {
        let location = normalize(location);
        let has_results = self.executor.borrow().identity().is_some();
        if has_results && self.url.borrow().current() == Some(&location) {
            return None;
        }
        tracing::debug!(%location, "restoring directory location");
        self.url.borrow_mut().observe(location.clone());
        self.search_debounce.cancel();
        self.view.set(location.view);
        {
            let mut store = self.store.borrow_mut();
            store.set_resource_type(location.section);
            store.replace(location.filter);
        }
        self.notify();
        if has_results && !self.identity_changed() {
            return None;
        }
        self.execute(None).await
    }

    async fn stage_location(&self) {
        let ticket = self.url.borrow_mut().stage(self.current_location());
        self.timer.sleep(self.config.location_debounce()).await;
        let settled = self.url.borrow_mut().settle(ticket);
        if let Some(location) = settled {
            self.location.replace(&location);
        }
    }

    fn write_location(&self) {
        let settled = {
            let mut url = self.url.borrow_mut();
            let ticket = url.stage(self.current_location());
            url.settle(ticket)
        };
        if let Some(location) = settled {
            self.location.replace(&location);
        }
    }

    fn identity_changed(&self) -> bool {
        let store = self.store.borrow();
        let identity = QueryIdentity::new(store.resource_type(), &store.state());
        self.executor.borrow().identity() != Some(&identity)
    }

    // ---- votes ----

    /// Applies a vote click optimistically and settles it with the server.
    /// `None` if the entity is not in the current results or carries no
    /// vote state.
    pub async fn vote(&self, entity_id: &str, value: VoteValue) -> Option<SettleOutcome> {
        let snapshot = self
            .executor
            .borrow()
            .results()
            .items()
            .iter()
            .find(|item| item.id == entity_id)
            .and_then(|item| item.votes)?;
        let ticket = {
            let mut votes = self.votes.borrow_mut();
            votes.seed(entity_id, snapshot);
            votes.apply(entity_id, value)?
        };
        self.notify();
        let result = match ticket.action {
            VoteAction::Cast(value) => self.api.cast_vote(&ticket.entity_id, value).await,
            VoteAction::Clear => self.api.clear_vote(&ticket.entity_id).await,
        };
        let outcome = self.votes.borrow_mut().settle(ticket, result);
        match &outcome {
            SettleOutcome::RolledBack { error, .. } => {
                self.notices.borrow_mut().push(Notice::vote_failed(error));
                self.notify();
            }
            SettleOutcome::Committed(_) => self.notify(),
            SettleOutcome::Superseded => {}
        }
        Some(outcome)
    }

    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self.listeners.borrow().iter().map(|(_, listener)| listener.clone()).collect();
        for listener in listeners {
            listener();
        }
    }
}

fn normalize(location: DirectoryLocation) -> DirectoryLocation {
    let view = location.view;
    DirectoryLocation::new(location.section, location.filter).with_view(view)
}
