//! Paginated fetching for the current query identity.
//!
//! Fetching is split around the await point: [`QueryExecutor::begin`] records
//! the request and hands out a [`FetchTicket`], the caller performs the I/O
//! without holding the executor, and [`QueryExecutor::commit`] applies the
//! response only if the ticket still describes what is on screen.

use std::collections::VecDeque;

use common::{
    facet_catalog::ResourceType,
    filter_state::FilterState,
    resource::ResultPage,
    search_const::FIRST_PAGE_CACHE_CAPACITY,
};

use crate::{
    accumulator::PaginationAccumulator,
    api::PageRequest,
    error::ApiError,
    identity::QueryIdentity,
};


#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryStatus {
    #[default]
    Idle,
    /// First page in flight, nothing to show yet.
    Loading,
    /// First page in flight over cached or earlier results.
    Refreshing,
    LoadingMore,
    Ready,
    /// Last request failed; accumulated results are still shown.
    Failed(ApiError),
}

impl QueryStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::Refreshing | Self::LoadingMore)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A request issued by [`QueryExecutor::begin`] or
/// [`QueryExecutor::begin_next_page`], redeemed by [`QueryExecutor::commit`].
#[derive(Debug, Clone)]
pub struct FetchTicket {
    identity: QueryIdentity,
    sequence: u64,
    request: PageRequest,
}

impl FetchTicket {
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn identity(&self) -> &QueryIdentity {
        &self.identity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied { added: usize },
    Failed,
    /// The response belonged to an identity or list that has since been
    /// replaced; it was dropped.
    Stale,
}


#[derive(Debug)]
struct FirstPageCache {
    entries: VecDeque<(String, ResultPage)>,
    capacity: usize,
}

impl FirstPageCache {
    fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    fn get(&self, key: &str) -> Option<&ResultPage> {
        self.entries.iter().find(|(entry_key, _)| entry_key == key).map(|(_, page)| page)
    }

    fn insert(&mut self, key: String, page: ResultPage) {
        self.entries.retain(|(entry_key, _)| *entry_key != key);
        self.entries.push_back((key, page));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}


#[derive(Debug)]
pub struct QueryExecutor {
    identity: Option<QueryIdentity>,
    sequence: u64,
    first_page_sequence: u64,
    status: QueryStatus,
    results: PaginationAccumulator,
    cache: FirstPageCache,
    page_size: u64,
    failed_request: Option<PageRequest>,
}

impl QueryExecutor {
    pub fn new(page_size: u64) -> Self {
        Self {
            identity: None,
            sequence: 0,
            first_page_sequence: 0,
            status: QueryStatus::Idle,
            results: PaginationAccumulator::new(),
            cache: FirstPageCache::new(FIRST_PAGE_CACHE_CAPACITY),
            page_size,
            failed_request: None,
        }
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn results(&self) -> &PaginationAccumulator {
        &self.results
    }

    pub fn identity(&self) -> Option<&QueryIdentity> {
        self.identity.as_ref()
    }

    /// Starts a fetch for `filter` in `resource_type`.
    ///
    /// Without a cursor this (re)loads the first page, rebuilding the result
    /// set if the identity changed. With a cursor it continues the current
    /// identity, and is refused when the cursor is not the one the list
    /// expects next or a next-page fetch is already in flight.
    pub fn begin(&mut self, resource_type: &ResourceType, filter: &FilterState, cursor: Option<String>) -> Option<FetchTicket> {
        let identity = QueryIdentity::new(resource_type, filter);
        match cursor {
            Some(cursor) if self.identity.as_ref() == Some(&identity) => {
                if self.results.next_cursor() != Some(cursor.as_str()) {
                    tracing::debug!(%cursor, "ignoring request for a cursor the list is not at");
                    return None;
                }
                self.begin_next_page()
            }
            _ => Some(self.begin_first_page(identity)),
        }
    }

    /// Claims the next page of the current list, unless there is none, the
    /// first page is still loading, or another next-page fetch is in flight.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        let identity = self.identity.clone()?;
        if matches!(self.status, QueryStatus::Loading | QueryStatus::Refreshing) {
            return None;
        }
        let cursor = self.results.request_more()?;
        self.sequence += 1;
        self.status = QueryStatus::LoadingMore;
        self.failed_request = None;
        let request = PageRequest {
            resource_type: identity.resource_type.clone(),
            filter: identity.filter(),
            cursor: Some(cursor),
            page_size: self.page_size,
        };
        Some(FetchTicket { identity, sequence: self.sequence, request })
    }

    /// Re-issues the request that failed last, for the same identity.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let failed = self.failed_request.take()?;
        if failed.is_first_page() {
            let identity = QueryIdentity::new(&failed.resource_type, &failed.filter);
            Some(self.begin_first_page(identity))
        } else {
            self.begin_next_page()
        }
    }

    pub fn commit(&mut self, ticket: FetchTicket, result: Result<ResultPage, ApiError>) -> CommitOutcome {
        if self.identity.as_ref() != Some(&ticket.identity) {
            tracing::debug!(key = %ticket.identity.cache_key(), "dropping response for a replaced query");
            return CommitOutcome::Stale;
        }
        if ticket.request.is_first_page() {
            if ticket.sequence != self.first_page_sequence {
                return CommitOutcome::Stale;
            }
            match result {
                Ok(page) => {
                    self.results.reset();
                    let added = self.results.append_page(&page);
                    self.cache.insert(ticket.identity.cache_key(), page);
                    self.status = QueryStatus::Ready;
                    CommitOutcome::Applied { added }
                }
                Err(err) => self.fail(ticket.request, err),
            }
        } else {
            if ticket.sequence < self.first_page_sequence {
                return CommitOutcome::Stale;
            }
            match result {
                Ok(page) => {
                    let added = self.results.append_page(&page);
                    self.status = QueryStatus::Ready;
                    CommitOutcome::Applied { added }
                }
                Err(err) => {
                    self.results.finish_request();
                    self.fail(ticket.request, err)
                }
            }
        }
    }

    fn begin_first_page(&mut self, identity: QueryIdentity) -> FetchTicket {
        if self.identity.as_ref() != Some(&identity) {
            self.results.reset();
            if let Some(cached) = self.cache.get(&identity.cache_key()) {
                self.results.append_page(cached);
            }
            self.identity = Some(identity.clone());
        }
        // a next-page fetch still in flight now belongs to a list that is being rebuilt
        self.results.finish_request();
        self.sequence += 1;
        self.first_page_sequence = self.sequence;
        self.failed_request = None;
        self.status = if self.results.is_empty() { QueryStatus::Loading } else { QueryStatus::Refreshing };
        let request = PageRequest {
            resource_type: identity.resource_type.clone(),
            filter: identity.filter(),
            cursor: None,
            page_size: self.page_size,
        };
        FetchTicket { identity, sequence: self.sequence, request }
    }

    fn fail(&mut self, request: PageRequest, err: ApiError) -> CommitOutcome {
        tracing::warn!(section = %request.resource_type, %err, "result page request failed");
        self.failed_request = Some(request);
        self.status = QueryStatus::Failed(err);
        CommitOutcome::Failed
    }
}
