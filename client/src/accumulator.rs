//! Merges sequential result pages into one de-duplicated list.

use std::collections::HashSet;

use common::resource::{ResourceSummary, ResultPage};


/// The accumulated result set of one query identity.
///
/// Items keep fetch order. An id already present is skipped, so a page
/// boundary that shifts upstream between requests, or a page delivered
/// twice, never produces duplicates.
#[derive(Debug, Clone, Default)]
pub struct PaginationAccumulator {
    items: Vec<ResourceSummary>,
    seen: HashSet<String>,
    next_cursor: Option<String>,
    total: Option<u64>,
    is_fetching_more: bool,
}

impl PaginationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Appends the unseen items of `page` and returns how many were added.
    pub fn append_page(&mut self, page: &ResultPage) -> usize {
        let mut added = 0;
        for item in &page.items {
            if self.seen.insert(item.id.clone()) {
                self.items.push(item.clone());
                added += 1;
            }
        }
        self.next_cursor = page.next_cursor.clone();
        self.total = Some(page.total);
        self.is_fetching_more = false;
        added
    }

    /// Claims the next page. Returns its cursor, or `None` when there is no
    /// further page or a request for it is already in flight.
    pub fn request_more(&mut self) -> Option<String> {
        if self.is_fetching_more {
            return None;
        }
        let cursor = self.next_cursor.clone()?;
        self.is_fetching_more = true;
        Some(cursor)
    }

    /// Releases the claim taken by `request_more` after a failed or
    /// discarded fetch. The cursor is kept so the page can be retried.
    pub fn finish_request(&mut self) {
        self.is_fetching_more = false;
    }

    pub fn items(&self) -> &[ResourceSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn is_fetching_more(&self) -> bool {
        self.is_fetching_more
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Total reported by the most recent page.
    pub fn total(&self) -> Option<u64> {
        self.total
    }
}
