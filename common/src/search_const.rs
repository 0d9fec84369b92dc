//! Defaults shared by the client and the frontend.

/// Items requested per page from the REST collaborator.
pub const PAGE_SIZE: u64 = 20;

/// Quiet period after the last keystroke before a text search is issued.
pub const SEARCH_DEBOUNCE_MS: u64 = 400;

/// Quiet period before a filter change is written to the location bar.
pub const LOCATION_DEBOUNCE_MS: u64 = 250;

/// Number of first pages kept for recently visited query identities.
pub const FIRST_PAGE_CACHE_CAPACITY: usize = 16;
