//! Client-side state core of the grower directory: filter state, location
//! synchronization, paginated fetching and optimistic votes.

pub mod accumulator;
pub mod api;
pub mod banner;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod executor;
pub mod filter_store;
pub mod http;
pub mod identity;
pub mod optimistic;
pub mod url_sync;

pub use api::{PageRequest, ResourceApi, VoteReceipt};
pub use config::ClientConfig;
pub use controller::{DirectoryController, LocationWriter, Notice};
pub use error::{ApiError, StorageError};
pub use executor::{CommitOutcome, QueryStatus};
pub use http::HttpResourceApi;
pub use url_sync::{DirectoryLocation, ViewMode};
