//! Shared directory models used by the client state core and the frontend.

extern crate serde;


pub mod facet_catalog;
pub mod filter_state;
pub mod resource;
pub mod search_const;
pub mod vote;
