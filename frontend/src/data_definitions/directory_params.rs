//! Query-string route parameter of the directory page.

use std::fmt::Display;

use client::DirectoryLocation;
use common::{facet_catalog::ResourceType, filter_state::FilterState};


/// Everything after the `?` of `/directory`. Parsing never fails; unknown or
/// malformed parameters fall back to their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectoryParams(pub DirectoryLocation);

impl DirectoryParams {
    pub fn for_section(section: ResourceType) -> Self {
        Self(DirectoryLocation::new(section, FilterState::default()))
    }
}

impl From<&str> for DirectoryParams {
    fn from(query: &str) -> Self {
        Self(DirectoryLocation::parse(query))
    }
}

impl From<DirectoryLocation> for DirectoryParams {
    fn from(location: DirectoryLocation) -> Self {
        Self(location)
    }
}

// Display the location in a way that can be parsed by From<&str>
impl Display for DirectoryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
