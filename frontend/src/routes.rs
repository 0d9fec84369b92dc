use common::facet_catalog::ResourceType;
use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::directory_params::DirectoryParams;
use crate::pages::directory_page::DirectoryPage;
use crate::pages::home_page::HomePage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/directory?:..params")]
    DirectoryPage { params: DirectoryParams },

}

impl Route {
    pub fn directory_section(section: ResourceType) -> Self {
        Self::DirectoryPage {
            params: DirectoryParams::for_section(section),
        }
    }
}
