use client::DirectoryLocation;
use dioxus::prelude::*;

use crate::{
    components::{
        directory_components::{
            active_filter_chips::ActiveFilterChips, announcement_banner::AnnouncementBanner,
            facet_panel::FacetPanel, notice_toaster::NoticeToaster, result_list::ResultList,
            result_list_controls::ResultListControls, search_input_top_bar::SearchInputTopBar,
        },
        error_boundary::PanelErrorBoundary,
    },
    data_definitions::{directory_params::DirectoryParams, directory_state::use_directory_provider},
};


/// Directory page: one section, its filters and its results.
#[component]
pub fn DirectoryPage(params: DirectoryParams) -> Element {
    let title = params.0.section.label().to_string();
    rsx! {
        Title { "Grower Directory: {title}" }
        DirectoryPageRootComponent { location: params.0.clone() }
    }
}

#[component]
fn DirectoryPageRootComponent(location: ReadSignal<DirectoryLocation>) -> Element {
    use_directory_provider(location);

    rsx! {
        NoticeToaster {}
        div {
            id: "x-directory-page-root-component",
            style: r#"
                height: 100%;
                width: 100%;
                display: flex;
                flex-direction: column;
            "#,
            AnnouncementBanner {
                banner_id: "directory-beta".to_string(),
                title: "New directory.".to_string(),
                "Filters, sorting and votes are now kept in the page address, so any view can be bookmarked or shared."
            }
            div {
                id: "x-directory-search-top-bar",
                style: "
                    border-bottom: 1px solid rgb(164, 164, 164);
                    background-color: #F7FAF3;
                    flex-shrink: 0;
                    display: flex;
                    flex-direction: column;
                    gap: 6px;
                    padding: 12px 20px;
                    width: 100%;
                    box-sizing: border-box;
                ",
                SearchInputTopBar {}
                ActiveFilterChips {}
            }

            div {
                id: "x-directory-bottom-space",
                style: r#"
                    width: 100%;
                    display: flex;
                    flex-direction: row;
                    flex-grow: 1;
                    min-height: 0;
                "#,
                div {
                    id: "x-directory-left-panel",
                    style: "
                        height: 100%;
                        width: 280px;
                        flex-shrink: 0;
                        background-color: #EEF1EA;
                        border-right: 1px solid rgb(164, 164, 164);
                        overflow-y: auto;
                    ",
                    PanelErrorBoundary {
                        panel: "filters".to_string(),
                        FacetPanel {}
                    }
                }
                div {
                    id: "x-directory-results-panel",
                    style: "
                        height: 100%;
                        flex-grow: 1;
                        min-width: 0;
                        display: flex;
                        flex-direction: column;
                        overflow-y: auto;
                        padding: 0 20px;
                        box-sizing: border-box;
                    ",
                    ResultListControls {}
                    PanelErrorBoundary {
                        panel: "results".to_string(),
                        ResultList {}
                    }
                }
            }
        }
    }
}
