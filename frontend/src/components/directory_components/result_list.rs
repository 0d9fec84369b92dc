//! Accumulated results with load-more and retry.

use client::{QueryStatus, ViewMode};
use dioxus::prelude::*;

use crate::{
    components::{directory_components::result_item_card::ResultItemCard, error_boundary::ErrorNotice},
    data_definitions::directory_state::{DirectoryContext, use_directory},
};


#[component]
pub fn ResultList() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let controller = directory.controller();
    let status = controller.status();
    let items = controller.items();

    if items.is_empty() {
        return match status {
            QueryStatus::Idle | QueryStatus::Loading | QueryStatus::Refreshing => rsx! { LoadingIndicator {} },
            QueryStatus::Failed(err) => rsx! {
                ErrorNotice {
                    title: "Could not load results".to_string(),
                    detail: err.to_string(),
                    onretry: move |_| retry(directory),
                }
            },
            QueryStatus::LoadingMore | QueryStatus::Ready => rsx! {
                p { style: "padding: 24px; font-size: 18px; color: #4B5A3F;", "Nothing matches these filters." }
            },
        };
    }

    let list_style = match controller.view() {
        ViewMode::Grid => "display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 8px;",
        ViewMode::List | ViewMode::Map => "display: flex; flex-direction: column;",
    };
    let opacity = if status == QueryStatus::Refreshing { 0.6 } else { 1.0 };

    rsx! {
        div {
            id: "x-directory-results-wrapper",
            style: "
                width: 100%;
                height: 100%;
                overflow-y: auto;
                opacity: {opacity};
            ",
            ul {
                style: "{list_style}",
                for item in items {
                    li {
                        key: "{item.id}",
                        ResultItemCard { item: item.clone() }
                    }
                }
            }
            ResultListFooter {}
        }
    }
}

#[component]
fn ResultListFooter() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let controller = directory.controller();
    let status = controller.status();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; gap: 8px; padding: 16px;",
            if let QueryStatus::Failed(err) = &status {
                ErrorNotice {
                    title: "Could not load more results".to_string(),
                    detail: err.to_string(),
                    onretry: move |_| retry(directory),
                }
            } else if controller.is_fetching_more() {
                LoadingIndicator {}
            } else if controller.has_more() {
                button {
                    class: "grower-hover-shadow",
                    style: "
                        font-size: 16px;
                        padding: 8px 24px;
                        border-radius: 8px;
                        border: 1px solid #3F6B2A;
                        background: white;
                        color: #3F6B2A;
                        cursor: pointer;
                    ",
                    onclick: move |_| {
                        directory.run(|controller| async move {
                            controller.load_more().await;
                        });
                    },
                    "Load more"
                }
            }
        }
    }
}

fn retry(directory: DirectoryContext) {
    directory.run(|controller| async move {
        controller.retry().await;
    });
}

#[component]
fn LoadingIndicator() -> Element {
    rsx! {
        div {
            style: "color: #4B5A3F; font-size: 20px; padding: 10px; margin: 15px; text-align: center;",
            "Loading..."
        }
    }
}
