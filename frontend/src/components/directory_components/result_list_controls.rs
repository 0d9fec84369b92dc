//! Result count, sort order and view mode.

use client::{QueryStatus, ViewMode};
use common::filter_state::SortKey;
use dioxus::prelude::*;

use crate::data_definitions::directory_state::use_directory;


#[component]
pub fn ResultListControls() -> Element {
    rsx! {
        div {
            id: "x-directory-list-controls",
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                padding: 7px;
                height: 48px;
            ",
            h1 {
                style: "font-size: 18px; font-weight: 400; color: #4B5A3F; margin: 0;",
                ResultCountString {}
            }
            div { style: "flex-grow: 1;" }
            SortSelect {}
            ViewModeButtons {}
        }
    }
}

#[component]
fn ResultCountString() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let controller = directory.controller();
    let shown = controller.items().len();

    let text = match (controller.status(), controller.total()) {
        (QueryStatus::Loading, _) => "Searching...".to_string(),
        (_, Some(1)) => "1 result".to_string(),
        (_, Some(total)) if total as usize > shown => format!("Showing {shown} of {total} results"),
        (_, Some(total)) => format!("{total} results"),
        (_, None) => String::new(),
    };
    rsx! { "{text}" }
}

#[component]
fn SortSelect() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let current = directory.controller().filter().sort;

    rsx! {
        label {
            style: "font-size: 15px; display: flex; gap: 6px; align-items: center;",
            "Sort by"
            select {
                style: "font-size: 15px; padding: 4px;",
                onchange: move |event: Event<FormData>| {
                    let sort = SortKey::parse(&event.value()).unwrap_or_default();
                    directory.run(move |controller| async move {
                        controller.set_sort(sort).await;
                    });
                },
                for sort in SortKey::ALL {
                    option {
                        key: "{sort.as_str()}",
                        value: sort.as_str(),
                        selected: sort == current,
                        "{sort.label()}"
                    }
                }
            }
        }
    }
}

#[component]
fn ViewModeButtons() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let current = directory.controller().view();

    rsx! {
        div {
            style: "display: flex; flex-direction: row; border: 1px solid #3F6B2A; border-radius: 6px; overflow: hidden;",
            for view in ViewMode::ALL {
                button {
                    key: "{view.as_str()}",
                    style: if view == current {
                        "border: none; padding: 4px 10px; cursor: pointer; background: #3F6B2A; color: white;"
                    } else {
                        "border: none; padding: 4px 10px; cursor: pointer; background: white; color: #3F6B2A;"
                    },
                    onclick: move |_| {
                        directory.run(move |controller| async move {
                            controller.set_view(view).await;
                        });
                    },
                    "{view_label(view)}"
                }
            }
        }
    }
}

fn view_label(view: ViewMode) -> &'static str {
    match view {
        ViewMode::List => "List",
        ViewMode::Grid => "Grid",
        ViewMode::Map => "Map",
    }
}
