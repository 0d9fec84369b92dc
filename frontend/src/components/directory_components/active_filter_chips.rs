use common::facet_catalog::{FacetKey, FlagKey, catalog_for};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use crate::data_definitions::directory_state::use_directory;


/// One removable chip per selected facet value and enabled flag, plus a
/// "Clear all" button.
#[component]
pub fn ActiveFilterChips() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let filter = directory.controller().filter();
    let catalog = catalog_for(&directory.controller().section());

    if filter.is_unfiltered() {
        return rsx! {};
    }

    let facet_chips: Vec<(String, FacetKey, String, String)> = filter
        .facets
        .iter()
        .flat_map(|(key, values)| {
            values.iter().map(move |value| {
                let label = catalog.label_for(*key, value).unwrap_or(value.as_str());
                let chip_key = format!("{}-{value}", key.as_str());
                (chip_key, *key, value.clone(), format!("{}: {label}", key.label()))
            })
        })
        .collect();
    let flag_chips: Vec<FlagKey> = filter.flags.iter().filter(|(_, enabled)| **enabled).map(|(flag, _)| *flag).collect();

    rsx! {
        div {
            id: "x-directory-active-filters",
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                align-items: center;
                gap: 8px;
                padding: 8px 16px;
            ",
            for (chip_key, key, value, label) in facet_chips {
                FilterChip {
                    key: "{chip_key}",
                    label,
                    onremove: move |_| {
                        let value = value.clone();
                        directory.run(move |controller| async move {
                            controller.toggle_facet_value(key, &value).await;
                        });
                    },
                }
            }
            for flag in flag_chips {
                FilterChip {
                    key: "{flag.as_str()}",
                    label: flag.label().to_string(),
                    onremove: move |_| {
                        directory.run(move |controller| async move {
                            controller.set_flag(flag, false).await;
                        });
                    },
                }
            }
            if !filter.query.is_empty() {
                FilterChip {
                    label: format!("Text: {}", filter.query),
                    onremove: move |_| {
                        directory.run(|controller| async move {
                            controller.set_query("").await;
                        });
                    },
                }
            }
            button {
                style: "
                    border: none;
                    background: none;
                    color: #3F6B2A;
                    cursor: pointer;
                    font-size: 14px;
                    text-decoration: underline;
                ",
                onclick: move |_| {
                    directory.run(|controller| async move {
                        controller.clear_all().await;
                    });
                },
                "Clear all"
            }
        }
    }
}

#[component]
fn FilterChip(label: String, onremove: EventHandler<()>) -> Element {
    rsx! {
        span {
            style: "
                display: flex;
                align-items: center;
                gap: 4px;
                border: 1px solid #3F6B2A;
                border-radius: 1000px;
                background: white;
                padding: 2px 4px 2px 10px;
                font-size: 14px;
            ",
            "{label}"
            button {
                style: "border: none; background: none; cursor: pointer; display: flex;",
                title: "Remove filter",
                onclick: move |_| onremove.call(()),
                Icon { icon: MdClose, style: "width: 16px; height: 16px;" }
            }
        }
    }
}
