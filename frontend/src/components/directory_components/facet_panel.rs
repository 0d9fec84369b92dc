//! Checkbox lists for the facets and flags of the current section.

use common::facet_catalog::{FacetDefinition, FacetKey, FlagKey, catalog_for, flags_for};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_navigation_icons::{MdExpandLess, MdExpandMore}, md_toggle_icons::{MdCheckBox, MdCheckBoxOutlineBlank}}};

use crate::data_definitions::directory_state::use_directory;


#[component]
pub fn FacetPanel() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let section = directory.controller().section();
    let catalog = catalog_for(&section);
    let flags = flags_for(&section);

    if catalog.is_empty() {
        return rsx! {
            p { style: "color: rgba(31,42,29,0.6); padding: 12px;", "No filters for this section." }
        };
    }

    rsx! {
        div {
            id: "x-directory-facet-panel",
            style: "
                display: flex;
                flex-direction: column;
                gap: 12px;
                padding: 12px;
            ",
            for facet in catalog.facets.iter() {
                FacetGroup { key: "{facet.key.as_str()}", facet: *facet }
            }
            if !flags.is_empty() {
                div {
                    style: "border-top: 1px solid rgba(31,42,29,0.15); padding-top: 8px;",
                    for flag in flags.iter().copied() {
                        FlagToggle { key: "{flag.as_str()}", flag }
                    }
                }
            }
        }
    }
}

#[component]
fn FacetGroup(facet: ReadSignal<FacetDefinition>) -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let FacetDefinition { key, options } = facet();
    let selected_count = directory.controller().filter().selected(key).map(|values| values.len()).unwrap_or(0);
    let mut is_expanded = use_signal(|| true);

    rsx! {
        div {
            button {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    width: 100%;
                    border: none;
                    background: none;
                    cursor: pointer;
                    font-size: 16px;
                    font-weight: 600;
                    padding: 4px 0;
                ",
                onclick: move |_| *is_expanded.write() ^= true,
                span { "{key.label()}" }
                if selected_count > 0 {
                    span { style: "margin-left: 6px; color: #3F6B2A;", "({selected_count})" }
                }
                div { style: "flex: 1 1 auto;" }
                if is_expanded() {
                    Icon { icon: MdExpandLess, style: "width: 20px; height: 20px;" }
                } else {
                    Icon { icon: MdExpandMore, style: "width: 20px; height: 20px;" }
                }
            }
            if is_expanded() {
                ul {
                    for option in options.iter() {
                        li {
                            key: "{option.value}",
                            FacetCheckbox { facet_key: key, value: option.value.to_string(), label: option.label.to_string() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FacetCheckbox(facet_key: FacetKey, value: String, label: String) -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let is_checked = directory.controller().filter().is_selected(facet_key, &value);

    rsx! {
        div {
            class: "grower-facet-option",
            style: "
                display: flex;
                flex-direction: row;
                gap: 8px;
                cursor: pointer;
                padding: 3px 4px;
                align-items: center;
            ",
            onclick: move |_| {
                let value = value.clone();
                directory.run(move |controller| async move {
                    controller.toggle_facet_value(facet_key, &value).await;
                });
            },
            if is_checked {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: #3F6B2A; flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; flex-shrink: 0;" }
            }
            span { style: "font-size: 15px;", "{label}" }
        }
    }
}

#[component]
fn FlagToggle(flag: FlagKey) -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let enabled = directory.controller().filter().flag(flag);

    rsx! {
        div {
            class: "grower-facet-option",
            style: "display: flex; flex-direction: row; gap: 8px; cursor: pointer; padding: 3px 4px; align-items: center;",
            onclick: move |_| {
                directory.run(move |controller| async move {
                    controller.set_flag(flag, !enabled).await;
                });
            },
            if enabled {
                Icon { icon: MdCheckBox, style: "width: 22px; height: 22px; color: #3F6B2A; flex-shrink: 0;" }
            } else {
                Icon { icon: MdCheckBoxOutlineBlank, style: "width: 22px; height: 22px; flex-shrink: 0;" }
            }
            span { style: "font-size: 15px;", "{flag.label()}" }
        }
    }
}
