//! Top navigation bar with one tab per directory section.

use common::facet_catalog::ResourceType;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdHome};

use crate::components::error_boundary::GlobalErrorBoundary;
use crate::routes::Route;

/// Shared navbar component.
#[component]
pub fn Navbar() -> Element {
    let route = use_route::<Route>();
    let active_section = match route {
        Route::DirectoryPage { params } => Some(params.0.section),
        Route::HomePage {} => None,
    };

    rsx! {
        div {
            id: "x-nav-container",
            style: "
                display:flex;
                flex-direction: column;
                width: 100%;
                height: 100%;
            ",

            nav {
                id: "x-nav-topbar",
                style: "
                    display:flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 6px;
                    height: 52px;
                    padding: 0 16px;
                    background-color: #27361F;
                    flex-shrink: 0;
                ",
                Link {
                    to: Route::HomePage {},
                    style: "color: white; display: flex; align-items: center; gap: 8px; text-decoration: none; margin-right: 24px;",
                    Icon { icon: MdHome, style: "width: 24px; height: 24px;" }
                    span { style: "font-size: 18px; font-weight: 600;", "Grower Directory" }
                }
                for section in ResourceType::SECTIONS {
                    SectionTab {
                        key: "{section}",
                        is_active: active_section.as_ref() == Some(&section),
                        section: section.clone(),
                    }
                }
            }

            div {
                id: "x-page-container",
                style: "flex-grow:1; min-height: 0;",
                GlobalErrorBoundary {
                    boundary_name: "Navbar".to_string(),
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn SectionTab(section: ResourceType, is_active: bool) -> Element {
    let underline = if is_active { "#E7C64B" } else { "transparent" };
    rsx! {
        Link {
            to: Route::directory_section(section.clone()),
            style: "
                color: white;
                text-decoration: none;
                font-size: 15px;
                padding: 14px 10px 12px 10px;
                border-bottom: 3px solid {underline};
            ",
            "{section.label()}"
        }
    }
}
