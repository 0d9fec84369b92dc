use client::DirectoryLocation;
use common::{facet_catalog::ResourceType, filter_state::FilterState};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdSearch;

use crate::routes::Route;


/// Home page
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Grower Directory - Home" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                width: 100%;
                height: 100%;
                padding: 36px 40px;
                background: #F4F6F1;
                box-sizing: border-box;
                overflow: auto;
            ",

            MainTitle {}
            SearchCard {}

            div {
                style: "
                    display:flex;
                    flex-direction: row;
                    gap: 20px;
                    flex-wrap: wrap;
                    align-items: stretch;
                    margin-top: 10px;
                ",
                for section in ResourceType::SECTIONS {
                    SectionCard { key: "{section}", section: section.clone() }
                }
            }
        }
    }
}

#[component]
fn MainTitle() -> Element {
    rsx! {
        div {
            style: "
                display:flex;
                align-items: center;
                gap: 8px;
                color: #1B2616;
                font-size: 46px;
                font-weight: 500;
                letter-spacing: -0.02em;
            ",
            span { "Welcome to the" }
            span { style: "color:#4E7A2F;", "Grower Directory" }
        }
        div {
            style: "
                color: #1B2616;
                font-size: 22px;
                line-height: 1.6;
                max-width: 720px;
            ",
            "Find extension resources, university programs, grants and fellow growers. Filter by crop, region and topic, and vote up what helped you."
        }
    }
}

#[component]
fn SearchCard() -> Element {
    let mut search_text = use_signal(String::new);
    rsx! {
        div {
            id: "x-card-text-search",
            style: "
                display:flex;
                flex-direction: column;
                gap: 14px;
                width: 620px;
                max-width: 100%;
                border-radius: 22px;
                padding: 22px;
                background: linear-gradient(135deg, #2F4A1E 0%, #4E7A2F 100%);
                color: white;
                box-shadow: 0 8px 24px rgba(0,0,0,0.12);
            ",
            div { style: "font-size: 26px; font-weight: 500;", "Search the resource directory" }
            div {
                style: "
                    display:flex;
                    align-items:center;
                    gap: 10px;
                    background-color: white;
                    border-radius: 9999px;
                    padding: 10px 14px;
                    height: 42px;
                    color: #111827;
                ",
                Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#6B7280;" }
                input {
                    r#type: "text",
                    placeholder: "Crop, pest, practice...",
                    style: "
                        flex:1;
                        border: none;
                        outline: none;
                        background: transparent;
                        color: #111827;
                        font-size: 14px;
                    ",
                    oninput: move |e| {
                        *search_text.write() = e.value();
                    },
                    onkeypress: move |e| {
                        if e.key() == Key::Enter {
                            e.prevent_default();
                            let filter = FilterState::new().with_query(search_text.read().trim());
                            let location = DirectoryLocation::new(ResourceType::Resources, filter);
                            navigator().push(Route::DirectoryPage { params: location.into() });
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn SectionCard(section: ResourceType) -> Element {
    let label = section.label().to_string();
    rsx! {
        Link {
            to: Route::directory_section(section),
            class: "grower-hover-shadow",
            style: "
                display:flex;
                align-items: center;
                width: 240px;
                height: 90px;
                border-radius: 16px;
                padding: 18px;
                background: white;
                color: #1B2616;
                border: 1px solid #D9E0D2;
                text-decoration: none;
                font-size: 20px;
                font-weight: 500;
                box-sizing: border-box;
            ",
            "{label}"
        }
    }
}
