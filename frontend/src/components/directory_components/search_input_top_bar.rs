use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdSearch, md_content_icons::MdClear}};

use crate::data_definitions::directory_state::use_directory;


#[component]
pub fn SearchInputTopBar() -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let filter = directory.controller().filter();
    let section = directory.controller().section();
    let has_text = !filter.query.is_empty();

    let search_oninput = move |event: Event<FormData>| {
        let text = event.value();
        directory.run(move |controller| async move {
            controller.set_query(text).await;
        });
    };
    // Enter skips the debounce wait
    let search_onkeydown = move |event: Event<KeyboardData>| {
        if event.key() == Key::Enter {
            directory.run(|controller| async move {
                controller.refresh().await;
            });
        }
    };
    let clear_onclick = move |_: Event<MouseData>| {
        directory.run(|controller| async move {
            controller.set_query("").await;
        });
    };

    rsx! {
        div {
            id: "x-directory-search-box",
            style: "
                display:flex;
                align-items:center;
                gap: 12px;
                background-color: white;
                border-radius: 9999px;
                padding: 8px 14px;
                height: 40px;
                border: 1px solid rgba(31, 42, 29, 0.4);
                width: 520px;
                margin-left: 16px;
            ",
            Icon { icon: MdSearch, style: "width: 20px; height: 20px; color:#5B6B4F;" }
            input {
                r#type: "search",
                placeholder: "Search {section.label()}",
                style: "
                    flex:1;
                    border: none;
                    outline: none;
                    background: transparent;
                    font-size: 18px;
                ",
                value: "{filter.query}",
                oninput: search_oninput,
                onkeydown: search_onkeydown,
            }
            if has_text {
                button {
                    style: "border: none; background: none; cursor: pointer;",
                    title: "Clear search",
                    onclick: clear_onclick,
                    Icon { icon: MdClear, style: "width: 18px; height: 18px; color:#5B6B4F;" }
                }
            }
        }
    }
}
