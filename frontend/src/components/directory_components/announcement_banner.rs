use client::banner::DismissedBanners;
use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdClose};

use crate::data_definitions::directory_state::BrowserStorage;


/// A notice the visitor can close for good. Dismissal is remembered in
/// `localStorage` per `banner_id`.
#[component]
pub fn AnnouncementBanner(banner_id: String, title: String, children: Element) -> Element {
    let mut dismissed = use_signal(|| DismissedBanners::load(&BrowserStorage));
    if dismissed.read().is_dismissed(&banner_id) {
        return rsx! {};
    }
    let element_id = format!("x-announcement-{banner_id}");

    rsx! {
        div {
            id: "{element_id}",
            style: "
                display: flex;
                flex-direction: row;
                align-items: flex-start;
                gap: 12px;
                background: #FFF6D6;
                border-bottom: 1px solid #E6D38A;
                padding: 10px 16px;
            ",
            div {
                style: "flex: 1; font-size: 15px; line-height: 1.4;",
                strong { "{title} " }
                {children}
            }
            button {
                style: "border: none; background: none; cursor: pointer;",
                title: "Dismiss",
                onclick: move |_| {
                    if let Err(err) = dismissed.write().dismiss(&banner_id, &BrowserStorage) {
                        tracing::error!("Failed to remember dismissed banner {banner_id}: {err}");
                    }
                },
                Icon { icon: MdClose, style: "width: 18px; height: 18px;" }
            }
        }
    }
}
