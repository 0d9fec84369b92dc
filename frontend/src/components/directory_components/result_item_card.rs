use common::resource::ResourceSummary;
use dioxus::prelude::*;

use crate::components::directory_components::vote_buttons::VoteButtons;


/// Fields of `data` shown under the summary, in display order.
const DETAIL_FIELDS: [(&str, &str); 6] = [
    ("organization", "Organization"),
    ("city", "City"),
    ("state", "State"),
    ("deadline", "Deadline"),
    ("amount", "Amount"),
    ("author", "Posted by"),
];

#[component]
pub fn ResultItemCard(item: ReadSignal<ResourceSummary>) -> Element {
    let item = item();
    let details: Vec<(&str, String)> = DETAIL_FIELDS
        .iter()
        .filter_map(|(field, label)| item.data_str(field).map(|value| (*label, value.to_string())))
        .collect();
    let url = item.data_str("url").map(str::to_string);

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                gap: 12px;
                background: white;
                border: 1px solid rgba(31,42,29,0.15);
                border-radius: 8px;
                padding: 12px 16px;
                margin: 6px 8px;
                box-sizing: border-box;
            ",
            if let Some(votes) = item.votes {
                VoteButtons { entity_id: item.id.clone(), votes }
            }
            div {
                style: "display: flex; flex-direction: column; gap: 6px; min-width: 0; flex: 1;",
                div {
                    style: "display: flex; flex-direction: row; align-items: baseline; gap: 10px;",
                    if let Some(url) = url {
                        a {
                            href: "{url}",
                            target: "_blank",
                            style: "font-size: 19px; font-weight: 600; color: #1F4E8C;",
                            "{item.title}"
                        }
                    } else {
                        span { style: "font-size: 19px; font-weight: 600;", "{item.title}" }
                    }
                    if !item.kind.is_empty() {
                        span {
                            style: "font-size: 12px; text-transform: uppercase; color: #5B6B4F; border: 1px solid #C9D3BC; border-radius: 4px; padding: 0 4px;",
                            "{item.kind}"
                        }
                    }
                }
                if !item.summary.is_empty() {
                    p {
                        style: "margin: 0; font-size: 15px; line-height: 1.45; color: #33402B; overflow: hidden; text-overflow: ellipsis; display: -webkit-box; -webkit-line-clamp: 3; -webkit-box-orient: vertical;",
                        "{item.summary}"
                    }
                }
                if !details.is_empty() {
                    div {
                        style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 14px; font-size: 13px; color: #5B6B4F;",
                        for (label, value) in details {
                            span { key: "{label}", "{label}: {value}" }
                        }
                    }
                }
            }
        }
    }
}
