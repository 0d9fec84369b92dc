use client::optimistic::MutationPhase;
use common::vote::{VoteState, VoteValue};
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::{MdThumbDown, MdThumbUp}};

use crate::data_definitions::directory_state::use_directory;


/// Up/down buttons around the score. Clicks apply at once and are undone if
/// the server rejects them.
#[component]
pub fn VoteButtons(entity_id: String, votes: VoteState) -> Element {
    let directory = use_directory();
    let _ = directory.revision.read();
    let is_pending = directory.controller().vote_phase(&entity_id) == MutationPhase::Pending;

    let up_color = if votes.user_vote == Some(VoteValue::Up) { "#3F6B2A" } else { "#9AA58E" };
    let down_color = if votes.user_vote == Some(VoteValue::Down) { "#A4382A" } else { "#9AA58E" };
    let opacity = if is_pending { 0.7 } else { 1.0 };
    let up_id = entity_id.clone();
    let down_id = entity_id;

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                gap: 2px;
                width: 40px;
                flex-shrink: 0;
                opacity: {opacity};
            ",
            button {
                style: "border: none; background: none; cursor: pointer; color: {up_color};",
                title: "Helpful",
                onclick: move |_| {
                    let entity_id = up_id.clone();
                    directory.run(move |controller| async move {
                        controller.vote(&entity_id, VoteValue::Up).await;
                    });
                },
                Icon { icon: MdThumbUp, style: "width: 20px; height: 20px;" }
            }
            span { style: "font-size: 16px; font-weight: 600;", "{votes.score}" }
            button {
                style: "border: none; background: none; cursor: pointer; color: {down_color};",
                title: "Not helpful",
                onclick: move |_| {
                    let entity_id = down_id.clone();
                    directory.run(move |controller| async move {
                        controller.vote(&entity_id, VoteValue::Down).await;
                    });
                },
                Icon { icon: MdThumbDown, style: "width: 20px; height: 20px;" }
            }
        }
    }
}
