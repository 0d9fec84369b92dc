use dioxus::prelude::*;
use dioxus_primitives::toast::{ToastOptions, consume_toast};

use crate::data_definitions::directory_state::use_directory;


/// Turns notices queued by the controller (e.g. a rolled-back vote) into toasts.
#[component]
pub fn NoticeToaster() -> Element {
    let directory = use_directory();
    use_effect(move || {
        let _ = directory.revision.read();
        let notices = directory.controller().take_notices();
        if notices.is_empty() {
            return;
        }
        let toast_api = consume_toast();
        for notice in notices {
            toast_api.error(
                notice.title,
                ToastOptions::new()
                    .description(notice.detail)
                    .duration(std::time::Duration::from_secs(10))
                    .permanent(false),
            );
        }
    });
    rsx! {}
}
