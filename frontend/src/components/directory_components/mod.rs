pub mod active_filter_chips;
pub mod announcement_banner;
pub mod facet_panel;
pub mod notice_toaster;
pub mod result_item_card;
pub mod result_list;
pub mod result_list_controls;
pub mod search_input_top_bar;
pub mod vote_buttons;
