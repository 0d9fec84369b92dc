//! Error boundaries and the error notice shared with failed fetches.

use dioxus::{logger::tracing, prelude::*};
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdRefresh};

use crate::data_definitions::directory_state::DirectoryContext;


/// Last line of defence around the whole app. The router may be the thing
/// that failed, so the way back is a plain link.
#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                tracing::error!("render failure below {boundary_name}: {err:?}");
                rsx! {
                    div {
                        style: "display: flex; flex-direction: column; gap: 16px; padding: 40px; max-width: 720px;",
                        h1 { style: "color: #7A2418; font-size: 32px; margin: 0;", "The directory stopped working" }
                        p {
                            style: "font-size: 18px; color: #33402B; margin: 0;",
                            "Reloading usually helps. Your filters are kept in the page address."
                        }
                        a {
                            href: "/",
                            style: "color: #1F4E8C; font-size: 18px;",
                            "Back to the start page"
                        }
                    }
                }
            },
            children
        }
    }
}

/// Keeps one failing panel from taking the page down. Trying again clears
/// the error and, on a directory page, reloads the current results.
#[component]
pub fn PanelErrorBoundary(panel: String, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                let detail = match err.error() {
                    Some(error) => format!("{:#?}", error.0),
                    None => "Unknown error".to_string(),
                };
                tracing::warn!("{panel} failed to render: {detail}");
                let directory = try_consume_context::<DirectoryContext>();
                rsx! {
                    ErrorNotice {
                        title: format!("Could not show the {panel}"),
                        detail,
                        onretry: move |_| {
                            err.clear_errors();
                            if let Some(directory) = directory {
                                directory.run(|controller| async move {
                                    controller.refresh().await;
                                });
                            }
                        },
                    }
                }
            },
            div {
                width: "100%",
                {children}
            }
        }
    }
}

/// A failure with a "Try again" button, for render errors and failed
/// requests alike.
#[component]
pub fn ErrorNotice(title: String, detail: String, onretry: EventHandler<()>) -> Element {
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                gap: 8px;
                padding: 24px 0;
                width: 100%;
            ",
            h2 { style: "color: #7A2418; font-size: 20px; margin: 0;", "{title}" }
            pre {
                style: "color: #7A2418; border: 1px solid #E2B4AC; padding: 10px; border-radius: 5px; margin: 0; text-wrap: auto; max-width: 500px; max-height: 200px; overflow-y: auto;",
                "{detail}"
            }
            button {
                style: "
                    display: flex;
                    align-items: center;
                    gap: 6px;
                    color: #1F4E8C;
                    font-size: 16px;
                    border: 1px solid #1F4E8C;
                    padding: 6px 12px;
                    border-radius: 5px;
                    background: white;
                    cursor: pointer;
                ",
                onclick: move |_| onretry.call(()),
                Icon { icon: MdRefresh, style: "width: 18px; height: 18px;" }
                "Try again"
            }
        }
    }
}
