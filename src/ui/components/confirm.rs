use dioxus::prelude::*;

use crate::ui::state::app_state::AppState;

#[component]
pub fn ConfirmModal() -> Element {
    let app = use_context::<AppState>();
    let mut confirm = app.confirm;
    let (title, message) = {
        let dialog = confirm.read();
        match (dialog.title(), dialog.message()) {
            (Some(title), Some(message)) => (title.to_string(), message.to_string()),
            _ => return rsx! {},
        }
    };

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1400;",
            div {
                style: "background: #fff; border-radius: 10px; padding: 20px; min-width: 360px; box-shadow: 0 12px 32px rgba(0,0,0,0.25);",
                h3 { style: "margin: 0 0 8px 0;", "{title}" }
                p { style: "margin: 0 0 16px 0;", "{message}" }
                div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                    button {
                        style: "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| confirm.write().cancel(),
                        "Cancel"
                    }
                    button {
                        style: "border: 1px solid #c62828; background: #c62828; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            let action = confirm.write().take_confirmed();
                            if let Some(action) = action {
                                action();
                            }
                        },
                        "Confirm"
                    }
                }
            }
        }
    }
}
