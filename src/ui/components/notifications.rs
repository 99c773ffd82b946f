use dioxus::prelude::*;

use crate::ui::state::app_state::AppState;

#[component]
pub fn NotificationStack() -> Element {
    let app = use_context::<AppState>();
    let mut notifications = app.notifications;
    let items = notifications.read().items().to_vec();

    rsx! {
        div {
            style: "position: fixed; right: 16px; top: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 1500; width: 320px;",
            {items.into_iter().map(|notice| {
                let id = notice.id;
                let accent = notice.severity.accent();
                let message = notice.message;
                rsx!(
                    div {
                        key: "{id}",
                        style: "display: flex; gap: 8px; align-items: flex-start; background: #fff; border-left: 4px solid {accent}; border-radius: 6px; box-shadow: 0 6px 16px rgba(0,0,0,0.15); padding: 10px 12px;",
                        span { style: "flex: 1;", "{message}" }
                        button {
                            style: "border: none; background: transparent; cursor: pointer; color: #777;",
                            onclick: move |_| {
                                notifications.write().dismiss(id);
                            },
                            "×"
                        }
                    }
                )
            })}
        }
    }
}
