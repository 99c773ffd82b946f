use dioxus::prelude::*;
use tracing::error;

use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::ui::state::notifications::Severity;
use crate::usecase::services::auth_service::{AuthError, PasswordChangeForm};

const FIELD: &str = "display: flex; flex-direction: column; gap: 4px; max-width: 320px;";
const INPUT: &str = "border: 1px solid #bbb; padding: 6px 8px; border-radius: 6px;";
const HINT: &str = "color: #c62828; font-size: 12px;";

#[component]
pub fn ProfileScreen() -> Element {
    let app = use_context::<AppState>();
    let mut current = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut field_error = use_signal(|| None::<(&'static str, String)>);

    let Some(session) = app.session.read().clone() else {
        return rsx! {};
    };

    let hint = move |field: &str| {
        field_error
            .read()
            .as_ref()
            .filter(|(name, _)| *name == field)
            .map(|(_, message)| message.clone())
    };

    let account = session.clone();
    let on_submit = move |_| {
        let auth = app.auth();
        let session = account.clone();
        let form = PasswordChangeForm {
            current_password: current(),
            new_password: new_password(),
            confirm_password: confirm_password(),
        };
        spawn(async move {
            match run_blocking(move || auth.change_password(&session, &form)).await {
                Ok(Ok(())) => {
                    field_error.set(None);
                    current.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    app.notify("Password changed.", Severity::Success);
                }
                Ok(Err(AuthError::Field(err))) => field_error.set(Some((err.field, err.message))),
                Ok(Err(err)) => {
                    error!(%err, "password change failed");
                    app.notify("Could not change the password.", Severity::Error);
                }
                Err(err) => {
                    error!(%err, "password change task failed");
                    app.notify("Could not change the password.", Severity::Error);
                }
            }
        });
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 12px;",
            h2 { style: "margin: 0;", "Profile" }
            p { style: "margin: 0; color: #555;",
                "Signed in as {session.username} since {session.started_at}"
            }
            h3 { style: "margin: 8px 0 0 0;", "Change password" }
            label { style: FIELD, "Current password"
                input { style: INPUT, r#type: "password", value: "{current}", oninput: move |event| current.set(event.value()) }
                if let Some(message) = hint("current_password") {
                    span { style: HINT, "{message}" }
                }
            }
            label { style: FIELD, "New password"
                input { style: INPUT, r#type: "password", value: "{new_password}", oninput: move |event| new_password.set(event.value()) }
                if let Some(message) = hint("new_password") {
                    span { style: HINT, "{message}" }
                }
            }
            label { style: FIELD, "Confirm new password"
                input { style: INPUT, r#type: "password", value: "{confirm_password}", oninput: move |event| confirm_password.set(event.value()) }
                if let Some(message) = hint("confirm_password") {
                    span { style: HINT, "{message}" }
                }
            }
            button {
                style: "align-self: flex-start; border: 1px solid #1565c0; background: #1565c0; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                onclick: on_submit,
                "Update password"
            }
        }
    }
}
