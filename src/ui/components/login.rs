use dioxus::prelude::*;
use tracing::error;

use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::usecase::services::auth_service::AuthError;

const INPUT: &str = "border: 1px solid #bbb; padding: 8px 10px; border-radius: 6px;";

#[component]
pub fn LoginScreen() -> Element {
    let app = use_context::<AppState>();
    let mut session = app.session;
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut failure = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let on_login = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        let auth = app.auth();
        let (user, pass) = (username(), password());
        spawn(async move {
            match run_blocking(move || auth.login(&user, &pass)).await {
                Ok(Ok(started)) => {
                    failure.set(None);
                    password.set(String::new());
                    session.set(Some(started));
                }
                Ok(Err(AuthError::InvalidCredentials)) => {
                    failure.set(Some(AuthError::InvalidCredentials.to_string()));
                }
                Ok(Err(err)) => {
                    error!(%err, "login failed");
                    failure.set(Some("Sign-in is unavailable right now.".to_string()));
                }
                Err(err) => {
                    error!(%err, "login task failed");
                    failure.set(Some("Sign-in is unavailable right now.".to_string()));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: center; min-height: 100vh; background: #f4f6f8;",
            div {
                style: "display: flex; flex-direction: column; gap: 12px; width: 320px; background: #fff; padding: 24px; border-radius: 10px; box-shadow: 0 10px 24px rgba(0,0,0,0.1);",
                h2 { style: "margin: 0;", "Admin sign in" }
                input {
                    style: INPUT,
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |event| username.set(event.value()),
                }
                input {
                    style: INPUT,
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |event| password.set(event.value()),
                }
                if let Some(message) = failure() {
                    span { style: "color: #c62828;", "{message}" }
                }
                button {
                    style: "border: 1px solid #1565c0; background: #1565c0; color: #fff; padding: 8px; border-radius: 6px; cursor: pointer;",
                    disabled: busy(),
                    onclick: on_login,
                    "Sign in"
                }
            }
        }
    }
}
