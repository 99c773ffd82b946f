use std::sync::Arc;

use anyhow::{Context, Result};
use dioxus::prelude::*;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::infra::local::endpoint::LocalEndpoint;
use crate::infra::sqlite::repo::SqliteRepo;
use crate::ui::components::confirm::ConfirmModal;
use crate::ui::components::list_screen::ListScreen;
use crate::ui::components::login::LoginScreen;
use crate::ui::components::notifications::NotificationStack;
use crate::ui::components::profile::ProfileScreen;
use crate::ui::components::results::ResultsDashboard;
use crate::ui::state::app_state::{AppState, Screen, Services};
use crate::ui::state::notifications::Severity;
use crate::usecase::ports::repo::ElectionRepository;
use crate::usecase::services::auth_service::AuthService;

/// Opens the database, seeds the first admin and wires the in-process endpoint.
pub fn build_services(config: AppConfig) -> Result<Services> {
    let repo: Arc<dyn ElectionRepository> = Arc::new(SqliteRepo::new(config.db_path.clone()));
    repo.init().context("failed to initialise the database")?;

    let auth = Arc::new(AuthService::new(repo.clone()));
    if auth
        .ensure_admin(&config.admin_user, &config.admin_password)
        .context("failed to seed the admin account")?
    {
        info!(username = %config.admin_user, "change the seeded admin password after first sign-in");
    }

    Ok(Services {
        endpoint: Arc::new(LocalEndpoint::new(repo)),
        auth,
        config: Arc::new(config),
    })
}

#[component]
pub fn App() -> Element {
    let boot = use_hook(|| {
        AppConfig::load()
            .and_then(build_services)
            .map_err(|err| {
                error!("startup failed: {err:#}");
                format!("{err:#}")
            })
    });

    match boot {
        Ok(services) => rsx! { Shell { services } },
        Err(message) => rsx! {
            div { style: "font-family: sans-serif; padding: 24px;",
                h2 { "The admin console could not start" }
                p { "{message}" }
            }
        },
    }
}

#[component]
fn Shell(services: Services) -> Element {
    let state = AppState::new(services);
    let app = use_context_provider(move || state);
    let signed_in = app.session.read().is_some();

    rsx! {
        div { style: "font-family: 'Segoe UI', sans-serif; color: #222;",
            if signed_in {
                AdminLayout {}
            } else {
                LoginScreen {}
            }
            ConfirmModal {}
            NotificationStack {}
        }
    }
}

#[component]
fn AdminLayout() -> Element {
    let app = use_context::<AppState>();
    let mut screen = app.screen;
    let mut session = app.session;
    let current = screen();
    let username = session
        .read()
        .as_ref()
        .map(|session| session.username.clone())
        .unwrap_or_default();
    let signing_out = username.clone();

    rsx! {
        div { style: "display: flex; min-height: 100vh;",
            nav {
                style: "width: 200px; background: #1f2933; color: #fff; display: flex; flex-direction: column; padding: 16px 0;",
                div { style: "padding: 0 16px 16px 16px; font-weight: 600;", "School e-voting" }
                {Screen::NAV.into_iter().map(|item| {
                    let background = if item == current { "#334e68" } else { "transparent" };
                    let label = item.label();
                    rsx!(
                        div {
                            key: "{label}",
                            style: "padding: 10px 16px; cursor: pointer; background: {background};",
                            onclick: move |_| screen.set(item),
                            "{label}"
                        }
                    )
                })}
                div { style: "margin-top: auto; padding: 16px; font-size: 13px; color: #cbd2d9;",
                    div { "{username}" }
                    button {
                        style: "margin-top: 8px; border: 1px solid #cbd2d9; background: transparent; color: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            info!(username = %signing_out, "admin signed out");
                            session.set(None);
                            screen.set(Screen::Results);
                            app.notify("Signed out.", Severity::Info);
                        },
                        "Sign out"
                    }
                }
            }
            main { style: "flex: 1; padding: 16px 24px; background: #fff; overflow: auto;",
                match current {
                    Screen::Results => rsx! { ResultsDashboard {} },
                    Screen::List(kind) => rsx! { ListScreen { key: "{kind:?}", kind } },
                    Screen::Profile => rsx! { ProfileScreen {} },
                }
            }
        }
    }
}
