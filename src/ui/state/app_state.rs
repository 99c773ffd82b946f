use std::sync::Arc;
use std::time::Instant;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::entities::admin::AdminSession;
use crate::domain::entities::kind::EntityKind;
use crate::ui::state::confirm::ConfirmDialog;
use crate::ui::state::notifications::{Notifications, Severity, NOTICE_TTL};
use crate::usecase::ports::endpoint::AdminEndpoint;
use crate::usecase::services::auth_service::AuthService;

/// Long-lived collaborators shared by every screen.
#[derive(Clone)]
pub struct Services {
    pub endpoint: Arc<dyn AdminEndpoint>,
    pub auth: Arc<AuthService>,
    pub config: Arc<AppConfig>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.endpoint, &other.endpoint)
            && Arc::ptr_eq(&self.auth, &other.auth)
            && Arc::ptr_eq(&self.config, &other.config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Results,
    List(EntityKind),
    Profile,
}

impl Screen {
    pub const NAV: [Screen; 6] = [
        Screen::Results,
        Screen::List(EntityKind::Elections),
        Screen::List(EntityKind::Positions),
        Screen::List(EntityKind::Candidates),
        Screen::List(EntityKind::VotingCodes),
        Screen::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Results => "Results",
            Screen::List(EntityKind::Elections) => "Elections",
            Screen::List(EntityKind::Positions) => "Positions",
            Screen::List(EntityKind::Candidates) => "Candidates",
            Screen::List(EntityKind::VotingCodes) => "Voting codes",
            Screen::Profile => "Profile",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub services: Signal<Services>,
    pub session: Signal<Option<AdminSession>>,
    pub screen: Signal<Screen>,
    pub notifications: Signal<Notifications>,
    pub confirm: Signal<ConfirmDialog>,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self {
            services: use_signal(move || services),
            session: use_signal(|| None::<AdminSession>),
            screen: use_signal(|| Screen::Results),
            notifications: use_signal(Notifications::default),
            confirm: use_signal(ConfirmDialog::default),
        }
    }

    pub fn endpoint(&self) -> Arc<dyn AdminEndpoint> {
        self.services.read().endpoint.clone()
    }

    pub fn auth(&self) -> Arc<AuthService> {
        self.services.read().auth.clone()
    }

    pub fn config(&self) -> Arc<AppConfig> {
        self.services.read().config.clone()
    }

    /// Shows a message and schedules its removal once its lifetime is over.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let mut notifications = self.notifications;
        notifications.write().push(message, severity);
        spawn_forever(async move {
            tokio::time::sleep(NOTICE_TTL).await;
            notifications.write().expire(Instant::now());
        });
    }

    pub fn ask(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: impl FnOnce() + 'static,
    ) {
        let mut confirm = self.confirm;
        confirm.write().open(title, message, on_confirm);
    }
}
