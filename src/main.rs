use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod config;

mod domain {
    pub mod entities {
        pub mod admin;
        pub mod election;
        pub mod kind;
        pub mod list;
    }
    pub mod validation;
    pub mod wire;
}

mod infra {
    pub mod export {
        pub mod csv;
    }
    pub mod local {
        pub mod endpoint;
    }
    pub mod sqlite {
        pub mod queries;
        pub mod repo;
        pub mod schema;
    }
}

mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}

mod ui {
    pub mod client;
    pub mod components {
        pub mod confirm;
        pub mod forms;
        pub mod list_screen;
        pub mod login;
        pub mod notifications;
        pub mod pagination;
        pub mod profile;
        pub mod results;
    }
    pub mod state {
        pub mod app_state;
        pub mod bulk;
        pub mod confirm;
        pub mod debounce;
        pub mod descriptors;
        pub mod fetch;
        pub mod list_controller;
        pub mod list_query;
        pub mod notifications;
        pub mod pagination;
        pub mod selection;
    }
}

mod usecase {
    pub mod ports {
        pub mod endpoint;
        pub mod repo;
    }
    pub mod services {
        pub mod auth_service;
        pub mod edit_service;
        pub mod export_service;
        pub mod query_service;
    }
}

#[cfg(test)]
mod tests;

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let webview_data_dir = config::default_webview_data_dir()
        .expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title("School e-voting admin"),
                )
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
