use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing::{info, warn};

use crate::ui::state::debounce::DEFAULT_SEARCH_DEBOUNCE;
use crate::ui::state::pagination::DEFAULT_PAGE_WINDOW;

const DB_FILE_NAME: &str = "evote.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub search_debounce: Duration,
    pub pagination_window: i64,
    pub admin_user: String,
    pub admin_password: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup("EVOTE_DB_PATH").filter(|path| !path.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => {
                info!("EVOTE_DB_PATH not set, using the app data directory");
                default_db_path()?
            }
        };
        let debounce_ms: u64 = try_load(
            &lookup,
            "EVOTE_SEARCH_DEBOUNCE_MS",
            &DEFAULT_SEARCH_DEBOUNCE.as_millis().to_string(),
        )?;
        let pagination_window: i64 = try_load(
            &lookup,
            "EVOTE_PAGINATION_WINDOW",
            &DEFAULT_PAGE_WINDOW.to_string(),
        )?;
        if pagination_window < 0 {
            return Err(anyhow!("EVOTE_PAGINATION_WINDOW must not be negative"));
        }

        Ok(Self {
            db_path,
            search_debounce: Duration::from_millis(debounce_ms),
            pagination_window,
            admin_user: try_load(&lookup, "EVOTE_ADMIN_USER", "admin")?,
            admin_password: try_load(&lookup, "EVOTE_ADMIN_PASSWORD", "admin")?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|err| {
        warn!("Invalid {key} value: {err}");
        anyhow!("invalid {key} value {raw:?}: {err}")
    })
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "school", "evote")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join(DB_FILE_NAME))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
