use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Path to the generated posts catalog. Defaults to the layout the site
    /// builder writes next to its output.
    pub posts_path: Option<PathBuf>,
    pub hero: Option<Hero>,
    pub tui: Option<Tui>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Hero {
    /// Number of rotating banner images (hero_01.jpg .. hero_NN.jpg)
    pub banner_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Tui {
    /// Show the boot splash with the progress bar (default: true)
    pub splash: Option<bool>,
    /// Resize debounce quiet period in milliseconds (default: 150)
    pub resize_debounce_ms: Option<u64>,
}

impl Settings {
    pub fn banner_count(&self) -> u32 {
        self.hero
            .as_ref()
            .and_then(|h| h.banner_count)
            .unwrap_or(10)
    }

    pub fn splash(&self) -> bool {
        self.tui.as_ref().and_then(|t| t.splash).unwrap_or(true)
    }

    pub fn resize_debounce(&self) -> std::time::Duration {
        let ms = self
            .tui
            .as_ref()
            .and_then(|t| t.resize_debounce_ms)
            .unwrap_or(150);
        std::time::Duration::from_millis(ms)
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(bd) = directories::BaseDirs::new() {
        bd.config_dir().join("kiosk")
    } else {
        PathBuf::from("./.config/kiosk")
    }
}

pub fn state_dir() -> PathBuf {
    // Prefer XDG state dir when available; fall back to config dir
    if let Some(bd) = directories::BaseDirs::new() {
        if let Some(sd) = bd.state_dir() {
            return sd.join("kiosk");
        }
    }
    config_dir()
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// sessionStorage analogue for the hero banner index.
pub fn session_path() -> PathBuf {
    state_dir().join("last_hero")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if let Ok(s) = std::fs::read_to_string(&path) {
        match toml::from_str(&s) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring malformed {}: {e}", path.display());
                Settings::default()
            }
        }
    } else {
        Settings::default()
    }
}

pub fn posts_path(settings: &Settings) -> PathBuf {
    settings
        .posts_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("assets/data/posts.json"))
}
