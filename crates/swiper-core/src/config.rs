//! Configuration types for swiper.
//!
//! [`Config::load`] reads `~/.config/swiper/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
theme             = "default"
show_line_numbers = true

[keybindings]
search      = "/"
search_word = "*"
quit        = "q"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/swiper/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// `default` or `gruvbox_dark`.
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,
}

fn default_theme() -> String { "default".to_string() }
fn default_show_line_numbers() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            show_line_numbers: default_show_line_numbers(),
        }
    }
}

/// `[keybindings]` section of `config.toml`. Each binding is a single key.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_search_word")]
    pub search_word: String,
    #[serde(default = "default_quit")]
    pub quit: String,
}

fn default_search() -> String { "/".to_string() }
fn default_search_word() -> String { "*".to_string() }
fn default_quit() -> String { "q".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            search: default_search(),
            search_word: default_search_word(),
            quit: default_quit(),
        }
    }
}

impl KeybindingsConfig {
    pub fn search_key(&self) -> char {
        single_char(&self.search, '/')
    }

    pub fn search_word_key(&self) -> char {
        single_char(&self.search_word, '*')
    }

    pub fn quit_key(&self) -> char {
        single_char(&self.quit, 'q')
    }
}

/// The binding's only char, or `fallback` when it is not exactly one char.
fn single_char(binding: &str, fallback: char) -> char {
    let mut chars = binding.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            tracing::warn!(binding, %fallback, "keybinding must be a single key, using default");
            fallback
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/swiper/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file layered on top of the built-in defaults. A
    /// missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("swiper")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
