use crate::events::AppEvent;
use crate::wheel::MAX_SECTORS;
use async_channel::Sender;
use derive_more::{Deref, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use pinput::input::{Key, KeySequence};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// An sRGB color written as `#rrggbb` (or `#rgb`).
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl FromStr for HexColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            self.0.red, self.0.green, self.0.blue
        )
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub keys: Option<KeySequence>,
    pub color: Option<HexColor>,
}

impl ItemConfig {
    fn new(name: &str, keys: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            keys: keys.parse().ok(),
            color: color.parse().ok(),
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

fn default_show_keys() -> KeySequence {
    [Key::Shift, Key::Space].into_iter().collect()
}

fn default_cancel_key() -> Key {
    Key::Escape
}

fn default_items() -> Vec<ItemConfig> {
    vec![
        ItemConfig::new("Sprint", "Ctrl+1", "#f2a33a"),
        ItemConfig::new("Leap", "Ctrl+2", "#8fd14f"),
        ItemConfig::new("Swim", "Ctrl+3", "#3ab7f2"),
        ItemConfig::new("Blink", "Ctrl+4", "#c9a2ff"),
        ItemConfig::new("Glide", "Ctrl+5", "#f2e23a"),
        ItemConfig::new("Charge", "Ctrl+6", "#f25c3a"),
    ]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub action_mode: bool,
    #[serde(default = "default_show_keys")]
    pub show_keys: KeySequence,
    #[serde(default = "default_cancel_key")]
    pub cancel_key: Key,
    #[serde(default)]
    pub favorite: Option<usize>,
    #[serde(default = "default_items")]
    pub items: Vec<ItemConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            action_mode: false,
            show_keys: default_show_keys(),
            cancel_key: default_cancel_key(),
            favorite: None,
            items: default_items(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if self.items.is_empty() || self.items.len() > MAX_SECTORS {
            return Err(ConfigError::Invalid(format!(
                "between 1 and {} items are required, got {}",
                MAX_SECTORS,
                self.items.len()
            )));
        }
        if let Some(fav) = self.favorite
            && fav >= self.items.len()
        {
            return Err(ConfigError::Invalid(format!(
                "favorite {} is out of range for {} items",
                fav,
                self.items.len()
            )));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "pinwheel", "pinwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PINWHEEL"))
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether a watcher event should trigger a reload of `config_path`.
fn is_reload_trigger(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the config directory and sends `ConfigReload` whenever the config
/// file itself changes. Editors often replace the file, so the directory is
/// watched rather than the file.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher disabled: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        log::error!("Config path {} has no parent", config_path.display());
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create config watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!(
            "Failed to watch {}: {}",
            config_dir.display(),
            ConfigError::from(e)
        );
        return;
    }
    log::info!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_reload_trigger(&event, &config_path) => {
                log::debug!("{:?} on {}, reloading", event.kind, config_path.display());
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", e),
        }
    }
}
