use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable pointing at a JSON config file.
pub const CONFIG_ENV: &str = "CENTURY_GAMES_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "century-games.json";

/// Platforms hidden from the platform selector (handhelds nobody filters on,
/// VR headsets, web).
const EXCLUDED_PLATFORMS: [&str; 24] = [
    "Windows Phone",
    "Legacy Mobile Device",
    "Web browser",
    "BlackBerry OS",
    "WonderSwan Color",
    "Neo Geo Pocket Color",
    "MSX",
    "Gizmondo",
    "Digiblast",
    "Arcade",
    "64DD",
    "Family Computer",
    "Oculus Quest",
    "visionOS",
    "Zeebo",
    "SteamVR",
    "Gear VR",
    "Meta Quest 3",
    "Oculus Go",
    "Windows Mixed Reality",
    "Oculus VR",
    "Daydream",
    "Meta Quest 2",
    "Oculus Rift",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset opened at startup.
    pub data_path: Option<PathBuf>,
    pub excluded_platforms: Vec<String>,
    /// Length of the "Top N" lists on the ratings page.
    pub top_list_len: usize,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: None,
            excluded_platforms: EXCLUDED_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            top_list_len: 15,
            window_size: [1280.0, 860.0],
        }
    }
}

impl AppConfig {
    /// `$CENTURY_GAMES_CONFIG` if set (must exist), else `./century-games.json`
    /// if present, else defaults.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_path(local);
        }
        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The first positional argument overrides `data_path`.
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(path) = args.next() {
            self.data_path = Some(PathBuf::from(path));
        }
        self
    }

    pub fn excluded_platform_set(&self) -> BTreeSet<String> {
        self.excluded_platforms.iter().cloned().collect()
    }
}
