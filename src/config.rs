use crate::events::EventCatalog;
use crate::menu::MenuCatalog;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) pet_name: String,
    pub(crate) fps_cap: u32,
    pub(crate) enable_color: bool,
    pub(crate) seed: u64,
    /// Game seconds per real second.
    pub(crate) acceleration: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pet_name: "Jerry".to_string(),
            fps_cap: 60,
            enable_color: true,
            seed: 0xC0FFEE_u64,
            acceleration: 60.0,
        }
    }
}

/// The whole of the startup-time content: menu structure plus flavor text.
/// Never mutated after load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Content {
    pub(crate) menus: MenuCatalog,
    pub(crate) flavor: EventCatalog,
}

impl Content {
    pub(crate) fn validate(&self) -> Result<()> {
        self.flavor.validate()?;
        self.menus.validate(&self.flavor)?;
        Ok(())
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) content_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj =
        ProjectDirs::from("com", "mogul", "Mogul").context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        content_path: dir.join("content.json"),
    })
}

/// Lenient: a missing or unparsable settings file falls back to defaults.
pub(crate) fn load_settings(path: &Path) -> Settings {
    if let Ok(s) = fs::read_to_string(path) {
        if let Ok(v) = serde_json::from_str::<Settings>(&s) {
            return v;
        }
    }
    Settings::default()
}

pub(crate) fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

/// Strict, unlike settings: a content file the user explicitly provided must
/// parse and validate, and the compiled-in defaults must too. Any failure
/// here aborts startup before the terminal is touched.
pub(crate) fn load_content(path: &Path) -> Result<Content> {
    let content = if path.exists() {
        let data = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        serde_json::from_str::<Content>(&data)
            .with_context(|| format!("could not parse {}", path.display()))?
    } else {
        Content::default()
    };
    content.validate()?;
    Ok(content)
}

fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // Best-effort atomic replace on the same filesystem.
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let settings = load_settings(Path::new("/nonexistent/mogul/settings.json"));
        assert_eq!(settings.pet_name, "Jerry");
        assert_eq!(settings.acceleration, 60.0);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings {
            pet_name: "Mochi".to_string(),
            fps_cap: 30,
            enable_color: false,
            seed: 1234,
            acceleration: 120.0,
        };
        let json = serde_json::to_string(&settings).expect("serializes");
        let back: Settings = serde_json::from_str(&json).expect("parses");
        assert_eq!(back.pet_name, "Mochi");
        assert_eq!(back.fps_cap, 30);
        assert!(!back.enable_color);
        assert_eq!(back.seed, 1234);
        assert_eq!(back.acceleration, 120.0);
    }

    #[test]
    fn partial_settings_take_defaults_for_the_rest() {
        let back: Settings = serde_json::from_str(r#"{"fps_cap": 24}"#).expect("parses");
        assert_eq!(back.fps_cap, 24);
        assert_eq!(back.pet_name, "Jerry");
    }

    #[test]
    fn default_content_validates() {
        Content::default().validate().expect("defaults are valid");
    }

    #[test]
    fn missing_content_file_uses_defaults() {
        let content =
            load_content(Path::new("/nonexistent/mogul/content.json")).expect("defaults load");
        assert!(!content.flavor.food.is_empty());
    }

    #[test]
    fn content_round_trips_through_json() {
        let json = serde_json::to_string(&Content::default()).expect("serializes");
        let back: Content = serde_json::from_str(&json).expect("parses");
        back.validate().expect("still valid");
    }
}
