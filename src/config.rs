//! User settings for the gallery wall tool
//!
//! Stored as JSON under the platform config directory. A default file is
//! written the first time the tool runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::layout::GridStrategy;
use crate::selection::{BoundsPolicy, Placement};
use crate::types::{Position, WallDimensions, serialize_number};

/// How `add` positions a new artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    #[default]
    Cascade,
    /// Drop at the wall origin (pointer drops carry their own coordinates)
    Drop,
}

/// Top-left corner of the wall in pointer space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WallOrigin {
    #[serde(serialize_with = "serialize_number")]
    pub x: f64,
    #[serde(serialize_with = "serialize_number")]
    pub y: f64,
}

impl From<WallOrigin> for Position {
    fn from(origin: WallOrigin) -> Self {
        Position::new(origin.x, origin.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Catalog document (artworks + saved designs)
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Wall size for a fresh session
    #[serde(default)]
    pub wall: WallDimensions,

    #[serde(default)]
    pub bounds: BoundsPolicy,

    #[serde(default)]
    pub placement: PlacementPolicy,

    #[serde(default)]
    pub wall_origin: WallOrigin,

    #[serde(default)]
    pub layout: GridStrategy,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(crate::constants::config::DEFAULT_DATABASE)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wall: WallDimensions::default(),
            bounds: BoundsPolicy::default(),
            placement: PlacementPolicy::default(),
            wall_origin: WallOrigin::default(),
            layout: GridStrategy::default(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load settings from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Settings file not found, creating default");
            let settings = Settings::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let mut settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings JSON from {:?}", path))?;
        settings.validate_and_clamp();

        info!(path = %path.display(), database = %settings.database_path.display(), "Loaded settings");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write settings to {:?}", path))?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Placement used by a plain `add`
    pub fn add_placement(&self) -> Placement {
        match self.placement {
            PlacementPolicy::Cascade => Placement::Cascade,
            PlacementPolicy::Drop => {
                let origin = self.wall_origin.into();
                Placement::Drop { pointer: origin, origin }
            }
        }
    }

    /// Placement for a pointer drop at `pointer`
    pub fn drop_placement(&self, pointer: Position) -> Placement {
        Placement::Drop {
            pointer,
            origin: self.wall_origin.into(),
        }
    }

    /// Pull out-of-range values back into supported ranges
    fn validate_and_clamp(&mut self) {
        let wall = self.wall.clamped();
        if wall.width != self.wall.width {
            warn!(width = self.wall.width, using = wall.width, "wall width out of range, clamping");
        }
        if wall.height != self.wall.height {
            warn!(height = self.wall.height, using = wall.height, "wall height out of range, clamping");
        }
        self.wall = wall;

        if let GridStrategy::FixedPitch(pitch) = &mut self.layout {
            if pitch.max_columns == 0 {
                warn!("layout max_columns is 0, using 1");
                pitch.max_columns = 1;
            }
            if pitch.pitch_x < 0.0 || pitch.pitch_y < 0.0 {
                warn!(pitch_x = pitch.pitch_x, pitch_y = pitch.pitch_y, "negative grid pitch, using absolute value");
                pitch.pitch_x = pitch.pitch_x.abs();
                pitch.pitch_y = pitch.pitch_y.abs();
            }
        }
    }
}
