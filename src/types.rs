//! Core data model: catalog records, placed artworks and saved designs

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::wall::*;
use crate::error::GalleryError;

/// Catalog identifier, either numeric or textual depending on the document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtworkId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtworkId::Int(i) => write!(f, "{i}"),
            ArtworkId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for ArtworkId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(i) => ArtworkId::Int(i),
            Err(_) => ArtworkId::Text(s.to_string()),
        })
    }
}

/// Writes whole numbers without a decimal point so `24` stays `24` on disk
pub(crate) fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Reads ISO-8601 timestamps with or without a UTC offset
/// Offset timestamps keep their local wall-clock time.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    text.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| DateTime::parse_from_rfc3339(&text).map(|dt| dt.naive_local()))
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{text}': {e}")))
}

/// Catalog entry, read-only once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub id: ArtworkId,
    pub title: String,
    pub artist: String,
    pub style: String,
    #[serde(serialize_with = "serialize_number")]
    pub price: f64,
    #[serde(serialize_with = "serialize_number")]
    pub width: f64,
    #[serde(serialize_with = "serialize_number")]
    pub height: f64,
    #[serde(default, serialize_with = "serialize_number")]
    pub frame_width: f64,
    /// Placeholder fill color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// External image asset, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
}

impl ArtworkRecord {
    /// Width including the frame on both sides
    pub fn outer_width(&self) -> f64 {
        self.width + self.frame_width * 2.0
    }

    /// Height including the frame on both sides
    pub fn outer_height(&self) -> f64 {
        self.height + self.frame_width * 2.0
    }
}

/// Top-left placement on the wall
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Artwork currently on the wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedArtwork {
    #[serde(flatten)]
    pub record: ArtworkRecord,
    #[serde(default, serialize_with = "serialize_number")]
    pub wall_x: f64,
    #[serde(default, serialize_with = "serialize_number")]
    pub wall_y: f64,
}

impl PlacedArtwork {
    pub fn new(record: ArtworkRecord, position: Position) -> Self {
        Self {
            record,
            wall_x: position.x,
            wall_y: position.y,
        }
    }

    pub fn id(&self) -> &ArtworkId {
        &self.record.id
    }

    pub fn position(&self) -> Position {
        Position::new(self.wall_x, self.wall_y)
    }

    pub fn set_position(&mut self, position: Position) {
        self.wall_x = position.x;
        self.wall_y = position.y;
    }
}

/// Physical wall size in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDimensions {
    #[serde(serialize_with = "serialize_number")]
    pub width: f64,
    #[serde(serialize_with = "serialize_number")]
    pub height: f64,
}

impl Default for WallDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl WallDimensions {
    /// Build wall dimensions, rejecting sizes outside the supported range
    pub fn new(width: f64, height: f64) -> Result<Self, GalleryError> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(GalleryError::Validation(format!(
                "wall width {width} must be between {MIN_WIDTH} and {MAX_WIDTH} inches"
            )));
        }
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
            return Err(GalleryError::Validation(format!(
                "wall height {height} must be between {MIN_HEIGHT} and {MAX_HEIGHT} inches"
            )));
        }
        Ok(Self { width, height })
    }

    /// Pull both sides into the supported range
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.clamp(MIN_WIDTH, MAX_WIDTH),
            height: self.height.clamp(MIN_HEIGHT, MAX_HEIGHT),
        }
    }
}

/// Named snapshot of a selection, immutable after save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDesign {
    pub id: Uuid,
    pub name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_dimensions: Option<WallDimensions>,
    pub artworks: Vec<PlacedArtwork>,
    /// Cached at save time, never recomputed
    #[serde(serialize_with = "serialize_number")]
    pub total_cost: f64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn artwork(id: i64, price: f64) -> ArtworkRecord {
        ArtworkRecord {
            id: ArtworkId::Int(id),
            title: format!("Artwork {id}"),
            artist: "Test Artist".to_string(),
            style: "Abstract".to_string(),
            price,
            width: 20.0,
            height: 16.0,
            frame_width: 1.0,
            color: Some("#336699".to_string()),
            image_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_id_parses_int_or_text() {
        assert_eq!("42".parse::<ArtworkId>().unwrap(), ArtworkId::Int(42));
        assert_eq!(
            "sunset-7".parse::<ArtworkId>().unwrap(),
            ArtworkId::Text("sunset-7".to_string())
        );
    }

    #[test]
    fn test_artwork_id_deserializes_untagged() {
        let ids: Vec<ArtworkId> = serde_json::from_str(r#"[3, "a3"]"#).unwrap();
        assert_eq!(ids, vec![ArtworkId::Int(3), ArtworkId::Text("a3".to_string())]);
    }

    #[test]
    fn test_placed_artwork_flattens_record() {
        let placed = PlacedArtwork::new(fixtures::artwork(1, 100.0), Position::new(25.0, 15.5));
        let value = serde_json::to_value(&placed).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["price"], 100);
        assert_eq!(value["wall_x"], 25);
        assert_eq!(value["wall_y"], 15.5);
        assert!(value.get("image_path").is_none());
    }

    #[test]
    fn test_placed_artwork_position_defaults_to_origin() {
        let json = r##"{"id": 9, "title": "T", "artist": "A", "style": "Modern",
            "price": 50, "width": 10, "height": 8, "frame_width": 1, "color": "#fff"}"##;
        let placed: PlacedArtwork = serde_json::from_str(json).unwrap();
        assert_eq!(placed.position(), Position::new(0.0, 0.0));
        assert_eq!(placed.record.price, 50.0);
    }

    #[test]
    fn test_outer_size_includes_frame() {
        let record = fixtures::artwork(1, 10.0);
        assert_eq!(record.outer_width(), 22.0);
        assert_eq!(record.outer_height(), 18.0);
    }

    #[test]
    fn test_wall_dimensions_range() {
        assert!(WallDimensions::new(120.0, 80.0).is_ok());
        assert!(WallDimensions::new(60.0, 40.0).is_ok());
        assert!(matches!(
            WallDimensions::new(59.0, 80.0),
            Err(GalleryError::Validation(_))
        ));
        assert!(matches!(
            WallDimensions::new(120.0, 121.0),
            Err(GalleryError::Validation(_))
        ));
    }

    #[test]
    fn test_wall_dimensions_clamped() {
        let wall = WallDimensions { width: 500.0, height: 10.0 }.clamped();
        assert_eq!(wall, WallDimensions { width: MAX_WIDTH, height: MIN_HEIGHT });
        assert_eq!(WallDimensions::default().clamped(), WallDimensions::default());
    }

    #[test]
    fn test_saved_design_reads_fractional_timestamp() {
        let json = r#"{"id": "5f0c8a36-3b8e-4bb4-9f0e-0d7f1b2c9a10", "name": "Living room",
            "created_date": "2024-03-05T14:22:01.123456",
            "wall_dimensions": {"width": 120, "height": 80},
            "artworks": [], "total_cost": 0}"#;
        let design: SavedDesign = serde_json::from_str(json).unwrap();
        assert_eq!(design.name, "Living room");
        assert_eq!(design.wall_dimensions, Some(WallDimensions::default()));
    }

    #[test]
    fn test_saved_design_reads_offset_timestamps() {
        for stamp in ["2024-03-05T14:22:01+00:00", "2024-03-05T14:22:01Z", "2024-03-05 14:22:01"] {
            let json = format!(
                r#"{{"id": "5f0c8a36-3b8e-4bb4-9f0e-0d7f1b2c9a10", "name": "Hall",
                "created_date": "{stamp}", "artworks": [], "total_cost": 0}}"#
            );
            let design: SavedDesign = serde_json::from_str(&json).unwrap();
            assert_eq!(design.created_date.to_string(), "2024-03-05 14:22:01");
        }
    }

    #[test]
    fn test_saved_design_rejects_garbage_timestamp() {
        let json = r#"{"id": "5f0c8a36-3b8e-4bb4-9f0e-0d7f1b2c9a10", "name": "Hall",
            "created_date": "yesterday", "artworks": [], "total_cost": 0}"#;
        assert!(serde_json::from_str::<SavedDesign>(json).is_err());
    }
}
