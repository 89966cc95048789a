//! Grid auto-arrangement and wall-bounds geometry

use serde::{Deserialize, Serialize};

use crate::constants::grid;
use crate::types::{ArtworkId, PlacedArtwork, Position, WallDimensions};

#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Framed footprint of a placed artwork
    pub fn of(item: &PlacedArtwork) -> Self {
        Self {
            x: item.wall_x,
            y: item.wall_y,
            width: item.record.outer_width(),
            height: item.record.outer_height(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn fits_within(&self, wall: WallDimensions) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= wall.width && self.bottom() <= wall.height
    }
}

/// Constant cell pitch, independent of wall size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPitch {
    pub base_x: f64,
    pub base_y: f64,
    pub pitch_x: f64,
    pub pitch_y: f64,
    pub max_columns: usize,
}

impl Default for FixedPitch {
    fn default() -> Self {
        Self {
            base_x: grid::BASE_X,
            base_y: grid::BASE_Y,
            pitch_x: grid::PITCH_X,
            pitch_y: grid::PITCH_Y,
            max_columns: grid::MAX_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridStrategy {
    /// Square-ish grid that divides the wall into equal cells
    #[default]
    WallTiling,
    FixedPitch(FixedPitch),
}

/// Number of grid columns for `count` items
pub fn columns(count: usize, strategy: &GridStrategy) -> usize {
    if count == 0 {
        return 0;
    }
    match strategy {
        GridStrategy::WallTiling => (count as f64).sqrt().ceil() as usize,
        GridStrategy::FixedPitch(pitch) => pitch.max_columns.max(1).min(count),
    }
}

/// Row and column of the item at `index` in insertion order
pub fn grid_cell(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

/// Grid positions for `count` items, in insertion order
///
/// Wall tiling can place the last row past the wall's bottom edge when
/// `count` is not a multiple of the column count; that is left as is.
pub fn arrange(count: usize, wall: WallDimensions, strategy: &GridStrategy) -> Vec<Position> {
    let cols = columns(count, strategy);
    if cols == 0 {
        return Vec::new();
    }

    match strategy {
        GridStrategy::WallTiling => {
            let cell_width = (wall.width / cols as f64).floor();
            let row_divisor = (count / cols + 1) as f64;
            let cell_height = (wall.height / row_divisor).floor();
            (0..count)
                .map(|i| {
                    let (row, col) = grid_cell(i, cols);
                    Position::new(col as f64 * cell_width, row as f64 * cell_height)
                })
                .collect()
        }
        GridStrategy::FixedPitch(pitch) => (0..count)
            .map(|i| {
                let (row, col) = grid_cell(i, cols);
                Position::new(
                    pitch.base_x + col as f64 * pitch.pitch_x,
                    pitch.base_y + row as f64 * pitch.pitch_y,
                )
            })
            .collect(),
    }
}

/// Ids whose framed footprint extends past the wall
pub fn overflowing(items: &[PlacedArtwork], wall: WallDimensions) -> Vec<ArtworkId> {
    items
        .iter()
        .filter(|item| !Rect::of(item).fits_within(wall))
        .map(|item| item.id().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::artwork;

    fn wall() -> WallDimensions {
        WallDimensions::default()
    }

    #[test]
    fn test_wall_tiling_columns() {
        let s = GridStrategy::WallTiling;
        assert_eq!(columns(0, &s), 0);
        assert_eq!(columns(1, &s), 1);
        assert_eq!(columns(4, &s), 2);
        assert_eq!(columns(5, &s), 3);
        assert_eq!(columns(10, &s), 4);
    }

    #[test]
    fn test_fixed_pitch_columns_cap_at_three() {
        let s = GridStrategy::FixedPitch(FixedPitch::default());
        assert_eq!(columns(2, &s), 2);
        assert_eq!(columns(3, &s), 3);
        assert_eq!(columns(7, &s), 3);
    }

    #[test]
    fn test_four_items_fill_two_by_two() {
        let cells: Vec<_> = (0..4).map(|i| grid_cell(i, 2)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

        let positions = arrange(4, wall(), &GridStrategy::WallTiling);
        // 120 / 2 = 60 wide cells; 80 / (4 / 2 + 1) = 26 tall cells
        assert_eq!(
            positions,
            vec![
                Position::new(0.0, 0.0),
                Position::new(60.0, 0.0),
                Position::new(0.0, 26.0),
                Position::new(60.0, 26.0),
            ]
        );
    }

    #[test]
    fn test_wall_tiling_three_items() {
        let positions = arrange(3, wall(), &GridStrategy::WallTiling);
        assert_eq!(
            positions,
            vec![
                Position::new(0.0, 0.0),
                Position::new(60.0, 0.0),
                Position::new(0.0, 40.0),
            ]
        );
    }

    #[test]
    fn test_fixed_pitch_positions() {
        let positions = arrange(4, wall(), &GridStrategy::FixedPitch(FixedPitch::default()));
        assert_eq!(
            positions,
            vec![
                Position::new(20.0, 20.0),
                Position::new(170.0, 20.0),
                Position::new(320.0, 20.0),
                Position::new(20.0, 170.0),
            ]
        );
    }

    #[test]
    fn test_arrange_empty_is_empty() {
        assert!(arrange(0, wall(), &GridStrategy::WallTiling).is_empty());
    }

    #[test]
    fn test_arrange_is_deterministic() {
        let s = GridStrategy::WallTiling;
        assert_eq!(arrange(7, wall(), &s), arrange(7, wall(), &s));
    }

    #[test]
    fn test_overflowing_uses_framed_size() {
        // 20x16 artwork with a 1" frame is 22x18 on the wall
        let inside = PlacedArtwork::new(artwork(1, 10.0), Position::new(98.0, 62.0));
        let outside = PlacedArtwork::new(artwork(2, 10.0), Position::new(99.0, 0.0));
        assert_eq!(
            overflowing(&[inside, outside], wall()),
            vec![ArtworkId::Int(2)]
        );
    }

    #[test]
    fn test_strategy_config_format() {
        let s: GridStrategy = serde_json::from_str(r#""wall_tiling""#).unwrap();
        assert_eq!(s, GridStrategy::WallTiling);

        let s: GridStrategy = serde_json::from_str(
            r#"{"fixed_pitch": {"base_x": 0, "base_y": 0, "pitch_x": 10, "pitch_y": 12, "max_columns": 2}}"#,
        )
        .unwrap();
        assert_eq!(columns(5, &s), 2);
    }
}
