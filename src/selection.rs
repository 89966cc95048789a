use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::constants::placement::{CASCADE_STEP_X, CASCADE_STEP_Y};
use crate::layout::{self, GridStrategy};
use crate::types::{ArtworkId, ArtworkRecord, PlacedArtwork, Position, WallDimensions};

/// Whether moves are kept inside the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Clamp each axis to `[0, wall - artwork]`
    #[default]
    Clamp,
    /// Accept any coordinates
    Unbounded,
}

/// Where a newly added artwork lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Diagonal cascade based on how many items are already on the wall
    Cascade,
    /// Pointer drop, translated into wall-local space
    Drop { pointer: Position, origin: Position },
}

impl Placement {
    fn resolve(self, existing: usize) -> Position {
        match self {
            Placement::Cascade => Position::new(
                existing as f64 * CASCADE_STEP_X,
                existing as f64 * CASCADE_STEP_Y,
            ),
            Placement::Drop { pointer, origin } => Position::new(
                (pointer.x - origin.x).max(0.0),
                (pointer.y - origin.y).max(0.0),
            ),
        }
    }
}

/// One entry of a position report from the presentation side
/// Only the id and coordinates are trusted; any other field is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportedPlacement {
    pub id: ArtworkId,
    #[serde(default, alias = "x")]
    pub wall_x: f64,
    #[serde(default, alias = "y")]
    pub wall_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedbackOutcome {
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub ignored: usize,
}

/// Artworks currently placed on the wall, in insertion order
/// Each artwork id appears at most once.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    items: Vec<PlacedArtwork>,
    wall: WallDimensions,
    bounds: BoundsPolicy,
}

impl Selection {
    pub fn new(wall: WallDimensions, bounds: BoundsPolicy) -> Self {
        Self {
            items: Vec::new(),
            wall,
            bounds,
        }
    }

    pub fn items(&self) -> &[PlacedArtwork] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn wall(&self) -> WallDimensions {
        self.wall
    }

    pub fn set_wall(&mut self, wall: WallDimensions) {
        info!(width = wall.width, height = wall.height, "Wall dimensions changed");
        self.wall = wall;
    }

    pub fn get(&self, id: &ArtworkId) -> Option<&PlacedArtwork> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &ArtworkId) -> bool {
        self.get(id).is_some()
    }

    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(|item| item.record.price).sum()
    }

    /// Place a copy of `record` on the wall
    /// Returns false (and changes nothing) if it is already there
    pub fn add(&mut self, record: &ArtworkRecord, placement: Placement) -> bool {
        if self.contains(&record.id) {
            debug!(id = %record.id, "Artwork already on the wall, ignoring add");
            return false;
        }
        let position = placement.resolve(self.items.len());
        info!(id = %record.id, x = position.x, y = position.y, "Added artwork to wall");
        self.items.push(PlacedArtwork::new(record.clone(), position));
        true
    }

    pub fn remove(&mut self, id: &ArtworkId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            info!(id = %id, "Removed artwork from wall");
        }
        removed
    }

    /// Reposition an artwork, applying the bounds policy
    /// Returns false if the artwork is not on the wall
    pub fn move_to(&mut self, id: &ArtworkId, x: f64, y: f64) -> bool {
        let (wall, bounds) = (self.wall, self.bounds);
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            debug!(id = %id, "Artwork not on the wall, ignoring move");
            return false;
        };
        let position = constrain(&item.record, Position::new(x, y), wall, bounds);
        item.set_position(position);
        info!(id = %id, x = position.x, y = position.y, "Moved artwork");
        true
    }

    pub fn clear(&mut self) {
        info!(count = self.items.len(), "Cleared wall");
        self.items.clear();
    }

    /// Recompute every position on a grid, replacing manual placement
    pub fn auto_arrange(&mut self, strategy: &GridStrategy) {
        if self.items.is_empty() {
            return;
        }
        let positions = layout::arrange(self.items.len(), self.wall, strategy);
        for (item, position) in self.items.iter_mut().zip(positions) {
            item.set_position(position);
        }
        info!(count = self.items.len(), strategy = ?strategy, "Auto-arranged wall");
    }

    /// Deep copy of the current items
    pub fn snapshot(&self) -> Vec<PlacedArtwork> {
        self.items.clone()
    }

    /// Replace the whole selection, keeping only the first entry per id
    pub fn replace(&mut self, items: Vec<PlacedArtwork>) {
        let mut seen = HashSet::new();
        self.items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id().clone());
                if !fresh {
                    warn!(id = %item.id(), "Dropping repeated artwork from restored selection");
                }
                fresh
            })
            .collect();
    }

    /// Merge a full position report into the selection
    ///
    /// Records always come from `catalog`; the report only decides membership,
    /// order and coordinates. Unknown or repeated ids are skipped.
    pub fn apply_feedback(
        &mut self,
        catalog: &[ArtworkRecord],
        reported: &[ReportedPlacement],
    ) -> FeedbackOutcome {
        let mut outcome = FeedbackOutcome::default();
        let mut accepted = HashSet::new();
        let mut merged = Vec::with_capacity(reported.len());

        for entry in reported {
            if accepted.contains(&entry.id) {
                warn!(id = %entry.id, "Repeated artwork in position report, ignoring");
                outcome.ignored += 1;
                continue;
            }

            let requested = Position::new(entry.wall_x, entry.wall_y);
            if let Some(existing) = self.get(&entry.id) {
                let position = constrain(&existing.record, requested, self.wall, self.bounds);
                if position != existing.position() {
                    outcome.moved += 1;
                }
                merged.push(PlacedArtwork::new(existing.record.clone(), position));
            } else if let Some(record) = catalog.iter().find(|a| a.id == entry.id) {
                let position = constrain(record, requested, self.wall, self.bounds);
                outcome.added += 1;
                merged.push(PlacedArtwork::new(record.clone(), position));
            } else {
                warn!(id = %entry.id, "Unknown artwork in position report, ignoring");
                outcome.ignored += 1;
                continue;
            }
            accepted.insert(entry.id.clone());
        }

        outcome.removed = self
            .items
            .iter()
            .filter(|item| !accepted.contains(item.id()))
            .count();
        self.items = merged;

        info!(
            added = outcome.added,
            removed = outcome.removed,
            moved = outcome.moved,
            ignored = outcome.ignored,
            "Applied position report"
        );
        outcome
    }
}

/// Apply the bounds policy to a requested position
/// An artwork wider or taller than the wall is pinned to 0 on that axis
fn constrain(
    record: &ArtworkRecord,
    requested: Position,
    wall: WallDimensions,
    bounds: BoundsPolicy,
) -> Position {
    match bounds {
        BoundsPolicy::Unbounded => requested,
        BoundsPolicy::Clamp => {
            let max_x = (wall.width - record.width).max(0.0);
            let max_y = (wall.height - record.height).max(0.0);
            Position::new(requested.x.clamp(0.0, max_x), requested.y.clamp(0.0, max_y))
        }
    }
}
