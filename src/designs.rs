//! Saving and restoring named wall designs

use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::error::GalleryError;
use crate::selection::Selection;
use crate::types::{SavedDesign, WallDimensions};

/// Snapshot the selection as a new design and persist the full design list
///
/// Nothing is created if the name is blank or the wall is empty. If the
/// write fails, the stored and cached design lists are left as they were.
pub fn save_design(
    store: &mut CatalogStore,
    name: &str,
    selection: &Selection,
    wall: Option<WallDimensions>,
) -> Result<SavedDesign, GalleryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GalleryError::Validation(
            "design name must not be empty".to_string(),
        ));
    }
    if selection.is_empty() {
        return Err(GalleryError::Validation(
            "add at least one artwork before saving".to_string(),
        ));
    }

    let artworks = selection.snapshot();
    let total_cost = artworks.iter().map(|a| a.record.price).sum();
    let design = SavedDesign {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_date: Local::now().naive_local(),
        wall_dimensions: wall,
        artworks,
        total_cost,
    };

    let mut designs = store.load()?.designs().to_vec();
    designs.push(design.clone());
    store.save(designs)?;

    info!(
        id = %design.id,
        name = %design.name,
        pieces = design.artworks.len(),
        total_cost = design.total_cost,
        "Saved design"
    );
    Ok(design)
}

/// First design with this name, in list order
pub fn find_by_name<'a>(designs: &'a [SavedDesign], name: &str) -> Option<&'a SavedDesign> {
    designs.iter().find(|d| d.name == name)
}

pub fn find_by_id<'a>(designs: &'a [SavedDesign], id: &Uuid) -> Option<&'a SavedDesign> {
    designs.iter().find(|d| &d.id == id)
}

/// Look a design up by id when `key` is a UUID, falling back to its name
pub fn find<'a>(designs: &'a [SavedDesign], key: &str) -> Option<&'a SavedDesign> {
    Uuid::parse_str(key)
        .ok()
        .and_then(|id| find_by_id(designs, &id))
        .or_else(|| find_by_name(designs, key))
}

/// Replace the selection with a stored design
/// The selection is untouched when no design matches `key`.
pub fn load_design<'a>(
    designs: &'a [SavedDesign],
    key: &str,
    selection: &mut Selection,
) -> Result<&'a SavedDesign, GalleryError> {
    let design = find(designs, key).ok_or_else(|| GalleryError::design_not_found(key))?;

    selection.replace(design.artworks.clone());
    if let Some(stored) = design.wall_dimensions {
        let wall = stored.clamped();
        if wall != stored {
            warn!(
                width = stored.width,
                height = stored.height,
                "Stored wall size out of range, clamping"
            );
        }
        selection.set_wall(wall);
    }

    info!(id = %design.id, name = %design.name, pieces = design.artworks.len(), "Loaded design");
    Ok(design)
}
