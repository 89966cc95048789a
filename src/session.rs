//! Per-session state
//!
//! A `Session` owns everything one user works with: the cached catalog,
//! the artworks on the wall, and the name of the design last saved or
//! loaded. The host creates it at startup and drops it at exit.

use tracing::info;

use crate::catalog::{Catalog, CatalogStore};
use crate::config::Settings;
use crate::designs;
use crate::error::GalleryError;
use crate::selection::{FeedbackOutcome, Placement, ReportedPlacement, Selection};
use crate::types::{ArtworkId, PlacedArtwork, Position, SavedDesign, WallDimensions};

pub struct Session {
    store: CatalogStore,
    selection: Selection,
    settings: Settings,
    current_design: Option<String>,
}

impl Session {
    /// Open the catalog and start with an empty wall
    /// Fails if the catalog document cannot be loaded
    pub fn start(settings: Settings) -> Result<Self, GalleryError> {
        let mut store = CatalogStore::new(&settings.database_path);
        store.load()?;
        let selection = Selection::new(settings.wall, settings.bounds);
        info!(database = %store.path().display(), bounds = ?settings.bounds, "Session started");
        Ok(Self {
            store,
            selection,
            settings,
            current_design: None,
        })
    }

    pub fn catalog(&mut self) -> Result<&Catalog, GalleryError> {
        self.store.load()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_design(&self) -> Option<&str> {
        self.current_design.as_deref()
    }

    pub fn add(&mut self, id: &ArtworkId) -> Result<bool, GalleryError> {
        let placement = self.settings.add_placement();
        self.add_with(id, placement)
    }

    /// Add an artwork dropped at a pointer position
    pub fn drop_at(&mut self, id: &ArtworkId, pointer: Position) -> Result<bool, GalleryError> {
        let pointer = finite(pointer.x, pointer.y)?;
        let placement = self.settings.drop_placement(pointer);
        self.add_with(id, placement)
    }

    fn add_with(&mut self, id: &ArtworkId, placement: Placement) -> Result<bool, GalleryError> {
        let id = self.resolve_id(id)?;
        let catalog = self.store.load()?;
        let record = catalog
            .find_artwork(&id)
            .ok_or_else(|| GalleryError::artwork_not_found(&id))?;
        Ok(self.selection.add(record, placement))
    }

    pub fn remove(&mut self, id: &ArtworkId) -> Result<bool, GalleryError> {
        let id = self.resolve_id(id)?;
        Ok(self.selection.remove(&id))
    }

    /// Reposition an artwork on the wall
    /// Returns where it ended up, or `None` if it is not on the wall
    pub fn move_to(
        &mut self,
        id: &ArtworkId,
        x: f64,
        y: f64,
    ) -> Result<Option<Position>, GalleryError> {
        let requested = finite(x, y)?;
        let id = self.resolve_id(id)?;
        if !self.selection.move_to(&id, requested.x, requested.y) {
            return Ok(None);
        }
        Ok(self.selection.get(&id).map(PlacedArtwork::position))
    }

    /// Match a typed id against the ids actually in use
    ///
    /// Typed text always parses numeric ids as numbers, while a document may
    /// store `"101"` as a string. Exact matches win; otherwise an id on the
    /// wall or in the catalog with the same text form is used.
    fn resolve_id(&mut self, id: &ArtworkId) -> Result<ArtworkId, GalleryError> {
        if self.selection.contains(id) {
            return Ok(id.clone());
        }
        let catalog = self.store.load()?;
        if catalog.find_artwork(id).is_some() {
            return Ok(id.clone());
        }

        let typed = id.to_string();
        let matched = self
            .selection
            .items()
            .iter()
            .map(PlacedArtwork::id)
            .chain(catalog.artworks().iter().map(|a| &a.id))
            .find(|known| known.to_string() == typed);
        Ok(matched.unwrap_or(id).clone())
    }

    pub fn set_wall(&mut self, width: f64, height: f64) -> Result<(), GalleryError> {
        self.selection.set_wall(WallDimensions::new(width, height)?);
        Ok(())
    }

    pub fn auto_arrange(&mut self) {
        self.selection.auto_arrange(&self.settings.layout);
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.current_design = None;
    }

    pub fn save(&mut self, name: &str) -> Result<SavedDesign, GalleryError> {
        let wall = self.selection.wall();
        let design = designs::save_design(&mut self.store, name, &self.selection, Some(wall))?;
        self.current_design = Some(design.name.clone());
        Ok(design)
    }

    /// Restore a design by id or name
    pub fn load(&mut self, key: &str) -> Result<SavedDesign, GalleryError> {
        let catalog = self.store.load()?;
        let design = designs::load_design(catalog.designs(), key, &mut self.selection)?;
        self.current_design = Some(design.name.clone());
        Ok(design.clone())
    }

    pub fn apply_feedback(
        &mut self,
        reported: &[ReportedPlacement],
    ) -> Result<FeedbackOutcome, GalleryError> {
        let catalog = self.store.load()?;
        Ok(self.selection.apply_feedback(catalog.artworks(), reported))
    }
}

/// Wall coordinates must be real numbers; NaN or infinity cannot be stored
fn finite(x: f64, y: f64) -> Result<Position, GalleryError> {
    if x.is_finite() && y.is_finite() {
        Ok(Position::new(x, y))
    } else {
        Err(GalleryError::Validation(format!(
            "coordinates must be finite numbers, got ({x}, {y})"
        )))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::selection::BoundsPolicy;
    use std::fs;

    pub const DOCUMENT: &str = r##"{
  "artworks": [
    {"id": 1, "title": "Blue Hour", "artist": "Ana", "style": "Abstract",
     "price": 100, "width": 20, "height": 16, "frame_width": 1, "color": "#224488"},
    {"id": 2, "title": "Harbor at Dusk, Study No. 4", "artist": "Ben", "style": "Landscape",
     "price": 250, "width": 30, "height": 20, "frame_width": 2, "image_path": "images/harbor.jpg"},
    {"id": 3, "title": "Lines", "artist": "Cleo", "style": "Minimalist",
     "price": 75, "width": 12, "height": 12, "frame_width": 0.5, "color": "#111111"},
    {"id": 4, "title": "Meadow", "artist": "Dev", "style": "Landscape",
     "price": 180, "width": 24, "height": 18, "frame_width": 1.5, "color": "#44aa44"}
  ],
  "gallery_designs": []
}"##;

    pub fn start_session(dir: &tempfile::TempDir) -> Session {
        start_session_with(dir, DOCUMENT)
    }

    pub fn start_session_with(dir: &tempfile::TempDir, document: &str) -> Session {
        let path = dir.path().join("artwork_database.json");
        fs::write(&path, document).unwrap();
        let settings = Settings {
            database_path: path,
            ..Settings::default()
        };
        Session::start(settings).unwrap()
    }

    #[test]
    fn test_start_fails_without_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            database_path: dir.path().join("missing.json"),
            ..Settings::default()
        };
        assert!(matches!(Session::start(settings), Err(GalleryError::Load { .. })));
    }

    #[test]
    fn test_demo_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);

        assert!(session.add(&ArtworkId::Int(1)).unwrap());
        assert!(session.add(&ArtworkId::Int(2)).unwrap());
        assert!(!session.add(&ArtworkId::Int(1)).unwrap());

        let design = session.save("demo").unwrap();
        assert_eq!(design.total_cost, 350.0);
        assert_eq!(design.artworks.len(), 2);
        assert_eq!(design.wall_dimensions, Some(WallDimensions::default()));
        assert_eq!(session.current_design(), Some("demo"));
    }

    #[test]
    fn test_add_unknown_artwork_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);
        let result = session.add(&ArtworkId::Int(99));
        assert!(matches!(result, Err(GalleryError::NotFound { entity: "artwork", .. })));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_clear_then_load_restores() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);
        session.add(&ArtworkId::Int(3)).unwrap();
        session.add(&ArtworkId::Int(4)).unwrap();
        session.auto_arrange();
        let arranged = session.selection().snapshot();
        session.save("Study").unwrap();

        session.clear();
        assert_eq!(session.current_design(), None);

        session.load("Study").unwrap();
        assert_eq!(session.selection().snapshot(), arranged);
        assert_eq!(session.current_design(), Some("Study"));
    }

    #[test]
    fn test_load_missing_design_keeps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);
        session.add(&ArtworkId::Int(1)).unwrap();

        let result = session.load("missing");
        assert!(matches!(result, Err(GalleryError::NotFound { .. })));
        assert_eq!(session.selection().len(), 1);
    }

    #[test]
    fn test_drop_at_uses_wall_local_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);
        session.drop_at(&ArtworkId::Int(1), Position::new(15.0, -4.0)).unwrap();
        assert_eq!(
            session.selection().items()[0].position(),
            Position::new(15.0, 0.0)
        );
    }

    #[test]
    fn test_set_wall_validates_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);
        assert!(session.set_wall(150.0, 100.0).is_ok());
        assert!(matches!(
            session.set_wall(30.0, 100.0),
            Err(GalleryError::Validation(_))
        ));
        assert_eq!(session.selection().wall().width, 150.0);
    }

    #[test]
    fn test_bounds_policy_comes_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artwork_database.json");
        fs::write(&path, DOCUMENT).unwrap();
        let settings = Settings {
            database_path: path,
            bounds: BoundsPolicy::Unbounded,
            ..Settings::default()
        };
        let mut session = Session::start(settings).unwrap();
        session.add(&ArtworkId::Int(1)).unwrap();
        session.move_to(&ArtworkId::Int(1), 300.0, 300.0).unwrap();
        assert_eq!(
            session.selection().items()[0].position(),
            Position::new(300.0, 300.0)
        );
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);
        session.add(&ArtworkId::Int(1)).unwrap();
        let id = ArtworkId::Int(1);

        for (x, y) in [(f64::NAN, 5.0), (5.0, f64::INFINITY)] {
            assert!(matches!(session.move_to(&id, x, y), Err(GalleryError::Validation(_))));
            assert!(matches!(
                session.drop_at(&ArtworkId::Int(2), Position::new(x, y)),
                Err(GalleryError::Validation(_))
            ));
        }
        assert_eq!(session.selection().len(), 1);
        assert_eq!(session.selection().items()[0].position(), Position::new(0.0, 0.0));

        // The stored document still loads after a save
        session.save("finite").unwrap();
        let mut fresh = CatalogStore::new(dir.path().join("artwork_database.json"));
        assert_eq!(fresh.load().unwrap().designs().len(), 1);
    }

    #[test]
    fn test_typed_ids_match_text_ids() {
        let document = r#"{"artworks": [
            {"id": "101", "title": "T", "artist": "A", "style": "Modern",
             "price": 5, "width": 10, "height": 8}
        ]}"#;
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session_with(&dir, document);
        let typed: ArtworkId = "101".parse().unwrap();

        assert!(session.add(&typed).unwrap());
        assert_eq!(session.selection().items()[0].id(), &ArtworkId::Text("101".to_string()));
        assert_eq!(
            session.move_to(&typed, 4.0, 3.0).unwrap(),
            Some(Position::new(4.0, 3.0))
        );
        assert!(!session.add(&typed).unwrap());
        assert!(session.remove(&typed).unwrap());
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_move_off_wall_artwork_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = start_session(&dir);
        assert_eq!(session.move_to(&ArtworkId::Int(1), 1.0, 1.0).unwrap(), None);
    }
}
