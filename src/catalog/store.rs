//! Catalog document storage
//!
//! A single JSON document holds the artwork catalog and the saved designs.
//! The document is read once per session and rewritten whole on every save.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::document::{ARTWORKS_KEY, DESIGNS_KEY};
use crate::error::{DocumentError, GalleryError};
use crate::types::{ArtworkId, ArtworkRecord, SavedDesign};

/// Parsed catalog document
/// Keeps the raw JSON object so unrelated keys survive a save untouched
#[derive(Debug, Clone)]
pub struct Catalog {
    document: Map<String, Value>,
    artworks: Vec<ArtworkRecord>,
    designs: Vec<SavedDesign>,
}

impl Catalog {
    /// Parse a catalog from document text
    pub fn parse(contents: &str) -> Result<Self, DocumentError> {
        let document = match serde_json::from_str::<Value>(contents)? {
            Value::Object(map) => map,
            _ => return Err(DocumentError::Shape("document root must be an object".to_string())),
        };

        let artworks = match document.get(ARTWORKS_KEY) {
            Some(value) => Vec::<ArtworkRecord>::deserialize(value)?,
            None => return Err(DocumentError::Shape(format!("missing '{ARTWORKS_KEY}' collection"))),
        };

        // A fresh document may not have any designs yet
        let designs = match document.get(DESIGNS_KEY) {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => Vec::<SavedDesign>::deserialize(value)?,
        };

        Ok(Self {
            document,
            artworks,
            designs,
        })
    }

    pub fn artworks(&self) -> &[ArtworkRecord] {
        &self.artworks
    }

    pub fn designs(&self) -> &[SavedDesign] {
        &self.designs
    }

    pub fn find_artwork(&self, id: &ArtworkId) -> Option<&ArtworkRecord> {
        self.artworks.iter().find(|a| &a.id == id)
    }

    /// Raw entry a stored design was parsed from
    fn stored_entry(&self, design: &SavedDesign) -> Option<&Value> {
        let index = self.designs.iter().position(|stored| stored == design)?;
        self.document.get(DESIGNS_KEY)?.as_array()?.get(index)
    }

    /// Document with `designs` in place of the stored design list
    /// Designs already on disk are copied from their raw entries, so fields
    /// this crate does not model are kept as written.
    fn with_designs(&self, designs: &[SavedDesign]) -> Result<Map<String, Value>, DocumentError> {
        let entries = designs
            .iter()
            .map(|design| match self.stored_entry(design) {
                Some(raw) => Ok(raw.clone()),
                None => serde_json::to_value(design),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut document = self.document.clone();
        document.insert(DESIGNS_KEY.to_string(), Value::Array(entries));
        Ok(document)
    }
}

/// Lazily loaded, session-cached handle to the catalog document
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    cache: Option<Catalog>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document on first use; later calls return the cached copy
    pub fn load(&mut self) -> Result<&Catalog, GalleryError> {
        let catalog = match self.cache.take() {
            Some(catalog) => catalog,
            None => {
                let contents = fs::read_to_string(&self.path)
                    .map_err(|e| GalleryError::load(&self.path, e))?;
                let catalog = Catalog::parse(&contents)
                    .map_err(|e| GalleryError::load(&self.path, e))?;
                info!(
                    path = %self.path.display(),
                    artworks = catalog.artworks.len(),
                    designs = catalog.designs.len(),
                    "Loaded catalog document"
                );
                catalog
            }
        };
        let catalog: &Catalog = self.cache.insert(catalog);
        Ok(catalog)
    }

    /// Overwrite the stored design list with `designs`
    /// All other document content is written back verbatim. The write is
    /// all-or-nothing and the cached list only changes once it succeeds.
    pub fn save(&mut self, designs: Vec<SavedDesign>) -> Result<(), GalleryError> {
        self.load()?;
        let Some(catalog) = self.cache.as_mut() else {
            return Err(GalleryError::save(
                &self.path,
                DocumentError::Shape("catalog not loaded".to_string()),
            ));
        };

        let document = catalog
            .with_designs(&designs)
            .map_err(|e| GalleryError::save(&self.path, e))?;
        let contents = serde_json::to_string_pretty(&document)
            .map_err(|e| GalleryError::save(&self.path, e))?;
        write_atomically(&self.path, &contents).map_err(|e| GalleryError::save(&self.path, e))?;

        info!(path = %self.path.display(), designs = designs.len(), "Saved design list");
        catalog.document = document;
        catalog.designs = designs;
        Ok(())
    }
}

/// Write to a sibling temp file, then rename it over the target
fn write_atomically(path: &Path, contents: &str) -> Result<(), DocumentError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    debug!(tmp = %tmp.path().display(), target = %path.display(), "Renaming temp document into place");
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
