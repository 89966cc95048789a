use std::path::PathBuf;

/// Why the catalog document could not be read or written
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Shape(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// Catalog document missing or corrupt. Fatal at startup.
    #[error("Failed to load catalog from {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// Storage unwritable. The previous document is left intact.
    #[error("Failed to save designs to {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },
}

impl GalleryError {
    pub fn load(path: impl Into<PathBuf>, source: impl Into<DocumentError>) -> Self {
        GalleryError::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn save(path: impl Into<PathBuf>, source: impl Into<DocumentError>) -> Self {
        GalleryError::Save {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn design_not_found(key: &str) -> Self {
        GalleryError::NotFound {
            entity: "design",
            key: key.to_string(),
        }
    }

    pub fn artwork_not_found(key: impl ToString) -> Self {
        GalleryError::NotFound {
            entity: "artwork",
            key: key.to_string(),
        }
    }
}
