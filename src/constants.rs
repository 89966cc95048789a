//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Configuration file locations
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "gallery-wall";

    /// Settings file name
    pub const FILENAME: &str = "config.json";

    /// Catalog document used when nothing else is configured
    pub const DEFAULT_DATABASE: &str = "artwork_database.json";
}

/// Catalog document keys
pub mod document {
    pub const ARTWORKS_KEY: &str = "artworks";
    pub const DESIGNS_KEY: &str = "gallery_designs";
}

/// Wall dimension defaults and limits (inches)
pub mod wall {
    pub const DEFAULT_WIDTH: f64 = 120.0;
    pub const DEFAULT_HEIGHT: f64 = 80.0;

    pub const MIN_WIDTH: f64 = 60.0;
    pub const MAX_WIDTH: f64 = 200.0;
    pub const MIN_HEIGHT: f64 = 40.0;
    pub const MAX_HEIGHT: f64 = 120.0;
}

/// Default positioning for newly added artworks
pub mod placement {
    /// Horizontal step of the diagonal cascade
    pub const CASCADE_STEP_X: f64 = 25.0;

    /// Vertical step of the diagonal cascade
    pub const CASCADE_STEP_Y: f64 = 15.0;
}

/// Fixed-pitch grid defaults
pub mod grid {
    pub const BASE_X: f64 = 20.0;
    pub const BASE_Y: f64 = 20.0;
    pub const PITCH_X: f64 = 150.0;
    pub const PITCH_Y: f64 = 150.0;
    pub const MAX_COLUMNS: usize = 3;
}

/// Plain-text report formatting
pub mod report {
    /// Titles longer than this are cut in compact labels
    pub const LABEL_TITLE_CHARS: usize = 15;

    /// Length of the date prefix shown for `created_date`
    pub const DATE_PREFIX_CHARS: usize = 10;

    /// Label shown for the catch-all style filter
    pub const ALL_STYLES: &str = "All";
}
