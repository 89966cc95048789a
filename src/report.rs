//! Plain-text rendering of catalog entries, the wall, and saved designs

use std::fmt::Write;

use crate::constants::report::{DATE_PREFIX_CHARS, LABEL_TITLE_CHARS};
use crate::layout;
use crate::selection::Selection;
use crate::types::{ArtworkRecord, SavedDesign};

/// Whole amounts without decimals, anything else with cents
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}

/// Title cut down for compact labels
pub fn short_title(title: &str) -> String {
    if title.chars().count() > LABEL_TITLE_CHARS {
        let cut: String = title.chars().take(LABEL_TITLE_CHARS).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}

pub fn catalog_line(artwork: &ArtworkRecord) -> String {
    format!(
        "{}. {} - {} ({}, {}, {}\" x {}\", frame {}\")",
        artwork.id,
        artwork.title,
        format_amount(artwork.price),
        artwork.artist,
        artwork.style,
        artwork.width,
        artwork.height,
        artwork.frame_width,
    )
}

pub fn catalog_listing<'a>(artworks: impl IntoIterator<Item = &'a ArtworkRecord>) -> String {
    let mut out = String::new();
    for artwork in artworks {
        let _ = writeln!(out, "{}", catalog_line(artwork));
    }
    if out.is_empty() {
        out.push_str("No artworks match the current filters.\n");
    }
    out
}

pub fn selection_summary(selection: &Selection, design_name: Option<&str>) -> String {
    let wall = selection.wall();
    let mut out = String::new();
    let _ = writeln!(out, "Wall: {}\" x {}\"", wall.width, wall.height);
    if let Some(name) = design_name {
        let _ = writeln!(out, "Design: {name}");
    }

    if selection.is_empty() {
        out.push_str("The wall is empty. Add artworks from the catalog to start designing.\n");
        return out;
    }

    for item in selection.items() {
        let _ = writeln!(
            out,
            "  [{}] {} at ({}, {}) {}\" x {}\"",
            item.id(),
            short_title(&item.record.title),
            item.wall_x,
            item.wall_y,
            item.record.outer_width(),
            item.record.outer_height(),
        );
    }
    let _ = writeln!(
        out,
        "{} pieces, total cost {}",
        selection.len(),
        format_amount(selection.total_cost())
    );

    let overflow = layout::overflowing(selection.items(), wall);
    if !overflow.is_empty() {
        let ids: Vec<String> = overflow.iter().map(|id| id.to_string()).collect();
        let _ = writeln!(out, "Warning: extends past the wall: {}", ids.join(", "));
    }
    out
}

pub fn design_summary(design: &SavedDesign) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - {} ({} pieces)",
        design.name,
        format_amount(design.total_cost),
        design.artworks.len()
    );
    let created = design.created_date.to_string();
    let date: String = created.chars().take(DATE_PREFIX_CHARS).collect();
    let _ = writeln!(out, "  Created: {date}");
    if let Some(wall) = design.wall_dimensions {
        let _ = writeln!(out, "  Wall Size: {}\" x {}\"", wall.width, wall.height);
    }
    let titles: Vec<&str> = design.artworks.iter().map(|a| a.record.title.as_str()).collect();
    let _ = writeln!(out, "  Artworks: {}", titles.join(", "));
    let _ = writeln!(out, "  Id: {}", design.id);
    out
}

pub fn design_listing(designs: &[SavedDesign]) -> String {
    if designs.is_empty() {
        return "No saved designs yet.\n".to_string();
    }
    designs.iter().map(design_summary).collect()
}
