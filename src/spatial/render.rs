//! Tab separated text rendering of a grid's surface and content layers
//!
//! Each layer is printed under a `Level N:` heading with one tab-prefixed
//! entry per location and a line break after every `height` entries.

use std::fmt::Write;

use crate::io::configuration::{BLANK_SURFACE_MESSAGE, EMPTY_CONTENT_MESSAGE, EMPTY_GLYPH};
use crate::spatial::grid::Grid;
use crate::spatial::location::Scope;

/// Render the surface layer; blank glyphs print as `-`
pub fn surface<T>(grid: &Grid<T>) -> String {
    let Some(scope) = grid.scope() else {
        return format!("{BLANK_SURFACE_MESSAGE}\n");
    };

    render_layers("Grid Surface", scope, |layer, linear| {
        match grid.surface_array().get((layer, linear)) {
            Some(glyph) if !glyph.is_empty() => glyph.clone(),
            _ => EMPTY_GLYPH.to_string(),
        }
    })
}

/// Render the content layer
///
/// A location with one piece shows its name, a crowded location shows its
/// piece count and an empty location shows `-`.
pub fn content<T>(grid: &Grid<T>) -> String {
    let Some(scope) = grid.scope() else {
        return format!("{EMPTY_CONTENT_MESSAGE}\n");
    };

    render_layers("Grid Content", scope, |layer, linear| {
        match grid.content_array().get((layer, linear)).map(Vec::as_slice) {
            Some([only]) => grid
                .registry()
                .name_of(*only)
                .unwrap_or(EMPTY_GLYPH)
                .to_string(),
            Some(pieces) if pieces.len() > 1 => pieces.len().to_string(),
            _ => EMPTY_GLYPH.to_string(),
        }
    })
}

fn render_layers(
    title: &str,
    scope: Scope,
    mut entry: impl FnMut(usize, usize) -> String,
) -> String {
    let mut out = format!("\t{title}\n");
    for layer in 0..scope.layers {
        let _ = write!(out, "\n\tLevel {}:\n", layer + 1);
        for linear in 0..scope.layer_size() {
            let _ = write!(out, "\t{}", entry(layer, linear));
            if (linear + 1) % scope.height == 0 {
                out.push('\n');
            }
        }
    }
    out.push('\n');
    out
}
