//! Serializable grid state
//!
//! A snapshot captures everything needed to rebuild a grid exactly: its uid,
//! scope, cell, both layers and every piece with its handle and slot.
//! Content lists are stored by piece name so the format stays readable.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::geometry::cell::Cell;
use crate::io::error::{GridError, Result, invalid_snapshot};
use crate::spatial::grid::Grid;
use crate::spatial::location::{Location, Scope};
use crate::spatial::registry::{PieceId, Placement, Registry};

/// One placed piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceSnapshot<T> {
    /// Unique piece name
    pub name: String,
    /// Handle issued when the piece was placed
    pub id: PieceId,
    /// Location holding the piece
    pub location: Location,
    /// Position within the location's content list
    pub slot: usize,
    /// The placed object
    pub object: T,
}

/// Complete, lossless state of a created grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot<T> {
    /// Grid identifier
    pub uid: String,
    /// Grid extent
    pub scope: Scope,
    /// Attached cell, if any
    pub cell: Option<Cell>,
    /// Surface glyphs per layer, in linear order
    pub surface: Vec<Vec<String>>,
    /// Piece names per location per layer, in slot order
    pub content: Vec<Vec<Vec<String>>>,
    /// Every placed piece
    pub pieces: Vec<PieceSnapshot<T>>,
    /// Next handle the grid will issue
    pub next_id: u64,
}

impl<T: Clone> Grid<T> {
    /// Capture the grid's full state
    ///
    /// # Errors
    ///
    /// Returns `NotCreated` if the grid has no scope yet
    pub fn snapshot(&self) -> Result<GridSnapshot<T>> {
        let scope = self.scope().ok_or(GridError::NotCreated {
            operation: "snapshot the grid",
        })?;

        let surface = self
            .surface_array()
            .rows()
            .into_iter()
            .map(|layer| layer.to_vec())
            .collect();

        let content = self
            .content_array()
            .rows()
            .into_iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|ids| {
                        ids.iter()
                            .filter_map(|&id| self.registry().name_of(id).map(str::to_string))
                            .collect()
                    })
                    .collect()
            })
            .collect();

        let pieces = self
            .registry()
            .iter()
            .map(|(name, id, object, placement)| PieceSnapshot {
                name: name.to_string(),
                id,
                location: placement.location,
                slot: placement.slot,
                object: object.clone(),
            })
            .collect();

        Ok(GridSnapshot {
            uid: self.uid().to_string(),
            scope,
            cell: self.cell().cloned(),
            surface,
            content,
            pieces,
            next_id: self.registry().next_id(),
        })
    }
}

impl<T: PartialEq> Grid<T> {
    /// Rebuild a grid from a snapshot
    ///
    /// # Errors
    ///
    /// Returns `InvalidSnapshot` if the layers do not match the scope, a
    /// piece name or object repeats, a piece lies outside the scope, the
    /// content lists disagree with the recorded slots, or the handle counter
    /// is already exhausted
    pub fn from_snapshot(snapshot: GridSnapshot<T>) -> Result<Self> {
        let GridSnapshot {
            uid,
            scope,
            cell,
            surface,
            content,
            pieces,
            next_id,
        } = snapshot;

        let checked = Scope::new(
            i64::try_from(scope.width).unwrap_or(0),
            i64::try_from(scope.height).unwrap_or(0),
            i64::try_from(scope.layers).unwrap_or(0),
        )
        .map_err(|err| invalid_snapshot(&err))?;

        let shape = (checked.layers, checked.layer_size());
        let surface = Array2::from_shape_vec(shape, flatten(surface, shape, "surface")?)
            .map_err(|err| invalid_snapshot(&err))?;
        let names = flatten(content, shape, "content")?;
        let placed: usize = names.iter().map(Vec::len).sum();
        if placed != pieces.len() {
            return Err(invalid_snapshot(&format!(
                "content lists hold {placed} piece(s) but {} are registered",
                pieces.len()
            )));
        }

        let mut registry = Registry::new();
        let mut ids = HashMap::new();
        let mut seen_ids = HashSet::new();
        for piece in pieces {
            if registry.contains(&piece.name) {
                return Err(invalid_snapshot(&format!("duplicate piece '{}'", piece.name)));
            }
            if !seen_ids.insert(piece.id) {
                return Err(invalid_snapshot(&format!("duplicate handle {}", piece.id)));
            }
            if let Some(existing) = registry.find_object(&piece.object) {
                return Err(invalid_snapshot(&format!(
                    "piece '{}' repeats the object of '{existing}'",
                    piece.name
                )));
            }

            let (layer, linear) = checked
                .index(piece.location)
                .map_err(|err| invalid_snapshot(&err))?;
            let at_slot = names
                .get(layer * checked.layer_size() + linear)
                .and_then(|list| list.get(piece.slot));
            if at_slot != Some(&piece.name) {
                return Err(invalid_snapshot(&format!(
                    "piece '{}' is not at slot {} of {}",
                    piece.name, piece.slot, piece.location
                )));
            }

            let id = registry
                .claim(Some(piece.id))
                .map_err(|err| invalid_snapshot(&err))?;
            ids.insert(piece.name.clone(), id);
            registry.insert(
                piece.name,
                piece.object,
                Placement {
                    location: piece.location,
                    slot: piece.slot,
                },
                id,
            );
        }

        let lists = names
            .into_iter()
            .map(|list| {
                list.iter()
                    .map(|name| {
                        ids.get(name).copied().ok_or_else(|| {
                            invalid_snapshot(&format!("content names unknown piece '{name}'"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let content =
            Array2::from_shape_vec(shape, lists).map_err(|err| invalid_snapshot(&err))?;

        if next_id == u64::MAX {
            return Err(invalid_snapshot(&"next handle leaves no handles to issue"));
        }
        if next_id < registry.next_id() {
            return Err(invalid_snapshot(&format!(
                "next handle {next_id} is already in use"
            )));
        }
        registry.reserve_ids(next_id);

        Ok(Self::from_parts(uid, cell, checked, surface, content, registry))
    }
}

/// Flatten per-layer vectors after checking they match `(layers, layer_size)`
fn flatten<V>(layers: Vec<Vec<V>>, shape: (usize, usize), what: &str) -> Result<Vec<V>> {
    if layers.len() != shape.0 {
        return Err(invalid_snapshot(&format!(
            "{what} has {} layer(s), expected {}",
            layers.len(),
            shape.0
        )));
    }
    if let Some(layer) = layers.iter().position(|layer| layer.len() != shape.1) {
        return Err(invalid_snapshot(&format!(
            "{what} layer {} does not hold {} location(s)",
            layer + 1,
            shape.1
        )));
    }
    Ok(layers.into_iter().flatten().collect())
}
