//! Grid of named game pieces across two or three dimensions
//!
//! A grid keeps three parallel structures sized to its scope: a decorative
//! surface with one glyph per location, a content layer holding an ordered
//! list of piece handles per location, and registries mapping piece names to
//! objects, placements and handles. Every mutation keeps a piece's recorded
//! slot equal to its position in the content list.

use std::fmt;

use log::{debug, info, warn};
use ndarray::Array2;
use uuid::Uuid;

use crate::geometry::cell::Cell;
use crate::io::configuration::CELLLESS_CAPACITY;
use crate::io::error::{GridError, Result};
use crate::spatial::location::{Location, Scope};
use crate::spatial::registry::{PieceId, Placement, Registry};
use crate::spatial::render;

/// Surface glyph and occupants of a single location
#[derive(Debug, Clone, PartialEq)]
pub struct CellView<'a, T> {
    /// Decorative surface glyph
    pub surface: &'a str,
    /// Occupants in slot order as `(name, object)`
    pub content: Vec<(&'a str, &'a T)>,
}

impl<T> CellView<'_, T> {
    /// Whether the location holds no pieces
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Names of the occupants in slot order
    pub fn names(&self) -> Vec<&str> {
        self.content.iter().map(|(name, _)| *name).collect()
    }
}

/// Tracks the location of named objects on a grid
///
/// Objects are opaque to the grid; they are compared with `PartialEq` to
/// keep any one object from being placed twice.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    uid: String,
    cell: Option<Cell>,
    scope: Option<Scope>,
    /// Surface glyphs indexed by (`layer`, `linear`)
    surface: Array2<String>,
    /// Piece handles indexed by (`layer`, `linear`)
    content: Array2<Vec<PieceId>>,
    registry: Registry<T>,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Grid<T> {
    /// Create an uninitialized grid without a cell
    ///
    /// Each location of a cell-less grid holds at most one piece.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create an uninitialized grid whose locations follow `cell`
    pub fn with_cell(cell: Cell) -> Self {
        Self::build(Some(cell))
    }

    fn build(cell: Option<Cell>) -> Self {
        Self {
            uid: Uuid::new_v4().simple().to_string(),
            cell,
            scope: None,
            surface: Array2::default((0, 0)),
            content: Array2::default((0, 0)),
            registry: Registry::new(),
        }
    }

    pub(crate) fn from_parts(
        uid: String,
        cell: Option<Cell>,
        scope: Scope,
        surface: Array2<String>,
        content: Array2<Vec<PieceId>>,
        registry: Registry<T>,
    ) -> Self {
        Self {
            uid,
            cell,
            scope: Some(scope),
            surface,
            content,
            registry,
        }
    }

    /// Process-unique identifier of this grid
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Attached cell, if any
    pub const fn cell(&self) -> Option<&Cell> {
        self.cell.as_ref()
    }

    /// Mutable access to the attached cell
    pub const fn cell_mut(&mut self) -> Option<&mut Cell> {
        self.cell.as_mut()
    }

    /// Scope fixed by the last successful `create`
    pub const fn scope(&self) -> Option<Scope> {
        self.scope
    }

    /// Registries of the pieces on the grid
    pub const fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    fn ready(&self, operation: &'static str) -> Result<Scope> {
        self.scope.ok_or(GridError::NotCreated { operation })
    }

    fn empty_icon(&self) -> String {
        self.cell
            .as_ref()
            .map_or_else(String::new, |cell| cell.icon().to_string())
    }

    /// Pieces a single location may hold, `None` when unlimited
    pub fn capacity(&self) -> Option<usize> {
        match &self.cell {
            Some(cell) => cell.capacity(),
            None => Some(CELLLESS_CAPACITY),
        }
    }

    /// Create (or overwrite) the grid; `layers == 1` gives a two dimensional grid
    ///
    /// Allocates the surface, filled with the cell's icon, and empty content
    /// for every location, and forgets any previously placed pieces.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if an axis is below 1; the grid is left
    /// unchanged
    pub fn create(&mut self, width: i64, height: i64, layers: i64) -> Result<()> {
        let scope = Scope::new(width, height, layers).inspect_err(|err| {
            warn!("[Grid {}] Creation failed: {err}", self.uid);
        })?;

        self.allocate(scope);
        self.registry.clear();
        info!(
            "[Grid {}] Created a new grid with a size of {} by {} by {}",
            self.uid, scope.width, scope.height, scope.layers
        );
        Ok(())
    }

    /// Remove every piece and reset the surface, keeping the scope
    ///
    /// # Errors
    ///
    /// Returns `NotCreated` if the grid has no scope yet
    pub fn clear(&mut self) -> Result<()> {
        let scope = self.ready("clear the grid")?;
        self.allocate(scope);
        self.registry.clear();
        info!("[Grid {}] Cleared all content", self.uid);
        Ok(())
    }

    fn allocate(&mut self, scope: Scope) {
        let shape = (scope.layers, scope.layer_size());
        self.surface = Array2::from_elem(shape, self.empty_icon());
        self.content = Array2::from_elem(shape, Vec::new());
        self.scope = Some(scope);
    }

    /// Convert a location to `(layer, linear)` storage indices
    ///
    /// # Errors
    ///
    /// Returns `NotCreated` before `create` and `OutOfRange` for locations
    /// outside the scope
    pub fn index(&self, location: impl Into<Location>) -> Result<(usize, usize)> {
        self.ready("index a location")?.index(location.into())
    }

    /// Surface glyph and occupants at a location
    ///
    /// # Errors
    ///
    /// Returns `NotCreated` or `OutOfRange`
    pub fn get_cell(&self, location: impl Into<Location>) -> Result<CellView<'_, T>> {
        let index = self.index(location)?;
        let surface = self.surface.get(index).map_or("", String::as_str);
        let content = self
            .content
            .get(index)
            .map(|ids| {
                ids.iter()
                    .filter_map(|&id| {
                        let name = self.registry.name_of(id)?;
                        Some((name, self.registry.object(name)?))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(CellView { surface, content })
    }

    /// Number of pieces at a location
    ///
    /// # Errors
    ///
    /// Returns `NotCreated` or `OutOfRange`
    pub fn occupants(&self, location: impl Into<Location>) -> Result<usize> {
        let index = self.index(location)?;
        Ok(self.content.get(index).map_or(0, Vec::len))
    }

    /// Current location of a piece
    ///
    /// # Errors
    ///
    /// Returns `PieceNotFound` if no piece has this name
    pub fn get_coordinates(&self, name: &str) -> Result<Location> {
        self.placement(name).map(|placement| placement.location)
    }

    /// Location and slot of a piece
    ///
    /// # Errors
    ///
    /// Returns `PieceNotFound` if no piece has this name
    pub fn placement(&self, name: &str) -> Result<Placement> {
        self.registry.placement(name).ok_or_else(|| {
            debug!("[Grid {}] Object {name} does not exist on grid", self.uid);
            GridError::PieceNotFound {
                name: name.to_string(),
            }
        })
    }

    /// Slot of a piece within its location's content list
    ///
    /// # Errors
    ///
    /// Returns `PieceNotFound` if no piece has this name
    pub fn slot(&self, name: &str) -> Result<usize> {
        self.placement(name).map(|placement| placement.slot)
    }

    /// Handle issued to a piece
    ///
    /// # Errors
    ///
    /// Returns `PieceNotFound` if no piece has this name
    pub fn piece_id(&self, name: &str) -> Result<PieceId> {
        self.registry
            .id(name)
            .ok_or_else(|| GridError::PieceNotFound {
                name: name.to_string(),
            })
    }

    /// Object placed under a name
    ///
    /// # Errors
    ///
    /// Returns `PieceNotFound` if no piece has this name
    pub fn piece(&self, name: &str) -> Result<&T> {
        self.registry
            .object(name)
            .ok_or_else(|| GridError::PieceNotFound {
                name: name.to_string(),
            })
    }

    /// Whether a piece with this name is on the grid
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Names of every piece, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// Number of pieces on the grid
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the grid holds no pieces
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Overwrite the surface glyph at a location
    ///
    /// The surface is decorative and independent of the pieces placed there.
    ///
    /// # Errors
    ///
    /// Returns `NotCreated` or `OutOfRange`
    pub fn paint(&mut self, location: impl Into<Location>, glyph: impl Into<String>) -> Result<()> {
        let location = location.into();
        let index = self.index(location).inspect_err(|err| {
            warn!("[Grid {}] Unable to paint: {err}", self.uid);
        })?;
        if let Some(slot) = self.surface.get_mut(index) {
            *slot = glyph.into();
        }
        info!("[Grid {}] Set a surface cell at location {location}", self.uid);
        Ok(())
    }

    /// Remove a piece and return its object
    ///
    /// Every piece in a later slot of the same location moves down one slot.
    ///
    /// # Errors
    ///
    /// Returns `PieceNotFound` for an unknown name, or `NotCreated` /
    /// `OutOfRange` if the recorded location no longer fits the grid
    pub fn delete(&mut self, name: &str) -> Result<T> {
        let (_, object, _) = self.detach(name).inspect_err(|err| {
            warn!("[Grid {}] Unable to delete piece: {err}", self.uid);
        })?;
        info!("[Grid {}] Deleted game piece {name}", self.uid);
        Ok(object)
    }

    fn detach(&mut self, name: &str) -> Result<(PieceId, T, Placement)> {
        let placement = self.placement(name)?;
        let index = self.index(placement.location)?;
        let out_of_range = self.out_of_range(placement.location);

        let Some(list) = self.content.get_mut(index) else {
            return Err(out_of_range);
        };
        if placement.slot >= list.len() {
            return Err(out_of_range);
        }
        list.remove(placement.slot);
        for &later in list.iter().skip(placement.slot) {
            self.registry.shift_slot(later, -1);
        }

        self.registry
            .remove(name)
            .ok_or_else(|| GridError::PieceNotFound {
                name: name.to_string(),
            })
    }

    /// Put a removed piece back at its original slot
    ///
    /// Only reached when `attach` rejects a move the room check accepted,
    /// which needs an object whose equality changed after it was placed.
    fn reinsert(&mut self, id: PieceId, object: T, name: String, placement: Placement) -> Result<()> {
        let index = self.index(placement.location)?;
        let out_of_range = self.out_of_range(placement.location);
        let Some(list) = self.content.get_mut(index) else {
            return Err(out_of_range);
        };
        let slot = placement.slot.min(list.len());
        for &later in list.iter().skip(slot) {
            self.registry.shift_slot(later, 1);
        }
        list.insert(slot, id);
        self.registry.insert(
            name,
            object,
            Placement {
                location: placement.location,
                slot,
            },
            id,
        );
        Ok(())
    }

    fn out_of_range(&self, location: Location) -> GridError {
        GridError::OutOfRange {
            location,
            scope: self.scope.unwrap_or(Scope {
                width: 0,
                height: 0,
                layers: 0,
            }),
        }
    }

    /// Check that a location has room for one more piece
    ///
    /// `leaving` names a piece already at the location that is about to go.
    fn ensure_room(&self, location: Location, leaving: Option<&str>) -> Result<()> {
        let Some(capacity) = self.capacity() else {
            return Ok(());
        };
        let mut occupied = self.occupants(location)?;
        if let Some(name) = leaving {
            if self.registry.placement(name).map(|p| p.location) == Some(location) {
                occupied = occupied.saturating_sub(1);
            }
        }
        if occupied >= capacity {
            return Err(GridError::CellFull { location, capacity });
        }
        Ok(())
    }

    /// Total area covered by the grid's locations
    ///
    /// # Errors
    ///
    /// Returns `NoCell` without a cell and the cell's formula errors otherwise
    pub fn area(&self) -> Result<f64> {
        let cell = self.cell.as_ref().ok_or(GridError::NoCell {
            operation: "calculate the grid area",
        })?;
        Ok(cell.area()? * self.size() as f64)
    }

    /// Total volume of a layered grid, 0 for a single layer
    ///
    /// # Errors
    ///
    /// Returns `NoCell` without a cell and the cell's formula errors otherwise
    pub fn volume(&self) -> Result<f64> {
        let cell = self.cell.as_ref().ok_or(GridError::NoCell {
            operation: "calculate the grid volume",
        })?;
        if self.layers() > 1 {
            Ok(cell.volume()? * self.size() as f64)
        } else {
            Ok(0.0)
        }
    }

    /// 2 for a single layer, 3 for a layered grid, 0 before `create`
    pub fn dimensions(&self) -> usize {
        self.scope.map_or(0, |scope| scope.dimensions())
    }

    /// Number of layers, 0 before `create`
    pub fn layers(&self) -> usize {
        self.scope.map_or(0, |scope| scope.layers)
    }

    /// Locations per layer, 0 before `create`
    pub fn layer_size(&self) -> usize {
        self.scope.map_or(0, |scope| scope.layer_size())
    }

    /// Total number of locations, 0 before `create`
    pub fn size(&self) -> usize {
        self.scope.map_or(0, |scope| scope.size())
    }

    /// Text rendering of the surface layer
    pub fn print_surface(&self) -> String {
        render::surface(self)
    }

    /// Text rendering of the content layer
    pub fn print_content(&self) -> String {
        render::content(self)
    }

    pub(crate) const fn surface_array(&self) -> &Array2<String> {
        &self.surface
    }

    pub(crate) const fn content_array(&self) -> &Array2<Vec<PieceId>> {
        &self.content
    }
}

impl<T: PartialEq> Grid<T> {
    /// Place an object at a location under a unique name
    ///
    /// Without a cell every location holds a single piece; with a cell the
    /// cell's capacity applies. Returns the name the piece was placed under.
    ///
    /// # Errors
    ///
    /// Returns `NotCreated`, `OutOfRange`, `DuplicateObject`,
    /// `DuplicateName`, `CellFull` or `HandlesExhausted`
    pub fn add(
        &mut self,
        location: impl Into<Location>,
        object: T,
        name: impl Into<String>,
    ) -> Result<String> {
        let name = name.into();
        let location = location.into();
        match self.attach(location, object, name.clone(), None) {
            Ok(_) => {
                info!(
                    "[Grid {}] Added object {name} at location {location}",
                    self.uid
                );
                Ok(name)
            }
            Err((err, _)) => {
                warn!("[Grid {}] Unable to add {name}: {err}", self.uid);
                Err(err)
            }
        }
    }

    fn attach(
        &mut self,
        location: Location,
        object: T,
        name: String,
        id: Option<PieceId>,
    ) -> std::result::Result<PieceId, (GridError, T)> {
        let index = match self.index(location) {
            Ok(index) => index,
            Err(err) => return Err((err, object)),
        };
        if let Some(existing) = self.registry.find_object(&object) {
            let err = GridError::DuplicateObject {
                existing: existing.to_string(),
            };
            return Err((err, object));
        }
        if self.registry.contains(&name) {
            return Err((GridError::DuplicateName { name }, object));
        }
        if let Err(err) = self.ensure_room(location, None) {
            return Err((err, object));
        }

        let out_of_range = self.out_of_range(location);
        let Some(list) = self.content.get_mut(index) else {
            return Err((out_of_range, object));
        };
        let id = match self.registry.claim(id) {
            Ok(id) => id,
            Err(err) => return Err((err, object)),
        };
        let slot = list.len();
        self.registry.insert(name, object, Placement { location, slot }, id);
        list.push(id);
        Ok(id)
    }

    /// Move a piece to a new location
    ///
    /// The destination is checked before the piece is lifted, and if placing
    /// it still fails the piece is restored at its original slot. The piece
    /// keeps its handle and is appended to the destination's content list.
    ///
    /// # Errors
    ///
    /// Returns `PieceNotFound`, `NotCreated`, `OutOfRange` or `CellFull`
    pub fn move_piece(&mut self, name: &str, location: impl Into<Location>) -> Result<()> {
        let location = location.into();
        info!("[Grid {}] Attempting to move object {name}", self.uid);

        let checked = self
            .placement(name)
            .and_then(|_| self.index(location))
            .and_then(|_| self.ensure_room(location, Some(name)));
        if let Err(err) = checked {
            warn!(
                "[Grid {}] Unable to move {name} to location {location}: {err}",
                self.uid
            );
            return Err(err);
        }

        let (id, object, origin) = self.detach(name)?;
        match self.attach(location, object, name.to_string(), Some(id)) {
            Ok(_) => {
                info!(
                    "[Grid {}] Moved object {name} to location {location}",
                    self.uid
                );
                Ok(())
            }
            Err((err, object)) => {
                warn!(
                    "[Grid {}] Unable to move {name} to location {location}, restoring it: {err}",
                    self.uid
                );
                self.reinsert(id, object, name.to_string(), origin)?;
                Err(err)
            }
        }
    }
}

impl<T> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print_surface())?;
        f.write_str(&self.print_content())
    }
}
