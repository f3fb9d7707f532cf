//! Name, handle and placement bookkeeping for pieces on a grid

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::io::error::{GridError, Result};
use crate::spatial::location::Location;

/// Handle assigned to a piece when it is placed
///
/// Handles are stored in the content lists and map back to piece names, so
/// the grid never depends on object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u64);

impl PieceId {
    /// Raw handle value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a piece sits: its location and its slot in that location's content list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Grid location holding the piece
    pub location: Location,
    /// Position within the location's content list
    pub slot: usize,
}

/// Registries keyed by piece name plus the reverse handle lookup
#[derive(Debug, Clone)]
pub struct Registry<T> {
    objs: BTreeMap<String, T>,
    locations: BTreeMap<String, Placement>,
    handles: BTreeMap<String, PieceId>,
    idmap: HashMap<PieceId, String>,
    next_id: u64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            objs: BTreeMap::new(),
            locations: BTreeMap::new(),
            handles: BTreeMap::new(),
            idmap: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of registered pieces
    pub fn len(&self) -> usize {
        self.objs.len()
    }

    /// Whether no pieces are registered
    pub fn is_empty(&self) -> bool {
        self.objs.is_empty()
    }

    /// Whether a piece with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.objs.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objs.keys().map(String::as_str)
    }

    /// Object registered under a name
    pub fn object(&self, name: &str) -> Option<&T> {
        self.objs.get(name)
    }

    /// Placement registered under a name
    pub fn placement(&self, name: &str) -> Option<Placement> {
        self.locations.get(name).copied()
    }

    /// Handle registered under a name
    pub fn id(&self, name: &str) -> Option<PieceId> {
        self.handles.get(name).copied()
    }

    /// Name a handle was issued to
    pub fn name_of(&self, id: PieceId) -> Option<&str> {
        self.idmap.get(&id).map(String::as_str)
    }

    /// Handle value the next insertion without an explicit handle receives
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Make sure freshly issued handles start at `next_id` or later
    pub fn reserve_ids(&mut self, next_id: u64) {
        self.next_id = self.next_id.max(next_id);
    }

    /// Shift the slot of the piece holding `id` by `delta`
    pub fn shift_slot(&mut self, id: PieceId, delta: isize) {
        let Some(name) = self.idmap.get(&id) else {
            return;
        };
        if let Some(placement) = self.locations.get_mut(name) {
            placement.slot = placement.slot.saturating_add_signed(delta);
        }
    }

    /// Claim `id` when given, otherwise issue a fresh handle
    ///
    /// Moves the counter past the claimed handle.
    ///
    /// # Errors
    ///
    /// Returns `HandlesExhausted` if no handle after the claimed one remains
    pub fn claim(&mut self, id: Option<PieceId>) -> Result<PieceId> {
        let id = id.unwrap_or(PieceId(self.next_id));
        let after = id.0.checked_add(1).ok_or(GridError::HandlesExhausted)?;
        self.next_id = self.next_id.max(after);
        Ok(id)
    }

    /// Register a piece under a claimed handle
    pub fn insert(&mut self, name: String, object: T, placement: Placement, id: PieceId) {
        self.idmap.insert(id, name.clone());
        self.handles.insert(name.clone(), id);
        self.locations.insert(name.clone(), placement);
        self.objs.insert(name, object);
    }

    /// Remove every entry for a piece
    pub fn remove(&mut self, name: &str) -> Option<(PieceId, T, Placement)> {
        let object = self.objs.remove(name)?;
        let placement = self.locations.remove(name)?;
        let id = self.handles.remove(name)?;
        self.idmap.remove(&id);
        Some((id, object, placement))
    }

    /// Forget every piece; handles keep counting up
    pub fn clear(&mut self) {
        self.objs.clear();
        self.locations.clear();
        self.handles.clear();
        self.idmap.clear();
    }

    /// Iterate `(name, handle, object, placement)` in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, PieceId, &T, Placement)> {
        self.objs.iter().filter_map(|(name, object)| {
            let id = self.handles.get(name)?;
            let placement = self.locations.get(name)?;
            Some((name.as_str(), *id, object, *placement))
        })
    }
}

impl<T: PartialEq> Registry<T> {
    /// Name of an already registered object equal to `object`
    pub fn find_object(&self, object: &T) -> Option<&str> {
        self.objs
            .iter()
            .find(|(_, existing)| *existing == object)
            .map(|(name, _)| name.as_str())
    }
}
