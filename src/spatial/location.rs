//! Grid coordinates and the mapping from locations to storage indices
//!
//! Locations are 1-based `(x, y, z)` triples. Within a layer cells are stored
//! row-major by `x`, so `linear = (x - 1) * height + (y - 1)` and
//! `layer = z - 1`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::io::configuration::DEFAULT_LAYER;
use crate::io::error::{GridError, Result, invalid_argument};

/// A 1-based grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Column, `1..=width`
    pub x: i64,
    /// Row, `1..=height`
    pub y: i64,
    /// Layer, `1..=layers`
    pub z: i64,
}

impl Location {
    /// Create a location on an explicit layer
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Create a location on the first layer
    pub const fn flat(x: i64, y: i64) -> Self {
        Self::new(x, y, DEFAULT_LAYER)
    }
}

impl From<(i64, i64)> for Location {
    fn from((x, y): (i64, i64)) -> Self {
        Self::flat(x, y)
    }
}

impl From<(i64, i64, i64)> for Location {
    fn from((x, y, z): (i64, i64, i64)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl FromStr for Location {
    type Err = GridError;

    /// Parse `X,Y` or `X,Y,Z`
    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| invalid_argument("location", &s, &err))?;

        match parts.as_slice() {
            [x, y] => Ok(Self::flat(*x, *y)),
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(invalid_argument(
                "location",
                &s,
                &"expected X,Y or X,Y,Z",
            )),
        }
    }
}

/// Extent of a created grid: width, height and number of layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Locations along x
    pub width: usize,
    /// Locations along y
    pub height: usize,
    /// Number of stacked layers
    pub layers: usize,
}

impl Scope {
    /// Validate requested dimensions
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if any axis is below 1 or the total
    /// location count overflows
    pub fn new(width: i64, height: i64, layers: i64) -> Result<Self> {
        let invalid = || GridError::InvalidDimensions {
            width,
            height,
            layers,
        };

        let (Ok(w), Ok(h), Ok(l)) = (
            usize::try_from(width),
            usize::try_from(height),
            usize::try_from(layers),
        ) else {
            return Err(invalid());
        };

        let size = w.checked_mul(h).and_then(|area| area.checked_mul(l));
        match size {
            Some(size) if size >= 1 => Ok(Self {
                width: w,
                height: h,
                layers: l,
            }),
            _ => Err(invalid()),
        }
    }

    /// Locations per layer
    pub const fn layer_size(&self) -> usize {
        self.width * self.height
    }

    /// Total number of locations
    pub const fn size(&self) -> usize {
        if self.layers > 1 {
            self.width * self.height * self.layers
        } else {
            self.width * self.height
        }
    }

    /// 2 for a single layer, 3 otherwise
    pub const fn dimensions(&self) -> usize {
        if self.layers > 1 { 3 } else { 2 }
    }

    /// Whether a location lies inside the scope
    pub fn contains(&self, location: Location) -> bool {
        self.index(location).is_ok()
    }

    /// Convert a location to `(layer, linear)` storage indices
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if any coordinate is below 1 or above the scope
    pub fn index(&self, location: Location) -> Result<(usize, usize)> {
        let out_of_range = || GridError::OutOfRange {
            location,
            scope: *self,
        };

        let axis = |value: i64, limit: usize| {
            usize::try_from(value)
                .ok()
                .filter(|&v| (1..=limit).contains(&v))
                .map(|v| v - 1)
        };

        match (
            axis(location.x, self.width),
            axis(location.y, self.height),
            axis(location.z, self.layers),
        ) {
            (Some(x), Some(y), Some(z)) => Ok((z, x * self.height + y)),
            _ => Err(out_of_range()),
        }
    }

    /// Convert `(layer, linear)` storage indices back to a location
    ///
    /// Returns `None` when the indices fall outside the scope.
    pub fn location(&self, layer: usize, linear: usize) -> Option<Location> {
        if layer >= self.layers || linear >= self.layer_size() {
            return None;
        }
        let x = i64::try_from(linear / self.height + 1).ok()?;
        let y = i64::try_from(linear % self.height + 1).ok()?;
        let z = i64::try_from(layer + 1).ok()?;
        Some(Location::new(x, y, z))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.layers)
    }
}
