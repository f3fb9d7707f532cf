//! Cell geometry descriptor with registered measurement formulas
//!
//! A cell describes the shape of every location on a grid. Derived
//! properties such as area and volume are computed on demand from the
//! registered formulas and the current measurement set, so changing a single
//! side length updates every property that depends on it.

use std::collections::BTreeMap;

use log::{debug, error};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::geometry::formula::{Formula, Measurement, Strategy};
use crate::io::configuration::UNLIMITED_OCCUPANTS;
use crate::io::error::{GridError, Result};

/// Shape and capacity descriptor shared by every location of a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    shape: String,
    sides: u32,
    max_objs: i64,
    icon: String,
    formulas: BTreeMap<Measurement, Formula>,
    measurements: BTreeMap<String, i64>,
}

impl Cell {
    /// Create a cell with no formulas, no measurements and unlimited occupancy
    pub fn new(shape: impl Into<String>, sides: u32) -> Self {
        Self {
            shape: shape.into(),
            sides,
            max_objs: UNLIMITED_OCCUPANTS,
            icon: String::new(),
            formulas: BTreeMap::new(),
            measurements: BTreeMap::new(),
        }
    }

    /// Set the occupancy cap; zero or negative means unlimited
    #[must_use]
    pub const fn with_max_objs(mut self, max_objs: i64) -> Self {
        self.max_objs = max_objs;
        self
    }

    /// Square cell: `length` gives length, width and area
    pub fn square() -> Self {
        let mut cell = Self::new("square", 4);
        cell.set_formulas([
            (Measurement::Length, Formula::new(["length"], Strategy::Identity)),
            (Measurement::Width, Formula::new(["length"], Strategy::Identity)),
            (Measurement::Area, Formula::new(["length"], Strategy::Power(2))),
        ]);
        cell
    }

    /// Cube cell: a square whose height equals its side and whose volume is `length³`
    pub fn cube() -> Self {
        let mut cell = Self::square();
        cell.shape = "cube".to_string();
        cell.set_formulas([
            (Measurement::Height, Formula::new(["length"], Strategy::Identity)),
            (Measurement::Volume, Formula::new(["length"], Strategy::Power(3))),
        ]);
        cell
    }

    /// Regular hexagon cell measured by its side `length`
    pub fn hexagon() -> Self {
        let mut cell = Self::new("hexagon", 6);
        cell.set_formula(
            Measurement::Area,
            Formula::new(["length"], Strategy::RegularPolygonArea { sides: 6 }),
        );
        cell
    }

    /// Hexagonal prism cell measured by side `length` and `height`
    pub fn hexagonal_prism() -> Self {
        let mut cell = Self::hexagon();
        cell.shape = "hexagonal prism".to_string();
        cell.set_formulas([
            (Measurement::Height, Formula::new(["height"], Strategy::Identity)),
            (
                Measurement::Volume,
                Formula::new(["length", "height"], Strategy::PrismVolume { sides: 6 }),
            ),
        ]);
        cell
    }

    /// Informational shape label
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Number of sides of the shape
    pub const fn sides(&self) -> u32 {
        self.sides
    }

    /// Raw occupancy cap as configured
    pub const fn max_objs(&self) -> i64 {
        self.max_objs
    }

    /// Glyph shown for an empty location
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Set the glyph shown for an empty location
    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.icon = icon.into();
    }

    /// Register or overwrite the formula for one measurement
    pub fn set_formula(&mut self, measurement: Measurement, formula: impl Into<Formula>) {
        self.formulas.insert(measurement, formula.into());
    }

    /// Register or overwrite several formulas at once
    pub fn set_formulas<I, F>(&mut self, formulas: I)
    where
        I: IntoIterator<Item = (Measurement, F)>,
        F: Into<Formula>,
    {
        for (measurement, formula) in formulas {
            self.set_formula(measurement, formula);
        }
    }

    /// Formula registered for a measurement, if any
    pub fn formula(&self, measurement: Measurement) -> Option<&Formula> {
        self.formulas.get(&measurement)
    }

    /// All registered formulas ordered by measurement
    pub const fn formulas(&self) -> &BTreeMap<Measurement, Formula> {
        &self.formulas
    }

    /// Replace the whole measurement set
    ///
    /// Every value is coerced to an integer (fractions truncate). The update
    /// is all-or-nothing: on failure the previous measurements are kept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMeasurement` if a value has no integer representation
    /// and `EmptyMeasurements` if no values were given
    pub fn set_measurements<I, K, V>(&mut self, measurements: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToPrimitive,
    {
        let mut replacement = BTreeMap::new();
        for (name, value) in measurements {
            let name = name.into();
            let Some(value) = value.to_i64() else {
                error!("Unable to set cell measurements: '{name}' is not an integer");
                return Err(GridError::InvalidMeasurement { name });
            };
            replacement.insert(name, value);
        }

        if replacement.is_empty() {
            return Err(GridError::EmptyMeasurements);
        }

        self.measurements = replacement;
        Ok(())
    }

    /// Current value of a measurement input
    pub fn measurement(&self, name: &str) -> Option<i64> {
        self.measurements.get(name).copied()
    }

    /// All measurement inputs ordered by name
    pub const fn measurements(&self) -> &BTreeMap<String, i64> {
        &self.measurements
    }

    /// Evaluate the formula registered for `measurement`
    ///
    /// # Errors
    ///
    /// Returns `FormulaUndefined` when nothing is registered,
    /// `MissingMeasurement` when an input has not been set and
    /// `InvalidFormula` when the strategy rejects its inputs
    pub fn calculate(&self, measurement: Measurement) -> Result<f64> {
        let Some(formula) = self.formulas.get(&measurement) else {
            debug!("No formula to calculate {measurement} has been defined");
            return Err(GridError::FormulaUndefined { measurement });
        };

        let values: Option<Vec<i64>> = formula
            .inputs
            .iter()
            .map(|input| self.measurements.get(input).copied())
            .collect();

        let Some(values) = values else {
            debug!(
                "Unable to calculate cell {measurement}: requires {:?}, set {:?}",
                formula.inputs,
                self.measurements.keys().collect::<Vec<_>>()
            );
            return Err(GridError::MissingMeasurement {
                measurement,
                required: formula.inputs.clone(),
                available: self.measurements.keys().cloned().collect(),
            });
        };

        formula.strategy.evaluate(measurement, &values)
    }

    /// Area of one cell
    ///
    /// # Errors
    ///
    /// See [`Cell::calculate`]
    pub fn area(&self) -> Result<f64> {
        self.calculate(Measurement::Area)
    }

    /// Height of one cell
    ///
    /// # Errors
    ///
    /// See [`Cell::calculate`]
    pub fn height(&self) -> Result<f64> {
        self.calculate(Measurement::Height)
    }

    /// Length of one cell
    ///
    /// # Errors
    ///
    /// See [`Cell::calculate`]
    pub fn length(&self) -> Result<f64> {
        self.calculate(Measurement::Length)
    }

    /// Width of one cell
    ///
    /// # Errors
    ///
    /// See [`Cell::calculate`]
    pub fn width(&self) -> Result<f64> {
        self.calculate(Measurement::Width)
    }

    /// Volume of one cell
    ///
    /// # Errors
    ///
    /// See [`Cell::calculate`]
    pub fn volume(&self) -> Result<f64> {
        self.calculate(Measurement::Volume)
    }

    /// Pieces one location may hold, `None` when unlimited
    ///
    /// A cell with a computable, non-zero volume is treated as having room
    /// for any number of pieces. Otherwise a positive `max_objs` caps the
    /// location.
    pub fn capacity(&self) -> Option<usize> {
        if self.volume().is_ok_and(|volume| volume.abs() > 0.0) || self.max_objs <= 0 {
            None
        } else {
            usize::try_from(self.max_objs).ok()
        }
    }
}
