//! Measurement kinds and the computation strategies that derive them
//!
//! A formula pairs an ordered list of measurement input names with a named
//! strategy. Inputs are looked up on the cell at evaluation time and passed
//! to the strategy in the order they were registered.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::io::error::{GridError, Result};

/// Derived properties a cell can compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    /// Surface area of one cell
    Area,
    /// Vertical extent of one cell
    Height,
    /// Length of one cell
    Length,
    /// Width of one cell
    Width,
    /// Volume of one cell
    Volume,
}

impl Measurement {
    /// Every measurement kind in declaration order
    pub const ALL: [Self; 5] = [
        Self::Area,
        Self::Height,
        Self::Length,
        Self::Width,
        Self::Volume,
    ];

    /// Lowercase name used in messages and on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Height => "height",
            Self::Length => "length",
            Self::Width => "width",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measurement {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|measurement| measurement.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                crate::io::error::invalid_argument(
                    "measurement",
                    &s,
                    &"expected one of area, height, length, width, volume",
                )
            })
    }
}

/// Named computation applied to a formula's input values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The single input, unchanged
    Identity,
    /// Product of every input
    Product,
    /// The single input raised to a power
    Power(u32),
    /// Product of every input multiplied by a constant factor
    Scaled(f64),
    /// Area of a regular polygon from its side length
    RegularPolygonArea {
        /// Number of polygon sides
        sides: u32,
    },
    /// Volume of a right prism over a regular polygon, from side length and height
    PrismVolume {
        /// Number of polygon sides
        sides: u32,
    },
}

impl Strategy {
    /// Number of inputs the strategy consumes, `None` when any positive count works
    pub const fn arity(self) -> Option<usize> {
        match self {
            Self::Identity | Self::Power(_) | Self::RegularPolygonArea { .. } => Some(1),
            Self::PrismVolume { .. } => Some(2),
            Self::Product | Self::Scaled(_) => None,
        }
    }

    /// Evaluate the strategy over ordered input values
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormula` when the number of values does not match the
    /// strategy's arity, a polygon has fewer than three sides, or a power's
    /// exponent does not fit an `i32`
    pub fn evaluate(self, measurement: Measurement, values: &[i64]) -> Result<f64> {
        let invalid = |reason: String| GridError::InvalidFormula {
            measurement,
            reason,
        };

        match self.arity() {
            Some(expected) if values.len() != expected => {
                return Err(invalid(format!(
                    "expected {expected} input(s), got {}",
                    values.len()
                )));
            }
            None if values.is_empty() => {
                return Err(invalid("expected at least one input".to_string()));
            }
            _ => {}
        }

        let first = values.first().copied().unwrap_or_default() as f64;
        match self {
            Self::Identity => Ok(first),
            Self::Product => Ok(product(values)),
            Self::Power(exponent) => i32::try_from(exponent)
                .map(|exponent| first.powi(exponent))
                .map_err(|_| invalid(format!("exponent {exponent} is too large"))),
            Self::Scaled(factor) => Ok(product(values) * factor),
            Self::RegularPolygonArea { sides } => polygon_area(sides, first).ok_or_else(|| {
                invalid(format!("a regular polygon needs at least 3 sides, got {sides}"))
            }),
            Self::PrismVolume { sides } => {
                let height = values.get(1).copied().unwrap_or_default() as f64;
                polygon_area(sides, first)
                    .map(|area| area * height)
                    .ok_or_else(|| {
                        invalid(format!("a regular polygon needs at least 3 sides, got {sides}"))
                    })
            }
        }
    }
}

fn product(values: &[i64]) -> f64 {
    values.iter().map(|&value| value as f64).product()
}

/// Area of a regular `sides`-gon with the given side length
fn polygon_area(sides: u32, side_length: f64) -> Option<f64> {
    if sides < 3 {
        return None;
    }
    let n = f64::from(sides);
    Some(n * side_length * side_length / (4.0 * (PI / n).tan()))
}

/// Ordered measurement inputs paired with the strategy that combines them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    /// Names of the measurements passed to the strategy, in order
    pub inputs: Vec<String>,
    /// Computation applied to the input values
    pub strategy: Strategy,
}

impl Formula {
    /// Build a formula from input names and a strategy
    pub fn new<I, S>(inputs: I, strategy: Strategy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            strategy,
        }
    }
}

impl<I, S> From<(I, Strategy)> for Formula
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from((inputs, strategy): (I, Strategy)) -> Self {
        Self::new(inputs, strategy)
    }
}
