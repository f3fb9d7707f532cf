//! Command-line interface that builds a grid, applies placements and prints it

use std::fmt::Write;
use std::str::FromStr;

use clap::{ArgAction, Parser, ValueEnum};

use crate::geometry::cell::Cell;
use crate::geometry::formula::Measurement;
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_LAYERS, DEFAULT_SIDE_LENGTH, DEFAULT_WIDTH,
};
use crate::io::error::{GridError, Result, invalid_argument};
use crate::spatial::grid::Grid;
use crate::spatial::location::Location;

/// Preset cell shapes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShapeArg {
    /// No cell: one piece per location
    None,
    /// Square cell measured by side length
    Square,
    /// Cube cell measured by side length
    Cube,
    /// Regular hexagon measured by side length
    Hexagon,
    /// Hexagonal prism measured by side length and height
    HexagonalPrism,
}

/// A piece to place or move, written `NAME@X,Y[,Z]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceArg {
    /// Piece name
    pub name: String,
    /// Target location
    pub location: Location,
}

impl FromStr for PieceArg {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let Some((name, location)) = s.split_once('@') else {
            return Err(invalid_argument("piece", &s, &"expected NAME@X,Y[,Z]"));
        };
        if name.is_empty() {
            return Err(invalid_argument("piece", &s, &"piece name is empty"));
        }
        Ok(Self {
            name: name.to_string(),
            location: location.parse()?,
        })
    }
}

/// A surface glyph to paint, written `X,Y[,Z]=GLYPH`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintArg {
    /// Location to paint
    pub location: Location,
    /// Glyph to draw
    pub glyph: String,
}

impl FromStr for PaintArg {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let Some((location, glyph)) = s.split_once('=') else {
            return Err(invalid_argument("paint", &s, &"expected X,Y[,Z]=GLYPH"));
        };
        Ok(Self {
            location: location.parse()?,
            glyph: glyph.to_string(),
        })
    }
}

#[derive(Parser, Debug)]
#[command(name = "piecegrid")]
#[command(
    author,
    version,
    about = "Place named pieces on a grid and print its surface and content"
)]
/// Command-line arguments for building and inspecting a grid
///
/// Operations run in a fixed order: paint, place, move, delete.
pub struct Cli {
    /// Locations along x
    #[arg(short, long, default_value_t = DEFAULT_WIDTH, allow_hyphen_values = true)]
    pub width: i64,

    /// Locations along y
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT, allow_hyphen_values = true)]
    pub height: i64,

    /// Number of layers (1 for a flat grid)
    #[arg(short, long, default_value_t = DEFAULT_LAYERS, allow_hyphen_values = true)]
    pub layers: i64,

    /// Cell shape attached to the grid
    #[arg(short, long, value_enum, default_value_t = ShapeArg::None)]
    pub shape: ShapeArg,

    /// Side length of the cell
    #[arg(long, default_value_t = DEFAULT_SIDE_LENGTH)]
    pub side: i64,

    /// Height of a prism cell (defaults to the side length)
    #[arg(long)]
    pub cell_height: Option<i64>,

    /// Pieces allowed per location (zero or negative for unlimited)
    #[arg(long, allow_hyphen_values = true)]
    pub max_objs: Option<i64>,

    /// Glyph shown on empty surface locations
    #[arg(long)]
    pub icon: Option<String>,

    /// Paint a surface glyph, `X,Y[,Z]=GLYPH`
    #[arg(long = "paint", value_name = "X,Y[,Z]=GLYPH")]
    pub paints: Vec<PaintArg>,

    /// Place a piece, `NAME@X,Y[,Z]`
    #[arg(short, long = "place", value_name = "NAME@X,Y[,Z]")]
    pub places: Vec<PieceArg>,

    /// Move a placed piece, `NAME@X,Y[,Z]`
    #[arg(short, long = "move", value_name = "NAME@X,Y[,Z]")]
    pub moves: Vec<PieceArg>,

    /// Remove a placed piece by name
    #[arg(short, long = "delete", value_name = "NAME")]
    pub deletes: Vec<String>,

    /// Print the grid state as JSON instead of text
    #[arg(short, long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the cell selected by `--shape`, if any
    ///
    /// # Errors
    ///
    /// Returns `InvalidMeasurement` if the measurements cannot be applied
    pub fn cell(&self) -> Result<Option<Cell>> {
        let mut cell = match self.shape {
            ShapeArg::None => return Ok(None),
            ShapeArg::Square => Cell::square(),
            ShapeArg::Cube => Cell::cube(),
            ShapeArg::Hexagon => Cell::hexagon(),
            ShapeArg::HexagonalPrism => Cell::hexagonal_prism(),
        };

        let mut measurements = vec![("length", self.side)];
        if self.shape == ShapeArg::HexagonalPrism {
            measurements.push(("height", self.cell_height.unwrap_or(self.side)));
        }
        cell.set_measurements(measurements)?;

        if let Some(max_objs) = self.max_objs {
            cell = cell.with_max_objs(max_objs);
        }
        if let Some(icon) = &self.icon {
            cell.set_icon(icon.clone());
        }
        Ok(Some(cell))
    }
}

/// Applies command-line operations to a fresh grid
pub struct Session {
    cli: Cli,
}

impl Session {
    /// Create a session for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the grid and apply every requested operation in order
    ///
    /// Pieces are stored under their own names.
    ///
    /// # Errors
    ///
    /// Returns the first grid error any operation produces
    pub fn build(&self) -> Result<Grid<String>> {
        let mut grid = match self.cli.cell()? {
            Some(cell) => Grid::with_cell(cell),
            None => Grid::new(),
        };
        grid.create(self.cli.width, self.cli.height, self.cli.layers)?;

        for paint in &self.cli.paints {
            grid.paint(paint.location, paint.glyph.clone())?;
        }
        for piece in &self.cli.places {
            grid.add(piece.location, piece.name.clone(), piece.name.clone())?;
        }
        for piece in &self.cli.moves {
            grid.move_piece(&piece.name, piece.location)?;
        }
        for name in &self.cli.deletes {
            grid.delete(name)?;
        }
        Ok(grid)
    }

    /// Produce the text the binary prints
    ///
    /// # Errors
    ///
    /// Returns grid errors from [`Session::build`] or a serialization error
    pub fn run(&self) -> Result<String> {
        let grid = self.build()?;
        if self.cli.json {
            return Ok(serde_json::to_string_pretty(&grid.snapshot()?)?);
        }

        let mut out = grid.to_string();
        let _ = writeln!(
            out,
            "Grid {}: {}D, {} location(s), {} piece(s)",
            grid.uid(),
            grid.dimensions(),
            grid.size(),
            grid.len()
        );
        if let Some(cell) = grid.cell() {
            let _ = writeln!(out, "Cell {} with {} sides", cell.shape(), cell.sides());
            for measurement in Measurement::ALL {
                if let Ok(value) = cell.calculate(measurement) {
                    let _ = writeln!(out, "  {measurement}: {value:.2}");
                }
            }
            if let Ok(area) = grid.area() {
                let _ = writeln!(out, "Total area: {area:.2}");
            }
            if let Ok(volume) = grid.volume() {
                let _ = writeln!(out, "Total volume: {volume:.2}");
            }
        }
        Ok(out)
    }
}
