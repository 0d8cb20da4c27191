use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Seat};

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Validated board size. Both sides are positive and the cell count is one a
/// `Vec` can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        match width.checked_mul(height) {
            Some(cells) if cells > 0 && cells <= isize::MAX as usize => {
                Ok(Self { width, height })
            }
            _ => Err(Error::InvalidDimension(format!("{}x{}", width, height))),
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// Anything that reads as a number but isn't a positive integer ("0", "-3",
// "2.5", "inf", "NaN") is a bad dimension rather than bad syntax.
fn parse_side(side: &str, whole: &str) -> Result<usize, Error> {
    let side = side.trim();
    match side.parse::<usize>() {
        Ok(0) => Err(Error::InvalidDimension(whole.to_owned())),
        Ok(n) => Ok(n),
        Err(_) if side.parse::<f64>().is_ok() => Err(Error::InvalidDimension(whole.to_owned())),
        Err(_) => Err(Error::ParseDimensions(whole.to_owned())),
    }
}

impl FromStr for Dimensions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| Error::ParseDimensions(s.to_owned()))?;
        let width = parse_side(width, s)?;
        let height = parse_side(height, s)?;
        Dimensions::new(width, height).map_err(|_| Error::InvalidDimension(s.to_owned()))
    }
}

/// The grid. Row 0 is the top, row `height - 1` is the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Seat>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        Self::with_dimensions(Dimensions::new(width, height)?)
    }

    /// Fails with `InvalidDimension` if the grid can't be allocated.
    pub fn with_dimensions(dimensions: Dimensions) -> Result<Self, Error> {
        let Dimensions { width, height } = dimensions;
        let invalid = || Error::InvalidDimension(dimensions.to_string());
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or_else(invalid)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid())?;
        cells.resize(len, None);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.height && column < self.width {
            Some(row * self.width + column)
        } else {
            None
        }
    }

    /// Owner of a cell, `None` if it's empty or off the board.
    pub fn cell_owner(&self, row: usize, column: usize) -> Option<Seat> {
        self.index(row, column).and_then(|i| self.cells[i])
    }

    /// Lowest empty row in `column`, scanning up from the bottom.
    /// `None` if the column is full or doesn't exist.
    pub fn find_landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cell_owner(row, column).is_none())
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.find_landing_row(column).is_none()
    }

    /// Put `seat` at `(row, column)`. The row must come from
    /// `find_landing_row` for this turn.
    pub fn place(&mut self, row: usize, column: usize, seat: Seat) {
        debug_assert_eq!(self.find_landing_row(column), Some(row));
        if let Some(i) = self.index(row, column) {
            self.cells[i] = Some(seat);
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let c = match cell {
                    Some(Seat::First) => 'X',
                    Some(Seat::Second) => 'O',
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
