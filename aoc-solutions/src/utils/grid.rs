//! Rectangular byte grid shared by the grid-shaped puzzles
//!
//! Coordinates are `(row, col)` with row 0 at the top of the input.

use aoc_solver::ParseError;
use std::fmt;

/// Offsets of the four orthogonal neighbours: up, right, down, left
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Offsets of all eight surrounding cells
pub const SURROUNDING: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<u8>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Parse a block of equal-length lines; blank leading/trailing lines are ignored
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::from_lines(input.trim().lines())
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Result<Self, ParseError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (row, line) in lines.into_iter().enumerate() {
            let line = line.trim_end_matches('\r');
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "row {} has length {}, expected {}",
                        row + 1,
                        line.len(),
                        w
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(Self {
                cells,
                width,
                height,
            }),
            _ => Err(ParseError::MissingData("empty grid".to_string())),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.height && col < self.width).then(|| self.cells[row * self.width + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.width + col] = value;
    }

    /// The cell reached from `(row, col)` by `offset`, if it is inside the grid
    pub fn step(&self, (row, col): (usize, usize), (dr, dc): (isize, isize)) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < self.height && col < self.width).then_some((row, col))
    }

    /// In-bounds cells around `pos` for the given offsets
    pub fn neighbours<'a>(
        &'a self,
        pos: (usize, usize),
        offsets: &'a [(isize, isize)],
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        offsets.iter().filter_map(move |&offset| self.step(pos, offset))
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.height).map(move |row| self.cells[row * self.width + col])
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| (row, col)))
    }

    /// First position holding `value`, scanning row by row
    pub fn find(&self, value: u8) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&c| c == value)
            .map(|i| (i / self.width, i % self.width))
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = u8;

    fn index(&self, (row, col): (usize, usize)) -> &u8 {
        &self.cells[row * self.width + col]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        let grid = Grid::parse("abc\ndef\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[(1, 2)], b'f');
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.find(b'e'), Some((1, 1)));
        assert_eq!(grid.column(1).collect::<Vec<_>>(), b"be".to_vec());
    }

    #[test]
    fn test_ragged_and_empty_rejected() {
        assert!(matches!(
            Grid::parse("abc\nde"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(Grid::parse("\n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_neighbours_respect_borders() {
        let grid = Grid::parse("...\n...\n...").unwrap();
        assert_eq!(grid.neighbours((0, 0), &SURROUNDING).count(), 3);
        assert_eq!(grid.neighbours((1, 1), &SURROUNDING).count(), 8);
        assert_eq!(grid.neighbours((2, 1), &ORTHOGONAL).count(), 3);
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::parse("ab\ncd").unwrap();
        assert_eq!(
            grid.positions().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
    }
}
