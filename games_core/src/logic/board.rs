use crate::logic::error::FenError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub row: usize,
    pub col: usize,
}

impl BoardCoordinate {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for BoardCoordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Fixed-size grid of optional pieces, row-major, row 0 at the top.
///
/// The dimensions are chosen at construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<P> {
    rows: usize,
    cols: usize,
    cells: Vec<Option<P>>,
}

impl<P: Copy> Grid<P> {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub const fn contains(&self, pos: BoardCoordinate) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Steps `(dr, dc)` away from `from`, or `None` when that leaves the grid.
    #[must_use]
    pub fn offset(&self, from: BoardCoordinate, dr: isize, dc: isize) -> Option<BoardCoordinate> {
        let row = from.row.checked_add_signed(dr)?;
        let col = from.col.checked_add_signed(dc)?;
        let pos = BoardCoordinate::new(row, col);
        self.contains(pos).then_some(pos)
    }

    const fn index(&self, pos: BoardCoordinate) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, pos: BoardCoordinate) -> Option<P> {
        self.index(pos)
            .and_then(|idx| self.cells.get(idx).copied())
            .flatten()
    }

    #[must_use]
    pub fn is_empty_at(&self, pos: BoardCoordinate) -> bool {
        self.get(pos).is_none()
    }

    /// Stores `piece` at `pos` and returns whatever was there before.
    pub fn set(&mut self, pos: BoardCoordinate, piece: Option<P>) -> Option<P> {
        let idx = self.index(pos)?;
        let slot = self.cells.get_mut(idx)?;
        std::mem::replace(slot, piece)
    }

    pub fn take(&mut self, pos: BoardCoordinate) -> Option<P> {
        self.set(pos, None)
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn coords(&self) -> impl Iterator<Item = BoardCoordinate> {
        let cols = self.cols;
        (0..self.rows * cols).map(move |idx| BoardCoordinate::new(idx / cols, idx % cols))
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (BoardCoordinate, P)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|piece| (BoardCoordinate::new(idx / cols, idx % cols), piece))
        })
    }

    /// FEN-style placement field: rows top to bottom separated by `/`,
    /// runs of empty cells written as digits.
    pub fn to_placement(&self, symbol: impl Fn(P) -> char) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            let mut empty = 0;
            for col in 0..self.cols {
                if let Some(piece) = self.get(BoardCoordinate::new(row, col)) {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(symbol(piece));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row + 1 < self.rows {
                out.push('/');
            }
        }
        out
    }

    pub fn from_placement(
        placement: &str,
        rows: usize,
        cols: usize,
        parse: impl Fn(char) -> Option<P>,
    ) -> Result<Self, FenError> {
        let mut grid = Self::new(rows, cols);
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != rows {
            return Err(FenError::RowCount {
                expected: rows,
                found: ranks.len(),
            });
        }

        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for ch in rank.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    col += skip as usize;
                    continue;
                }
                let piece = parse(ch).ok_or(FenError::UnknownPiece(ch))?;
                if col >= cols {
                    return Err(FenError::RowWidth { row, expected: cols });
                }
                grid.set(BoardCoordinate::new(row, col), Some(piece));
                col += 1;
            }
            if col != cols {
                return Err(FenError::RowWidth { row, expected: cols });
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_in_bounds() {
        let grid: Grid<u8> = Grid::new(3, 3);
        let corner = BoardCoordinate::new(0, 0);
        assert_eq!(grid.offset(corner, -1, 0), None);
        assert_eq!(grid.offset(corner, 0, 3), None);
        assert_eq!(
            grid.offset(corner, 2, 1),
            Some(BoardCoordinate::new(2, 1))
        );
    }

    #[test]
    fn test_set_returns_previous_occupant() {
        let mut grid = Grid::new(2, 2);
        let pos = BoardCoordinate::new(1, 0);
        assert_eq!(grid.set(pos, Some('a')), None);
        assert_eq!(grid.set(pos, Some('b')), Some('a'));
        assert_eq!(grid.take(pos), Some('b'));
        assert!(grid.is_empty_at(pos));
    }

    #[test]
    fn test_out_of_bounds_reads_are_empty() {
        let grid: Grid<u8> = Grid::new(2, 2);
        assert_eq!(grid.get(BoardCoordinate::new(5, 5)), None);
    }

    #[test]
    fn test_placement_round_trip() {
        let grid = Grid::from_placement("a2/3/1bc", 3, 3, |c| c.is_ascii_lowercase().then_some(c))
            .unwrap();
        assert_eq!(grid.get(BoardCoordinate::new(0, 0)), Some('a'));
        assert_eq!(grid.get(BoardCoordinate::new(2, 2)), Some('c'));
        assert_eq!(grid.occupied().count(), 3);
        assert_eq!(grid.to_placement(|c| c), "a2/3/1bc");
    }

    #[test]
    fn test_placement_rejects_bad_width() {
        let result = Grid::from_placement("a3/3/3", 3, 3, Some);
        assert_eq!(result, Err(FenError::RowWidth { row: 0, expected: 3 }));
    }
}
