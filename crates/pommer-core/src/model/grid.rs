use super::position::Position;
use crate::error::{Result, TrackError};
use std::ops::Index;

/// Row-major rectangular grid of cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }

    /// Builds a grid from nested rows; every row must have the same width.
    pub fn from_rows(name: &'static str, rows: Vec<Vec<T>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::with_capacity(height * width);
        for row in rows {
            if row.len() != width {
                return Err(TrackError::ShapeMismatch {
                    grid: name,
                    expected: (height, width),
                    found: (height, row.len()),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<T> {
        if self.contains(pos) {
            Some(self.cells[pos.row * self.cols + pos.col])
        } else {
            None
        }
    }

    pub fn set(&mut self, pos: Position, value: T) {
        if self.contains(pos) {
            self.cells[pos.row * self.cols + pos.col] = value;
        }
    }

    /// Iterates `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, T)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, value)| (Position::new(index / cols, index % cols), *value))
    }

    /// First position holding `value`, scanning in row-major order.
    pub fn find(&self, value: T) -> Option<Position>
    where
        T: PartialEq,
    {
        self.iter()
            .find(|(_, cell)| *cell == value)
            .map(|(pos, _)| pos)
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[T]>::to_vec).collect()
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        assert!(
            pos.row < self.rows && pos.col < self.cols,
            "position {pos} outside {}x{} grid",
            self.rows,
            self.cols
        );
        &self.cells[pos.row * self.cols + pos.col]
    }
}
