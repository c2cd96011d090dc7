//! Maps render-space cells `(row, col)` to chess squares and pixel rectangles.
//!
//! Row 0 is the top of the image. Column 0 is drawn at the right-hand edge:
//! the x origin of a cell is `edge(7 - col)`, so iterating columns left to
//! right in the loop walks the board right to left on screen.

use shakmaty::{File, Rank, Square};

use crate::config::{BoardConfig, Padding};

/// Pixel rectangle of one board cell on the padded canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    size: u32,
    padding: Padding,
    flipped: bool,
}

impl Geometry {
    pub fn new(config: &BoardConfig) -> Self {
        Geometry {
            size: config.size,
            padding: config.padding,
            flipped: config.flipped,
        }
    }

    /// Square shown in cell `(row, col)`.
    pub fn square_at(&self, row: u32, col: u32) -> Square {
        let (file, rank) = if self.flipped {
            (col, row)
        } else {
            (7 - col, 7 - row)
        };
        Square::from_coords(File::new(file), Rank::new(rank))
    }

    /// Inverse of [`Geometry::square_at`].
    pub fn cell_of(&self, square: Square) -> (u32, u32) {
        let file = square.file().to_u32();
        let rank = square.rank().to_u32();
        if self.flipped {
            (rank, file)
        } else {
            (7 - rank, 7 - file)
        }
    }

    /// Pixel offset of grid line `k` (0..=8) from the board origin.
    fn edge(&self, k: u32) -> u32 {
        ((u64::from(self.size) * u64::from(k) + 4) / 8) as u32
    }

    pub fn rect(&self, row: u32, col: u32) -> CellRect {
        let left = self.edge(7 - col);
        let top = self.edge(row);
        CellRect {
            x: left + self.padding.left,
            y: top + self.padding.top,
            width: self.edge(8 - col) - left,
            height: self.edge(row + 1) - top,
        }
    }

    /// All 64 cells in draw order: rows top to bottom, columns 0 to 7.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        (0..8).flat_map(|row| (0..8).map(move |col| (row, col)))
    }

    /// Rank digit shown on the cells of column 7.
    pub fn rank_label(&self, row: u32) -> char {
        let rank = if self.flipped { row } else { 7 - row };
        Rank::new(rank).char()
    }

    /// File letter shown on the cells of row 7.
    pub fn file_label(&self, col: u32) -> char {
        let file = if self.flipped { col } else { 7 - col };
        File::new(file).char()
    }
}
