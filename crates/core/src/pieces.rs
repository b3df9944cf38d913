//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every kind is a small square 0/1 matrix plus a display color. Rotation is
//! computed from the matrix (transpose, then reverse each row) rather than
//! read from pre-rotated tables, and there are no wall kicks: a rotation that
//! does not fit where the piece stands is simply rejected by the caller.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{PieceKind, Rgb, BOARD_WIDTH};

/// Smallest matrix side in the catalog (the O piece)
pub const MIN_SHAPE_SIZE: usize = 2;

/// Largest matrix side in the catalog (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offsets (x, y) of the filled cells of a shape, relative to its top-left corner
pub type FilledCells = ArrayVec<(i8, i8), { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Square occupancy matrix of a piece in its current rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 (any non-zero value counts as filled).
    ///
    /// Returns `None` unless the rows form a square of side 2..=4.
    ///
    /// ```
    /// use blockfall_core::pieces::Shape;
    ///
    /// let o = Shape::from_rows(&[&[1, 1], &[1, 1]]).unwrap();
    /// assert_eq!(o.size(), 2);
    /// assert!(Shape::from_rows(&[&[1, 1]]).is_none());
    /// assert!(Shape::from_rows(&[&[1]]).is_none());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let size = rows.len();
        if !(MIN_SHAPE_SIZE..=MAX_SHAPE_SIZE).contains(&size)
            || rows.iter().any(|r| r.len() != size)
        {
            return None;
        }

        let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                out[y][x] = v != 0;
            }
        }
        Some(Self {
            size: size as u8,
            rows: out,
        })
    }

    /// Side length of the matrix
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the matrix cell at column `x`, row `y` is filled
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        let n = self.size as usize;
        x < n && y < n && self.rows[y][x]
    }

    /// Offsets of the filled cells, row-major
    pub fn filled_cells(&self) -> FilledCells {
        let n = self.size as usize;
        let mut out = FilledCells::new();
        for y in 0..n {
            for x in 0..n {
                if self.rows[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise about the matrix itself.
    ///
    /// Row `i` of the result is column `i` of the original read bottom to top.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[n - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            rows,
        }
    }
}

/// Catalog matrix for a piece kind (spawn orientation)
pub fn catalog_shape(kind: PieceKind) -> Shape {
    let rows: &[&[u8]] = match kind {
        PieceKind::I => &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
        PieceKind::J => &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
        PieceKind::L => &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
        PieceKind::O => &[&[1, 1], &[1, 1]],
        PieceKind::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
        PieceKind::T => &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
        PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
    };
    match Shape::from_rows(rows) {
        Some(shape) => shape,
        None => unreachable!("catalog matrices are square"),
    }
}

/// Display color of a piece kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 227, 230),
        PieceKind::J => Rgb::new(36, 95, 223),
        PieceKind::L => Rgb::new(223, 173, 36),
        PieceKind::O => Rgb::new(223, 217, 36),
        PieceKind::S => Rgb::new(48, 211, 56),
        PieceKind::T => Rgb::new(132, 61, 198),
        PieceKind::Z => Rgb::new(227, 78, 78),
    }
}

/// Spawn column for a shape: centered, rounding toward the left
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8
}

/// Active falling piece: an owned copy of a catalog shape plus its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn position
    pub fn new(kind: PieceKind) -> Self {
        let shape = catalog_shape(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: 0,
        }
    }

    pub fn color(&self) -> Rgb {
        piece_color(self.kind)
    }
}

/// Uniformly random tetromino at the spawn position
pub fn random_piece(rng: &mut SimpleRng) -> Tetromino {
    let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    Tetromino::new(PieceKind::ALL[idx])
}
