use crate::error::EstimatorError;
use crate::types::{BoardDims, Color, Point};

/// Hard cap on either side, whatever the configured limit.
pub const MAX_SIDE: i32 = 255;

/// Go position on a `width` x `height` grid, stored row-major (`y * width + x`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Color>,
}

impl Board {
    /// Creates an empty board. Each side must be in `1..=MAX_SIDE`.
    pub fn new(width: i32, height: i32) -> Result<Self, EstimatorError> {
        Self::with_max_side(width, height, MAX_SIDE)
    }

    /// Creates an empty board with each side in `1..=max_side`.
    /// `max_side` is itself capped at [`MAX_SIDE`].
    pub fn with_max_side(width: i32, height: i32, max_side: i32) -> Result<Self, EstimatorError> {
        let max_side = max_side.min(MAX_SIDE);
        let invalid = EstimatorError::InvalidBoardSize {
            width,
            height,
            max_side,
        };
        if !(1..=max_side).contains(&width) || !(1..=max_side).contains(&height) {
            return Err(invalid);
        }

        let len = (width as usize).checked_mul(height as usize).ok_or(invalid)?;
        Ok(Self {
            width,
            height,
            cells: vec![Color::Empty; len],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn dims(&self) -> BoardDims {
        BoardDims::new(self.width, self.height)
    }

    /// Number of points, `width * height`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Returns the color at `(x, y)`, or `None` off the board.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Writes `color` at `(x, y)`.
    /// Returns `false` and leaves the board unchanged when off the board.
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Iterates `(point, color)` in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &color)| (point_of(idx, width), color))
    }

    /// Stones of one color in row-major order.
    pub fn stones(&self, color: Color) -> Vec<Point> {
        self.points()
            .filter(|&(_, c)| c == color)
            .map(|(p, _)| p)
            .collect()
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(b, w), c| match c {
            Color::Black => (b + 1, w),
            Color::White => (b, w + 1),
            Color::Empty => (b, w),
        })
    }

    /// Converts the board to codes where 0=empty, 1=black, 2=white.
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.code()).collect()
    }

    /// CRC32 over dimensions and cell codes. Stable for a given position.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&self.width.to_le_bytes());
        hasher.update(&self.height.to_le_bytes());
        hasher.update(&self.to_codes());
        hasher.finalize()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some((y as usize) * (self.width as usize) + x as usize)
        } else {
            None
        }
    }
}

fn point_of(idx: usize, width: i32) -> Point {
    let width = width as usize;
    Point::new((idx % width) as i32, (idx / width) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty_and_row_major() {
        let board = Board::new(3, 2).unwrap();

        assert_eq!(board.len(), 6);
        assert_eq!(board.dims(), BoardDims::new(3, 2));
        assert!(board.cells().iter().all(|&c| c == Color::Empty));
        assert_eq!(board.count(), (0, 0));

        let points: Vec<Point> = board.points().map(|(p, _)| p).collect();
        assert_eq!(points[1], Point::new(1, 0));
        assert_eq!(points[3], Point::new(0, 1));
    }

    #[test]
    fn zero_sized_board_is_rejected() {
        assert_eq!(
            Board::new(0, 9),
            Err(EstimatorError::InvalidBoardSize {
                width: 0,
                height: 9,
                max_side: MAX_SIDE
            })
        );
        assert!(Board::new(9, -1).is_err());
    }

    #[test]
    fn oversized_board_is_rejected() {
        assert!(Board::new(MAX_SIDE, MAX_SIDE).is_ok());
        assert!(Board::new(MAX_SIDE + 1, 1).is_err());
        assert!(Board::new(i32::MAX, i32::MAX).is_err());
        assert!(Board::new(2, i32::MAX).is_err());
    }

    #[test]
    fn configured_side_limit_is_capped() {
        assert!(Board::with_max_side(19, 19, 19).is_ok());
        assert_eq!(
            Board::with_max_side(20, 19, 19),
            Err(EstimatorError::InvalidBoardSize {
                width: 20,
                height: 19,
                max_side: 19
            })
        );
        assert_eq!(
            Board::with_max_side(300, 1, i32::MAX),
            Err(EstimatorError::InvalidBoardSize {
                width: 300,
                height: 1,
                max_side: MAX_SIDE
            })
        );
    }

    #[test]
    fn set_writes_at_row_major_index() {
        let mut board = Board::new(3, 2).unwrap();

        assert!(board.set(2, 1, Color::Black));
        assert!(board.set(0, 1, Color::White));

        assert_eq!(board.to_codes(), vec![0, 0, 0, 2, 0, 1]);
        assert_eq!(board.get(2, 1), Some(Color::Black));
        assert_eq!(board.count(), (1, 1));
        assert_eq!(board.stones(Color::White), vec![Point::new(0, 1)]);
    }

    #[test]
    fn out_of_range_set_keeps_board_unchanged() {
        let mut board = Board::new(2, 2).unwrap();
        board.set(1, 1, Color::Black);
        let before = board.clone();

        assert!(!board.set(-1, 0, Color::White));
        assert!(!board.set(2, 0, Color::White));
        assert!(!board.set(0, 2, Color::White));
        assert!(!board.set(i32::MAX, i32::MIN, Color::White));

        assert_eq!(board, before);
        assert_eq!(board.get(5, 5), None);
    }

    #[test]
    fn fingerprint_tracks_position_and_shape() {
        let mut a = Board::new(3, 3).unwrap();
        let b = Board::new(3, 3).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        a.set(1, 1, Color::Black);
        assert_ne!(a.fingerprint(), b.fingerprint());

        let tall = Board::new(1, 9).unwrap();
        let wide = Board::new(9, 1).unwrap();
        assert_ne!(tall.fingerprint(), wide.fingerprint());
    }
}
