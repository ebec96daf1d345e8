/// Single board axis, used for row/column indices and board dimensions.
pub type Coord = u8;

/// Area-sized counter, used for mine and cell totals.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Pos = (Coord, Coord);

/// Total number of cells on a `rows x cols` board, saturating on overflow.
pub const fn cell_total(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

/// Conversion into an `ndarray` index.
pub trait GridIndex {
    fn grid(self) -> [usize; 2];
}

impl GridIndex for Pos {
    fn grid(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bounds neighbors of `pos` on a board of `size` rows x cols, in row-major
/// scan order. Yields at most 8 positions.
pub fn neighbors(pos: Pos, size: Pos) -> impl Iterator<Item = Pos> {
    let (row, col) = pos;
    let (rows, cols) = size;
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < rows && c < cols).then_some((r, c))
    })
}

/// All positions of a board of `size`, row-major.
pub fn positions(size: Pos) -> impl Iterator<Item = Pos> {
    let (rows, cols) = size;
    (0..rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let found: Vec<_> = neighbors((0, 0), (8, 8)).collect();
        assert_eq!(found, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(neighbors((3, 3), (8, 8)).count(), 8);
    }

    #[test]
    fn edge_cell_is_clipped_to_bounds() {
        let found: Vec<_> = neighbors((7, 4), (8, 8)).collect();
        assert!(found.iter().all(|&(r, c)| r < 8 && c < 8));
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn positions_covers_whole_board() {
        assert_eq!(positions((3, 5)).count(), 15);
        assert_eq!(positions((3, 5)).next(), Some((0, 0)));
        assert_eq!(positions((3, 5)).last(), Some((2, 4)));
    }

    #[test]
    fn cell_total_saturates() {
        assert_eq!(cell_total(8, 8), 64);
        assert_eq!(cell_total(255, 255), 65025);
    }
}
