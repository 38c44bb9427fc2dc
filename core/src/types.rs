use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts an array dimension into a coordinate, clamping at `Coord::MAX`.
pub fn saturate(dim: usize) -> Coord {
    Coord::try_from(dim).unwrap_or(Coord::MAX)
}

pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        NeighborIter::new(center, (saturate(rows), saturate(cols)))
    }
}

/// Row and column offsets of the Moore neighborhood, center excluded.
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

/// Iterates the up to 8 in-bounds neighbors of a cell.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord2,
    next_offset: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord2) -> Self {
        Self {
            center,
            size,
            next_offset: 0,
        }
    }

    fn offset(&self, (d_row, d_col): (i8, i8)) -> Option<Coord2> {
        let row = self.center.0.checked_add_signed(d_row)?;
        let col = self.center.1.checked_add_signed(d_col)?;
        in_bounds((row, col), self.size).then_some((row, col))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(self.next_offset) {
            self.next_offset += 1;
            if let Some(coords) = self.offset(delta) {
                return Some(coords);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(OFFSETS.len() - self.next_offset))
    }
}
