use crate::index::VertexIndex;

/// Square, row-major matrix of edge cells.
///
/// A cell is `None` when there is no edge and `Some(weight)` otherwise, so an
/// edge of weight `0.0` is a real edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightMatrix {
    dim: usize,
    cells: Vec<Option<f64>>,
}

impl WeightMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    fn position(&self, row: VertexIndex, col: VertexIndex) -> usize {
        debug_assert!(row.0 < self.dim && col.0 < self.dim);
        row.0 * self.dim + col.0
    }

    #[inline]
    pub fn get(&self, row: VertexIndex, col: VertexIndex) -> Option<f64> {
        self.cells[self.position(row, col)]
    }

    /// Writes a cell and returns what it held before.
    #[inline]
    pub fn set(&mut self, row: VertexIndex, col: VertexIndex, cell: Option<f64>) -> Option<f64> {
        let p = self.position(row, col);
        std::mem::replace(&mut self.cells[p], cell)
    }

    /// Present cells of `row`, in column order.
    pub fn row(&self, row: VertexIndex) -> impl Iterator<Item = (VertexIndex, f64)> + '_ {
        let start = row.0 * self.dim;
        self.cells[start..start + self.dim]
            .iter()
            .enumerate()
            .filter_map(|(j, c)| c.map(|w| (VertexIndex(j), w)))
    }

    /// Present cells of `col`, in row order.
    pub fn column(&self, col: VertexIndex) -> impl Iterator<Item = (VertexIndex, f64)> + '_ {
        (0..self.dim).filter_map(move |i| self.get(VertexIndex(i), col).map(|w| (VertexIndex(i), w)))
    }

    /// Appends one empty row and one empty column, keeping every existing cell.
    pub fn grow(&mut self) {
        let new_dim = self.dim + 1;
        let mut cells = Vec::with_capacity(new_dim * new_dim);
        for row in self.cells.chunks(self.dim.max(1)).take(self.dim) {
            cells.extend_from_slice(row);
            cells.push(None);
        }
        cells.resize(new_dim * new_dim, None);
        self.dim = new_dim;
        self.cells = cells;
    }

    /// Removes row `k` and column `k`. Every cell with a row or column above
    /// `k` moves one position towards the origin.
    pub fn excise(&mut self, k: VertexIndex) {
        debug_assert!(k.0 < self.dim);
        let new_dim = self.dim - 1;
        let mut cells = Vec::with_capacity(new_dim * new_dim);
        for (i, row) in self.cells.chunks(self.dim).enumerate() {
            if i == k.0 {
                continue;
            }
            cells.extend_from_slice(&row[..k.0]);
            cells.extend_from_slice(&row[k.0 + 1..]);
        }
        self.dim = new_dim;
        self.cells = cells;
    }

    /// Is the matrix equal to its own transpose?
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| {
            (i + 1..self.dim).all(|j| {
                self.get(VertexIndex(i), VertexIndex(j)) == self.get(VertexIndex(j), VertexIndex(i))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ix(i: usize) -> VertexIndex {
        VertexIndex(i)
    }

    #[test]
    fn grow_preserves_cells() {
        let mut m = WeightMatrix::new();
        m.grow();
        m.grow();
        m.set(ix(0), ix(1), Some(2.5));
        m.set(ix(1), ix(1), Some(0.0));
        m.grow();

        assert_eq!(m.dim(), 3);
        assert_eq!(m.get(ix(0), ix(1)), Some(2.5));
        assert_eq!(m.get(ix(1), ix(1)), Some(0.0));
        assert_eq!(m.get(ix(2), ix(0)), None);
        assert_eq!(m.row(ix(2)).count(), 0);
    }

    #[test]
    fn excise_shifts_higher_cells() {
        let mut m = WeightMatrix::new();
        for _ in 0..3 {
            m.grow();
        }
        m.set(ix(0), ix(2), Some(1.0));
        m.set(ix(2), ix(0), Some(3.0));
        m.set(ix(1), ix(2), Some(7.0));

        m.excise(ix(1));

        assert_eq!(m.dim(), 2);
        assert_eq!(m.get(ix(0), ix(1)), Some(1.0));
        assert_eq!(m.get(ix(1), ix(0)), Some(3.0));
        assert_eq!(m.column(ix(1)).collect::<Vec<_>>(), vec![(ix(0), 1.0)]);
    }

    #[test]
    fn excise_last_leaves_empty_matrix() {
        let mut m = WeightMatrix::new();
        m.grow();
        m.set(ix(0), ix(0), Some(4.0));
        m.excise(ix(0));
        assert_eq!(m, WeightMatrix::new());
    }

    #[test]
    fn symmetry() {
        let mut m = WeightMatrix::new();
        m.grow();
        m.grow();
        m.set(ix(0), ix(1), Some(1.0));
        assert!(!m.is_symmetric());
        m.set(ix(1), ix(0), Some(1.0));
        assert!(m.is_symmetric());
    }
}
