//! Row-major storage for scalar surfaces.
//!
//! `data[row * width + col]` holds the value for canvas row `row` (y) and column `col` (x),
//! matching image raster order.

/// A dense grid of `f32` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Grid {
    /// Creates a grid with all values set to zero.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Wraps existing row-major data. Returns `None` if the length does not match.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Size of the grid as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the value at `(row, col)`, returning `0.0` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        if row >= self.height || col >= self.width {
            return 0.0;
        }
        self.data[row * self.width + col]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Largest value, or `None` for an empty grid. NaN values are ignored.
    pub fn max(&self) -> Option<f32> {
        self.data.iter().copied().filter(|v| !v.is_nan()).reduce(f32::max)
    }

    /// Smallest and largest value, or `None` for an empty grid. NaN values are ignored.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Returns a new grid with `f` applied to every value.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Returns a new grid combining two equally sized grids cell by cell.
    pub fn zip_map(&self, other: &Grid, f: impl Fn(f32, f32) -> f32) -> Option<Self> {
        if self.size() != other.size() {
            return None;
        }
        Some(Self {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Iterates the values of one row.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_initializes_all_cells() {
        let g = Grid::zeros(3, 2);
        assert_eq!(g.size(), (3, 2));
        assert!(g.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(3, 2, |row, col| (row * 10 + col) as f32);
        assert_eq!(g.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(g.get(1, 2), 12.0);
        assert_eq!(g.row(1), &[10.0, 11.0, 12.0]);
    }

    #[test]
    fn get_returns_zero_outside_bounds() {
        let g = Grid::from_fn(2, 2, |_, _| 1.0);
        assert_eq!(g.get(2, 0), 0.0);
        assert_eq!(g.get(0, 5), 0.0);
    }

    #[test]
    fn min_max_ignores_nan_and_handles_empty() {
        let g = Grid::from_vec(2, 2, vec![3.0, f32::NAN, -1.0, 2.0]).unwrap();
        assert_eq!(g.min_max(), Some((-1.0, 3.0)));
        assert_eq!(g.max(), Some(3.0));
        assert_eq!(Grid::zeros(0, 0).min_max(), None);
    }

    #[test]
    fn zip_map_requires_matching_sizes() {
        let a = Grid::from_fn(2, 1, |_, c| c as f32);
        let b = Grid::from_fn(2, 1, |_, _| 1.0);
        assert_eq!(a.zip_map(&b, |x, y| x - y).unwrap().as_slice(), &[-1.0, 0.0]);
        assert!(a.zip_map(&Grid::zeros(1, 1), |x, _| x).is_none());
        assert!(Grid::from_vec(2, 2, vec![0.0; 3]).is_none());
    }
}
