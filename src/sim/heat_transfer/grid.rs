use ndarray as nd;

use crate::sim::heat_transfer::error::DomainError;

/// Smallest resolution along either axis: one interior cell plus its two
/// neighbours.
pub const MIN_RESOLUTION: usize = 3;

/// Uniform grid over the unit-width box.
///
/// Spacing is `1 / nx` on both axes, so a non-square grid is a box of width 1
/// and height `ny / nx`. Positions are computed once and never change.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    nx: usize,
    ny: usize,
    spacing: f64,
    positions: nd::Array2<(f64, f64)>,
}

impl UniformGrid {
    pub fn new(nx: usize, ny: usize) -> Result<Self, DomainError> {
        if nx < MIN_RESOLUTION || ny < MIN_RESOLUTION {
            return Err(DomainError::TooSmall { nx, ny });
        }
        let spacing = 1.0 / nx as f64;
        let positions =
            nd::Array2::from_shape_fn((nx, ny), |(i, j)| (i as f64 * spacing, j as f64 * spacing));
        Ok(Self {
            nx,
            ny,
            spacing,
            positions,
        })
    }

    /// Number of cells along x (first index).
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells along y (second index).
    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Distance between two neighbouring cells.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// `(x, y)` coordinates of cell `(i, j)`.
    pub fn position(&self, i: usize, j: usize) -> (f64, f64) {
        self.positions[[i, j]]
    }

    /// Largest relaxation constant for which the explicit update is stable
    /// on plain diffusion: `0.25 * spacing^2`.
    ///
    /// At exactly this value the free-air update replaces a cell with the
    /// mean of its four neighbours.
    pub fn stability_limit(&self) -> f64 {
        0.25 * self.spacing * self.spacing
    }

    /// Applies a neighbour offset, returning `None` if it leaves the grid.
    pub fn offset(&self, i: usize, j: usize, di: isize, dj: isize) -> Option<(usize, usize)> {
        let ni = i.checked_add_signed(di)?;
        let nj = j.checked_add_signed(dj)?;
        (ni < self.nx && nj < self.ny).then_some((ni, nj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_and_positions() {
        let grid = UniformGrid::new(4, 8).unwrap();
        assert_eq!(grid.shape(), (4, 8));
        assert!((grid.spacing() - 0.25).abs() < 1e-15);
        let (x, y) = grid.position(3, 7);
        assert!((x - 0.75).abs() < 1e-15);
        assert!((y - 1.75).abs() < 1e-15);
        assert_eq!(grid.position(0, 0), (0.0, 0.0));
    }

    #[test]
    fn test_too_small() {
        assert_eq!(
            UniformGrid::new(2, 10).unwrap_err(),
            DomainError::TooSmall { nx: 2, ny: 10 }
        );
        assert!(UniformGrid::new(3, 3).is_ok());
    }

    #[test]
    fn test_stability_limit() {
        let grid = UniformGrid::new(10, 10).unwrap();
        assert!((grid.stability_limit() - 0.0025).abs() < 1e-15);
    }

    #[test]
    fn test_offset_bounds() {
        let grid = UniformGrid::new(3, 4).unwrap();
        assert_eq!(grid.offset(0, 0, -1, 0), None);
        assert_eq!(grid.offset(0, 0, 0, -1), None);
        assert_eq!(grid.offset(2, 3, 1, 0), None);
        assert_eq!(grid.offset(2, 3, 0, 1), None);
        assert_eq!(grid.offset(1, 1, 1, 1), Some((2, 2)));
    }
}
