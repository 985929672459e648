use anyhow::{anyhow, Result};

/// Fixed-size rectangular sample grid, row-major.
///
/// Invariants held by construction: `width > 0`, `height > 0`,
/// `data.len() == width * height`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a grid from raw row-major samples, validating the invariants.
    pub fn new(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(anyhow!("grid must have nonzero dimensions"));
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(anyhow!(
                "grid data length {} does not match {}x{}",
                data.len(),
                width,
                height
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Internal constructor for grids whose shape is preserved by
    /// construction (e.g. filter outputs).
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total sample count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Iterate rows as contiguous slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks_exact(self.width as usize)
    }
}

impl<T: Copy> Grid<T> {
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }
}

impl Grid<f32> {
    /// Exponential moving average update: pull every sample toward the
    /// corresponding sample of `sample` by factor `alpha`.
    ///
    /// Shapes must match; callers check compatibility before blending.
    pub fn blend_toward(&mut self, sample: &Grid<f32>, alpha: f32) {
        debug_assert!(self.same_shape(sample));
        for (reference, current) in self.data.iter_mut().zip(sample.data.iter()) {
            *reference = alpha * current + (1.0 - alpha) * *reference;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(Grid::<f32>::new(0, 4, vec![]).is_err());
        assert!(Grid::<f32>::new(4, 0, vec![]).is_err());
    }

    #[test]
    fn new_rejects_length_mismatch() {
        assert!(Grid::new(3, 2, vec![0.0f32; 5]).is_err());
        assert!(Grid::new(3, 2, vec![0.0f32; 6]).is_ok());
    }

    #[test]
    fn get_is_row_major() {
        let grid = Grid::new(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(grid.get(0, 0), Some(0.0));
        assert_eq!(grid.get(2, 0), Some(2.0));
        assert_eq!(grid.get(0, 1), Some(3.0));
        assert_eq!(grid.get(2, 1), Some(5.0));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn blend_toward_moves_by_alpha() {
        let mut reference = Grid::new(2, 1, vec![0.0, 100.0]).unwrap();
        let sample = Grid::new(2, 1, vec![100.0, 100.0]).unwrap();
        reference.blend_toward(&sample, 0.1);
        let data = reference.data();
        assert!((data[0] - 10.0).abs() < 1e-5);
        assert!((data[1] - 100.0).abs() < 1e-5);
    }

    #[test]
    fn rows_yields_width_sized_slices() {
        let grid = Grid::new(3, 2, vec![1u8; 6]).unwrap();
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == 3));
    }
}
