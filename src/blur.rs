//! Separable Gaussian blur used for pre-diff noise reduction.
//!
//! Boundary handling is edge-replicate so a flat image stays exactly flat;
//! any policy that invents gradient at the borders would turn sensor-still
//! frames into phantom motion.

use crate::grid::Grid;

/// Blur `grid` with a `kernel_size`-tap separable Gaussian.
///
/// `kernel_size <= 1` returns the input unchanged.
pub fn gaussian_blur(grid: &Grid<f32>, kernel_size: u32) -> Grid<f32> {
    if kernel_size <= 1 {
        return grid.clone();
    }
    let kernel = gaussian_kernel(kernel_size as usize);
    let half = (kernel.len() / 2) as isize;
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let src = grid.data();

    // Horizontal pass.
    let mut rows = vec![0.0f32; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (j, weight) in kernel.iter().enumerate() {
                let sx = clamp_index(x as isize + j as isize - half, width);
                acc += weight * row[sx];
            }
            rows[y * width + x] = acc;
        }
    }

    // Vertical pass.
    let mut out = vec![0.0f32; src.len()];
    for x in 0..width {
        for y in 0..height {
            let mut acc = 0.0;
            for (j, weight) in kernel.iter().enumerate() {
                let sy = clamp_index(y as isize + j as isize - half, height);
                acc += weight * rows[sy * width + x];
            }
            out[y * width + x] = acc;
        }
    }

    Grid::from_raw(grid.width(), grid.height(), out)
}

/// 1D Gaussian weights, sigma = size/4, normalized to sum 1.0.
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = size as f32 / 4.0;
    let center = (size as f32 - 1.0) / 2.0;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - center;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}

fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        for size in [3usize, 5, 7, 9] {
            let kernel = gaussian_kernel(size);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "size {size} sum {sum}");
            for i in 0..size / 2 {
                assert!((kernel[i] - kernel[size - 1 - i]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn flat_image_stays_flat() {
        let grid = Grid::new(16, 12, vec![137.0; 16 * 12]).unwrap();
        let blurred = gaussian_blur(&grid, 5);
        for &value in blurred.data() {
            assert!((value - 137.0).abs() < 1e-3);
        }
    }

    #[test]
    fn kernel_of_one_is_identity() {
        let grid = Grid::new(4, 4, (0..16).map(|i| i as f32).collect()).unwrap();
        assert_eq!(gaussian_blur(&grid, 1), grid);
        assert_eq!(gaussian_blur(&grid, 0), grid);
    }

    #[test]
    fn blur_spreads_an_impulse() {
        let mut data = vec![0.0f32; 9 * 9];
        data[4 * 9 + 4] = 255.0;
        let grid = Grid::new(9, 9, data).unwrap();
        let blurred = gaussian_blur(&grid, 5);
        let center = blurred.get(4, 4).unwrap();
        let neighbor = blurred.get(5, 4).unwrap();
        assert!(center < 255.0);
        assert!(neighbor > 0.0);
        assert!(center > neighbor);
    }
}
