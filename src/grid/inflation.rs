//! C-space inflation: every cell takes the highest cost found within the Robot's radius

use crate::Point;

/// All offsets within `radius` cells of the origin, the origin included
pub(super) fn disc_offsets(radius: usize) -> Vec<(isize, isize)> {
    let r = radius as isize;
    let mut offsets = Vec::with_capacity((2 * radius + 1) * (2 * radius + 1));
    for dr in -r..=r {
        for dc in -r..=r {
            if dr * dr + dc * dc <= r * r {
                offsets.push((dr, dc));
            }
        }
    }
    offsets
}

/// NaN costs are obstacles
pub(super) fn sanitize(cost: f64) -> f64 {
    if cost.is_nan() {
        f64::INFINITY
    } else {
        cost
    }
}

/// The inflated cost of a single cell
pub(super) fn inflate_cell(
    costs: &[f64],
    (rows, cols): (usize, usize),
    offsets: &[(isize, isize)],
    (row, col): Point,
) -> f64 {
    offsets
        .iter()
        .map(|&(dr, dc)| (row as isize + dr, col as isize + dc))
        .filter(|&(r, c)| r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols)
        .map(|(r, c)| sanitize(costs[r as usize * cols + c as usize]))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Inflates every cell of the Grid
#[cfg(feature = "parallel")]
pub(super) fn inflate_all(
    costs: &[f64],
    (rows, cols): (usize, usize),
    offsets: &[(isize, isize)],
) -> Vec<f64> {
    use rayon::prelude::*;

    let mut inflated = vec![0.0; rows * cols];
    inflated
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, chunk)| {
            for (col, cell) in chunk.iter_mut().enumerate() {
                *cell = inflate_cell(costs, (rows, cols), offsets, (row, col));
            }
        });
    inflated
}

/// Inflates every cell of the Grid
#[cfg(not(feature = "parallel"))]
pub(super) fn inflate_all(
    costs: &[f64],
    (rows, cols): (usize, usize),
    offsets: &[(isize, isize)],
) -> Vec<f64> {
    let mut inflated = vec![0.0; rows * cols];
    for (row, chunk) in inflated.chunks_mut(cols).enumerate() {
        for (col, cell) in chunk.iter_mut().enumerate() {
            *cell = inflate_cell(costs, (rows, cols), offsets, (row, col));
        }
    }
    inflated
}
