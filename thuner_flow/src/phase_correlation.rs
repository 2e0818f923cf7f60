/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The "ODIN" software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the cross-power-spectrum phase correlation kernel, ported from
//! `original_source/thor/match/correlate.py::fft_flow`. A 2-D FFT is done
//! as separable row-then-column 1-D passes (`rustfft` has no native 2-D
//! transform), matching how the corpus always decomposes N-D work onto
//! 1-D primitives from its numeric crates rather than reaching for a
//! dedicated image-processing dependency.

use ndarray::Array2;
use rustfft::{num_complex::Complex, FftPlanner};

type C64 = Complex<f64>;

fn fft_rows(buf: &mut Array2<C64>, planner: &mut FftPlanner<f64>, forward: bool) {
    let ncols = buf.ncols();
    let fft = if forward { planner.plan_fft_forward(ncols) } else { planner.plan_fft_inverse(ncols) };
    for mut row in buf.rows_mut() {
        let mut data: Vec<C64> = row.iter().copied().collect();
        fft.process(&mut data);
        for (dst, src) in row.iter_mut().zip(data) {
            *dst = src;
        }
    }
}

fn fft_cols(buf: &mut Array2<C64>, planner: &mut FftPlanner<f64>, forward: bool) {
    let nrows = buf.nrows();
    let fft = if forward { planner.plan_fft_forward(nrows) } else { planner.plan_fft_inverse(nrows) };
    for mut col in buf.columns_mut() {
        let mut data: Vec<C64> = col.iter().copied().collect();
        fft.process(&mut data);
        for (dst, src) in col.iter_mut().zip(data) {
            *dst = src;
        }
    }
}

fn fft2(buf: &mut Array2<C64>, forward: bool) {
    let mut planner = FftPlanner::new();
    fft_rows(buf, &mut planner, forward);
    fft_cols(buf, &mut planner, forward);
    if !forward {
        let n = (buf.nrows() * buf.ncols()) as f64;
        buf.mapv_inplace(|v| v / n);
    }
}

/// separable Gaussian smoothing with the kernel truncated at `3*sigma`,
/// applied independently along rows and columns (the cross-covariance
/// surface is smoothed, not the input fields).
fn gaussian_smooth(field: &Array2<f64>, sigma: f64) -> Array2<f64> {
    if sigma <= 0.0 {
        return field.clone();
    }
    let radius = (3.0 * sigma).ceil().max(1.0) as isize;
    let kernel: Vec<f64> = (-radius..=radius).map(|k| (-(k as f64 * k as f64) / (2.0 * sigma * sigma)).exp()).collect();
    let norm: f64 = kernel.iter().sum();
    let kernel: Vec<f64> = kernel.iter().map(|k| k / norm).collect();

    let (nrows, ncols) = field.dim();
    let mut horizontal = Array2::zeros((nrows, ncols));
    for r in 0..nrows {
        for c in 0..ncols {
            let mut acc = 0.0;
            for (ki, &w) in kernel.iter().enumerate() {
                let offset = ki as isize - radius;
                let cc = (c as isize + offset).rem_euclid(ncols as isize) as usize;
                acc += w * field[[r, cc]];
            }
            horizontal[[r, c]] = acc;
        }
    }
    let mut smoothed = Array2::zeros((nrows, ncols));
    for r in 0..nrows {
        for c in 0..ncols {
            let mut acc = 0.0;
            for (ki, &w) in kernel.iter().enumerate() {
                let offset = ki as isize - radius;
                let rr = (r as isize + offset).rem_euclid(nrows as isize) as usize;
                acc += w * horizontal[[rr, c]];
            }
            smoothed[[r, c]] = acc;
        }
    }
    smoothed
}

/// maps a raw FFT bin index to its signed, "zero lag at centre" offset:
/// bins `0..=n/2` are non-negative displacements, the rest wrap negative.
fn centered_offset(index: usize, n: usize) -> f64 {
    let shifted = (index + n / 2) % n;
    shifted as f64 - (n / 2) as f64
}

/// phase correlation between two equally-shaped crops, returning the
/// signed pixel displacement `(delta_row, delta_col)` that best aligns
/// `previous` onto `current`. NaNs are replaced with 0 before transforming.
pub fn phase_correlate(previous: &Array2<f32>, current: &Array2<f32>) -> (f64, f64) {
    let (nrows, ncols) = previous.dim();
    let mut prev_c: Array2<C64> = previous.mapv(|v| Complex::new(if v.is_nan() { 0.0 } else { v as f64 }, 0.0));
    let mut curr_c: Array2<C64> = current.mapv(|v| Complex::new(if v.is_nan() { 0.0 } else { v as f64 }, 0.0));

    fft2(&mut prev_c, true);
    fft2(&mut curr_c, true);

    let mut cross: Array2<C64> = Array2::zeros((nrows, ncols));
    for ((r, c), value) in cross.indexed_iter_mut() {
        let f = curr_c[[r, c]] * prev_c[[r, c]].conj();
        let mag = f.norm();
        *value = if mag < 1e-12 { Complex::new(1.0, 0.0) } else { f / mag };
    }

    fft2(&mut cross, false);
    let magnitude = cross.mapv(|v| v.re);

    let sigma = (nrows.min(ncols) as f64) / 8.0;
    let smoothed = gaussian_smooth(&magnitude, sigma);

    let mut best = (0usize, 0usize);
    let mut best_value = f64::NEG_INFINITY;
    for ((r, c), &v) in smoothed.indexed_iter() {
        if v > best_value {
            best_value = v;
            best = (r, c);
        }
    }

    (centered_offset(best.0, nrows), centered_offset(best.1, ncols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn blob(n: usize, centre: (usize, usize)) -> Array2<f32> {
        let mut field = Array2::from_elem((n, n), 0.0f32);
        for r in 0..n {
            for c in 0..n {
                let dr = r as isize - centre.0 as isize;
                let dc = c as isize - centre.1 as isize;
                if dr * dr + dc * dc <= 9 {
                    field[[r, c]] = 50.0;
                }
            }
        }
        field
    }

    #[test]
    fn stationary_blob_has_zero_flow() {
        let field = blob(40, (20, 20));
        let (dr, dc) = phase_correlate(&field, &field);
        assert!(dr.abs() < 1.0, "dr={dr}");
        assert!(dc.abs() < 1.0, "dc={dc}");
    }

    #[test]
    fn translated_blob_recovers_displacement() {
        let previous = blob(40, (15, 15));
        let current = blob(40, (18, 17));
        let (dr, dc) = phase_correlate(&previous, &current);
        assert!((dr - 3.0).abs() < 1.0, "dr={dr}");
        assert!((dc - 2.0).abs() < 1.0, "dc={dc}");
    }
}
