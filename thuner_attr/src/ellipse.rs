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

//! best-fit ellipse over an object's boundary pixels, via PCA on the
//! boundary point scatter rather than OpenCV's direct least-squares conic
//! fit (`cv2.fitEllipseDirect`, used by `original_source/thor/attribute/core.py`):
//! no corpus example depends on a conic-fitting crate, but `nalgebra`'s
//! symmetric eigendecomposition is already in the workspace stack and an
//! ellipse whose axes are the eigenvectors/eigenvalues of the boundary's
//! covariance matrix is the standard substitute.

use nalgebra::{Matrix2, SymmetricEigen};

use crate::errors::{AttrError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseFit {
    pub major_axis: f64,
    pub minor_axis: f64,
    /// degrees clockwise from the column (x) axis to the major axis.
    pub orientation_deg: f64,
    pub eccentricity: f64,
}

/// fits an ellipse to `points` (row, col). Fewer than 3 distinct points
/// cannot determine a 2D scatter and is an error; 3-5 points are
/// triplicated before fitting, matching the minimum-contour-length
/// workaround OpenCV's direct fit itself requires (it refuses fewer than 5).
pub fn fit(points: &[(f64, f64)]) -> Result<EllipseFit> {
    let distinct = {
        let mut pts = points.to_vec();
        pts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        pts.dedup();
        pts.len()
    };
    if distinct < 3 {
        return Err(AttrError::DegenerateContour(distinct));
    }

    let mut working = points.to_vec();
    while working.len() < 6 {
        working.extend_from_slice(points);
    }

    let n = working.len() as f64;
    let mean_row = working.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_col = working.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = Matrix2::zeros();
    for &(row, col) in &working {
        let dr = row - mean_row;
        let dc = col - mean_col;
        cov[(0, 0)] += dr * dr;
        cov[(0, 1)] += dr * dc;
        cov[(1, 0)] += dr * dc;
        cov[(1, 1)] += dc * dc;
    }
    cov /= n;

    let eigen = SymmetricEigen::new(cov);
    let (mut i_major, mut i_minor) = (0, 1);
    if eigen.eigenvalues[1] > eigen.eigenvalues[0] {
        (i_major, i_minor) = (1, 0);
    }

    // axis length convention: 2 standard deviations along each principal direction.
    let major_axis = 2.0 * eigen.eigenvalues[i_major].max(0.0).sqrt();
    let minor_axis = 2.0 * eigen.eigenvalues[i_minor].max(0.0).sqrt();

    let major_vec = eigen.eigenvectors.column(i_major);
    let orientation_deg = major_vec[1].atan2(major_vec[0]).to_degrees();

    let eccentricity = if major_axis > 0.0 {
        (1.0 - (minor_axis / major_axis).powi(2)).max(0.0).sqrt()
    } else {
        0.0
    };

    Ok(EllipseFit { major_axis, minor_axis, orientation_deg, eccentricity })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_has_near_zero_eccentricity() {
        let mut points = Vec::new();
        for i in 0..36 {
            let theta = (i as f64) * std::f64::consts::TAU / 36.0;
            points.push((5.0 * theta.sin(), 5.0 * theta.cos()));
        }
        let fit = fit(&points).unwrap();
        assert!(fit.eccentricity < 0.05, "eccentricity {} should be near zero for a circle", fit.eccentricity);
        assert!((fit.major_axis - fit.minor_axis).abs() < 0.5);
    }

    #[test]
    fn elongated_ellipse_has_high_eccentricity() {
        let mut points = Vec::new();
        for i in 0..36 {
            let theta = (i as f64) * std::f64::consts::TAU / 36.0;
            points.push((2.0 * theta.sin(), 10.0 * theta.cos()));
        }
        let fit = fit(&points).unwrap();
        assert!(fit.eccentricity > 0.8);
        assert!(fit.major_axis > fit.minor_axis);
    }

    #[test]
    fn fewer_than_three_distinct_points_is_an_error() {
        let points = vec![(0.0, 0.0), (0.0, 0.0)];
        assert!(matches!(fit(&points), Err(AttrError::DegenerateContour(1))));
    }
}
