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

//! a hand-written shortest-augmenting-path Hungarian algorithm for the
//! square linear sum assignment problem. No crate in the corpus provides
//! an assignment solver, so it is grounded directly in the well-known
//! O(n^3) formulation rather than a corpus precedent.

use ndarray::Array2;

/// solves the minimization assignment problem for a square `n x n` cost
/// matrix, returning `assignment[row] = col`. Callers pad non-square
/// problems with `max_cost` filler rows/columns before calling this.
pub fn solve(cost: &Array2<f64>) -> Vec<usize> {
    let n = cost.nrows();
    assert_eq!(cost.ncols(), n, "solve requires a square cost matrix");
    if n == 0 {
        return Vec::new();
    }

    let inf = f64::INFINITY;
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; n + 1];
    let mut p = vec![0usize; n + 1]; // p[j] = 1-indexed row currently assigned to column j
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![inf; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = inf;
            let mut j1 = 0usize;
            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = cost[[i0 - 1, j - 1]] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }
            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }
            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for j in 1..=n {
        if p[j] != 0 {
            assignment[p[j] - 1] = j - 1;
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn solves_a_textbook_3x3_assignment() {
        let cost = array![[4.0, 1.0, 3.0], [2.0, 0.0, 5.0], [3.0, 2.0, 2.0]];
        let assignment = solve(&cost);
        let total: f64 = assignment.iter().enumerate().map(|(r, &c)| cost[[r, c]]).sum();
        assert_eq!(total, 5.0, "optimal assignment cost should be 5");
    }

    #[test]
    fn assignment_is_a_bijection() {
        let cost = array![[1.0, 2.0], [2.0, 1.0]];
        let assignment = solve(&cost);
        let mut seen = std::collections::HashSet::new();
        for &c in &assignment {
            assert!(seen.insert(c), "column {c} assigned twice");
        }
    }
}
