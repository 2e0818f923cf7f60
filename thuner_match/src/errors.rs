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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

/// match-solver errors are logged and the step falls back
/// to "all previous objects dying" rather than propagating - so this is
/// deliberately a small, all-recoverable enum. `thuner_track` decides
/// whether to log-and-fallback or to surface the error further.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("cost matrix is degenerate (all entries at max_cost); assignment infeasible")]
    DegenerateCostMatrix,

    #[error("previous and next masks have mismatched shapes: {previous:?} vs {next:?}")]
    ShapeMismatch { previous: (usize, usize), next: (usize, usize) },
}
