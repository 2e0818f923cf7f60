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

//! the TINT/MINT corrected-flow case table, transcribed from
//! `original_source/thor/match/tint.py::correct_local_flow`. `history` is
//! the previous step's displacement for this object, already scaled by
//! the ratio of the current to previous time interval by the caller.

use crate::options::CorrectedFlowPolicy;
use crate::types::MatchCase;

fn magnitude(v: (f64, f64)) -> f64 { (v.0 * v.0 + v.1 * v.1).sqrt() }

fn average(a: (f64, f64), b: (f64, f64)) -> (f64, f64) { ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0) }

/// `true` when the two flow vectors differ by more than `max_diff`.
fn shifts_disagree(a: (f64, f64), b: (f64, f64), max_diff: f64) -> bool {
    magnitude((a.0 - b.0, a.1 - b.1)) > max_diff
}

/// picks the corrected flow `f*` for one previous object, following the
/// TINT/MINT case table over local flow, global flow, and flow history.
pub fn select_corrected_flow(
    local: (f64, f64),
    global: (f64, f64),
    history: Option<(f64, f64)>,
    policy: CorrectedFlowPolicy,
    max_diff: f64,
    max_diff_alt: f64,
) -> ((f64, f64), MatchCase) {
    match history {
        None => {
            if shifts_disagree(local, global, max_diff) {
                (global, MatchCase::NoHistoryDisagree)
            } else {
                (average(local, global), MatchCase::NoHistoryAgree)
            }
        }
        Some(h) => {
            let local_history_agree = !shifts_disagree(local, h, max_diff);
            let local_global_agree = !shifts_disagree(local, global, max_diff);

            if local_history_agree {
                match policy {
                    CorrectedFlowPolicy::Tint => (average(local, h), MatchCase::HistoryAgrees),
                    CorrectedFlowPolicy::Mint => {
                        if shifts_disagree(local, global, max_diff_alt) {
                            (global, MatchCase::HistoryAgrees)
                        } else {
                            (local, MatchCase::HistoryAgrees)
                        }
                    }
                }
            } else if local_global_agree {
                (local, MatchCase::HistoryDisagreesLocalAgreesGlobal)
            } else {
                (h, MatchCase::AllDisagree)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_history_agreeing_flows_average() {
        let (f, case) = select_corrected_flow((2.0, 2.0), (2.2, 1.8), None, CorrectedFlowPolicy::Tint, 1.0, 1.0);
        assert_eq!(case, MatchCase::NoHistoryAgree);
        assert!((f.0 - 2.1).abs() < 1e-9);
    }

    #[test]
    fn no_history_disagreeing_flows_use_global() {
        let (f, case) = select_corrected_flow((2.0, 2.0), (8.0, 8.0), None, CorrectedFlowPolicy::Tint, 1.0, 1.0);
        assert_eq!(case, MatchCase::NoHistoryDisagree);
        assert_eq!(f, (8.0, 8.0));
    }

    #[test]
    fn history_agrees_with_local_under_tint_averages() {
        let (f, case) = select_corrected_flow((3.0, 1.0), (9.0, 9.0), Some((3.2, 1.1)), CorrectedFlowPolicy::Tint, 1.0, 1.0);
        assert_eq!(case, MatchCase::HistoryAgrees);
        assert!((f.0 - 3.1).abs() < 1e-9);
    }

    #[test]
    fn history_disagrees_but_global_agrees_uses_local() {
        let (f, case) = select_corrected_flow((3.0, 1.0), (3.1, 1.0), Some((9.0, 9.0)), CorrectedFlowPolicy::Tint, 1.0, 1.0);
        assert_eq!(case, MatchCase::HistoryDisagreesLocalAgreesGlobal);
        assert_eq!(f, (3.0, 1.0));
    }

    #[test]
    fn all_disagree_falls_back_to_history() {
        let (f, case) = select_corrected_flow((3.0, 1.0), (9.0, 9.0), Some((0.0, 0.0)), CorrectedFlowPolicy::Tint, 1.0, 1.0);
        assert_eq!(case, MatchCase::AllDisagree);
        assert_eq!(f, (0.0, 0.0));
    }
}
