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

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowOptions {
    /// margin (km) added around an object's bounding box before computing
    /// its local flow vector.
    pub local_flow_margin_km: f32,
    /// margin (km) added around the grid centre before computing the
    /// global flow vector.
    pub global_flow_margin_km: f32,
    /// when `true`, the global flow vector is computed once per step and
    /// shared by every object; when `false`, it is recomputed per object,
    /// centred on that object's flow box.
    #[serde(default = "default_true")]
    pub unique_global_flow: bool,
}

fn default_true() -> bool { true }

impl Default for FlowOptions {
    fn default() -> Self {
        FlowOptions { local_flow_margin_km: 10.0, global_flow_margin_km: 150.0, unique_global_flow: true }
    }
}
