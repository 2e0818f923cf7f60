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

pub type Result<T> = std::result::Result<T, TrackError>;

/// the track loop's error taxonomy: most variants wrap a lower crate's own
/// error so a failure keeps its original cause, plus two track-loop-local
/// cases that don't originate anywhere else - a bad options file (fatal at
/// validation, before any time step runs) and an adapter failure (fatal
/// for the interval currently being tracked, but not for sibling intervals
/// running on other threads).
#[derive(Error, Debug)]
pub enum TrackError {
    #[error(transparent)]
    Grid(#[from] thuner_grid::GridError),

    #[error(transparent)]
    Detect(#[from] thuner_detect::DetectError),

    #[error(transparent)]
    Flow(#[from] thuner_flow::FlowError),

    #[error(transparent)]
    Match(#[from] thuner_match::MatchError),

    #[error(transparent)]
    Group(#[from] thuner_group::GroupError),

    #[error(transparent)]
    Attr(#[from] thuner_attr::AttrError),

    #[error(transparent)]
    Paths(#[from] thuner_paths::PathsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid track options: {0}")]
    Config(String),

    #[error("dataset adapter {dataset:?} failed: {source}")]
    Adapter { dataset: String, #[source] source: Box<dyn std::error::Error + Send + Sync> },

    #[error("no object named {0:?} is configured in this run's track options")]
    UnknownObject(String),

    #[error("mask store error for object {object:?}: {message}")]
    MaskStore { object: String, message: String },
}
