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

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Grid(#[from] thuner_grid::GridError),

    #[error(transparent)]
    Track(#[from] thuner_track::TrackError),

    #[error(transparent)]
    Attr(#[from] thuner_attr::AttrError),

    #[error(transparent)]
    Stitch(#[from] thuner_stitch::StitchError),

    #[error(transparent)]
    Analysis(#[from] thuner_analysis::AnalysisError),

    #[error(transparent)]
    Paths(#[from] thuner_paths::PathsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid demo configuration: {0}")]
    Config(String),
}
