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

//! the per-interval track loop: one [`tracks::ObjectTracks`] per
//! configured object type, advanced one time step at a time by
//! [`loop_::advance`] and driven end to end by a per-run binary (see
//! `thuner_cli`) supplying a [`adapter::DatasetAdapter`] per dataset.

pub mod adapter;
pub mod errors;
pub mod identity;
pub mod loop_;
pub mod mask_store;
pub mod options;
pub mod record;
pub mod tracks;

pub use adapter::{AdapterError, DatasetAdapter};
pub use errors::{Result, TrackError};
pub use identity::IdentityCounter;
pub use mask_store::MaskStore;
pub use options::{LevelOptions, MaskOptions, ObjectMethod, ObjectOptions, TrackOptions};
pub use record::ObjectRecord;
pub use tracks::{ObjectTracks, TrackedMask};
