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

//! time handling for attribute tables and mask stores, both of which are
//! specified to use ISO-8601 *seconds* resolution (not milliseconds, unlike
//! odin-rs's `EpochMillis` which targets live telemetry).

use std::fmt;
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct EpochSeconds(i64);

impl EpochSeconds {
    pub fn new(seconds: i64) -> Self { EpochSeconds(seconds) }
    pub fn seconds(&self) -> i64 { self.0 }

    pub fn from_datetime<Tz: TimeZone>(t: DateTime<Tz>) -> Self { EpochSeconds(t.timestamp()) }
    pub fn to_utc(&self) -> DateTime<Utc> { Utc.timestamp_opt(self.0, 0).single().expect("valid timestamp") }

    /// the interval between two times, in seconds - used throughout the
    /// track loop for flow-velocity and displacement-velocity scaling.
    pub fn interval_since(&self, earlier: EpochSeconds) -> f64 {
        (self.0 - earlier.0) as f64
    }
}

impl fmt::Display for EpochSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_utc().format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl From<DateTime<Utc>> for EpochSeconds {
    fn from(t: DateTime<Utc>) -> Self { EpochSeconds::from_datetime(t) }
}

impl From<EpochSeconds> for DateTime<Utc> {
    fn from(t: EpochSeconds) -> Self { t.to_utc() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_utc() {
        let now = Utc::now();
        let truncated = Utc.timestamp_opt(now.timestamp(), 0).single().unwrap();
        let es = EpochSeconds::from_datetime(now);
        assert_eq!(es.to_utc(), truncated);
    }

    #[test]
    fn interval_is_signed_seconds() {
        let a = EpochSeconds::new(100);
        let b = EpochSeconds::new(700);
        assert_eq!(b.interval_since(a), 600.0);
    }
}
