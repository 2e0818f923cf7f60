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

//! universal object identity. The original tracker numbers objects by
//! position within a step's label array, which is reused across time
//! steps and is not a stable identity; `universal_id` is the stable one,
//! minted once per newly-born object and carried forward across matches
//! for as long as the object survives.

use std::sync::atomic::{AtomicU64, Ordering};

/// a per-run, per-object-type counter. `1` is the first id handed out, so
/// `0` can be reserved to mean "no identity yet" in csv output.
#[derive(Debug, Default)]
pub struct IdentityCounter {
    next: AtomicU64,
}

impl IdentityCounter {
    pub fn new() -> Self {
        IdentityCounter { next: AtomicU64::new(1) }
    }

    /// mints and returns the next universal id. `Relaxed` ordering is fine
    /// here: the counter is only ever touched from the single thread
    /// running this object type's track loop.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_increasing_ids_starting_at_one() {
        let counter = IdentityCounter::new();
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
        assert_eq!(counter.next(), 3);
    }
}
