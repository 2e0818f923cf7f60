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

//! a bounded ring buffer used for the per-object-type history deques
//! (grids, masks, match records, times) the track loop keeps so that each
//! step only needs the current and immediately preceding frame. Modeled on
//! the `VecDeque`-as-ringbuffer idiom used for aircraft position history
//! elsewhere in the corpus.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct History<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> History<T> {
    /// `capacity` is the `deque_length` track option; the invariant
    /// `deque_length >= 2` (current + "next" slot) is enforced by the
    /// caller when validating track options, not here.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "history capacity must be at least 1");
        History { capacity, items: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn capacity(&self) -> usize { self.capacity }

    /// the most recently pushed item ("current" for the step about to run).
    pub fn latest(&self) -> Option<&T> { self.items.back() }

    /// the item pushed immediately before the latest one ("previous").
    pub fn previous(&self) -> Option<&T> {
        let n = self.items.len();
        if n < 2 { None } else { self.items.get(n - 2) }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> { self.items.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_drops_oldest() {
        let mut h: History<i32> = History::new(2);
        h.push(1);
        h.push(2);
        h.push(3);
        assert_eq!(h.len(), 2);
        assert_eq!(h.previous(), Some(&2));
        assert_eq!(h.latest(), Some(&3));
    }

    #[test]
    fn single_item_has_no_previous() {
        let mut h: History<i32> = History::new(3);
        h.push(42);
        assert_eq!(h.latest(), Some(&42));
        assert_eq!(h.previous(), None);
    }
}
