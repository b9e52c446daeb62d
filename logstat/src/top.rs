// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Bounded top-K selection over a frequency table.
//!
//! # Overview
//!
//! Selecting the N most frequent keys does not require sorting the whole key
//! space. [`TopSelector`] keeps a working set of at most N candidates in a
//! min-heap, so each of the D distinct keys costs `O(log N)` in the worst
//! case, for `O(D log N)` overall instead of `O(D log D)`.
//!
//! # Ordering
//!
//! Candidates are compared by count first, then by key string, both
//! ascending. The strongest candidates under this total order survive; among
//! equal counts that is the lexicographically largest keys. The survivors are
//! then presented highest count first with count ties in ascending key
//! order, so equal-count keys always read in lexicographic order.
//!
//! # Examples
//!
//! ```
//! # use logstat::FrequencyTable;
//! # use logstat::top_entries;
//! let mut table = FrequencyTable::new();
//! for key in ["a", "b", "a", "c", "a", "b"] {
//!     table.record(key);
//! }
//!
//! let top = top_entries(table, 2);
//! assert_eq!(top.len(), 2);
//! assert_eq!((top[0].key(), top[0].count()), ("a", 3));
//! assert_eq!((top[1].key(), top[1].count()), ("b", 2));
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::table::FrequencyTable;

/// A selected (count, key) pair.
///
/// The derived order compares counts first and key strings second, both
/// ascending. Field order carries that comparison, so `count` must stay the
/// first field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankedEntry {
    count: u64,
    key: String,
}

impl RankedEntry {
    /// Returns the occurrence count.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Streaming selector for the N strongest (count, key) candidates.
///
/// Offer every candidate once, then call [`TopSelector::into_ranked`] for
/// the survivors in presentation order.
#[derive(Debug, Clone)]
pub struct TopSelector {
    limit: usize,
    heap: BinaryHeap<Reverse<RankedEntry>>,
}

impl TopSelector {
    /// Creates a selector that retains at most `limit` candidates.
    ///
    /// The working set grows on demand, so a limit far above the number of
    /// candidates costs nothing.
    pub fn new(limit: usize) -> Self {
        TopSelector {
            limit,
            heap: BinaryHeap::new(),
        }
    }

    /// Returns the number of retained candidates.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no candidate has been retained.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offers one candidate.
    ///
    /// Below the limit every candidate is retained. At the limit the
    /// candidate must strictly exceed the current weakest entry to evict it;
    /// otherwise it is discarded.
    pub fn offer(&mut self, key: String, count: u64) {
        if self.limit == 0 {
            return;
        }
        let entry = RankedEntry { count, key };
        if self.heap.len() < self.limit {
            self.heap.push(Reverse(entry));
        } else if self.heap.peek().is_some_and(|weakest| entry > weakest.0) {
            self.heap.pop();
            self.heap.push(Reverse(entry));
        }
    }

    /// Consumes the selector and returns the survivors in presentation
    /// order: count descending, count ties in ascending key order.
    pub fn into_ranked(self) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> =
            self.heap.into_iter().map(|Reverse(entry)| entry).collect();
        entries.sort_unstable_by(|a, b| {
            b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key))
        });
        entries
    }
}

/// Selects the `n` highest-count entries of `table` in presentation order.
///
/// The result holds `min(n, distinct keys)` entries; `n = 0` yields an empty
/// vector. The table's iteration order never affects the result.
pub fn top_entries(table: FrequencyTable, n: usize) -> Vec<RankedEntry> {
    let mut selector = TopSelector::new(n);
    for (key, count) in table {
        selector.offer(key, count);
    }
    selector.into_ranked()
}
