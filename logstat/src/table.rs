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

//! Exact key-to-count mapping built from the filtered record stream.

use std::collections::HashMap;
use std::collections::hash_map;

/// Occurrence counts per key.
///
/// Every stored key has a count of at least one; a key is inserted on its
/// first occurrence and incremented afterward. Iteration order is
/// unspecified and must not influence query results.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        FrequencyTable::default()
    }

    /// Records one occurrence of `key`.
    ///
    /// The key is only copied on its first occurrence.
    pub fn record(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_owned(), 1);
            }
        }
    }

    /// Returns the number of distinct keys.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no key has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the count recorded for `key`, or zero if absent.
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
