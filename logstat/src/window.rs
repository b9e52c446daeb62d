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

//! Inclusive timestamp windows for record filtering.

/// An inclusive timestamp range `[from, to]`.
///
/// The default window accepts every non-negative timestamp: `from` is `0` and
/// `to` is `i64::MAX`. Either bound may be overridden independently, and
/// negative bounds are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    from: i64,
    to: i64,
}

impl TimeWindow {
    /// Creates a window spanning `[from, to]`, both ends inclusive.
    pub fn new(from: i64, to: i64) -> Self {
        TimeWindow { from, to }
    }

    /// Returns the inclusive lower bound.
    pub fn from(&self) -> i64 {
        self.from
    }

    /// Returns the inclusive upper bound.
    pub fn to(&self) -> i64 {
        self.to
    }

    /// Returns true if `timestamp` falls inside the window.
    pub fn contains(&self, timestamp: i64) -> bool {
        self.from <= timestamp && timestamp <= self.to
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow {
            from: 0,
            to: i64::MAX,
        }
    }
}
