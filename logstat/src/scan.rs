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

//! Single-pass aggregation of an input stream into a frequency table.
//!
//! The scanner reads line by line through one reused buffer, parses each
//! line as a record, applies the timestamp window, and counts the keys of
//! the records that fall inside it. Malformed lines (including lines that
//! are not valid UTF-8) are tallied and skipped; only I/O failures abort
//! the scan.

use std::io;
use std::io::BufRead;
use std::str::from_utf8;
use std::time::Instant;

use log::debug;
use log::info;

use crate::record::LogRecord;
use crate::table::FrequencyTable;
use crate::window::TimeWindow;

/// Per-line accounting for one scan.
///
/// Every input line lands in exactly one bucket: `matched` (valid record
/// inside the window), `skipped` (valid record outside the window), or
/// `invalid` (malformed line).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    matched: u64,
    skipped: u64,
    invalid: u64,
}

impl ScanStats {
    /// Returns the number of records counted into the table.
    pub fn matched(&self) -> u64 {
        self.matched
    }

    /// Returns the number of valid records outside the window.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Returns the number of malformed lines.
    pub fn invalid(&self) -> u64 {
        self.invalid
    }

    /// Returns the total number of lines read.
    pub fn lines(&self) -> u64 {
        self.matched + self.skipped + self.invalid
    }
}

/// Windowed scan over a line stream.
#[derive(Debug, Clone, Copy)]
pub struct Scanner {
    window: TimeWindow,
    stop_after: Option<i64>,
}

impl Scanner {
    /// Creates a scanner that reads its input to exhaustion.
    pub fn new(window: TimeWindow) -> Self {
        Scanner {
            window,
            stop_after: None,
        }
    }

    /// Ends the scan early once a valid record's timestamp exceeds
    /// `timestamp`.
    ///
    /// Only meaningful on input that is at least loosely sorted by
    /// timestamp; on unsorted input it drops records arbitrarily.
    pub fn with_stop_after(mut self, timestamp: i64) -> Self {
        self.stop_after = Some(timestamp);
        self
    }

    /// Consumes `input` and returns the frequency table together with the
    /// per-line statistics.
    ///
    /// The summary is also emitted through the log layer at info level.
    pub fn scan<R: BufRead>(&self, mut input: R) -> io::Result<(FrequencyTable, ScanStats)> {
        let start = Instant::now();
        let mut table = FrequencyTable::new();
        let mut stats = ScanStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let Some(record) = from_utf8(&buf).ok().and_then(LogRecord::parse) else {
                stats.invalid += 1;
                continue;
            };
            let timestamp = record.timestamp();
            if self.window.contains(timestamp) {
                table.record(record.key());
                stats.matched += 1;
            } else {
                stats.skipped += 1;
            }
            if self.stop_after.is_some_and(|bound| timestamp > bound) {
                debug!("stopping scan at timestamp {timestamp}");
                break;
            }
        }

        info!(
            "scanned {} lines in {:?}: {} matched, {} skipped, {} invalid",
            stats.lines(),
            start.elapsed(),
            stats.matched,
            stats.skipped,
            stats.invalid,
        );
        Ok((table, stats))
    }
}
