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

//! Parsing of one input line into a timestamped record.
//!
//! A valid line is `TIMESTAMP\tKEY`: an integer timestamp, a single tab, and
//! a key string. Everything else is malformed and skipped by callers, never
//! reported as an error.

/// One parsed input record, borrowing its key from the line buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    timestamp: i64,
    key: &'a str,
}

impl<'a> LogRecord<'a> {
    /// Parses a raw input line.
    ///
    /// The line is trimmed as a whole (stripping the newline and any edge
    /// whitespace) and must then contain exactly one tab. The timestamp field
    /// tolerates surrounding spaces and an explicit sign; the key is taken
    /// verbatim, so interior spaces are preserved.
    ///
    /// Returns `None` for any malformed line: wrong field count, or a first
    /// field that is not an integer.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.trim().split('\t');
        let timestamp = fields.next()?;
        let key = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        let timestamp = timestamp.trim().parse::<i64>().ok()?;
        Some(LogRecord { timestamp, key })
    }

    /// Returns the record timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the record key.
    pub fn key(&self) -> &'a str {
        self.key
    }
}
