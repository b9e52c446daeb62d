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

//! Binary search for a scan start offset in a timestamp-sorted file.
//!
//! On large inputs that are sorted (or loosely sorted) by timestamp, a
//! windowed query does not have to read the file from the top. The search
//! probes byte offsets, aligns each probe forward to the next line start,
//! and narrows on the probed record's timestamp until it finds the first
//! line start whose record reaches the target.
//!
//! The caller widens the window by its jitter allowance before computing
//! the target, so loosely sorted input only needs the disorder to stay
//! within that allowance. On unsorted input the returned offset is
//! meaningless, which is why fast seeking is opt-in.

use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::str::from_utf8;

use log::debug;
use log::trace;

use crate::record::LogRecord;

/// Outcome of probing one byte offset.
#[derive(Debug)]
enum Probe {
    /// A complete line begins at `start`; `next` is the offset just past it.
    /// `timestamp` is `None` when the line does not parse as a record.
    Record {
        start: u64,
        timestamp: Option<i64>,
        next: u64,
    },
    /// No complete line begins at or after the probed offset.
    PastEnd,
}

/// Returns a line-start offset from which scanning reaches every record
/// with a timestamp at or above `target`.
///
/// Assumes the input is sorted by timestamp; records that fail to parse
/// order below every target, so unparseable header junk at the top of a
/// file is skipped over. Returns the input length when every record sits
/// below the target. The stream position is unspecified afterward; seek
/// before reading.
pub fn locate_start<R: Read + Seek>(input: &mut R, target: i64) -> io::Result<u64> {
    let len = input.seek(SeekFrom::End(0))?;
    // Every record starting before `lo` has been certified below the
    // target, and `lo` is always a line start, so `lo` is the answer once
    // the range is empty. A probe below the target advances `lo` past the
    // record it examined; any other outcome pulls `hi` down to the probe.
    let mut lo = 0u64;
    let mut hi = len;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match probe(input, mid, len)? {
            Probe::Record {
                start,
                timestamp: Some(timestamp),
                ..
            } if timestamp >= target => {
                trace!("probe {mid}: record at {start} has timestamp {timestamp}, going left");
                hi = mid;
            }
            Probe::Record { next, .. } => {
                trace!("probe {mid}: record below target, resuming at {next}");
                lo = next;
            }
            Probe::PastEnd => {
                trace!("probe {mid}: past the last complete line, going left");
                hi = mid;
            }
        }
    }

    debug!("fast seek starts the scan at offset {lo} of {len}");
    Ok(lo)
}

/// Probes `position`: aligns forward to the next line start and reads the
/// line there.
///
/// Offset 0 is already a line start; any other probe discards the partial
/// line it lands in. The alignment always moves forward, so the search
/// shrinks its range on every outcome.
fn probe<R: Read + Seek>(input: &mut R, position: u64, len: u64) -> io::Result<Probe> {
    if position >= len {
        return Ok(Probe::PastEnd);
    }
    input.seek(SeekFrom::Start(position))?;
    let mut reader = BufReader::new(input);
    let mut buf = Vec::new();

    let start = if position == 0 {
        0
    } else {
        let skipped = reader.read_until(b'\n', &mut buf)? as u64;
        let start = position + skipped;
        if buf.last().copied() != Some(b'\n') || start >= len {
            return Ok(Probe::PastEnd);
        }
        buf.clear();
        start
    };

    let line_len = reader.read_until(b'\n', &mut buf)? as u64;
    if line_len == 0 {
        return Ok(Probe::PastEnd);
    }
    let timestamp = from_utf8(&buf)
        .ok()
        .and_then(LogRecord::parse)
        .map(|record| record.timestamp());
    Ok(Probe::Record {
        start,
        timestamp,
        next: start + line_len,
    })
}
