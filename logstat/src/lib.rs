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

//! Windowed frequency analysis of timestamped key logs.
//!
//! # Overview
//!
//! The input is a text file of `TIMESTAMP\tKEY` lines. One sequential pass
//! counts the occurrences of every key whose timestamp falls inside an
//! inclusive window, and the resulting [`FrequencyTable`] answers either of
//! two queries: the number of distinct keys, or the N most frequent keys
//! via the bounded selector in [`top_entries`]. Malformed lines are counted
//! and skipped, never fatal.
//!
//! On inputs sorted by timestamp, [`locate_start`] can binary-search a scan
//! start near the window's lower bound instead of reading from the top; the
//! command-line front end exposes this as `--fast-seek`.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use logstat::Scanner;
//! use logstat::TimeWindow;
//! use logstat::top_entries;
//!
//! let input = "10\ta\n20\tb\n20\ta\n30\ta\n";
//! let scanner = Scanner::new(TimeWindow::new(15, 30));
//! let (table, stats) = scanner.scan(Cursor::new(input))?;
//! assert_eq!(table.distinct(), 2);
//! assert_eq!(stats.skipped(), 1);
//!
//! let top = top_entries(table, 1);
//! assert_eq!(top[0].key(), "a");
//! assert_eq!(top[0].count(), 2);
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod cli;
mod record;
mod scan;
mod seek;
mod table;
mod top;
mod window;

pub use self::record::LogRecord;
pub use self::scan::ScanStats;
pub use self::scan::Scanner;
pub use self::seek::locate_start;
pub use self::table::FrequencyTable;
pub use self::top::RankedEntry;
pub use self::top::TopSelector;
pub use self::top::top_entries;
pub use self::window::TimeWindow;
