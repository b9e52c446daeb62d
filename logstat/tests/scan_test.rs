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

use std::io::Cursor;
use std::io::Seek;
use std::io::SeekFrom;

use googletest::prelude::*;
use logstat::FrequencyTable;
use logstat::ScanStats;
use logstat::Scanner;
use logstat::TimeWindow;
use logstat::locate_start;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn scan_str(input: &str, window: TimeWindow) -> (FrequencyTable, ScanStats) {
    Scanner::new(window).scan(Cursor::new(input)).unwrap()
}

#[gtest]
fn test_counts_keys_inside_the_window() -> Result<()> {
    let input = "10\ta\n20\tb\n20\ta\n30\ta\n";
    let (table, stats) = scan_str(input, TimeWindow::new(15, 30));

    verify_that!(table.distinct(), eq(2))?;
    verify_that!(table.count("a"), eq(2))?;
    verify_that!(table.count("b"), eq(1))?;
    verify_that!(stats.matched(), eq(3))?;
    verify_that!(stats.skipped(), eq(1))
}

#[gtest]
fn test_window_bounds_are_inclusive() -> Result<()> {
    let input = "14\ta\n15\tb\n30\tc\n31\td\n";
    let (table, _) = scan_str(input, TimeWindow::new(15, 30));

    verify_that!(table.count("a"), eq(0))?;
    verify_that!(table.count("b"), eq(1))?;
    verify_that!(table.count("c"), eq(1))?;
    verify_that!(table.count("d"), eq(0))
}

#[gtest]
fn test_malformed_lines_never_count_and_never_abort() {
    let input = "abc\tkey1\n123\n123\tkey\textra\n10\tkey1\n\n1.5\tkey1\n";
    let (table, stats) = scan_str(input, TimeWindow::default());

    expect_that!(table.distinct(), eq(1));
    expect_that!(table.count("key1"), eq(1));
    expect_that!(stats.matched(), eq(1));
    expect_that!(stats.invalid(), eq(5));
}

#[gtest]
fn test_every_line_lands_in_exactly_one_bucket() -> Result<()> {
    let input = "10\ta\nnoise\n50\tb\n999\tc\n42\td\nbad line\n";
    let (_, stats) = scan_str(input, TimeWindow::new(0, 100));

    verify_that!(
        stats.matched() + stats.skipped() + stats.invalid(),
        eq(stats.lines())
    )?;
    verify_that!(stats.lines(), eq(6))
}

#[gtest]
fn test_default_window_drops_negative_timestamps() -> Result<()> {
    let input = "-5\tearly\n0\tzero\n7\tlate\n";
    let (table, stats) = scan_str(input, TimeWindow::default());

    verify_that!(table.count("early"), eq(0))?;
    verify_that!(table.count("zero"), eq(1))?;
    verify_that!(table.count("late"), eq(1))?;
    verify_that!(stats.skipped(), eq(1))
}

#[gtest]
fn test_explicit_window_reaches_negative_timestamps() -> Result<()> {
    let input = "-5\tearly\n0\tzero\n7\tlate\n";
    let (table, _) = scan_str(input, TimeWindow::new(-10, 5));

    verify_that!(table.count("early"), eq(1))?;
    verify_that!(table.count("zero"), eq(1))?;
    verify_that!(table.count("late"), eq(0))
}

#[gtest]
fn test_keys_compare_verbatim() -> Result<()> {
    // Leading spaces after the tab belong to the key; trailing whitespace is
    // part of the line trim and folds away.
    let input = "1\tkey\n2\t key\n3\tkey \n";
    let (table, _) = scan_str(input, TimeWindow::default());

    verify_that!(table.distinct(), eq(2))?;
    verify_that!(table.count("key"), eq(2))?;
    verify_that!(table.count(" key"), eq(1))
}

#[gtest]
fn test_repeated_timestamps_all_count() -> Result<()> {
    let input = "7\ta\n7\ta\n7\tb\n";
    let (table, _) = scan_str(input, TimeWindow::new(7, 7));

    verify_that!(table.count("a"), eq(2))?;
    verify_that!(table.count("b"), eq(1))
}

#[gtest]
fn test_empty_input_yields_empty_table() -> Result<()> {
    let (table, stats) = scan_str("", TimeWindow::default());

    verify_that!(table.distinct(), eq(0))?;
    verify_that!(stats.lines(), eq(0))
}

#[gtest]
fn test_seek_then_scan_matches_full_scan_on_sorted_input() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x1057a7);

    for _ in 0..20 {
        let mut timestamps: Vec<i64> = (0..500).map(|_| rng.random_range(0..100_000)).collect();
        timestamps.sort_unstable();
        let data: String = timestamps
            .iter()
            .enumerate()
            .map(|(i, ts)| format!("{ts}\tkey{}\n", i % 17))
            .collect();

        let from = rng.random_range(0..100_000);
        let to = from + rng.random_range(0..50_000);
        let window = TimeWindow::new(from, to);

        let (full, _) = scan_str(&data, window);

        let mut cursor = Cursor::new(data.as_str());
        let offset = locate_start(&mut cursor, from).unwrap();
        cursor.seek(SeekFrom::Start(offset)).unwrap();
        let (fast, _) = Scanner::new(window)
            .with_stop_after(to)
            .scan(cursor)
            .unwrap();

        verify_that!(fast.distinct(), eq(full.distinct()))?;
        for key in (0..17).map(|i| format!("key{i}")) {
            verify_that!(fast.count(&key), eq(full.count(&key)))?;
        }
    }
    Ok(())
}
