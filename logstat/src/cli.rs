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

//! Command-line surface and query dispatch.
//!
//! Diagnostics go to stderr through the log layer; stdout carries nothing
//! but the query result, one value or one `KEY COUNT` pair per line.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use env_logger::Env;
use log::LevelFilter;
use log::info;

use crate::scan::Scanner;
use crate::seek::locate_start;
use crate::table::FrequencyTable;
use crate::top::top_entries;
use crate::window::TimeWindow;

/// Windowed frequency queries over timestamped key logs.
#[derive(Debug, Parser)]
#[command(name = "logstat", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise diagnostic verbosity (repeat for more detail).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count the distinct keys inside the window.
    Distinct(ScanArgs),
    /// Print the N most frequent keys inside the window.
    Top(TopArgs),
}

#[derive(Debug, Args)]
struct TopArgs {
    /// Number of entries to print.
    #[arg(value_name = "N")]
    count: usize,

    #[command(flatten)]
    scan: ScanArgs,
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Input file of TIMESTAMP<TAB>KEY lines.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Lowest timestamp included in the window.
    #[arg(long, value_name = "TIMESTAMP", allow_negative_numbers = true)]
    from: Option<i64>,

    /// Highest timestamp included in the window.
    #[arg(long, value_name = "TIMESTAMP", allow_negative_numbers = true)]
    to: Option<i64>,

    /// Binary-search a timestamp-sorted file for the window start.
    #[arg(long)]
    fast_seek: bool,

    /// Disorder tolerated by --fast-seek, in timestamp units.
    #[arg(long, value_name = "SECONDS", default_value_t = 900,
          value_parser = clap::value_parser!(i64).range(0..))]
    jitter: i64,
}

impl ScanArgs {
    fn window(&self) -> TimeWindow {
        let default = TimeWindow::default();
        TimeWindow::new(
            self.from.unwrap_or(default.from()),
            self.to.unwrap_or(default.to()),
        )
    }
}

/// Parses the process arguments, runs the query, and prints the result to
/// stdout.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    execute(cli, &mut io::stdout().lock())
}

/// Runs the parsed query, writing the result to `out`.
pub fn execute<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    match cli.command {
        Command::Distinct(args) => {
            let table = build_table(&args)?;
            writeln!(out, "{}", table.distinct())?;
        }
        Command::Top(args) => {
            let table = build_table(&args.scan)?;
            for entry in top_entries(table, args.count) {
                writeln!(out, "{} {}", entry.key(), entry.count())?;
            }
        }
    }
    Ok(())
}

fn build_table(args: &ScanArgs) -> anyhow::Result<FrequencyTable> {
    let window = args.window();
    let mut file = File::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;

    let mut scanner = Scanner::new(window);
    if args.fast_seek && window.from() > args.jitter {
        let target = window.from().saturating_sub(args.jitter);
        let offset = locate_start(&mut file, target)
            .with_context(|| format!("cannot search {}", args.input.display()))?;
        file.seek(SeekFrom::Start(offset))
            .with_context(|| format!("cannot search {}", args.input.display()))?;
        scanner = scanner.with_stop_after(window.to().saturating_add(args.jitter));
        info!("fast seek skipped the first {offset} bytes");
    }

    let (table, _) = scanner
        .scan(BufReader::new(file))
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    Ok(table)
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if verbose > 0 {
        builder.filter_level(match verbose {
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        });
    }
    // A second init (e.g. under a test harness) keeps the first logger.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_top_with_window() {
        let cli = Cli::try_parse_from([
            "logstat",
            "top",
            "3",
            "queries.log",
            "--from",
            "-5",
            "--to",
            "100",
        ])
        .unwrap();
        match cli.command {
            Command::Top(args) => {
                assert_eq!(args.count, 3);
                assert_eq!(args.scan.input, PathBuf::from("queries.log"));
                assert_eq!(args.scan.window(), TimeWindow::new(-5, 100));
            }
            Command::Distinct(_) => panic!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn window_defaults_open_both_ends() {
        let cli = Cli::try_parse_from(["logstat", "distinct", "queries.log"]).unwrap();
        match cli.command {
            Command::Distinct(args) => {
                assert_eq!(args.window(), TimeWindow::default());
                assert!(!args.fast_seek);
                assert_eq!(args.jitter, 900);
            }
            Command::Top(_) => panic!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["logstat", "bogus", "x.log"]).is_err());
    }

    #[test]
    fn rejects_missing_input() {
        assert!(Cli::try_parse_from(["logstat", "distinct"]).is_err());
        assert!(Cli::try_parse_from(["logstat", "top", "5"]).is_err());
    }

    #[test]
    fn rejects_negative_jitter() {
        let result = Cli::try_parse_from(["logstat", "distinct", "x.log", "--jitter=-1"]);
        assert!(result.is_err());
    }
}
