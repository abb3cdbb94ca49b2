// transcript_window - Virtualized transcript windowing for terminal chat UIs
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

pub mod app;
pub mod error;
pub mod perf;
pub mod transcript;
pub mod ui;
pub mod window;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "transcript-view",
    about = "Page through a chat transcript without drawing the whole history"
)]
pub struct Cli {
    /// Transcript file: a JSON array of entries or JSON Lines
    pub transcript: PathBuf,

    /// Window config file (JSON)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Entries moved per PageUp/PageDown (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_step: Option<u64>,

    /// Minimum body rows on tiny terminals (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub min_rows: Option<u64>,

    /// Start with every tool call expanded
    #[arg(long)]
    pub expand_tools: bool,

    /// Stream the transcript in, one entry every N milliseconds, with assistant
    /// replies arriving a few words at a time
    #[arg(long, value_name = "MS")]
    pub replay_ms: Option<u64>,

    /// Write tracing diagnostics to a file (disabled unless explicitly set)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (example: `info,transcript_window::window=trace`)
    /// Falls back to `RUST_LOG` when omitted.
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to `--log-file` instead of truncating on startup
    #[arg(long)]
    pub log_append: bool,

    /// Write frame performance events to a file (requires `--features perf` build)
    #[arg(long, value_name = "PATH")]
    pub perf_log: Option<PathBuf>,

    /// Append to `--perf-log` instead of truncating on startup
    #[arg(long)]
    pub perf_log_append: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, config: &mut window::WindowConfig) {
        if let Some(step) = self.page_step.and_then(|s| usize::try_from(s).ok()) {
            config.page_step = step;
        }
        if let Some(rows) = self.min_rows.and_then(|r| usize::try_from(r).ok()) {
            config.min_rows = rows;
        }
    }
}
