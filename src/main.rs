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

use clap::Parser;
use std::fs::OpenOptions;
use std::time::{Duration, Instant};
use transcript_window::Cli;
use transcript_window::app::App;
use transcript_window::error::AppError;
use transcript_window::window::{WindowConfig, load_config};

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            eprintln!("{err:#}");
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    #[cfg(not(feature = "perf"))]
    if cli.perf_log.is_some() {
        return Err(anyhow::anyhow!("`--perf-log` requires a binary built with `--features perf`"));
    }

    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => WindowConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate().map_err(anyhow::Error::new)?;

    let load_started = Instant::now();
    let entries = transcript_window::transcript::load_transcript(&cli.transcript)?;
    tracing::info!("Loaded {} entries in {:?}", entries.len(), load_started.elapsed());

    let title = cli
        .transcript
        .file_name()
        .map_or_else(|| cli.transcript.display().to_string(), |n| n.to_string_lossy().into_owned());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let replay = cli.replay_ms.map(Duration::from_millis);
        let (initial, pending) =
            if replay.is_some() { (Vec::new(), entries) } else { (entries, Vec::new()) };

        let mut app = App::new(initial, config, title);
        app.source = Some(cli.transcript.clone());
        if cli.expand_tools {
            app.toggle_all_tool_calls();
        }
        if let Some(path) = cli.perf_log.as_deref() {
            app.perf = transcript_window::perf::PerfLogger::open(path, cli.perf_log_append);
            if app.perf.is_none() {
                tracing::warn!("could not open perf log {}", path.display());
            }
        }
        if let Some(interval) = replay {
            transcript_window::app::start_replay(&mut app, pending, interval);
        }

        transcript_window::app::run_tui(&mut app).await
    })
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        log_append = cli.log_append,
        "tracing enabled"
    );

    Ok(())
}
