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

//! Per-frame timing log for the window pipeline.
//!
//! Gated behind `--features perf`. Without the feature every function here is
//! an inlined no-op.
//!
//! ```bash
//! cargo run --features perf -- transcript.jsonl --perf-log window.log
//! # {"run":"...","frame":12,"fn":"window::recompute","ms":0.041,"entries":5000}
//! ```

#[cfg(feature = "perf")]
mod enabled {
    use std::cell::RefCell;
    use std::fs::{File, OpenOptions};
    use std::io::{BufWriter, Write};
    use std::path::Path;
    use std::time::Instant;

    struct Sink {
        writer: BufWriter<File>,
        run_id: String,
        frame: u64,
    }

    thread_local! {
        static SINK: RefCell<Option<Sink>> = const { RefCell::new(None) };
    }

    /// Frames between forced flushes of the log file.
    const FLUSH_EVERY: u64 = 240;

    pub(super) fn write_entry(name: &'static str, ms: f64, extra: Option<(&'static str, usize)>) {
        SINK.with(|sink| {
            let mut sink = sink.borrow_mut();
            let Some(sink) = sink.as_mut() else {
                return;
            };
            let mut line = serde_json::json!({
                "run": sink.run_id,
                "frame": sink.frame,
                "fn": name,
                "ms": (ms * 1000.0).round() / 1000.0,
            });
            if let (Some((key, value)), Some(obj)) = (extra, line.as_object_mut()) {
                obj.insert(key.to_owned(), value.into());
            }
            let _ = writeln!(sink.writer, "{line}");
        });
    }

    pub(super) fn is_open() -> bool {
        SINK.with(|sink| sink.borrow().is_some())
    }

    pub struct PerfLogger {
        _private: (),
    }

    impl PerfLogger {
        /// Open (or create) the log file. Returns `None` on I/O error.
        pub fn open(path: &Path, append: bool) -> Option<Self> {
            let mut options = OpenOptions::new();
            options.create(true).write(true);
            if append {
                options.append(true);
            } else {
                options.truncate(true);
            }
            let file = options.open(path).ok()?;
            let mut writer = BufWriter::new(file);
            let run_id = uuid::Uuid::new_v4().to_string();
            let header = serde_json::json!({
                "event": "run_start",
                "run": run_id,
                "pid": std::process::id(),
                "version": env!("CARGO_PKG_VERSION"),
            });
            let _ = writeln!(writer, "{header}");
            let _ = writer.flush();
            SINK.with(|sink| *sink.borrow_mut() = Some(Sink { writer, run_id, frame: 0 }));
            Some(Self { _private: () })
        }

        /// Time a UI section until the returned guard drops.
        #[must_use]
        #[allow(clippy::unused_self)]
        pub fn start(&self, name: &'static str) -> Timer {
            Timer { name, start: Instant::now(), extra: None }
        }

        /// Call once before each drawn frame.
        #[allow(clippy::unused_self)]
        pub fn next_frame(&mut self) {
            SINK.with(|sink| {
                if let Some(sink) = sink.borrow_mut().as_mut() {
                    sink.frame += 1;
                    if sink.frame % FLUSH_EVERY == 0 {
                        let _ = sink.writer.flush();
                    }
                }
            });
        }
    }

    impl Drop for PerfLogger {
        fn drop(&mut self) {
            SINK.with(|sink| {
                if let Some(mut sink) = sink.borrow_mut().take() {
                    let _ = sink.writer.flush();
                }
            });
        }
    }

    pub struct Timer {
        pub(super) name: &'static str,
        pub(super) start: Instant,
        pub(super) extra: Option<(&'static str, usize)>,
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            write_entry(self.name, ms, self.extra);
        }
    }
}

#[cfg(not(feature = "perf"))]
mod disabled {
    use std::path::Path;

    pub struct PerfLogger;
    pub struct Timer;

    #[allow(clippy::unused_self)]
    impl PerfLogger {
        #[inline]
        pub fn open(_path: &Path, _append: bool) -> Option<Self> {
            None
        }
        #[inline]
        #[must_use]
        pub fn start(&self, _name: &'static str) -> Timer {
            Timer
        }
        #[inline]
        pub fn next_frame(&mut self) {}
    }
}

/// Start a timer that logs on drop. `None` when no log is open.
#[cfg(feature = "perf")]
#[must_use]
#[inline]
pub fn start_with(name: &'static str, extra_name: &'static str, extra_val: usize) -> Option<Timer> {
    enabled::is_open().then(|| Timer {
        name,
        start: std::time::Instant::now(),
        extra: Some((extra_name, extra_val)),
    })
}

#[cfg(not(feature = "perf"))]
#[must_use]
#[inline]
pub fn start_with(
    _name: &'static str,
    _extra_name: &'static str,
    _extra_val: usize,
) -> Option<Timer> {
    None
}

/// Instant marker with one numeric field (`ms = 0`).
#[cfg(feature = "perf")]
#[inline]
pub fn mark_with(name: &'static str, extra_name: &'static str, extra_val: usize) {
    enabled::write_entry(name, 0.0, Some((extra_name, extra_val)));
}

#[cfg(not(feature = "perf"))]
#[inline]
pub fn mark_with(_name: &'static str, _extra_name: &'static str, _extra_val: usize) {}

#[cfg(feature = "perf")]
pub use enabled::{PerfLogger, Timer};

#[cfg(not(feature = "perf"))]
pub use disabled::{PerfLogger, Timer};
