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

use super::App;
use crate::transcript::Entry;
use std::time::Duration;
use tokio::sync::mpsc;

/// Words per streamed chunk of an assistant reply.
const WORDS_PER_CHUNK: usize = 6;

/// Streamed chunks arrive this many times faster than whole entries.
const CHUNK_SPEEDUP: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    /// A new entry starts.
    Push(Entry),
    /// More text for the newest entry.
    Stream(String),
}

/// The events a live session would have produced for `entries`: assistant
/// replies arrive a few words at a time, everything else whole.
pub fn replay_events(entries: Vec<Entry>) -> Vec<ReplayEvent> {
    let mut events = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Entry::Assistant { content } => {
                let mut chunks = chunk_words(&content).into_iter();
                let first = chunks.next().unwrap_or_default();
                events.push(ReplayEvent::Push(Entry::assistant(first)));
                events.extend(chunks.map(ReplayEvent::Stream));
            }
            other => events.push(ReplayEvent::Push(other)),
        }
    }
    events
}

fn chunk_words(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut words = 0;
    for word in text.split_inclusive(char::is_whitespace) {
        current.push_str(word);
        words += 1;
        if words == WORDS_PER_CHUNK {
            chunks.push(std::mem::take(&mut current));
            words = 0;
        }
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Feed `entries` into the app as a live session would, one entry every
/// `interval`, streaming assistant text into the tail in between.
pub fn start_replay(app: &mut App, entries: Vec<Entry>, interval: Duration) {
    let (tx, rx) = mpsc::unbounded_channel();
    app.replay_rx = Some(rx);
    let events = replay_events(entries);
    tokio::spawn(async move {
        let chunk_interval = (interval / CHUNK_SPEEDUP).max(Duration::from_millis(1));
        for event in events {
            let delay = match event {
                ReplayEvent::Push(_) => interval,
                ReplayEvent::Stream(_) => chunk_interval,
            };
            tokio::time::sleep(delay).await;
            if tx.send(event).is_err() {
                break;
            }
        }
        tracing::debug!("replay finished");
    });
}

pub(super) async fn next_replay_event(
    rx: Option<&mut mpsc::UnboundedReceiver<ReplayEvent>>,
) -> Option<ReplayEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
