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

use super::Entry;
use crate::error::AppError;
use std::path::Path;

/// Read a transcript file: either one JSON array of entries or JSON Lines.
pub fn load_transcript(path: &Path) -> anyhow::Result<Vec<Entry>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        anyhow::Error::new(AppError::TranscriptNotFound)
            .context(format!("failed to read transcript {}: {e}", path.display()))
    })?;
    let entries = parse_transcript(&raw).map_err(|e| e.context(path.display().to_string()))?;
    tracing::info!(path = %path.display(), entries = entries.len(), "loaded transcript");
    Ok(entries)
}

/// Parse transcript text. A leading `[` selects array mode, anything else is
/// read line by line with blank lines skipped.
pub fn parse_transcript(raw: &str) -> anyhow::Result<Vec<Entry>> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| {
            anyhow::Error::new(AppError::TranscriptInvalid)
                .context(format!("invalid transcript array: {e}"))
        });
    }

    let mut entries = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let entry = serde_json::from_str::<Entry>(line).map_err(|e| {
            anyhow::Error::new(AppError::TranscriptInvalid)
                .context(format!("invalid transcript entry on line {}: {e}", idx + 1))
        })?;
        entries.push(entry);
    }
    Ok(entries)
}
