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

mod load;

pub use load::{load_transcript, parse_transcript};

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Tool call IDs currently expanded for detail display.
/// Owned by the host UI; the window engine only ever borrows a snapshot.
pub type ExpandedSet = HashSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    User,
    Assistant,
    System,
    Tool,
}

impl EntryKind {
    /// Role label drawn on the header row of every entry.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Claude",
            Self::System => "System",
            Self::Tool => "Tool",
        }
    }
}

/// One transcript item, ordered by arrival.
///
/// Only the newest entry may still change (streamed text); everything before
/// it is treated as immutable for height measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entry {
    User {
        content: String,
    },
    Assistant {
        content: String,
    },
    System {
        content: String,
    },
    Tool(ToolCallEntry),
}

/// A tool invocation. `content` is the one-line summary (e.g. `Read src/lib.rs`),
/// `input` and `result` are only drawn when the entry is expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallEntry {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl Entry {
    pub fn user(content: impl Into<String>) -> Self {
        Self::User { content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant { content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::System { content: content.into() }
    }

    pub fn tool(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool(ToolCallEntry::new(id, content))
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::User { .. } => EntryKind::User,
            Self::Assistant { .. } => EntryKind::Assistant,
            Self::System { .. } => EntryKind::System,
            Self::Tool(_) => EntryKind::Tool,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::User { content } | Self::Assistant { content } | Self::System { content } => {
                content
            }
            Self::Tool(tc) => &tc.content,
        }
    }

    /// Append streamed text to this entry. Used for the in-flight tail only.
    pub fn push_str(&mut self, text: &str) {
        match self {
            Self::User { content } | Self::Assistant { content } | Self::System { content } => {
                content.push_str(text);
            }
            Self::Tool(tc) => tc.content.push_str(text),
        }
    }

    pub fn tool_id(&self) -> Option<&str> {
        match self {
            Self::Tool(tc) => Some(tc.id.as_str()),
            _ => None,
        }
    }

    /// Whether this entry is expanded in the given snapshot.
    /// Non-tool entries are never expanded.
    pub fn is_expanded(&self, expanded: &ExpandedSet) -> bool {
        self.tool_id().is_some_and(|id| expanded.contains(id))
    }
}

impl ToolCallEntry {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { id: id.into(), content: content.into(), input: None, result: None }
    }

    #[must_use]
    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Text form of the structured input. JSON strings are shown verbatim,
    /// everything else pretty-printed. `null` has no preview.
    pub fn input_preview(&self) -> Option<Cow<'_, str>> {
        match self.input.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => serde_json::to_string_pretty(other).ok().map(Cow::Owned),
        }
    }

    pub fn result_preview(&self) -> Option<&str> {
        self.result.as_deref()
    }
}

impl From<ToolCallEntry> for Entry {
    fn from(tc: ToolCallEntry) -> Self {
        Self::Tool(tc)
    }
}
