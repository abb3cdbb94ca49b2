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

//! User-facing failures of the viewer surface. The window engine itself never
//! fails: every input it receives is clamped instead.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Transcript file not found")]
    TranscriptNotFound,
    #[error("Transcript file could not be parsed")]
    TranscriptInvalid,
    #[error("Window config file could not be read or parsed")]
    ConfigUnreadable,
    #[error("Invalid window config: {0}")]
    InvalidConfig(&'static str),
    #[error("Terminal setup failed")]
    TerminalFailed,
}

impl AppError {
    pub const TRANSCRIPT_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const TRANSCRIPT_INVALID_EXIT_CODE: i32 = 21;
    pub const CONFIG_UNREADABLE_EXIT_CODE: i32 = 22;
    pub const INVALID_CONFIG_EXIT_CODE: i32 = 23;
    pub const TERMINAL_FAILED_EXIT_CODE: i32 = 24;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TranscriptNotFound => Self::TRANSCRIPT_NOT_FOUND_EXIT_CODE,
            Self::TranscriptInvalid => Self::TRANSCRIPT_INVALID_EXIT_CODE,
            Self::ConfigUnreadable => Self::CONFIG_UNREADABLE_EXIT_CODE,
            Self::InvalidConfig(_) => Self::INVALID_CONFIG_EXIT_CODE,
            Self::TerminalFailed => Self::TERMINAL_FAILED_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::TranscriptNotFound => "The transcript file does not exist or is not readable.",
            Self::TranscriptInvalid => {
                "The transcript is neither a JSON array of entries nor JSON Lines."
            }
            Self::ConfigUnreadable => "The window config file could not be read as JSON.",
            Self::InvalidConfig(_) => {
                "The window config is invalid. Floors and page steps must be at least 1."
            }
            Self::TerminalFailed => "Failed to initialize or restore the terminal.",
        }
    }
}
