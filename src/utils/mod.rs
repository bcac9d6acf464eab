// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Shared helper utilities reused by UI components.

pub mod file_icons;

/// Select a Phosphor icon for the given MIME type and file name.
pub use file_icons::icon_for;
