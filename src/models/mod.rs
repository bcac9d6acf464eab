// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Domain layer: pure data types and validation helpers shared between UI and API logic.

pub mod listing;
pub mod media;
pub mod session;
pub mod telegram;
pub mod video;
