// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! UI-independent behavior: listing queries and the media readiness ramp.

pub mod listings;
pub mod progress;
