// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Reusable egui components structured for MVU-style updates.

pub mod listing_form;
pub mod listings;
pub mod media_upload;
pub mod pages;
pub mod session;
pub mod subadmin_activity;
pub mod telegram_links;
pub mod videos;
