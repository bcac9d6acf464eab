// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Telegram contact links attached to sellers.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::listing::UserRef;

/// A stored Telegram contact link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramLink {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub link: String,
    #[serde(default)]
    pub added_by: Option<UserRef>,
    #[serde(default)]
    pub added_by_role: Option<String>,
}

impl TelegramLink {
    /// "Added by" caption for the admin list.
    pub fn added_by_label(&self) -> Option<String> {
        let user = self.added_by.as_ref()?;
        let role = self.added_by_role.as_deref().unwrap_or("unknown role");
        Some(format!("Added by: {} ({role})", user.display_name()))
    }
}

/// Body returned after a sub-admin saves their own link.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTelegramLink {
    #[serde(default)]
    pub message: Option<String>,
    pub telegram_link: TelegramLink,
}

/// Check that a link is an absolute http(s) URL and return it trimmed.
pub fn validate_link(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Please enter a Telegram link.".into());
    }
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {
            Ok(trimmed.to_string())
        }
        _ => Err("Telegram link must be a valid http/https URL.".into()),
    }
}
