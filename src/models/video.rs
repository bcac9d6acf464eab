// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Promotional YouTube videos and link parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static YOUTUBE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/.+").expect("valid regex")
});

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").expect("valid regex")
});

/// A video entry shown in the gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl YoutubeVideo {
    pub fn video_id(&self) -> Option<&str> {
        extract_video_id(&self.url)
    }

    /// Canonical watch URL, when the link carries a valid id.
    pub fn watch_url(&self) -> Option<String> {
        self.video_id()
            .map(|id| format!("https://www.youtube.com/watch?v={id}"))
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

/// Request body for adding a video.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewVideo {
    pub url: String,
    pub title: String,
    pub description: String,
}

impl NewVideo {
    /// Trim and validate form input.
    pub fn validate(url: &str, title: &str, description: &str) -> Result<Self, String> {
        let url = url.trim();
        let title = title.trim();
        if url.is_empty() || title.is_empty() {
            return Err("YouTube link and title are required.".into());
        }
        if !is_youtube_link(url) {
            return Err("Please enter a valid YouTube link.".into());
        }
        Ok(Self {
            url: url.to_string(),
            title: title.to_string(),
            description: description.trim().to_string(),
        })
    }
}

pub fn is_youtube_link(url: &str) -> bool {
    YOUTUBE_LINK.is_match(url)
}

/// Extract the 11-character video id from common YouTube URL shapes.
pub fn extract_video_id(url: &str) -> Option<&str> {
    let id = YOUTUBE_ID.captures(url)?.get(1)?.as_str();
    (id.len() == 11).then_some(id)
}
