// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Listing ("ID") records as returned by the marketplace backend.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::media::{MimeCategory, SelectableFile};

/// Sale state of a listing. The backend has used both `sold` and `sold out`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[serde(alias = "sold out")]
    Sold,
    #[default]
    #[serde(other)]
    Available,
}

impl ListingStatus {
    /// Status the admin toggle switches to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Sold => Self::Available,
            Self::Available => Self::Sold,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Sold => "Sold",
        }
    }
}

/// Seller reference: populated user document or a bare id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostedBy {
    User(UserRef),
    Id(String),
}

/// Minimal user document embedded in listings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown")
    }
}

impl PostedBy {
    pub fn id(&self) -> &str {
        match self {
            Self::User(user) => &user.id,
            Self::Id(id) => id,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::User(user) => user.username.as_deref(),
            Self::Id(_) => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::User(user) => user.email.as_deref().filter(|e| !e.is_empty()),
            Self::Id(_) => None,
        }
    }
}

/// Kind of a stored media item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Uploaded media item; `url` is relative to the API base URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

/// A gaming account offered for sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ListingStatus,
    /// Role of the poster, e.g. `Admin` or `SubAdmin`.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub posted_by: Option<PostedBy>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub telegram_link: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Listing {
    pub fn seller_name(&self) -> &str {
        self.posted_by
            .as_ref()
            .and_then(PostedBy::username)
            .unwrap_or("Unknown")
    }

    pub fn is_sold(&self) -> bool {
        self.status == ListingStatus::Sold
    }

    /// Last eight characters of the id, as shown on listing cards.
    pub fn short_id(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.id[start..]
    }

    /// Clipboard text for the "Copy details" action.
    pub fn details_text(&self) -> String {
        format!(
            "Product: {}\nPrice: {}\nDescription: {}\nSeller: {}",
            self.title,
            format_price(self.price),
            self.description,
            self.seller_name()
        )
    }
}

/// Sub-admin account as listed for the admin activity view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAdmin {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl SubAdmin {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Validated payload for creating a listing.
#[derive(Clone, Debug)]
pub struct NewListing {
    pub title: String,
    /// Price as typed by the seller; already checked to be a non-negative number.
    pub price: String,
    pub description: String,
    pub media: Arc<[SelectableFile]>,
}

impl NewListing {
    /// Split media into the backend's `image` and `video` field groups,
    /// preserving selection order inside each group.
    pub fn partition_media(&self) -> (Vec<&SelectableFile>, Vec<&SelectableFile>) {
        let images = self
            .media
            .iter()
            .filter(|f| f.category == MimeCategory::Image)
            .collect();
        let videos = self
            .media
            .iter()
            .filter(|f| f.category == MimeCategory::Video)
            .collect();
        (images, videos)
    }
}

/// Format a price with the rupee sign and comma thousands separators.
pub fn format_price(price: f64) -> String {
    let negative = price < 0.0;
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if frac == 0 {
        format!("{sign}₹{grouped}")
    } else if frac % 10 == 0 {
        format!("{sign}₹{grouped}.{}", frac / 10)
    } else {
        format!("{sign}₹{grouped}.{frac:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::{MediaSelectionSet, RawFile};

    const SAMPLE: &str = r#"{
        "_id": "665f1c2e9b1e8a0012345678",
        "title": "Conqueror account",
        "price": 15000,
        "description": "Rare skins",
        "status": "sold out",
        "role": "SubAdmin",
        "postedBy": {"_id": "u1", "username": "seller1", "email": "s@example.com"},
        "media": [{"type": "image", "url": "/uploads/a.png"}, {"type": "video", "url": "/uploads/b.mp4"}],
        "telegramLink": "https://t.me/seller1",
        "createdAt": "2025-01-01T10:00:00.000Z"
    }"#;

    #[test]
    fn parses_backend_listing() {
        let listing: Listing = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(listing.status, ListingStatus::Sold);
        assert_eq!(listing.seller_name(), "seller1");
        assert_eq!(listing.media[1].kind, MediaKind::Video);
        assert_eq!(listing.short_id(), "12345678");
        assert_eq!(
            listing.posted_by.as_ref().and_then(PostedBy::email),
            Some("s@example.com")
        );
        assert!(listing.updated_at.is_none());
    }

    #[test]
    fn posted_by_may_be_a_bare_id() {
        let listing: Listing = serde_json::from_str(
            r#"{"_id": "abc", "title": "t", "price": 1, "postedBy": "u42"}"#,
        )
        .unwrap();
        assert_eq!(listing.posted_by.as_ref().map(PostedBy::id), Some("u42"));
        assert_eq!(listing.seller_name(), "Unknown");
        assert_eq!(listing.status, ListingStatus::Available);
        assert_eq!(listing.short_id(), "abc");
    }

    #[test]
    fn unknown_status_reads_as_available() {
        let status: ListingStatus = serde_json::from_str(r#""reserved""#).unwrap();
        assert_eq!(status, ListingStatus::Available);
        let status: ListingStatus = serde_json::from_str(r#""available""#).unwrap();
        assert_eq!(status, ListingStatus::Available);
        let status: ListingStatus = serde_json::from_str(r#""sold out""#).unwrap();
        assert_eq!(status, ListingStatus::Sold);
        let status: ListingStatus = serde_json::from_str(r#""sold""#).unwrap();
        assert_eq!(status, ListingStatus::Sold);
        assert_eq!(ListingStatus::default(), ListingStatus::Available);
        assert_eq!(
            serde_json::to_string(&ListingStatus::Sold).unwrap(),
            r#""sold""#
        );
    }

    #[test]
    fn toggle_flips_status() {
        assert_eq!(ListingStatus::Sold.toggled(), ListingStatus::Available);
        assert_eq!(ListingStatus::Available.toggled(), ListingStatus::Sold);
    }

    #[test]
    fn price_formatting_groups_thousands() {
        assert_eq!(format_price(0.0), "₹0");
        assert_eq!(format_price(999.0), "₹999");
        assert_eq!(format_price(15000.0), "₹15,000");
        assert_eq!(format_price(1234567.5), "₹1,234,567.5");
        assert_eq!(format_price(10.25), "₹10.25");
    }

    #[test]
    fn details_text_matches_clipboard_layout() {
        let listing: Listing = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            listing.details_text(),
            "Product: Conqueror account\nPrice: ₹15,000\nDescription: Rare skins\nSeller: seller1"
        );
    }

    #[test]
    fn partition_media_splits_by_category_in_order() {
        let mut set = MediaSelectionSet::default();
        set.add_files(vec![
            RawFile::from_bytes("a.mp4", "video/mp4", Arc::from(vec![1u8])),
            RawFile::from_bytes("b.png", "image/png", Arc::from(vec![1u8])),
            RawFile::from_bytes("c.jpg", "image/jpeg", Arc::from(vec![1u8])),
        ])
        .unwrap();
        let payload = NewListing {
            title: "t".into(),
            price: "10".into(),
            description: String::new(),
            media: set.snapshot(),
        };

        let (images, videos) = payload.partition_media();

        let image_names: Vec<&str> = images.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(image_names, vec!["b.png", "c.jpg"]);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].name, "a.mp4");
    }
}
