// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Blocking REST client for the marketplace backend.
//!
//! Calls run on the command worker threads, never on the UI thread.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, Result};
use crate::models::listing::{Listing, ListingStatus, NewListing, SubAdmin};
use crate::models::media::{MediaSource, SelectableFile};
use crate::models::session::AuthContext;
use crate::models::telegram::{SavedTelegramLink, TelegramLink};
use crate::models::video::{NewVideo, YoutubeVideo};

const USER_AGENT: &str = concat!("swarg-store/", env!("CARGO_PKG_VERSION"));

/// Handle to the backend. Cheap to clone; clones share the connection pool
/// and the session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
    auth: AuthContext,
}

impl ApiClient {
    /// Build a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, auth: AuthContext) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base, auth })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for an API path given as segments (`["api", "ids", id]`).
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve a media URL stored by the backend (usually `/uploads/...`).
    pub fn media_url(&self, stored: &str) -> String {
        if stored.starts_with("http://") || stored.starts_with("https://") {
            return stored.to_string();
        }
        match self.base.join(stored) {
            Ok(url) => url.to_string(),
            Err(_) => stored.to_string(),
        }
    }

    // Listings

    pub fn list_listings(&self) -> Result<Vec<Listing>> {
        let value: Value = self.json(Method::GET, &["api", "ids"], false)?;
        decode_list(value, "listings")
    }

    pub fn my_listings(&self) -> Result<Vec<Listing>> {
        let value: Value = self.json(Method::GET, &["api", "ids", "my"], true)?;
        decode_list(value, "listings")
    }

    pub fn set_listing_status(&self, id: &str, status: ListingStatus) -> Result<()> {
        #[derive(Serialize)]
        struct Body {
            status: ListingStatus,
        }
        let req = self
            .request(Method::PATCH, &["api", "ids", id, "status"], true)?
            .json(&Body { status });
        self.send(req)?;
        Ok(())
    }

    pub fn delete_listing(&self, id: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &["api", "ids", id], true)?;
        self.send(req)?;
        Ok(())
    }

    /// Upload a new listing with its media in one multipart request.
    /// Returns the server's confirmation message.
    pub fn create_listing(&self, listing: &NewListing) -> Result<String> {
        let form = build_listing_form(listing)?;
        let req = self
            .request(Method::POST, &["api", "ids", "create"], true)?
            .multipart(form);
        let body: Value = decode(self.send(req)?)?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("ID created successfully!")
            .to_string())
    }

    pub fn list_subadmins(&self) -> Result<Vec<SubAdmin>> {
        let value: Value = self.json(Method::GET, &["api", "subadmin", "get-all"], true)?;
        decode_list(value, "sub-admins")
    }

    // Telegram links

    /// The signed-in sub-admin's own link; `None` when none is stored.
    pub fn my_telegram_link(&self) -> Result<Option<TelegramLink>> {
        match self.json(Method::GET, &["api", "telegram-links", "subadmin"], true) {
            Ok(link) => Ok(Some(link)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn save_my_telegram_link(&self, link: &str) -> Result<TelegramLink> {
        let req = self
            .request(Method::POST, &["api", "telegram-links", "subadmin"], true)?
            .json(&LinkBody { link });
        let saved: SavedTelegramLink = decode(self.send(req)?)?;
        Ok(saved.telegram_link)
    }

    pub fn delete_my_telegram_link(&self) -> Result<()> {
        let req = self.request(Method::DELETE, &["api", "telegram-links", "subadmin"], true)?;
        self.send(req)?;
        Ok(())
    }

    pub fn list_telegram_links(&self) -> Result<Vec<TelegramLink>> {
        let value: Value = self.json(Method::GET, &["api", "telegram-links"], false)?;
        decode_list(value, "telegram links")
    }

    pub fn create_telegram_link(&self, link: &str) -> Result<()> {
        let req = self
            .request(Method::POST, &["api", "telegram-links"], true)?
            .json(&LinkBody { link });
        self.send(req)?;
        Ok(())
    }

    pub fn update_telegram_link(&self, id: &str, link: &str) -> Result<()> {
        let req = self
            .request(Method::PUT, &["api", "telegram-links", id], true)?
            .json(&LinkBody { link });
        self.send(req)?;
        Ok(())
    }

    pub fn delete_telegram_link(&self, id: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &["api", "telegram-links", id], true)?;
        self.send(req)?;
        Ok(())
    }

    // Videos

    pub fn list_videos(&self) -> Result<Vec<YoutubeVideo>> {
        let value: Value = self.json(Method::GET, &["api", "youtube-videos"], false)?;
        decode_list(value, "videos")
    }

    pub fn add_video(&self, video: &NewVideo) -> Result<YoutubeVideo> {
        let req = self
            .request(Method::POST, &["api", "youtube-videos"], true)?
            .json(video);
        decode(self.send(req)?)
    }

    pub fn delete_video(&self, id: &str) -> Result<()> {
        let req = self.request(Method::DELETE, &["api", "youtube-videos", id], true)?;
        self.send(req)?;
        Ok(())
    }

    // Plumbing

    fn request(&self, method: Method, segments: &[&str], auth: bool) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, %url, "api request");
        let req = self.http.request(method, url);
        if !auth {
            return Ok(req);
        }
        let token = self.auth.token().ok_or(ApiError::MissingSession)?;
        Ok(req.bearer_auth(token))
    }

    fn json<T: DeserializeOwned>(&self, method: Method, segments: &[&str], auth: bool) -> Result<T> {
        let req = self.request(method, segments, auth)?;
        decode(self.send(req)?)
    }

    fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = req.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let url = resp.url().clone();
        let body = resp.text().unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        tracing::warn!(status = status.as_u16(), %url, %message, "api request failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Serialize)]
struct LinkBody<'a> {
    link: &'a str,
}

/// Pull a human-readable message out of an error body (`error`, then `message`).
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Read a success body as JSON. A body that is not JSON is a decode error,
/// not a transport one.
fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let bytes = resp.bytes()?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decode a JSON array; any other shape reads as an empty list.
fn decode_list<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>> {
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        tracing::warn!(what, "expected a JSON array, treating as empty");
        Ok(Vec::new())
    }
}

/// Multipart field name for each media file, in upload order: images first,
/// then videos, each group in selection order.
pub fn media_fields(listing: &NewListing) -> Vec<(&'static str, &SelectableFile)> {
    let (images, videos) = listing.partition_media();
    images
        .into_iter()
        .map(|f| ("image", f))
        .chain(videos.into_iter().map(|f| ("video", f)))
        .collect()
}

fn build_listing_form(listing: &NewListing) -> Result<Form> {
    let mut form = Form::new()
        .text("title", listing.title.clone())
        .text("price", listing.price.clone())
        .text("description", listing.description.clone());
    for (field, file) in media_fields(listing) {
        form = form.part(field, media_part(file)?);
    }
    Ok(form)
}

fn media_part(file: &SelectableFile) -> Result<Part> {
    let part = match &file.source {
        MediaSource::Path(path) => Part::file(path).map_err(|source| ApiError::File {
            name: file.name.clone(),
            source,
        })?,
        MediaSource::Bytes(bytes) => Part::bytes(bytes.to_vec()),
    };
    Ok(part.file_name(file.name.clone()).mime_str(&file.mime)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::media::{MediaSelectionSet, RawFile};
    use crate::models::session::Role;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1), AuthContext::default()).unwrap()
    }

    #[test]
    fn endpoint_appends_encoded_segments() {
        let api = client("http://localhost:5000");
        assert_eq!(
            api.endpoint(&["api", "ids", "abc", "status"]).unwrap().as_str(),
            "http://localhost:5000/api/ids/abc/status"
        );

        let nested = client("https://example.com/backend/");
        assert_eq!(
            nested.endpoint(&["api", "ids", "a b"]).unwrap().as_str(),
            "https://example.com/backend/api/ids/a%20b"
        );
    }

    #[test]
    fn media_url_resolves_relative_paths() {
        let api = client("http://localhost:5000");
        assert_eq!(
            api.media_url("/uploads/a.png"),
            "http://localhost:5000/uploads/a.png"
        );
        assert_eq!(
            api.media_url("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url", Duration::from_secs(1), AuthContext::default()).is_err());
    }

    #[test]
    fn error_message_prefers_error_then_message() {
        assert_eq!(
            extract_error_message(r#"{"error": "Not allowed", "message": "x"}"#).as_deref(),
            Some("Not allowed")
        );
        assert_eq!(
            extract_error_message(r#"{"message": "Telegram link not found"}"#).as_deref(),
            Some("Telegram link not found")
        );
        assert_eq!(extract_error_message(r#"{"error": "  "}"#), None);
        assert_eq!(extract_error_message("<html>"), None);
    }

    #[test]
    fn non_array_lists_read_as_empty() {
        let listings: Vec<Listing> =
            decode_list(serde_json::json!({"message": "oops"}), "listings").unwrap();
        assert!(listings.is_empty());

        let listings: Vec<Listing> = decode_list(
            serde_json::json!([{"_id": "1", "title": "t", "price": 5}]),
            "listings",
        )
        .unwrap();
        assert_eq!(listings.len(), 1);
    }

    #[test]
    fn authenticated_requests_need_a_session() {
        let api = client("http://localhost:5000");
        assert!(matches!(
            api.request(Method::GET, &["api", "ids", "my"], true),
            Err(ApiError::MissingSession)
        ));
        assert!(api.request(Method::GET, &["api", "ids"], false).is_ok());

        api.auth().sign_in("token", Role::Admin).unwrap();
        assert!(api.request(Method::GET, &["api", "ids", "my"], true).is_ok());
    }

    #[test]
    fn media_fields_put_images_under_image_and_videos_under_video() {
        let mut set = MediaSelectionSet::default();
        set.add_files(vec![
            RawFile::from_bytes("clip.mp4", "video/mp4", Arc::from(vec![0u8; 3])),
            RawFile::from_bytes("a.png", "image/png", Arc::from(vec![0u8; 3])),
        ])
        .unwrap();
        let listing = NewListing {
            title: "t".into(),
            price: "1".into(),
            description: String::new(),
            media: set.snapshot(),
        };

        let fields: Vec<(&str, &str)> = media_fields(&listing)
            .into_iter()
            .map(|(field, f)| (field, f.name.as_str()))
            .collect();

        assert_eq!(fields, vec![("image", "a.png"), ("video", "clip.mp4")]);
        assert!(build_listing_form(&listing).is_ok());
    }

    /// Serve one canned HTTP response on a local port and return its base URL.
    fn serve_once(response: &'static str) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn html_success_body_is_a_decode_error() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 17\r\nConnection: close\r\n\r\n<html>oops</html>",
        );
        let api = ApiClient::new(&base, Duration::from_secs(5), AuthContext::default()).unwrap();

        let err = api.list_videos().unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
        assert!(err.to_string().starts_with("Unexpected response from server"));
    }

    #[test]
    fn json_success_body_decodes() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]",
        );
        let api = ApiClient::new(&base, Duration::from_secs(5), AuthContext::default()).unwrap();

        assert!(api.list_videos().unwrap().is_empty());
    }

    #[test]
    fn missing_media_file_is_reported_by_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("gone.png");
        std::fs::write(&path, b"x").unwrap();
        let mut set = MediaSelectionSet::default();
        set.add_files(vec![RawFile::from_path(&path).unwrap()]).unwrap();
        std::fs::remove_file(&path).unwrap();
        let listing = NewListing {
            title: "t".into(),
            price: "1".into(),
            description: String::new(),
            media: set.snapshot(),
        };

        match build_listing_form(&listing) {
            Err(ApiError::File { name, .. }) => assert_eq!(name, "gone.png"),
            other => panic!("expected file error, got {:?}", other.map(|_| ())),
        }
    }
}
