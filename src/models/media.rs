// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Media selection domain model: candidate validation, bounded all-or-nothing
//! admission, and human-readable sizes (UI-agnostic).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use thiserror::Error;

/// Largest accepted size for a single file (500 MiB).
pub const MAX_FILE_BYTES: u64 = 500 * 1024 * 1024;
/// Default bound on the number of files in one selection.
pub const DEFAULT_MAX_FILES: usize = 10;
/// Default MIME allowlist, in HTML `accept` attribute syntax.
pub const DEFAULT_ACCEPTED_TYPES: &str = "image/*,video/*";

/// Extensions offered by the native picker, narrowed by the accept list.
const PICKER_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "avif", "heic", "mp4", "m4v",
    "mov", "webm", "mkv", "avi", "wmv", "3gp", "mpeg", "mpg",
];

/// Broad media kind derived from a declared MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MimeCategory {
    Image,
    Video,
    Other,
}

impl MimeCategory {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else {
            Self::Other
        }
    }

    /// Multipart field the backend expects for files of this kind.
    pub fn form_field(self) -> Option<&'static str> {
        match self {
            Self::Image => Some("image"),
            Self::Video => Some("video"),
            Self::Other => None,
        }
    }
}

/// Stable identity of an admitted file; never reused within one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file-{}", self.0)
    }
}

/// Where the file contents can be read from at submission time.
#[derive(Clone)]
pub enum MediaSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

/// A candidate file as produced by the picker or a drop payload, before validation.
#[derive(Clone, Debug)]
pub struct RawFile {
    pub name: String,
    /// Declared MIME type; empty when the source could not tell.
    pub mime: String,
    pub size: u64,
    pub source: MediaSource,
}

impl RawFile {
    /// Describe a file on disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error when the file metadata cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            mime: guess_mime(path),
            size: metadata.len(),
            source: MediaSource::Path(path.to_path_buf()),
        })
    }

    /// Describe an in-memory payload; an empty `mime` is guessed from the name.
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        let mut mime = mime.into();
        if mime.trim().is_empty() {
            mime = guess_mime(Path::new(&name));
        }
        Self {
            size: bytes.len() as u64,
            name,
            mime,
            source: MediaSource::Bytes(bytes),
        }
    }
}

/// An admitted file. Immutable once inside a selection.
#[derive(Clone, Debug)]
pub struct SelectableFile {
    pub id: FileId,
    pub name: String,
    pub mime: String,
    pub category: MimeCategory,
    pub size_bytes: u64,
    pub source: MediaSource,
}

/// Reasons a candidate or an operation on the selection is refused.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("{name}: unsupported file type '{mime}'")]
    InvalidFileType { name: String, mime: String },
    #[error("{name}: {} exceeds the {} limit", size_label(.size), format_size(MAX_FILE_BYTES))]
    FileTooLarge { name: String, size: u64 },
    #[error("You can only upload up to {max_files} files.")]
    BatchCapacityExceeded {
        max_files: usize,
        current: usize,
        incoming: usize,
    },
    #[error("no file at position {index} (selection holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

fn size_label(size: &u64) -> String {
    format_size(*size)
}

/// Parsed MIME allowlist such as `image/*,video/*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptList {
    patterns: Vec<String>,
}

impl AcceptList {
    /// Parse a comma-separated allowlist. Returns `None` when no pattern remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let patterns: Vec<String> = raw
            .split(',')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        if patterns.is_empty() {
            None
        } else {
            Some(Self { patterns })
        }
    }

    /// Whether a file with this declared type and name passes the allowlist.
    pub fn accepts(&self, mime: &str, name: &str) -> bool {
        let mime = mime.trim().to_ascii_lowercase();
        let name = name.to_ascii_lowercase();
        self.patterns.iter().any(|pattern| {
            if pattern == "*" || pattern == "*/*" {
                true
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                prefix.ends_with('/') && mime.starts_with(prefix)
            } else if pattern.starts_with('.') {
                name.ends_with(pattern.as_str())
            } else {
                mime == *pattern
            }
        })
    }

    /// File-dialog extensions whose guessed MIME type passes the allowlist.
    pub fn picker_extensions(&self) -> Vec<&'static str> {
        PICKER_EXTENSIONS
            .iter()
            .copied()
            .filter(|ext| {
                let file_name = format!("x.{ext}");
                self.accepts(&guess_mime(Path::new(&file_name)), &file_name)
            })
            .collect()
    }
}

impl Default for AcceptList {
    fn default() -> Self {
        Self {
            patterns: vec!["image/*".into(), "video/*".into()],
        }
    }
}

/// Classify one candidate: it must be an image or video, pass the allowlist,
/// and fit under [`MAX_FILE_BYTES`].
pub fn validate_candidate(candidate: &RawFile, accept: &AcceptList) -> Result<MimeCategory, MediaError> {
    let category = MimeCategory::from_mime(&candidate.mime);
    if category == MimeCategory::Other || !accept.accepts(&candidate.mime, &candidate.name) {
        return Err(MediaError::InvalidFileType {
            name: candidate.name.clone(),
            mime: candidate.mime.clone(),
        });
    }
    if candidate.size > MAX_FILE_BYTES {
        return Err(MediaError::FileTooLarge {
            name: candidate.name.clone(),
            size: candidate.size,
        });
    }
    Ok(category)
}

/// Result of a successful `add_files` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Admission {
    /// Newly admitted files, in input order.
    pub admitted: Vec<FileId>,
    /// Candidates that failed validation and were left out.
    pub rejected: Vec<MediaError>,
}

/// Ordered, bounded set of validated media files.
///
/// Every mutation swaps in a fresh `Arc<[SelectableFile]>`, so snapshots
/// handed to observers never change underneath them.
#[derive(Clone, Debug)]
pub struct MediaSelectionSet {
    files: Arc<[SelectableFile]>,
    max_files: usize,
    accept: AcceptList,
    next_id: u64,
}

impl Default for MediaSelectionSet {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILES, AcceptList::default())
    }
}

impl MediaSelectionSet {
    /// Create an empty selection. A zero bound is raised to one.
    pub fn new(max_files: usize, accept: AcceptList) -> Self {
        Self {
            files: Arc::from(Vec::new()),
            max_files: max_files.max(1),
            accept,
            next_id: 0,
        }
    }

    pub fn files(&self) -> &[SelectableFile] {
        &self.files
    }

    /// Immutable view of the current selection for the hosting form.
    pub fn snapshot(&self) -> Arc<[SelectableFile]> {
        Arc::clone(&self.files)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn accept(&self) -> &AcceptList {
        &self.accept
    }

    /// Validate `candidates` and append the valid ones in input order.
    ///
    /// Invalid candidates are dropped. When the valid ones would push the
    /// selection past `max_files`, nothing is admitted and the selection is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::BatchCapacityExceeded`] when the batch does not fit.
    pub fn add_files<I>(&mut self, candidates: I) -> Result<Admission, MediaError>
    where
        I: IntoIterator<Item = RawFile>,
    {
        let mut valid = Vec::new();
        let mut rejected = Vec::new();
        for candidate in candidates {
            match validate_candidate(&candidate, &self.accept) {
                Ok(category) => valid.push((candidate, category)),
                Err(err) => rejected.push(err),
            }
        }

        if self.files.len() + valid.len() > self.max_files {
            return Err(MediaError::BatchCapacityExceeded {
                max_files: self.max_files,
                current: self.files.len(),
                incoming: valid.len(),
            });
        }

        let mut next = Vec::with_capacity(self.files.len() + valid.len());
        next.extend(self.files.iter().cloned());
        let mut admitted = Vec::with_capacity(valid.len());
        for (candidate, category) in valid {
            let id = FileId(self.next_id);
            self.next_id += 1;
            admitted.push(id);
            next.push(SelectableFile {
                id,
                name: candidate.name,
                mime: candidate.mime,
                category,
                size_bytes: candidate.size,
                source: candidate.source,
            });
        }
        self.files = next.into();

        Ok(Admission { admitted, rejected })
    }

    /// Remove the file at `index`, keeping the others in their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::IndexOutOfRange`] and leaves the selection untouched
    /// when `index` is past the end.
    pub fn remove_file(&mut self, index: usize) -> Result<SelectableFile, MediaError> {
        let len = self.files.len();
        let removed = self
            .files
            .get(index)
            .cloned()
            .ok_or(MediaError::IndexOutOfRange { index, len })?;
        let next: Vec<SelectableFile> = self
            .files
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f.clone())
            .collect();
        self.files = next.into();
        Ok(removed)
    }

    /// Empty the selection and return the ids that were dropped.
    pub fn clear(&mut self) -> Vec<FileId> {
        let ids = self.files.iter().map(|f| f.id).collect();
        self.files = Arc::from(Vec::new());
        ids
    }
}

/// Guess a MIME type from the file extension (`application/octet-stream` when unknown).
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Human-readable byte count using base-1024 units with two decimals.
///
/// ```rust,ignore
/// assert_eq!(format_size(0), "0 Bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, mime: &str, size: u64) -> RawFile {
        RawFile {
            name: name.to_string(),
            mime: mime.to_string(),
            size,
            source: MediaSource::Bytes(Arc::from(Vec::new())),
        }
    }

    fn images(count: usize) -> Vec<RawFile> {
        (0..count)
            .map(|i| raw(&format!("shot-{i}.png"), "image/png", 1024))
            .collect()
    }

    fn names(set: &MediaSelectionSet) -> Vec<String> {
        set.files().iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn format_size_matches_documented_values() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(MAX_FILE_BYTES), "500.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn format_size_caps_at_gigabytes() {
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024), "2048.00 GB");
    }

    #[test]
    fn adding_three_images_preserves_input_order() {
        let mut set = MediaSelectionSet::default();
        let admission = set
            .add_files(vec![
                raw("a.png", "image/png", 10),
                raw("b.jpg", "image/jpeg", 20),
                raw("c.webp", "image/webp", 30),
            ])
            .unwrap();

        assert_eq!(admission.admitted.len(), 3);
        assert!(admission.rejected.is_empty());
        assert_eq!(names(&set), vec!["a.png", "b.jpg", "c.webp"]);
        assert!(set.files().iter().all(|f| f.category == MimeCategory::Image));
    }

    #[test]
    fn eleven_files_with_bound_ten_are_rejected_in_full() {
        let mut set = MediaSelectionSet::default();
        let err = set.add_files(images(11)).unwrap_err();

        assert_eq!(
            err,
            MediaError::BatchCapacityExceeded {
                max_files: 10,
                current: 0,
                incoming: 11
            }
        );
        assert!(set.is_empty());
    }

    #[test]
    fn overflowing_batch_leaves_existing_selection_untouched() {
        let mut set = MediaSelectionSet::default();
        set.add_files(images(8)).unwrap();
        let before = names(&set);

        assert!(set.add_files(images(3)).is_err());
        assert_eq!(names(&set), before);

        // Exactly filling the bound is fine.
        set.add_files(images(2)).unwrap();
        assert_eq!(set.len(), 10);
    }

    #[test]
    fn invalid_candidates_do_not_count_toward_capacity() {
        let mut set = MediaSelectionSet::new(2, AcceptList::default());
        let admission = set
            .add_files(vec![
                raw("a.png", "image/png", 1),
                raw("notes.pdf", "application/pdf", 1),
                raw("clip.mp4", "video/mp4", 1),
            ])
            .unwrap();

        assert_eq!(admission.admitted.len(), 2);
        assert_eq!(admission.rejected.len(), 1);
        assert_eq!(names(&set), vec!["a.png", "clip.mp4"]);
    }

    #[test]
    fn pdf_is_silently_excluded() {
        let mut set = MediaSelectionSet::default();
        let admission = set
            .add_files(vec![raw("doc.pdf", "application/pdf", 100)])
            .unwrap();

        assert!(admission.admitted.is_empty());
        assert!(matches!(
            admission.rejected[0],
            MediaError::InvalidFileType { .. }
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn oversize_file_is_silently_excluded() {
        let mut set = MediaSelectionSet::default();
        let admission = set
            .add_files(vec![raw("huge.mp4", "video/mp4", MAX_FILE_BYTES + 1)])
            .unwrap();

        assert!(admission.admitted.is_empty());
        assert!(matches!(
            admission.rejected[0],
            MediaError::FileTooLarge { .. }
        ));
        assert!(set.is_empty());
    }

    #[test]
    fn file_exactly_at_ceiling_is_admitted() {
        let mut set = MediaSelectionSet::default();
        set.add_files(vec![raw("edge.mp4", "video/mp4", MAX_FILE_BYTES)])
            .unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn bound_holds_across_many_calls() {
        let mut set = MediaSelectionSet::new(4, AcceptList::default());
        for batch in [1usize, 3, 2, 1, 5, 0, 1] {
            let _ = set.add_files(images(batch));
            assert!(set.len() <= set.max_files());
        }
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn remove_file_preserves_relative_order() {
        let mut set = MediaSelectionSet::default();
        set.add_files(vec![
            raw("a.png", "image/png", 1),
            raw("b.png", "image/png", 1),
            raw("c.png", "image/png", 1),
            raw("d.png", "image/png", 1),
        ])
        .unwrap();

        let removed = set.remove_file(1).unwrap();

        assert_eq!(removed.name, "b.png");
        assert_eq!(names(&set), vec!["a.png", "c.png", "d.png"]);
    }

    #[test]
    fn remove_out_of_range_is_an_error_and_no_op() {
        let mut set = MediaSelectionSet::default();
        set.add_files(images(2)).unwrap();

        let err = set.remove_file(5).unwrap_err();

        assert_eq!(err, MediaError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn clear_always_empties() {
        let mut set = MediaSelectionSet::default();
        assert!(set.clear().is_empty());

        set.add_files(images(3)).unwrap();
        let cleared = set.clear();

        assert_eq!(cleared.len(), 3);
        assert!(set.is_empty());
    }

    #[test]
    fn snapshots_are_not_affected_by_later_mutation() {
        let mut set = MediaSelectionSet::default();
        set.add_files(images(2)).unwrap();
        let snapshot = set.snapshot();

        set.clear();

        assert_eq!(snapshot.len(), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut set = MediaSelectionSet::default();
        let first = set.add_files(images(1)).unwrap().admitted[0];
        set.remove_file(0).unwrap();
        let second = set.add_files(images(1)).unwrap().admitted[0];
        assert_ne!(first, second);
    }

    #[test]
    fn accept_list_narrows_media_types() {
        let accept = AcceptList::parse("image/*").unwrap();
        let mut set = MediaSelectionSet::new(10, accept);
        set.add_files(vec![
            raw("a.png", "image/png", 1),
            raw("b.mp4", "video/mp4", 1),
        ])
        .unwrap();
        assert_eq!(names(&set), vec!["a.png"]);
    }

    #[test]
    fn accept_list_parsing_and_matching() {
        assert!(AcceptList::parse(" , ").is_none());
        let accept = AcceptList::parse("image/png, .MOV").unwrap();
        assert!(accept.accepts("image/png", "x.png"));
        assert!(!accept.accepts("image/jpeg", "x.jpg"));
        assert!(accept.accepts("video/quicktime", "Clip.mov"));
        assert!(!accept.accepts("video/mp4", "x.mp4"));
        assert_eq!(
            AcceptList::parse(DEFAULT_ACCEPTED_TYPES).unwrap(),
            AcceptList::default()
        );
    }

    #[test]
    fn picker_extensions_follow_accept_list() {
        let images_only = AcceptList::parse("image/*").unwrap().picker_extensions();
        assert!(images_only.contains(&"png"));
        assert!(!images_only.contains(&"mp4"));

        let all = AcceptList::default().picker_extensions();
        assert!(all.contains(&"mp4"));
    }

    #[test]
    fn mime_category_is_derived_from_prefix() {
        assert_eq!(MimeCategory::from_mime("image/png"), MimeCategory::Image);
        assert_eq!(MimeCategory::from_mime("VIDEO/MP4"), MimeCategory::Video);
        assert_eq!(MimeCategory::from_mime("application/pdf"), MimeCategory::Other);
        assert_eq!(MimeCategory::from_mime(""), MimeCategory::Other);
        assert_eq!(MimeCategory::Video.form_field(), Some("video"));
        assert_eq!(MimeCategory::Other.form_field(), None);
    }

    #[test]
    fn raw_file_from_path_reads_size_and_guesses_type() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("cover.jpg");
        std::fs::write(&path, b"12345").unwrap();

        let raw = RawFile::from_path(&path).unwrap();

        assert_eq!(raw.name, "cover.jpg");
        assert_eq!(raw.mime, "image/jpeg");
        assert_eq!(raw.size, 5);
        assert!(matches!(raw.source, MediaSource::Path(_)));
    }

    #[test]
    fn raw_file_from_path_errors_when_missing() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(RawFile::from_path(&tmp.path().join("missing.png")).is_err());
    }

    #[test]
    fn raw_file_from_bytes_guesses_missing_type() {
        let raw = RawFile::from_bytes("clip.mp4", "", Arc::from(vec![0u8; 7]));
        assert_eq!(raw.mime, "video/mp4");
        assert_eq!(raw.size, 7);
    }
}
