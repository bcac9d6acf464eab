// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Media upload panel: drop zone, picker, per-file readiness ramps, and thumbnails.
//!
//! The panel owns a [`MediaSelectionSet`] and reports a fresh snapshot to the
//! hosting form after every add, remove, or clear.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;

use crate::logic::progress::{ProgressState, TickHandle};
use crate::models::media::{
    AcceptList, FileId, MAX_FILE_BYTES, MediaError, MediaSelectionSet, MediaSource, MimeCategory,
    RawFile, SelectableFile, format_size,
};
use crate::utils::icon_for;

/// Readiness ramp of one admitted file plus the ticker driving it.
#[derive(Default)]
struct ProgressTracker {
    state: ProgressState,
    handle: Option<TickHandle>,
}

/// A drag-and-drop payload before its metadata has been resolved.
#[derive(Clone, Debug)]
pub struct DroppedPayload {
    pub path: Option<PathBuf>,
    pub name: String,
    pub mime: String,
    pub bytes: Option<Arc<[u8]>>,
}

impl From<&egui::DroppedFile> for DroppedPayload {
    fn from(file: &egui::DroppedFile) -> Self {
        Self {
            path: file.path.clone(),
            name: file.name.clone(),
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
        }
    }
}

impl DroppedPayload {
    /// Turn the payload into a candidate, reading metadata from disk when needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload has neither bytes nor a readable path.
    pub fn resolve(self) -> anyhow::Result<RawFile> {
        if let Some(bytes) = self.bytes {
            let name = if self.name.is_empty() {
                self.path
                    .as_deref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "dropped-file".into())
            } else {
                self.name
            };
            return Ok(RawFile::from_bytes(name, self.mime, bytes));
        }
        let path = self
            .path
            .ok_or_else(|| anyhow::anyhow!("Dropped item '{}' has no contents", self.name))?;
        let mut raw = RawFile::from_path(&path)?;
        if !self.mime.trim().is_empty() {
            raw.mime = self.mime;
        }
        Ok(raw)
    }
}

/// MVU state of the media upload panel.
pub struct MediaUploadModel {
    selection: MediaSelectionSet,
    trackers: HashMap<FileId, ProgressTracker>,
    drag_active: bool,
    thumbnail_cache: HashMap<FileId, egui::TextureHandle>,
    thumbnail_pending: HashSet<FileId>,
    thumbnail_failures: HashSet<FileId>,
}

impl Default for MediaUploadModel {
    fn default() -> Self {
        Self::new(MediaSelectionSet::default())
    }
}

/// Messages emitted by the media upload view or returned by its commands.
// Debug omitted because TextureHandle and TickHandle are not Debug.
pub enum MediaUploadMsg {
    RequestPickFiles,
    FilesDropped(Vec<DroppedPayload>),
    CandidatesReady {
        candidates: Vec<RawFile>,
        unreadable: usize,
    },
    DragHover(bool),
    Remove(usize),
    ClearAll,
    TickerStarted {
        id: FileId,
        handle: TickHandle,
    },
    ProgressTick {
        id: FileId,
        step: f32,
    },
    LoadThumbnail(FileId),
    ThumbnailReady {
        id: FileId,
        texture: egui::TextureHandle,
    },
    ThumbnailFailed {
        id: FileId,
    },
}

/// Side effects requested by the panel.
pub enum MediaUploadCommand {
    PickFiles { extensions: Vec<&'static str> },
    ResolveDropped(Vec<DroppedPayload>),
    StartTicker(FileId),
    LoadThumbnail { id: FileId, source: MediaSource },
}

/// User-facing events for status/error surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaUploadEvent {
    pub message: String,
    pub is_error: bool,
}

/// What a single update produced for the hosting form.
#[derive(Default)]
pub struct MediaOutcome {
    /// Full selection after a mutation; `None` when nothing changed.
    pub snapshot: Option<Arc<[SelectableFile]>>,
    pub event: Option<MediaUploadEvent>,
}

impl MediaUploadModel {
    pub fn new(selection: MediaSelectionSet) -> Self {
        Self {
            selection,
            trackers: HashMap::new(),
            drag_active: false,
            thumbnail_cache: HashMap::new(),
            thumbnail_pending: HashSet::new(),
            thumbnail_failures: HashSet::new(),
        }
    }

    /// Panel with a custom bound and allowlist.
    pub fn with_limits(max_files: usize, accept: AcceptList) -> Self {
        Self::new(MediaSelectionSet::new(max_files, accept))
    }

    pub fn selection(&self) -> &MediaSelectionSet {
        &self.selection
    }

    pub fn progress(&self, id: FileId) -> Option<ProgressState> {
        self.trackers.get(&id).map(|t| t.state)
    }

    /// Whether any readiness ramp is still running.
    pub fn is_animating(&self) -> bool {
        self.trackers.values().any(|t| !t.state.is_complete())
    }

    /// Drop every file and tracker without emitting an event.
    pub fn reset(&mut self) -> Arc<[SelectableFile]> {
        clear_all(self);
        self.selection.snapshot()
    }
}

/// Apply a message to the panel model.
pub fn update(
    model: &mut MediaUploadModel,
    msg: MediaUploadMsg,
    cmds: &mut Vec<MediaUploadCommand>,
) -> MediaOutcome {
    match msg {
        MediaUploadMsg::RequestPickFiles => {
            cmds.push(MediaUploadCommand::PickFiles {
                extensions: model.selection.accept().picker_extensions(),
            });
            MediaOutcome::default()
        }
        MediaUploadMsg::FilesDropped(payloads) => {
            model.drag_active = false;
            if !payloads.is_empty() {
                cmds.push(MediaUploadCommand::ResolveDropped(payloads));
            }
            MediaOutcome::default()
        }
        MediaUploadMsg::CandidatesReady {
            candidates,
            unreadable,
        } => admit(model, candidates, unreadable, cmds),
        MediaUploadMsg::DragHover(active) => {
            model.drag_active = active;
            MediaOutcome::default()
        }
        MediaUploadMsg::Remove(index) => match model.selection.remove_file(index) {
            Ok(removed) => {
                forget_file(model, removed.id);
                MediaOutcome {
                    snapshot: Some(model.selection.snapshot()),
                    event: Some(MediaUploadEvent {
                        message: format!("Removed {}", removed.name),
                        is_error: false,
                    }),
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "ignoring removal");
                MediaOutcome::default()
            }
        },
        MediaUploadMsg::ClearAll => {
            clear_all(model);
            MediaOutcome {
                snapshot: Some(model.selection.snapshot()),
                event: Some(MediaUploadEvent {
                    message: "Media selection cleared".into(),
                    is_error: false,
                }),
            }
        }
        MediaUploadMsg::TickerStarted { id, handle } => {
            // A handle for a file that is already gone is dropped, which stops it.
            if let Some(tracker) = model.trackers.get_mut(&id)
                && !tracker.state.is_complete()
            {
                tracker.handle = Some(handle);
            }
            MediaOutcome::default()
        }
        MediaUploadMsg::ProgressTick { id, step } => {
            if let Some(tracker) = model.trackers.get_mut(&id) {
                tracker.state = tracker.state.advance(step);
                if tracker.state.is_complete() {
                    tracker.handle = None;
                }
            }
            MediaOutcome::default()
        }
        MediaUploadMsg::LoadThumbnail(id) => {
            let source = model
                .selection
                .files()
                .iter()
                .find(|f| f.id == id)
                .map(|f| f.source.clone());
            if let Some(source) = source
                && model.thumbnail_pending.insert(id)
            {
                cmds.push(MediaUploadCommand::LoadThumbnail { id, source });
            }
            MediaOutcome::default()
        }
        MediaUploadMsg::ThumbnailReady { id, texture } => {
            model.thumbnail_pending.remove(&id);
            if model.trackers.contains_key(&id) {
                model.thumbnail_cache.insert(id, texture);
            }
            MediaOutcome::default()
        }
        MediaUploadMsg::ThumbnailFailed { id } => {
            model.thumbnail_pending.remove(&id);
            if model.trackers.contains_key(&id) {
                model.thumbnail_failures.insert(id);
            }
            MediaOutcome::default()
        }
    }
}

fn admit(
    model: &mut MediaUploadModel,
    candidates: Vec<RawFile>,
    unreadable: usize,
    cmds: &mut Vec<MediaUploadCommand>,
) -> MediaOutcome {
    if candidates.is_empty() && unreadable == 0 {
        return MediaOutcome::default();
    }

    match model.selection.add_files(candidates) {
        Ok(admission) => {
            for id in &admission.admitted {
                model.trackers.insert(*id, ProgressTracker::default());
                cmds.push(MediaUploadCommand::StartTicker(*id));
            }
            for rejection in &admission.rejected {
                tracing::info!(reason = %rejection, "skipped media candidate");
            }

            let skipped = admission.rejected.len() + unreadable;
            let message = match (admission.admitted.len(), skipped) {
                (0, 0) => None,
                (added, 0) => Some(format!("Added {added} file(s)")),
                (0, skipped) => Some(format!(
                    "No files added; {skipped} skipped (images or videos up to {} only)",
                    format_size(MAX_FILE_BYTES)
                )),
                (added, skipped) => Some(format!(
                    "Added {added} file(s); {skipped} skipped (images or videos up to {} only)",
                    format_size(MAX_FILE_BYTES)
                )),
            };

            MediaOutcome {
                snapshot: Some(model.selection.snapshot()),
                event: message.map(|message| MediaUploadEvent {
                    message,
                    is_error: false,
                }),
            }
        }
        Err(err @ MediaError::BatchCapacityExceeded { .. }) => {
            tracing::info!(error = ?err, "media batch rejected");
            MediaOutcome {
                snapshot: None,
                event: Some(MediaUploadEvent {
                    message: err.to_string(),
                    is_error: true,
                }),
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "unexpected media admission failure");
            MediaOutcome {
                snapshot: None,
                event: Some(MediaUploadEvent {
                    message: err.to_string(),
                    is_error: true,
                }),
            }
        }
    }
}

/// Drop tracker and cached thumbnail of a removed file; dropping the
/// tracker cancels its ticker.
fn forget_file(model: &mut MediaUploadModel, id: FileId) {
    model.trackers.remove(&id);
    model.thumbnail_cache.remove(&id);
    model.thumbnail_pending.remove(&id);
    model.thumbnail_failures.remove(&id);
}

fn clear_all(model: &mut MediaUploadModel) {
    for id in model.selection.clear() {
        forget_file(model, id);
    }
    model.trackers.clear();
}

/// Text under the drop zone, derived from the enforced limits.
pub fn limits_label(max_files: usize) -> String {
    format!(
        "Up to {} each · max {max_files} files",
        format_size(MAX_FILE_BYTES)
    )
}

/// Render the panel and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &MediaUploadModel) -> Vec<MediaUploadMsg> {
    let mut msgs = Vec::new();

    let (hovering, dropped) = ui.ctx().input(|i| {
        (
            !i.raw.hovered_files.is_empty(),
            i.raw
                .dropped_files
                .iter()
                .map(DroppedPayload::from)
                .collect::<Vec<_>>(),
        )
    });
    if hovering != model.drag_active {
        msgs.push(MediaUploadMsg::DragHover(hovering));
    }
    if !dropped.is_empty() {
        msgs.push(MediaUploadMsg::FilesDropped(dropped));
    }

    render_drop_zone(ui, model, &mut msgs);
    ui.add_space(6.0);

    let selection = &model.selection;
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!(
                "{}/{} files selected",
                selection.len(),
                selection.max_files()
            ))
            .color(egui::Color32::from_gray(110)),
        );
        if !selection.is_empty() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("{} Clear all", egui_phosphor::regular::BROOM))
                    .clicked()
                {
                    msgs.push(MediaUploadMsg::ClearAll);
                }
            });
        }
    });

    if !selection.is_empty() {
        ui.add_space(4.0);
        render_file_list(ui, model, &mut msgs);
    }

    msgs
}

fn render_drop_zone(ui: &mut egui::Ui, model: &MediaUploadModel, msgs: &mut Vec<MediaUploadMsg>) {
    let visuals = ui.visuals().clone();
    let stroke = if model.drag_active {
        egui::Stroke::new(2.0, visuals.selection.stroke.color)
    } else {
        visuals.window_stroke()
    };
    let fill = if model.drag_active {
        visuals.selection.bg_fill.gamma_multiply(0.25)
    } else {
        visuals.extreme_bg_color
    };

    let response = egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(egui_phosphor::regular::UPLOAD_SIMPLE).size(28.0));
                let headline = if model.drag_active {
                    "Drop files to add them"
                } else {
                    "Drag & drop images or videos here"
                };
                ui.label(egui::RichText::new(headline).strong());
                ui.label("or click to browse");
                ui.label(
                    egui::RichText::new(limits_label(model.selection.max_files()))
                        .small()
                        .color(egui::Color32::from_gray(120)),
                );
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);

    if response.clicked() {
        msgs.push(MediaUploadMsg::RequestPickFiles);
    }
}

fn render_file_list(ui: &mut egui::Ui, model: &MediaUploadModel, msgs: &mut Vec<MediaUploadMsg>) {
    let files = model.selection.files();
    for (index, file) in files.iter().enumerate() {
        ui.horizontal(|ui| {
            if let Some(texture) = model.thumbnail_cache.get(&file.id) {
                let size = texture.size_vec2();
                let max = 56.0;
                let scale = (max / size.x).min(max / size.y).min(1.0);
                ui.add(egui::Image::new((texture.id(), size * scale)));
            } else {
                if file.category == MimeCategory::Image
                    && !model.thumbnail_failures.contains(&file.id)
                    && !model.thumbnail_pending.contains(&file.id)
                {
                    msgs.push(MediaUploadMsg::LoadThumbnail(file.id));
                }
                ui.add_sized(
                    [56.0, 56.0],
                    egui::Label::new(
                        egui::RichText::new(icon_for(&file.mime, &file.name)).size(28.0),
                    ),
                );
            }

            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&file.name).strong());
                ui.label(
                    egui::RichText::new(format!("{} | {}", file.mime, format_size(file.size_bytes)))
                        .small()
                        .color(egui::Color32::from_gray(102)),
                );
                let state = model.progress(file.id).unwrap_or_default();
                if state.is_complete() {
                    ui.label(
                        egui::RichText::new(format!("{} Ready", egui_phosphor::regular::CHECK_CIRCLE))
                            .small()
                            .color(egui::Color32::from_rgb(47, 158, 68)),
                    );
                } else {
                    ui.add(
                        egui::ProgressBar::new(state.percent() / 100.0)
                            .desired_width(180.0)
                            .show_percentage(),
                    );
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE))
                    .on_hover_text("Remove file")
                    .clicked()
                {
                    msgs.push(MediaUploadMsg::Remove(index));
                }
            });
        });

        if index + 1 < files.len() {
            ui.separator();
        }
    }
}

/// Decode and shrink an image to a thumbnail-sized `ColorImage`.
pub(crate) fn load_image_thumbnail(source: &MediaSource) -> Result<egui::ColorImage, String> {
    const MAX: u32 = 256;

    let dyn_img = match source {
        MediaSource::Path(path) => image::open(path).map_err(|e| e.to_string())?,
        MediaSource::Bytes(bytes) => image::load_from_memory(bytes).map_err(|e| e.to_string())?,
    };
    // `thumbnail` also scales up, so small images pass through untouched.
    let dyn_img = if dyn_img.width() > MAX || dyn_img.height() > MAX {
        dyn_img.thumbnail(MAX, MAX)
    } else {
        dyn_img
    };
    let resized = dyn_img.to_rgba8();
    let size = [resized.width() as usize, resized.height() as usize];
    let pixels = resized.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::atomic::Ordering;

    use image::{ImageBuffer, Rgba};
    use tempfile::TempDir;

    use super::*;

    fn raw(name: &str, mime: &str) -> RawFile {
        RawFile::from_bytes(name, mime, Arc::from(vec![0u8; 16]))
    }

    fn add(model: &mut MediaUploadModel, files: Vec<RawFile>) -> (MediaOutcome, Vec<MediaUploadCommand>) {
        let mut cmds = Vec::new();
        let outcome = update(
            model,
            MediaUploadMsg::CandidatesReady {
                candidates: files,
                unreadable: 0,
            },
            &mut cmds,
        );
        (outcome, cmds)
    }

    fn ids(model: &MediaUploadModel) -> Vec<FileId> {
        model.selection().files().iter().map(|f| f.id).collect()
    }

    #[test]
    fn admission_reports_snapshot_and_starts_tickers() {
        let mut model = MediaUploadModel::default();

        let (outcome, cmds) = add(
            &mut model,
            vec![raw("a.png", "image/png"), raw("b.png", "image/png"), raw("c.png", "image/png")],
        );

        let snapshot = outcome.snapshot.expect("snapshot reported");
        let names: Vec<&str> = snapshot.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
        let started = cmds
            .iter()
            .filter(|c| matches!(c, MediaUploadCommand::StartTicker(_)))
            .count();
        assert_eq!(started, 3);
        assert!(
            ids(&model)
                .iter()
                .all(|id| model.progress(*id) == Some(ProgressState::Pending))
        );
        assert!(model.is_animating());
    }

    #[test]
    fn over_capacity_batch_raises_error_and_keeps_selection() {
        let mut model = MediaUploadModel::default();
        let files: Vec<RawFile> = (0..11).map(|i| raw(&format!("{i}.png"), "image/png")).collect();

        let (outcome, cmds) = add(&mut model, files);

        assert!(outcome.snapshot.is_none());
        let event = outcome.event.expect("notice raised");
        assert!(event.is_error);
        assert_eq!(event.message, "You can only upload up to 10 files.");
        assert!(cmds.is_empty());
        assert!(model.selection().is_empty());
    }

    #[test]
    fn invalid_files_are_counted_not_admitted() {
        let mut model = MediaUploadModel::default();

        let (outcome, cmds) = add(&mut model, vec![raw("doc.pdf", "application/pdf")]);

        assert!(cmds.is_empty());
        assert_eq!(outcome.snapshot.map(|s| s.len()), Some(0));
        let event = outcome.event.unwrap();
        assert!(!event.is_error);
        assert!(event.message.contains("1 skipped"));
    }

    #[test]
    fn remove_cancels_ticker_and_reports_remaining_files() {
        let mut model = MediaUploadModel::default();
        add(&mut model, vec![raw("a.png", "image/png"), raw("b.png", "image/png")]);
        let first = ids(&model)[0];
        let handle = TickHandle::detached();
        let flag = handle.cancel_flag();
        let mut cmds = Vec::new();
        update(
            &mut model,
            MediaUploadMsg::TickerStarted { id: first, handle },
            &mut cmds,
        );

        let outcome = update(&mut model, MediaUploadMsg::Remove(0), &mut cmds);

        assert!(flag.load(Ordering::SeqCst), "ticker should be cancelled");
        assert_eq!(outcome.snapshot.unwrap()[0].name, "b.png");
        assert!(model.progress(first).is_none());
    }

    #[test]
    fn ticks_for_removed_files_are_ignored() {
        let mut model = MediaUploadModel::default();
        add(&mut model, vec![raw("a.png", "image/png")]);
        let id = ids(&model)[0];
        let mut cmds = Vec::new();
        update(&mut model, MediaUploadMsg::Remove(0), &mut cmds);

        update(&mut model, MediaUploadMsg::ProgressTick { id, step: 20.0 }, &mut cmds);

        assert!(model.progress(id).is_none());
    }

    #[test]
    fn late_ticker_handle_for_removed_file_is_cancelled() {
        let mut model = MediaUploadModel::default();
        add(&mut model, vec![raw("a.png", "image/png")]);
        let id = ids(&model)[0];
        let mut cmds = Vec::new();
        update(&mut model, MediaUploadMsg::ClearAll, &mut cmds);

        let handle = TickHandle::detached();
        let flag = handle.cancel_flag();
        update(&mut model, MediaUploadMsg::TickerStarted { id, handle }, &mut cmds);

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn ticks_ramp_to_complete_and_release_handle() {
        let mut model = MediaUploadModel::default();
        add(&mut model, vec![raw("a.mp4", "video/mp4")]);
        let id = ids(&model)[0];
        let handle = TickHandle::detached();
        let flag = handle.cancel_flag();
        let mut cmds = Vec::new();
        update(&mut model, MediaUploadMsg::TickerStarted { id, handle }, &mut cmds);

        let mut last = 0.0;
        for _ in 0..4 {
            update(&mut model, MediaUploadMsg::ProgressTick { id, step: 29.0 }, &mut cmds);
            let now = model.progress(id).unwrap().percent();
            assert!(now >= last);
            last = now;
        }

        assert_eq!(model.progress(id), Some(ProgressState::Complete));
        assert!(flag.load(Ordering::SeqCst), "completed ramp drops its ticker");
        assert!(!model.is_animating());
    }

    #[test]
    fn clear_all_reports_empty_snapshot() {
        let mut model = MediaUploadModel::default();
        add(&mut model, vec![raw("a.png", "image/png")]);
        let mut cmds = Vec::new();

        let outcome = update(&mut model, MediaUploadMsg::ClearAll, &mut cmds);

        assert_eq!(outcome.snapshot.map(|s| s.len()), Some(0));
        assert!(!model.is_animating());
    }

    #[test]
    fn out_of_range_remove_is_silent_no_op() {
        let mut model = MediaUploadModel::default();
        add(&mut model, vec![raw("a.png", "image/png")]);
        let mut cmds = Vec::new();

        let outcome = update(&mut model, MediaUploadMsg::Remove(7), &mut cmds);

        assert!(outcome.snapshot.is_none());
        assert!(outcome.event.is_none());
        assert_eq!(model.selection().len(), 1);
    }

    #[test]
    fn pick_request_uses_accept_list_extensions() {
        let mut model = MediaUploadModel::with_limits(3, AcceptList::parse("image/*").unwrap());
        let mut cmds = Vec::new();

        update(&mut model, MediaUploadMsg::RequestPickFiles, &mut cmds);

        match cmds.pop() {
            Some(MediaUploadCommand::PickFiles { extensions }) => {
                assert!(extensions.contains(&"png"));
                assert!(!extensions.contains(&"mp4"));
            }
            _ => panic!("expected pick command"),
        }
    }

    #[test]
    fn thumbnail_is_requested_once() {
        let mut model = MediaUploadModel::default();
        add(&mut model, vec![raw("a.png", "image/png")]);
        let id = ids(&model)[0];
        let mut cmds = Vec::new();

        update(&mut model, MediaUploadMsg::LoadThumbnail(id), &mut cmds);
        update(&mut model, MediaUploadMsg::LoadThumbnail(id), &mut cmds);

        assert_eq!(cmds.len(), 1);
        update(&mut model, MediaUploadMsg::ThumbnailFailed { id }, &mut cmds);
        assert!(model.thumbnail_failures.contains(&id));
    }

    #[test]
    fn limits_label_matches_enforced_ceiling() {
        assert_eq!(limits_label(10), "Up to 500.00 MB each · max 10 files");
    }

    #[test]
    fn dropped_bytes_resolve_without_disk_access() {
        let payload = DroppedPayload {
            path: None,
            name: "clip.mp4".into(),
            mime: String::new(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
        };
        let raw = payload.resolve().unwrap();
        assert_eq!(raw.mime, "video/mp4");
        assert_eq!(raw.size, 3);
    }

    #[test]
    fn dropped_path_resolves_metadata() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pic.png");
        fs::write(&path, b"1234").unwrap();
        let payload = DroppedPayload {
            path: Some(path),
            name: String::new(),
            mime: String::new(),
            bytes: None,
        };
        let raw = payload.resolve().unwrap();
        assert_eq!(raw.name, "pic.png");
        assert_eq!(raw.size, 4);

        let empty = DroppedPayload {
            path: None,
            name: "ghost".into(),
            mime: String::new(),
            bytes: None,
        };
        assert!(empty.resolve().is_err());
    }

    #[test]
    fn thumbnails_decode_from_disk_and_memory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("thumb.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(10, 12, Rgba([0, 255, 0, 255]));
        img.save(&path).expect("png saved");

        let from_disk = load_image_thumbnail(&MediaSource::Path(path.clone())).unwrap();
        assert_eq!(from_disk.size, [10, 12]);

        let bytes: Arc<[u8]> = Arc::from(fs::read(&path).unwrap());
        let from_memory = load_image_thumbnail(&MediaSource::Bytes(bytes)).unwrap();
        assert_eq!(from_memory.size, [10, 12]);

        assert!(load_image_thumbnail(&MediaSource::Bytes(Arc::from(vec![0u8; 4]))).is_err());
    }

    #[test]
    fn large_thumbnails_shrink_to_fit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wide.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(600, 300, Rgba([0, 0, 255, 255]));
        img.save(&path).expect("png saved");

        let thumb = load_image_thumbnail(&MediaSource::Path(path)).unwrap();

        assert_eq!(thumb.size, [256, 128]);
    }
}
