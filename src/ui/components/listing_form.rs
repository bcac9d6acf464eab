// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! "Add ID" form: listing fields plus the media upload panel.

use std::sync::Arc;

use eframe::egui;

use crate::models::listing::NewListing;
use crate::models::media::SelectableFile;
use crate::ui::components::media_upload::{
    self, MediaUploadCommand, MediaUploadModel, MediaUploadMsg,
};

/// Form state. `media_files` is the latest snapshot reported by the media panel.
#[derive(Default)]
pub struct ListingFormModel {
    pub title: String,
    pub price: String,
    pub description: String,
    media: MediaUploadModel,
    media_files: Arc<[SelectableFile]>,
    submitting: bool,
}

pub enum ListingFormMsg {
    TitleChanged(String),
    PriceChanged(String),
    DescriptionChanged(String),
    Media(MediaUploadMsg),
    Submit,
    Submitted(Result<String, String>),
}

pub enum ListingFormCommand {
    Media(MediaUploadCommand),
    Create(NewListing),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingFormEvent {
    pub message: String,
    pub is_error: bool,
}

impl ListingFormModel {
    pub fn new(media: MediaUploadModel) -> Self {
        Self {
            media,
            ..Default::default()
        }
    }

    pub fn media(&self) -> &MediaUploadModel {
        &self.media
    }

    /// Snapshot last reported by the media panel.
    pub fn media_files(&self) -> &Arc<[SelectableFile]> {
        &self.media_files
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

pub fn update(
    model: &mut ListingFormModel,
    msg: ListingFormMsg,
    cmds: &mut Vec<ListingFormCommand>,
) -> Option<ListingFormEvent> {
    match msg {
        ListingFormMsg::TitleChanged(text) => {
            model.title = text;
            None
        }
        ListingFormMsg::PriceChanged(text) => {
            model.price = text;
            None
        }
        ListingFormMsg::DescriptionChanged(text) => {
            model.description = text;
            None
        }
        ListingFormMsg::Media(m) => {
            let mut media_cmds = Vec::new();
            let outcome = media_upload::update(&mut model.media, m, &mut media_cmds);
            cmds.extend(media_cmds.into_iter().map(ListingFormCommand::Media));
            if let Some(snapshot) = outcome.snapshot {
                model.media_files = snapshot;
            }
            outcome.event.map(|e| ListingFormEvent {
                message: e.message,
                is_error: e.is_error,
            })
        }
        ListingFormMsg::Submit => {
            if model.submitting {
                return None;
            }
            match validate_for_submit(model) {
                Ok(payload) => {
                    model.submitting = true;
                    cmds.push(ListingFormCommand::Create(payload));
                    Some(ListingFormEvent {
                        message: "Uploading listing...".into(),
                        is_error: false,
                    })
                }
                Err(message) => Some(ListingFormEvent {
                    message,
                    is_error: true,
                }),
            }
        }
        ListingFormMsg::Submitted(result) => {
            model.submitting = false;
            match result {
                Ok(message) => {
                    model.title.clear();
                    model.price.clear();
                    model.description.clear();
                    model.media_files = model.media.reset();
                    Some(ListingFormEvent {
                        message,
                        is_error: false,
                    })
                }
                Err(err) => Some(ListingFormEvent {
                    message: format!("Failed to create listing:\n\n{err}"),
                    is_error: true,
                }),
            }
        }
    }
}

/// Validate the form and capture the payload for upload.
pub fn validate_for_submit(model: &ListingFormModel) -> Result<NewListing, String> {
    let title = model.title.trim();
    let price = model.price.trim();
    if title.is_empty() || price.is_empty() {
        return Err("Title and price are required.".into());
    }
    match price.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => {}
        _ => return Err("Price must be a non-negative number.".into()),
    }
    if model.media_files.is_empty() {
        return Err("Please add at least one image or video.".into());
    }
    Ok(NewListing {
        title: title.to_string(),
        price: price.to_string(),
        description: model.description.trim().to_string(),
        media: Arc::clone(&model.media_files),
    })
}

pub fn view(ui: &mut egui::Ui, model: &ListingFormModel) -> Vec<ListingFormMsg> {
    let mut msgs = Vec::new();

    ui.heading("Add a new ID");
    ui.add_space(8.0);

    egui::Grid::new("listing_form_grid")
        .num_columns(2)
        .spacing(egui::vec2(8.0, 10.0))
        .min_col_width(110.0)
        .show(ui, |ui| {
            ui.label("Title");
            let mut title = model.title.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut title)
                        .hint_text("e.g., Conqueror account, 40 skins")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(ListingFormMsg::TitleChanged(title));
            }
            ui.end_row();

            ui.label("Price (₹)");
            let mut price = model.price.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut price).hint_text("0").desired_width(160.0))
                .changed()
            {
                msgs.push(ListingFormMsg::PriceChanged(price));
            }
            ui.end_row();

            ui.label("Description");
            let mut description = model.description.clone();
            if ui
                .add(
                    egui::TextEdit::multiline(&mut description)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(ListingFormMsg::DescriptionChanged(description));
            }
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.label(egui::RichText::new("Media").strong());
    ui.add_space(4.0);
    let media_msgs = media_upload::view(ui, &model.media);
    msgs.extend(media_msgs.into_iter().map(ListingFormMsg::Media));

    ui.add_space(12.0);
    let label = if model.submitting {
        format!("{} Uploading...", egui_phosphor::regular::SPINNER)
    } else {
        format!("{} Post ID", egui_phosphor::regular::PAPER_PLANE_TILT)
    };
    if ui
        .add_enabled(!model.submitting, egui::Button::new(label))
        .clicked()
    {
        msgs.push(ListingFormMsg::Submit);
    }

    msgs
}
