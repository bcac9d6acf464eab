// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! YouTube video gallery for buyers and the staff screen that curates it.

use eframe::egui;

use crate::models::video::{NewVideo, YoutubeVideo};

#[derive(Default)]
pub struct VideosModel {
    manage: bool,
    videos: Vec<YoutubeVideo>,
    url: String,
    title: String,
    description: String,
    loading: bool,
    adding: bool,
    confirm_delete: Option<String>,
}

#[derive(Clone, Debug)]
pub enum VideosMsg {
    /// Enter the screen; `true` enables add and remove.
    Open { manage: bool },
    Refresh,
    Loaded(Result<Vec<YoutubeVideo>, String>),
    UrlChanged(String),
    TitleChanged(String),
    DescriptionChanged(String),
    Add,
    Added(Result<YoutubeVideo, String>),
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
    Deleted { id: String, result: Result<(), String> },
    Watch(String),
}

pub enum VideosCommand {
    Fetch,
    Add(NewVideo),
    Delete(String),
    OpenUrl(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideosEvent {
    pub message: String,
    pub is_error: bool,
}

impl VideosModel {
    pub fn videos(&self) -> &[YoutubeVideo] {
        &self.videos
    }

    pub fn is_managing(&self) -> bool {
        self.manage
    }
}

fn error(message: String) -> Option<VideosEvent> {
    Some(VideosEvent {
        message,
        is_error: true,
    })
}

fn info(message: &str) -> Option<VideosEvent> {
    Some(VideosEvent {
        message: message.to_string(),
        is_error: false,
    })
}

pub fn update(
    model: &mut VideosModel,
    msg: VideosMsg,
    cmds: &mut Vec<VideosCommand>,
) -> Option<VideosEvent> {
    match msg {
        VideosMsg::Open { manage } => {
            model.manage = manage;
            model.confirm_delete = None;
            model.loading = true;
            cmds.push(VideosCommand::Fetch);
            None
        }
        VideosMsg::Refresh => {
            model.loading = true;
            cmds.push(VideosCommand::Fetch);
            None
        }
        VideosMsg::Loaded(result) => {
            model.loading = false;
            match result {
                Ok(videos) => {
                    model.videos = videos;
                    None
                }
                Err(err) => error(format!("Failed to fetch videos:\n\n{err}")),
            }
        }
        VideosMsg::UrlChanged(text) => {
            model.url = text;
            None
        }
        VideosMsg::TitleChanged(text) => {
            model.title = text;
            None
        }
        VideosMsg::DescriptionChanged(text) => {
            model.description = text;
            None
        }
        VideosMsg::Add => {
            if !model.manage || model.adding {
                return None;
            }
            match NewVideo::validate(&model.url, &model.title, &model.description) {
                Ok(video) => {
                    model.adding = true;
                    cmds.push(VideosCommand::Add(video));
                    None
                }
                Err(err) => error(err),
            }
        }
        VideosMsg::Added(result) => {
            model.adding = false;
            match result {
                Ok(video) => {
                    model.videos.push(video);
                    model.url.clear();
                    model.title.clear();
                    model.description.clear();
                    info("Video added")
                }
                Err(err) => error(format!("Failed to add video:\n\n{err}")),
            }
        }
        VideosMsg::RequestDelete(id) => {
            if model.manage {
                model.confirm_delete = Some(id);
            }
            None
        }
        VideosMsg::CancelDelete => {
            model.confirm_delete = None;
            None
        }
        VideosMsg::ConfirmDelete => {
            if let Some(id) = model.confirm_delete.take() {
                cmds.push(VideosCommand::Delete(id));
            }
            None
        }
        VideosMsg::Deleted { id, result } => match result {
            Ok(()) => {
                model.videos.retain(|v| v.id != id);
                info("Video removed")
            }
            Err(err) => error(format!("Failed to remove video:\n\n{err}")),
        },
        VideosMsg::Watch(url) => {
            cmds.push(VideosCommand::OpenUrl(url));
            None
        }
    }
}

/// Thumbnail served by YouTube for a video id.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}

pub fn view(ui: &mut egui::Ui, model: &VideosModel) -> Vec<VideosMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.heading(if model.manage { "YouTube Videos" } else { "Videos" });
        if model.loading {
            ui.add(egui::Spinner::new().size(14.0));
        }
    });
    ui.add_space(8.0);

    if model.manage {
        render_add_form(ui, model, &mut msgs);
        ui.add_space(12.0);
    }

    if model.videos.is_empty() && !model.loading {
        ui.label(
            egui::RichText::new("No videos yet.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
    }

    let card_width = 280.0;
    let cols = (ui.available_width() / (card_width + 12.0)).floor().max(1.0) as usize;
    egui::Grid::new("video_cards")
        .num_columns(cols)
        .spacing(egui::vec2(12.0, 12.0))
        .show(ui, |ui| {
            for (i, video) in model.videos.iter().enumerate() {
                render_card(ui, model.manage, video, card_width, &mut msgs);
                if (i + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });

    if model.confirm_delete.is_some() {
        egui::Window::new("Remove video")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ui.ctx(), |ui| {
                ui.label("Remove this video from the gallery?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Remove").clicked() {
                        msgs.push(VideosMsg::ConfirmDelete);
                    }
                    if ui.button("Cancel").clicked() {
                        msgs.push(VideosMsg::CancelDelete);
                    }
                });
            });
    }

    msgs
}

fn render_add_form(ui: &mut egui::Ui, model: &VideosModel, msgs: &mut Vec<VideosMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("video_form_grid")
            .num_columns(2)
            .spacing(egui::vec2(8.0, 8.0))
            .show(ui, |ui| {
                ui.label("YouTube link");
                let mut url = model.url.clone();
                if ui
                    .add(
                        egui::TextEdit::singleline(&mut url)
                            .hint_text("https://www.youtube.com/watch?v=...")
                            .desired_width(360.0),
                    )
                    .changed()
                {
                    msgs.push(VideosMsg::UrlChanged(url));
                }
                ui.end_row();

                ui.label("Title");
                let mut title = model.title.clone();
                if ui
                    .add(egui::TextEdit::singleline(&mut title).desired_width(360.0))
                    .changed()
                {
                    msgs.push(VideosMsg::TitleChanged(title));
                }
                ui.end_row();

                ui.label("Description");
                let mut description = model.description.clone();
                if ui
                    .add(
                        egui::TextEdit::multiline(&mut description)
                            .desired_rows(2)
                            .desired_width(360.0),
                    )
                    .changed()
                {
                    msgs.push(VideosMsg::DescriptionChanged(description));
                }
                ui.end_row();
            });
        if ui
            .add_enabled(
                !model.adding,
                egui::Button::new(format!("{} Add video", egui_phosphor::regular::PLUS)),
            )
            .clicked()
        {
            msgs.push(VideosMsg::Add);
        }
    });
}

fn render_card(
    ui: &mut egui::Ui,
    manage: bool,
    video: &YoutubeVideo,
    width: f32,
    msgs: &mut Vec<VideosMsg>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(width);
        ui.vertical(|ui| {
            match video.video_id() {
                Some(id) => {
                    ui.add(
                        egui::Image::new(thumbnail_url(id))
                            .max_size(egui::vec2(width, 158.0))
                            .corner_radius(4.0),
                    );
                }
                None => {
                    ui.label(
                        egui::RichText::new("Invalid YouTube link")
                            .color(egui::Color32::from_rgb(201, 42, 42)),
                    );
                }
            }
            ui.label(egui::RichText::new(video.display_title()).strong());
            if !video.description.is_empty() {
                ui.label(egui::RichText::new(&video.description).small());
            }
            ui.horizontal(|ui| {
                if let Some(watch) = video.watch_url()
                    && ui
                        .button(format!("{} Watch", egui_phosphor::regular::PLAY))
                        .clicked()
                {
                    msgs.push(VideosMsg::Watch(watch));
                }
                if manage
                    && ui
                        .button(egui_phosphor::regular::TRASH_SIMPLE)
                        .on_hover_text("Remove video")
                        .clicked()
                {
                    msgs.push(VideosMsg::RequestDelete(video.id.clone()));
                }
            });
        });
    });
}
