// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Top-level egui application shell for the marketplace client.
//! Handles layout, navigation, and wiring to the background workers.

pub mod components;

use std::time::Duration;

use eframe::egui;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::logic::progress::TICK_INTERVAL;
use crate::models::session::{AuthContext, Role};
use crate::mvu::{self, AppModel, Command, CommandContext, Msg};
use crate::ui::components::listing_form::ListingFormMsg;
use crate::ui::components::media_upload::MediaUploadMsg;
use crate::ui::components::session::Section;
use crate::ui::components::{
    listing_form, listings, pages, session, subadmin_activity, telegram_links, videos,
};

/// Stateful egui application driving the buyer, sub-admin, and admin panels.
pub struct SwargStoreApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
    tick_rx: crossbeam_channel::Receiver<Msg>,
}

impl SwargStoreApp {
    /// Build the app and start the command worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error when the API client cannot be created from `config`.
    pub fn new(config: &AppConfig, config_warning: Option<String>) -> anyhow::Result<Self> {
        let auth = AuthContext::default();
        let api = ApiClient::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
            auth.clone(),
        )?;

        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();
        let (tick_tx, tick_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let ctx = CommandContext {
                api: api.clone(),
                tick_tx: tick_tx.clone(),
            };
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &ctx);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        tracing::debug!(threads, base = %api.base_url(), "command workers started");

        let mut inbox = vec![Msg::Navigate(Section::landing(Role::Buyer))];
        if let Some(warning) = config_warning {
            inbox.push(Msg::Notify(warning));
        }

        Ok(Self {
            model: AppModel::new(config, auth),
            inbox,
            cmd_tx,
            msg_rx,
            tick_rx,
        })
    }
}

impl eframe::App for SwargStoreApp {
    /// Required by eframe 0.34; all rendering happens in `update`, which
    /// eframe still calls before `ui` each frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drains worker and ticker messages, applies them to the model, dispatches
    /// resulting commands, and renders the panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }
        // Ticks are not command replies.
        while let Ok(msg) = self.tick_rx.try_recv() {
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted, oldest first.
        let mut msgs = std::mem::take(&mut self.inbox);
        msgs.reverse();
        while let Some(msg) = msgs.pop() {
            match msg {
                Msg::ThumbnailDecoded { id, image } => {
                    let texture =
                        ctx.load_texture(format!("thumb-{id}"), image, egui::TextureOptions::default());
                    msgs.push(Msg::ListingForm(ListingFormMsg::Media(
                        MediaUploadMsg::ThumbnailReady { id, texture },
                    )));
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(format!("{} Swarg Store", egui_phosphor::regular::GAME_CONTROLLER));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::SidePanel::left("navigation")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| {
                let (session_msgs, navigate) =
                    session::view(ui, &self.model.session, self.model.section);
                self.inbox.extend(session_msgs.into_iter().map(Msg::Session));
                if let Some(section) = navigate {
                    self.inbox.push(Msg::Navigate(section));
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.render_section(ui);
                    ui.add_space(8.0);
                });
        });

        if self.model.pending_commands > 0 || self.model.listing_form.media().is_animating() {
            ctx.request_repaint_after(TICK_INTERVAL);
        }
    }
}

impl SwargStoreApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Render the screen selected in the navigation panel.
    fn render_section(&mut self, ui: &mut egui::Ui) {
        match self.model.section {
            Section::Home
            | Section::AllProducts
            | Section::AllPosted
            | Section::Sold
            | Section::MyPosted => {
                if self.model.section == Section::Home && self.model.role() == Role::Buyer {
                    pages::home_banner(ui);
                    ui.add_space(12.0);
                }
                let msgs = listings::view(ui, &self.model.listings);
                self.inbox.extend(msgs.into_iter().map(Msg::Listings));
            }
            Section::AddId | Section::CreateId => {
                let msgs = listing_form::view(ui, &self.model.listing_form);
                self.inbox.extend(msgs.into_iter().map(Msg::ListingForm));
            }
            Section::Videos | Section::YoutubeVideos => {
                let msgs = videos::view(ui, &self.model.videos);
                self.inbox.extend(msgs.into_iter().map(Msg::Videos));
            }
            Section::TelegramLink => {
                let msgs = telegram_links::view(ui, &self.model.telegram);
                self.inbox.extend(msgs.into_iter().map(Msg::Telegram));
            }
            Section::SubAdminActivity => {
                let msgs = subadmin_activity::view(ui, &self.model.activity);
                self.inbox.extend(msgs.into_iter().map(Msg::Activity));
            }
            Section::HowItWorks => pages::how_it_works(ui),
            Section::Faq => pages::faq(ui),
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Something went wrong")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status/error message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        let pending = self.model.pending_commands;
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                let display = if pending > 0 {
                    format!("{text}  ({pending} working…)")
                } else {
                    text.to_string()
                };
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
            }
            if pending > 0 {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text(format!("{pending} task(s) running in background"));
            }
        });
    }
}
