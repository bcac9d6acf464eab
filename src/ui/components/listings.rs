// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Listing browser shared by the buyer and admin panels: cards, filters,
//! status toggles, deletion, sold statistics, and the detail view.

use std::collections::HashSet;

use eframe::egui;

use crate::logic::listings::{
    ListingFilter, StatusFilter, local_now, parse_price_bound, roles_in, sold_on_label, sold_stats,
};
use crate::models::listing::{Listing, ListingStatus, MediaKind, PostedBy, format_price};

/// Which listings a screen shows and what it may do with them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListingScope {
    /// Buyer catalogue; read-only.
    #[default]
    Public,
    /// Every listing, with admin actions.
    AllPosted,
    /// Sold listings with sale statistics.
    Sold,
    /// Listings posted by the signed-in account.
    Mine,
}

impl ListingScope {
    pub fn title(self) -> &'static str {
        match self {
            Self::Public => "All Products",
            Self::AllPosted => "All Posted IDs",
            Self::Sold => "Sold IDs",
            Self::Mine => "My Posted IDs",
        }
    }

    /// Whether status toggles and deletion are offered.
    pub fn manages(self) -> bool {
        matches!(self, Self::AllPosted | Self::Mine)
    }
}

/// Open detail view and carousel position.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DetailView {
    listing_id: String,
    media_index: usize,
}

#[derive(Default)]
pub struct ListingsModel {
    scope: ListingScope,
    listings: Vec<Listing>,
    filter: ListingFilter,
    min_price_input: String,
    max_price_input: String,
    loading: bool,
    detail: Option<DetailView>,
    confirm_delete: Option<String>,
    busy: HashSet<String>,
}

#[derive(Clone, Debug)]
pub enum ListingsMsg {
    SetScope(ListingScope),
    Refresh,
    Loaded {
        scope: ListingScope,
        result: Result<Vec<Listing>, String>,
    },
    SearchChanged(String),
    StatusFilterChanged(StatusFilter),
    RoleFilterChanged(Option<String>),
    MinPriceChanged(String),
    MaxPriceChanged(String),
    ResetFilters,
    ToggleStatus(String),
    StatusUpdated {
        id: String,
        status: ListingStatus,
        result: Result<(), String>,
    },
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
    Deleted {
        id: String,
        result: Result<(), String>,
    },
    OpenDetail(String),
    CloseDetail,
    NextMedia,
    PrevMedia,
    ShowMedia(usize),
    OpenUrl(String),
    DetailsCopied,
}

pub enum ListingsCommand {
    Fetch(ListingScope),
    SetStatus { id: String, status: ListingStatus },
    Delete(String),
    OpenUrl(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingsEvent {
    pub message: String,
    pub is_error: bool,
}

impl ListingsEvent {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

impl ListingsModel {
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Listings the current screen shows, after scope and filters.
    pub fn visible(&self) -> Vec<&Listing> {
        self.filter
            .apply(&self.listings)
            .into_iter()
            .filter(|l| self.scope != ListingScope::Sold || l.is_sold())
            .collect()
    }

    fn find(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    fn detail_listing(&self) -> Option<(&Listing, usize)> {
        let detail = self.detail.as_ref()?;
        self.find(&detail.listing_id).map(|l| (l, detail.media_index))
    }
}

pub fn update(
    model: &mut ListingsModel,
    msg: ListingsMsg,
    cmds: &mut Vec<ListingsCommand>,
) -> Option<ListingsEvent> {
    match msg {
        ListingsMsg::SetScope(scope) => {
            if scope != model.scope {
                model.scope = scope;
                model.listings.clear();
                model.detail = None;
                model.confirm_delete = None;
            }
            model.loading = true;
            cmds.push(ListingsCommand::Fetch(scope));
            None
        }
        ListingsMsg::Refresh => {
            model.loading = true;
            cmds.push(ListingsCommand::Fetch(model.scope));
            None
        }
        ListingsMsg::Loaded { scope, result } => {
            if scope != model.scope {
                return None;
            }
            model.loading = false;
            match result {
                Ok(listings) => {
                    model.listings = listings;
                    if model
                        .detail
                        .as_ref()
                        .is_some_and(|d| model.find(&d.listing_id).is_none())
                    {
                        model.detail = None;
                    }
                    None
                }
                Err(err) => Some(ListingsEvent::error(format!("Failed to fetch IDs:\n\n{err}"))),
            }
        }
        ListingsMsg::SearchChanged(text) => {
            model.filter.search = text;
            None
        }
        ListingsMsg::StatusFilterChanged(status) => {
            model.filter.status = status;
            None
        }
        ListingsMsg::RoleFilterChanged(role) => {
            model.filter.role = role;
            None
        }
        ListingsMsg::MinPriceChanged(text) => {
            if let Ok(value) = parse_price_bound(&text, 0.0) {
                model.filter.min_price = value;
            }
            model.min_price_input = text;
            None
        }
        ListingsMsg::MaxPriceChanged(text) => {
            if let Ok(value) = parse_price_bound(&text, ListingFilter::default().max_price) {
                model.filter.max_price = value;
            }
            model.max_price_input = text;
            None
        }
        ListingsMsg::ResetFilters => {
            model.filter = ListingFilter::default();
            model.min_price_input.clear();
            model.max_price_input.clear();
            None
        }
        ListingsMsg::ToggleStatus(id) => {
            let Some(listing) = model.find(&id) else {
                return None;
            };
            let status = listing.status.toggled();
            if model.busy.insert(id.clone()) {
                cmds.push(ListingsCommand::SetStatus { id, status });
            }
            None
        }
        ListingsMsg::StatusUpdated { id, status, result } => {
            model.busy.remove(&id);
            match result {
                Ok(()) => {
                    if let Some(listing) = model.listings.iter_mut().find(|l| l.id == id) {
                        listing.status = status;
                    }
                    Some(ListingsEvent::info(format!("Marked as {}", status.label())))
                }
                Err(err) => Some(ListingsEvent::error(format!("Failed to update status:\n\n{err}"))),
            }
        }
        ListingsMsg::RequestDelete(id) => {
            model.confirm_delete = Some(id);
            None
        }
        ListingsMsg::CancelDelete => {
            model.confirm_delete = None;
            None
        }
        ListingsMsg::ConfirmDelete => {
            if let Some(id) = model.confirm_delete.take()
                && model.busy.insert(id.clone())
            {
                cmds.push(ListingsCommand::Delete(id));
            }
            None
        }
        ListingsMsg::Deleted { id, result } => {
            model.busy.remove(&id);
            match result {
                Ok(()) => {
                    model.listings.retain(|l| l.id != id);
                    if model.detail.as_ref().is_some_and(|d| d.listing_id == id) {
                        model.detail = None;
                    }
                    Some(ListingsEvent::info("ID deleted"))
                }
                Err(err) => Some(ListingsEvent::error(format!("Failed to delete ID:\n\n{err}"))),
            }
        }
        ListingsMsg::OpenDetail(id) => {
            if model.find(&id).is_some() {
                model.detail = Some(DetailView {
                    listing_id: id,
                    media_index: 0,
                });
            }
            None
        }
        ListingsMsg::CloseDetail => {
            model.detail = None;
            None
        }
        ListingsMsg::NextMedia => {
            step_carousel(model, next_index);
            None
        }
        ListingsMsg::PrevMedia => {
            step_carousel(model, prev_index);
            None
        }
        ListingsMsg::ShowMedia(index) => {
            step_carousel(model, |current, len| if index < len { index } else { current });
            None
        }
        ListingsMsg::OpenUrl(url) => {
            cmds.push(ListingsCommand::OpenUrl(url));
            None
        }
        ListingsMsg::DetailsCopied => Some(ListingsEvent::info("Details copied to clipboard")),
    }
}

fn step_carousel(model: &mut ListingsModel, step: impl Fn(usize, usize) -> usize) {
    let len = model
        .detail_listing()
        .map(|(l, _)| l.media.len())
        .unwrap_or(0);
    if let Some(detail) = model.detail.as_mut() {
        detail.media_index = step(detail.media_index, len);
    }
}

/// Carousel step forward with wrap-around.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Carousel step back with wrap-around.
pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + len - 1) % len
    }
}

pub fn view(ui: &mut egui::Ui, model: &ListingsModel) -> Vec<ListingsMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.heading(model.scope.title());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(
                    !model.loading,
                    egui::Button::new(format!("{} Refresh", egui_phosphor::regular::ARROWS_CLOCKWISE)),
                )
                .clicked()
            {
                msgs.push(ListingsMsg::Refresh);
            }
            if model.loading {
                ui.add(egui::Spinner::new().size(14.0));
            }
        });
    });
    ui.add_space(6.0);

    if model.scope == ListingScope::Sold {
        render_sold_stats(ui, model);
        ui.add_space(8.0);
    }

    render_filters(ui, model, &mut msgs);
    ui.add_space(8.0);

    let visible = model.visible();
    if visible.is_empty() && !model.loading {
        ui.label(
            egui::RichText::new("No IDs found. Try adjusting your search or filter criteria.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
    } else {
        render_cards(ui, model, &visible, &mut msgs);
    }

    if let Some((listing, index)) = model.detail_listing() {
        render_detail(ui.ctx(), model.scope, listing, index, &mut msgs);
    }
    if let Some(id) = &model.confirm_delete {
        render_delete_confirmation(ui.ctx(), model, id, &mut msgs);
    }

    msgs
}

fn render_sold_stats(ui: &mut egui::Ui, model: &ListingsModel) {
    let stats = sold_stats(&model.listings, local_now());
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        egui::Grid::new("sold_stats_grid")
            .num_columns(5)
            .spacing(egui::vec2(24.0, 4.0))
            .show(ui, |ui| {
                for caption in ["Total sold", "Revenue", "Today", "Last 7 days", "Last month"] {
                    ui.label(egui::RichText::new(caption).small().color(egui::Color32::from_gray(110)));
                }
                ui.end_row();
                ui.label(egui::RichText::new(stats.total.to_string()).heading());
                ui.label(egui::RichText::new(format_price(stats.revenue)).heading());
                ui.label(egui::RichText::new(stats.today.to_string()).heading());
                ui.label(egui::RichText::new(stats.last_week.to_string()).heading());
                ui.label(egui::RichText::new(stats.last_month.to_string()).heading());
                ui.end_row();
            });
    });
}

fn render_filters(ui: &mut egui::Ui, model: &ListingsModel, msgs: &mut Vec<ListingsMsg>) {
    ui.horizontal_wrapped(|ui| {
        let mut search = model.filter.search.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut search)
                    .hint_text(format!("{} Search title or seller", egui_phosphor::regular::MAGNIFYING_GLASS))
                    .desired_width(220.0),
            )
            .changed()
        {
            msgs.push(ListingsMsg::SearchChanged(search));
        }

        if model.scope != ListingScope::Sold {
            let mut status = model.filter.status;
            egui::ComboBox::from_id_salt("status_filter")
                .selected_text(status.label())
                .show_ui(ui, |ui| {
                    for option in StatusFilter::ALL {
                        ui.selectable_value(&mut status, option, option.label());
                    }
                });
            if status != model.filter.status {
                msgs.push(ListingsMsg::StatusFilterChanged(status));
            }
        }

        if model.scope != ListingScope::Public {
            let mut role = model.filter.role.clone();
            egui::ComboBox::from_id_salt("role_filter")
                .selected_text(role.clone().unwrap_or_else(|| "All roles".into()))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut role, None, "All roles");
                    for option in roles_in(&model.listings) {
                        ui.selectable_value(&mut role, Some(option.clone()), option);
                    }
                });
            if role != model.filter.role {
                msgs.push(ListingsMsg::RoleFilterChanged(role));
            }
        }

        ui.label("Price");
        price_input(ui, &model.min_price_input, "0", 0.0, msgs, ListingsMsg::MinPriceChanged);
        ui.label("–");
        price_input(
            ui,
            &model.max_price_input,
            "10000000",
            ListingFilter::default().max_price,
            msgs,
            ListingsMsg::MaxPriceChanged,
        );

        if ui.button("Reset").clicked() {
            msgs.push(ListingsMsg::ResetFilters);
        }
    });
}

fn price_input(
    ui: &mut egui::Ui,
    current: &str,
    hint: &str,
    fallback: f64,
    msgs: &mut Vec<ListingsMsg>,
    to_msg: fn(String) -> ListingsMsg,
) {
    let mut text = current.to_string();
    let invalid = parse_price_bound(current, fallback).is_err();
    let mut edit = egui::TextEdit::singleline(&mut text)
        .hint_text(hint)
        .desired_width(90.0);
    if invalid {
        edit = edit.text_color(egui::Color32::from_rgb(201, 42, 42));
    }
    let response = ui.add(edit);
    let response = if invalid {
        response.on_hover_text("Enter a non-negative number")
    } else {
        response
    };
    if response.changed() {
        msgs.push(to_msg(text));
    }
}

fn render_cards(
    ui: &mut egui::Ui,
    model: &ListingsModel,
    visible: &[&Listing],
    msgs: &mut Vec<ListingsMsg>,
) {
    let card_width = 230.0;
    let cols = (ui.available_width() / (card_width + 12.0)).floor().max(1.0) as usize;

    egui::Grid::new(("listing_cards", model.scope as u8))
        .num_columns(cols)
        .spacing(egui::vec2(12.0, 12.0))
        .show(ui, |ui| {
            for (i, listing) in visible.iter().enumerate() {
                render_card(ui, model, listing, card_width, msgs);
                if (i + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });
}

fn render_card(
    ui: &mut egui::Ui,
    model: &ListingsModel,
    listing: &Listing,
    width: f32,
    msgs: &mut Vec<ListingsMsg>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(width);
        ui.vertical(|ui| {
            let cover = listing.media.iter().find(|m| m.kind == MediaKind::Image);
            match cover {
                Some(media) => {
                    ui.add(
                        egui::Image::new(media.url.as_str())
                            .max_size(egui::vec2(width, 130.0))
                            .corner_radius(4.0),
                    );
                }
                None => {
                    ui.add_sized(
                        [width, 130.0],
                        egui::Label::new(
                            egui::RichText::new(egui_phosphor::regular::GAME_CONTROLLER).size(40.0),
                        ),
                    );
                }
            }

            ui.label(egui::RichText::new(&listing.title).strong());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format_price(listing.price)).heading());
                status_badge(ui, listing.status);
            });
            ui.label(
                egui::RichText::new(format!("Seller: {}", listing.seller_name()))
                    .small()
                    .color(egui::Color32::from_gray(102)),
            );
            if model.scope != ListingScope::Public {
                let role = listing.role.as_deref().unwrap_or("unknown");
                ui.label(
                    egui::RichText::new(format!("#{} · {role}", listing.short_id()))
                        .small()
                        .monospace()
                        .color(egui::Color32::from_gray(120)),
                );
            }
            if model.scope == ListingScope::Sold
                && let Some(date) = sold_on_label(listing, local_now().offset())
            {
                ui.label(egui::RichText::new(format!("Sold on: {date}")).small());
            }

            ui.horizontal(|ui| {
                if ui.button("View").clicked() {
                    msgs.push(ListingsMsg::OpenDetail(listing.id.clone()));
                }
                if model.scope.manages() {
                    let busy = model.busy.contains(&listing.id);
                    let toggle_label = if listing.is_sold() {
                        "Mark available"
                    } else {
                        "Mark sold"
                    };
                    if ui
                        .add_enabled(!busy, egui::Button::new(toggle_label))
                        .clicked()
                    {
                        msgs.push(ListingsMsg::ToggleStatus(listing.id.clone()));
                    }
                    if ui
                        .add_enabled(
                            !busy,
                            egui::Button::new(egui_phosphor::regular::TRASH_SIMPLE),
                        )
                        .on_hover_text("Delete ID")
                        .clicked()
                    {
                        msgs.push(ListingsMsg::RequestDelete(listing.id.clone()));
                    }
                }
            });
        });
    });
}

fn status_badge(ui: &mut egui::Ui, status: ListingStatus) {
    let color = match status {
        ListingStatus::Available => egui::Color32::from_rgb(47, 158, 68),
        ListingStatus::Sold => egui::Color32::from_rgb(201, 42, 42),
    };
    ui.label(egui::RichText::new(status.label()).small().strong().color(color));
}

fn render_detail(
    ctx: &egui::Context,
    scope: ListingScope,
    listing: &Listing,
    media_index: usize,
    msgs: &mut Vec<ListingsMsg>,
) {
    let mut open = true;
    egui::Window::new(listing.title.as_str())
        .id(egui::Id::new("listing_detail"))
        .collapsible(false)
        .resizable(true)
        .default_width(560.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .open(&mut open)
        .show(ctx, |ui| {
            render_carousel(ui, listing, media_index, msgs);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format_price(listing.price)).heading().strong());
                status_badge(ui, listing.status);
            });
            if !listing.description.is_empty() {
                ui.add_space(4.0);
                ui.label(&listing.description);
            }

            ui.add_space(8.0);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new("Seller").strong());
                ui.label(listing.seller_name());
                if let Some(email) = listing.posted_by.as_ref().and_then(PostedBy::email) {
                    ui.label(egui::RichText::new(email).small().color(egui::Color32::from_gray(110)));
                }
            });

            ui.add_space(8.0);
            if listing.is_sold() {
                ui.label(
                    egui::RichText::new("This ID has been sold.")
                        .strong()
                        .color(egui::Color32::from_rgb(201, 42, 42)),
                );
            } else {
                ui.horizontal(|ui| {
                    let link = listing
                        .telegram_link
                        .as_deref()
                        .filter(|l| !l.trim().is_empty());
                    let contact = ui
                        .add_enabled(
                            link.is_some(),
                            egui::Button::new(format!(
                                "{} Contact seller on Telegram",
                                egui_phosphor::regular::TELEGRAM_LOGO
                            )),
                        )
                        .on_disabled_hover_text("The seller has not shared a Telegram link");
                    if contact.clicked()
                        && let Some(link) = link
                    {
                        msgs.push(ListingsMsg::OpenUrl(link.to_string()));
                    }
                    if ui
                        .button(format!("{} Copy details", egui_phosphor::regular::COPY))
                        .clicked()
                    {
                        ui.ctx().copy_text(listing.details_text());
                        msgs.push(ListingsMsg::DetailsCopied);
                    }
                });
            }

            if scope != ListingScope::Public {
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!("ID {}", listing.id))
                        .small()
                        .monospace()
                        .color(egui::Color32::from_gray(120)),
                );
            }
        });
    if !open {
        msgs.push(ListingsMsg::CloseDetail);
    }
}

fn render_carousel(
    ui: &mut egui::Ui,
    listing: &Listing,
    media_index: usize,
    msgs: &mut Vec<ListingsMsg>,
) {
    let Some(current) = listing.media.get(media_index) else {
        ui.label(egui::RichText::new("No media").color(egui::Color32::from_gray(150)));
        return;
    };

    ui.horizontal(|ui| {
        let many = listing.media.len() > 1;
        if ui
            .add_enabled(many, egui::Button::new(egui_phosphor::regular::CARET_LEFT))
            .clicked()
        {
            msgs.push(ListingsMsg::PrevMedia);
        }
        match current.kind {
            MediaKind::Image => {
                ui.add(egui::Image::new(current.url.as_str()).max_size(egui::vec2(440.0, 300.0)));
            }
            MediaKind::Video => {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(egui_phosphor::regular::FILM_STRIP).size(48.0));
                    if ui.button("Play video").clicked() {
                        msgs.push(ListingsMsg::OpenUrl(current.url.clone()));
                    }
                });
            }
        }
        if ui
            .add_enabled(many, egui::Button::new(egui_phosphor::regular::CARET_RIGHT))
            .clicked()
        {
            msgs.push(ListingsMsg::NextMedia);
        }
    });

    if listing.media.len() > 1 {
        ui.horizontal_wrapped(|ui| {
            for (i, media) in listing.media.iter().enumerate() {
                let label = match media.kind {
                    MediaKind::Image => egui_phosphor::regular::IMAGE,
                    MediaKind::Video => egui_phosphor::regular::VIDEO,
                };
                if ui.selectable_label(i == media_index, label).clicked() {
                    msgs.push(ListingsMsg::ShowMedia(i));
                }
            }
        });
    }
}

fn render_delete_confirmation(
    ctx: &egui::Context,
    model: &ListingsModel,
    id: &str,
    msgs: &mut Vec<ListingsMsg>,
) {
    let title = model.find(id).map(|l| l.title.as_str()).unwrap_or(id);
    egui::Window::new("Delete ID")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{title}\"? This cannot be undone."));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    msgs.push(ListingsMsg::ConfirmDelete);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(ListingsMsg::CancelDelete);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Listing> {
        serde_json::from_str(
            r#"[
                {"_id": "a", "title": "Alpha", "price": 100, "status": "available", "role": "Admin",
                 "media": [{"type": "image", "url": "/1.png"}, {"type": "video", "url": "/2.mp4"}, {"type": "image", "url": "/3.png"}]},
                {"_id": "b", "title": "Bravo", "price": 200, "status": "sold", "role": "SubAdmin"}
            ]"#,
        )
        .unwrap()
    }

    fn loaded(scope: ListingScope) -> ListingsModel {
        let mut model = ListingsModel::default();
        let mut cmds = Vec::new();
        update(&mut model, ListingsMsg::SetScope(scope), &mut cmds);
        update(
            &mut model,
            ListingsMsg::Loaded {
                scope,
                result: Ok(sample()),
            },
            &mut cmds,
        );
        model
    }

    #[test]
    fn set_scope_fetches_and_ignores_stale_results() {
        let mut model = ListingsModel::default();
        let mut cmds = Vec::new();
        update(&mut model, ListingsMsg::SetScope(ListingScope::Mine), &mut cmds);
        assert!(matches!(cmds.as_slice(), [ListingsCommand::Fetch(ListingScope::Mine)]));
        assert!(model.is_loading());

        update(
            &mut model,
            ListingsMsg::Loaded {
                scope: ListingScope::Public,
                result: Ok(sample()),
            },
            &mut cmds,
        );
        assert!(model.listings().is_empty());
        assert!(model.is_loading());
    }

    #[test]
    fn sold_scope_shows_only_sold() {
        let model = loaded(ListingScope::Sold);
        let ids: Vec<&str> = model.visible().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn toggle_sends_flipped_status_and_applies_on_success() {
        let mut model = loaded(ListingScope::AllPosted);
        let mut cmds = Vec::new();

        update(&mut model, ListingsMsg::ToggleStatus("b".into()), &mut cmds);
        update(&mut model, ListingsMsg::ToggleStatus("b".into()), &mut cmds);

        assert_eq!(cmds.len(), 1, "busy listing is not toggled twice");
        let status = match cmds.pop() {
            Some(ListingsCommand::SetStatus { id, status }) => {
                assert_eq!(id, "b");
                status
            }
            _ => panic!("expected status command"),
        };
        assert_eq!(status, ListingStatus::Available);

        let event = update(
            &mut model,
            ListingsMsg::StatusUpdated {
                id: "b".into(),
                status,
                result: Ok(()),
            },
            &mut cmds,
        )
        .unwrap();
        assert_eq!(event.message, "Marked as Available");
        assert!(!model.listings()[1].is_sold());
    }

    #[test]
    fn failed_toggle_keeps_local_state() {
        let mut model = loaded(ListingScope::AllPosted);
        let mut cmds = Vec::new();
        let event = update(
            &mut model,
            ListingsMsg::StatusUpdated {
                id: "a".into(),
                status: ListingStatus::Sold,
                result: Err("Forbidden (HTTP 403)".into()),
            },
            &mut cmds,
        )
        .unwrap();
        assert!(event.is_error);
        assert!(!model.listings()[0].is_sold());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut model = loaded(ListingScope::Mine);
        let mut cmds = Vec::new();

        update(&mut model, ListingsMsg::RequestDelete("a".into()), &mut cmds);
        assert!(cmds.is_empty());
        update(&mut model, ListingsMsg::ConfirmDelete, &mut cmds);
        assert!(matches!(cmds.as_slice(), [ListingsCommand::Delete(id)] if id == "a"));

        update(
            &mut model,
            ListingsMsg::Deleted {
                id: "a".into(),
                result: Ok(()),
            },
            &mut cmds,
        );
        assert_eq!(model.listings().len(), 1);
    }

    #[test]
    fn cancelled_delete_sends_nothing() {
        let mut model = loaded(ListingScope::Mine);
        let mut cmds = Vec::new();
        update(&mut model, ListingsMsg::RequestDelete("a".into()), &mut cmds);
        update(&mut model, ListingsMsg::CancelDelete, &mut cmds);
        update(&mut model, ListingsMsg::ConfirmDelete, &mut cmds);
        assert!(cmds.is_empty());
    }

    #[test]
    fn carousel_wraps_both_ways() {
        let mut model = loaded(ListingScope::Public);
        let mut cmds = Vec::new();
        update(&mut model, ListingsMsg::OpenDetail("a".into()), &mut cmds);

        update(&mut model, ListingsMsg::PrevMedia, &mut cmds);
        assert_eq!(model.detail_listing().map(|(_, i)| i), Some(2));
        update(&mut model, ListingsMsg::NextMedia, &mut cmds);
        assert_eq!(model.detail_listing().map(|(_, i)| i), Some(0));
        update(&mut model, ListingsMsg::ShowMedia(1), &mut cmds);
        assert_eq!(model.detail_listing().map(|(_, i)| i), Some(1));
        update(&mut model, ListingsMsg::ShowMedia(9), &mut cmds);
        assert_eq!(model.detail_listing().map(|(_, i)| i), Some(1));
    }

    #[test]
    fn index_helpers_handle_empty_media() {
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(prev_index(0, 0), 0);
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
    }

    #[test]
    fn price_inputs_only_apply_valid_numbers() {
        let mut model = loaded(ListingScope::Public);
        let mut cmds = Vec::new();

        update(&mut model, ListingsMsg::MinPriceChanged("150".into()), &mut cmds);
        assert_eq!(model.visible().len(), 1);

        update(&mut model, ListingsMsg::MinPriceChanged("abc".into()), &mut cmds);
        assert_eq!(model.visible().len(), 1, "invalid input keeps last bound");

        update(&mut model, ListingsMsg::ResetFilters, &mut cmds);
        assert_eq!(model.visible().len(), 2);
    }

    #[test]
    fn deleting_open_listing_closes_detail() {
        let mut model = loaded(ListingScope::AllPosted);
        let mut cmds = Vec::new();
        update(&mut model, ListingsMsg::OpenDetail("a".into()), &mut cmds);
        update(
            &mut model,
            ListingsMsg::Deleted {
                id: "a".into(),
                result: Ok(()),
            },
            &mut cmds,
        );
        assert!(model.detail_listing().is_none());
    }
}
