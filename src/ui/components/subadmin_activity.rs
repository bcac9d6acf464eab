// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Admin overview of what each sub-admin has posted.

use eframe::egui;

use crate::logic::listings::group_by_subadmin;
use crate::models::listing::{Listing, SubAdmin, format_price};

#[derive(Default)]
pub struct SubAdminActivityModel {
    subadmins: Vec<SubAdmin>,
    listings: Vec<Listing>,
    loading: bool,
}

#[derive(Clone, Debug)]
pub enum SubAdminActivityMsg {
    Refresh,
    Loaded(Result<(Vec<SubAdmin>, Vec<Listing>), String>),
}

pub enum SubAdminActivityCommand {
    Fetch,
}

impl SubAdminActivityModel {
    pub fn groups(&self) -> Vec<(&SubAdmin, Vec<&Listing>)> {
        group_by_subadmin(&self.subadmins, &self.listings)
    }
}

/// Returns an error message when loading failed.
pub fn update(
    model: &mut SubAdminActivityModel,
    msg: SubAdminActivityMsg,
    cmds: &mut Vec<SubAdminActivityCommand>,
) -> Option<String> {
    match msg {
        SubAdminActivityMsg::Refresh => {
            model.loading = true;
            cmds.push(SubAdminActivityCommand::Fetch);
            None
        }
        SubAdminActivityMsg::Loaded(result) => {
            model.loading = false;
            match result {
                Ok((subadmins, listings)) => {
                    model.subadmins = subadmins;
                    model.listings = listings;
                    None
                }
                Err(err) => Some(format!("Failed to fetch sub-admin activity:\n\n{err}")),
            }
        }
    }
}

pub fn view(ui: &mut egui::Ui, model: &SubAdminActivityModel) -> Vec<SubAdminActivityMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("Sub-admin Activity");
        if model.loading {
            ui.add(egui::Spinner::new().size(14.0));
        } else if ui
            .button(egui_phosphor::regular::ARROWS_CLOCKWISE)
            .on_hover_text("Refresh")
            .clicked()
        {
            msgs.push(SubAdminActivityMsg::Refresh);
        }
    });
    ui.add_space(8.0);

    let groups = model.groups();
    if groups.is_empty() && !model.loading {
        ui.label(
            egui::RichText::new("No sub-admins found.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
    }

    for (sub, posted) in groups {
        let header = format!("{} · {} posted", sub.display_name(), posted.len());
        egui::CollapsingHeader::new(header)
            .id_salt(("subadmin", &sub.id))
            .default_open(!posted.is_empty())
            .show(ui, |ui| {
                if let Some(email) = sub.email.as_deref() {
                    ui.label(
                        egui::RichText::new(email)
                            .small()
                            .color(egui::Color32::from_gray(110)),
                    );
                }
                if posted.is_empty() {
                    ui.label(egui::RichText::new("No IDs posted yet.").italics());
                    return;
                }
                egui::Grid::new(("subadmin_listings", &sub.id))
                    .num_columns(3)
                    .striped(true)
                    .spacing(egui::vec2(16.0, 4.0))
                    .show(ui, |ui| {
                        for listing in posted {
                            ui.label(&listing.title);
                            ui.label(format_price(listing.price));
                            ui.label(listing.status.label());
                            ui.end_row();
                        }
                    });
            });
    }

    msgs
}
