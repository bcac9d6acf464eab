// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Telegram contact links: a sub-admin maintains their own link, an admin
//! manages every link.

use eframe::egui;

use crate::models::telegram::{TelegramLink, validate_link};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TelegramMode {
    /// The signed-in sub-admin's single link.
    #[default]
    Own,
    /// Every link, admin only.
    All,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Own,
    Link(String),
}

#[derive(Default)]
pub struct TelegramLinksModel {
    mode: TelegramMode,
    own: Option<TelegramLink>,
    links: Vec<TelegramLink>,
    input: String,
    input_error: Option<String>,
    editing: Option<String>,
    loading: bool,
    saving: bool,
    confirm_delete: Option<DeleteTarget>,
}

#[derive(Clone, Debug)]
pub enum TelegramLinksMsg {
    SetMode(TelegramMode),
    Refresh,
    OwnLoaded(Result<Option<TelegramLink>, String>),
    AllLoaded(Result<Vec<TelegramLink>, String>),
    InputChanged(String),
    Save,
    OwnSaved(Result<TelegramLink, String>),
    LinkSaved(Result<(), String>),
    Edit(String),
    CancelEdit,
    RequestDelete(DeleteTarget),
    CancelDelete,
    ConfirmDelete,
    Deleted {
        target: DeleteTarget,
        result: Result<(), String>,
    },
}

pub enum TelegramLinksCommand {
    FetchOwn,
    FetchAll,
    SaveOwn(String),
    Save { id: Option<String>, link: String },
    DeleteOwn,
    Delete(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelegramLinksEvent {
    pub message: String,
    pub is_error: bool,
}

impl TelegramLinksEvent {
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

impl TelegramLinksModel {
    pub fn mode(&self) -> TelegramMode {
        self.mode
    }

    pub fn own(&self) -> Option<&TelegramLink> {
        self.own.as_ref()
    }

    pub fn links(&self) -> &[TelegramLink] {
        &self.links
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn fetch_command(&self) -> TelegramLinksCommand {
        match self.mode {
            TelegramMode::Own => TelegramLinksCommand::FetchOwn,
            TelegramMode::All => TelegramLinksCommand::FetchAll,
        }
    }
}

pub fn update(
    model: &mut TelegramLinksModel,
    msg: TelegramLinksMsg,
    cmds: &mut Vec<TelegramLinksCommand>,
) -> Option<TelegramLinksEvent> {
    match msg {
        TelegramLinksMsg::SetMode(mode) => {
            if mode != model.mode {
                *model = TelegramLinksModel {
                    mode,
                    ..Default::default()
                };
            }
            model.loading = true;
            cmds.push(model.fetch_command());
            None
        }
        TelegramLinksMsg::Refresh => {
            model.loading = true;
            cmds.push(model.fetch_command());
            None
        }
        TelegramLinksMsg::OwnLoaded(result) => {
            model.loading = false;
            match result {
                Ok(link) => {
                    model.input = link.as_ref().map(|l| l.link.clone()).unwrap_or_default();
                    model.own = link;
                    None
                }
                Err(err) => Some(TelegramLinksEvent::error(format!(
                    "Failed to fetch Telegram link:\n\n{err}"
                ))),
            }
        }
        TelegramLinksMsg::AllLoaded(result) => {
            model.loading = false;
            match result {
                Ok(links) => {
                    model.links = links;
                    None
                }
                Err(err) => Some(TelegramLinksEvent::error(format!(
                    "Failed to fetch Telegram links:\n\n{err}"
                ))),
            }
        }
        TelegramLinksMsg::InputChanged(text) => {
            model.input = text;
            model.input_error = None;
            None
        }
        TelegramLinksMsg::Save => {
            if model.saving {
                return None;
            }
            match validate_link(&model.input) {
                Ok(link) => {
                    model.saving = true;
                    model.input_error = None;
                    cmds.push(match model.mode {
                        TelegramMode::Own => TelegramLinksCommand::SaveOwn(link),
                        TelegramMode::All => TelegramLinksCommand::Save {
                            id: model.editing.clone(),
                            link,
                        },
                    });
                    None
                }
                Err(err) => {
                    model.input_error = Some(err.clone());
                    Some(TelegramLinksEvent::error(err))
                }
            }
        }
        TelegramLinksMsg::OwnSaved(result) => {
            model.saving = false;
            match result {
                Ok(link) => {
                    model.input = link.link.clone();
                    model.own = Some(link);
                    Some(TelegramLinksEvent::info("Telegram link saved"))
                }
                Err(err) => Some(TelegramLinksEvent::error(format!(
                    "Failed to save Telegram link:\n\n{err}"
                ))),
            }
        }
        TelegramLinksMsg::LinkSaved(result) => {
            model.saving = false;
            match result {
                Ok(()) => {
                    let message = if model.editing.take().is_some() {
                        "Telegram link updated"
                    } else {
                        "Telegram link added"
                    };
                    model.input.clear();
                    model.loading = true;
                    cmds.push(TelegramLinksCommand::FetchAll);
                    Some(TelegramLinksEvent::info(message))
                }
                Err(err) => Some(TelegramLinksEvent::error(format!(
                    "Failed to save Telegram link:\n\n{err}"
                ))),
            }
        }
        TelegramLinksMsg::Edit(id) => {
            if let Some(link) = model.links.iter().find(|l| l.id == id) {
                model.input = link.link.clone();
                model.input_error = None;
                model.editing = Some(id);
            }
            None
        }
        TelegramLinksMsg::CancelEdit => {
            model.editing = None;
            model.input.clear();
            model.input_error = None;
            None
        }
        TelegramLinksMsg::RequestDelete(target) => {
            model.confirm_delete = Some(target);
            None
        }
        TelegramLinksMsg::CancelDelete => {
            model.confirm_delete = None;
            None
        }
        TelegramLinksMsg::ConfirmDelete => {
            match model.confirm_delete.take() {
                Some(DeleteTarget::Own) => cmds.push(TelegramLinksCommand::DeleteOwn),
                Some(DeleteTarget::Link(id)) => cmds.push(TelegramLinksCommand::Delete(id)),
                None => {}
            }
            None
        }
        TelegramLinksMsg::Deleted { target, result } => match result {
            Ok(()) => {
                match target {
                    DeleteTarget::Own => {
                        model.own = None;
                        model.input.clear();
                    }
                    DeleteTarget::Link(id) => {
                        model.links.retain(|l| l.id != id);
                        if model.editing.as_deref() == Some(id.as_str()) {
                            model.editing = None;
                            model.input.clear();
                        }
                    }
                }
                Some(TelegramLinksEvent::info("Telegram link deleted"))
            }
            Err(err) => Some(TelegramLinksEvent::error(format!(
                "Failed to delete Telegram link:\n\n{err}"
            ))),
        },
    }
}

pub fn view(ui: &mut egui::Ui, model: &TelegramLinksModel) -> Vec<TelegramLinksMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.heading(match model.mode {
            TelegramMode::Own => "Your Telegram Link",
            TelegramMode::All => "Telegram Links",
        });
        if model.loading {
            ui.add(egui::Spinner::new().size(14.0));
        }
    });
    ui.label(
        egui::RichText::new("Buyers use this link to contact the seller of an ID.")
            .small()
            .color(egui::Color32::from_gray(110)),
    );
    ui.add_space(8.0);

    render_input(ui, model, &mut msgs);
    ui.add_space(12.0);

    match model.mode {
        TelegramMode::Own => render_own(ui, model, &mut msgs),
        TelegramMode::All => render_all(ui, model, &mut msgs),
    }

    if let Some(target) = &model.confirm_delete {
        egui::Window::new("Delete Telegram link")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ui.ctx(), |ui| {
                let link = match target {
                    DeleteTarget::Own => model.own.as_ref().map(|l| l.link.as_str()),
                    DeleteTarget::Link(id) => model
                        .links
                        .iter()
                        .find(|l| &l.id == id)
                        .map(|l| l.link.as_str()),
                };
                ui.label(format!(
                    "Delete {}?",
                    link.unwrap_or("this Telegram link")
                ));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        msgs.push(TelegramLinksMsg::ConfirmDelete);
                    }
                    if ui.button("Cancel").clicked() {
                        msgs.push(TelegramLinksMsg::CancelDelete);
                    }
                });
            });
    }

    msgs
}

fn render_input(ui: &mut egui::Ui, model: &TelegramLinksModel, msgs: &mut Vec<TelegramLinksMsg>) {
    ui.horizontal(|ui| {
        let mut text = model.input.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text("https://t.me/your_username")
                .desired_width(320.0),
        );
        if response.changed() {
            msgs.push(TelegramLinksMsg::InputChanged(text));
        }
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let label = match (model.mode, &model.editing, &model.own) {
            (TelegramMode::All, Some(_), _) => "Update",
            (TelegramMode::All, None, _) => "Add",
            (TelegramMode::Own, _, Some(_)) => "Update",
            (TelegramMode::Own, _, None) => "Save",
        };
        if ui
            .add_enabled(!model.saving, egui::Button::new(label))
            .clicked()
            || submitted
        {
            msgs.push(TelegramLinksMsg::Save);
        }
        if model.editing.is_some() && ui.button("Cancel").clicked() {
            msgs.push(TelegramLinksMsg::CancelEdit);
        }
    });
    if let Some(err) = &model.input_error {
        ui.colored_label(egui::Color32::from_rgb(201, 42, 42), err);
    }
}

fn render_own(ui: &mut egui::Ui, model: &TelegramLinksModel, msgs: &mut Vec<TelegramLinksMsg>) {
    match &model.own {
        Some(link) => {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui_phosphor::regular::TELEGRAM_LOGO);
                    ui.hyperlink(&link.link);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(egui_phosphor::regular::TRASH_SIMPLE)
                            .on_hover_text("Delete link")
                            .clicked()
                        {
                            msgs.push(TelegramLinksMsg::RequestDelete(DeleteTarget::Own));
                        }
                    });
                });
            });
        }
        None if !model.loading => {
            ui.label(
                egui::RichText::new("No Telegram link saved yet.")
                    .italics()
                    .color(egui::Color32::from_gray(110)),
            );
        }
        None => {}
    }
}

fn render_all(ui: &mut egui::Ui, model: &TelegramLinksModel, msgs: &mut Vec<TelegramLinksMsg>) {
    if model.links.is_empty() && !model.loading {
        ui.label(
            egui::RichText::new("No Telegram links yet.")
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
        return;
    }

    for link in &model.links {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.hyperlink(&link.link);
                    if let Some(label) = link.added_by_label() {
                        ui.label(
                            egui::RichText::new(label)
                                .small()
                                .color(egui::Color32::from_gray(110)),
                        );
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(egui_phosphor::regular::TRASH_SIMPLE)
                        .on_hover_text("Delete link")
                        .clicked()
                    {
                        msgs.push(TelegramLinksMsg::RequestDelete(DeleteTarget::Link(
                            link.id.clone(),
                        )));
                    }
                    if ui
                        .button(egui_phosphor::regular::PENCIL_SIMPLE)
                        .on_hover_text("Edit link")
                        .clicked()
                    {
                        msgs.push(TelegramLinksMsg::Edit(link.id.clone()));
                    }
                });
            });
        });
        ui.add_space(4.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, url: &str) -> TelegramLink {
        TelegramLink {
            id: id.into(),
            link: url.into(),
            added_by: None,
            added_by_role: None,
        }
    }

    fn admin_model() -> TelegramLinksModel {
        let mut model = TelegramLinksModel::default();
        let mut cmds = Vec::new();
        update(&mut model, TelegramLinksMsg::SetMode(TelegramMode::All), &mut cmds);
        update(
            &mut model,
            TelegramLinksMsg::AllLoaded(Ok(vec![
                link("1", "https://t.me/one"),
                link("2", "https://t.me/two"),
            ])),
            &mut cmds,
        );
        model
    }

    #[test]
    fn own_link_prefills_input() {
        let mut model = TelegramLinksModel::default();
        let mut cmds = Vec::new();
        update(&mut model, TelegramLinksMsg::SetMode(TelegramMode::Own), &mut cmds);
        assert!(matches!(cmds.as_slice(), [TelegramLinksCommand::FetchOwn]));

        update(
            &mut model,
            TelegramLinksMsg::OwnLoaded(Ok(Some(link("x", "https://t.me/me")))),
            &mut cmds,
        );
        assert_eq!(model.input(), "https://t.me/me");
    }

    #[test]
    fn missing_own_link_is_not_an_error() {
        let mut model = TelegramLinksModel::default();
        let mut cmds = Vec::new();
        let event = update(&mut model, TelegramLinksMsg::OwnLoaded(Ok(None)), &mut cmds);
        assert!(event.is_none());
        assert!(model.own().is_none());
    }

    #[test]
    fn invalid_link_is_rejected_before_sending() {
        let mut model = TelegramLinksModel::default();
        let mut cmds = Vec::new();
        update(&mut model, TelegramLinksMsg::InputChanged("t.me/me".into()), &mut cmds);

        let event = update(&mut model, TelegramLinksMsg::Save, &mut cmds).unwrap();

        assert!(event.is_error);
        assert!(cmds.is_empty());
    }

    #[test]
    fn own_save_sends_trimmed_link() {
        let mut model = TelegramLinksModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            TelegramLinksMsg::InputChanged("  https://t.me/me ".into()),
            &mut cmds,
        );
        update(&mut model, TelegramLinksMsg::Save, &mut cmds);
        assert!(matches!(cmds.as_slice(), [TelegramLinksCommand::SaveOwn(l)] if l == "https://t.me/me"));
    }

    #[test]
    fn admin_edit_then_save_updates_by_id() {
        let mut model = admin_model();
        let mut cmds = Vec::new();

        update(&mut model, TelegramLinksMsg::Edit("2".into()), &mut cmds);
        assert_eq!(model.input(), "https://t.me/two");
        update(
            &mut model,
            TelegramLinksMsg::InputChanged("https://t.me/renamed".into()),
            &mut cmds,
        );
        update(&mut model, TelegramLinksMsg::Save, &mut cmds);

        match cmds.pop() {
            Some(TelegramLinksCommand::Save { id, link }) => {
                assert_eq!(id.as_deref(), Some("2"));
                assert_eq!(link, "https://t.me/renamed");
            }
            _ => panic!("expected save command"),
        }

        let event = update(&mut model, TelegramLinksMsg::LinkSaved(Ok(())), &mut cmds).unwrap();
        assert_eq!(event.message, "Telegram link updated");
        assert!(matches!(cmds.as_slice(), [TelegramLinksCommand::FetchAll]));
    }

    #[test]
    fn delete_goes_through_confirmation() {
        let mut model = admin_model();
        let mut cmds = Vec::new();

        update(
            &mut model,
            TelegramLinksMsg::RequestDelete(DeleteTarget::Link("1".into())),
            &mut cmds,
        );
        assert!(cmds.is_empty());
        update(&mut model, TelegramLinksMsg::ConfirmDelete, &mut cmds);
        assert!(matches!(cmds.as_slice(), [TelegramLinksCommand::Delete(id)] if id == "1"));

        update(
            &mut model,
            TelegramLinksMsg::Deleted {
                target: DeleteTarget::Link("1".into()),
                result: Ok(()),
            },
            &mut cmds,
        );
        assert_eq!(model.links().len(), 1);
    }

    #[test]
    fn switching_mode_clears_state() {
        let mut model = admin_model();
        let mut cmds = Vec::new();
        update(&mut model, TelegramLinksMsg::SetMode(TelegramMode::Own), &mut cmds);
        assert!(model.links().is_empty());
        assert_eq!(model.mode(), TelegramMode::Own);
    }
}
