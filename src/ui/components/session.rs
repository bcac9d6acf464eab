// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Sign-in panel and the role-specific navigation it unlocks.

use eframe::egui;

use crate::models::session::{AuthContext, Role};

/// Screens reachable from the side navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Home,
    AllProducts,
    Videos,
    HowItWorks,
    Faq,
    AddId,
    TelegramLink,
    YoutubeVideos,
    AllPosted,
    Sold,
    CreateId,
    SubAdminActivity,
    MyPosted,
}

impl Section {
    /// Navigation entries for a role, first entry is the landing screen.
    pub fn for_role(role: Role) -> &'static [Section] {
        match role {
            Role::Buyer => &[
                Self::Home,
                Self::AllProducts,
                Self::Videos,
                Self::HowItWorks,
                Self::Faq,
            ],
            Role::SubAdmin => &[
                Self::Home,
                Self::AddId,
                Self::TelegramLink,
                Self::YoutubeVideos,
            ],
            Role::Admin => &[
                Self::AllPosted,
                Self::Sold,
                Self::CreateId,
                Self::SubAdminActivity,
                Self::MyPosted,
                Self::TelegramLink,
                Self::YoutubeVideos,
            ],
        }
    }

    pub fn landing(role: Role) -> Section {
        Self::for_role(role)[0]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::AllProducts => "All Products",
            Self::Videos => "Videos",
            Self::HowItWorks => "How it works",
            Self::Faq => "FAQ",
            Self::AddId => "Add ID",
            Self::TelegramLink => "Telegram Link",
            Self::YoutubeVideos => "YouTube Videos",
            Self::AllPosted => "All Posted IDs",
            Self::Sold => "Sold IDs",
            Self::CreateId => "Create ID",
            Self::SubAdminActivity => "Sub-admin Activity",
            Self::MyPosted => "My Posted IDs",
        }
    }

    fn icon(self) -> &'static str {
        use egui_phosphor::regular as icons;
        match self {
            Self::Home => icons::HOUSE,
            Self::AllProducts | Self::AllPosted => icons::STOREFRONT,
            Self::Videos | Self::YoutubeVideos => icons::YOUTUBE_LOGO,
            Self::HowItWorks => icons::INFO,
            Self::Faq => icons::QUESTION,
            Self::AddId | Self::CreateId => icons::PLUS_CIRCLE,
            Self::TelegramLink => icons::TELEGRAM_LOGO,
            Self::Sold => icons::TAG,
            Self::SubAdminActivity => icons::USERS,
            Self::MyPosted => icons::LIST_BULLETS,
        }
    }
}

#[derive(Default)]
pub struct SessionModel {
    token_input: String,
    role_input: Role,
    /// Role of the active session; buyer when signed out.
    active: Role,
    signed_in: bool,
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub enum SessionMsg {
    TokenChanged(String),
    RoleChanged(Role),
    SignIn,
    SignOut,
}

/// Session transitions the root reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Role),
    SignedOut,
    Failed(String),
}

impl SessionModel {
    pub fn active_role(&self) -> Role {
        self.active
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }
}

pub fn update(model: &mut SessionModel, auth: &AuthContext, msg: SessionMsg) -> Option<SessionEvent> {
    match msg {
        SessionMsg::TokenChanged(text) => {
            model.token_input = text;
            model.error = None;
            None
        }
        SessionMsg::RoleChanged(role) => {
            model.role_input = role;
            model.error = None;
            None
        }
        SessionMsg::SignIn => match auth.sign_in(model.token_input.as_str(), model.role_input) {
            Ok(()) => {
                tracing::info!(role = model.role_input.label(), "signed in");
                model.token_input.clear();
                model.error = None;
                model.active = model.role_input;
                model.signed_in = true;
                Some(SessionEvent::SignedIn(model.active))
            }
            Err(err) => {
                model.error = Some(err.clone());
                Some(SessionEvent::Failed(err))
            }
        },
        SessionMsg::SignOut => {
            auth.sign_out();
            tracing::info!("signed out");
            *model = SessionModel::default();
            Some(SessionEvent::SignedOut)
        }
    }
}

/// Side panel: session controls followed by navigation.
pub fn view(
    ui: &mut egui::Ui,
    model: &SessionModel,
    current: Section,
) -> (Vec<SessionMsg>, Option<Section>) {
    let mut msgs = Vec::new();
    let mut navigate = None;

    ui.add_space(6.0);
    ui.label(
        egui::RichText::new(format!("{} panel", model.active.label()))
            .strong()
            .size(16.0),
    );
    ui.add_space(6.0);

    for section in Section::for_role(model.active) {
        let label = format!("{} {}", section.icon(), section.label());
        if ui.selectable_label(current == *section, label).clicked() && current != *section {
            navigate = Some(*section);
        }
    }

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(6.0);

    if model.signed_in {
        ui.label(
            egui::RichText::new(format!("Signed in as {}", model.active.label()))
                .small()
                .color(egui::Color32::from_gray(110)),
        );
        if ui
            .button(format!("{} Sign out", egui_phosphor::regular::SIGN_OUT))
            .clicked()
        {
            msgs.push(SessionMsg::SignOut);
        }
    } else {
        render_sign_in(ui, model, &mut msgs);
    }

    (msgs, navigate)
}

fn render_sign_in(ui: &mut egui::Ui, model: &SessionModel, msgs: &mut Vec<SessionMsg>) {
    ui.label(egui::RichText::new("Staff sign-in").strong());
    let mut role = model.role_input;
    egui::ComboBox::from_id_salt("session_role")
        .selected_text(role.label())
        .show_ui(ui, |ui| {
            for option in Role::ALL {
                ui.selectable_value(&mut role, option, option.label());
            }
        });
    if role != model.role_input {
        msgs.push(SessionMsg::RoleChanged(role));
    }

    let mut token = model.token_input.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut token)
            .password(true)
            .hint_text("Access token")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        msgs.push(SessionMsg::TokenChanged(token));
    }
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if ui
        .button(format!("{} Sign in", egui_phosphor::regular::SIGN_IN))
        .clicked()
        || submitted
    {
        msgs.push(SessionMsg::SignIn);
    }
    if let Some(err) = &model.error {
        ui.colored_label(egui::Color32::from_rgb(201, 42, 42), err);
    }
}
