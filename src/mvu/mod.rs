// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use crossbeam_channel::Sender;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::logic::progress::{TICK_INTERVAL, spawn_ticker};
use crate::models::listing::{Listing, ListingStatus, NewListing};
use crate::models::media::{FileId, MediaSource, RawFile};
use crate::models::session::{AuthContext, Role};
use crate::models::video::NewVideo;
use crate::ui::components::listing_form::{
    self, ListingFormCommand, ListingFormModel, ListingFormMsg,
};
use crate::ui::components::listings::{
    self, ListingScope, ListingsCommand, ListingsModel, ListingsMsg,
};
use crate::ui::components::media_upload::{
    self, DroppedPayload, MediaUploadCommand, MediaUploadModel, MediaUploadMsg,
};
use crate::ui::components::session::{self, Section, SessionEvent, SessionModel, SessionMsg};
use crate::ui::components::subadmin_activity::{
    self, SubAdminActivityCommand, SubAdminActivityModel, SubAdminActivityMsg,
};
use crate::ui::components::telegram_links::{
    self, DeleteTarget, TelegramLinksCommand, TelegramLinksModel, TelegramLinksMsg, TelegramMode,
};
use crate::ui::components::videos::{self, VideosCommand, VideosModel, VideosMsg};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Screen shown in the central panel.
    pub section: Section,
    /// Shared with the API client; sign-in and sign-out write through it.
    pub auth: AuthContext,
    pub session: SessionModel,
    pub listings: ListingsModel,
    /// "Add ID" / "Create ID" form with the media upload panel.
    pub listing_form: ListingFormModel,
    pub telegram: TelegramLinksModel,
    pub videos: VideosModel,
    pub activity: SubAdminActivityModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(config: &AppConfig, auth: AuthContext) -> Self {
        Self {
            auth,
            listing_form: ListingFormModel::new(MediaUploadModel::with_limits(
                config.max_files,
                config.accept_list(),
            )),
            ..Default::default()
        }
    }

    pub fn role(&self) -> Role {
        self.session.active_role()
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    Navigate(Section),
    Session(SessionMsg),
    Listings(ListingsMsg),
    ListingForm(ListingFormMsg),
    Telegram(TelegramLinksMsg),
    Videos(VideosMsg),
    Activity(SubAdminActivityMsg),
    /// Decoded off-thread; the UI turns it into a texture before `update`.
    ThumbnailDecoded {
        id: FileId,
        image: eframe::egui::ColorImage,
    },
    UrlOpened(Result<(), String>),
    /// Informational notice from a view (e.g. clipboard copy).
    Notify(String),
    DismissError,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    PickMediaFiles { extensions: Vec<&'static str> },
    ResolveDropped(Vec<DroppedPayload>),
    StartTicker(FileId),
    LoadThumbnail { id: FileId, source: MediaSource },
    OpenUrl(String),
    FetchListings(ListingScope),
    SetListingStatus { id: String, status: ListingStatus },
    DeleteListing(String),
    CreateListing(NewListing),
    FetchSubAdminActivity,
    FetchMyTelegramLink,
    SaveMyTelegramLink(String),
    DeleteMyTelegramLink,
    FetchTelegramLinks,
    SaveTelegramLink { id: Option<String>, link: String },
    DeleteTelegramLink(String),
    FetchVideos,
    AddVideo(NewVideo),
    DeleteVideo(String),
}

/// What a command needs from the outside world.
pub struct CommandContext {
    pub api: ApiClient,
    /// Progress ticks bypass the command queue so they never count as pending work.
    pub tick_tx: Sender<Msg>,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Navigate(section) => enter_section(model, section, cmds),
        Msg::Session(m) => match session::update(&mut model.session, &model.auth, m) {
            Some(SessionEvent::SignedIn(role)) => {
                surface_event(model, format!("Signed in as {}", role.label()), false);
                enter_section(model, Section::landing(role), cmds);
            }
            Some(SessionEvent::SignedOut) => {
                surface_event(model, "Signed out".into(), false);
                enter_section(model, Section::landing(Role::Buyer), cmds);
            }
            Some(SessionEvent::Failed(err)) => surface_event(model, err, false),
            None => {}
        },
        Msg::Listings(m) => route_listings(model, m, cmds),
        Msg::ListingForm(m) => route_listing_form(model, m, cmds),
        Msg::Telegram(m) => route_telegram(model, m, cmds),
        Msg::Videos(m) => route_videos(model, m, cmds),
        Msg::Activity(m) => {
            let mut activity_cmds = Vec::new();
            if let Some(err) = subadmin_activity::update(&mut model.activity, m, &mut activity_cmds)
            {
                surface_event(model, err, true);
            }
            for c in activity_cmds {
                match c {
                    SubAdminActivityCommand::Fetch => cmds.push(Command::FetchSubAdminActivity),
                }
            }
        }
        Msg::ThumbnailDecoded { id, image } => {
            // Textures are created in the UI layer where the egui context lives.
            let _ = (id, image);
        }
        Msg::UrlOpened(result) => {
            if let Err(err) = result {
                surface_event(model, format!("Could not open link:\n\n{err}"), true);
            }
        }
        Msg::Notify(message) => surface_event(model, message, false),
        Msg::DismissError => model.error = None,
    }
}

/// Switch screens and kick off whatever the new screen loads.
fn enter_section(model: &mut AppModel, section: Section, cmds: &mut Vec<Command>) {
    model.section = section;
    let role = model.role();
    match section {
        Section::Home if role == Role::Buyer => {
            route_listings(model, ListingsMsg::SetScope(ListingScope::Public), cmds)
        }
        Section::Home | Section::MyPosted => {
            route_listings(model, ListingsMsg::SetScope(ListingScope::Mine), cmds)
        }
        Section::AllProducts => {
            route_listings(model, ListingsMsg::SetScope(ListingScope::Public), cmds)
        }
        Section::AllPosted => {
            route_listings(model, ListingsMsg::SetScope(ListingScope::AllPosted), cmds)
        }
        Section::Sold => route_listings(model, ListingsMsg::SetScope(ListingScope::Sold), cmds),
        Section::Videos => route_videos(model, VideosMsg::Open { manage: false }, cmds),
        Section::YoutubeVideos => route_videos(model, VideosMsg::Open { manage: true }, cmds),
        Section::TelegramLink => {
            let mode = if role == Role::Admin {
                TelegramMode::All
            } else {
                TelegramMode::Own
            };
            route_telegram(model, TelegramLinksMsg::SetMode(mode), cmds);
        }
        Section::SubAdminActivity => update(model, Msg::Activity(SubAdminActivityMsg::Refresh), cmds),
        Section::AddId | Section::CreateId | Section::HowItWorks | Section::Faq => {}
    }
}

fn route_listings(model: &mut AppModel, msg: ListingsMsg, cmds: &mut Vec<Command>) {
    let mut listing_cmds = Vec::new();
    if let Some(event) = listings::update(&mut model.listings, msg, &mut listing_cmds) {
        surface_event(model, event.message, event.is_error);
    }
    for c in listing_cmds {
        cmds.push(match c {
            ListingsCommand::Fetch(scope) => Command::FetchListings(scope),
            ListingsCommand::SetStatus { id, status } => Command::SetListingStatus { id, status },
            ListingsCommand::Delete(id) => Command::DeleteListing(id),
            ListingsCommand::OpenUrl(url) => Command::OpenUrl(url),
        });
    }
}

fn route_listing_form(model: &mut AppModel, msg: ListingFormMsg, cmds: &mut Vec<Command>) {
    let mut form_cmds = Vec::new();
    if let Some(event) = listing_form::update(&mut model.listing_form, msg, &mut form_cmds) {
        surface_event(model, event.message, event.is_error);
    }
    for c in form_cmds {
        cmds.push(match c {
            ListingFormCommand::Create(payload) => Command::CreateListing(payload),
            ListingFormCommand::Media(MediaUploadCommand::PickFiles { extensions }) => {
                Command::PickMediaFiles { extensions }
            }
            ListingFormCommand::Media(MediaUploadCommand::ResolveDropped(payloads)) => {
                Command::ResolveDropped(payloads)
            }
            ListingFormCommand::Media(MediaUploadCommand::StartTicker(id)) => {
                Command::StartTicker(id)
            }
            ListingFormCommand::Media(MediaUploadCommand::LoadThumbnail { id, source }) => {
                Command::LoadThumbnail { id, source }
            }
        });
    }
}

fn route_telegram(model: &mut AppModel, msg: TelegramLinksMsg, cmds: &mut Vec<Command>) {
    let mut telegram_cmds = Vec::new();
    if let Some(event) = telegram_links::update(&mut model.telegram, msg, &mut telegram_cmds) {
        surface_event(model, event.message, event.is_error);
    }
    for c in telegram_cmds {
        cmds.push(match c {
            TelegramLinksCommand::FetchOwn => Command::FetchMyTelegramLink,
            TelegramLinksCommand::FetchAll => Command::FetchTelegramLinks,
            TelegramLinksCommand::SaveOwn(link) => Command::SaveMyTelegramLink(link),
            TelegramLinksCommand::Save { id, link } => Command::SaveTelegramLink { id, link },
            TelegramLinksCommand::DeleteOwn => Command::DeleteMyTelegramLink,
            TelegramLinksCommand::Delete(id) => Command::DeleteTelegramLink(id),
        });
    }
}

fn route_videos(model: &mut AppModel, msg: VideosMsg, cmds: &mut Vec<Command>) {
    let mut video_cmds = Vec::new();
    if let Some(event) = videos::update(&mut model.videos, msg, &mut video_cmds) {
        surface_event(model, event.message, event.is_error);
    }
    for c in video_cmds {
        cmds.push(match c {
            VideosCommand::Fetch => Command::FetchVideos,
            VideosCommand::Add(video) => Command::AddVideo(video),
            VideosCommand::Delete(id) => Command::DeleteVideo(id),
            VideosCommand::OpenUrl(url) => Command::OpenUrl(url),
        });
    }
}

/// Execute a command on a worker thread and return a resulting message.
pub fn run_command(cmd: Command, ctx: &CommandContext) -> Msg {
    let api = &ctx.api;
    match cmd {
        Command::PickMediaFiles { extensions } => {
            let files = rfd::FileDialog::new()
                .set_title("Select images or videos")
                .add_filter("Images & videos", extensions.as_slice())
                .pick_files()
                .unwrap_or_default();
            let mut candidates = Vec::with_capacity(files.len());
            let mut unreadable = 0;
            for path in files {
                match RawFile::from_path(&path) {
                    Ok(raw) => candidates.push(raw),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "unreadable media file");
                        unreadable += 1;
                    }
                }
            }
            media_msg(MediaUploadMsg::CandidatesReady {
                candidates,
                unreadable,
            })
        }
        Command::ResolveDropped(payloads) => {
            let mut candidates = Vec::with_capacity(payloads.len());
            let mut unreadable = 0;
            for payload in payloads {
                match payload.resolve() {
                    Ok(raw) => candidates.push(raw),
                    Err(err) => {
                        tracing::warn!(error = %format!("{err:#}"), "unreadable dropped item");
                        unreadable += 1;
                    }
                }
            }
            media_msg(MediaUploadMsg::CandidatesReady {
                candidates,
                unreadable,
            })
        }
        Command::StartTicker(id) => {
            let tick_tx = ctx.tick_tx.clone();
            let handle = spawn_ticker(id, TICK_INTERVAL, move |id, step| {
                tick_tx
                    .send(media_msg(MediaUploadMsg::ProgressTick { id, step }))
                    .is_ok()
            });
            media_msg(MediaUploadMsg::TickerStarted { id, handle })
        }
        Command::LoadThumbnail { id, source } => {
            match media_upload::load_image_thumbnail(&source) {
                Ok(image) => Msg::ThumbnailDecoded { id, image },
                Err(err) => {
                    tracing::debug!(%id, error = %err, "thumbnail unavailable");
                    media_msg(MediaUploadMsg::ThumbnailFailed { id })
                }
            }
        }
        Command::OpenUrl(url) => Msg::UrlOpened(open::that_detached(&url).map_err(|e| e.to_string())),
        Command::FetchListings(scope) => {
            let result = match scope {
                ListingScope::Mine => api.my_listings(),
                ListingScope::Public | ListingScope::AllPosted | ListingScope::Sold => {
                    api.list_listings()
                }
            }
            .map(|listings| resolve_media_urls(api, listings))
            .map_err(|e| e.to_string());
            Msg::Listings(ListingsMsg::Loaded { scope, result })
        }
        Command::SetListingStatus { id, status } => {
            let result = api.set_listing_status(&id, status).map_err(|e| e.to_string());
            Msg::Listings(ListingsMsg::StatusUpdated { id, status, result })
        }
        Command::DeleteListing(id) => {
            let result = api.delete_listing(&id).map_err(|e| e.to_string());
            Msg::Listings(ListingsMsg::Deleted { id, result })
        }
        Command::CreateListing(payload) => {
            let result = api.create_listing(&payload).map_err(|e| e.to_string());
            Msg::ListingForm(ListingFormMsg::Submitted(result))
        }
        Command::FetchSubAdminActivity => {
            let result = api
                .list_subadmins()
                .and_then(|subs| api.list_listings().map(|listings| (subs, listings)))
                .map_err(|e| e.to_string());
            Msg::Activity(SubAdminActivityMsg::Loaded(result))
        }
        Command::FetchMyTelegramLink => Msg::Telegram(TelegramLinksMsg::OwnLoaded(
            api.my_telegram_link().map_err(|e| e.to_string()),
        )),
        Command::SaveMyTelegramLink(link) => Msg::Telegram(TelegramLinksMsg::OwnSaved(
            api.save_my_telegram_link(&link).map_err(|e| e.to_string()),
        )),
        Command::DeleteMyTelegramLink => Msg::Telegram(TelegramLinksMsg::Deleted {
            target: DeleteTarget::Own,
            result: api.delete_my_telegram_link().map_err(|e| e.to_string()),
        }),
        Command::FetchTelegramLinks => Msg::Telegram(TelegramLinksMsg::AllLoaded(
            api.list_telegram_links().map_err(|e| e.to_string()),
        )),
        Command::SaveTelegramLink { id, link } => {
            let result = match id {
                Some(id) => api.update_telegram_link(&id, &link),
                None => api.create_telegram_link(&link),
            };
            Msg::Telegram(TelegramLinksMsg::LinkSaved(result.map_err(|e| e.to_string())))
        }
        Command::DeleteTelegramLink(id) => {
            let result = api.delete_telegram_link(&id).map_err(|e| e.to_string());
            Msg::Telegram(TelegramLinksMsg::Deleted {
                target: DeleteTarget::Link(id),
                result,
            })
        }
        Command::FetchVideos => {
            Msg::Videos(VideosMsg::Loaded(api.list_videos().map_err(|e| e.to_string())))
        }
        Command::AddVideo(video) => {
            Msg::Videos(VideosMsg::Added(api.add_video(&video).map_err(|e| e.to_string())))
        }
        Command::DeleteVideo(id) => {
            let result = api.delete_video(&id).map_err(|e| e.to_string());
            Msg::Videos(VideosMsg::Deleted { id, result })
        }
    }
}

fn media_msg(msg: MediaUploadMsg) -> Msg {
    Msg::ListingForm(ListingFormMsg::Media(msg))
}

/// Make stored media paths absolute against the API base.
fn resolve_media_urls(api: &ApiClient, mut listings: Vec<Listing>) -> Vec<Listing> {
    for media in listings.iter_mut().flat_map(|l| l.media.iter_mut()) {
        media.url = api.media_url(&media.url);
    }
    listings
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
