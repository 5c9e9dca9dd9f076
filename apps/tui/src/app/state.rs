use std::future::Future;
use std::time::{Duration, Instant};

use color_eyre::Result;
use fleetwatch::config::AppConfig;
use fleetwatch::db::models::{Vessel, VesselDraft};
use fleetwatch::db::{create_database_pool, setup_database, Store};
use fleetwatch::domain::{VesselStatus, VesselType};
use fleetwatch::fleet::FleetData;
use fleetwatch::geo::Position;
use fleetwatch::map::MapView;
use fleetwatch::snapshot::{self, FleetSnapshot};
use fleetwatch::{FleetError, FleetResult};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::actions::AppActions;
use crate::app::loader::{
    spawn_action, spawn_load, ActionMessage, ActionNotice, ActionOutcome, LoadMessage,
};
use crate::app::radar_view::RadarView;

pub const TOAST_TIMEOUT: Duration = Duration::from_secs(4);

/// Data a screen renders, before and after its background load lands.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loaded(T),
}

impl<T> LoadState<T> {
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub const fn as_loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= TOAST_TIMEOUT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Radar,
    Map,
    Vessels,
    VesselActions,
    VesselForm,
    VesselDetails,
    Ocean,
    Events,
    Regions,
    Services,
    News,
    Users,
    Alerts,
}

impl AppScreen {
    /// Screens reachable from the number keys, in key order starting at `1`.
    pub const TABS: [Self; 10] = [
        Self::Dashboard,
        Self::Radar,
        Self::Vessels,
        Self::Ocean,
        Self::Events,
        Self::Regions,
        Self::Services,
        Self::News,
        Self::Users,
        Self::Alerts,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Radar => "Radar",
            Self::Map => "Map",
            Self::Vessels | Self::VesselActions => "Vessels",
            Self::VesselForm => "Vessel Form",
            Self::VesselDetails => "Vessel Details",
            Self::Ocean => "Ocean",
            Self::Events => "Events",
            Self::Regions => "Regions",
            Self::Services => "Services",
            Self::News => "News",
            Self::Users => "Users",
            Self::Alerts => "Alerts",
        }
    }

    /// Key `'1'..='9'` then `'0'` for the tenth tab.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = "1234567890".find(digit)?;
        Self::TABS.get(index).copied()
    }

    /// The tab a screen highlights, so sub-screens light up their parent.
    pub fn tab_index(self) -> usize {
        let parent = match self {
            Self::VesselActions | Self::VesselForm | Self::VesselDetails => Self::Vessels,
            Self::Map => Self::Radar,
            other => other,
        };
        Self::TABS
            .iter()
            .position(|tab| *tab == parent)
            .unwrap_or_default()
    }
}

/// Entries of the vessel actions popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VesselAction {
    Details,
    Approve,
    Reject,
    Edit,
    Delete,
}

impl VesselAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Details => "View details",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }

    /// Approve and reject are only offered to admins, and only for pending vessels.
    pub fn available(is_admin: bool, status: VesselStatus) -> Vec<Self> {
        let mut actions = vec![Self::Details];
        if is_admin && status == VesselStatus::Pending {
            actions.extend([Self::Approve, Self::Reject]);
        }
        actions.extend([Self::Edit, Self::Delete]);
        actions
    }
}

/// Which input of the vessel form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VesselField {
    Name,
    Type,
    Status,
    Speed,
    Heading,
    Latitude,
    Longitude,
    Mmsi,
    Imo,
    Flag,
}

impl VesselField {
    pub const ALL: [Self; 10] = [
        Self::Name,
        Self::Type,
        Self::Status,
        Self::Speed,
        Self::Heading,
        Self::Latitude,
        Self::Longitude,
        Self::Mmsi,
        Self::Imo,
        Self::Flag,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
            Self::Status => "Status",
            Self::Speed => "Speed (kn)",
            Self::Heading => "Heading (°)",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::Mmsi => "MMSI",
            Self::Imo => "IMO",
            Self::Flag => "Flag",
        }
    }

    /// Choice fields cycle with Left/Right instead of taking text.
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Type | Self::Status)
    }
}

/// Holds the form inputs while a vessel is created or edited
#[derive(Debug, Clone)]
pub struct VesselFormState {
    /// `None` while creating.
    pub vessel_id: Option<String>,
    pub field_index: usize,
    pub editing: bool,
    pub allow_status: bool,
    pub name: String,
    pub type_index: usize,
    pub status_index: usize,
    pub speed: String,
    pub heading: String,
    pub latitude: String,
    pub longitude: String,
    pub mmsi: String,
    pub imo: String,
    pub flag: String,
}

impl VesselFormState {
    pub fn blank(position: Position, allow_status: bool) -> Self {
        Self {
            vessel_id: None,
            field_index: 0,
            editing: false,
            allow_status,
            name: String::new(),
            type_index: VesselType::Cargo.index(),
            status_index: VesselStatus::Pending.index(),
            speed: "0".to_string(),
            heading: "0".to_string(),
            latitude: format!("{:.4}", position.lat),
            longitude: format!("{:.4}", position.lng),
            mmsi: String::new(),
            imo: String::new(),
            flag: String::new(),
        }
    }

    pub fn from_vessel(vessel: &Vessel, allow_status: bool) -> Self {
        Self {
            vessel_id: Some(vessel.id.clone()),
            field_index: 0,
            editing: false,
            allow_status,
            name: vessel.name.clone(),
            type_index: vessel.vessel_type.index(),
            status_index: vessel.status.index(),
            speed: vessel.speed.to_string(),
            heading: vessel.heading.to_string(),
            latitude: vessel.position.lat.to_string(),
            longitude: vessel.position.lng.to_string(),
            mmsi: vessel.mmsi.clone().unwrap_or_default(),
            imo: vessel.imo.clone().unwrap_or_default(),
            flag: vessel.flag.clone().unwrap_or_default(),
        }
    }

    /// Fields shown to the current user. Status is hidden from clients.
    pub fn fields(&self) -> Vec<VesselField> {
        VesselField::ALL
            .into_iter()
            .filter(|field| self.allow_status || *field != VesselField::Status)
            .collect()
    }

    pub fn field(&self) -> VesselField {
        self.fields()
            .get(self.field_index)
            .copied()
            .unwrap_or(VesselField::Name)
    }

    pub fn vessel_type(&self) -> VesselType {
        VesselType::from_index(self.type_index).unwrap_or(VesselType::Cargo)
    }

    pub fn status(&self) -> VesselStatus {
        VesselStatus::from_index(self.status_index).unwrap_or_default()
    }

    pub fn value(&self, field: VesselField) -> String {
        match field {
            VesselField::Type => self.vessel_type().label().to_string(),
            VesselField::Status => self.status().label().to_string(),
            other => self.text(other).map(ToString::to_string).unwrap_or_default(),
        }
    }

    fn text(&self, field: VesselField) -> Option<&str> {
        Some(match field {
            VesselField::Name => &self.name,
            VesselField::Speed => &self.speed,
            VesselField::Heading => &self.heading,
            VesselField::Latitude => &self.latitude,
            VesselField::Longitude => &self.longitude,
            VesselField::Mmsi => &self.mmsi,
            VesselField::Imo => &self.imo,
            VesselField::Flag => &self.flag,
            VesselField::Type | VesselField::Status => return None,
        })
    }

    /// Text buffer of the focused field, if it takes text.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        Some(match self.field() {
            VesselField::Name => &mut self.name,
            VesselField::Speed => &mut self.speed,
            VesselField::Heading => &mut self.heading,
            VesselField::Latitude => &mut self.latitude,
            VesselField::Longitude => &mut self.longitude,
            VesselField::Mmsi => &mut self.mmsi,
            VesselField::Imo => &mut self.imo,
            VesselField::Flag => &mut self.flag,
            VesselField::Type | VesselField::Status => return None,
        })
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        let (index, len) = match self.field() {
            VesselField::Type => (&mut self.type_index, VesselType::ALL.len()),
            VesselField::Status => (&mut self.status_index, VesselStatus::ALL.len()),
            _ => return,
        };
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    /// Parses the inputs. Range checks happen when the draft is stored.
    pub fn to_draft(&self) -> FleetResult<VesselDraft> {
        Ok(VesselDraft {
            name: self.name.trim().to_string(),
            vessel_type: self.vessel_type(),
            status: self.allow_status.then(|| self.status()),
            speed: parse_number("speed", &self.speed)?,
            heading: parse_number("heading", &self.heading)?,
            position: Position::new(
                parse_number("latitude", &self.latitude)?,
                parse_number("longitude", &self.longitude)?,
            ),
            imo: optional(&self.imo),
            mmsi: optional(&self.mmsi),
            flag: optional(&self.flag),
        })
    }
}

fn parse_number(field: &'static str, raw: &str) -> FleetResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FleetError::validation(field, format!("'{}' is not a number", raw.trim())))
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub screen: AppScreen,
    pub config: AppConfig,
    pub actions: AppActions,
    pub data: LoadState<FleetData>,
    pub load_epoch: u64,
    pub toast: Option<Toast>,
    pub throbber: ThrobberState,
    /// Mounted only while the radar screen is open.
    pub radar: Option<RadarView>,
    /// Mounted only while the map screen is open.
    pub map: Option<MapView>,
    pub selected_index: usize,
    pub action_index: usize,
    pub vessel_form: Option<VesselFormState>,
    pub detail_vessel_id: Option<String>,
    pub reminder_index: usize,
    pub last_frame: Instant,
    /// Store writes started but not yet applied.
    pub pending_actions: usize,
    loads_tx: mpsc::UnboundedSender<LoadMessage>,
    loads_rx: mpsc::UnboundedReceiver<LoadMessage>,
    actions_tx: mpsc::UnboundedSender<ActionMessage>,
    actions_rx: mpsc::UnboundedReceiver<ActionMessage>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (loads_tx, loads_rx) = mpsc::unbounded_channel();
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            show_help: false,
            screen: AppScreen::Dashboard,
            actions: AppActions::new(config.current_user.clone()),
            config,
            data: LoadState::NotLoaded,
            load_epoch: 0,
            toast: None,
            throbber: ThrobberState::default(),
            radar: None,
            map: None,
            selected_index: 0,
            action_index: 0,
            vessel_form: None,
            detail_vessel_id: None,
            reminder_index: 0,
            last_frame: Instant::now(),
            pending_actions: 0,
            loads_tx,
            loads_rx,
            actions_tx,
            actions_rx,
        }
    }

    pub async fn initialize_db(&mut self) -> Result<()> {
        let pool = create_database_pool(&self.config.database_url).await?;
        setup_database(&pool).await?;
        self.attach_store(Store::new(pool, self.config.latency));
        Ok(())
    }

    /// Uses an already prepared store and starts the first load.
    pub fn attach_store(&mut self, store: Store) {
        self.actions.attach(store);
        self.reload();
    }

    pub fn is_admin(&self) -> bool {
        self.config.current_user.is_admin()
    }

    /// Starts a background load. Anything still in flight becomes stale.
    pub fn reload(&mut self) {
        self.load_epoch += 1;
        match self.actions.store() {
            Ok(store) => spawn_load(
                store.clone(),
                self.config.current_user.clone(),
                self.load_epoch,
                self.loads_tx.clone(),
            ),
            Err(e) => warn!(error = %e, "reload requested without a store"),
        }
    }

    /// Applies finished loads. Results from an older epoch are dropped.
    pub fn drain_loads(&mut self) {
        while let Ok(message) = self.loads_rx.try_recv() {
            self.apply_load(message);
        }
    }

    pub fn apply_load(&mut self, message: LoadMessage) {
        if message.epoch != self.load_epoch {
            debug!(
                epoch = message.epoch,
                current = self.load_epoch,
                "discarding stale load"
            );
            return;
        }

        match message.result {
            Ok(data) => {
                self.data = LoadState::Loaded(data);
                self.clamp_selection();
            }
            Err(e) => self.notify_error("Load failed", &e),
        }
    }

    /// Runs a store write in the background. Its outcome lands through
    /// [`App::drain_actions`] so drawing never waits on the store.
    pub fn start_action<F>(&mut self, action: F)
    where
        F: Future<Output = ActionOutcome> + Send + 'static,
    {
        self.pending_actions += 1;
        spawn_action(self.screen, action, self.actions_tx.clone());
    }

    pub fn drain_actions(&mut self) {
        while let Ok(message) = self.actions_rx.try_recv() {
            self.apply_action(message);
        }
    }

    pub fn apply_action(&mut self, message: ActionMessage) {
        self.pending_actions = self.pending_actions.saturating_sub(1);
        let ActionOutcome {
            notice,
            reload,
            navigate,
        } = message.outcome;

        match notice {
            ActionNotice::Silent => {}
            ActionNotice::Success { title, message } => self.notify_success(title, message),
            ActionNotice::Failure { title, message } => self.notify_error(title, &message),
        }
        if let Some(screen) = navigate.filter(|_| self.screen == message.started_on) {
            self.navigate(screen);
        }
        if reload {
            self.reload();
        }
    }

    pub fn fleet(&self) -> Option<&FleetData> {
        self.data.as_loaded()
    }

    pub fn snapshot(&self) -> Option<FleetSnapshot> {
        self.fleet()
            .map(|data| snapshot::compute(&data.snapshot_input(), chrono::Utc::now()))
    }

    /// Switches screen. Leaving the radar drops its scope and sweep timer.
    pub fn navigate(&mut self, screen: AppScreen) {
        if screen == self.screen {
            return;
        }
        let from_parent = matches!(
            (self.screen, screen),
            (AppScreen::VesselActions | AppScreen::VesselForm | AppScreen::VesselDetails, AppScreen::Vessels)
                | (AppScreen::Vessels, AppScreen::VesselActions)
                | (AppScreen::VesselActions, AppScreen::VesselForm | AppScreen::VesselDetails)
                | (AppScreen::Radar, AppScreen::Map)
                | (AppScreen::Map, AppScreen::Radar)
        );

        info!(from = ?self.screen, to = ?screen, "navigate");
        self.screen = screen;
        if !from_parent {
            self.selected_index = 0;
        }
        self.action_index = 0;
        self.reminder_index = 0;

        if screen == AppScreen::Radar {
            if self.radar.is_none() {
                self.radar = Some(RadarView::new(
                    self.config.radar_center,
                    self.config.radar_range_nm,
                ));
            }
        } else {
            self.radar = None;
        }
        if screen == AppScreen::Map {
            if self.map.is_none() {
                self.map = Some(MapView::new(self.config.radar_center));
            }
        } else {
            self.map = None;
        }
        if screen != AppScreen::VesselForm {
            self.vessel_form = None;
        }

        if !from_parent {
            self.reload();
        }
    }

    /// Length of the list the current screen navigates.
    pub fn list_len(&self) -> usize {
        let Some(data) = self.fleet() else {
            return 0;
        };
        match self.screen {
            AppScreen::Vessels | AppScreen::VesselActions | AppScreen::Dashboard => {
                data.vessels.len()
            }
            AppScreen::Ocean => data.readings.len(),
            AppScreen::Events => data.events.len(),
            AppScreen::Regions => data.regions.len(),
            AppScreen::Services => data.services.len(),
            AppScreen::News => data.news.len(),
            AppScreen::Users => data.users.len(),
            AppScreen::Alerts => data.alerts.len(),
            AppScreen::Radar | AppScreen::Map | AppScreen::VesselForm | AppScreen::VesselDetails => 0,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.list_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn selected_vessel(&self) -> Option<&Vessel> {
        self.fleet()?.vessels.get(self.selected_index)
    }

    pub fn vessel_actions(&self) -> Vec<VesselAction> {
        self.selected_vessel().map_or_else(Vec::new, |vessel| {
            VesselAction::available(self.is_admin(), vessel.status)
        })
    }

    /// Typing into a form or the radar search swallows global shortcuts.
    pub fn is_typing(&self) -> bool {
        self.vessel_form.as_ref().is_some_and(|form| form.editing)
            || self.radar.as_ref().is_some_and(|radar| radar.searching)
    }

    pub fn detail_vessel(&self) -> Option<&Vessel> {
        let id = self.detail_vessel_id.as_deref()?;
        self.fleet()?.vessel(id)
    }

    pub fn notify_success(&mut self, title: &str, message: impl Into<String>) {
        self.show_toast(ToastKind::Success, title, message.into());
    }

    pub fn notify_error(&mut self, title: &str, error: &dyn std::fmt::Display) {
        warn!(%error, "{title}");
        self.show_toast(ToastKind::Destructive, title, error.to_string());
    }

    fn show_toast(&mut self, kind: ToastKind, title: &str, message: String) {
        self.toast = Some(Toast {
            kind,
            title: title.to_string(),
            message,
            shown_at: Instant::now(),
        });
    }

    /// Per-frame housekeeping: toast expiry, the spinner and the radar sweep.
    pub fn update(&mut self) {
        let now = Instant::now();
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
        if !self.data.is_loaded() || self.pending_actions > 0 {
            self.throbber.calc_next();
        }
        if let Some(radar) = self.radar.as_mut() {
            radar.scope.sweep.tick(now);
        }
        self.last_frame = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwatch::db::create_memory_pool;

    fn test_config() -> AppConfig {
        AppConfig {
            latency: false,
            ..AppConfig::default()
        }
    }

    async fn test_app() -> Result<App, Box<dyn std::error::Error>> {
        let mut app = App::new(test_config());
        let pool = create_memory_pool().await?;
        app.attach_store(Store::new(pool, false));
        Ok(app)
    }

    async fn wait_for_load(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        for _ in 0..200 {
            app.drain_loads();
            if app.data.is_loaded() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Err("load never arrived".into())
    }

    async fn wait_for_actions(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        for _ in 0..200 {
            app.drain_actions();
            if app.pending_actions == 0 {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        Err("action never finished".into())
    }

    #[test]
    fn digits_map_to_tabs() {
        assert_eq!(AppScreen::from_digit('1'), Some(AppScreen::Dashboard));
        assert_eq!(AppScreen::from_digit('2'), Some(AppScreen::Radar));
        assert_eq!(AppScreen::from_digit('0'), Some(AppScreen::Alerts));
        assert_eq!(AppScreen::from_digit('x'), None);
        assert_eq!(AppScreen::VesselForm.tab_index(), 2);
        assert_eq!(AppScreen::Map.tab_index(), 1);
    }

    #[test]
    fn approval_actions_need_an_admin_and_a_pending_vessel() {
        let admin = VesselAction::available(true, VesselStatus::Pending);
        assert!(admin.contains(&VesselAction::Approve));
        let client = VesselAction::available(false, VesselStatus::Pending);
        assert!(!client.contains(&VesselAction::Approve));
        let active = VesselAction::available(true, VesselStatus::Active);
        assert!(!active.contains(&VesselAction::Reject));
        assert_eq!(active.last(), Some(&VesselAction::Delete));
    }

    #[test]
    fn form_hides_status_from_clients() {
        let form = VesselFormState::blank(Position::new(27.0, 56.0), false);
        assert!(!form.fields().contains(&VesselField::Status));
        let admin_form = VesselFormState::blank(Position::new(27.0, 56.0), true);
        assert!(admin_form.fields().contains(&VesselField::Status));
    }

    #[test]
    fn form_builds_a_draft() -> Result<(), Box<dyn std::error::Error>> {
        let mut form = VesselFormState::blank(Position::new(27.0, 56.0), false);
        form.name = "  Kish Star ".to_string();
        form.speed = "11.5".to_string();
        form.heading = "270".to_string();
        form.mmsi = "422000001".to_string();

        let draft = form.to_draft()?;
        assert_eq!(draft.name, "Kish Star");
        assert_eq!(draft.status, None);
        assert!((draft.speed - 11.5).abs() < f64::EPSILON);
        assert_eq!(draft.mmsi.as_deref(), Some("422000001"));
        assert_eq!(draft.imo, None);
        Ok(())
    }

    #[test]
    fn form_rejects_non_numeric_input() {
        let mut form = VesselFormState::blank(Position::new(27.0, 56.0), true);
        form.heading = "north".to_string();
        assert!(matches!(
            form.to_draft(),
            Err(FleetError::Validation { field: "heading", .. })
        ));
    }

    #[test]
    fn choice_fields_wrap_both_ways() {
        let mut form = VesselFormState::blank(Position::new(27.0, 56.0), true);
        form.field_index = 1;
        assert_eq!(form.field(), VesselField::Type);
        form.cycle_choice(false);
        assert_eq!(form.vessel_type(), VesselType::Other);
        form.cycle_choice(true);
        assert_eq!(form.vessel_type(), VesselType::Cargo);
    }

    #[test]
    fn toast_expires_after_timeout() {
        let shown_at = Instant::now();
        let toast = Toast {
            kind: ToastKind::Success,
            title: "Saved".into(),
            message: String::new(),
            shown_at,
        };
        assert!(!toast.is_expired(shown_at));
        assert!(toast.is_expired(shown_at + TOAST_TIMEOUT));
    }

    #[tokio::test]
    async fn stale_loads_are_discarded() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app().await?;
        wait_for_load(&mut app).await?;

        app.data = LoadState::NotLoaded;
        app.load_epoch += 1;
        app.apply_load(LoadMessage {
            epoch: app.load_epoch - 1,
            result: Ok(FleetData::default()),
        });
        assert!(!app.data.is_loaded());

        app.apply_load(LoadMessage {
            epoch: app.load_epoch,
            result: Ok(FleetData::default()),
        });
        assert!(app.data.is_loaded());
        Ok(())
    }

    #[tokio::test]
    async fn leaving_the_radar_unmounts_it() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app().await?;
        app.navigate(AppScreen::Radar);
        assert!(app.radar.is_some());
        app.navigate(AppScreen::Ocean);
        assert!(app.radar.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn map_mounts_beside_the_radar_without_reloading() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app().await?;
        app.navigate(AppScreen::Radar);
        let epoch = app.load_epoch;

        app.navigate(AppScreen::Map);
        assert!(app.map.is_some());
        assert!(app.radar.is_none());
        assert_eq!(app.load_epoch, epoch);

        app.navigate(AppScreen::Radar);
        assert!(app.map.is_none());
        assert_eq!(app.load_epoch, epoch);
        Ok(())
    }

    #[tokio::test]
    async fn failed_load_shows_destructive_toast() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app().await?;
        let epoch = app.load_epoch;
        app.apply_load(LoadMessage {
            epoch,
            result: Err(FleetError::NotInitialized),
        });
        assert_eq!(
            app.toast.as_ref().map(|toast| toast.kind),
            Some(ToastKind::Destructive)
        );
        Ok(())
    }

    #[tokio::test]
    async fn slow_writes_do_not_hold_up_the_caller() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app().await?;
        wait_for_load(&mut app).await?;
        let epoch = app.load_epoch;

        let started = Instant::now();
        app.start_action(async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            ActionOutcome::success("Saved", "Kish Star").reloading()
        });
        assert!(started.elapsed() < Duration::from_millis(100));
        assert_eq!(app.pending_actions, 1);
        assert!(app.toast.is_none());

        wait_for_actions(&mut app).await?;
        assert_eq!(
            app.toast.as_ref().map(|toast| (toast.kind, toast.message.as_str())),
            Some((ToastKind::Success, "Kish Star"))
        );
        assert!(app.load_epoch > epoch);
        Ok(())
    }

    #[tokio::test]
    async fn outcome_navigation_needs_the_starting_screen() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = test_app().await?;
        app.navigate(AppScreen::Vessels);
        app.pending_actions = 2;

        app.apply_action(ActionMessage {
            started_on: AppScreen::VesselForm,
            outcome: ActionOutcome::silent().then_navigate(AppScreen::Dashboard),
        });
        assert_eq!(app.screen, AppScreen::Vessels);

        app.apply_action(ActionMessage {
            started_on: AppScreen::Vessels,
            outcome: ActionOutcome::failure("Delete failed", &"gone")
                .then_navigate(AppScreen::Dashboard),
        });
        assert_eq!(app.screen, AppScreen::Dashboard);
        assert_eq!(app.pending_actions, 0);
        assert_eq!(app.toast.as_ref().map(|toast| toast.kind), Some(ToastKind::Destructive));
        Ok(())
    }
}
