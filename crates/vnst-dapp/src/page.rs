//! Page model rendered by the shell and written by the orchestrator.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use eframe::egui;
use vnst_dapp_core::{
    Control, ControlState, InputField, LevelStatus, Notice, PageKind, PageLocation, PagePort,
    Slot,
};

const EMPTY_SLOT: &str = "--";

#[derive(Debug, Clone)]
pub struct ActiveNotice {
    pub notice: Notice,
    pub shown_at: Instant,
}

/// Everything a loaded page displays. Replaced wholesale on reload.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub location: PageLocation,
    pub slots: HashMap<Slot, String>,
    pub level_status: HashMap<u8, LevelStatus>,
    pub connected: bool,
    pub controls: HashMap<Control, ControlState>,
    pub stake_amount: String,
    pub referral_address: String,
    pub notices: Vec<ActiveNotice>,
    pub menu_open: bool,
}

impl PageModel {
    pub fn load(location: PageLocation) -> Self {
        Self {
            location,
            slots: HashMap::new(),
            level_status: HashMap::new(),
            connected: false,
            controls: HashMap::new(),
            stake_amount: String::new(),
            referral_address: String::new(),
            notices: Vec::new(),
            menu_open: false,
        }
    }

    pub fn kind(&self) -> PageKind {
        self.location.page_kind()
    }

    pub fn slot(&self, slot: Slot) -> &str {
        self.slots.get(&slot).map_or(EMPTY_SLOT, String::as_str)
    }

    pub fn control(&self, control: Control) -> ControlState {
        self.controls
            .get(&control)
            .cloned()
            .unwrap_or_else(|| ControlState::idle(control))
    }

    pub fn input_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::StakeAmount => &mut self.stake_amount,
            InputField::ReferralAddress => &mut self.referral_address,
        }
    }

    /// Drops notices older than `ttl`.
    pub fn expire_notices(&mut self, now: Instant, ttl: Duration) {
        self.notices
            .retain(|n| now.saturating_duration_since(n.shown_at) < ttl);
    }
}

/// Shared handle given to the orchestrator; every write wakes the UI.
#[derive(Clone)]
pub struct PageHandle {
    model: Arc<Mutex<PageModel>>,
    ctx: egui::Context,
}

impl PageHandle {
    pub fn new(location: PageLocation, ctx: egui::Context) -> Self {
        Self {
            model: Arc::new(Mutex::new(PageModel::load(location))),
            ctx,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, PageModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads another page under the same origin.
    pub fn navigate(&self, kind: PageKind) {
        let mut model = self.lock();
        let location = PageLocation {
            origin: model.location.origin.clone(),
            path: kind.path().to_owned(),
            query: String::new(),
        };
        *model = PageModel::load(location);
        drop(model);
        self.ctx.request_repaint();
    }

    fn update(&self, f: impl FnOnce(&mut PageModel)) {
        f(&mut self.lock());
        self.ctx.request_repaint();
    }
}

impl PagePort for PageHandle {
    fn kind(&self) -> PageKind {
        self.lock().kind()
    }

    fn location(&self) -> PageLocation {
        self.lock().location.clone()
    }

    fn set_text(&self, slot: Slot, text: &str) {
        self.update(|m| {
            m.slots.insert(slot, text.to_owned());
        });
    }

    fn set_level_status(&self, level: u8, status: LevelStatus) {
        self.update(|m| {
            m.level_status.insert(level, status);
        });
    }

    fn set_connected(&self, connected: bool) {
        self.update(|m| m.connected = connected);
    }

    fn set_control(&self, control: Control, state: ControlState) {
        self.update(|m| {
            m.controls.insert(control, state);
        });
    }

    fn input(&self, field: InputField) -> String {
        self.lock().input_mut(field).clone()
    }

    fn set_input(&self, field: InputField, value: &str) {
        self.update(|m| *m.input_mut(field) = value.to_owned());
    }

    fn notify(&self, notice: Notice) {
        self.update(|m| {
            m.notices.push(ActiveNotice {
                notice,
                shown_at: Instant::now(),
            })
        });
    }

    fn toggle_menu(&self) {
        self.update(|m| m.menu_open = !m.menu_open);
    }

    fn reload(&self) {
        self.update(|m| *m = PageModel::load(m.location.clone()));
    }
}
