//! Per-page session: the connected account set, chain and cached limits,
//! plus the in-flight flags that keep a control from being submitted twice.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use alloy::primitives::Address;

use crate::domain::StakingLimits;
use crate::page::Control;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub accounts: Vec<Address>,
    pub chain_id: Option<u64>,
    pub limits: Option<StakingLimits>,
    /// Set once a connection succeeded; provider notifications are ignored
    /// before that.
    pub subscribed: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<SessionState>,
    in_flight: Mutex<HashSet<Control>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    pub fn active_account(&self) -> Option<Address> {
        self.state().accounts.first().copied()
    }

    pub fn is_connected(&self) -> bool {
        self.active_account().is_some()
    }

    pub fn connect(&self, accounts: Vec<Address>, chain_id: u64) {
        let mut g = self.state();
        g.accounts = accounts;
        g.chain_id = Some(chain_id);
        g.subscribed = true;
    }

    pub fn is_subscribed(&self) -> bool {
        self.state().subscribed
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state().accounts = accounts;
    }

    pub fn cached_limits(&self) -> Option<StakingLimits> {
        self.state().limits
    }

    pub fn cache_limits(&self, limits: StakingLimits) {
        self.state().limits = Some(limits);
    }

    /// Drops everything, as a page reload would.
    pub fn clear(&self) {
        *self.state() = SessionState::default();
    }

    /// Marks `control` as in flight. Returns `None` when it already is.
    pub fn try_begin(&self, control: Control) -> Option<InFlight<'_>> {
        let mut g = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        g.insert(control).then_some(InFlight {
            session: self,
            control,
        })
    }

    pub fn is_in_flight(&self, control: Control) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&control)
    }
}

/// Releases the in-flight flag on drop, whichever way the operation ends.
#[derive(Debug)]
pub struct InFlight<'a> {
    session: &'a Session,
    control: Control,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.session
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.control);
    }
}
