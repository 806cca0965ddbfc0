#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, U256};

use vnst_dapp_core::{
    ClipboardPort, Control, ControlState, InputField, LevelStatus, Notice, NoticeKind,
    Orchestrator, PageKind, PageLocation, PagePort, PortError, ProviderEvent, RewardSnapshot,
    Session, Slot, StakePosition, StakingPort, TokenPort, TxReceipt, UserStats, WalletBalances,
    WalletPort,
};

pub type TestOrchestrator =
    Orchestrator<MockWallet, MockToken, MockStaking, RecordingPage, MockClipboard>;

/// Every remote call made by any mock, in order.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<&'static str>>>,
    failing: Arc<Mutex<HashSet<&'static str>>>,
    watched: Arc<Mutex<Option<(Arc<Session>, Control)>>>,
    in_flight_seen: Arc<Mutex<Vec<(&'static str, bool)>>>,
}

impl CallLog {
    fn record(&self, name: &'static str) -> Result<(), PortError> {
        self.calls.lock().expect("call log").push(name);
        let watched = self.watched.lock().expect("watched").clone();
        if let Some((session, control)) = watched {
            let held = session.is_in_flight(control);
            self.in_flight_seen
                .lock()
                .expect("in-flight log")
                .push((name, held));
        }
        if self.failing.lock().expect("failing set").contains(name) {
            return Err(PortError::Transport(format!("{name} failed")));
        }
        Ok(())
    }

    pub fn fail(&self, name: &'static str) {
        self.failing.lock().expect("failing set").insert(name);
    }

    pub fn recover(&self, name: &'static str) {
        self.failing.lock().expect("failing set").remove(name);
    }

    /// Records, for every later call, whether `control` was in flight.
    pub fn watch_in_flight(&self, session: Arc<Session>, control: Control) {
        *self.watched.lock().expect("watched") = Some((session, control));
    }

    pub fn in_flight_seen(&self) -> Vec<(&'static str, bool)> {
        self.in_flight_seen.lock().expect("in-flight log").clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().expect("call log").clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("call log").clear();
    }
}

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

pub fn account_a() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid account a")
}

pub fn account_b() -> Address {
    "0x2000000000000000000000000000000000000002"
        .parse()
        .expect("valid account b")
}

pub fn staking_address() -> Address {
    "0x000000000000000000000000000000000000BEEF"
        .parse()
        .expect("valid staking address")
}

fn receipt() -> TxReceipt {
    TxReceipt {
        tx_hash: B256::repeat_byte(0xab),
        block_number: Some(1),
    }
}

#[derive(Debug, Clone)]
pub enum WalletMode {
    Missing,
    Denied,
    Authorized(Vec<Address>),
}

#[derive(Debug)]
pub struct MockWallet {
    log: CallLog,
    pub mode: Mutex<WalletMode>,
    pub chain_id: u64,
    pub events: Mutex<Vec<ProviderEvent>>,
}

impl MockWallet {
    pub fn push_event(&self, event: ProviderEvent) {
        self.events.lock().expect("events").push(event);
    }
}

impl WalletPort for MockWallet {
    fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        self.log.record("eth_requestAccounts")?;
        match &*self.mode.lock().expect("wallet mode") {
            WalletMode::Missing => Err(PortError::NotFound("no provider".to_owned())),
            WalletMode::Denied => Err(PortError::Rejected("user rejected".to_owned())),
            WalletMode::Authorized(accounts) => Ok(accounts.clone()),
        }
    }

    fn chain_id(&self) -> Result<u64, PortError> {
        self.log.record("eth_chainId")?;
        Ok(self.chain_id)
    }

    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        Ok(std::mem::take(&mut *self.events.lock().expect("events")))
    }
}

#[derive(Debug)]
pub struct MockToken {
    log: CallLog,
    pub balance: Mutex<U256>,
    pub allowance: Mutex<U256>,
    pub approvals: Mutex<Vec<(Address, Address, U256)>>,
}

impl TokenPort for MockToken {
    fn balance_of(&self, _owner: Address) -> Result<U256, PortError> {
        self.log.record("balanceOf")?;
        Ok(*self.balance.lock().expect("balance"))
    }

    fn allowance(&self, _owner: Address, _spender: Address) -> Result<U256, PortError> {
        self.log.record("allowance")?;
        Ok(*self.allowance.lock().expect("allowance"))
    }

    fn approve(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxReceipt, PortError> {
        self.log.record("approve")?;
        self.approvals
            .lock()
            .expect("approvals")
            .push((from, spender, amount));
        *self.allowance.lock().expect("allowance") = amount;
        Ok(receipt())
    }
}

#[derive(Debug)]
pub struct MockStaking {
    log: CallLog,
    pub stake: StakePosition,
    pub stats: UserStats,
    pub rewards: RewardSnapshot,
    pub minimum: U256,
    pub maximum: U256,
    pub direct_count: U256,
    pub level_counts: [u64; 5],
    pub level_requirements: [u64; 5],
    pub staking_balance: U256,
    pub stakes: Mutex<Vec<(Address, U256, Address)>>,
    pub claims: Mutex<Vec<Address>>,
}

impl StakingPort for MockStaking {
    fn address(&self) -> Address {
        staking_address()
    }

    fn stake_of(&self, _account: Address) -> Result<StakePosition, PortError> {
        self.log.record("stakes")?;
        Ok(self.stake)
    }

    fn user_stats(&self, _account: Address) -> Result<UserStats, PortError> {
        self.log.record("getUserStats")?;
        Ok(self.stats)
    }

    fn pending_rewards(&self, _account: Address) -> Result<RewardSnapshot, PortError> {
        self.log.record("getPendingRewards")?;
        Ok(self.rewards)
    }

    fn min_stake_amount(&self) -> Result<U256, PortError> {
        self.log.record("minStakeAmount")?;
        Ok(self.minimum)
    }

    fn max_stake_amount(&self) -> Result<U256, PortError> {
        self.log.record("maxStakeAmount")?;
        Ok(self.maximum)
    }

    fn referral_count(&self, _account: Address) -> Result<U256, PortError> {
        self.log.record("getReferralCount")?;
        Ok(self.direct_count)
    }

    fn level_referral_count(&self, _account: Address, level: u8) -> Result<U256, PortError> {
        self.log.record("getLevelReferralCount")?;
        Ok(U256::from(self.level_counts[level as usize]))
    }

    fn required_direct_members(&self, level: u8) -> Result<U256, PortError> {
        self.log.record("requiredDirectMembers")?;
        Ok(U256::from(self.level_requirements[level as usize]))
    }

    fn wallet_balances(&self) -> Result<WalletBalances, PortError> {
        self.log.record("getWalletBalances")?;
        Ok(WalletBalances {
            staking_balance: self.staking_balance,
        })
    }

    fn stake(
        &self,
        from: Address,
        amount: U256,
        referrer: Address,
    ) -> Result<TxReceipt, PortError> {
        self.log.record("stake")?;
        self.stakes
            .lock()
            .expect("stakes")
            .push((from, amount, referrer));
        Ok(receipt())
    }

    fn claim_rewards(&self, from: Address) -> Result<TxReceipt, PortError> {
        self.log.record("claimRewards")?;
        self.claims.lock().expect("claims").push(from);
        Ok(receipt())
    }
}

#[derive(Debug, Default)]
pub struct PageRecord {
    pub slots: HashMap<Slot, String>,
    pub level_status: HashMap<u8, LevelStatus>,
    pub connected: bool,
    pub controls: HashMap<Control, Vec<ControlState>>,
    pub inputs: HashMap<InputField, String>,
    pub notices: Vec<Notice>,
    pub menu_open: bool,
    pub reloads: usize,
}

#[derive(Debug)]
pub struct RecordingPage {
    pub kind: Mutex<PageKind>,
    pub location: PageLocation,
    pub record: Mutex<PageRecord>,
}

impl RecordingPage {
    pub fn slot(&self, slot: Slot) -> Option<String> {
        self.record.lock().expect("page").slots.get(&slot).cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.record.lock().expect("page").notices.clone()
    }

    pub fn error_notices(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.kind == NoticeKind::Error)
            .map(|n| n.message)
            .collect()
    }

    pub fn control_history(&self, control: Control) -> Vec<ControlState> {
        self.record
            .lock()
            .expect("page")
            .controls
            .get(&control)
            .cloned()
            .unwrap_or_default()
    }

    pub fn last_control(&self, control: Control) -> Option<ControlState> {
        self.control_history(control).last().cloned()
    }

    pub fn set_user_input(&self, field: InputField, value: &str) {
        self.set_input(field, value);
    }

    pub fn clear_notices(&self) {
        self.record.lock().expect("page").notices.clear();
    }
}

impl PagePort for RecordingPage {
    fn kind(&self) -> PageKind {
        *self.kind.lock().expect("page kind")
    }

    fn location(&self) -> PageLocation {
        self.location.clone()
    }

    fn set_text(&self, slot: Slot, text: &str) {
        self.record
            .lock()
            .expect("page")
            .slots
            .insert(slot, text.to_owned());
    }

    fn set_level_status(&self, level: u8, status: LevelStatus) {
        self.record
            .lock()
            .expect("page")
            .level_status
            .insert(level, status);
    }

    fn set_connected(&self, connected: bool) {
        self.record.lock().expect("page").connected = connected;
    }

    fn set_control(&self, control: Control, state: ControlState) {
        self.record
            .lock()
            .expect("page")
            .controls
            .entry(control)
            .or_default()
            .push(state);
    }

    fn input(&self, field: InputField) -> String {
        self.record
            .lock()
            .expect("page")
            .inputs
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    fn set_input(&self, field: InputField, value: &str) {
        self.record
            .lock()
            .expect("page")
            .inputs
            .insert(field, value.to_owned());
    }

    fn notify(&self, notice: Notice) {
        self.record.lock().expect("page").notices.push(notice);
    }

    fn toggle_menu(&self) {
        let mut g = self.record.lock().expect("page");
        g.menu_open = !g.menu_open;
    }

    fn reload(&self) {
        let mut g = self.record.lock().expect("page");
        let reloads = g.reloads + 1;
        *g = PageRecord {
            reloads,
            ..PageRecord::default()
        };
    }
}

#[derive(Debug, Default)]
pub struct MockClipboard {
    pub fail: bool,
    pub text: Mutex<Option<String>>,
}

impl ClipboardPort for MockClipboard {
    fn write_text(&self, text: &str) -> Result<(), PortError> {
        if self.fail {
            return Err(PortError::Policy("clipboard access denied".to_owned()));
        }
        *self.text.lock().expect("clipboard") = Some(text.to_owned());
        Ok(())
    }
}

pub struct Harness {
    pub orch: TestOrchestrator,
    pub session: Arc<Session>,
    pub log: CallLog,
}

pub fn harness(kind: PageKind) -> Harness {
    harness_at(kind, &format!("https://vnst.example{}", kind.path()))
}

pub fn harness_at(kind: PageKind, url: &str) -> Harness {
    let log = CallLog::default();
    let orch = Orchestrator::new(
        MockWallet {
            log: log.clone(),
            mode: Mutex::new(WalletMode::Authorized(vec![account_a()])),
            chain_id: 56,
            events: Mutex::new(Vec::new()),
        },
        MockToken {
            log: log.clone(),
            balance: Mutex::new(ether(2_500)),
            allowance: Mutex::new(U256::ZERO),
            approvals: Mutex::new(Vec::new()),
        },
        MockStaking {
            log: log.clone(),
            stake: StakePosition {
                amount: ether(100),
                referrer: Address::ZERO,
            },
            stats: UserStats {
                total_direct_members: U256::from(3),
                total_earned: ether(12) / U256::from(10),
            },
            rewards: RewardSnapshot {
                token_reward: ether(5),
                stable_reward: ether(3) / U256::from(4),
            },
            minimum: ether(10),
            maximum: ether(1_000),
            direct_count: U256::from(3),
            level_counts: [3, 7, 0, 0, 0],
            level_requirements: [1, 2, 3, 4, 5],
            staking_balance: ether(50_000),
            stakes: Mutex::new(Vec::new()),
            claims: Mutex::new(Vec::new()),
        },
        RecordingPage {
            kind: Mutex::new(kind),
            location: PageLocation::parse(url),
            record: Mutex::new(PageRecord::default()),
        },
        MockClipboard::default(),
    );
    Harness {
        orch,
        session: Arc::new(Session::new()),
        log,
    }
}

impl Harness {
    pub fn handle(&self, command: vnst_dapp_core::DappCommand) -> vnst_dapp_core::CommandOutcome {
        self.orch.handle(&self.session, command)
    }

    /// Connects and forgets the calls and notices that produced.
    pub fn connected(self) -> Self {
        let outcome = self.handle(vnst_dapp_core::DappCommand::Connect);
        assert_eq!(outcome, vnst_dapp_core::CommandOutcome::Completed);
        self.log.clear();
        self.orch.page.clear_notices();
        self
    }
}
