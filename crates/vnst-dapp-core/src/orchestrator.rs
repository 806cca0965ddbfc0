use alloy::primitives::{Address, U256};
use tracing::{debug, info, warn};

use crate::domain::{
    DashboardSnapshot, LevelStats, ProviderEvent, ReferralStats, RewardSnapshot, StakingLimits,
    REFERRAL_LEVELS, STABLE_REWARD_SYMBOL, STAKE_SYMBOL, TOKEN_REWARD_SYMBOL,
};
use crate::messages;
use crate::page::{Control, ControlState, InputField, Notice, PageKind, Slot};
use crate::ports::{ClipboardPort, PagePort, PortError, StakingPort, TokenPort, WalletPort};
use crate::referral::{parse_referrer, referral_link, short_address, REFERRAL_QUERY_KEY};
use crate::session::{InFlight, Session};
use crate::units::{format_amount, parse_amount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DappCommand {
    /// Page load: render the disconnected wallet state and apply `?ref=`.
    InitPage,
    Connect,
    Refresh,
    ApproveMax,
    Stake,
    ClaimToken,
    ClaimStable,
    CopyReferralLink,
    ToggleMenu,
    /// Drain the provider's notification channel and dispatch each event.
    PollProviderEvents,
    ProviderEvent(ProviderEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// Nothing to do, e.g. a refresh without a connected account.
    Skipped,
    /// A local guard stopped the command before any remote write.
    Rejected,
    /// A remote call failed; a generic notice was shown.
    Failed,
    /// The triggering control already has an operation in flight.
    Busy,
    Reloaded,
}

pub struct Orchestrator<W, T, S, P, C>
where
    W: WalletPort,
    T: TokenPort,
    S: StakingPort,
    P: PagePort,
    C: ClipboardPort,
{
    pub wallet: W,
    pub token: T,
    pub staking: S,
    pub page: P,
    pub clipboard: C,
}

/// Shows a control as busy and restores its default label when dropped.
struct BusyControl<'a, P: PagePort> {
    page: &'a P,
    control: Control,
}

impl<'a, P: PagePort> BusyControl<'a, P> {
    fn show(page: &'a P, control: Control) -> Self {
        page.set_control(control, ControlState::busy(control));
        Self { page, control }
    }
}

impl<P: PagePort> Drop for BusyControl<'_, P> {
    fn drop(&mut self) {
        self.page
            .set_control(self.control, ControlState::idle(self.control));
    }
}

enum ActionResult {
    Submitted,
    Rejected,
    Failed,
}

impl<W, T, S, P, C> Orchestrator<W, T, S, P, C>
where
    W: WalletPort,
    T: TokenPort,
    S: StakingPort,
    P: PagePort,
    C: ClipboardPort,
{
    pub fn new(wallet: W, token: T, staking: S, page: P, clipboard: C) -> Self {
        Self {
            wallet,
            token,
            staking,
            page,
            clipboard,
        }
    }

    pub fn handle(&self, session: &Session, command: DappCommand) -> CommandOutcome {
        debug!(?command, "handling command");
        match command {
            DappCommand::InitPage => self.init_page(session),
            DappCommand::Connect => self.connect(session),
            DappCommand::Refresh => self.refresh(session),
            DappCommand::ApproveMax => self.approve_max(session),
            DappCommand::Stake => self.stake(session),
            DappCommand::ClaimToken => {
                self.claim(session, Control::ClaimToken, messages::CLAIM_TOKEN_SUCCEEDED)
            }
            // Same contract call as ClaimToken: the staking contract exposes a
            // single claimRewards() covering both reward kinds.
            DappCommand::ClaimStable => {
                self.claim(session, Control::ClaimStable, messages::CLAIM_STABLE_SUCCEEDED)
            }
            DappCommand::CopyReferralLink => self.copy_referral_link(session),
            DappCommand::ToggleMenu => {
                self.page.toggle_menu();
                CommandOutcome::Completed
            }
            DappCommand::PollProviderEvents => self.poll_provider_events(session),
            DappCommand::ProviderEvent(event) => self.on_provider_event(session, event),
        }
    }

    fn init_page(&self, session: &Session) -> CommandOutcome {
        self.render_wallet(session);
        if self.page.kind() == PageKind::Staking {
            if let Some(referrer) = self.page.location().query_param(REFERRAL_QUERY_KEY) {
                debug!(%referrer, "pre-populating referrer from query");
                self.page.set_input(InputField::ReferralAddress, &referrer);
            }
        }
        CommandOutcome::Completed
    }

    fn connect(&self, session: &Session) -> CommandOutcome {
        let Some(_flight) = session.try_begin(Control::Connect) else {
            return CommandOutcome::Busy;
        };
        self.page
            .set_control(Control::Connect, ControlState::busy(Control::Connect));

        let connected = self
            .wallet
            .request_accounts()
            .and_then(|accounts| Ok((accounts, self.wallet.chain_id()?)));
        let (accounts, chain_id) = match connected {
            Ok((accounts, chain_id)) if !accounts.is_empty() => (accounts, chain_id),
            Ok(_) => {
                warn!("wallet returned no accounts");
                return self.connect_failed(session, messages::CONNECT_TO_CONTINUE);
            }
            Err(e @ (PortError::NotFound(_) | PortError::NotImplemented(_))) => {
                warn!(error = %e, "wallet provider unavailable");
                return self.connect_failed(session, messages::NO_PROVIDER);
            }
            Err(e) => {
                warn!(error = %e, "wallet authorization failed");
                return self.connect_failed(session, messages::CONNECT_TO_CONTINUE);
            }
        };

        info!(account = %accounts[0], chain_id, "wallet connected");
        session.connect(accounts, chain_id);
        self.render_wallet(session);
        self.refresh(session);
        CommandOutcome::Completed
    }

    fn connect_failed(&self, session: &Session, message: &str) -> CommandOutcome {
        self.render_wallet(session);
        self.page.notify(Notice::error(message));
        CommandOutcome::Failed
    }

    fn render_wallet(&self, session: &Session) {
        match session.active_account() {
            Some(account) => {
                let short = short_address(account);
                self.page.set_control(
                    Control::Connect,
                    ControlState::Enabled {
                        label: short.clone(),
                    },
                );
                self.page.set_connected(true);
                self.page.set_text(Slot::WalletAddress, &short);
                let origin = self.page.location().origin;
                self.page
                    .set_text(Slot::ReferralLink, &referral_link(&origin, account));
            }
            None => {
                self.page
                    .set_control(Control::Connect, ControlState::idle(Control::Connect));
                self.page.set_connected(false);
                self.page.set_text(Slot::WalletAddress, messages::NOT_CONNECTED);
                self.page
                    .set_text(Slot::ReferralLink, messages::REFERRAL_LINK_PLACEHOLDER);
            }
        }
    }

    fn refresh(&self, session: &Session) -> CommandOutcome {
        let Some(account) = session.active_account() else {
            return CommandOutcome::Skipped;
        };

        let snapshot = match self.read_dashboard(account) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "loading staking data failed");
                self.page.notify(Notice::error(messages::LOAD_STAKING_FAILED));
                return CommandOutcome::Failed;
            }
        };
        session.cache_limits(snapshot.limits);
        self.render_dashboard(&snapshot);

        match self.page.kind() {
            PageKind::Team => self.refresh_team(account),
            PageKind::Home => self.refresh_home(account, &snapshot.rewards),
            PageKind::Staking => CommandOutcome::Completed,
        }
    }

    fn read_dashboard(&self, account: Address) -> Result<DashboardSnapshot, PortError> {
        let balance = self.token.balance_of(account)?;
        let stake = self.staking.stake_of(account)?;
        let stats = self.staking.user_stats(account)?;
        let rewards = self.staking.pending_rewards(account)?;
        let limits = StakingLimits {
            minimum: self.staking.min_stake_amount()?,
            maximum: self.staking.max_stake_amount()?,
        };
        Ok(DashboardSnapshot {
            balance,
            stake,
            stats,
            rewards,
            limits,
        })
    }

    fn render_dashboard(&self, snapshot: &DashboardSnapshot) {
        let page = &self.page;
        page.set_text(Slot::VnstBalance, &format_amount(snapshot.balance));
        page.set_text(Slot::ActiveStake, &format_amount(snapshot.stake.amount));
        page.set_text(
            Slot::DirectMembers,
            &snapshot.stats.total_direct_members.to_string(),
        );
        page.set_text(Slot::TotalEarned, &format_amount(snapshot.stats.total_earned));
        page.set_text(
            Slot::PendingToken,
            &format_amount(snapshot.rewards.token_reward),
        );
        page.set_text(
            Slot::PendingStable,
            &format_amount(snapshot.rewards.stable_reward),
        );
        page.set_text(Slot::MinStake, &format_amount(snapshot.limits.minimum));
        page.set_text(Slot::MaxStake, &format_amount(snapshot.limits.maximum));
    }

    fn read_referral_stats(&self, account: Address) -> Result<ReferralStats, PortError> {
        let direct_count = self.staking.referral_count(account)?;
        let mut levels = Vec::with_capacity(REFERRAL_LEVELS as usize);
        for index in 0..REFERRAL_LEVELS {
            levels.push(LevelStats {
                level: index + 1,
                member_count: self.staking.level_referral_count(account, index)?,
                required_direct_members: self.staking.required_direct_members(index)?,
            });
        }
        Ok(ReferralStats {
            direct_count,
            levels,
        })
    }

    fn refresh_team(&self, account: Address) -> CommandOutcome {
        let stats = match self.read_referral_stats(account) {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "loading team data failed");
                self.page.notify(Notice::error(messages::LOAD_TEAM_FAILED));
                return CommandOutcome::Failed;
            }
        };

        self.page
            .set_text(Slot::TeamDirectCount, &stats.direct_count.to_string());
        for level in &stats.levels {
            self.page
                .set_text(Slot::LevelCount(level.level), &level.member_count.to_string());
            self.page
                .set_level_status(level.level, level.status(stats.direct_count));
        }
        CommandOutcome::Completed
    }

    fn refresh_home(&self, account: Address, rewards: &RewardSnapshot) -> CommandOutcome {
        let totals = self
            .staking
            .wallet_balances()
            .and_then(|balances| Ok((balances, self.staking.stake_of(account)?)));
        let (balances, user_stake) = match totals {
            Ok(totals) => totals,
            Err(e) => {
                warn!(error = %e, "loading home stats failed");
                self.page.notify(Notice::error(messages::LOAD_HOME_FAILED));
                return CommandOutcome::Failed;
            }
        };

        let page = &self.page;
        page.set_text(
            Slot::TotalStaked,
            &format!("{} {STAKE_SYMBOL}", format_amount(balances.staking_balance)),
        );
        page.set_text(
            Slot::UserStaked,
            &format!("{} {STAKE_SYMBOL}", format_amount(user_stake.amount)),
        );
        // Not tracked by the contract yet.
        page.set_text(Slot::TotalWithdrawn, &format!("0 {STAKE_SYMBOL}"));
        page.set_text(Slot::ActiveStakers, "0");
        page.set_text(
            Slot::HomeTokenRewards,
            &format!("{} {TOKEN_REWARD_SYMBOL}", format_amount(rewards.token_reward)),
        );
        page.set_text(
            Slot::HomeStableRewards,
            &format!("{} {STABLE_REWARD_SYMBOL}", format_amount(rewards.stable_reward)),
        );
        CommandOutcome::Completed
    }

    /// Cached limits from the last refresh, read fresh when nothing is cached.
    fn limits(&self, session: &Session) -> Result<StakingLimits, PortError> {
        if let Some(limits) = session.cached_limits() {
            return Ok(limits);
        }
        let limits = StakingLimits {
            minimum: self.staking.min_stake_amount()?,
            maximum: self.staking.max_stake_amount()?,
        };
        session.cache_limits(limits);
        Ok(limits)
    }

    fn approve_max(&self, session: &Session) -> CommandOutcome {
        let Some(flight) = session.try_begin(Control::ApproveMax) else {
            return CommandOutcome::Busy;
        };
        let Some(account) = self.require_account(session) else {
            return CommandOutcome::Rejected;
        };

        let result = {
            let _busy = BusyControl::show(&self.page, Control::ApproveMax);
            let approved = self.limits(session).and_then(|limits| {
                self.token
                    .approve(account, self.staking.address(), limits.maximum)
                    .map(|receipt| (limits.maximum, receipt))
            });
            match approved {
                Ok((maximum, receipt)) => {
                    info!(tx = %receipt.tx_hash, %maximum, "approval confirmed");
                    self.page.notify(Notice::success(messages::APPROVAL_SUCCEEDED));
                    self.page
                        .set_input(InputField::StakeAmount, &format_amount(maximum));
                    ActionResult::Submitted
                }
                Err(e) => {
                    warn!(error = %e, "approval failed");
                    self.page.notify(Notice::error(messages::APPROVAL_FAILED));
                    ActionResult::Failed
                }
            }
        };
        self.settle(session, flight, result)
    }

    fn stake(&self, session: &Session) -> CommandOutcome {
        let Some(flight) = session.try_begin(Control::Stake) else {
            return CommandOutcome::Busy;
        };
        let Some(account) = self.require_account(session) else {
            return CommandOutcome::Rejected;
        };

        let amount = match parse_amount(&self.page.input(InputField::StakeAmount)) {
            Ok(amount) => amount,
            Err(e) => {
                debug!(error = %e, "stake amount rejected");
                self.page.notify(Notice::error(messages::INVALID_AMOUNT));
                return CommandOutcome::Rejected;
            }
        };
        let Some(referrer) = parse_referrer(&self.page.input(InputField::ReferralAddress)) else {
            self.page.notify(Notice::error(messages::INVALID_REFERRER));
            return CommandOutcome::Rejected;
        };

        let limits = match self.limits(session) {
            Ok(limits) => limits,
            Err(e) => {
                warn!(error = %e, "reading stake limits failed");
                self.page.notify(Notice::error(messages::STAKE_FAILED));
                return CommandOutcome::Failed;
            }
        };
        if let Some(message) = bound_violation(amount, &limits) {
            self.page.notify(Notice::error(message));
            return CommandOutcome::Rejected;
        }

        let result = {
            let _busy = BusyControl::show(&self.page, Control::Stake);
            self.submit_stake(account, amount, referrer)
        };
        self.settle(session, flight, result)
    }

    fn submit_stake(&self, account: Address, amount: U256, referrer: Address) -> ActionResult {
        let allowance = match self.token.allowance(account, self.staking.address()) {
            Ok(allowance) => allowance,
            Err(e) => {
                warn!(error = %e, "reading allowance failed");
                self.page.notify(Notice::error(messages::STAKE_FAILED));
                return ActionResult::Failed;
            }
        };
        if amount > allowance {
            self.page.notify(Notice::error(messages::APPROVE_FIRST));
            return ActionResult::Rejected;
        }

        match self.staking.stake(account, amount, referrer) {
            Ok(receipt) => {
                info!(tx = %receipt.tx_hash, %amount, %referrer, "stake confirmed");
                self.page.notify(Notice::success(messages::STAKE_SUCCEEDED));
                ActionResult::Submitted
            }
            Err(e) => {
                warn!(error = %e, "stake failed");
                self.page.notify(Notice::error(messages::STAKE_FAILED));
                ActionResult::Failed
            }
        }
    }

    fn claim(&self, session: &Session, control: Control, success: &str) -> CommandOutcome {
        let Some(flight) = session.try_begin(control) else {
            return CommandOutcome::Busy;
        };
        let Some(account) = self.require_account(session) else {
            return CommandOutcome::Rejected;
        };

        let result = {
            let _busy = BusyControl::show(&self.page, control);
            match self.staking.claim_rewards(account) {
                Ok(receipt) => {
                    info!(tx = %receipt.tx_hash, ?control, "claim confirmed");
                    self.page.notify(Notice::success(success));
                    ActionResult::Submitted
                }
                Err(e) => {
                    warn!(error = %e, ?control, "claim failed");
                    self.page.notify(Notice::error(messages::CLAIM_FAILED));
                    ActionResult::Failed
                }
            }
        };
        self.settle(session, flight, result)
    }

    /// Releases the control and then runs the post-submit refresh, so the
    /// control accepts a new command while the dashboard reloads.
    fn settle(
        &self,
        session: &Session,
        flight: InFlight<'_>,
        result: ActionResult,
    ) -> CommandOutcome {
        drop(flight);
        match result {
            ActionResult::Submitted => {
                self.refresh(session);
                CommandOutcome::Completed
            }
            ActionResult::Rejected => CommandOutcome::Rejected,
            ActionResult::Failed => CommandOutcome::Failed,
        }
    }

    fn require_account(&self, session: &Session) -> Option<Address> {
        let account = session.active_account();
        if account.is_none() {
            self.page.notify(Notice::error(messages::CONNECT_FIRST));
        }
        account
    }

    fn copy_referral_link(&self, session: &Session) -> CommandOutcome {
        let Some(account) = self.require_account(session) else {
            return CommandOutcome::Rejected;
        };
        let link = referral_link(&self.page.location().origin, account);
        match self.clipboard.write_text(&link) {
            Ok(()) => {
                self.page.notify(Notice::success(messages::LINK_COPIED));
                CommandOutcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.page.notify(Notice::error(messages::LINK_COPY_FAILED));
                CommandOutcome::Failed
            }
        }
    }

    fn poll_provider_events(&self, session: &Session) -> CommandOutcome {
        let events = match self.wallet.drain_events() {
            Ok(events) => events,
            Err(e) => {
                debug!(error = %e, "draining provider events failed");
                return CommandOutcome::Failed;
            }
        };
        let mut outcome = CommandOutcome::Skipped;
        for event in events {
            outcome = self.on_provider_event(session, event);
            if outcome == CommandOutcome::Reloaded {
                // Anything queued behind a chain switch belongs to the old page.
                break;
            }
        }
        outcome
    }

    fn on_provider_event(&self, session: &Session, event: ProviderEvent) -> CommandOutcome {
        if !session.is_subscribed() {
            debug!(?event, "ignoring provider event before connect");
            return CommandOutcome::Skipped;
        }
        match event {
            ProviderEvent::AccountsChanged(accounts) => {
                info!(count = accounts.len(), "accounts changed");
                session.set_accounts(accounts);
                self.render_wallet(session);
                self.refresh(session);
                CommandOutcome::Completed
            }
            ProviderEvent::ChainChanged(chain_id) => {
                info!(chain_id, "chain changed, reloading page");
                session.clear();
                self.page.reload();
                self.init_page(session);
                CommandOutcome::Reloaded
            }
        }
    }
}

fn bound_violation(amount: U256, limits: &StakingLimits) -> Option<String> {
    if amount < limits.minimum {
        Some(messages::below_minimum(&format_amount(limits.minimum)))
    } else if amount > limits.maximum {
        Some(messages::above_maximum(&format_amount(limits.maximum)))
    } else {
        None
    }
}
