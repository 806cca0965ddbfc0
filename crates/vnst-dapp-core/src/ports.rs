use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::domain::{
    ProviderEvent, RewardSnapshot, StakePosition, TxReceipt, UserStats, WalletBalances,
};
use crate::page::{Control, ControlState, InputField, Notice, PageKind, PageLocation, Slot};

#[derive(Debug, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request rejected by wallet: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("transaction reverted: {0}")]
    Reverted(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("policy error: {0}")]
    Policy(String),
}

pub trait WalletPort {
    /// Prompts for authorization and returns the authorized accounts.
    fn request_accounts(&self) -> Result<Vec<Address>, PortError>;
    fn chain_id(&self) -> Result<u64, PortError>;
    /// Pulls any account/chain notifications observed since the last drain.
    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError>;
}

pub trait TokenPort {
    fn balance_of(&self, owner: Address) -> Result<U256, PortError>;
    fn allowance(&self, owner: Address, spender: Address) -> Result<U256, PortError>;
    /// Submits `approve` and blocks until the transaction is included.
    fn approve(&self, from: Address, spender: Address, amount: U256)
        -> Result<TxReceipt, PortError>;
}

pub trait StakingPort {
    fn address(&self) -> Address;
    fn stake_of(&self, account: Address) -> Result<StakePosition, PortError>;
    fn user_stats(&self, account: Address) -> Result<UserStats, PortError>;
    fn pending_rewards(&self, account: Address) -> Result<RewardSnapshot, PortError>;
    fn min_stake_amount(&self) -> Result<U256, PortError>;
    fn max_stake_amount(&self) -> Result<U256, PortError>;
    fn referral_count(&self, account: Address) -> Result<U256, PortError>;
    /// `level` is the contract's 0-based index.
    fn level_referral_count(&self, account: Address, level: u8) -> Result<U256, PortError>;
    fn required_direct_members(&self, level: u8) -> Result<U256, PortError>;
    fn wallet_balances(&self) -> Result<WalletBalances, PortError>;
    fn stake(&self, from: Address, amount: U256, referrer: Address)
        -> Result<TxReceipt, PortError>;
    fn claim_rewards(&self, from: Address) -> Result<TxReceipt, PortError>;
}

/// Rendering surface. Writes are fire-and-forget.
pub trait PagePort {
    fn kind(&self) -> PageKind;
    fn location(&self) -> PageLocation;
    fn set_text(&self, slot: Slot, text: &str);
    fn set_level_status(&self, level: u8, status: crate::domain::LevelStatus);
    fn set_connected(&self, connected: bool);
    fn set_control(&self, control: Control, state: ControlState);
    fn input(&self, field: InputField) -> String;
    fn set_input(&self, field: InputField, value: &str);
    fn notify(&self, notice: Notice);
    fn toggle_menu(&self);
    /// Resets the page to its freshly loaded state.
    fn reload(&self);
}

pub trait ClipboardPort {
    fn write_text(&self, text: &str) -> Result<(), PortError>;
}
