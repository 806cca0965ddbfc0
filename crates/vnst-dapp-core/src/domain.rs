use alloy::primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Number of referral levels shown on the team page.
pub const REFERRAL_LEVELS: u8 = 5;

pub const STAKE_SYMBOL: &str = "VNST";
pub const TOKEN_REWARD_SYMBOL: &str = "VNT";
pub const STABLE_REWARD_SYMBOL: &str = "USDT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    pub amount: U256,
    pub referrer: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_direct_members: U256,
    pub total_earned: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSnapshot {
    /// Pending reward in the project token (VNT).
    pub token_reward: U256,
    /// Pending reward in the stable asset (USDT).
    pub stable_reward: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingLimits {
    pub minimum: U256,
    pub maximum: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalances {
    pub staking_balance: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    /// 1-based level number as displayed.
    pub level: u8,
    pub member_count: U256,
    pub required_direct_members: U256,
}

impl LevelStats {
    pub fn status(&self, direct_count: U256) -> LevelStatus {
        if direct_count >= self.required_direct_members {
            LevelStatus::Active
        } else {
            LevelStatus::Locked
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralStats {
    pub direct_count: U256,
    pub levels: Vec<LevelStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Active,
    Locked,
}

impl LevelStatus {
    pub fn label(self) -> &'static str {
        match self {
            LevelStatus::Active => "Active",
            LevelStatus::Locked => "Locked",
        }
    }
}

/// Everything the main refresh sequence reads, collected before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub balance: U256,
    pub stake: StakePosition,
    pub stats: UserStats,
    pub rewards: RewardSnapshot,
    pub limits: StakingLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}
