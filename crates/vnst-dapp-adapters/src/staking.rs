use alloy::primitives::{Address, U256};

use vnst_dapp_core::{
    PortError, RewardSnapshot, StakePosition, StakingPort, TxReceipt, UserStats, WalletBalances,
};

use crate::bindings::IVnstStaking;
use crate::ContractClient;

#[derive(Debug, Clone)]
pub struct StakingAdapter {
    client: ContractClient,
    address: Address,
}

impl StakingAdapter {
    pub fn new(client: ContractClient, address: Address) -> Self {
        Self { client, address }
    }
}

impl StakingPort for StakingAdapter {
    fn address(&self) -> Address {
        self.address
    }

    fn stake_of(&self, account: Address) -> Result<StakePosition, PortError> {
        let ret = self
            .client
            .call(self.address, &IVnstStaking::stakesCall { user: account })?;
        Ok(StakePosition {
            amount: ret.amount,
            referrer: ret.referrer,
        })
    }

    fn user_stats(&self, account: Address) -> Result<UserStats, PortError> {
        let ret = self
            .client
            .call(self.address, &IVnstStaking::getUserStatsCall { user: account })?;
        Ok(UserStats {
            total_direct_members: ret.totalDirectMembers,
            total_earned: ret.totalEarned,
        })
    }

    fn pending_rewards(&self, account: Address) -> Result<RewardSnapshot, PortError> {
        let ret = self.client.call(
            self.address,
            &IVnstStaking::getPendingRewardsCall { user: account },
        )?;
        Ok(RewardSnapshot {
            token_reward: ret.vntReward,
            stable_reward: ret.usdtReward,
        })
    }

    fn min_stake_amount(&self) -> Result<U256, PortError> {
        Ok(self
            .client
            .call(self.address, &IVnstStaking::minStakeAmountCall {})?
            .amount)
    }

    fn max_stake_amount(&self) -> Result<U256, PortError> {
        Ok(self
            .client
            .call(self.address, &IVnstStaking::maxStakeAmountCall {})?
            .amount)
    }

    fn referral_count(&self, account: Address) -> Result<U256, PortError> {
        Ok(self
            .client
            .call(
                self.address,
                &IVnstStaking::getReferralCountCall { user: account },
            )?
            .count)
    }

    fn level_referral_count(&self, account: Address, level: u8) -> Result<U256, PortError> {
        Ok(self
            .client
            .call(
                self.address,
                &IVnstStaking::getLevelReferralCountCall {
                    user: account,
                    level,
                },
            )?
            .count)
    }

    fn required_direct_members(&self, level: u8) -> Result<U256, PortError> {
        Ok(self
            .client
            .call(
                self.address,
                &IVnstStaking::requiredDirectMembersCall { level },
            )?
            .count)
    }

    fn wallet_balances(&self) -> Result<WalletBalances, PortError> {
        let ret = self
            .client
            .call(self.address, &IVnstStaking::getWalletBalancesCall {})?;
        Ok(WalletBalances {
            staking_balance: ret.vnstStakingBalance,
        })
    }

    fn stake(
        &self,
        from: Address,
        amount: U256,
        referrer: Address,
    ) -> Result<TxReceipt, PortError> {
        self.client.send(
            from,
            self.address,
            &IVnstStaking::stakeCall { amount, referrer },
        )
    }

    fn claim_rewards(&self, from: Address) -> Result<TxReceipt, PortError> {
        self.client
            .send(from, self.address, &IVnstStaking::claimRewardsCall {})
    }
}
