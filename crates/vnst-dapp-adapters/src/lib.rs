pub mod bindings;
pub mod config;
pub mod contract;
pub mod eip1193;
pub mod staking;
pub mod token;

pub use config::{DappConfig, RuntimeProfile};
pub use contract::ContractClient;
pub use eip1193::Eip1193Adapter;
pub use staking::StakingAdapter;
pub use token::TokenAdapter;

/// Wallet and contract adapters sharing one provider.
#[derive(Debug, Clone)]
pub struct ChainAdapters {
    pub wallet: Eip1193Adapter,
    pub token: TokenAdapter,
    pub staking: StakingAdapter,
}

impl ChainAdapters {
    pub fn from_config(config: &DappConfig) -> Self {
        Self::with_provider(Eip1193Adapter::with_config(config), config)
    }

    pub fn with_provider(wallet: Eip1193Adapter, config: &DappConfig) -> Self {
        let client = ContractClient::new(wallet.clone(), config);
        Self {
            token: TokenAdapter::new(client.clone(), config.token_address),
            staking: StakingAdapter::new(client, config.staking_address),
            wallet,
        }
    }
}
