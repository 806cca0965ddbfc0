use alloy::primitives::{Address, U256};

use vnst_dapp_core::{PortError, TokenPort, TxReceipt};

use crate::bindings::IERC20;
use crate::ContractClient;

#[derive(Debug, Clone)]
pub struct TokenAdapter {
    client: ContractClient,
    address: Address,
}

impl TokenAdapter {
    pub fn new(client: ContractClient, address: Address) -> Self {
        Self { client, address }
    }
}

impl TokenPort for TokenAdapter {
    fn balance_of(&self, owner: Address) -> Result<U256, PortError> {
        let ret = self
            .client
            .call(self.address, &IERC20::balanceOfCall { owner })?;
        Ok(ret.balance)
    }

    fn allowance(&self, owner: Address, spender: Address) -> Result<U256, PortError> {
        let ret = self
            .client
            .call(self.address, &IERC20::allowanceCall { owner, spender })?;
        Ok(ret.remaining)
    }

    fn approve(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxReceipt, PortError> {
        self.client.send(
            from,
            self.address,
            &IERC20::approveCall { spender, amount },
        )
    }
}
