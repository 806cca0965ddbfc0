#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};
use serde_json::{json, Value};
use tiny_http::{Response, Server};

use vnst_dapp_adapters::bindings::{IVnstStaking, IERC20};
use vnst_dapp_adapters::{ChainAdapters, DappConfig};

pub const TX_HASH: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

pub fn account_a() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("account a")
}

pub fn account_b() -> Address {
    "0x2000000000000000000000000000000000000002"
        .parse()
        .expect("account b")
}

pub fn token_address() -> Address {
    "0x000000000000000000000000000000000000CAFE"
        .parse()
        .expect("token address")
}

pub fn staking_address() -> Address {
    "0x000000000000000000000000000000000000BEEF"
        .parse()
        .expect("staking address")
}

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

#[derive(Debug, Clone)]
pub struct NodeState {
    pub accounts: Vec<Address>,
    pub chain_id: u64,
    /// `eth_getTransactionReceipt` answers null this many times first.
    pub pending_receipt_polls: u32,
    /// `None` keeps every receipt pending.
    pub receipt_status: Option<&'static str>,
    pub reject_requests: bool,
    pub sent: Vec<Value>,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            accounts: vec![account_a()],
            chain_id: 56,
            pending_receipt_polls: 0,
            receipt_status: Some("0x1"),
            reject_requests: false,
            sent: Vec::new(),
        }
    }
}

/// JSON-RPC node serving the token and staking fixture contracts.
pub struct MockNode {
    pub url: String,
    pub methods: Arc<Mutex<Vec<String>>>,
    pub state: Arc<Mutex<NodeState>>,
}

impl MockNode {
    pub fn spawn() -> Self {
        let server = Server::http("127.0.0.1:0").expect("start server");
        let url = format!("http://{}", server.server_addr());
        let methods = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(Mutex::new(NodeState::default()));

        let thread_methods = Arc::clone(&methods);
        let thread_state = Arc::clone(&state);
        thread::spawn(move || {
            for mut req in server.incoming_requests() {
                let mut body = String::new();
                if req.as_reader().read_to_string(&mut body).is_err() {
                    continue;
                }
                let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                let id = payload.get("id").cloned().unwrap_or(Value::Null);
                let method = payload
                    .get("method")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned();
                let params = payload.get("params").cloned().unwrap_or(json!([]));
                thread_methods
                    .lock()
                    .expect("methods lock")
                    .push(method.clone());

                let outcome = {
                    let mut state = thread_state.lock().expect("state lock");
                    answer(&mut state, &method, &params)
                };
                let response = match outcome {
                    Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
                    Err((code, message)) => json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": {"code": code, "message": message},
                    }),
                };
                let _ = req.respond(Response::from_string(response.to_string()));
            }
        });

        Self {
            url,
            methods,
            state,
        }
    }

    pub fn config(&self) -> DappConfig {
        DappConfig {
            provider_url: Some(self.url.clone()),
            token_address: token_address(),
            staking_address: staking_address(),
            rpc_timeout_ms: 5_000,
            receipt_poll_interval_ms: 10,
            receipt_timeout_ms: 2_000,
            ..DappConfig::default()
        }
    }

    pub fn adapters(&self) -> ChainAdapters {
        ChainAdapters::from_config(&self.config())
    }

    pub fn methods(&self) -> Vec<String> {
        self.methods.lock().expect("methods lock").clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.methods().iter().filter(|m| *m == method).count()
    }

    pub fn with_state(&self, f: impl FnOnce(&mut NodeState)) {
        f(&mut self.state.lock().expect("state lock"));
    }

    pub fn sent(&self) -> Vec<Value> {
        self.state.lock().expect("state lock").sent.clone()
    }
}

fn answer(state: &mut NodeState, method: &str, params: &Value) -> Result<Value, (i64, String)> {
    match method {
        "eth_requestAccounts" if state.reject_requests => {
            Err((4001, "User rejected the request.".to_owned()))
        }
        "eth_requestAccounts" | "eth_accounts" => Ok(json!(state
            .accounts
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>())),
        "eth_chainId" => Ok(json!(format!("{:#x}", state.chain_id))),
        "eth_call" => {
            let data: Bytes = params[0]["data"]
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or((-32602, "missing call data".to_owned()))?;
            contract_call(&data)
                .map(|ret| json!(Bytes::from(ret).to_string()))
                .ok_or((3, "execution reverted".to_owned()))
        }
        "eth_sendTransaction" if state.reject_requests => {
            Err((4001, "User denied transaction signature.".to_owned()))
        }
        "eth_sendTransaction" => {
            state.sent.push(params[0].clone());
            Ok(json!(TX_HASH))
        }
        "eth_getTransactionReceipt" => {
            if state.pending_receipt_polls > 0 {
                state.pending_receipt_polls -= 1;
                return Ok(Value::Null);
            }
            Ok(match state.receipt_status {
                Some(status) => json!({
                    "transactionHash": params[0],
                    "blockNumber": "0x2a",
                    "status": status,
                }),
                None => Value::Null,
            })
        }
        _ => Err((-32601, format!("method {method} not found"))),
    }
}

fn contract_call(data: &[u8]) -> Option<Vec<u8>> {
    let selector: [u8; 4] = data.get(..4)?.try_into().ok()?;
    let ret = if selector == IERC20::balanceOfCall::SELECTOR {
        ether(2_500).abi_encode()
    } else if selector == IERC20::allowanceCall::SELECTOR {
        ether(300).abi_encode()
    } else if selector == IVnstStaking::stakesCall::SELECTOR {
        (ether(100), account_b()).abi_encode_params()
    } else if selector == IVnstStaking::getUserStatsCall::SELECTOR {
        (U256::from(3), ether(12) / U256::from(10)).abi_encode_params()
    } else if selector == IVnstStaking::getPendingRewardsCall::SELECTOR {
        (ether(5), ether(3) / U256::from(4)).abi_encode_params()
    } else if selector == IVnstStaking::minStakeAmountCall::SELECTOR {
        ether(10).abi_encode()
    } else if selector == IVnstStaking::maxStakeAmountCall::SELECTOR {
        ether(1_000).abi_encode()
    } else if selector == IVnstStaking::getReferralCountCall::SELECTOR {
        U256::from(3).abi_encode()
    } else if selector == IVnstStaking::getLevelReferralCountCall::SELECTOR {
        let call = IVnstStaking::getLevelReferralCountCall::abi_decode(data, true).ok()?;
        U256::from(call.level + 1).abi_encode()
    } else if selector == IVnstStaking::requiredDirectMembersCall::SELECTOR {
        let call = IVnstStaking::requiredDirectMembersCall::abi_decode(data, true).ok()?;
        (U256::from(call.level) * U256::from(2)).abi_encode()
    } else if selector == IVnstStaking::getWalletBalancesCall::SELECTOR {
        ether(50_000).abi_encode()
    } else {
        return None;
    };
    Some(ret)
}
