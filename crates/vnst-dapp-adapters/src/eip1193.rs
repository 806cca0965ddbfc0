use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::{address, keccak256, Address, Bytes, B256};
use serde_json::Value;
use tracing::{debug, info};

use vnst_dapp_core::{PortError, ProviderEvent, WalletPort};

use crate::DappConfig;

/// EIP-1193 error code for "user rejected the request".
const USER_REJECTED: i64 = 4001;

#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<ProviderState>>,
    events_tx: Sender<ProviderEvent>,
    events_rx: Arc<Mutex<Receiver<ProviderEvent>>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Disabled(String),
    Deterministic,
    Proxy(ProxyRuntime),
}

#[derive(Debug, Clone)]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Clone)]
struct ProviderState {
    accounts: Vec<Address>,
    chain_id: u64,
    /// Set by the first successful `eth_requestAccounts`; change polling only
    /// starts afterwards.
    subscribed: bool,
    request_id: u64,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self {
            accounts: vec![address!("1000000000000000000000000000000000000001")],
            chain_id: 56,
            subscribed: false,
            request_id: 0,
        }
    }
}

impl Default for Eip1193Adapter {
    fn default() -> Self {
        Self::with_config(&DappConfig::from_env())
    }
}

impl Eip1193Adapter {
    pub fn with_config(config: &DappConfig) -> Self {
        let mode = if let Some(ref base_url) = config.provider_url {
            let timeout = Duration::from_millis(config.rpc_timeout_ms);
            match reqwest::blocking::Client::builder().timeout(timeout).build() {
                Ok(client) => ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => ProviderMode::Disabled(format!(
                    "failed to initialize EIP-1193 proxy client: {e}"
                )),
            }
        } else if config.strict_runtime_required() {
            ProviderMode::Disabled(
                "EIP-1193 proxy URL not configured in production runtime profile".to_owned(),
            )
        } else {
            ProviderMode::Deterministic
        };
        Self::with_mode(mode)
    }

    /// In-process provider with a fixed account, chain 56 and zeroed call
    /// results.
    pub fn deterministic() -> Self {
        Self::with_mode(ProviderMode::Deterministic)
    }

    fn with_mode(mode: ProviderMode) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            mode,
            state: Arc::new(Mutex::new(ProviderState::default())),
            events_tx,
            events_rx: Arc::new(Mutex::new(events_rx)),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.mode, ProviderMode::Deterministic)
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, ProviderState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    fn emit(&self, event: ProviderEvent) {
        // The receiver lives as long as the adapter, so a send cannot fail.
        let _ = self.events_tx.send(event);
    }

    pub fn debug_inject_accounts_changed(&self, accounts: Vec<Address>) -> Result<(), PortError> {
        self.lock_state()?.accounts = accounts.clone();
        self.emit(ProviderEvent::AccountsChanged(accounts));
        Ok(())
    }

    pub fn debug_inject_chain_changed(&self, chain_id: u64) -> Result<(), PortError> {
        self.lock_state()?.chain_id = chain_id;
        self.emit(ProviderEvent::ChainChanged(chain_id));
        Ok(())
    }

    /// Sends one JSON-RPC request through the provider.
    pub fn request(&self, method: &str, params: Value) -> Result<Value, PortError> {
        match &self.mode {
            ProviderMode::Disabled(reason) => Err(PortError::NotFound(reason.clone())),
            ProviderMode::Deterministic => self.deterministic_request(method, &params),
            ProviderMode::Proxy(proxy) => self.proxy_call(proxy, method, params),
        }
    }

    fn proxy_call(
        &self,
        proxy: &ProxyRuntime,
        method: &str,
        params: Value,
    ) -> Result<Value, PortError> {
        let id = {
            let mut g = self.lock_state()?;
            g.request_id = g.request_id.saturating_add(1);
            g.request_id
        };
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "eip1193 proxy request");
        let response = proxy
            .client
            .post(&proxy.base_url)
            .json(&payload)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    PortError::Timeout(format!("eip1193 proxy {method}: {e}"))
                } else {
                    PortError::Transport(format!("eip1193 proxy request failed: {e}"))
                }
            })?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| PortError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;
        if let Some(err) = body.get("error") {
            let code = err.get("code").and_then(Value::as_i64);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_owned();
            return Err(match code {
                Some(USER_REJECTED) => PortError::Rejected(message),
                _ => PortError::Transport(format!("eip1193 proxy returned error: {err}")),
            });
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "eip1193 proxy status {}: {}",
                status, body
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("eip1193 proxy missing result".to_owned()))
    }

    fn deterministic_request(&self, method: &str, params: &Value) -> Result<Value, PortError> {
        match method {
            "eth_requestAccounts" | "eth_accounts" => {
                let g = self.lock_state()?;
                Ok(serde_json::json!(g
                    .accounts
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()))
            }
            "eth_chainId" => Ok(Value::String(format!("{:#x}", self.lock_state()?.chain_id))),
            // Zero words decode as zero for every static return type.
            "eth_call" => Ok(Value::String(format!("0x{}", "00".repeat(32 * 8)))),
            "eth_sendTransaction" => {
                let canonical = serde_json::to_vec(params).map_err(|e| {
                    PortError::Validation(format!("tx payload serialization failed: {e}"))
                })?;
                Ok(Value::String(keccak256(canonical).to_string()))
            }
            "eth_getTransactionReceipt" => {
                let hash = params
                    .get(0)
                    .cloned()
                    .ok_or_else(|| PortError::Validation("receipt hash missing".to_owned()))?;
                Ok(serde_json::json!({
                    "transactionHash": hash,
                    "blockNumber": "0x1",
                    "status": "0x1",
                }))
            }
            _ => Err(PortError::NotImplemented(
                "method unsupported by deterministic provider",
            )),
        }
    }

    fn accounts_via(&self, method: &str) -> Result<Vec<Address>, PortError> {
        let result = self.request(method, serde_json::json!([]))?;
        let arr = result
            .as_array()
            .ok_or_else(|| PortError::Transport(format!("{method}: array expected")))?;
        arr.iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| PortError::Transport(format!("{method}: string expected")))?
                    .parse::<Address>()
                    .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))
            })
            .collect()
    }

    fn read_chain_id(&self) -> Result<u64, PortError> {
        let result = self.request("eth_chainId", serde_json::json!([]))?;
        json_chain_id_to_u64(&result)
    }

    /// Compares the proxy's current accounts and chain with the last seen
    /// values and emits an event for each difference.
    fn poll_changes(&self) -> Result<(), PortError> {
        if !matches!(self.mode, ProviderMode::Proxy(_)) || !self.lock_state()?.subscribed {
            return Ok(());
        }
        let accounts = self.accounts_via("eth_accounts")?;
        let chain_id = self.read_chain_id()?;

        let mut g = self.lock_state()?;
        if g.accounts != accounts {
            info!(count = accounts.len(), "provider accounts changed");
            g.accounts = accounts.clone();
            self.emit(ProviderEvent::AccountsChanged(accounts));
        }
        if g.chain_id != chain_id {
            info!(chain_id, "provider chain changed");
            g.chain_id = chain_id;
            self.emit(ProviderEvent::ChainChanged(chain_id));
        }
        Ok(())
    }

    pub fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, PortError> {
        let result = self.request(
            "eth_call",
            serde_json::json!([{ "to": to.to_string(), "data": data.to_string() }, "latest"]),
        )?;
        let raw = result
            .as_str()
            .ok_or_else(|| PortError::Transport("eth_call must return hex data".to_owned()))?;
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid eth_call result: {e}")))
    }

    pub fn send_transaction(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
    ) -> Result<B256, PortError> {
        let tx = serde_json::json!({
            "from": from.to_string(),
            "to": to.to_string(),
            "data": data.to_string(),
        });
        let result = self.request("eth_sendTransaction", serde_json::json!([tx]))?;
        let hash = result.as_str().ok_or_else(|| {
            PortError::Transport("eth_sendTransaction must return hash".to_owned())
        })?;
        hash.parse()
            .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))
    }

    /// `None` while the transaction is still pending.
    pub fn transaction_receipt(&self, hash: B256) -> Result<Option<Value>, PortError> {
        let result = self.request(
            "eth_getTransactionReceipt",
            serde_json::json!([hash.to_string()]),
        )?;
        Ok((!result.is_null()).then_some(result))
    }
}

impl WalletPort for Eip1193Adapter {
    fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        let accounts = self.accounts_via("eth_requestAccounts")?;
        let mut g = self.lock_state()?;
        g.accounts = accounts.clone();
        g.subscribed = true;
        Ok(accounts)
    }

    fn chain_id(&self) -> Result<u64, PortError> {
        let chain_id = self.read_chain_id()?;
        self.lock_state()?.chain_id = chain_id;
        Ok(chain_id)
    }

    fn drain_events(&self) -> Result<Vec<ProviderEvent>, PortError> {
        self.poll_changes()?;
        let rx = self
            .events_rx
            .lock()
            .map_err(|e| PortError::Transport(format!("provider events lock poisoned: {e}")))?;
        Ok(rx.try_iter().collect())
    }
}

pub(crate) fn json_chain_id_to_u64(value: &Value) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let s = value
        .as_str()
        .ok_or_else(|| PortError::Validation("chain id must be string or number".to_owned()))?;
    parse_hex_or_decimal(s)
}

pub(crate) fn parse_hex_or_decimal(raw: &str) -> Result<u64, PortError> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
            .map_err(|e| PortError::Validation(format!("invalid hex quantity: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid quantity: {e}")))
    }
}
