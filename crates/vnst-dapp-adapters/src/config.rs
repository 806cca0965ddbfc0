use std::str::FromStr;

use alloy::primitives::Address;
use tracing::warn;

use vnst_dapp_core::{PageKind, PageLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

impl FromStr for RuntimeProfile {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(RuntimeProfile::Development),
            "prod" | "production" => Ok(RuntimeProfile::Production),
            other => Err(format!("unknown runtime profile: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DappConfig {
    pub profile: RuntimeProfile,
    /// EIP-1193 JSON-RPC proxy. `None` selects the deterministic provider
    /// outside production.
    pub provider_url: Option<String>,
    pub token_address: Address,
    pub staking_address: Address,
    pub site_origin: String,
    pub launch_url: Option<String>,
    pub rpc_timeout_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_timeout_ms: u64,
    pub event_poll_interval_ms: u64,
    pub notice_ttl_ms: u64,
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            profile: RuntimeProfile::Development,
            provider_url: None,
            token_address: Address::ZERO,
            staking_address: Address::ZERO,
            site_origin: "http://localhost:8080".to_owned(),
            launch_url: None,
            rpc_timeout_ms: 15_000,
            receipt_poll_interval_ms: 1_000,
            receipt_timeout_ms: 120_000,
            event_poll_interval_ms: 2_000,
            notice_ttl_ms: 5_000,
        }
    }
}

impl DappConfig {
    /// Defaults overridden by `VNST_*` variables. Unparseable values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        override_parsed(&mut cfg.profile, "VNST_PROFILE", get("VNST_PROFILE"));
        cfg.provider_url = get("VNST_PROVIDER_URL").or(cfg.provider_url);
        override_parsed(
            &mut cfg.token_address,
            "VNST_TOKEN_ADDRESS",
            get("VNST_TOKEN_ADDRESS"),
        );
        override_parsed(
            &mut cfg.staking_address,
            "VNST_STAKING_ADDRESS",
            get("VNST_STAKING_ADDRESS"),
        );
        if let Some(origin) = get("VNST_SITE_ORIGIN") {
            cfg.site_origin = origin.trim_end_matches('/').to_owned();
        }
        cfg.launch_url = get("VNST_LAUNCH_URL").or(cfg.launch_url);
        override_parsed(
            &mut cfg.rpc_timeout_ms,
            "VNST_RPC_TIMEOUT_MS",
            get("VNST_RPC_TIMEOUT_MS"),
        );
        override_parsed(
            &mut cfg.receipt_poll_interval_ms,
            "VNST_RECEIPT_POLL_INTERVAL_MS",
            get("VNST_RECEIPT_POLL_INTERVAL_MS"),
        );
        override_parsed(
            &mut cfg.receipt_timeout_ms,
            "VNST_RECEIPT_TIMEOUT_MS",
            get("VNST_RECEIPT_TIMEOUT_MS"),
        );
        override_parsed(
            &mut cfg.event_poll_interval_ms,
            "VNST_EVENT_POLL_INTERVAL_MS",
            get("VNST_EVENT_POLL_INTERVAL_MS"),
        );
        override_parsed(
            &mut cfg.notice_ttl_ms,
            "VNST_NOTICE_TTL_MS",
            get("VNST_NOTICE_TTL_MS"),
        );
        cfg
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.profile == RuntimeProfile::Production
    }

    /// The page the shell opens on: the launch URL if one was given,
    /// otherwise the home page under `site_origin`.
    pub fn launch_location(&self) -> PageLocation {
        match &self.launch_url {
            Some(url) => {
                let mut location = PageLocation::parse(url);
                if location.origin.is_empty() {
                    location.origin = self.site_origin.clone();
                }
                location
            }
            None => PageLocation {
                origin: self.site_origin.clone(),
                path: PageKind::Home.path().to_owned(),
                query: String::new(),
            },
        }
    }
}

fn override_parsed<T>(slot: &mut T, key: &str, raw: Option<String>)
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(e) => warn!(key, value = %raw, error = %e, "ignoring invalid config value"),
    }
}
