//! User-facing notice texts.

pub const NO_PROVIDER: &str = "No wallet provider detected. Please install MetaMask";
pub const CONNECT_TO_CONTINUE: &str = "Please connect your wallet to continue";
pub const CONNECT_FIRST: &str = "Please connect your wallet first";

pub const LOAD_STAKING_FAILED: &str = "Error loading staking data";
pub const LOAD_TEAM_FAILED: &str = "Error loading team data";
pub const LOAD_HOME_FAILED: &str = "Error loading home stats";

pub const INVALID_AMOUNT: &str = "Please enter a valid amount";
pub const INVALID_REFERRER: &str = "Please enter a valid referrer address";
pub const APPROVE_FIRST: &str = "Please approve the contract to spend your VNST first";

pub const APPROVAL_SUCCEEDED: &str = "Approval successful!";
pub const APPROVAL_FAILED: &str = "Approval failed";
pub const STAKE_SUCCEEDED: &str = "Staking successful!";
pub const STAKE_FAILED: &str = "Staking failed";
pub const CLAIM_TOKEN_SUCCEEDED: &str = "VNT claimed successfully!";
pub const CLAIM_STABLE_SUCCEEDED: &str = "USDT claimed successfully!";
pub const CLAIM_FAILED: &str = "Claim failed";

pub const LINK_COPIED: &str = "Referral link copied!";
pub const LINK_COPY_FAILED: &str = "Failed to copy link";

pub const NOT_CONNECTED: &str = "Not connected";
pub const REFERRAL_LINK_PLACEHOLDER: &str = "Connect wallet to get your referral link";

pub fn below_minimum(minimum: &str) -> String {
    format!("Amount must be at least {minimum} VNST")
}

pub fn above_maximum(maximum: &str) -> String {
    format!("Amount must not exceed {maximum} VNST")
}
