use alloy::primitives::Address;

use crate::page::PageKind;

pub const REFERRAL_QUERY_KEY: &str = "ref";

/// `0x1234...abcd`: the first six characters and everything from index 38.
pub fn short_address(address: Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[38..])
}

/// Shareable staking-page URL carrying `account` as the referrer.
pub fn referral_link(origin: &str, account: Address) -> String {
    format!(
        "{}{}?{}={}",
        origin.trim_end_matches('/'),
        PageKind::Staking.path(),
        REFERRAL_QUERY_KEY,
        account.to_checksum(None)
    )
}

/// Empty input means "no referrer", which the contract expects as the zero
/// address.
pub fn parse_referrer(input: &str) -> Option<Address> {
    let raw = input.trim();
    if raw.is_empty() {
        return Some(Address::ZERO);
    }
    raw.parse().ok()
}
