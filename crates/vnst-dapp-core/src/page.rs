//! Page vocabulary shared by the orchestrator and whatever renders the page.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    Home,
    Staking,
    Team,
}

impl PageKind {
    /// Maps a location path onto a page, `index.html` being the fallback.
    pub fn from_path(path: &str) -> Self {
        if path.contains("staking.html") {
            PageKind::Staking
        } else if path.contains("team.html") {
            PageKind::Team
        } else {
            PageKind::Home
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            PageKind::Home => "/index.html",
            PageKind::Staking => "/staking.html",
            PageKind::Team => "/team.html",
        }
    }
}

/// Named text slots the orchestrator writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    WalletAddress,
    VnstBalance,
    ActiveStake,
    DirectMembers,
    TotalEarned,
    PendingToken,
    PendingStable,
    MinStake,
    MaxStake,
    ReferralLink,
    TeamDirectCount,
    LevelCount(u8),
    TotalStaked,
    UserStaked,
    TotalWithdrawn,
    ActiveStakers,
    HomeTokenRewards,
    HomeStableRewards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Connect,
    ApproveMax,
    Stake,
    ClaimToken,
    ClaimStable,
    CopyReferral,
    MenuToggle,
}

impl Control {
    pub fn default_label(self) -> &'static str {
        match self {
            Control::Connect => "Connect Wallet",
            Control::ApproveMax => "Approve Max",
            Control::Stake => "Stake VNST",
            Control::ClaimToken => "Claim VNT",
            Control::ClaimStable => "Claim USDT",
            Control::CopyReferral => "Copy Link",
            Control::MenuToggle => "Menu",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            Control::ApproveMax => "Approving...",
            Control::Stake => "Processing...",
            Control::ClaimToken | Control::ClaimStable => "Claiming...",
            Control::Connect => "Connecting...",
            Control::CopyReferral | Control::MenuToggle => self.default_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlState {
    Enabled { label: String },
    Busy { label: String },
}

impl ControlState {
    pub fn idle(control: Control) -> Self {
        ControlState::Enabled {
            label: control.default_label().to_owned(),
        }
    }

    pub fn busy(control: Control) -> Self {
        ControlState::Busy {
            label: control.busy_label().to_owned(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ControlState::Enabled { label } | ControlState::Busy { label } => label,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ControlState::Enabled { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    StakeAmount,
    ReferralAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// The parts of a page URL the orchestrator cares about.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageLocation {
    pub origin: String,
    pub path: String,
    pub query: String,
}

impl PageLocation {
    /// Splits `scheme://host[:port]/path?query#fragment`. Input without a
    /// scheme is treated as a bare path.
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        let without_fragment = url.split_once('#').map(|(head, _)| head).unwrap_or(url);
        let (before_query, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        let (origin, path) = match before_query.find("://") {
            Some(scheme_end) => {
                let authority_start = scheme_end + 3;
                match before_query[authority_start..].find('/') {
                    Some(offset) => before_query.split_at(authority_start + offset),
                    None => (before_query, "/"),
                }
            }
            None => ("", before_query),
        };

        Self {
            origin: origin.to_owned(),
            path: if path.is_empty() { "/".to_owned() } else { path.to_owned() },
            query: query.to_owned(),
        }
    }

    /// First non-empty value for `key`, with `%XX` escapes and `+` decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        form_urlencoded::parse(self.query.as_bytes())
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .find(|v| !v.is_empty())
    }

    pub fn page_kind(&self) -> PageKind {
        PageKind::from_path(&self.path)
    }
}
