pub mod domain;
pub mod messages;
pub mod orchestrator;
pub mod page;
pub mod ports;
pub mod referral;
pub mod session;
pub mod units;

pub use domain::{
    DashboardSnapshot, LevelStats, LevelStatus, ProviderEvent, ReferralStats, RewardSnapshot,
    StakePosition, StakingLimits, TxReceipt, UserStats, WalletBalances, REFERRAL_LEVELS,
};
pub use orchestrator::{CommandOutcome, DappCommand, Orchestrator};
pub use page::{
    Control, ControlState, InputField, Notice, NoticeKind, PageKind, PageLocation, Slot,
};
pub use ports::{ClipboardPort, PagePort, PortError, StakingPort, TokenPort, WalletPort};
pub use session::{Session, SessionState};
pub use units::{format_amount, parse_amount, AmountError};
