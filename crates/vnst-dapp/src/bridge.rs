//! Bridge between the egui shell and the dapp workspace crates.
//! Commands run on a background runtime so the UI thread never blocks on the
//! wallet or the chain.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use vnst_dapp_adapters::{ChainAdapters, Eip1193Adapter, StakingAdapter, TokenAdapter};
use vnst_dapp_core::{DappCommand, Orchestrator, PageKind, Session};

use crate::clipboard::SystemClipboard;
use crate::page::PageHandle;

type DappOrchestrator =
    Orchestrator<Eip1193Adapter, TokenAdapter, StakingAdapter, PageHandle, SystemClipboard>;

#[derive(Clone)]
pub struct DappBridge {
    orchestrator: Arc<DappOrchestrator>,
    session: Arc<Session>,
    runtime: Arc<Runtime>,
}

impl DappBridge {
    pub fn new(runtime: Runtime, chain: ChainAdapters, page: PageHandle) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(
                chain.wallet,
                chain.token,
                chain.staking,
                page,
                SystemClipboard,
            )),
            session: Arc::new(Session::new()),
            runtime: Arc::new(runtime),
        }
    }

    pub fn page(&self) -> &PageHandle {
        &self.orchestrator.page
    }

    pub fn dispatch(&self, command: DappCommand) {
        self.dispatch_all(vec![command]);
    }

    /// Runs the commands in order on one blocking worker.
    pub fn dispatch_all(&self, commands: Vec<DappCommand>) {
        let orchestrator = Arc::clone(&self.orchestrator);
        let session = Arc::clone(&self.session);
        self.runtime.spawn_blocking(move || {
            for command in commands {
                let outcome = orchestrator.handle(&session, command.clone());
                debug!(?command, ?outcome, "command settled");
            }
        });
    }

    /// Loads another page, keeping the wallet session.
    pub fn navigate(&self, kind: PageKind) {
        self.page().navigate(kind);
        self.dispatch_all(vec![DappCommand::InitPage, DappCommand::Refresh]);
    }

    /// Drains provider notifications every `interval` for the lifetime of
    /// the runtime.
    pub fn start_event_poller(&self, interval: Duration) {
        let orchestrator = Arc::clone(&self.orchestrator);
        let session = Arc::clone(&self.session);
        self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let orchestrator = Arc::clone(&orchestrator);
                let session = Arc::clone(&session);
                let polled = tokio::task::spawn_blocking(move || {
                    orchestrator.handle(&session, DappCommand::PollProviderEvents)
                })
                .await;
                if let Err(e) = polled {
                    warn!(error = %e, "provider event poll panicked");
                }
            }
        });
    }
}
