//! Main application state and update loop

use std::time::{Duration, Instant};

use eframe::egui;
use vnst_dapp_core::domain::{STABLE_REWARD_SYMBOL, STAKE_SYMBOL, TOKEN_REWARD_SYMBOL};
use vnst_dapp_core::{Control, DappCommand, InputField, PageKind, Slot, REFERRAL_LEVELS};

use crate::bridge::DappBridge;
use crate::page::PageModel;
use crate::ui;

/// Narrower windows collapse the navigation behind the menu toggle.
const COMPACT_WIDTH: f32 = 720.0;

/// What the user asked for during one frame; applied after the page lock is
/// released.
enum Action {
    Command(DappCommand),
    Navigate(PageKind),
}

pub struct App {
    bridge: DappBridge,
    notice_ttl: Duration,
}

impl App {
    pub fn new(bridge: DappBridge, notice_ttl: Duration) -> Self {
        bridge.dispatch(DappCommand::InitPage);
        Self { bridge, notice_ttl }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        let mut actions = Vec::new();
        {
            let mut model = self.bridge.page().lock();
            model.expire_notices(Instant::now(), self.notice_ttl);
            if !model.notices.is_empty() {
                ctx.request_repaint_after(Duration::from_millis(250));
            }

            let compact = ctx.screen_rect().width() < COMPACT_WIDTH;
            egui::TopBottomPanel::top("header").show(ctx, |ui| {
                render_header(ui, &model, compact, &mut actions);
            });

            if !model.notices.is_empty() {
                egui::TopBottomPanel::bottom("notices").show(ctx, |ui| {
                    ui.add_space(4.0);
                    for active in &model.notices {
                        ui::notice(ui, &active.notice);
                    }
                    ui.add_space(4.0);
                });
            }

            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(10.0);
                    match model.kind() {
                        PageKind::Home => render_home(ui, &model, &mut actions),
                        PageKind::Staking => render_staking(ui, &mut model, &mut actions),
                        PageKind::Team => render_team(ui, &model),
                    }
                    ui.add_space(20.0);
                });
            });
        }

        for action in actions {
            match action {
                Action::Command(command) => self.bridge.dispatch(command),
                Action::Navigate(kind) => self.bridge.navigate(kind),
            }
        }
    }
}

fn render_header(ui: &mut egui::Ui, model: &PageModel, compact: bool, actions: &mut Vec<Action>) {
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.heading(
            egui::RichText::new("VNST Staking")
                .size(22.0)
                .color(egui::Color32::from_rgb(0, 212, 170)),
        );
        ui.add_space(20.0);
        if compact {
            let menu = model.control(Control::MenuToggle);
            if ui.button(menu.label()).clicked() {
                actions.push(Action::Command(DappCommand::ToggleMenu));
            }
        } else {
            ui.separator();
            render_nav(ui, model.kind(), actions);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let connect = model.control(Control::Connect);
            if ui::control_button(ui, &connect).clicked() {
                actions.push(Action::Command(DappCommand::Connect));
            }
        });
    });
    if compact && model.menu_open {
        ui.vertical(|ui| render_nav(ui, model.kind(), actions));
    }
    ui.add_space(4.0);
}

fn render_nav(ui: &mut egui::Ui, current: PageKind, actions: &mut Vec<Action>) {
    for (kind, label) in [
        (PageKind::Home, "Home"),
        (PageKind::Staking, "Staking"),
        (PageKind::Team, "Team"),
    ] {
        if ui.selectable_label(current == kind, label).clicked() && current != kind {
            actions.push(Action::Navigate(kind));
        }
    }
}

fn render_home(ui: &mut egui::Ui, model: &PageModel, actions: &mut Vec<Action>) {
    ui::styled_heading(ui, "Stake VNST, earn VNT and USDT");
    ui.label("Connect your wallet to see the pool totals and your rewards.");
    ui.add_space(15.0);

    ui::card(ui, |ui| {
        ui::section_header(ui, "Pool");
        ui::stat_row(ui, "Total Staked", model.slot(Slot::TotalStaked));
        ui::stat_row(ui, "Total Withdrawn", model.slot(Slot::TotalWithdrawn));
        ui::stat_row(ui, "Active Stakers", model.slot(Slot::ActiveStakers));
    });
    ui.add_space(10.0);
    ui::card(ui, |ui| {
        ui::section_header(ui, "You");
        ui::stat_row(ui, "Your Stake", model.slot(Slot::UserStaked));
        ui::stat_row(
            ui,
            &format!("{TOKEN_REWARD_SYMBOL} Rewards"),
            model.slot(Slot::HomeTokenRewards),
        );
        ui::stat_row(
            ui,
            &format!("{STABLE_REWARD_SYMBOL} Rewards"),
            model.slot(Slot::HomeStableRewards),
        );
    });
    ui.add_space(15.0);
    if ui.button("Start staking").clicked() {
        actions.push(Action::Navigate(PageKind::Staking));
    }
}

fn render_staking(ui: &mut egui::Ui, model: &mut PageModel, actions: &mut Vec<Action>) {
    ui::styled_heading(ui, "Staking");
    ui.add_space(10.0);

    ui::card(ui, |ui| {
        ui::section_header(ui, "Wallet");
        ui::stat_row(ui, "Address", model.slot(Slot::WalletAddress));
        ui::stat_row(
            ui,
            &format!("{STAKE_SYMBOL} Balance"),
            model.slot(Slot::VnstBalance),
        );
    });
    ui.add_space(10.0);

    ui::card(ui, |ui| {
        ui::section_header(ui, &format!("Stake {STAKE_SYMBOL}"));
        ui::stat_row(ui, "Minimum", model.slot(Slot::MinStake));
        ui::stat_row(ui, "Maximum", model.slot(Slot::MaxStake));
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Amount:");
            ui::number_input(ui, model.input_mut(InputField::StakeAmount), "0.0");
        });
        ui.horizontal(|ui| {
            ui.label("Referrer:");
            ui::address_input(ui, model.input_mut(InputField::ReferralAddress));
        });
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui::control_button(ui, &model.control(Control::ApproveMax)).clicked() {
                actions.push(Action::Command(DappCommand::ApproveMax));
            }
            if ui::control_button(ui, &model.control(Control::Stake)).clicked() {
                actions.push(Action::Command(DappCommand::Stake));
            }
        });
    });
    ui.add_space(10.0);

    ui::card(ui, |ui| {
        ui::section_header(ui, "Position");
        ui::stat_row(ui, "Active Stake", model.slot(Slot::ActiveStake));
        ui::stat_row(ui, "Direct Members", model.slot(Slot::DirectMembers));
        ui::stat_row(ui, "Total Earned", model.slot(Slot::TotalEarned));
    });
    ui.add_space(10.0);

    ui::card(ui, |ui| {
        ui::section_header(ui, "Rewards");
        ui.horizontal(|ui| {
            ui::stat_row(
                ui,
                &format!("Pending {TOKEN_REWARD_SYMBOL}"),
                model.slot(Slot::PendingToken),
            );
            if ui::control_button(ui, &model.control(Control::ClaimToken)).clicked() {
                actions.push(Action::Command(DappCommand::ClaimToken));
            }
        });
        ui.horizontal(|ui| {
            ui::stat_row(
                ui,
                &format!("Pending {STABLE_REWARD_SYMBOL}"),
                model.slot(Slot::PendingStable),
            );
            if ui::control_button(ui, &model.control(Control::ClaimStable)).clicked() {
                actions.push(Action::Command(DappCommand::ClaimStable));
            }
        });
    });
    ui.add_space(10.0);

    ui::card(ui, |ui| {
        ui::section_header(ui, "Referral");
        ui.label(egui::RichText::new(model.slot(Slot::ReferralLink)).monospace());
        if ui::control_button(ui, &model.control(Control::CopyReferral)).clicked() {
            actions.push(Action::Command(DappCommand::CopyReferralLink));
        }
    });
}

fn render_team(ui: &mut egui::Ui, model: &PageModel) {
    ui::styled_heading(ui, "My Team");
    ui.add_space(10.0);
    ui::stat_row(ui, "Wallet", model.slot(Slot::WalletAddress));
    ui::stat_row(ui, "Direct Members", model.slot(Slot::TeamDirectCount));
    ui.add_space(10.0);

    egui::Grid::new("team_levels")
        .num_columns(3)
        .striped(true)
        .spacing([24.0, 8.0])
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Level").strong());
            ui.label(egui::RichText::new("Members").strong());
            ui.label(egui::RichText::new("Status").strong());
            ui.end_row();
            for level in 1..=REFERRAL_LEVELS {
                ui.label(format!("Level {level}"));
                ui.label(model.slot(Slot::LevelCount(level)));
                ui::level_badge(ui, model.level_status.get(&level).copied());
                ui.end_row();
            }
        });
}
