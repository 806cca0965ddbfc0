//! UI helper components

use eframe::egui;
use vnst_dapp_core::{ControlState, LevelStatus, Notice, NoticeKind};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 180, 150);
const ERROR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);
const SUCCESS: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(egui::Color32::from_rgb(0, 212, 170)));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// One labeled value from a page slot.
pub fn stat_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{label}:")).strong());
        ui.label(egui::RichText::new(value).monospace());
    });
}

/// Button driven by a control's state; disabled while busy.
pub fn control_button(ui: &mut egui::Ui, state: &ControlState) -> egui::Response {
    let btn = egui::Button::new(
        egui::RichText::new(state.label())
            .size(14.0)
            .color(egui::Color32::WHITE),
    )
    .min_size(egui::vec2(130.0, 34.0))
    .fill(ACCENT);
    let response = ui.add_enabled(state.is_enabled(), btn);
    if !state.is_enabled() {
        ui.spinner();
    }
    response
}

pub fn address_input(ui: &mut egui::Ui, value: &mut String) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text("0x... (optional)")
            .desired_width(400.0)
            .font(egui::TextStyle::Monospace),
    )
}

pub fn number_input(ui: &mut egui::Ui, value: &mut String, hint: &str) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(150.0)
            .font(egui::TextStyle::Monospace),
    )
}

pub fn notice(ui: &mut egui::Ui, notice: &Notice) {
    let (icon, color) = match notice.kind {
        NoticeKind::Success => ("✅", SUCCESS),
        NoticeKind::Error => ("❌", ERROR),
    };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(icon).size(16.0));
        ui.label(egui::RichText::new(&notice.message).color(color));
    });
}

pub fn level_badge(ui: &mut egui::Ui, status: Option<LevelStatus>) {
    match status {
        Some(LevelStatus::Active) => {
            ui.label(egui::RichText::new(LevelStatus::Active.label()).color(SUCCESS));
        }
        Some(LevelStatus::Locked) => {
            ui.label(egui::RichText::new(LevelStatus::Locked.label()).color(ERROR));
        }
        None => {
            ui.label("--");
        }
    }
}

/// Render content in a subtle card/frame
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, add_contents);
}
