// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Static buyer pages.

use eframe::egui;

const STEPS: [(&str, &str, &str); 4] = [
    (
        egui_phosphor::regular::MAGNIFYING_GLASS,
        "Browse & Select",
        "Explore Valorant and BGMI accounts with detailed stats and previews.",
    ),
    (
        egui_phosphor::regular::LOCK,
        "Secure Payment",
        "Complete the purchase with the seller through an encrypted payment option.",
    ),
    (
        egui_phosphor::regular::LIGHTNING,
        "Instant Delivery",
        "Receive the account credentials with full login instructions.",
    ),
    (
        egui_phosphor::regular::GAME_CONTROLLER,
        "Start Gaming",
        "Log in and play with your new account and its exclusive content.",
    ),
];

const FAQ: [(&str, &str); 6] = [
    (
        "Are the accounts safe and secure?",
        "All accounts are hand-leveled, never botted, and come with full email access. \
         Every purchase has 30-day protection against account issues.",
    ),
    (
        "How fast is the delivery?",
        "Most accounts are delivered within 5 minutes of purchase confirmation. \
         Custom orders may take up to 2 hours.",
    ),
    (
        "What if I have issues with my account?",
        "Support is available around the clock and there is a 30-day money-back guarantee.",
    ),
    (
        "Can I change the account details after purchase?",
        "Yes. You get full access to change email, password and other settings, \
         with instructions on securing the account.",
    ),
    (
        "Will my payment information be secure?",
        "Payments go through trusted processors with industry-standard encryption. \
         Financial information is never stored on our servers.",
    ),
    (
        "Do you offer custom account requirements?",
        "Yes. Contact a seller with the ranks, skins or achievements you need.",
    ),
];

/// Welcome banner shown above the catalogue on the buyer home screen.
pub fn home_banner(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Swarg Store").size(28.0).strong());
            ui.label(
                egui::RichText::new("Premium gaming IDs from verified sellers.")
                    .color(egui::Color32::from_gray(110)),
            );
        });
}

pub fn how_it_works(ui: &mut egui::Ui) {
    ui.heading("How it works");
    ui.label(
        egui::RichText::new("Get your gaming account in 4 simple steps.")
            .color(egui::Color32::from_gray(110)),
    );
    ui.add_space(12.0);

    for (i, (icon, title, description)) in STEPS.iter().enumerate() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(*icon).size(28.0));
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(format!("{}. {title}", i + 1)).strong());
                    ui.label(*description);
                });
            });
        });
        ui.add_space(6.0);
    }
}

pub fn faq(ui: &mut egui::Ui) {
    ui.heading("Frequently asked questions");
    ui.add_space(12.0);

    for (question, answer) in FAQ {
        egui::CollapsingHeader::new(egui::RichText::new(question).strong())
            .default_open(false)
            .show(ui, |ui| {
                ui.label(answer);
            });
        ui.add_space(4.0);
    }

    ui.add_space(12.0);
    ui.label(
        egui::RichText::new("Still have questions? Contact a seller on Telegram from any listing.")
            .small()
            .color(egui::Color32::from_gray(110)),
    );
}
